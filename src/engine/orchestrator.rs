// ==========================================
// 房源目标达成分析系统 - 引擎编排器
// ==========================================
// 用途: 协调各引擎的执行顺序, 产出一次完整快照
// 主流程:
//   1) Merger        业绩表左连接价格/位置/最低价
//   2) Achievement   达成率 + 关键度分档
//   3) Impact        封锁损失 + 缺口
//   4) Watchlist     筛选 Berlinda 房源
//   5) Availability  剩余可售天数
//   6) Potential     潜力预测 + 所需天数
//   7) Status        运营状态
//   8) Priority      原始分 → (屏障) → 归一化 + 分档
//   9) Summary       运行汇总
// ==========================================

use crate::config::ScoringConfigReader;
use crate::domain::listing::{EnrichedListing, ExtractSet, MergedListing, WatchlistListing};
use crate::domain::snapshot::SnapshotOutput;
use crate::domain::types::{OperationalStatus, StatusPolicy};
use crate::engine::{
    AchievementCalculator, AvailabilityResolver, ExtractMerger, FinancialImpactCalculator,
    PotentialInput, PotentialProjector, PriorityInput, PriorityScorer, RunSummaryEngine,
    StatusClassifier, StatusInput, WatchlistFilter,
};
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// 第一阶段产出: 已判定状态、等待队列归一化的观察名单行
struct PendingRow {
    enriched: EnrichedListing,
    reference_date: NaiveDate,
    days_available_adjusted: i64,
    days_needed: i64,
    potential_max: f64,
    potential_realistic: f64,
    operational_status: OperationalStatus,
    priority_input: PriorityInput,
}

// ==========================================
// PipelineOrchestrator - 引擎编排器
// ==========================================

pub struct PipelineOrchestrator<C>
where
    C: ScoringConfigReader,
{
    config: Arc<C>,
    merger: ExtractMerger,
    achievement: AchievementCalculator,
    impact: FinancialImpactCalculator,
    watchlist: WatchlistFilter,
    availability: AvailabilityResolver,
    projector: PotentialProjector,
    status: StatusClassifier,
    scorer: PriorityScorer,
    summary: RunSummaryEngine,
}

impl<C> PipelineOrchestrator<C>
where
    C: ScoringConfigReader,
{
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - config: 评分配置读取器
    pub fn new(config: Arc<C>) -> Self {
        Self {
            config,
            merger: ExtractMerger::new(),
            achievement: AchievementCalculator::new(),
            impact: FinancialImpactCalculator::new(),
            watchlist: WatchlistFilter::new(),
            availability: AvailabilityResolver::new(),
            projector: PotentialProjector::new(),
            status: StatusClassifier::new(),
            scorer: PriorityScorer::new(),
            summary: RunSummaryEngine::new(),
        }
    }

    /// 执行完整快照计算
    ///
    /// 同一输入 + 同一参考日期 → 完全相同的结果
    #[instrument(skip(self, extracts), fields(performance = extracts.performance.len()))]
    pub fn run(&self, extracts: &ExtractSet) -> SnapshotOutput {
        let run_id = Uuid::new_v4().to_string();
        let reference_override = self.config.reference_date_override();
        let policy = self.config.status_policy();
        info!(run_id = %run_id, policy = %policy, reference_override = ?reference_override, "开始快照计算");

        // ==========================================
        // 步骤1-3: 合并 + 达成率 + 财务影响
        // ==========================================
        let merged = self.merger.merge(extracts);
        let enriched: Vec<EnrichedListing> =
            merged.into_iter().map(|listing| self.enrich(listing)).collect();
        let run_date = Self::resolve_run_date(reference_override, &enriched);

        // ==========================================
        // 步骤4: 观察名单
        // ==========================================
        let cohort = self.watchlist.select(&enriched);

        // ==========================================
        // 步骤5-7: 逐行剩余天数 / 潜力 / 状态 / 原始分输入
        // ==========================================
        let mut pending = Vec::with_capacity(cohort.len());
        let mut dropped_without_date = 0usize;
        for row in cohort {
            let reference_date = match reference_override.or(row.listing.execution_date) {
                Some(date) => date,
                None => {
                    dropped_without_date += 1;
                    warn!(listing_id = %row.listing.listing_id, "观察名单房源缺少执行日期, 已跳过");
                    continue;
                }
            };
            pending.push(self.evaluate_row(row, reference_date, policy));
        }

        // ==========================================
        // 步骤8: 优先级（全部原始分就绪后再归一化）
        // ==========================================
        let inputs: Vec<PriorityInput> = pending.iter().map(|p| p.priority_input).collect();
        let scores = self.scorer.score_cohort(&inputs);

        let watchlist: Vec<WatchlistListing> = pending
            .into_iter()
            .zip(scores)
            .map(|(row, score)| WatchlistListing {
                enriched: row.enriched,
                reference_date: row.reference_date,
                days_available_adjusted: row.days_available_adjusted,
                days_needed: row.days_needed,
                potential_max: row.potential_max,
                potential_realistic: row.potential_realistic,
                operational_status: row.operational_status,
                priority_score_raw: score.raw,
                priority_score_normalized: score.normalized,
                priority_band: score.band,
            })
            .collect();

        // ==========================================
        // 步骤9: 汇总
        // ==========================================
        let has_min_price = extracts.min_prices.is_some();
        let summary = self.summary.build(
            &run_id,
            run_date,
            &enriched,
            &watchlist,
            dropped_without_date,
            has_min_price,
        );
        self.summary.log(&summary);

        SnapshotOutput {
            run_date,
            enriched,
            watchlist,
            summary,
            has_min_price,
        }
    }

    /// 单行增强: 达成率 + 分档 + 财务影响
    pub fn enrich(&self, listing: MergedListing) -> EnrichedListing {
        let achievement = self.achievement.evaluate(listing.revenue_month, listing.target);
        let impact = self.impact.evaluate(
            listing.blocked_days,
            listing.avg_price_occupied,
            listing.revenue_month,
            listing.target,
        );
        EnrichedListing {
            listing,
            achievement_ratio: achievement.ratio,
            criticality_group: achievement.group,
            lost_revenue_blocking: impact.lost_revenue_blocking,
            shortfall: impact.shortfall,
        }
    }

    fn evaluate_row(
        &self,
        row: &EnrichedListing,
        reference_date: NaiveDate,
        policy: StatusPolicy,
    ) -> PendingRow {
        let listing = &row.listing;
        let days_available_adjusted = self
            .availability
            .resolve(reference_date, listing.days_available_raw);

        let projection = self.projector.project(&PotentialInput {
            revenue_month: listing.revenue_month,
            shortfall: row.shortfall,
            days_available_adjusted,
            avg_price_available: listing.avg_price_available,
            occupancy_rate: listing.occupancy_rate,
        });

        let operational_status = self.status.classify(
            &StatusInput {
                revenue_month: listing.revenue_month,
                target: listing.target,
                days_available_adjusted,
                days_needed: projection.days_needed,
                potential_realistic: projection.potential_realistic,
            },
            policy,
        );

        debug!(
            listing_id = %listing.listing_id,
            reference_date = %reference_date,
            days_available_adjusted,
            days_needed = projection.days_needed,
            status = %operational_status,
            "观察名单房源评估"
        );

        PendingRow {
            enriched: row.clone(),
            reference_date,
            days_available_adjusted,
            days_needed: projection.days_needed,
            potential_max: projection.potential_max,
            potential_realistic: projection.potential_realistic,
            operational_status,
            priority_input: PriorityInput {
                revenue_month: listing.revenue_month,
                target: listing.target,
                shortfall: row.shortfall,
                achievement_ratio: row.achievement_ratio,
                days_available_adjusted,
                days_needed: projection.days_needed,
                potential_max: projection.potential_max,
                avg_price_available: listing.avg_price_available,
            },
        }
    }

    /// 快照日期: 覆写 > 首行执行日期 > 当天
    fn resolve_run_date(
        reference_override: Option<NaiveDate>,
        enriched: &[EnrichedListing],
    ) -> NaiveDate {
        if let Some(date) = reference_override {
            return date;
        }
        if let Some(date) = enriched.iter().find_map(|row| row.listing.execution_date) {
            return date;
        }
        let today = Local::now().date_naive();
        warn!(today = %today, "没有任何房源携带执行日期, 快照日期回退为当天");
        today
    }
}
