// ==========================================
// 房源目标达成分析系统 - 运行汇总引擎
// ==========================================
// 职责: 汇总一次快照运行的分布与空值统计, 并输出到日志
// 输入: 全量增强表 + 观察名单
// 输出: RunSummary
// ==========================================

use crate::domain::listing::{EnrichedListing, MergedListing, WatchlistListing};
use crate::domain::summary::RunSummary;
use crate::domain::types::{CriticalityGroup, OperationalStatus, PriorityBand};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::info;

// ==========================================
// RunSummaryEngine - 运行汇总引擎
// ==========================================
// 红线: 无状态引擎,所有方法都是纯函数
pub struct RunSummaryEngine;

impl RunSummaryEngine {
    pub fn new() -> Self {
        Self
    }

    /// 生成运行汇总
    ///
    /// # 参数
    /// - `run_id`: 本次运行ID
    /// - `run_date`: 快照日期
    /// - `enriched`: 全量增强表
    /// - `watchlist`: 观察名单
    /// - `dropped_without_date`: 因缺少参考日期被剔除的观察名单房源数
    /// - `has_min_price`: 是否加载了最低价补充表
    pub fn build(
        &self,
        run_id: &str,
        run_date: NaiveDate,
        enriched: &[EnrichedListing],
        watchlist: &[WatchlistListing],
        dropped_without_date: usize,
        has_min_price: bool,
    ) -> RunSummary {
        let mut criticality_counts = zeroed(CriticalityGroup::ALL.iter().map(|g| g.as_str()));
        for row in enriched {
            *criticality_counts
                .entry(row.criticality_group.as_str().to_string())
                .or_default() += 1;
        }

        let mut status_counts = zeroed(OperationalStatus::ALL.iter().map(|s| s.as_str()));
        let mut priority_counts = zeroed(PriorityBand::ALL.iter().map(|b| b.as_str()));
        for row in watchlist {
            *status_counts
                .entry(row.operational_status.as_str().to_string())
                .or_default() += 1;
            *priority_counts
                .entry(row.priority_band.as_str().to_string())
                .or_default() += 1;
        }

        RunSummary {
            run_id: run_id.to_string(),
            run_date: Some(run_date),
            total_listings: enriched.len(),
            watchlist_listings: watchlist.len(),
            watchlist_dropped_without_date: dropped_without_date,
            criticality_counts,
            status_counts,
            priority_counts,
            null_counts: Self::null_counts(enriched, has_min_price),
        }
    }

    /// 将汇总写入日志
    pub fn log(&self, summary: &RunSummary) {
        info!(
            run_id = %summary.run_id,
            run_date = ?summary.run_date,
            total = summary.total_listings,
            watchlist = summary.watchlist_listings,
            watchlist_share_pct = %format!("{:.1}", summary.watchlist_share_pct()),
            dropped_without_date = summary.watchlist_dropped_without_date,
            "快照运行汇总"
        );
        for (group, count) in &summary.criticality_counts {
            info!(group = %group, count, "关键度分布");
        }
        for (status, count) in &summary.status_counts {
            info!(status = %status, count, "运营状态分布");
        }
        for (band, count) in &summary.priority_counts {
            info!(band = %band, count, "优先级分布");
        }
        for (field, count) in summary.null_counts.iter().filter(|(_, c)| **c > 0) {
            info!(field = %field, count, "可选字段空值");
        }
    }

    fn null_counts(enriched: &[EnrichedListing], has_min_price: bool) -> BTreeMap<String, usize> {
        let nulls = |is_null: fn(&MergedListing) -> bool| {
            enriched.iter().filter(|row| is_null(&row.listing)).count()
        };

        let mut counts = BTreeMap::new();
        counts.insert("category".to_string(), nulls(|l| l.category.is_none()));
        counts.insert("portfolio".to_string(), nulls(|l| l.portfolio.is_none()));
        counts.insert("state".to_string(), nulls(|l| l.state.is_none()));
        counts.insert("city".to_string(), nulls(|l| l.city.is_none()));
        counts.insert("neighborhood".to_string(), nulls(|l| l.neighborhood.is_none()));
        counts.insert("occupancy_rate".to_string(), nulls(|l| l.occupancy_rate.is_none()));
        counts.insert(
            "avg_price_available".to_string(),
            nulls(|l| l.avg_price_available.is_none()),
        );
        counts.insert(
            "days_available_raw".to_string(),
            nulls(|l| l.days_available_raw.is_none()),
        );
        counts.insert("execution_date".to_string(), nulls(|l| l.execution_date.is_none()));
        if has_min_price {
            counts.insert("min_price_days".to_string(), nulls(|l| l.min_price_days.is_none()));
        }
        counts
    }
}

impl Default for RunSummaryEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn zeroed<'a>(keys: impl Iterator<Item = &'a str>) -> BTreeMap<String, usize> {
    keys.map(|k| (k.to_string(), 0)).collect()
}
