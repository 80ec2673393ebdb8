// ==========================================
// 房源目标达成分析系统 - 快照准备 API
// ==========================================
// 职责: 一次完整运行 加载抽取表 → 评分 → 写出快照
// 架构: API 层 → Importer / Engine / Repository
// ==========================================

use crate::api::error::PipelineResult;
use crate::config::PipelineConfig;
use crate::domain::summary::RunSummary;
use crate::engine::PipelineOrchestrator;
use crate::importer::{ExtractLoader, ExtractSources};
use crate::repository::{SnapshotPaths, SnapshotRepository};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// 一次运行的结果
#[derive(Debug, Clone)]
pub struct PrepareReport {
    pub run_date: NaiveDate,
    pub sources: ExtractSources,
    pub paths: SnapshotPaths,
    pub summary: RunSummary,
    /// 被降级为空值的单元格数
    pub dq_warnings: usize,
    /// 因缺少 listing_id 被丢弃的行数
    pub dq_dropped: usize,
}

/// 供命令行输出的简要结果
#[derive(Debug, Clone, Serialize)]
pub struct PrepareOverview {
    pub run_date: NaiveDate,
    pub total_listings: usize,
    pub watchlist_listings: usize,
    pub enriched_file: String,
    pub watchlist_file: Option<String>,
}

impl PrepareReport {
    pub fn overview(&self) -> PrepareOverview {
        PrepareOverview {
            run_date: self.run_date,
            total_listings: self.summary.total_listings,
            watchlist_listings: self.summary.watchlist_listings,
            enriched_file: self.paths.enriched.display().to_string(),
            watchlist_file: self
                .paths
                .watchlist
                .as_ref()
                .map(|p| p.display().to_string()),
        }
    }
}

// ==========================================
// PrepareApi
// ==========================================
pub struct PrepareApi {
    config: Arc<PipelineConfig>,
    loader: ExtractLoader,
    orchestrator: PipelineOrchestrator<PipelineConfig>,
    repository: SnapshotRepository,
}

impl PrepareApi {
    pub fn new(config: Arc<PipelineConfig>) -> Self {
        Self::with_loader(config, ExtractLoader::new())
    }

    /// 注入自定义加载器（自定义解析器/映射器）
    pub fn with_loader(config: Arc<PipelineConfig>, loader: ExtractLoader) -> Self {
        let repository = SnapshotRepository::new(config.processed_dir.clone());
        Self {
            orchestrator: PipelineOrchestrator::new(Arc::clone(&config)),
            config,
            loader,
            repository,
        }
    }

    /// 执行一次快照准备
    ///
    /// # 返回
    /// - Err(Import(MissingInput)): 必需抽取表缺失, 不写出任何文件
    /// - Ok(PrepareReport): 快照已写出（观察名单为空时不含观察名单文件）
    #[instrument(skip(self), fields(raw_dir = %self.config.raw_dir.display()))]
    pub fn run(&self) -> PipelineResult<PrepareReport> {
        let loaded = self.loader.load(&self.config.raw_dir)?;
        let snapshot = self.orchestrator.run(&loaded.extracts);

        let paths = self
            .repository
            .write_snapshot(&snapshot, self.config.write_summary)?;

        info!(
            run_date = %snapshot.run_date,
            enriched = %paths.enriched.display(),
            watchlist = ?paths.watchlist,
            "快照准备完成"
        );

        Ok(PrepareReport {
            run_date: snapshot.run_date,
            sources: loaded.sources,
            paths,
            dq_warnings: loaded.dq.warning_count(),
            dq_dropped: loaded.dq.dropped_count(),
            summary: snapshot.summary,
        })
    }
}
