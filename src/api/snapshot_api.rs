// ==========================================
// 房源目标达成分析系统 - 快照查询 API
// ==========================================
// 职责: 列出已生成的快照, 按日期（默认最新）回读全量表与观察名单
// ==========================================

use crate::api::error::PipelineResult;
use crate::domain::listing::{EnrichedListing, WatchlistListing};
use crate::domain::types::{OperationalStatus, PriorityBand};
use crate::repository::{RepositoryError, SnapshotEntry, SnapshotRepository};
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::debug;

/// 回读的快照
#[derive(Debug, Clone)]
pub struct SnapshotView {
    pub entry: SnapshotEntry,
    pub enriched: Vec<EnrichedListing>,
    pub watchlist: Vec<WatchlistListing>,
}

impl SnapshotView {
    /// 观察名单按状态计数
    pub fn status_count(&self, status: OperationalStatus) -> usize {
        self.watchlist
            .iter()
            .filter(|w| w.operational_status == status)
            .count()
    }

    /// 可行动房源数（可达成 + 需努力）
    pub fn actionable_count(&self) -> usize {
        self.watchlist
            .iter()
            .filter(|w| w.operational_status.is_actionable())
            .count()
    }

    /// 操作表顺序: 优先级档位降序, 同档按归一化分数降序, 再按输入顺序
    pub fn watchlist_by_priority(&self) -> Vec<&WatchlistListing> {
        let mut rows: Vec<&WatchlistListing> = self.watchlist.iter().collect();
        rows.sort_by(|a, b| {
            b.priority_band
                .sort_weight()
                .cmp(&a.priority_band.sort_weight())
                .then(b.priority_score_normalized.total_cmp(&a.priority_score_normalized))
        });
        rows
    }

    pub fn band_count(&self, band: PriorityBand) -> usize {
        self.watchlist.iter().filter(|w| w.priority_band == band).count()
    }
}

pub struct SnapshotApi {
    repository: SnapshotRepository,
}

impl SnapshotApi {
    pub fn new(processed_dir: impl Into<PathBuf>) -> Self {
        Self {
            repository: SnapshotRepository::new(processed_dir),
        }
    }

    /// 全部快照（最新在前）
    pub fn list_snapshots(&self) -> PipelineResult<Vec<SnapshotEntry>> {
        Ok(self.repository.list_snapshots()?)
    }

    /// 回读快照; date 为 None 时取最新
    pub fn load_snapshot(&self, date: Option<NaiveDate>) -> PipelineResult<SnapshotView> {
        let entry = match date {
            Some(date) => self.repository.find_snapshot(date)?,
            None => self
                .repository
                .latest_snapshot()?
                .ok_or_else(|| RepositoryError::NotFound {
                    entity: "snapshot".to_string(),
                    id: self.repository.processed_dir().display().to_string(),
                })?,
        };

        let (enriched, watchlist) = self.repository.read_snapshot(&entry)?;
        debug!(
            date = %entry.date,
            enriched = enriched.len(),
            watchlist = watchlist.len(),
            "快照已加载"
        );
        Ok(SnapshotView {
            entry,
            enriched,
            watchlist,
        })
    }
}
