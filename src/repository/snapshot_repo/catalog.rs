// 快照目录: 按日期倒序列出可用的全量增强表, 并配对同日期的观察名单/汇总文件

use super::{file_names, SnapshotRepository};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// 一个可用快照
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotEntry {
    pub date: NaiveDate,
    pub enriched_path: PathBuf,
    /// 同日期观察名单文件（不存在 = 空观察名单）
    pub watchlist_path: Option<PathBuf>,
    pub summary_path: Option<PathBuf>,
}

impl SnapshotEntry {
    /// 看板下拉框显示名
    pub fn label(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }
}

impl SnapshotRepository {
    /// 列出全部快照（最新在前）; 目录不存在时返回空列表
    pub fn list_snapshots(&self) -> RepositoryResult<Vec<SnapshotEntry>> {
        let dir = self.processed_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(dir).map_err(|e| RepositoryError::DirectoryError {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;

        let mut snapshots = Vec::new();
        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let Some(date) = file_name.to_str().and_then(parse_enriched_date) else {
                continue;
            };
            let watchlist = self.watchlist_path(date);
            let summary = self.summary_path(date);
            snapshots.push(SnapshotEntry {
                date,
                enriched_path: entry.path(),
                watchlist_path: watchlist.is_file().then_some(watchlist),
                summary_path: summary.is_file().then_some(summary),
            });
        }

        snapshots.sort_by(|a, b| b.date.cmp(&a.date));
        debug!(count = snapshots.len(), "快照目录已列出");
        Ok(snapshots)
    }

    /// 最新快照
    pub fn latest_snapshot(&self) -> RepositoryResult<Option<SnapshotEntry>> {
        Ok(self.list_snapshots()?.into_iter().next())
    }

    /// 指定日期的快照
    pub fn find_snapshot(&self, date: NaiveDate) -> RepositoryResult<SnapshotEntry> {
        self.list_snapshots()?
            .into_iter()
            .find(|s| s.date == date)
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "snapshot".to_string(),
                id: date.to_string(),
            })
    }
}

/// meta_analysis_final_enriched_YYYY-MM-DD.csv → 日期
pub(super) fn parse_enriched_date(file_name: &str) -> Option<NaiveDate> {
    let date_part = file_name
        .strip_prefix(file_names::ENRICHED_PREFIX)?
        .strip_suffix(".csv")?;
    NaiveDate::parse_from_str(date_part, file_names::DATE_FORMAT).ok()
}
