// ==========================================
// 房源目标达成分析系统 - 快照仓储
// ==========================================
// 职责: 快照表的写出、目录列举与回读
// 文件:
//   meta_analysis_final_enriched_{YYYY-MM-DD}.csv  全量增强表
//   berlinda_prepared_{YYYY-MM-DD}.csv             观察名单（为空时不写）
//   run_summary_{YYYY-MM-DD}.json                  运行汇总（可关闭）
// 红线: Repository 不含业务逻辑; 每次运行产出一组独立文件
// ==========================================

mod catalog;
mod columns;
mod reader;
mod writer;

#[cfg(test)]
mod tests;

pub use catalog::SnapshotEntry;
pub use columns::{enriched_columns, watchlist_columns, WATCHLIST_DERIVED_COLUMNS};
pub use writer::SnapshotPaths;

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// 文件名前缀
pub mod file_names {
    pub const ENRICHED_PREFIX: &str = "meta_analysis_final_enriched_";
    pub const WATCHLIST_PREFIX: &str = "berlinda_prepared_";
    pub const SUMMARY_PREFIX: &str = "run_summary_";
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
}

// ==========================================
// SnapshotRepository - 快照仓储
// ==========================================
pub struct SnapshotRepository {
    processed_dir: PathBuf,
}

impl SnapshotRepository {
    pub fn new(processed_dir: impl Into<PathBuf>) -> Self {
        Self {
            processed_dir: processed_dir.into(),
        }
    }

    pub fn processed_dir(&self) -> &Path {
        &self.processed_dir
    }

    pub fn enriched_path(&self, date: NaiveDate) -> PathBuf {
        self.dated_path(file_names::ENRICHED_PREFIX, date, "csv")
    }

    pub fn watchlist_path(&self, date: NaiveDate) -> PathBuf {
        self.dated_path(file_names::WATCHLIST_PREFIX, date, "csv")
    }

    pub fn summary_path(&self, date: NaiveDate) -> PathBuf {
        self.dated_path(file_names::SUMMARY_PREFIX, date, "json")
    }

    fn dated_path(&self, prefix: &str, date: NaiveDate, ext: &str) -> PathBuf {
        self.processed_dir.join(format!(
            "{}{}.{}",
            prefix,
            date.format(file_names::DATE_FORMAT),
            ext
        ))
    }
}
