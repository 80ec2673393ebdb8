// 快照写出: 全量增强表 → 观察名单 → 运行汇总

use super::columns::{enriched_columns, enriched_record, watchlist_columns, watchlist_record};
use super::SnapshotRepository;
use crate::domain::snapshot::SnapshotOutput;
use crate::domain::summary::RunSummary;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use csv::Writer;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// 本次写出的文件
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotPaths {
    pub enriched: PathBuf,
    /// None = 观察名单为空, 未写出
    pub watchlist: Option<PathBuf>,
    /// None = 未开启汇总输出
    pub summary: Option<PathBuf>,
}

impl SnapshotRepository {
    /// 写出完整快照
    #[instrument(skip(self, snapshot), fields(run_date = %snapshot.run_date))]
    pub fn write_snapshot(
        &self,
        snapshot: &SnapshotOutput,
        write_summary: bool,
    ) -> RepositoryResult<SnapshotPaths> {
        self.ensure_dir()?;

        let enriched = self.enriched_path(snapshot.run_date);
        write_table(
            &enriched,
            &enriched_columns(snapshot.has_min_price),
            snapshot
                .enriched
                .iter()
                .map(|row| enriched_record(row, snapshot.has_min_price)),
        )?;
        info!(path = %enriched.display(), rows = snapshot.enriched.len(), "全量增强表已写出");

        let watchlist = self.write_watchlist(snapshot)?;

        let summary = if write_summary {
            Some(self.write_summary(snapshot.run_date, &snapshot.summary)?)
        } else {
            None
        };

        Ok(SnapshotPaths {
            enriched,
            watchlist,
            summary,
        })
    }

    /// 观察名单为空时不写文件, 并移除同日期的旧文件
    fn write_watchlist(&self, snapshot: &SnapshotOutput) -> RepositoryResult<Option<PathBuf>> {
        let path = self.watchlist_path(snapshot.run_date);

        if snapshot.watchlist.is_empty() {
            if path.is_file() {
                fs::remove_file(&path).map_err(|e| write_error(&path, e))?;
                info!(path = %path.display(), "观察名单为空, 已移除同日期的旧观察名单文件");
            } else {
                info!("观察名单为空, 不写出观察名单文件");
            }
            return Ok(None);
        }

        write_table(
            &path,
            &watchlist_columns(snapshot.has_min_price),
            snapshot
                .watchlist
                .iter()
                .map(|row| watchlist_record(row, snapshot.has_min_price)),
        )?;
        info!(path = %path.display(), rows = snapshot.watchlist.len(), "观察名单已写出");
        Ok(Some(path))
    }

    /// 写出运行汇总 JSON
    pub fn write_summary(&self, date: NaiveDate, summary: &RunSummary) -> RepositoryResult<PathBuf> {
        self.ensure_dir()?;
        let path = self.summary_path(date);
        let mut json = serde_json::to_string_pretty(summary)?;
        json.push('\n');
        fs::write(&path, json).map_err(|e| write_error(&path, e))?;
        info!(path = %path.display(), "运行汇总已写出");
        Ok(path)
    }

    fn ensure_dir(&self) -> RepositoryResult<()> {
        fs::create_dir_all(self.processed_dir()).map_err(|e| RepositoryError::DirectoryError {
            path: self.processed_dir().display().to_string(),
            message: e.to_string(),
        })
    }
}

fn write_table<I>(path: &Path, columns: &[&str], records: I) -> RepositoryResult<()>
where
    I: Iterator<Item = Vec<String>>,
{
    let mut writer = Writer::from_path(path)?;
    writer.write_record(columns)?;
    for record in records {
        writer.write_record(&record)?;
    }
    writer.flush().map_err(|e| write_error(path, e))?;
    Ok(())
}

fn write_error(path: &Path, err: std::io::Error) -> RepositoryError {
    RepositoryError::FileWriteError {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
