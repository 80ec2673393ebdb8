// 快照回读
// - 旧快照的达成率若以百分数存储 (按原值分档与 criticality_group 不符, 除以 100 后相符), 统一除以 100
// - 观察名单: 派生列缺失 → SchemaIncompatibility, 不做自动修复; 文件不存在 = 空观察名单

use super::columns::{ENRICHED_REQUIRED_COLUMNS, WATCHLIST_DERIVED_COLUMNS};
use super::{catalog::SnapshotEntry, SnapshotRepository};
use crate::domain::listing::{EnrichedListing, MergedListing, WatchlistListing};
use crate::domain::types::CriticalityGroup;
use crate::engine::achievement::AchievementCalculator;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::extract_trait::{DataCleaner as DataCleanerTrait, RawRow};
use crate::importer::file_parser::CsvParser;
use crate::repository::error::RepositoryResult;
use chrono::NaiveDate;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

impl SnapshotRepository {
    /// 回读全量增强表
    pub fn read_enriched(&self, path: &Path) -> RepositoryResult<Vec<EnrichedListing>> {
        let (headers, rows) = CsvParser.parse_with_headers(path)?;
        check_columns(path, &headers, &ENRICHED_REQUIRED_COLUMNS)?;

        let mut listings = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| CellReader::new(row, idx + 1).enriched())
            .collect::<ImportResult<Vec<_>>>()?;

        repair_legacy_ratio_scale(
            listings
                .iter_mut()
                .map(|l| (&mut l.achievement_ratio, l.criticality_group)),
        );
        debug!(path = %path.display(), rows = listings.len(), "全量增强表已回读");
        Ok(listings)
    }

    /// 回读观察名单; 文件不存在时返回空列表
    pub fn read_watchlist(&self, path: &Path) -> RepositoryResult<Vec<WatchlistListing>> {
        if !path.is_file() {
            debug!(path = %path.display(), "观察名单文件不存在, 视为空观察名单");
            return Ok(Vec::new());
        }

        let (headers, rows) = CsvParser.parse_with_headers(path)?;
        let required: Vec<&str> = ENRICHED_REQUIRED_COLUMNS
            .iter()
            .chain(WATCHLIST_DERIVED_COLUMNS.iter())
            .copied()
            .collect();
        check_columns(path, &headers, &required)?;

        let mut listings = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| CellReader::new(row, idx + 1).watchlist())
            .collect::<ImportResult<Vec<_>>>()?;

        repair_legacy_ratio_scale(listings.iter_mut().map(|l| {
            (&mut l.enriched.achievement_ratio, l.enriched.criticality_group)
        }));
        debug!(path = %path.display(), rows = listings.len(), "观察名单已回读");
        Ok(listings)
    }

    /// 回读一个快照（全量增强表 + 观察名单）
    pub fn read_snapshot(
        &self,
        entry: &SnapshotEntry,
    ) -> RepositoryResult<(Vec<EnrichedListing>, Vec<WatchlistListing>)> {
        let enriched = self.read_enriched(&entry.enriched_path)?;
        let watchlist = match &entry.watchlist_path {
            Some(path) => self.read_watchlist(path)?,
            None => Vec::new(),
        };
        Ok((enriched, watchlist))
    }
}

/// 表头缺列 → SchemaIncompatibility（列出全部缺失列）
fn check_columns(path: &Path, headers: &[String], required: &[&str]) -> ImportResult<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .map(|column| column.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ImportError::SchemaIncompatibility {
            file: path.display().to_string(),
            missing_columns: missing,
        })
    }
}

/// 百分数口径判定: 除以 100 后与已存分档相符的行数严格多于按原值相符的行数
///
/// 存储值已取整, 边界附近个别行按原值分档可能与已存分档不一致, 因此按多数判定
pub(super) fn repair_legacy_ratio_scale<'a>(
    rows: impl Iterator<Item = (&'a mut f64, CriticalityGroup)>,
) {
    let mut rows: Vec<(&mut f64, CriticalityGroup)> = rows.collect();
    let matches = |scale: f64| {
        rows.iter()
            .filter(|(ratio, group)| AchievementCalculator::classify(**ratio / scale) == *group)
            .count()
    };
    let as_stored = matches(1.0);
    let as_percent = matches(100.0);
    if as_percent > as_stored {
        warn!(as_stored, as_percent, "达成率按百分数存储, 已换算为比例");
        for (ratio, _) in rows.iter_mut() {
            **ratio /= 100.0;
        }
    }
}

/// 单行单元格读取
struct CellReader<'a> {
    row: &'a RawRow,
    row_number: usize,
    cleaner: DataCleaner,
}

impl<'a> CellReader<'a> {
    fn new(row: &'a RawRow, row_number: usize) -> Self {
        Self {
            row,
            row_number,
            cleaner: DataCleaner,
        }
    }

    fn cell(&self, column: &str) -> Option<&str> {
        self.row.get(column).map(String::as_str)
    }

    fn text(&self, column: &str) -> Option<String> {
        self.cleaner.normalize_null(self.cell(column))
    }

    fn decimal(&self, column: &str) -> ImportResult<Option<f64>> {
        self.cleaner.parse_decimal(self.cell(column), column, self.row_number)
    }

    fn integer(&self, column: &str) -> ImportResult<Option<i64>> {
        self.cleaner.parse_integer(self.cell(column), column, self.row_number)
    }

    fn date(&self, column: &str) -> ImportResult<Option<NaiveDate>> {
        self.cleaner.parse_date(self.cell(column), column, self.row_number)
    }

    fn required<T>(&self, column: &str, value: Option<T>) -> ImportResult<T> {
        value.ok_or_else(|| ImportError::TypeConversionError {
            row: self.row_number,
            field: column.to_string(),
            message: "缺少必需值".to_string(),
        })
    }

    fn tag<T: FromStr<Err = String>>(&self, column: &str) -> ImportResult<T> {
        let text = self.required(column, self.text(column))?;
        text.parse().map_err(|message| ImportError::TypeConversionError {
            row: self.row_number,
            field: column.to_string(),
            message,
        })
    }

    fn merged(&self) -> ImportResult<MergedListing> {
        let revenue_month = self.decimal("revenue_month")?.unwrap_or(0.0);
        let target = self.decimal("target")?.unwrap_or(0.0);
        Ok(MergedListing {
            listing_id: self.required("listing_id", self.text("listing_id"))?,
            category: self.text("category"),
            portfolio: self.text("portfolio"),
            state: self.text("state"),
            city: self.text("city"),
            neighborhood: self.text("neighborhood"),
            blocked_days: self.integer("blocked_days")?.unwrap_or(0),
            days_active: self.integer("days_active")?,
            revenue_month,
            n_competitors: self.integer("n_competitors")?,
            target,
            year_month: self.text("year_month"),
            occupancy_rate: self.decimal("occupancy_rate")?,
            competitor_occupancy_rate: self.decimal("competitor_occupancy_rate")?,
            days_occupied: self.integer("days_occupied")?,
            total_days: self.integer("total_days")?,
            avg_price_occupied: self.decimal("avg_price_occupied")?.unwrap_or(0.0),
            avg_price_available: self.decimal("avg_price_available")?,
            days_available_raw: self.integer("days_available_raw")?,
            min_price_days: self.integer("min_price_days")?,
            execution_date: self.date("execution_date")?,
        })
    }

    fn enriched(&self) -> ImportResult<EnrichedListing> {
        let listing = self.merged()?;
        let shortfall = self
            .decimal("shortfall")?
            .unwrap_or(listing.target - listing.revenue_month);
        Ok(EnrichedListing {
            achievement_ratio: self.decimal("achievement_ratio")?.unwrap_or(0.0),
            criticality_group: self.tag("criticality_group")?,
            lost_revenue_blocking: self.decimal("lost_revenue_blocking")?.unwrap_or(0.0),
            shortfall,
            listing,
        })
    }

    fn watchlist(&self) -> ImportResult<WatchlistListing> {
        Ok(WatchlistListing {
            enriched: self.enriched()?,
            reference_date: self.required("reference_date", self.date("reference_date")?)?,
            days_available_adjusted: self.integer("days_available_adjusted")?.unwrap_or(0),
            days_needed: self.integer("days_needed")?.unwrap_or(0),
            potential_max: self.decimal("potential_max")?.unwrap_or(0.0),
            potential_realistic: self.decimal("potential_realistic")?.unwrap_or(0.0),
            operational_status: self.tag("operational_status")?,
            priority_score_raw: self.decimal("priority_score_raw")?.unwrap_or(0.0),
            priority_score_normalized: self.decimal("priority_score_normalized")?.unwrap_or(0.0),
            priority_band: self.tag("priority_band")?,
        })
    }
}
