// 快照表列定义与单元格格式化
// 格式: 数值用最短往返表示, 空值写空单元格, 日期 YYYY-MM-DD, 枚举写稳定标签

use crate::domain::listing::{EnrichedListing, WatchlistListing};
use std::fmt::Display;

/// 全量增强表列（min_price_days 之前）
const ENRICHED_HEAD: [&str; 19] = [
    "listing_id",
    "category",
    "portfolio",
    "state",
    "city",
    "neighborhood",
    "blocked_days",
    "days_active",
    "revenue_month",
    "n_competitors",
    "target",
    "year_month",
    "occupancy_rate",
    "competitor_occupancy_rate",
    "days_occupied",
    "total_days",
    "avg_price_occupied",
    "avg_price_available",
    "days_available_raw",
];

const MIN_PRICE_COLUMN: &str = "min_price_days";

/// 全量增强表列（min_price_days 之后）
const ENRICHED_TAIL: [&str; 5] = [
    "execution_date",
    "achievement_ratio",
    "lost_revenue_blocking",
    "shortfall",
    "criticality_group",
];

/// 观察名单专有的派生列（回读时逐一校验）
pub const WATCHLIST_DERIVED_COLUMNS: [&str; 9] = [
    "reference_date",
    "days_available_adjusted",
    "days_needed",
    "potential_max",
    "potential_realistic",
    "operational_status",
    "priority_score_raw",
    "priority_score_normalized",
    "priority_band",
];

/// 回读全量增强表时必须存在的列
pub(super) const ENRICHED_REQUIRED_COLUMNS: [&str; 5] = [
    "listing_id",
    "revenue_month",
    "target",
    "achievement_ratio",
    "criticality_group",
];

pub fn enriched_columns(has_min_price: bool) -> Vec<&'static str> {
    let mut columns: Vec<&'static str> = ENRICHED_HEAD.to_vec();
    if has_min_price {
        columns.push(MIN_PRICE_COLUMN);
    }
    columns.extend(ENRICHED_TAIL);
    columns
}

pub fn watchlist_columns(has_min_price: bool) -> Vec<&'static str> {
    let mut columns = enriched_columns(has_min_price);
    columns.extend(WATCHLIST_DERIVED_COLUMNS);
    columns
}

pub(super) fn enriched_record(row: &EnrichedListing, has_min_price: bool) -> Vec<String> {
    let l = &row.listing;
    let mut record = vec![
        l.listing_id.clone(),
        text(&l.category),
        text(&l.portfolio),
        text(&l.state),
        text(&l.city),
        text(&l.neighborhood),
        l.blocked_days.to_string(),
        opt(l.days_active),
        num(l.revenue_month),
        opt(l.n_competitors),
        num(l.target),
        text(&l.year_month),
        opt_num(l.occupancy_rate),
        opt_num(l.competitor_occupancy_rate),
        opt(l.days_occupied),
        opt(l.total_days),
        num(l.avg_price_occupied),
        opt_num(l.avg_price_available),
        opt(l.days_available_raw),
    ];
    if has_min_price {
        record.push(opt(l.min_price_days));
    }
    record.extend([
        opt(l.execution_date),
        num(row.achievement_ratio),
        num(row.lost_revenue_blocking),
        num(row.shortfall),
        row.criticality_group.as_str().to_string(),
    ]);
    record
}

pub(super) fn watchlist_record(row: &WatchlistListing, has_min_price: bool) -> Vec<String> {
    let mut record = enriched_record(&row.enriched, has_min_price);
    record.extend([
        row.reference_date.to_string(),
        row.days_available_adjusted.to_string(),
        row.days_needed.to_string(),
        num(row.potential_max),
        num(row.potential_realistic),
        row.operational_status.as_str().to_string(),
        num(row.priority_score_raw),
        num(row.priority_score_normalized),
        row.priority_band.as_str().to_string(),
    ]);
    record
}

/// 最短往返表示; -0 归一为 0
fn num(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

fn opt_num(value: Option<f64>) -> String {
    value.map(num).unwrap_or_default()
}

fn opt<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
