// ==========================================
// 房源目标达成分析系统 - 快照
// ==========================================
// 一次运行的完整产出, 写出后不再修改
// ==========================================

use crate::domain::listing::{EnrichedListing, WatchlistListing};
use crate::domain::summary::RunSummary;
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct SnapshotOutput {
    /// 输出文件名使用的快照日期
    pub run_date: NaiveDate,
    /// 全量增强表（顺序同业绩表）
    pub enriched: Vec<EnrichedListing>,
    /// Berlinda 观察名单（可为空）
    pub watchlist: Vec<WatchlistListing>,
    pub summary: RunSummary,
    /// 是否加载了最低价补充表（决定输出是否含 min_price_days 列）
    pub has_min_price: bool,
}
