// ==========================================
// 房源目标达成分析系统 - 房源领域模型
// ==========================================
// 依据: 三份原始抽取表 (业绩 / 价格与可售 / 位置) + 可选最低价补充表
// 红线: 每个快照一次性计算, 写出后不再原地修改
// ==========================================

use crate::domain::types::{CriticalityGroup, OperationalStatus, PriorityBand};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// 原始抽取记录 (字段映射后)
// ==========================================

/// 业绩抽取记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub listing_id: String,
    pub group_name: Option<String>,
    pub blocked_days: Option<i64>,
    pub days_active: Option<i64>,
    pub revenue_month: Option<f64>,
    pub n_competitors: Option<i64>,
    pub target: Option<f64>,
    pub year_month: Option<String>,
    pub occupancy_rate: Option<f64>,
    pub competitor_occupancy_rate: Option<f64>,
    pub days_occupied: Option<i64>,
    pub total_days: Option<i64>,
    pub execution_date: Option<NaiveDate>,
}

/// 价格与可售天数抽取记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub listing_id: String,
    pub avg_price_occupied: Option<f64>,
    pub avg_price_available: Option<f64>,
    pub days_available_raw: Option<i64>,
}

/// 位置抽取记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub listing_id: String,
    pub portfolio: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
}

/// 最低价天数补充记录（可选）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MinPriceRecord {
    pub listing_id: String,
    pub min_price_days: Option<i64>,
}

/// 一次运行的全部抽取
#[derive(Debug, Clone, Default)]
pub struct ExtractSet {
    pub performance: Vec<PerformanceRecord>,
    pub prices: Vec<PriceRecord>,
    pub locations: Vec<LocationRecord>,
    /// None = 补充表不存在, 输出中不含 min_price_days 列
    pub min_prices: Option<Vec<MinPriceRecord>>,
}

// ==========================================
// 合并后的房源 (Merger 输出)
// ==========================================
// 数值列已做缺失值归零: blocked_days / avg_price_occupied / revenue_month / target
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergedListing {
    pub listing_id: String,
    pub category: Option<String>,
    pub portfolio: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub blocked_days: i64,
    pub days_active: Option<i64>,
    pub revenue_month: f64,
    pub n_competitors: Option<i64>,
    pub target: f64,
    pub year_month: Option<String>,
    pub occupancy_rate: Option<f64>,
    pub competitor_occupancy_rate: Option<f64>,
    pub days_occupied: Option<i64>,
    pub total_days: Option<i64>,
    pub avg_price_occupied: f64,
    pub avg_price_available: Option<f64>,
    pub days_available_raw: Option<i64>,
    pub min_price_days: Option<i64>,
    pub execution_date: Option<NaiveDate>,
}

// ==========================================
// 全量增强表的一行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedListing {
    pub listing: MergedListing,
    /// revenue / target, 保留 2 位小数（分档使用未取整值）
    pub achievement_ratio: f64,
    pub criticality_group: CriticalityGroup,
    /// blocked_days × avg_price_occupied
    pub lost_revenue_blocking: f64,
    /// target − revenue_month, 可为负
    pub shortfall: f64,
}

// ==========================================
// Berlinda 观察名单的一行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistListing {
    pub enriched: EnrichedListing,
    /// 本行实际使用的参考日期
    pub reference_date: NaiveDate,
    pub days_available_adjusted: i64,
    pub days_needed: i64,
    pub potential_max: f64,
    pub potential_realistic: f64,
    pub operational_status: OperationalStatus,
    pub priority_score_raw: f64,
    pub priority_score_normalized: f64,
    pub priority_band: PriorityBand,
}

impl WatchlistListing {
    pub fn listing_id(&self) -> &str {
        &self.enriched.listing.listing_id
    }

    /// revenue_month < target
    pub fn is_below_target(&self) -> bool {
        self.enriched.listing.revenue_month < self.enriched.listing.target
    }
}
