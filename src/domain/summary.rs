// ==========================================
// 房源目标达成分析系统 - 运行汇总
// ==========================================
// 职责: 一次快照运行的统计口径 (分组分布 / 状态分布 / 优先级分布 / 空值统计)
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 快照运行汇总
///
/// 使用 BTreeMap 保证序列化顺序稳定（同输入重复运行结果一致）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// 本次运行ID（仅用于日志追溯, 不序列化, 保证重复运行输出一致）
    #[serde(skip)]
    pub run_id: String,
    pub run_date: Option<NaiveDate>,
    pub total_listings: usize,
    pub watchlist_listings: usize,
    /// 因缺少执行日期而未进入观察名单的房源数
    pub watchlist_dropped_without_date: usize,
    pub criticality_counts: BTreeMap<String, usize>,
    pub status_counts: BTreeMap<String, usize>,
    pub priority_counts: BTreeMap<String, usize>,
    /// 可选字段的空值计数（字段名 → 空值行数）
    pub null_counts: BTreeMap<String, usize>,
}

impl RunSummary {
    /// 观察名单占比 (%)
    pub fn watchlist_share_pct(&self) -> f64 {
        if self.total_listings == 0 {
            0.0
        } else {
            self.watchlist_listings as f64 / self.total_listings as f64 * 100.0
        }
    }
}
