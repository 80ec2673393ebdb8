// ==========================================
// 房源目标达成分析系统 - Berlinda 观察名单筛选
// ==========================================
// 职责: 从全量增强表中选出 criticality_group = watchlist 的房源
// 空结果是合法终态, 不是错误
// ==========================================

use crate::domain::listing::EnrichedListing;
use crate::domain::types::CriticalityGroup;
use tracing::debug;

pub struct WatchlistFilter {
    // 无状态引擎
}

impl WatchlistFilter {
    pub fn new() -> Self {
        Self {}
    }

    /// 选出观察名单（保持输入顺序）
    pub fn select<'a>(&self, listings: &'a [EnrichedListing]) -> Vec<&'a EnrichedListing> {
        let kept: Vec<&EnrichedListing> = listings
            .iter()
            .filter(|l| l.criticality_group == CriticalityGroup::Watchlist)
            .collect();
        debug!(total = listings.len(), kept = kept.len(), "观察名单筛选完成");
        kept
    }
}

impl Default for WatchlistFilter {
    fn default() -> Self {
        Self::new()
    }
}
