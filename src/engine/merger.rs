// ==========================================
// 房源目标达成分析系统 - 抽取表合并器
// ==========================================
// 职责: 以业绩表为左表, 按 listing_id 左连接价格表、位置表、最低价补充表
// 输入: ExtractSet
// 输出: Vec<MergedListing> (行数 = 业绩表行数, 顺序保持)
// ==========================================
// 执行日期只取业绩表一列, 右表的执行日期列在字段映射阶段已丢弃
// ==========================================

use crate::domain::listing::{
    ExtractSet, LocationRecord, MergedListing, MinPriceRecord, PerformanceRecord, PriceRecord,
};
use std::collections::HashMap;
use tracing::{instrument, warn};

// ==========================================
// ExtractMerger - 抽取表合并器
// ==========================================
pub struct ExtractMerger {
    // 无状态引擎
}

impl ExtractMerger {
    pub fn new() -> Self {
        Self {}
    }

    /// 执行左连接合并
    ///
    /// 右表出现重复 listing_id 时取首条, 并记录警告
    #[instrument(skip(self, extracts), fields(performance = extracts.performance.len()))]
    pub fn merge(&self, extracts: &ExtractSet) -> Vec<MergedListing> {
        let prices = index_first(&extracts.prices, |r| &r.listing_id, "price");
        let locations = index_first(&extracts.locations, |r| &r.listing_id, "location");
        let min_prices = extracts
            .min_prices
            .as_ref()
            .map(|rows| index_first(rows, |r| &r.listing_id, "min_price"));

        extracts
            .performance
            .iter()
            .map(|perf| {
                let price = prices.get(perf.listing_id.as_str()).copied();
                let location = locations.get(perf.listing_id.as_str()).copied();
                let min_price = min_prices
                    .as_ref()
                    .and_then(|m| m.get(perf.listing_id.as_str()).copied());
                self.merge_row(perf, price, location, min_price)
            })
            .collect()
    }

    /// 单行合并 + 缺失值归零（blocked_days / avg_price_occupied / revenue / target）
    fn merge_row(
        &self,
        perf: &PerformanceRecord,
        price: Option<&PriceRecord>,
        location: Option<&LocationRecord>,
        min_price: Option<&MinPriceRecord>,
    ) -> MergedListing {
        MergedListing {
            listing_id: perf.listing_id.clone(),
            category: perf.group_name.clone(),
            portfolio: location.and_then(|l| l.portfolio.clone()),
            state: location.and_then(|l| l.state.clone()),
            city: location.and_then(|l| l.city.clone()),
            neighborhood: location.and_then(|l| l.neighborhood.clone()),
            blocked_days: perf.blocked_days.unwrap_or(0),
            days_active: perf.days_active,
            revenue_month: perf.revenue_month.unwrap_or(0.0),
            n_competitors: perf.n_competitors,
            target: perf.target.unwrap_or(0.0),
            year_month: perf.year_month.clone(),
            occupancy_rate: perf.occupancy_rate,
            competitor_occupancy_rate: perf.competitor_occupancy_rate,
            days_occupied: perf.days_occupied,
            total_days: perf.total_days,
            avg_price_occupied: price.and_then(|p| p.avg_price_occupied).unwrap_or(0.0),
            avg_price_available: price.and_then(|p| p.avg_price_available),
            days_available_raw: price.and_then(|p| p.days_available_raw),
            min_price_days: min_price.and_then(|m| m.min_price_days),
            execution_date: perf.execution_date,
        }
    }
}

impl Default for ExtractMerger {
    fn default() -> Self {
        Self::new()
    }
}

/// 建立 listing_id → 首条记录 索引
fn index_first<'a, T, F>(rows: &'a [T], key: F, extract_name: &str) -> HashMap<&'a str, &'a T>
where
    F: Fn(&'a T) -> &'a String,
{
    let mut index: HashMap<&'a str, &'a T> = HashMap::with_capacity(rows.len());
    let mut duplicates = 0usize;
    for row in rows {
        let id = key(row).as_str();
        if index.contains_key(id) {
            duplicates += 1;
        } else {
            index.insert(id, row);
        }
    }
    if duplicates > 0 {
        warn!(
            extract = extract_name,
            duplicates, "右表存在重复 listing_id, 已保留首条记录"
        );
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perf(id: &str, revenue: Option<f64>, target: Option<f64>) -> PerformanceRecord {
        PerformanceRecord {
            listing_id: id.to_string(),
            revenue_month: revenue,
            target,
            ..PerformanceRecord::default()
        }
    }

    fn price(id: &str, occupied: f64, available: f64, days: i64) -> PriceRecord {
        PriceRecord {
            listing_id: id.to_string(),
            avg_price_occupied: Some(occupied),
            avg_price_available: Some(available),
            days_available_raw: Some(days),
        }
    }

    #[test]
    fn test_left_join_keeps_every_performance_row_in_order() {
        let extracts = ExtractSet {
            performance: vec![
                perf("B1", Some(100.0), Some(200.0)),
                perf("A1", Some(50.0), Some(100.0)),
            ],
            prices: vec![price("A1", 120.0, 150.0, 4)],
            locations: vec![LocationRecord {
                listing_id: "B1".to_string(),
                portfolio: Some("Carteira Sul".to_string()),
                state: Some("SC".to_string()),
                city: Some("Florianópolis".to_string()),
                neighborhood: None,
            }],
            min_prices: None,
        };

        let merged = ExtractMerger::new().merge(&extracts);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].listing_id, "B1");
        assert_eq!(merged[0].state.as_deref(), Some("SC"));
        assert_eq!(merged[0].avg_price_occupied, 0.0);
        assert_eq!(merged[0].avg_price_available, None);
        assert_eq!(merged[0].days_available_raw, None);

        assert_eq!(merged[1].listing_id, "A1");
        assert_eq!(merged[1].portfolio, None);
        assert_eq!(merged[1].avg_price_available, Some(150.0));
        assert_eq!(merged[1].days_available_raw, Some(4));
        assert_eq!(merged[1].min_price_days, None);
    }

    #[test]
    fn test_missing_numeric_inputs_are_zero_filled() {
        let extracts = ExtractSet {
            performance: vec![perf("X", None, None)],
            ..ExtractSet::default()
        };
        let merged = ExtractMerger::new().merge(&extracts);
        assert_eq!(merged[0].revenue_month, 0.0);
        assert_eq!(merged[0].target, 0.0);
        assert_eq!(merged[0].blocked_days, 0);
    }

    #[test]
    fn test_duplicate_right_rows_take_first_occurrence() {
        let extracts = ExtractSet {
            performance: vec![perf("A1", Some(1.0), Some(1.0))],
            prices: vec![price("A1", 10.0, 11.0, 1), price("A1", 99.0, 99.0, 9)],
            locations: vec![],
            min_prices: Some(vec![
                MinPriceRecord {
                    listing_id: "A1".to_string(),
                    min_price_days: Some(3),
                },
                MinPriceRecord {
                    listing_id: "A1".to_string(),
                    min_price_days: Some(8),
                },
            ]),
        };
        let merged = ExtractMerger::new().merge(&extracts);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].avg_price_occupied, 10.0);
        assert_eq!(merged[0].min_price_days, Some(3));
    }
}
