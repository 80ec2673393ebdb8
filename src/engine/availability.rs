// ==========================================
// 房源目标达成分析系统 - 剩余可售天数解析器
// ==========================================
// 职责: 将抽取表中的"未来可售天数"重新锚定到评分时点
// 规则:
// 1) month_end = 参考日期所在月最后一天
// 2) 参考日期 == month_end → 0 (本月已无可行动天数)
// 3) 否则 min(days_available_raw, month_end − 参考日期), 下限 0, 空值按 0
// ==========================================
// 参考日期取每行自身的 execution_date, 不使用任何写死的日期常量
// ==========================================

use chrono::{Datelike, Duration, NaiveDate};

pub struct AvailabilityResolver {
    // 无状态引擎
}

impl AvailabilityResolver {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算调整后的可售天数
    pub fn resolve(&self, reference_date: NaiveDate, days_available_raw: Option<i64>) -> i64 {
        let days_remaining = Self::days_remaining_in_month(reference_date);
        if days_remaining == 0 {
            return 0;
        }
        days_available_raw.unwrap_or(0).min(days_remaining).max(0)
    }

    /// 参考日期所在月的最后一天
    pub fn month_end(date: NaiveDate) -> NaiveDate {
        let (year, month) = if date.month() == 12 {
            (date.year() + 1, 1)
        } else {
            (date.year(), date.month() + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|first_of_next| first_of_next.checked_sub_signed(Duration::days(1)))
            // 仅在日期越过 chrono 上限时发生, 视为当天即月末
            .unwrap_or(date)
    }

    /// 参考日期之后本月剩余天数（月末当天为 0）
    pub fn days_remaining_in_month(date: NaiveDate) -> i64 {
        (Self::month_end(date) - date).num_days()
    }
}

impl Default for AvailabilityResolver {
    fn default() -> Self {
        Self::new()
    }
}
