// ==========================================
// 房源目标达成分析系统 - 收入潜力预测器
// ==========================================
// 职责: 基于剩余可售天数与可售日均价预测月末收入
// - potential_max       = revenue + days_adjusted × avg_price_available
// - potential_realistic = revenue + occupancy_rate × days_adjusted × avg_price_available
// - days_needed         = ceil(shortfall / avg_price_available), 缺口 > 0 且价格 > 0 时
// ==========================================
// 空值口径: avg_price_available / occupancy_rate 为空时贡献按 0 计
// ==========================================

use crate::engine::safe_math::safe_div_positive;

/// 潜力预测输入
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotentialInput {
    pub revenue_month: f64,
    pub shortfall: f64,
    pub days_available_adjusted: i64,
    pub avg_price_available: Option<f64>,
    pub occupancy_rate: Option<f64>,
}

/// 潜力预测结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotentialProjection {
    pub potential_max: f64,
    pub potential_realistic: f64,
    pub days_needed: i64,
}

pub struct PotentialProjector {
    // 无状态引擎
}

impl PotentialProjector {
    pub fn new() -> Self {
        Self {}
    }

    pub fn project(&self, input: &PotentialInput) -> PotentialProjection {
        let price = finite_or_zero(input.avg_price_available);
        let occupancy = finite_or_zero(input.occupancy_rate);
        let days = input.days_available_adjusted as f64;

        PotentialProjection {
            potential_max: input.revenue_month + days * price,
            potential_realistic: input.revenue_month + occupancy * days * price,
            days_needed: Self::days_needed(input.shortfall, input.avg_price_available),
        }
    }

    /// 补足缺口所需天数（向上取整）
    pub fn days_needed(shortfall: f64, avg_price_available: Option<f64>) -> i64 {
        let price = finite_or_zero(avg_price_available);
        if shortfall > 0.0 && price > 0.0 {
            safe_div_positive(shortfall, price, 0.0).ceil() as i64
        } else {
            0
        }
    }
}

impl Default for PotentialProjector {
    fn default() -> Self {
        Self::new()
    }
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}
