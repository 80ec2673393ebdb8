// ==========================================
// 房源目标达成分析系统 - 财务影响计算器
// ==========================================
// 职责: 封锁损失收入 + 距目标缺口
// - lost_revenue_blocking = blocked_days × avg_price_occupied
// - shortfall = target − revenue_month (可为负, 负值表示超额)
// ==========================================

/// 财务影响指标
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialImpact {
    pub lost_revenue_blocking: f64,
    pub shortfall: f64,
}

pub struct FinancialImpactCalculator {
    // 无状态引擎
}

impl FinancialImpactCalculator {
    pub fn new() -> Self {
        Self {}
    }

    pub fn evaluate(
        &self,
        blocked_days: i64,
        avg_price_occupied: f64,
        revenue_month: f64,
        target: f64,
    ) -> FinancialImpact {
        FinancialImpact {
            lost_revenue_blocking: blocked_days as f64 * avg_price_occupied,
            shortfall: target - revenue_month,
        }
    }
}

impl Default for FinancialImpactCalculator {
    fn default() -> Self {
        Self::new()
    }
}
