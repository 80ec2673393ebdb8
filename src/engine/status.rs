// ==========================================
// 房源目标达成分析系统 - 运营状态判定
// ==========================================
// 职责: 对观察名单房源给出运营状态标签 (状态机, 首个命中即返回)
// DaysAndPotential (默认):
//   1) revenue ≥ target: 剩余天数 0 → above_no_action, 否则 above_at_risk
//   2) revenue < target:
//      - 剩余天数 0 → below_infeasible
//      - days_needed ≤ 剩余天数 且 potential_realistic ≥ target → below_viable
//      - days_needed ≤ 剩余天数 → below_needs_effort
//      - 否则 → below_infeasible
// PotentialOnly (历史版本, 仅显式配置时启用):
//   revenue < target 且剩余天数 > 0 时只比较 potential_realistic ≥ target
// ==========================================

use crate::domain::types::{OperationalStatus, StatusPolicy};

/// 状态判定所需的最小输入
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusInput {
    pub revenue_month: f64,
    pub target: f64,
    pub days_available_adjusted: i64,
    pub days_needed: i64,
    pub potential_realistic: f64,
}

pub struct StatusClassifier {
    // 无状态引擎
}

impl StatusClassifier {
    pub fn new() -> Self {
        Self {}
    }

    pub fn classify(&self, input: &StatusInput, policy: StatusPolicy) -> OperationalStatus {
        let has_days = input.days_available_adjusted > 0;

        if input.revenue_month >= input.target {
            return if has_days {
                OperationalStatus::AboveAtRisk
            } else {
                OperationalStatus::AboveNoAction
            };
        }

        if !has_days {
            return OperationalStatus::BelowInfeasible;
        }

        let reaches_target = input.potential_realistic >= input.target;
        match policy {
            StatusPolicy::DaysAndPotential => {
                let days_suffice = input.days_needed <= input.days_available_adjusted;
                if days_suffice && reaches_target {
                    OperationalStatus::BelowViable
                } else if days_suffice {
                    OperationalStatus::BelowNeedsEffort
                } else {
                    OperationalStatus::BelowInfeasible
                }
            }
            StatusPolicy::PotentialOnly => {
                if reaches_target {
                    OperationalStatus::BelowViable
                } else {
                    OperationalStatus::BelowNeedsEffort
                }
            }
        }
    }
}

impl Default for StatusClassifier {
    fn default() -> Self {
        Self::new()
    }
}
