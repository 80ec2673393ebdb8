// ==========================================
// 房源目标达成分析系统 - 目标达成率计算器
// ==========================================
// 职责: achievement_ratio = revenue / target + 关键度分档
// 红线: target ≤ 0 视为"无可达成目标", 比率为 0, 不报错
// 红线: 分档使用未取整比率, 取整只用于存储/展示
// ==========================================

use crate::domain::types::CriticalityGroup;
use crate::engine::safe_math::{round2, safe_div_positive};

/// 分档上界（闭区间上端）
pub mod ratio_thresholds {
    pub const CRITICAL_MAX: f64 = 0.50;
    pub const ATTENTION_MAX: f64 = 0.80;
    pub const WATCHLIST_MAX: f64 = 1.10;
    pub const OK_MAX: f64 = 2.00;
}

/// 达成率计算结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Achievement {
    /// 未取整比率
    pub ratio_raw: f64,
    /// 2 位小数比率（写入输出表）
    pub ratio: f64,
    pub group: CriticalityGroup,
}

// ==========================================
// AchievementCalculator - 达成率计算器
// ==========================================
pub struct AchievementCalculator {
    // 无状态引擎
}

impl AchievementCalculator {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算达成率与分档
    pub fn evaluate(&self, revenue_month: f64, target: f64) -> Achievement {
        let ratio_raw = Self::ratio(revenue_month, target);
        let group = Self::classify(ratio_raw);
        Achievement {
            ratio_raw,
            ratio: round2(ratio_raw),
            group,
        }
    }

    /// revenue / target (target ≤ 0 → 0)
    pub fn ratio(revenue_month: f64, target: f64) -> f64 {
        safe_div_positive(revenue_month, target, 0.0)
    }

    /// 关键度分档（依次比较上界, 命中即返回）
    pub fn classify(ratio: f64) -> CriticalityGroup {
        use ratio_thresholds::*;
        if ratio <= CRITICAL_MAX {
            CriticalityGroup::Critical
        } else if ratio <= ATTENTION_MAX {
            CriticalityGroup::Attention
        } else if ratio <= WATCHLIST_MAX {
            CriticalityGroup::Watchlist
        } else if ratio <= OK_MAX {
            CriticalityGroup::Ok
        } else {
            CriticalityGroup::TargetUnderestimated
        }
    }
}

impl Default for AchievementCalculator {
    fn default() -> Self {
        Self::new()
    }
}
