// ==========================================
// 房源目标达成分析系统 - 优先级原始分
// ==========================================
// 仅在剩余可售天数 > 0 时计分, 否则 0
// 低于目标:
//   (shortfall / target) × (1 / days_adjusted) × (potential_max − revenue) × (1 / days_needed)
//   days_needed == 0 或 days_needed > days_adjusted → 0
// 达到/超过目标:
//   closeness = max(1 − |ratio − 1|, 0.01)
//   closeness × days_adjusted × avg_price_available
// 任何算术异常 (非有限 / 负值) → 0
// ==========================================

use super::normalize::normalize_scores;
use crate::domain::types::PriorityBand;
use crate::engine::safe_math::{non_negative_or_zero, safe_div, safe_div_positive};
use tracing::{debug, instrument};

/// 达标房源贴近度下限
const MIN_CLOSENESS: f64 = 0.01;

/// 原始分输入
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityInput {
    pub revenue_month: f64,
    pub target: f64,
    pub shortfall: f64,
    /// 已取整的达成率 (与输出表一致)
    pub achievement_ratio: f64,
    pub days_available_adjusted: i64,
    pub days_needed: i64,
    pub potential_max: f64,
    pub avg_price_available: Option<f64>,
}

/// 单行评分结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityScore {
    pub raw: f64,
    pub normalized: f64,
    pub band: PriorityBand,
}

// ==========================================
// PriorityScorer - 优先级评分引擎
// ==========================================
pub struct PriorityScorer {
    // 无状态引擎
}

impl PriorityScorer {
    pub fn new() -> Self {
        Self {}
    }

    /// 第一阶段: 单行原始分
    pub fn raw_score(&self, input: &PriorityInput) -> f64 {
        if input.days_available_adjusted <= 0 {
            return 0.0;
        }

        let raw = if input.revenue_month < input.target {
            Self::below_target_score(input)
        } else {
            Self::above_target_score(input)
        };
        non_negative_or_zero(raw)
    }

    /// 第二阶段: 队列内秩归一化
    pub fn normalize(&self, raw_scores: &[f64]) -> Vec<f64> {
        normalize_scores(raw_scores)
    }

    pub fn band(&self, normalized: f64) -> PriorityBand {
        PriorityBand::from_score(normalized)
    }

    /// 对整个队列评分（两阶段之间有显式屏障）
    #[instrument(skip(self, inputs), fields(cohort = inputs.len()))]
    pub fn score_cohort(&self, inputs: &[PriorityInput]) -> Vec<PriorityScore> {
        let raw_scores: Vec<f64> = inputs.iter().map(|input| self.raw_score(input)).collect();
        let normalized = self.normalize(&raw_scores);

        let scores: Vec<PriorityScore> = raw_scores
            .iter()
            .zip(normalized)
            .map(|(&raw, normalized)| PriorityScore {
                raw,
                normalized,
                band: self.band(normalized),
            })
            .collect();

        debug!(
            scored = scores.iter().filter(|s| s.raw > 0.0).count(),
            "优先级评分完成"
        );
        scores
    }

    fn below_target_score(input: &PriorityInput) -> f64 {
        let days = input.days_available_adjusted;
        if input.days_needed <= 0 || input.days_needed > days {
            return 0.0;
        }
        let gap_share = safe_div_positive(input.shortfall, input.target, 0.0);
        let urgency = safe_div(1.0, days as f64, 0.0);
        let headroom = input.potential_max - input.revenue_month;
        let effort = safe_div(1.0, input.days_needed as f64, 0.0);
        gap_share * urgency * headroom * effort
    }

    fn above_target_score(input: &PriorityInput) -> f64 {
        let price = match input.avg_price_available {
            Some(price) if price.is_finite() => price,
            _ => return 0.0,
        };
        let closeness = (1.0 - (input.achievement_ratio - 1.0).abs()).max(MIN_CLOSENESS);
        closeness * input.days_available_adjusted as f64 * price
    }
}

impl Default for PriorityScorer {
    fn default() -> Self {
        Self::new()
    }
}
