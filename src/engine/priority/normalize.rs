// 秩归一化: 仅原始分 > 0 的行参与排名
// rank = 严格小于本行原始分的参与行数 (并列取最小秩)
// n == 1 → 100; n > 1 → rank / (n − 1) × 100; 原始分 0 → 0

use crate::engine::safe_math::round2;

pub fn normalize_scores(raw_scores: &[f64]) -> Vec<f64> {
    let mut ranked: Vec<f64> = raw_scores
        .iter()
        .copied()
        .filter(|raw| is_ranked(*raw))
        .collect();
    ranked.sort_by(f64::total_cmp);

    let n = ranked.len();
    raw_scores
        .iter()
        .map(|&raw| {
            if !is_ranked(raw) {
                return 0.0;
            }
            if n == 1 {
                return 100.0;
            }
            let rank = ranked.partition_point(|&other| other < raw);
            round2(rank as f64 / (n - 1) as f64 * 100.0)
        })
        .collect()
}

fn is_ranked(raw: f64) -> bool {
    raw.is_finite() && raw > 0.0
}
