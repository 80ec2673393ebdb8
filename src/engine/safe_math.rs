// ==========================================
// 房源目标达成分析系统 - 安全算术
// ==========================================
// 职责: 统一除零/空值/非有限值的兜底策略
// 红线: 算术保护情形一律返回显式默认值, 从不报错、从不中断运行
// ==========================================

/// 安全除法
///
/// 分母为 0、任一操作数非有限、或结果非有限时返回 `default`。
pub fn safe_div(numerator: f64, denominator: f64, default: f64) -> f64 {
    if denominator == 0.0 || !numerator.is_finite() || !denominator.is_finite() {
        return default;
    }
    let quotient = numerator / denominator;
    if quotient.is_finite() {
        quotient
    } else {
        default
    }
}

/// 安全除法（分母必须严格为正）
///
/// 用于 revenue/target、shortfall/price 等"分母 ≤ 0 即无意义"的场景。
pub fn safe_div_positive(numerator: f64, denominator: f64, default: f64) -> f64 {
    if denominator > 0.0 {
        safe_div(numerator, denominator, default)
    } else {
        default
    }
}

/// 保留 2 位小数（银行家舍入, 与数据分析侧口径一致）
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    (value * 100.0).round_ties_even() / 100.0
}

/// 非有限或负值归零
pub fn non_negative_or_zero(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_div_guards() {
        assert_eq!(safe_div(10.0, 4.0, 0.0), 2.5);
        assert_eq!(safe_div(10.0, 0.0, 0.0), 0.0);
        assert_eq!(safe_div(f64::NAN, 2.0, -1.0), -1.0);
        assert_eq!(safe_div(1.0, f64::INFINITY, 7.0), 7.0);
        assert_eq!(safe_div(-9.0, 3.0, 0.0), -3.0);
    }

    #[test]
    fn test_safe_div_positive_rejects_negative_denominator() {
        assert_eq!(safe_div_positive(100.0, -50.0, 0.0), 0.0);
        assert_eq!(safe_div_positive(100.0, 0.0, 0.0), 0.0);
        assert_eq!(safe_div_positive(100.0, 50.0, 0.0), 2.0);
    }

    #[test]
    fn test_round2_half_even() {
        assert_eq!(round2(0.8), 0.8);
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(66.666666), 66.67);
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
    }

    #[test]
    fn test_non_negative_or_zero() {
        assert_eq!(non_negative_or_zero(-1.0), 0.0);
        assert_eq!(non_negative_or_zero(f64::NAN), 0.0);
        assert_eq!(non_negative_or_zero(3.5), 3.5);
    }
}
