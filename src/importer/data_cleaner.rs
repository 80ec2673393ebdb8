// ==========================================
// 房源目标达成分析系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 数值与日期解析
// 红线: 非空但无法解析的值返回 TypeConversionError, 由映射层降级为空值
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::extract_trait::DataCleaner as DataCleanerTrait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// 抽取工具与表格软件导出的空值记号
const NULL_TOKENS: [&str; 7] = ["nan", "null", "none", "nat", "<na>", "n/a", "-"];

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            let lowered = trimmed.to_lowercase();
            if trimmed.is_empty() || NULL_TOKENS.contains(&lowered.as_str()) {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    fn parse_decimal(
        &self,
        value: Option<&str>,
        field: &str,
        row: usize,
    ) -> ImportResult<Option<f64>> {
        let Some(text) = self.normalize_null(value) else {
            return Ok(None);
        };
        match text.parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => Ok(Some(parsed)),
            _ => Err(conversion_error(row, field, format!("无法解析为小数: {}", text))),
        }
    }

    fn parse_integer(
        &self,
        value: Option<&str>,
        field: &str,
        row: usize,
    ) -> ImportResult<Option<i64>> {
        let Some(text) = self.normalize_null(value) else {
            return Ok(None);
        };
        if let Ok(parsed) = text.parse::<i64>() {
            return Ok(Some(parsed));
        }
        // 表格导出的整数常带 ".0"
        match text.parse::<f64>() {
            Ok(parsed) if parsed.is_finite() && parsed.fract() == 0.0 => Ok(Some(parsed as i64)),
            _ => Err(conversion_error(row, field, format!("无法解析为整数: {}", text))),
        }
    }

    fn parse_date(
        &self,
        value: Option<&str>,
        field: &str,
        row: usize,
    ) -> ImportResult<Option<NaiveDate>> {
        let Some(text) = self.normalize_null(value) else {
            return Ok(None);
        };

        NaiveDate::parse_from_str(&text, "%Y-%m-%d")
            .or_else(|_| NaiveDateTime::parse_from_str(&text, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
            .or_else(|_| NaiveDateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
            .or_else(|_| DateTime::parse_from_rfc3339(&text).map(|dt| dt.date_naive()))
            .or_else(|_| NaiveDate::parse_from_str(&text, "%Y%m%d"))
            .map(Some)
            .map_err(|_| conversion_error(row, field, format!("日期格式错误: {}", text)))
    }
}

impl DataCleaner {
    /// 清洗文本字段（TRIM + NULL 标准化）
    pub fn clean_text(&self, value: Option<&str>) -> Option<String> {
        self.normalize_null(value)
    }
}

fn conversion_error(row: usize, field: &str, message: String) -> ImportError {
    ImportError::TypeConversionError {
        row,
        field: field.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_null_tokens() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_null(None), None);
        assert_eq!(cleaner.normalize_null(Some("   ")), None);
        assert_eq!(cleaner.normalize_null(Some("NaN")), None);
        assert_eq!(cleaner.normalize_null(Some("<NA>")), None);
        assert_eq!(cleaner.normalize_null(Some(" Copacabana ")), Some("Copacabana".to_string()));
    }

    #[test]
    fn test_parse_decimal() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_decimal(Some("9000.5"), "revenue_month", 1).unwrap(), Some(9000.5));
        assert_eq!(cleaner.parse_decimal(Some(""), "revenue_month", 1).unwrap(), None);
        assert!(cleaner.parse_decimal(Some("abc"), "revenue_month", 1).is_err());
        assert!(cleaner.parse_decimal(Some("inf"), "revenue_month", 1).is_err());
    }

    #[test]
    fn test_parse_integer_accepts_whole_floats() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_integer(Some("12"), "blocked_days", 1).unwrap(), Some(12));
        assert_eq!(cleaner.parse_integer(Some("12.0"), "blocked_days", 1).unwrap(), Some(12));
        assert!(cleaner.parse_integer(Some("12.5"), "blocked_days", 1).is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        let cleaner = DataCleaner;
        let expected = Some(NaiveDate::from_ymd_opt(2025, 9, 20).unwrap());
        for text in [
            "2025-09-20",
            "2025-09-20 06:15:00",
            "2025-09-20T06:15:00",
            "2025-09-20T06:15:00+00:00",
            "20250920",
        ] {
            assert_eq!(cleaner.parse_date(Some(text), "execution_date", 1).unwrap(), expected, "{}", text);
        }
        assert!(cleaner.parse_date(Some("20/09/2025"), "execution_date", 1).is_err());
    }

    #[test]
    fn test_conversion_error_carries_row_and_field() {
        let err = DataCleaner.parse_decimal(Some("x"), "target", 7).unwrap_err();
        match err {
            ImportError::TypeConversionError { row, field, .. } => {
                assert_eq!(row, 7);
                assert_eq!(field, "target");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
