// ==========================================
// 房源目标达成分析系统 - 数据质量报告
// ==========================================
// 职责: 记录导入阶段的降级处理（无法解析的数值 → 空值, 缺主键 → 丢弃行）
// 红线: 数据质量问题只告警, 不阻断运行
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 数据质量级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DqLevel {
    Warning, // 值被降级为空, 行保留
    Dropped, // 行被丢弃
}

/// 单条数据质量记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqViolation {
    pub extract: String,            // 抽取表名
    pub row_number: usize,          // 数据行号（从 1 开始, 不含表头）
    pub listing_id: Option<String>, // 房源ID（如果可解析）
    pub level: DqLevel,
    pub field: String,
    pub message: String,
}

/// 数据质量报告
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DqReport {
    pub rows_read: usize,
    pub rows_loaded: usize,
    pub violations: Vec<DqViolation>,
}

impl DqReport {
    pub fn warn(
        &mut self,
        extract: &str,
        row_number: usize,
        listing_id: Option<&str>,
        field: &str,
        message: impl Into<String>,
    ) {
        self.violations.push(DqViolation {
            extract: extract.to_string(),
            row_number,
            listing_id: listing_id.map(str::to_string),
            level: DqLevel::Warning,
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn drop_row(&mut self, extract: &str, row_number: usize, message: impl Into<String>) {
        self.violations.push(DqViolation {
            extract: extract.to_string(),
            row_number,
            listing_id: None,
            level: DqLevel::Dropped,
            field: "listing_id".to_string(),
            message: message.into(),
        });
    }

    pub fn warning_count(&self) -> usize {
        self.count(DqLevel::Warning)
    }

    pub fn dropped_count(&self) -> usize {
        self.count(DqLevel::Dropped)
    }

    /// 按 "抽取表.字段" 汇总告警数
    pub fn warnings_by_field(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for v in self.violations.iter().filter(|v| v.level == DqLevel::Warning) {
            *counts.entry(format!("{}.{}", v.extract, v.field)).or_insert(0) += 1;
        }
        counts
    }

    /// 合并另一份报告
    pub fn absorb(&mut self, other: DqReport) {
        self.rows_read += other.rows_read;
        self.rows_loaded += other.rows_loaded;
        self.violations.extend(other.violations);
    }

    fn count(&self, level: DqLevel) -> usize {
        self.violations.iter().filter(|v| v.level == level).count()
    }
}
