// ==========================================
// 房源目标达成分析系统 - 导入接口 Trait
// ==========================================
// 职责: 定义抽取表导入各阶段的接口（不包含实现）
// 流程: 解析 (FileParser) → 清洗 (DataCleaner) → 映射 (FieldMapper)
// ==========================================

use crate::domain::listing::{LocationRecord, MinPriceRecord, PerformanceRecord, PriceRecord};
use crate::importer::dq_report::DqReport;
use crate::importer::error::ImportResult;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::Path;

/// 原始行记录（列名 → 单元格文本）
pub type RawRow = HashMap<String, String>;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 行记录列表（已去除完全空白的行）
    /// - Err: 文件不存在、格式不支持、解析失败
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 单元格清洗与类型转换
// 实现者: DataCleanerImpl
// 约定: Ok(None) = 空值; Err = 非空但无法解析（由调用方降级为空值并记录 DQ 警告）
pub trait DataCleaner: Send + Sync {
    /// 标准化 NULL 值（空白 / nan / null / None / NaT → None）
    fn normalize_null(&self, value: Option<&str>) -> Option<String>;

    /// 解析小数
    fn parse_decimal(&self, value: Option<&str>, field: &str, row: usize)
        -> ImportResult<Option<f64>>;

    /// 解析整数（接受 "12.0" 这类整值小数）
    fn parse_integer(&self, value: Option<&str>, field: &str, row: usize)
        -> ImportResult<Option<i64>>;

    /// 解析日期（YYYY-MM-DD / 带时间 / RFC3339 / YYYYMMDD）
    fn parse_date(&self, value: Option<&str>, field: &str, row: usize)
        -> ImportResult<Option<NaiveDate>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 源列名 → 标准字段映射
// 实现者: FieldMapperImpl
// 约定: 返回 None 表示该行缺少 listing_id, 已丢弃并记入 DQ 报告
pub trait FieldMapper: Send + Sync {
    fn map_performance(
        &self,
        row: &RawRow,
        row_number: usize,
        dq: &mut DqReport,
    ) -> Option<PerformanceRecord>;

    fn map_price(&self, row: &RawRow, row_number: usize, dq: &mut DqReport)
        -> Option<PriceRecord>;

    fn map_location(
        &self,
        row: &RawRow,
        row_number: usize,
        dq: &mut DqReport,
    ) -> Option<LocationRecord>;

    fn map_min_price(
        &self,
        row: &RawRow,
        row_number: usize,
        dq: &mut DqReport,
    ) -> Option<MinPriceRecord>;
}
