// ==========================================
// 房源目标达成分析系统 - 导入层
// ==========================================
// 职责: 外部抽取表导入, 生成领域记录
// 支持: CSV, Excel
// 流程: 定位 → 解析 → 清洗 → 映射 → DQ 汇总
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod dq_report;
pub mod error;
pub mod extract_loader;
pub mod extract_trait;
pub mod field_mapper;
pub mod file_parser;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use dq_report::{DqLevel, DqReport, DqViolation};
pub use error::{ImportError, ImportResult};
pub use extract_loader::{extract_names, ExtractLoader, ExtractSources, LoadedExtracts};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};

// 重导出 Trait 接口
pub use extract_trait::{DataCleaner, FieldMapper, FileParser, RawRow};
