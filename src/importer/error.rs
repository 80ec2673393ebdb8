// ==========================================
// 房源目标达成分析系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 缺少必需抽取表为致命错误, 必须指明缺失文件与补救方式
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 输入缺失 =====
    #[error("缺少必需的抽取表: {artifact}（{remediation}）")]
    MissingInput {
        artifact: String,
        remediation: String,
    },

    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 数据映射错误 =====
    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    // ===== 快照表结构错误 =====
    #[error("快照表结构不兼容: {file} 缺少列 [{}]", missing_columns.join(", "))]
    SchemaIncompatibility {
        file: String,
        missing_columns: Vec<String>,
    },
}

impl ImportError {
    /// 缺少必需抽取表
    pub fn missing_input(artifact: impl Into<String>) -> Self {
        ImportError::MissingInput {
            artifact: artifact.into(),
            remediation: "请先运行数据抽取阶段生成该文件".to_string(),
        }
    }

    /// 是否为致命的输入缺失
    pub fn is_missing_input(&self) -> bool {
        matches!(self, ImportError::MissingInput { .. })
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
