// ==========================================
// 房源目标达成分析系统 - API 层错误类型
// ==========================================
// 职责: 汇总导入 / 仓储 / 配置错误, 作为一次运行的顶层错误
// 红线: 缺少必需抽取表必须带出缺失文件与补救方式
// ==========================================

use crate::config::ConfigError;
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 运行级错误
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("抽取表导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("快照读写失败: {0}")]
    Repository(#[from] RepositoryError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

impl PipelineError {
    /// 是否为缺少必需抽取表
    pub fn is_missing_input(&self) -> bool {
        matches!(self, PipelineError::Import(err) if err.is_missing_input())
    }

    /// 是否为快照表结构不兼容
    pub fn is_schema_incompatible(&self) -> bool {
        matches!(
            self,
            PipelineError::Import(ImportError::SchemaIncompatibility { .. })
                | PipelineError::Repository(RepositoryError::Import(
                    ImportError::SchemaIncompatibility { .. }
                ))
        )
    }

    /// 面向操作人员的补救提示
    pub fn remediation(&self) -> Option<&str> {
        match self {
            PipelineError::Import(ImportError::MissingInput { remediation, .. }) => {
                Some(remediation.as_str())
            }
            _ => None,
        }
    }
}

/// Result 类型别名
pub type PipelineResult<T> = Result<T, PipelineError>;
