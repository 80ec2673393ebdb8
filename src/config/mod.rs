// ==========================================
// 房源目标达成分析系统 - 配置层
// ==========================================
// 职责: 运行配置加载, 支持多级覆写
// 优先级: 默认值 < JSON 配置文件 < META_* 环境变量
// ==========================================

pub mod pipeline_config;
pub mod scoring_config_trait;

// 重导出核心配置类型
pub use pipeline_config::{config_keys, ConfigError, ConfigResult, PipelineConfig};
pub use scoring_config_trait::{FixedScoringConfig, ScoringConfigReader};
