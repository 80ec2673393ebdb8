// ==========================================
// 房源目标达成分析系统 - 核心库
// ==========================================
// 职责: 合并月度抽取表, 计算目标达成率与关键度分组,
//       对 Berlinda 观察名单 (80–110%) 做剩余天数、潜力、运营状态与优先级评分
// 红线: 同一输入与参考日期 ⇒ 输出文件逐字节一致
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与分类枚举
pub mod domain;

// 引擎层 - 评分规则
pub mod engine;

// 导入层 - 外部抽取表
pub mod importer;

// 配置层 - 运行配置
pub mod config;

// 数据仓储层 - 快照文件
pub mod repository;

// API 层 - 运行与查询入口
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CriticalityGroup, OperationalStatus, PriorityBand, StatusPolicy};

// 领域实体
pub use domain::{
    EnrichedListing, ExtractSet, MergedListing, RunSummary, SnapshotOutput, WatchlistListing,
};

// 引擎
pub use engine::{
    AchievementCalculator, AvailabilityResolver, ExtractMerger, PipelineOrchestrator,
    PotentialProjector, PriorityScorer, StatusClassifier,
};

// 配置
pub use config::{FixedScoringConfig, PipelineConfig, ScoringConfigReader};

// API
pub use api::{PipelineError, PipelineResult, PrepareApi, SnapshotApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "房源目标达成分析系统";
