// ==========================================
// 房源目标达成分析系统 - API 层
// ==========================================
// 职责: 提供运行与查询入口, 供命令行与看板调用
// ==========================================

pub mod error;
pub mod prepare_api;
pub mod snapshot_api;

// 重导出核心类型
pub use error::{PipelineError, PipelineResult};
pub use prepare_api::{PrepareApi, PrepareOverview, PrepareReport};
pub use snapshot_api::{SnapshotApi, SnapshotView};
