// ==========================================
// 房源目标达成分析系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 快照文件的写出、目录与回读, 屏蔽文件布局细节
// ==========================================

pub mod error;
pub mod snapshot_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use snapshot_repo::{
    enriched_columns, file_names, watchlist_columns, SnapshotEntry, SnapshotPaths,
    SnapshotRepository, WATCHLIST_DERIVED_COLUMNS,
};
