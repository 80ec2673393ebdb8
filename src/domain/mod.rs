// ==========================================
// 房源目标达成分析系统 - 领域模型层
// ==========================================
// 职责: 定义抽取记录、增强记录、观察名单记录与分类枚举
// 红线: 不含文件读写逻辑, 不含引擎逻辑
// ==========================================

pub mod listing;
pub mod snapshot;
pub mod summary;
pub mod types;

// 重导出核心类型
pub use listing::{
    EnrichedListing, ExtractSet, LocationRecord, MergedListing, MinPriceRecord,
    PerformanceRecord, PriceRecord, WatchlistListing,
};
pub use snapshot::SnapshotOutput;
pub use summary::RunSummary;
pub use types::{CriticalityGroup, OperationalStatus, PriorityBand, StatusPolicy};
