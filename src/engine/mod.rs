// ==========================================
// 房源目标达成分析系统 - 引擎层
// ==========================================
// 职责: 指标推导与评分规则, 不做文件读写
// 红线: 所有引擎无状态; 算术保护情形返回显式默认值, 不报错
// ==========================================

pub mod achievement;
pub mod availability;
pub mod financial_impact;
pub mod merger;
pub mod orchestrator;
pub mod potential;
pub mod priority;
pub mod run_summary;
pub mod safe_math;
pub mod status;
pub mod watchlist;

// 重导出核心引擎
pub use achievement::{Achievement, AchievementCalculator};
pub use availability::AvailabilityResolver;
pub use financial_impact::{FinancialImpact, FinancialImpactCalculator};
pub use merger::ExtractMerger;
pub use orchestrator::PipelineOrchestrator;
pub use potential::{PotentialInput, PotentialProjection, PotentialProjector};
pub use priority::{PriorityInput, PriorityScore, PriorityScorer};
pub use run_summary::RunSummaryEngine;
pub use status::{StatusClassifier, StatusInput};
pub use watchlist::WatchlistFilter;
