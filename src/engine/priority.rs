// ==========================================
// 房源目标达成分析系统 - 优先级评分引擎
// ==========================================
// 职责: 观察名单房源的紧迫度评分
// 两阶段:
//   1) 逐行计算原始分 (raw)
//   2) 全部原始分就绪后在队列内做秩归一化 (0–100) 并分档
// 红线: 第二阶段依赖第一阶段全部完成, 不存在跨运行的全局状态
// ==========================================

mod scorer;
mod normalize;


pub use scorer::{PriorityInput, PriorityScore, PriorityScorer};
pub use normalize::normalize_scores;
