// ==========================================
// 房源目标达成分析系统 - 评分配置读取 Trait
// ==========================================
// 职责: 定义评分引擎所需的配置读取接口（不包含实现细节）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::types::StatusPolicy;
use chrono::NaiveDate;

// ==========================================
// ScoringConfigReader Trait
// ==========================================
// 实现者: PipelineConfig（文件 + 环境变量）, FixedScoringConfig（测试/嵌入调用）
pub trait ScoringConfigReader: Send + Sync {
    /// 运营状态判定策略
    ///
    /// # 默认值
    /// - days_and_potential
    fn status_policy(&self) -> StatusPolicy;

    /// 参考日期覆写
    ///
    /// # 返回
    /// - None: 每行使用自身 execution_date
    /// - Some(date): 所有行统一使用该日期计算剩余天数
    fn reference_date_override(&self) -> Option<NaiveDate>;
}

/// 固定取值的配置读取器
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedScoringConfig {
    pub status_policy: StatusPolicy,
    pub reference_date: Option<NaiveDate>,
}

impl FixedScoringConfig {
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn with_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }
}

impl ScoringConfigReader for FixedScoringConfig {
    fn status_policy(&self) -> StatusPolicy {
        self.status_policy
    }

    fn reference_date_override(&self) -> Option<NaiveDate> {
        self.reference_date
    }
}
