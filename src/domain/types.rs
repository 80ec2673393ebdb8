// ==========================================
// 房源目标达成分析系统 - 领域类型定义
// ==========================================
// 依据: 目标达成率分档规则 + Berlinda 运营状态 + 优先级分档
// 红线: 分类结果以枚举标签存储, 图标/颜色只是展示层查表
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 关键度分组 (Criticality Group)
// ==========================================
// 顺序: Critical < Attention < Watchlist < Ok < TargetUnderestimated
// 与达成率阈值 {0.50, 0.80, 1.10, 2.00} 一一对应
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalityGroup {
    Critical,             // ≤ 50%
    Attention,            // 50% – 80%
    Watchlist,            // 80% – 110% (Berlinda)
    Ok,                   // 110% – 200%
    TargetUnderestimated, // > 200%, 目标设置疑似异常
}

impl CriticalityGroup {
    /// 全部分组（展示顺序）
    pub const ALL: [CriticalityGroup; 5] = [
        CriticalityGroup::Critical,
        CriticalityGroup::Attention,
        CriticalityGroup::Watchlist,
        CriticalityGroup::Ok,
        CriticalityGroup::TargetUnderestimated,
    ];

    /// 稳定标签（输出表中的取值）
    pub fn as_str(&self) -> &'static str {
        match self {
            CriticalityGroup::Critical => "critical",
            CriticalityGroup::Attention => "attention",
            CriticalityGroup::Watchlist => "watchlist",
            CriticalityGroup::Ok => "ok",
            CriticalityGroup::TargetUnderestimated => "target_underestimated",
        }
    }

    /// 看板图例文本
    pub fn label(&self) -> &'static str {
        match self {
            CriticalityGroup::Critical => "crítico (≤ 50%)",
            CriticalityGroup::Attention => "atenção (50%–80%)",
            CriticalityGroup::Watchlist => "berlinda (80–110%)",
            CriticalityGroup::Ok => "ok (110%–200%)",
            CriticalityGroup::TargetUnderestimated => "meta_subestimada (> 200%)",
        }
    }

    /// 看板配色
    pub fn color(&self) -> &'static str {
        match self {
            CriticalityGroup::Critical => "#d32f2f",
            CriticalityGroup::Attention => "#f57c00",
            CriticalityGroup::Watchlist => "#388e3c",
            CriticalityGroup::Ok => "#1976d2",
            CriticalityGroup::TargetUnderestimated => "#7b1fa2",
        }
    }
}

impl fmt::Display for CriticalityGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CriticalityGroup {
    type Err = String;

    /// 兼容历史快照中的葡语标签
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "critical" | "crítico" => Ok(CriticalityGroup::Critical),
            "attention" | "atenção" => Ok(CriticalityGroup::Attention),
            "watchlist" | "berlinda" => Ok(CriticalityGroup::Watchlist),
            "ok" => Ok(CriticalityGroup::Ok),
            "target_underestimated" | "meta_subestimada" => {
                Ok(CriticalityGroup::TargetUnderestimated)
            }
            other => Err(format!("未知的关键度分组: {}", other)),
        }
    }
}

// ==========================================
// 运营状态 (Operational Status)
// ==========================================
// 仅对 Berlinda 房源计算; 每个快照独立判定, 不跨快照保存状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationalStatus {
    BelowViable,      // 低于目标, 按当前表现可达成
    BelowNeedsEffort, // 低于目标, 天数够但需要提升表现
    BelowInfeasible,  // 低于目标, 本月已无可行动空间
    AboveAtRisk,      // 已达标, 仍有可售天数, 可能回落
    AboveNoAction,    // 已达标, 无剩余天数, 仅监控
}

impl OperationalStatus {
    pub const ALL: [OperationalStatus; 5] = [
        OperationalStatus::BelowViable,
        OperationalStatus::BelowNeedsEffort,
        OperationalStatus::BelowInfeasible,
        OperationalStatus::AboveAtRisk,
        OperationalStatus::AboveNoAction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationalStatus::BelowViable => "below_viable",
            OperationalStatus::BelowNeedsEffort => "below_needs_effort",
            OperationalStatus::BelowInfeasible => "below_infeasible",
            OperationalStatus::AboveAtRisk => "above_at_risk",
            OperationalStatus::AboveNoAction => "above_no_action",
        }
    }

    /// 看板图标
    pub fn icon(&self) -> &'static str {
        match self {
            OperationalStatus::BelowViable => "🟢",
            OperationalStatus::BelowNeedsEffort => "🟠",
            OperationalStatus::BelowInfeasible => "🔴",
            OperationalStatus::AboveAtRisk | OperationalStatus::AboveNoAction => "🟡",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OperationalStatus::BelowViable => "Abaixo viável",
            OperationalStatus::BelowNeedsEffort => "Abaixo precisa esforço",
            OperationalStatus::BelowInfeasible => "Abaixo inviável",
            OperationalStatus::AboveAtRisk => "Acima com risco",
            OperationalStatus::AboveNoAction => "Acima sem ação",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            OperationalStatus::BelowViable => "#388e3c",
            OperationalStatus::BelowNeedsEffort => "#ffa726",
            OperationalStatus::BelowInfeasible => "#d32f2f",
            OperationalStatus::AboveAtRisk => "#fbc02d",
            OperationalStatus::AboveNoAction => "#bdbdbd",
        }
    }

    /// 是否属于"可行动"状态（看板 KPI: 可行 = 可达成 + 需努力）
    pub fn is_actionable(&self) -> bool {
        matches!(
            self,
            OperationalStatus::BelowViable | OperationalStatus::BelowNeedsEffort
        )
    }
}

impl fmt::Display for OperationalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OperationalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationalStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| format!("未知的运营状态: {}", s))
    }
}

// ==========================================
// 优先级分档 (Priority Band)
// ==========================================
// 阈值: ≥80 Critical, ≥50 High, ≥20 Medium, 其余 Low
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriorityBand {
    Low,
    Medium,
    High,
    Critical,
}

impl PriorityBand {
    pub const ALL: [PriorityBand; 4] = [
        PriorityBand::Critical,
        PriorityBand::High,
        PriorityBand::Medium,
        PriorityBand::Low,
    ];

    /// 由归一化分数 (0–100) 分档
    pub fn from_score(normalized: f64) -> Self {
        if normalized >= 80.0 {
            PriorityBand::Critical
        } else if normalized >= 50.0 {
            PriorityBand::High
        } else if normalized >= 20.0 {
            PriorityBand::Medium
        } else {
            PriorityBand::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityBand::Critical => "Critical",
            PriorityBand::High => "High",
            PriorityBand::Medium => "Medium",
            PriorityBand::Low => "Low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriorityBand::Critical => "Crítico",
            PriorityBand::High => "Alta",
            PriorityBand::Medium => "Média",
            PriorityBand::Low => "Baixa",
        }
    }

    /// 操作表排序权重 (Critical=4 ... Low=1)
    pub fn sort_weight(&self) -> u8 {
        match self {
            PriorityBand::Critical => 4,
            PriorityBand::High => 3,
            PriorityBand::Medium => 2,
            PriorityBand::Low => 1,
        }
    }
}

impl fmt::Display for PriorityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PriorityBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Critical" | "Crítico" => Ok(PriorityBand::Critical),
            "High" | "Alta" => Ok(PriorityBand::High),
            "Medium" | "Média" => Ok(PriorityBand::Medium),
            "Low" | "Baixa" => Ok(PriorityBand::Low),
            other => Err(format!("未知的优先级分档: {}", other)),
        }
    }
}

// ==========================================
// 运营状态判定策略 (Status Policy)
// ==========================================
// DaysAndPotential: days_needed 与 potential_realistic 两道独立门槛 (默认)
// PotentialOnly: 历史版本, 仅比较 potential_realistic ≥ target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPolicy {
    #[default]
    DaysAndPotential,
    PotentialOnly,
}

impl fmt::Display for StatusPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusPolicy::DaysAndPotential => write!(f, "days_and_potential"),
            StatusPolicy::PotentialOnly => write!(f, "potential_only"),
        }
    }
}

impl FromStr for StatusPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "days_and_potential" => Ok(StatusPolicy::DaysAndPotential),
            "potential_only" => Ok(StatusPolicy::PotentialOnly),
            other => Err(format!("未知的状态判定策略: {}", other)),
        }
    }
}
