// ==========================================
// 房源目标达成分析系统 - 运行配置
// ==========================================
// 职责: 目录 / 参考日期 / 状态策略 / 汇总输出开关
// 来源: 默认值 → JSON 配置文件 → META_* 环境变量（后者覆盖前者）
// ==========================================

use crate::config::scoring_config_trait::ScoringConfigReader;
use crate::domain::types::StatusPolicy;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 目录
    pub const RAW_DIR: &str = "raw_dir";
    pub const PROCESSED_DIR: &str = "processed_dir";

    // 评分
    pub const REFERENCE_DATE: &str = "reference_date";
    pub const STATUS_POLICY: &str = "status_policy";

    // 输出
    pub const WRITE_SUMMARY: &str = "write_summary";

    // 环境变量前缀: META_RAW_DIR, META_PROCESSED_DIR ...
    pub const ENV_PREFIX: &str = "META_";

    // 显式指定配置文件路径
    pub const CONFIG_PATH_ENV: &str = "META_CONFIG_PATH";

    pub const ALL: [&str; 5] = [
        RAW_DIR,
        PROCESSED_DIR,
        REFERENCE_DATE,
        STATUS_POLICY,
        WRITE_SUMMARY,
    ];

    /// 配置键 → 环境变量名
    pub fn env_name(key: &str) -> String {
        format!("{}{}", ENV_PREFIX, key.to_uppercase())
    }
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// PipelineConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// 原始抽取表目录
    pub raw_dir: PathBuf,
    /// 输出快照目录
    pub processed_dir: PathBuf,
    /// 参考日期覆写（None = 使用每行 execution_date）
    pub reference_date: Option<NaiveDate>,
    pub status_policy: StatusPolicy,
    /// 是否写出 run_summary_{date}.json
    pub write_summary: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("data/raw"),
            processed_dir: PathBuf::from("data/processed"),
            reference_date: None,
            status_policy: StatusPolicy::DaysAndPotential,
            write_summary: true,
        }
    }
}

impl PipelineConfig {
    /// 从 JSON 文件加载（缺失字段取默认值）
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&content)?;
        debug!(path = %path.display(), "配置文件已加载");
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// 完整加载流程
    ///
    /// 1. 显式路径 > META_CONFIG_PATH > 用户配置目录下的 config.json（存在时）
    /// 2. 无配置文件时使用默认值
    /// 3. 应用 META_* 环境变量覆写
    pub fn load(explicit_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match Self::resolve_config_path(explicit_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        info!(
            raw_dir = %config.raw_dir.display(),
            processed_dir = %config.processed_dir.display(),
            status_policy = %config.status_policy,
            reference_date = ?config.reference_date,
            "运行配置就绪"
        );
        Ok(config)
    }

    /// 应用进程环境变量覆写
    pub fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// 按配置键应用覆写（lookup 接收环境变量名）
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in config_keys::ALL {
            let value = match lookup(&config_keys::env_name(key)) {
                Some(value) if !value.trim().is_empty() => value.trim().to_string(),
                _ => continue,
            };
            self.set_value(key, &value)?;
            debug!(key, value = %value, "环境变量覆写配置");
        }
        Ok(())
    }

    /// 按配置键写入单个值
    pub fn set_value(&mut self, key: &str, value: &str) -> ConfigResult<()> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            message,
        };

        match key {
            config_keys::RAW_DIR => self.raw_dir = PathBuf::from(value),
            config_keys::PROCESSED_DIR => self.processed_dir = PathBuf::from(value),
            config_keys::REFERENCE_DATE => {
                let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .map_err(|e| invalid(format!("期望 YYYY-MM-DD: {}", e)))?;
                self.reference_date = Some(date);
            }
            config_keys::STATUS_POLICY => {
                self.status_policy = value.parse().map_err(invalid)?;
            }
            config_keys::WRITE_SUMMARY => {
                self.write_summary = parse_bool(value)
                    .ok_or_else(|| invalid("期望 true/false".to_string()))?;
            }
            _ => return Err(invalid("未知配置键".to_string())),
        }
        Ok(())
    }

    fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit_path {
            return Some(path.to_path_buf());
        }

        if let Ok(path) = std::env::var(config_keys::CONFIG_PATH_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }

        dirs::config_dir()
            .map(|dir| dir.join("meta-performance").join("config.json"))
            .filter(|path| path.is_file())
    }
}

impl ScoringConfigReader for PipelineConfig {
    fn status_policy(&self) -> StatusPolicy {
        self.status_policy
    }

    fn reference_date_override(&self) -> Option<NaiveDate> {
        self.reference_date
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
