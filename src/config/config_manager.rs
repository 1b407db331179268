// ==========================================
// 设备 OEE 分析系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 来源: JSON 配置文件 (key-value) + 环境变量覆写
// 优先级: 环境变量 > 配置文件 > 代码默认值
// ==========================================

use crate::config::engine_config_trait::EngineConfigReader;
use crate::domain::types::DowntimeUnit;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 环境变量前缀（EQUIPMENT_OEE_<KEY>）
pub const ENV_PREFIX: &str = "EQUIPMENT_OEE_";

/// 指定配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "EQUIPMENT_OEE_CONFIG";

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    pub const TIMESTAMP_FORMAT: &str = "timestamp_format";
    pub const DEFAULT_DOWN_REASON: &str = "default_down_reason";
    pub const DOWNTIME_REPORT_UNIT: &str = "downtime_report_unit";
    pub const STATUS_FILE: &str = "status_file";
    pub const MANUAL_STATUS_FILE: &str = "manual_status_file";
    pub const PRODUCTION_FILE: &str = "production_file";

    pub const ALL: &[&str] = &[
        TIMESTAMP_FORMAT,
        DEFAULT_DOWN_REASON,
        DOWNTIME_REPORT_UNIT,
        STATUS_FILE,
        MANUAL_STATUS_FILE,
        PRODUCTION_FILE,
    ];
}

// ==========================================
// 默认值
// ==========================================
pub mod config_defaults {
    pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";
    pub const DEFAULT_DOWN_REASON: &str = "Status Down";
    pub const DOWNTIME_REPORT_UNIT: &str = "minute";
    pub const STATUS_FILE: &str = "status.json";
    pub const MANUAL_STATUS_FILE: &str = "manual_status.json";
    pub const PRODUCTION_FILE: &str = "production.json";
}

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {path}: {message}")]
    FileReadError { path: String, message: String },

    #[error("配置文件格式错误: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
}

impl ConfigManager {
    /// 创建空配置（全部使用默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 加载配置（读取进程环境变量）
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    /// 加载配置
    ///
    /// # 参数
    /// - path: 显式指定的配置文件；为 None 时依次尝试 `EQUIPMENT_OEE_CONFIG` 与用户配置目录
    /// - lookup: 环境变量查找函数
    ///
    /// # 说明
    /// - 参数或 `EQUIPMENT_OEE_CONFIG` 指定的文件不存在时报错
    /// - 用户配置目录下的文件不存在时静默使用默认值
    /// - 文件加载后再应用环境变量覆写
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| env_config_path(&lookup));

        let mut manager = match explicit {
            Some(p) => Self::from_file(&p)?,
            None => match user_config_path() {
                Some(p) if p.exists() => Self::from_file(&p)?,
                _ => Self::new(),
            },
        };

        manager.apply_overrides(&lookup);
        Ok(manager)
    }

    /// 从 JSON 文件读取配置（顶层对象，值为字符串/数值/布尔）
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let manager = Self::from_json_str(&raw)?;
        tracing::info!(
            config_path = %path.display(),
            keys = manager.values.len(),
            "配置文件加载完成"
        );
        Ok(manager)
    }

    /// 从 JSON 字符串解析配置
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let parsed: HashMap<String, Value> = serde_json::from_str(raw)?;

        let mut values = HashMap::new();
        for (key, value) in parsed {
            let text = match value {
                Value::Null => continue,
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                other => {
                    return Err(ConfigError::ConfigValueError {
                        key,
                        value: other.to_string(),
                        message: "仅支持标量配置值".to_string(),
                    })
                }
            };
            values.insert(key, text);
        }

        Ok(Self { values })
    }

    /// 应用覆写（按 `EQUIPMENT_OEE_<KEY>` 查找）
    ///
    /// lookup 由调用方提供，生产环境传入 `std::env::var`。
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in config_keys::ALL {
            let var_name = format!("{}{}", ENV_PREFIX, key.to_uppercase());
            if let Some(value) = lookup(&var_name) {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    continue;
                }
                tracing::debug!(config_key = key, env = %var_name, "环境变量覆写配置");
                self.values.insert(key.to_string(), trimmed.to_string());
            }
        }
    }

    /// 写入单个配置值
    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    /// 读取配置值
    pub fn get_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// 读取配置值，带默认值
    pub fn get_config_or_default(&self, key: &str, default: &str) -> String {
        self.get_config_value(key)
            .map(|s| s.to_string())
            .unwrap_or_else(|| default.to_string())
    }

    /// 获取所有配置的快照（JSON格式，按键排序）
    pub fn get_config_snapshot(&self) -> Result<String, ConfigError> {
        let sorted: std::collections::BTreeMap<&String, &String> = self.values.iter().collect();
        Ok(serde_json::to_string(&json!(sorted))?)
    }
}

// ==========================================
// EngineConfigReader Trait 实现
// ==========================================
impl EngineConfigReader for ConfigManager {
    fn get_timestamp_format(&self) -> Result<String, ConfigError> {
        Ok(self.get_config_or_default(
            config_keys::TIMESTAMP_FORMAT,
            config_defaults::TIMESTAMP_FORMAT,
        ))
    }

    fn get_default_down_reason(&self) -> Result<String, ConfigError> {
        let value = self.get_config_or_default(
            config_keys::DEFAULT_DOWN_REASON,
            config_defaults::DEFAULT_DOWN_REASON,
        );
        if value.trim().is_empty() {
            return Ok(config_defaults::DEFAULT_DOWN_REASON.to_string());
        }
        Ok(value)
    }

    fn get_downtime_report_unit(&self) -> Result<DowntimeUnit, ConfigError> {
        let value = self.get_config_or_default(
            config_keys::DOWNTIME_REPORT_UNIT,
            config_defaults::DOWNTIME_REPORT_UNIT,
        );
        value
            .parse::<DowntimeUnit>()
            .map_err(|message| ConfigError::ConfigValueError {
                key: config_keys::DOWNTIME_REPORT_UNIT.to_string(),
                value,
                message,
            })
    }

    fn get_status_file(&self) -> Result<PathBuf, ConfigError> {
        Ok(PathBuf::from(self.get_config_or_default(
            config_keys::STATUS_FILE,
            config_defaults::STATUS_FILE,
        )))
    }

    fn get_manual_status_file(&self) -> Result<PathBuf, ConfigError> {
        Ok(PathBuf::from(self.get_config_or_default(
            config_keys::MANUAL_STATUS_FILE,
            config_defaults::MANUAL_STATUS_FILE,
        )))
    }

    fn get_production_file(&self) -> Result<PathBuf, ConfigError> {
        Ok(PathBuf::from(self.get_config_or_default(
            config_keys::PRODUCTION_FILE,
            config_defaults::PRODUCTION_FILE,
        )))
    }
}

/// 默认配置文件路径
///
/// 1. `EQUIPMENT_OEE_CONFIG` 环境变量
/// 2. `<用户配置目录>/equipment-oee/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    env_config_path(&|name: &str| std::env::var(name).ok()).or_else(user_config_path)
}

fn env_config_path<F>(lookup: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(CONFIG_PATH_ENV)?;
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("equipment-oee").join("config.json"))
}
