// ==========================================
// 设备 OEE 分析系统 - 引擎配置
// ==========================================
// 职责: 将 key-value 配置收敛为强类型配置对象
// ==========================================

use crate::config::config_manager::{config_defaults, ConfigError};
use crate::config::engine_config_trait::EngineConfigReader;
use crate::domain::types::DowntimeUnit;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 引擎运行配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 时间戳格式（本地墙钟时间，不做时区换算）
    pub timestamp_format: String,
    /// 停机原因缺省值
    pub default_down_reason: String,
    /// 停机报表展示单位
    pub downtime_report_unit: DowntimeUnit,

    // ===== 输入文件 =====
    pub status_file: PathBuf,
    pub manual_status_file: PathBuf,
    pub production_file: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timestamp_format: config_defaults::TIMESTAMP_FORMAT.to_string(),
            default_down_reason: config_defaults::DEFAULT_DOWN_REASON.to_string(),
            downtime_report_unit: DowntimeUnit::Minute,
            status_file: PathBuf::from(config_defaults::STATUS_FILE),
            manual_status_file: PathBuf::from(config_defaults::MANUAL_STATUS_FILE),
            production_file: PathBuf::from(config_defaults::PRODUCTION_FILE),
        }
    }
}

impl EngineConfig {
    /// 从配置读取器构建
    pub fn from_reader<C: EngineConfigReader + ?Sized>(reader: &C) -> Result<Self, ConfigError> {
        Ok(Self {
            timestamp_format: reader.get_timestamp_format()?,
            default_down_reason: reader.get_default_down_reason()?,
            downtime_report_unit: reader.get_downtime_report_unit()?,
            status_file: reader.get_status_file()?,
            manual_status_file: reader.get_manual_status_file()?,
            production_file: reader.get_production_file()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config_manager::{config_keys, ConfigManager};

    #[test]
    fn test_default_matches_empty_manager() {
        let from_manager = EngineConfig::from_reader(&ConfigManager::new()).unwrap();
        assert_eq!(from_manager, EngineConfig::default());
    }

    #[test]
    fn test_from_reader_applies_values() {
        let mut manager = ConfigManager::new();
        manager.set(config_keys::DOWNTIME_REPORT_UNIT, "second");
        manager.set(config_keys::MANUAL_STATUS_FILE, "data/manual.csv");

        let config = EngineConfig::from_reader(&manager).unwrap();
        assert_eq!(config.downtime_report_unit, DowntimeUnit::Second);
        assert_eq!(config.manual_status_file, PathBuf::from("data/manual.csv"));
    }
}
