// ==========================================
// 设备 OEE 分析系统 - 引擎配置读取 Trait
// ==========================================
// 职责: 定义导入与引擎所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::config_manager::ConfigError;
use crate::domain::types::DowntimeUnit;
use std::path::PathBuf;

// ==========================================
// EngineConfigReader Trait
// ==========================================
// 实现者: ConfigManager
pub trait EngineConfigReader {
    /// 时间戳格式（chrono 格式串）
    ///
    /// # 默认值
    /// - `%Y/%m/%d %H:%M:%S`
    fn get_timestamp_format(&self) -> Result<String, ConfigError>;

    /// 停机原因缺失时使用的默认原因
    ///
    /// # 默认值
    /// - `Status Down`
    fn get_default_down_reason(&self) -> Result<String, ConfigError>;

    /// 停机报表展示单位
    ///
    /// # 默认值
    /// - `minute`
    fn get_downtime_report_unit(&self) -> Result<DowntimeUnit, ConfigError>;

    /// 自动采集状态文件
    fn get_status_file(&self) -> Result<PathBuf, ConfigError>;

    /// 人工修正状态文件
    fn get_manual_status_file(&self) -> Result<PathBuf, ConfigError>;

    /// 生产工单文件
    fn get_production_file(&self) -> Result<PathBuf, ConfigError>;
}
