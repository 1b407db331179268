// ==========================================
// 设备 OEE 分析系统 - 配置层
// ==========================================
// 职责: 系统配置管理,支持配置文件 + 环境变量覆写
// ==========================================

pub mod config_manager;
pub mod engine_config;
pub mod engine_config_trait;

// 重导出核心配置管理器
pub use config_manager::{
    config_keys, default_config_path, ConfigError, ConfigManager, CONFIG_PATH_ENV,
};
pub use engine_config::EngineConfig;
pub use engine_config_trait::EngineConfigReader;
