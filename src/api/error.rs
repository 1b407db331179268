// ==========================================
// 设备 OEE 分析系统 - API层错误类型
// ==========================================
// 职责: 汇总导入层/配置层/导出错误，输出面向调用方的错误消息
// ==========================================

use crate::config::ConfigError;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("数据导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("导出失败: {0}")]
    Export(#[from] serde_json::Error),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
