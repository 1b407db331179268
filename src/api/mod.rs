// ==========================================
// 设备 OEE 分析系统 - API 层
// ==========================================
// 职责: 对分析快照提供查询接口，供 CLI 或其它服务层调用
// ==========================================

pub mod error;
pub mod oee_api;
pub mod report;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use oee_api::{validate_equipment_filter, OeeApi, RunSummary};
pub use report::{format_downtime_table, format_oee_table};
