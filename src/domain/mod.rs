// ==========================================
// 设备 OEE 分析系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含文件读取逻辑,不含引擎逻辑
// ==========================================

pub mod interval;
pub mod metrics;
pub mod production;
pub mod types;

// 重导出核心类型
pub use interval::{RawStatusRecord, StatusInterval};
pub use metrics::{
    DailyKey, DailyMetrics, DowntimeBucket, DowntimeKey, EquipmentAverage, OverallAverage,
};
pub use production::{ProductionOrder, RawProductionRecord};
pub use types::{DowntimeUnit, EquipmentId, EquipmentStatus, IntervalSource, OeeCategory};
