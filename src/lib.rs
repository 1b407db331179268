// ==========================================
// 设备 OEE 分析系统 - 核心库
// ==========================================
// 技术栈: Rust + serde + tracing
// 系统定位: 设备状态对账 / 停机归因 / OEE 批量计算
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 外部数据
pub mod importer;

// 引擎层 - 计算规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 查询接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DowntimeUnit, EquipmentId, EquipmentStatus, IntervalSource, OeeCategory};

// 领域实体
pub use domain::{
    DailyMetrics, DowntimeBucket, EquipmentAverage, OverallAverage, ProductionOrder,
    StatusInterval,
};

// 引擎
pub use engine::{
    AnalysisSnapshot, DaySplitter, DowntimeAggregator, OeeCalculator, OeePipeline,
    RollupAggregator, SourceReconciler, StatusWindowSlicer,
};

// 导入
pub use importer::{DataLoader, ImportedData};

// 配置
pub use config::{ConfigManager, EngineConfig};

// API
pub use api::{ApiError, ApiResult, OeeApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "设备 OEE 分析系统";
