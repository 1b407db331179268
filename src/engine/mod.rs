// ==========================================
// 设备 OEE 分析系统 - 引擎层
// ==========================================
// 职责: 纯计算引擎，输入为导入层产出的不可变快照
// 红线: 引擎不做 I/O；单条坏记录不得中断整批计算
// ==========================================

pub mod day_splitter;
pub mod downtime;
pub mod oee_calculator;
pub mod orchestrator;
pub mod reconciler;
pub mod rollup;
pub mod window_slicer;

// 重导出核心引擎
pub use day_splitter::{inclusive_seconds, DaySlice, DaySplitter};
pub use downtime::DowntimeAggregator;
pub use oee_calculator::{DailyComputation, OeeCalculator};
pub use orchestrator::{AnalysisSnapshot, OeePipeline};
pub use reconciler::{ReconcileStats, Reconciled, SourceReconciler};
pub use rollup::RollupAggregator;
pub use window_slicer::{ClippedStatus, StatusDurations, StatusWindowSlicer};
