// ==========================================
// 设备 OEE 分析系统 - 引擎编排器
// ==========================================
// 用途: 协调各引擎的执行顺序，产出不可变分析快照
// 流程:
// 1. SourceReconciler   - 自动/人工区间对账
// 2. DowntimeAggregator - 停机桶
// 3. OeeCalculator      - 设备-日指标（基于对账后区间）
// 4. RollupAggregator   - 设备均值 + 全局均值
// ==========================================

use crate::config::EngineConfig;
use crate::domain::interval::StatusInterval;
use crate::domain::metrics::{DailyMetrics, DowntimeBucket, EquipmentAverage, OverallAverage};
use crate::domain::types::EquipmentId;
use crate::importer::{ImportedData, ParseReport};
use crate::engine::downtime::DowntimeAggregator;
use crate::engine::oee_calculator::OeeCalculator;
use crate::engine::reconciler::{ReconcileStats, SourceReconciler};
use crate::engine::rollup::RollupAggregator;
use crate::engine::window_slicer::StatusWindowSlicer;
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

// ==========================================
// AnalysisSnapshot - 分析快照
// ==========================================
// 计算完成后只读；查询方法只借用，不修改
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSnapshot {
    pub run_id: String,
    /// 导入批次 ID
    pub batch_id: String,
    pub generated_at: NaiveDateTime,

    pub parse_report: ParseReport,
    pub reconcile_stats: ReconcileStats,
    pub skipped_orders: usize,

    /// 对账后区间（按 start 升序）
    pub intervals: Vec<StatusInterval>,
    /// 按 (设备, 日期, 原因) 有序
    pub downtime: Vec<DowntimeBucket>,
    /// 按 (设备, 日期) 有序
    pub daily: Vec<DailyMetrics>,
    pub equipment_averages: Vec<EquipmentAverage>,
    pub overall: OverallAverage,
}

impl AnalysisSnapshot {
    /// 停机桶（可按设备过滤）
    pub fn downtime_buckets(&self, equipment: Option<EquipmentId>) -> Vec<&DowntimeBucket> {
        self.downtime
            .iter()
            .filter(|b| equipment.map_or(true, |id| b.equipment_id == id))
            .collect()
    }

    /// 设备-日指标（可按设备过滤）
    pub fn daily_metrics(&self, equipment: Option<EquipmentId>) -> Vec<&DailyMetrics> {
        self.daily
            .iter()
            .filter(|m| equipment.map_or(true, |id| m.equipment_id == id))
            .collect()
    }

    pub fn equipment_averages(&self) -> &[EquipmentAverage] {
        &self.equipment_averages
    }

    pub fn overall_average(&self) -> &OverallAverage {
        &self.overall
    }

    pub fn reconciled_intervals(&self) -> &[StatusInterval] {
        &self.intervals
    }

    /// 快照中出现过的设备编号（升序去重）
    pub fn equipment_ids(&self) -> Vec<EquipmentId> {
        let mut ids: Vec<EquipmentId> = self
            .intervals
            .iter()
            .map(|i| i.equipment_id)
            .chain(self.daily.iter().map(|m| m.equipment_id))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

// ==========================================
// OeePipeline - 引擎编排器
// ==========================================
pub struct OeePipeline {
    reconciler: SourceReconciler,
    downtime: DowntimeAggregator,
    calculator: OeeCalculator,
    rollup: RollupAggregator,
}

impl OeePipeline {
    /// # 参数
    /// - default_down_reason: 停机原因缺省值
    pub fn new(default_down_reason: impl Into<String>) -> Self {
        Self {
            reconciler: SourceReconciler::new(),
            downtime: DowntimeAggregator::new(default_down_reason),
            calculator: OeeCalculator::new(),
            rollup: RollupAggregator::new(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.default_down_reason.clone())
    }

    /// 执行完整分析流程
    ///
    /// # 参数
    /// - data: 导入层产出的输入快照
    ///
    /// # 返回
    /// 分析快照（不会失败；坏记录已在导入阶段剔除并计入报告）
    #[instrument(skip_all, fields(batch_id = %data.batch_id))]
    pub fn run(&self, data: ImportedData) -> AnalysisSnapshot {
        let run_id = Uuid::new_v4().to_string();
        info!(
            run_id = %run_id,
            auto = data.auto_intervals.len(),
            manual = data.manual_intervals.len(),
            orders = data.orders.len(),
            "开始执行 OEE 分析流程"
        );

        // ==========================================
        // 步骤1: 数据源对账
        // ==========================================
        let reconciled = self
            .reconciler
            .reconcile(&data.auto_intervals, &data.manual_intervals);
        debug!(stats = ?reconciled.stats, "步骤1完成: 数据源对账");

        // ==========================================
        // 步骤2: 停机聚合
        // ==========================================
        let downtime: Vec<DowntimeBucket> = self
            .downtime
            .aggregate(&reconciled.intervals)
            .into_values()
            .collect();
        debug!(buckets = downtime.len(), "步骤2完成: 停机聚合");

        // ==========================================
        // 步骤3: 设备-日 OEE 指标
        // ==========================================
        let computation = {
            let slicer = StatusWindowSlicer::new(&reconciled.intervals);
            self.calculator.compute_daily(&data.orders, &slicer)
        };
        let daily: Vec<DailyMetrics> = computation.daily.into_values().collect();
        debug!(days = daily.len(), "步骤3完成: 设备-日指标");

        // ==========================================
        // 步骤4: 汇总
        // ==========================================
        let equipment_averages = self.rollup.equipment_averages(&daily);
        let overall = self.rollup.overall(&equipment_averages);
        debug!(
            equipment = equipment_averages.len(),
            overall_oee = ?overall.oee,
            "步骤4完成: 汇总"
        );

        info!(
            run_id = %run_id,
            intervals = reconciled.intervals.len(),
            downtime_buckets = downtime.len(),
            daily = daily.len(),
            skipped_orders = computation.skipped_orders,
            rejected_records = data.report.rejected_count(),
            "OEE 分析流程完成"
        );

        AnalysisSnapshot {
            run_id,
            batch_id: data.batch_id,
            generated_at: chrono::Local::now().naive_local(),
            parse_report: data.report,
            reconcile_stats: reconciled.stats,
            skipped_orders: computation.skipped_orders,
            intervals: reconciled.intervals,
            downtime,
            daily,
            equipment_averages,
            overall,
        }
    }
}

impl Default for OeePipeline {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::production::ProductionOrder;
    use crate::domain::types::{EquipmentStatus, IntervalSource, OeeCategory};
    use chrono::NaiveDate;

    fn ts(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn interval(
        equipment_id: EquipmentId,
        status: EquipmentStatus,
        reason: Option<&str>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> StatusInterval {
        StatusInterval {
            equipment_id,
            status,
            reason: reason.map(|r| r.to_string()),
            start,
            end,
            source: IntervalSource::Auto,
        }
    }

    fn data() -> ImportedData {
        ImportedData {
            batch_id: "batch-1".to_string(),
            auto_intervals: vec![
                interval(1, EquipmentStatus::Running, None, ts(1, 8, 0), ts(1, 10, 0)),
                interval(2, EquipmentStatus::Down, Some("jam"), ts(1, 10, 0), ts(1, 12, 0)),
            ],
            manual_intervals: vec![interval(
                2,
                EquipmentStatus::Running,
                None,
                ts(1, 10, 30),
                ts(1, 11, 30),
            )],
            orders: vec![ProductionOrder {
                equipment_id: 1,
                start: ts(1, 8, 0),
                end: ts(1, 9, 0),
                planned_duration_seconds: 3600.0,
                planned_quantity: 100.0,
                actual_quantity: 90.0,
                defect_quantity: 9.0,
            }],
            report: ParseReport::default(),
        }
    }

    #[test]
    fn test_run_produces_full_snapshot() {
        let snapshot = OeePipeline::default().run(data());

        assert_eq!(snapshot.batch_id, "batch-1");
        assert_eq!(snapshot.reconcile_stats.overridden, 1);
        // 设备 2 的 DOWN 被人工修正为 RUNNING → 无停机
        assert!(snapshot.downtime_buckets(None).is_empty());
        assert_eq!(snapshot.daily_metrics(Some(1)).len(), 1);
        assert!(snapshot.daily_metrics(Some(2)).is_empty());
        assert_eq!(snapshot.equipment_averages().len(), 1);
        assert_eq!(snapshot.overall_average().equipment_count, 1);
        assert_eq!(snapshot.overall_average().category, OeeCategory::Recommended);
        assert_eq!(snapshot.equipment_ids(), vec![1, 2]);
    }

    #[test]
    fn test_empty_input_gives_no_data() {
        let empty = ImportedData {
            batch_id: "empty".to_string(),
            auto_intervals: Vec::new(),
            manual_intervals: Vec::new(),
            orders: Vec::new(),
            report: ParseReport::default(),
        };

        let snapshot = OeePipeline::default().run(empty);

        assert!(snapshot.reconciled_intervals().is_empty());
        assert_eq!(snapshot.overall_average(), &OverallAverage::default());
    }
}
