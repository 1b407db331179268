// ==========================================
// 设备 OEE 分析系统 - OEE 查询 API
// ==========================================
// 职责: 在只读分析快照之上提供查询、文本报表与 JSON 导出
// 架构: API 层 → Engine 层 (OeePipeline) → Importer 层 (DataLoader)
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::report::{format_downtime_table, format_oee_table};
use crate::config::{ConfigManager, EngineConfig};
use crate::domain::metrics::{DailyMetrics, DowntimeBucket, EquipmentAverage, OverallAverage};
use crate::domain::types::{DowntimeUnit, EquipmentId};
use crate::engine::orchestrator::{AnalysisSnapshot, OeePipeline};
use crate::engine::reconciler::ReconcileStats;
use crate::importer::DataLoader;
use serde::Serialize;
use tracing::{info, instrument};

/// 运行摘要
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub batch_id: String,
    pub accepted_auto: usize,
    pub accepted_manual: usize,
    pub accepted_orders: usize,
    pub parse_errors: usize,
    pub invalid_intervals: usize,
    pub skipped_orders: usize,
    pub reconcile: ReconcileStats,
    pub equipment_count: usize,
    pub downtime_buckets: usize,
    pub daily_records: usize,
    pub overall: OverallAverage,
}

/// 校验设备过滤参数
pub fn validate_equipment_filter(filter: Option<EquipmentId>) -> ApiResult<Option<EquipmentId>> {
    match filter {
        Some(id) if id < 0 => Err(ApiError::InvalidInput(format!(
            "设备编号不能为负数: {}",
            id
        ))),
        other => Ok(other),
    }
}

// ==========================================
// OeeApi - OEE 查询 API
// ==========================================
pub struct OeeApi {
    snapshot: AnalysisSnapshot,
    report_unit: DowntimeUnit,
}

impl OeeApi {
    /// 按配置装载输入并完成一次分析
    ///
    /// # 参数
    /// - config: 引擎配置（输入文件路径、时间格式、停机原因缺省值、报表单位）
    ///
    /// # 返回
    /// - Ok(OeeApi): 持有分析快照的 API
    /// - Err(ApiError): 输入文件无法读取或格式不支持
    #[instrument(skip(config))]
    pub fn from_config(config: &EngineConfig) -> ApiResult<Self> {
        let data = DataLoader::new(config).load_all(config)?;
        let snapshot = OeePipeline::from_config(config).run(data);
        info!(run_id = %snapshot.run_id, "分析快照就绪");
        Ok(Self::from_snapshot(snapshot, config.downtime_report_unit))
    }

    /// 从配置管理器读取引擎配置后完成一次分析
    ///
    /// # 返回
    /// - Err(ApiError::Config): 配置值无效（如未知的报表单位）
    /// - Err(ApiError::Import): 输入文件无法读取或格式不支持
    pub fn from_config_manager(manager: &ConfigManager) -> ApiResult<Self> {
        let config = EngineConfig::from_reader(manager)?;
        Self::from_config(&config)
    }

    pub fn from_snapshot(snapshot: AnalysisSnapshot, report_unit: DowntimeUnit) -> Self {
        Self {
            snapshot,
            report_unit,
        }
    }

    pub fn snapshot(&self) -> &AnalysisSnapshot {
        &self.snapshot
    }

    // ==========================================
    // 结构化查询
    // ==========================================

    /// 停机桶（可按设备过滤，时长单位为秒）
    pub fn downtime_buckets(&self, equipment: Option<EquipmentId>) -> ApiResult<Vec<DowntimeBucket>> {
        let equipment = validate_equipment_filter(equipment)?;
        Ok(self
            .snapshot
            .downtime_buckets(equipment)
            .into_iter()
            .cloned()
            .collect())
    }

    /// 设备-日指标（可按设备过滤）
    pub fn daily_metrics(&self, equipment: Option<EquipmentId>) -> ApiResult<Vec<DailyMetrics>> {
        let equipment = validate_equipment_filter(equipment)?;
        Ok(self
            .snapshot
            .daily_metrics(equipment)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn equipment_averages(&self) -> Vec<EquipmentAverage> {
        self.snapshot.equipment_averages().to_vec()
    }

    pub fn overall_average(&self) -> OverallAverage {
        self.snapshot.overall_average().clone()
    }

    pub fn summary(&self) -> RunSummary {
        let s = &self.snapshot;
        RunSummary {
            run_id: s.run_id.clone(),
            batch_id: s.batch_id.clone(),
            accepted_auto: s.parse_report.accepted_auto,
            accepted_manual: s.parse_report.accepted_manual,
            accepted_orders: s.parse_report.accepted_orders,
            parse_errors: s.parse_report.parse_error_count(),
            invalid_intervals: s.parse_report.invalid_interval_count(),
            skipped_orders: s.skipped_orders,
            reconcile: s.reconcile_stats.clone(),
            equipment_count: s.equipment_ids().len(),
            downtime_buckets: s.downtime.len(),
            daily_records: s.daily.len(),
            overall: s.overall.clone(),
        }
    }

    // ==========================================
    // 文本报表
    // ==========================================

    pub fn downtime_report(&self, equipment: Option<EquipmentId>) -> ApiResult<String> {
        let equipment = validate_equipment_filter(equipment)?;
        Ok(format_downtime_table(
            self.snapshot.downtime_buckets(equipment),
            self.report_unit,
        ))
    }

    pub fn oee_report(&self) -> String {
        format_oee_table(&self.snapshot.daily)
    }

    pub fn summary_report(&self) -> String {
        let s = self.summary();
        let fmt_metric = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |x| format!("{:.2}", x));
        format!(
            "Run: {}\nBatch: {}\n\
             Records: auto={} manual={} orders={} (parse errors={}, invalid intervals={}, skipped orders={})\n\
             Reconcile: retained={} overridden={} discarded={} chained={}\n\
             Outputs: equipment={} downtime buckets={} daily records={}\n\
             Overall: A={} P={} Q={} OEE={} Category={}\n",
            s.run_id,
            s.batch_id,
            s.accepted_auto,
            s.accepted_manual,
            s.accepted_orders,
            s.parse_errors,
            s.invalid_intervals,
            s.skipped_orders,
            s.reconcile.retained,
            s.reconcile.overridden,
            s.reconcile.discarded,
            s.reconcile.chained_overlaps,
            s.equipment_count,
            s.downtime_buckets,
            s.daily_records,
            fmt_metric(s.overall.availability),
            fmt_metric(s.overall.performance),
            fmt_metric(s.overall.quality),
            fmt_metric(s.overall.oee),
            s.overall.category,
        )
    }

    // ==========================================
    // JSON 导出
    // ==========================================

    pub fn export_downtime_json(&self, equipment: Option<EquipmentId>) -> ApiResult<String> {
        Ok(serde_json::to_string_pretty(&self.downtime_buckets(equipment)?)?)
    }

    pub fn export_daily_json(&self, equipment: Option<EquipmentId>) -> ApiResult<String> {
        Ok(serde_json::to_string_pretty(&self.daily_metrics(equipment)?)?)
    }

    pub fn export_equipment_json(&self) -> ApiResult<String> {
        Ok(serde_json::to_string_pretty(self.snapshot.equipment_averages())?)
    }

    pub fn export_overall_json(&self) -> ApiResult<String> {
        Ok(serde_json::to_string_pretty(self.snapshot.overall_average())?)
    }

    pub fn export_summary_json(&self) -> ApiResult<String> {
        Ok(serde_json::to_string_pretty(&self.summary())?)
    }

    /// 完整快照（含对账后区间与解析报告）
    pub fn export_snapshot_json(&self) -> ApiResult<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_equipment_filter() {
        assert_eq!(validate_equipment_filter(None).unwrap(), None);
        assert_eq!(validate_equipment_filter(Some(0)).unwrap(), Some(0));
        assert!(validate_equipment_filter(Some(-3)).is_err());
    }
}
