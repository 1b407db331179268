// ==========================================
// 设备 OEE 分析系统 - 区间解析器
// ==========================================
// 阶段 2: 原始记录 → 类型化状态区间 / 生产工单
// 红线: 单条坏记录只丢弃该条，不终止整批；丢弃必须可观测（计数 + 日志）
// ==========================================

use crate::domain::interval::{RawStatusRecord, StatusInterval};
use crate::domain::production::{ProductionOrder, RawProductionRecord};
use crate::domain::types::{EquipmentId, EquipmentStatus, IntervalSource};
use crate::importer::error::RecordError;
use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;
use std::fmt;

// ==========================================
// RecordSource - 记录来源数据集
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    AutoStatus,
    ManualStatus,
    Production,
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSource::AutoStatus => write!(f, "auto_status"),
            RecordSource::ManualStatus => write!(f, "manual_status"),
            RecordSource::Production => write!(f, "production"),
        }
    }
}

impl From<IntervalSource> for RecordSource {
    fn from(source: IntervalSource) -> Self {
        match source {
            IntervalSource::Auto => RecordSource::AutoStatus,
            IntervalSource::Manual => RecordSource::ManualStatus,
        }
    }
}

/// 被丢弃的记录
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRecord {
    pub source: RecordSource,
    pub row_number: usize,
    pub message: String,
    pub is_parse_error: bool,
}

// ==========================================
// ParseReport - 解析报告
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseReport {
    pub accepted_auto: usize,
    pub accepted_manual: usize,
    pub accepted_orders: usize,
    pub rejected: Vec<RejectedRecord>,
}

impl ParseReport {
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    pub fn rejected_from(&self, source: RecordSource) -> usize {
        self.rejected.iter().filter(|r| r.source == source).count()
    }

    /// ParseError 类丢弃数（时间/数值/状态无法解析）
    pub fn parse_error_count(&self) -> usize {
        self.rejected.iter().filter(|r| r.is_parse_error).count()
    }

    /// InvalidInterval 类丢弃数（end <= start）
    pub fn invalid_interval_count(&self) -> usize {
        self.rejected.iter().filter(|r| !r.is_parse_error).count()
    }

    fn reject(&mut self, source: RecordSource, error: &RecordError) {
        tracing::warn!(
            source = %source,
            row = error.row(),
            error = %error,
            "记录解析失败，已丢弃"
        );
        self.rejected.push(RejectedRecord {
            source,
            row_number: error.row(),
            message: error.to_string(),
            is_parse_error: error.is_parse_error(),
        });
    }
}

// ==========================================
// IntervalParser - 区间解析器
// ==========================================
pub struct IntervalParser {
    timestamp_format: String,
}

impl IntervalParser {
    /// # 参数
    /// - timestamp_format: chrono 格式串，默认 `%Y/%m/%d %H:%M:%S`
    pub fn new(timestamp_format: impl Into<String>) -> Self {
        Self {
            timestamp_format: timestamp_format.into(),
        }
    }

    /// 批量解析状态记录，返回有效区间并将丢弃记录写入 report
    pub fn parse_status_records(
        &self,
        records: &[RawStatusRecord],
        source: IntervalSource,
        report: &mut ParseReport,
    ) -> Vec<StatusInterval> {
        let mut intervals = Vec::with_capacity(records.len());
        for record in records {
            match self.parse_status(record, source) {
                Ok(interval) => intervals.push(interval),
                Err(e) => report.reject(source.into(), &e),
            }
        }

        match source {
            IntervalSource::Auto => report.accepted_auto += intervals.len(),
            IntervalSource::Manual => report.accepted_manual += intervals.len(),
        }
        intervals
    }

    /// 批量解析工单记录
    pub fn parse_production_records(
        &self,
        records: &[RawProductionRecord],
        report: &mut ParseReport,
    ) -> Vec<ProductionOrder> {
        let mut orders = Vec::with_capacity(records.len());
        for record in records {
            match self.parse_production(record) {
                Ok(order) => orders.push(order),
                Err(e) => report.reject(RecordSource::Production, &e),
            }
        }
        report.accepted_orders += orders.len();
        orders
    }

    /// 解析单条状态记录
    pub fn parse_status(
        &self,
        record: &RawStatusRecord,
        source: IntervalSource,
    ) -> Result<StatusInterval, RecordError> {
        let row = record.row_number;

        let equipment_id = parse_equipment_id(record.equipment_id.as_deref(), row)?;

        let status_raw = required(record.status.as_deref(), "status", row)?;
        let status = status_raw
            .parse::<EquipmentStatus>()
            .map_err(|_| RecordError::UnknownStatus {
                row,
                value: status_raw.to_string(),
            })?;

        let start = self.parse_timestamp(record.start_time.as_deref(), "start_time", row)?;
        let end = self.parse_timestamp(record.end_time.as_deref(), "end_time", row)?;
        ensure_ordered(start, end, row)?;

        Ok(StatusInterval {
            equipment_id,
            status,
            reason: record.reason.clone().filter(|r| !r.trim().is_empty()),
            start,
            end,
            source,
        })
    }

    /// 解析单条工单记录
    ///
    /// 数值字段缺失按 0 处理；负数视为解析错误。
    pub fn parse_production(
        &self,
        record: &RawProductionRecord,
    ) -> Result<ProductionOrder, RecordError> {
        let row = record.row_number;

        let equipment_id = parse_equipment_id(record.equipment_id.as_deref(), row)?;
        let start =
            self.parse_timestamp(record.start_production.as_deref(), "start_production", row)?;
        let end =
            self.parse_timestamp(record.finish_production.as_deref(), "finish_production", row)?;
        ensure_ordered(start, end, row)?;

        Ok(ProductionOrder {
            equipment_id,
            start,
            end,
            planned_duration_seconds: parse_quantity(
                record.planned_duration_in_second.as_deref(),
                "planned_duration_in_second",
                row,
            )?,
            planned_quantity: parse_quantity(
                record.planned_quantity.as_deref(),
                "planned_quantity",
                row,
            )?,
            actual_quantity: parse_quantity(
                record.actual_quantity.as_deref(),
                "actual_quantity",
                row,
            )?,
            defect_quantity: parse_quantity(
                record.defect_quantity.as_deref(),
                "defect_quantity",
                row,
            )?,
        })
    }

    fn parse_timestamp(
        &self,
        value: Option<&str>,
        field: &str,
        row: usize,
    ) -> Result<NaiveDateTime, RecordError> {
        let raw = required(value, field, row)?;
        let invalid = || RecordError::InvalidTimestamp {
            row,
            field: field.to_string(),
            value: raw.to_string(),
        };

        let ts = NaiveDateTime::parse_from_str(raw.trim(), &self.timestamp_format)
            .map_err(|_| invalid())?;
        // 闰秒 (:60) 以 nanosecond >= 1e9 表示，无法按整秒计时
        if ts.nanosecond() >= 1_000_000_000 {
            return Err(invalid());
        }
        Ok(ts)
    }
}

impl Default for IntervalParser {
    fn default() -> Self {
        Self::new(crate::config::config_manager::config_defaults::TIMESTAMP_FORMAT)
    }
}

fn required<'a>(value: Option<&'a str>, field: &str, row: usize) -> Result<&'a str, RecordError> {
    value.ok_or_else(|| RecordError::MissingField {
        row,
        field: field.to_string(),
    })
}

fn ensure_ordered(start: NaiveDateTime, end: NaiveDateTime, row: usize) -> Result<(), RecordError> {
    if end <= start {
        return Err(RecordError::InvalidInterval {
            row,
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

/// 设备编号: 接受整数或整值浮点（Excel 单元格可能读出 "1.0"）
fn parse_equipment_id(value: Option<&str>, row: usize) -> Result<EquipmentId, RecordError> {
    let raw = required(value, "equipment_id", row)?.trim();
    if let Ok(id) = raw.parse::<EquipmentId>() {
        return Ok(id);
    }

    match raw.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 => {
            Ok(v as EquipmentId)
        }
        _ => Err(RecordError::InvalidNumber {
            row,
            field: "equipment_id".to_string(),
            value: raw.to_string(),
        }),
    }
}

fn parse_quantity(value: Option<&str>, field: &str, row: usize) -> Result<f64, RecordError> {
    let raw = match value {
        Some(v) => v.trim(),
        None => return Ok(0.0),
    };

    let parsed = raw.parse::<f64>().map_err(|_| RecordError::InvalidNumber {
        row,
        field: field.to_string(),
        value: raw.to_string(),
    })?;

    if !parsed.is_finite() {
        return Err(RecordError::InvalidNumber {
            row,
            field: field.to_string(),
            value: raw.to_string(),
        });
    }
    if parsed < 0.0 {
        return Err(RecordError::NegativeQuantity {
            row,
            field: field.to_string(),
            value: parsed,
        });
    }
    Ok(parsed)
}
