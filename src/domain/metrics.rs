// ==========================================
// 设备 OEE 分析系统 - 指标聚合对象
// ==========================================
// 职责: 停机桶 / 设备-日指标 / 设备均值 / 全局均值
// 红线: A/P/Q/OEE 为 Option<f64>，"无数据" 与 0 严格区分
// ==========================================

use crate::domain::types::{EquipmentId, OeeCategory};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// DowntimeKey / DowntimeBucket - 停机桶
// ==========================================
// 复合键使用结构体，不拼接字符串（原因字段可能包含任意分隔符）
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DowntimeKey {
    pub equipment_id: EquipmentId,
    pub date: NaiveDate,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DowntimeBucket {
    pub equipment_id: EquipmentId,
    pub date: NaiveDate,
    pub reason: String,
    /// 累计停机时长（秒，含两端）
    pub total_occurrence_seconds: i64,
}

impl DowntimeBucket {
    pub fn new(key: &DowntimeKey) -> Self {
        Self {
            equipment_id: key.equipment_id,
            date: key.date,
            reason: key.reason.clone(),
            total_occurrence_seconds: 0,
        }
    }
}

// ==========================================
// DailyKey / DailyMetrics - 设备-日指标
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DailyKey {
    pub equipment_id: EquipmentId,
    pub date: NaiveDate,
}

/// 设备-日 (equipment_id × date) 指标
///
/// 生命周期: 首个工单日切片到来时创建 → 逐切片累加 → 全部工单处理完后一次性计算派生指标。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    pub equipment_id: EquipmentId,
    pub date: NaiveDate,

    // ===== 状态时间（秒） =====
    pub running_seconds: i64,
    pub idle_seconds: i64,
    pub down_seconds: i64,
    pub total_time_seconds: i64,

    // ===== 按比例分摊的工单字段 =====
    pub sum_planned_duration: f64,
    pub sum_planned_quantity: f64,
    pub sum_actual_duration: f64,
    pub sum_actual_quantity: f64,
    pub sum_defect_quantity: f64,

    // ===== 派生指标 =====
    pub availability: Option<f64>,
    pub performance: Option<f64>,
    pub quality: Option<f64>,
    pub oee: Option<f64>,
    pub category: OeeCategory,
}

impl DailyMetrics {
    pub fn new(key: DailyKey) -> Self {
        Self {
            equipment_id: key.equipment_id,
            date: key.date,
            running_seconds: 0,
            idle_seconds: 0,
            down_seconds: 0,
            total_time_seconds: 0,
            sum_planned_duration: 0.0,
            sum_planned_quantity: 0.0,
            sum_actual_duration: 0.0,
            sum_actual_quantity: 0.0,
            sum_defect_quantity: 0.0,
            availability: None,
            performance: None,
            quality: None,
            oee: None,
            category: OeeCategory::NoData,
        }
    }
}

// ==========================================
// EquipmentAverage - 设备均值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentAverage {
    pub equipment_id: EquipmentId,
    pub avg_availability: Option<f64>,
    pub avg_performance: Option<f64>,
    pub avg_quality: Option<f64>,
    /// avgA × avgP × avgQ（任一为空则为空）
    pub oee: Option<f64>,
    pub category: OeeCategory,
    /// 参与统计的设备-日数量
    pub day_count: usize,
}

// ==========================================
// OverallAverage - 全局均值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallAverage {
    pub availability: Option<f64>,
    pub performance: Option<f64>,
    pub quality: Option<f64>,
    pub oee: Option<f64>,
    pub category: OeeCategory,
    pub equipment_count: usize,
}

impl Default for OverallAverage {
    fn default() -> Self {
        Self {
            availability: None,
            performance: None,
            quality: None,
            oee: None,
            category: OeeCategory::NoData,
            equipment_count: 0,
        }
    }
}
