// ==========================================
// 设备 OEE 分析系统 - 生产工单领域模型
// ==========================================
// 职责: 原始工单记录 + 类型化生产工单
// 红线: end > start，否则整单跳过（不做部分处理）
// ==========================================

use crate::domain::types::EquipmentId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 字段映射后的原始工单记录（时间与数值仍为字符串）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProductionRecord {
    pub equipment_id: Option<String>,
    pub planned_duration_in_second: Option<String>,
    pub planned_quantity: Option<String>,
    pub actual_quantity: Option<String>,
    pub defect_quantity: Option<String>,
    pub start_production: Option<String>,
    pub finish_production: Option<String>,

    pub row_number: usize,
}

/// 生产工单
///
/// 数值字段均为非负实数，由导入阶段校验。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionOrder {
    pub equipment_id: EquipmentId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub planned_duration_seconds: f64,
    pub planned_quantity: f64,
    pub actual_quantity: f64,
    pub defect_quantity: f64,
}

impl ProductionOrder {
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// 工单总时长（秒，含两端）
    pub fn inclusive_duration_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds() + 1
    }
}
