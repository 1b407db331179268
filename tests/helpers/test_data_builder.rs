// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use equipment_oee::domain::interval::StatusInterval;
use equipment_oee::domain::production::ProductionOrder;
use equipment_oee::domain::types::{EquipmentId, EquipmentStatus, IntervalSource};
use equipment_oee::importer::{ImportedData, ParseReport};

pub const EPS: f64 = 1e-9;

/// "2024/01/01 10:00:00" 格式的时间戳
pub fn ts(raw: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(raw, "%Y/%m/%d %H:%M:%S").unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ==========================================
// StatusInterval 构建器
// ==========================================

pub struct IntervalBuilder {
    equipment_id: EquipmentId,
    status: EquipmentStatus,
    reason: Option<String>,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl IntervalBuilder {
    pub fn new(equipment_id: EquipmentId, status: EquipmentStatus) -> Self {
        Self {
            equipment_id,
            status,
            reason: None,
            start: ts("2024/01/01 00:00:00"),
            end: ts("2024/01/01 01:00:00"),
        }
    }

    pub fn reason(mut self, reason: &str) -> Self {
        self.reason = Some(reason.to_string());
        self
    }

    pub fn span(mut self, start: &str, end: &str) -> Self {
        self.start = ts(start);
        self.end = ts(end);
        self
    }

    pub fn auto(self) -> StatusInterval {
        self.build(IntervalSource::Auto)
    }

    pub fn manual(self) -> StatusInterval {
        self.build(IntervalSource::Manual)
    }

    fn build(self, source: IntervalSource) -> StatusInterval {
        StatusInterval {
            equipment_id: self.equipment_id,
            status: self.status,
            reason: self.reason,
            start: self.start,
            end: self.end,
            source,
        }
    }
}

// ==========================================
// ProductionOrder 构建器
// ==========================================

pub struct OrderBuilder {
    equipment_id: EquipmentId,
    start: NaiveDateTime,
    end: NaiveDateTime,
    planned_duration_seconds: f64,
    planned_quantity: f64,
    actual_quantity: f64,
    defect_quantity: f64,
}

impl OrderBuilder {
    pub fn new(equipment_id: EquipmentId) -> Self {
        Self {
            equipment_id,
            start: ts("2024/01/01 08:00:00"),
            end: ts("2024/01/01 09:00:00"),
            planned_duration_seconds: 3600.0,
            planned_quantity: 100.0,
            actual_quantity: 90.0,
            defect_quantity: 9.0,
        }
    }

    pub fn span(mut self, start: &str, end: &str) -> Self {
        self.start = ts(start);
        self.end = ts(end);
        self
    }

    pub fn planned(mut self, duration_seconds: f64, quantity: f64) -> Self {
        self.planned_duration_seconds = duration_seconds;
        self.planned_quantity = quantity;
        self
    }

    pub fn actual(mut self, quantity: f64, defects: f64) -> Self {
        self.actual_quantity = quantity;
        self.defect_quantity = defects;
        self
    }

    pub fn build(self) -> ProductionOrder {
        ProductionOrder {
            equipment_id: self.equipment_id,
            start: self.start,
            end: self.end,
            planned_duration_seconds: self.planned_duration_seconds,
            planned_quantity: self.planned_quantity,
            actual_quantity: self.actual_quantity,
            defect_quantity: self.defect_quantity,
        }
    }
}

// ==========================================
// ImportedData 构建器
// ==========================================

#[derive(Default)]
pub struct DataBuilder {
    auto: Vec<StatusInterval>,
    manual: Vec<StatusInterval>,
    orders: Vec<ProductionOrder>,
}

impl DataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn auto(mut self, interval: StatusInterval) -> Self {
        self.auto.push(interval);
        self
    }

    pub fn manual(mut self, interval: StatusInterval) -> Self {
        self.manual.push(interval);
        self
    }

    pub fn order(mut self, order: ProductionOrder) -> Self {
        self.orders.push(order);
        self
    }

    pub fn build(self) -> ImportedData {
        ImportedData {
            batch_id: "test-batch".to_string(),
            auto_intervals: self.auto,
            manual_intervals: self.manual,
            orders: self.orders,
            report: ParseReport::default(),
        }
    }
}
