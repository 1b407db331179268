// ==========================================
// 设备 OEE 分析系统 - 状态区间领域模型
// ==========================================
// 职责: 原始状态记录 + 类型化状态区间
// 红线: start < end，否则记录无效并丢弃
// ==========================================

use crate::domain::types::{EquipmentId, EquipmentStatus, IntervalSource};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// RawStatusRecord - 原始状态记录
// ==========================================
// 用途: 字段映射后的中间结构（时间仍为字符串）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStatusRecord {
    pub equipment_id: Option<String>,
    pub status: Option<String>,
    pub reason: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,

    // ===== 元信息 =====
    pub row_number: usize,
}

// ==========================================
// StatusInterval - 设备状态区间
// ==========================================
// source 在导入时确定；对账时 status/reason/source 可被人工记录覆写，
// start/end 永不改变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusInterval {
    pub equipment_id: EquipmentId,
    pub status: EquipmentStatus,
    pub reason: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub source: IntervalSource,
}

impl StatusInterval {
    /// 半开区间重叠判定: self.start < other.end && self.end > other.start
    pub fn overlaps(&self, other: &StatusInterval) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// 是否与时间窗口 [window_start, window_end] 相交
    pub fn intersects_window(&self, window_start: NaiveDateTime, window_end: NaiveDateTime) -> bool {
        self.end > window_start && self.start < window_end
    }

    /// 用人工记录覆写分类（保持起止时间不变）
    pub fn apply_override(&mut self, manual: &StatusInterval) {
        self.status = manual.status;
        self.reason = manual.reason.clone();
        self.source = IntervalSource::Manual;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn interval(start: NaiveDateTime, end: NaiveDateTime, source: IntervalSource) -> StatusInterval {
        StatusInterval {
            equipment_id: 1,
            status: EquipmentStatus::Down,
            reason: Some("jam".to_string()),
            start,
            end,
            source,
        }
    }

    #[test]
    fn test_overlap_is_half_open() {
        let a = interval(ts(10, 0), ts(11, 0), IntervalSource::Auto);
        let touching = interval(ts(11, 0), ts(12, 0), IntervalSource::Manual);
        let inside = interval(ts(10, 30), ts(10, 45), IntervalSource::Manual);

        assert!(!a.overlaps(&touching));
        assert!(!touching.overlaps(&a));
        assert!(a.overlaps(&inside));
    }

    #[test]
    fn test_apply_override_keeps_span() {
        let mut auto = interval(ts(10, 0), ts(12, 0), IntervalSource::Auto);
        let mut manual = interval(ts(10, 30), ts(11, 30), IntervalSource::Manual);
        manual.status = EquipmentStatus::Running;
        manual.reason = None;

        auto.apply_override(&manual);

        assert_eq!(auto.status, EquipmentStatus::Running);
        assert_eq!(auto.reason, None);
        assert_eq!(auto.source, IntervalSource::Manual);
        assert_eq!(auto.start, ts(10, 0));
        assert_eq!(auto.end, ts(12, 0));
    }
}
