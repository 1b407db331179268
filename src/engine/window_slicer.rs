// ==========================================
// 设备 OEE 分析系统 - 状态窗口切片器
// ==========================================
// 职责: 取工单窗口内的对账区间，裁剪到窗口边界并按状态累计秒数
// 红线: OFFLINE 秒数不计入任何累加器
// ==========================================

use crate::domain::interval::StatusInterval;
use crate::domain::types::{EquipmentId, EquipmentStatus};
use crate::engine::day_splitter::inclusive_seconds;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;

/// 窗口内按状态累计的秒数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusDurations {
    pub running: i64,
    pub idle: i64,
    pub down: i64,
}

impl StatusDurations {
    pub fn total(&self) -> i64 {
        self.running + self.idle + self.down
    }
}

/// 裁剪到窗口内的区间片段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClippedStatus {
    pub status: EquipmentStatus,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ClippedStatus {
    pub fn duration_seconds(&self) -> i64 {
        inclusive_seconds(self.start, self.end)
    }
}

// ==========================================
// StatusWindowSlicer - 按设备索引的只读视图
// ==========================================
pub struct StatusWindowSlicer<'a> {
    by_equipment: HashMap<EquipmentId, Vec<&'a StatusInterval>>,
}

impl<'a> StatusWindowSlicer<'a> {
    pub fn new(intervals: &'a [StatusInterval]) -> Self {
        let mut by_equipment: HashMap<EquipmentId, Vec<&'a StatusInterval>> = HashMap::new();
        for interval in intervals {
            by_equipment
                .entry(interval.equipment_id)
                .or_default()
                .push(interval);
        }
        Self { by_equipment }
    }

    /// 与窗口 [window_start, window_end] 相交的区间，裁剪后返回
    pub fn slice(
        &self,
        equipment_id: EquipmentId,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> Vec<ClippedStatus> {
        let Some(intervals) = self.by_equipment.get(&equipment_id) else {
            return Vec::new();
        };

        intervals
            .iter()
            .filter(|i| i.intersects_window(window_start, window_end))
            .map(|i| ClippedStatus {
                status: i.status,
                start: i.start.max(window_start),
                end: i.end.min(window_end),
            })
            .collect()
    }

    /// 窗口内 RUNNING / IDLE / DOWN 秒数
    pub fn durations(
        &self,
        equipment_id: EquipmentId,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
    ) -> StatusDurations {
        let mut durations = StatusDurations::default();
        for clipped in self.slice(equipment_id, window_start, window_end) {
            let seconds = clipped.duration_seconds();
            match clipped.status {
                EquipmentStatus::Running => durations.running += seconds,
                EquipmentStatus::Idle => durations.idle += seconds,
                EquipmentStatus::Down => durations.down += seconds,
                EquipmentStatus::Offline => {}
            }
        }
        durations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::IntervalSource;
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn interval(status: EquipmentStatus, start: NaiveDateTime, end: NaiveDateTime) -> StatusInterval {
        StatusInterval {
            equipment_id: 1,
            status,
            reason: None,
            start,
            end,
            source: IntervalSource::Auto,
        }
    }

    #[test]
    fn test_intervals_are_clipped_to_window() {
        let intervals = vec![interval(EquipmentStatus::Running, ts(7, 0), ts(12, 0))];
        let slicer = StatusWindowSlicer::new(&intervals);

        let clipped = slicer.slice(1, ts(8, 0), ts(9, 0));

        assert_eq!(clipped.len(), 1);
        assert_eq!(clipped[0].start, ts(8, 0));
        assert_eq!(clipped[0].end, ts(9, 0));
        assert_eq!(clipped[0].duration_seconds(), 3601);
    }

    #[test]
    fn test_durations_by_status_exclude_offline() {
        let intervals = vec![
            interval(EquipmentStatus::Running, ts(8, 0), ts(8, 30)),
            interval(EquipmentStatus::Idle, ts(8, 30), ts(8, 40)),
            interval(EquipmentStatus::Down, ts(8, 40), ts(8, 50)),
            interval(EquipmentStatus::Offline, ts(8, 50), ts(9, 0)),
        ];
        let slicer = StatusWindowSlicer::new(&intervals);

        let durations = slicer.durations(1, ts(8, 0), ts(9, 0));

        assert_eq!(durations.running, 1801);
        assert_eq!(durations.idle, 601);
        assert_eq!(durations.down, 601);
        assert_eq!(durations.total(), 3003);
    }

    #[test]
    fn test_touching_window_edge_is_excluded() {
        let intervals = vec![
            interval(EquipmentStatus::Running, ts(6, 0), ts(8, 0)),
            interval(EquipmentStatus::Running, ts(9, 0), ts(10, 0)),
        ];
        let slicer = StatusWindowSlicer::new(&intervals);

        assert!(slicer.slice(1, ts(8, 0), ts(9, 0)).is_empty());
    }

    #[test]
    fn test_unknown_equipment_is_empty() {
        let intervals = vec![interval(EquipmentStatus::Running, ts(6, 0), ts(8, 0))];
        let slicer = StatusWindowSlicer::new(&intervals);

        assert_eq!(slicer.durations(42, ts(6, 0), ts(8, 0)), StatusDurations::default());
    }
}
