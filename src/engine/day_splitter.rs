// ==========================================
// 设备 OEE 分析系统 - 按日切分引擎
// ==========================================
// 职责: 将任意跨度区间切分为按自然日对齐的日切片
// 口径: 整秒占用，时长含两端 (diff_seconds + 1)
// 不变量:
// - 切片连续: 后一切片起点 = 前一切片终点 + 1s
// - 首切片起点 = 原起点，末切片终点 = 原终点
// - Σ切片时长 = 原区间含端时长
// ==========================================

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

// ==========================================
// DaySlice - 日切片
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DaySlice {
    pub date: NaiveDate,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// 切片时长 / 原区间时长，∈ (0, 1]
    pub proportion: f64,
}

impl DaySlice {
    /// 切片时长（秒，含两端）
    pub fn duration_seconds(&self) -> i64 {
        inclusive_seconds(self.start, self.end)
    }

    /// 按比例分摊数量字段
    pub fn allocate(&self, value: f64) -> f64 {
        value * self.proportion
    }
}

/// 含两端的秒数
pub fn inclusive_seconds(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_seconds() + 1
}

/// 当日 23:59:59
fn end_of_day(ts: NaiveDateTime) -> NaiveDateTime {
    ts.date().and_hms_opt(23, 59, 59).unwrap_or(ts)
}

// ==========================================
// DaySplitter - 按日切分引擎
// ==========================================
pub struct DaySplitter {
    // 无状态引擎
}

impl DaySplitter {
    pub fn new() -> Self {
        Self {}
    }

    /// 切分区间 [start, end]
    ///
    /// # 返回
    /// 按时间升序的日切片；end < start 时返回空
    ///
    /// # 说明
    /// 终点恰好为午夜 00:00:00 时，最后一秒单独成为次日切片，保证总时长守恒。
    pub fn split(&self, start: NaiveDateTime, end: NaiveDateTime) -> Vec<DaySlice> {
        if end < start {
            return Vec::new();
        }

        let total_seconds = inclusive_seconds(start, end) as f64;
        let mut slices = Vec::new();
        let mut cursor = start;

        while cursor <= end {
            let day_end = end_of_day(cursor);
            let chunk_end = if end < day_end { end } else { day_end };

            slices.push(DaySlice {
                date: cursor.date(),
                start: cursor,
                end: chunk_end,
                proportion: inclusive_seconds(cursor, chunk_end) as f64 / total_seconds,
            });

            cursor = chunk_end + Duration::seconds(1);
        }

        slices
    }
}

impl Default for DaySplitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(d: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn assert_complete(slices: &[DaySlice], start: NaiveDateTime, end: NaiveDateTime) {
        assert_eq!(slices.first().unwrap().start, start);
        assert_eq!(slices.last().unwrap().end, end);
        for pair in slices.windows(2) {
            assert_eq!(pair[1].start, pair[0].end + Duration::seconds(1));
        }
        let total: i64 = slices.iter().map(|s| s.duration_seconds()).sum();
        assert_eq!(total, inclusive_seconds(start, end));
        let proportion_sum: f64 = slices.iter().map(|s| s.proportion).sum();
        assert!((proportion_sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_day_yields_one_slice() {
        let splitter = DaySplitter::new();
        let slices = splitter.split(ts(1, 10, 0, 0), ts(1, 12, 0, 0));

        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].proportion, 1.0);
        assert_eq!(slices[0].duration_seconds(), 7201);
    }

    #[test]
    fn test_split_across_midnight() {
        let splitter = DaySplitter::new();
        let start = ts(1, 23, 0, 0);
        let end = ts(2, 1, 0, 0);
        let slices = splitter.split(start, end);

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(slices[0].end, ts(1, 23, 59, 59));
        assert_eq!(slices[0].duration_seconds(), 3600);
        assert_eq!(slices[1].start, ts(2, 0, 0, 0));
        assert_eq!(slices[1].duration_seconds(), 3601);
        assert_complete(&slices, start, end);
    }

    #[test]
    fn test_split_multi_day() {
        let splitter = DaySplitter::new();
        let start = ts(1, 12, 0, 0);
        let end = ts(4, 6, 30, 15);
        let slices = splitter.split(start, end);

        assert_eq!(slices.len(), 4);
        assert_eq!(slices[1].duration_seconds(), 86_400);
        assert_eq!(slices[2].duration_seconds(), 86_400);
        assert_complete(&slices, start, end);
    }

    #[test]
    fn test_end_exactly_at_midnight_keeps_last_second() {
        let splitter = DaySplitter::new();
        let start = ts(1, 23, 0, 0);
        let end = ts(2, 0, 0, 0);
        let slices = splitter.split(start, end);

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[1].start, end);
        assert_eq!(slices[1].end, end);
        assert_eq!(slices[1].duration_seconds(), 1);
        assert_complete(&slices, start, end);
    }

    #[test]
    fn test_allocation_is_conserved() {
        let splitter = DaySplitter::new();
        let slices = splitter.split(ts(1, 20, 15, 0), ts(3, 3, 45, 0));

        for value in [100.0, 90.0, 9.0, 36_000.0] {
            let allocated: f64 = slices.iter().map(|s| s.allocate(value)).sum();
            assert!((allocated - value).abs() < 1e-6);
        }
    }

    #[test]
    fn test_reversed_interval_is_empty() {
        let splitter = DaySplitter::new();
        assert!(splitter.split(ts(2, 0, 0, 0), ts(1, 0, 0, 0)).is_empty());
    }
}
