// ==========================================
// 设备 OEE 分析系统 - 停机聚合引擎
// ==========================================
// 职责: 对账后 DOWN 区间 → 按 (设备, 日期, 原因) 累计停机时长
// 口径: 内部统一以秒（含两端）累计，展示单位由配置决定
// 依赖: DaySplitter
// ==========================================

use crate::domain::interval::StatusInterval;
use crate::domain::metrics::{DowntimeBucket, DowntimeKey};
use crate::domain::types::EquipmentStatus;
use crate::engine::day_splitter::DaySplitter;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

pub struct DowntimeAggregator {
    default_reason: String,
    splitter: DaySplitter,
}

impl DowntimeAggregator {
    /// # 参数
    /// - default_reason: 原因为空时使用的桶名（默认 "Status Down"）
    pub fn new(default_reason: impl Into<String>) -> Self {
        Self {
            default_reason: default_reason.into(),
            splitter: DaySplitter::new(),
        }
    }

    /// 累计停机桶
    ///
    /// # 返回
    /// 按 (设备, 日期, 原因) 有序的停机桶
    #[instrument(skip_all, fields(intervals = intervals.len()))]
    pub fn aggregate(&self, intervals: &[StatusInterval]) -> BTreeMap<DowntimeKey, DowntimeBucket> {
        let mut buckets: BTreeMap<DowntimeKey, DowntimeBucket> = BTreeMap::new();

        for interval in intervals
            .iter()
            .filter(|i| i.status == EquipmentStatus::Down)
        {
            let reason = interval
                .reason
                .clone()
                .unwrap_or_else(|| self.default_reason.clone());

            for slice in self.splitter.split(interval.start, interval.end) {
                let key = DowntimeKey {
                    equipment_id: interval.equipment_id,
                    date: slice.date,
                    reason: reason.clone(),
                };
                buckets
                    .entry(key)
                    .or_insert_with_key(DowntimeBucket::new)
                    .total_occurrence_seconds += slice.duration_seconds();
            }
        }

        debug!(buckets = buckets.len(), "停机桶聚合完成");
        buckets
    }
}

impl Default for DowntimeAggregator {
    fn default() -> Self {
        Self::new(crate::config::config_manager::config_defaults::DEFAULT_DOWN_REASON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::IntervalSource;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn down(equipment_id: i64, reason: Option<&str>, start: NaiveDateTime, end: NaiveDateTime) -> StatusInterval {
        StatusInterval {
            equipment_id,
            status: EquipmentStatus::Down,
            reason: reason.map(|r| r.to_string()),
            start,
            end,
            source: IntervalSource::Auto,
        }
    }

    fn key(equipment_id: i64, d: u32, reason: &str) -> DowntimeKey {
        DowntimeKey {
            equipment_id,
            date: NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
            reason: reason.to_string(),
        }
    }

    #[test]
    fn test_down_interval_split_at_midnight() {
        let intervals = vec![down(1, Some("jam"), ts(1, 23, 0), ts(2, 1, 0))];

        let buckets = DowntimeAggregator::default().aggregate(&intervals);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[&key(1, 1, "jam")].total_occurrence_seconds, 3600);
        assert_eq!(buckets[&key(1, 2, "jam")].total_occurrence_seconds, 3601);
    }

    #[test]
    fn test_missing_reason_uses_default() {
        let intervals = vec![down(3, None, ts(1, 8, 0), ts(1, 8, 10))];

        let buckets = DowntimeAggregator::default().aggregate(&intervals);

        assert_eq!(buckets[&key(3, 1, "Status Down")].total_occurrence_seconds, 601);
    }

    #[test]
    fn test_buckets_accumulate_and_ignore_other_status() {
        let mut running = down(1, Some("jam"), ts(1, 12, 0), ts(1, 13, 0));
        running.status = EquipmentStatus::Running;
        let intervals = vec![
            down(1, Some("jam"), ts(1, 8, 0), ts(1, 8, 1)),
            down(1, Some("jam"), ts(1, 9, 0), ts(1, 9, 1)),
            running,
        ];

        let buckets = DowntimeAggregator::default().aggregate(&intervals);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[&key(1, 1, "jam")].total_occurrence_seconds, 122);
    }

    #[test]
    fn test_reason_with_separator_characters_stays_distinct() {
        let intervals = vec![
            down(1, Some("a|b"), ts(1, 8, 0), ts(1, 8, 1)),
            down(1, Some("a"), ts(1, 9, 0), ts(1, 9, 1)),
        ];

        let buckets = DowntimeAggregator::new("n/a").aggregate(&intervals);

        assert_eq!(buckets.len(), 2);
    }
}
