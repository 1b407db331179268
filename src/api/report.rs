// ==========================================
// 设备 OEE 分析系统 - 文本报表
// ==========================================
// 职责: 停机表 / OEE 表的纯文本渲染（列以 " | " 分隔）
// ==========================================

use crate::domain::metrics::{DailyMetrics, DowntimeBucket};
use crate::domain::types::DowntimeUnit;
use std::fmt::Write;

const DOWNTIME_RULE_WIDTH: usize = 45;
const OEE_RULE_WIDTH: usize = 60;

fn format_duration(seconds: i64, unit: DowntimeUnit) -> String {
    match unit {
        DowntimeUnit::Second => seconds.to_string(),
        DowntimeUnit::Minute => format!("{:.2}", unit.convert(seconds)),
    }
}

/// 停机表
///
/// 每行以换行结尾；表头单位随 unit 变化。
pub fn format_downtime_table<'a, I>(buckets: I, unit: DowntimeUnit) -> String
where
    I: IntoIterator<Item = &'a DowntimeBucket>,
{
    let mut out = format!(
        "Equipment | Date | Reason | Total Occurrence ({})\n{}\n",
        unit.short_label(),
        "-".repeat(DOWNTIME_RULE_WIDTH)
    );
    for bucket in buckets {
        let _ = writeln!(
            out,
            "{} | {} | {} | {}",
            bucket.equipment_id,
            bucket.date,
            bucket.reason,
            format_duration(bucket.total_occurrence_seconds, unit)
        );
    }
    out
}

/// OEE 表
///
/// 只列出 OEE 非空的设备-日，数值保留两位小数。
pub fn format_oee_table<'a, I>(daily: I) -> String
where
    I: IntoIterator<Item = &'a DailyMetrics>,
{
    let header = format!(
        "Equipment | Date | A | P | Q | OEE | Category\n{}\n",
        "-".repeat(OEE_RULE_WIDTH)
    );

    let rows: Vec<String> = daily
        .into_iter()
        .filter_map(|m| {
            // OEE 非空意味着 A/P/Q 均非空
            let (a, p, q, oee) = (m.availability?, m.performance?, m.quality?, m.oee?);
            Some(format!(
                "{:<2} | {} | {:<4.2} | {:<4.2} | {:<4.2} | {:<4.2} | {}",
                m.equipment_id, m.date, a, p, q, oee, m.category
            ))
        })
        .collect();

    header + &rows.join("\n")
}
