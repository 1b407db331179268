// ==========================================
// 设备 OEE 分析系统 - 汇总引擎
// ==========================================
// 职责: 设备-日指标 → 设备均值 → 全局均值
// 口径: A/P/Q 按列独立求非空均值（空列 → None），不做跨列空值传播
// ==========================================

use crate::domain::metrics::{DailyMetrics, EquipmentAverage, OverallAverage};
use crate::domain::types::{EquipmentId, OeeCategory};
use crate::engine::oee_calculator::combine_oee;
use std::collections::BTreeMap;

/// 算术平均（空切片 → None）
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// 三列非空值收集器
#[derive(Default)]
struct ColumnValues {
    availability: Vec<f64>,
    performance: Vec<f64>,
    quality: Vec<f64>,
    rows: usize,
}

impl ColumnValues {
    fn push(&mut self, a: Option<f64>, p: Option<f64>, q: Option<f64>) {
        self.availability.extend(a);
        self.performance.extend(p);
        self.quality.extend(q);
        self.rows += 1;
    }

    fn is_empty(&self) -> bool {
        self.availability.is_empty() && self.performance.is_empty() && self.quality.is_empty()
    }

    fn means(&self) -> (Option<f64>, Option<f64>, Option<f64>) {
        (
            mean(&self.availability),
            mean(&self.performance),
            mean(&self.quality),
        )
    }
}

pub struct RollupAggregator {
    // 无状态引擎
}

impl RollupAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// 设备均值（按设备编号升序）
    ///
    /// 所有日记录 A/P/Q 均为空的设备不产生均值记录。
    pub fn equipment_averages<'a, I>(&self, daily: I) -> Vec<EquipmentAverage>
    where
        I: IntoIterator<Item = &'a DailyMetrics>,
    {
        let mut grouped: BTreeMap<EquipmentId, ColumnValues> = BTreeMap::new();
        for m in daily {
            grouped
                .entry(m.equipment_id)
                .or_default()
                .push(m.availability, m.performance, m.quality);
        }

        grouped
            .into_iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(equipment_id, values)| {
                let (a, p, q) = values.means();
                let oee = combine_oee(a, p, q);
                EquipmentAverage {
                    equipment_id,
                    avg_availability: a,
                    avg_performance: p,
                    avg_quality: q,
                    oee,
                    category: OeeCategory::from_oee(oee),
                    day_count: values.rows,
                }
            })
            .collect()
    }

    /// 全局均值（对设备均值再做一次按列非空平均）
    pub fn overall(&self, averages: &[EquipmentAverage]) -> OverallAverage {
        let mut values = ColumnValues::default();
        for avg in averages {
            values.push(avg.avg_availability, avg.avg_performance, avg.avg_quality);
        }

        let (a, p, q) = values.means();
        let oee = combine_oee(a, p, q);
        OverallAverage {
            availability: a,
            performance: p,
            quality: q,
            oee,
            category: OeeCategory::from_oee(oee),
            equipment_count: averages.len(),
        }
    }
}

impl Default for RollupAggregator {
    fn default() -> Self {
        Self::new()
    }
}
