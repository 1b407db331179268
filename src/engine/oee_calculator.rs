// ==========================================
// 设备 OEE 分析系统 - OEE 指标计算引擎
// ==========================================
// 职责: 工单按日切分 → 比例分摊 → 窗口状态时长 → 设备-日指标
// 依赖: DaySplitter, StatusWindowSlicer
// 红线:
// - 任一分母 <= 0 时对应指标为 None，不报错
// - None 只向 OEE 传播，A/P/Q 彼此独立
// ==========================================

use crate::domain::metrics::{DailyKey, DailyMetrics};
use crate::domain::production::ProductionOrder;
use crate::domain::types::OeeCategory;
use crate::engine::day_splitter::DaySplitter;
use crate::engine::window_slicer::StatusWindowSlicer;
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// 日指标计算结果
#[derive(Debug, Clone, Default)]
pub struct DailyComputation {
    pub daily: BTreeMap<DailyKey, DailyMetrics>,
    /// 因时间窗口无效被跳过的工单数
    pub skipped_orders: usize,
}

// ==========================================
// 派生指标公式
// ==========================================

/// A = (running + idle) / totalTime
pub fn availability(running: i64, idle: i64, total_time: i64) -> Option<f64> {
    if total_time > 0 {
        Some((running + idle) as f64 / total_time as f64)
    } else {
        None
    }
}

/// P = idealCycle / actualCycle
pub fn performance(
    planned_duration: f64,
    planned_quantity: f64,
    actual_duration: f64,
    actual_quantity: f64,
) -> Option<f64> {
    if planned_quantity <= 0.0 || actual_quantity <= 0.0 {
        return None;
    }
    let ideal_cycle = planned_duration / planned_quantity;
    let actual_cycle = actual_duration / actual_quantity;
    if actual_cycle > 0.0 {
        Some(ideal_cycle / actual_cycle)
    } else {
        None
    }
}

/// Q = (actual - defect) / actual
pub fn quality(actual_quantity: f64, defect_quantity: f64) -> Option<f64> {
    if actual_quantity > 0.0 {
        Some((actual_quantity - defect_quantity) / actual_quantity)
    } else {
        None
    }
}

/// OEE = A × P × Q（任一为空则为空）
pub fn combine_oee(a: Option<f64>, p: Option<f64>, q: Option<f64>) -> Option<f64> {
    Some(a? * p? * q?)
}

// ==========================================
// OeeCalculator - OEE 指标计算引擎
// ==========================================
pub struct OeeCalculator {
    splitter: DaySplitter,
}

impl OeeCalculator {
    pub fn new() -> Self {
        Self {
            splitter: DaySplitter::new(),
        }
    }

    /// 计算全部设备-日指标
    ///
    /// # 参数
    /// - orders: 生产工单
    /// - slicer: 对账后区间的窗口视图
    ///
    /// # 返回
    /// 已完成派生指标计算的设备-日记录，以及被跳过的工单数
    #[instrument(skip_all, fields(orders = orders.len()))]
    pub fn compute_daily(
        &self,
        orders: &[ProductionOrder],
        slicer: &StatusWindowSlicer<'_>,
    ) -> DailyComputation {
        let mut result = DailyComputation::default();

        for order in orders {
            if !order.is_valid() {
                warn!(
                    equipment_id = order.equipment_id,
                    start = %order.start,
                    end = %order.end,
                    "工单时间窗口无效，跳过"
                );
                result.skipped_orders += 1;
                continue;
            }

            let actual_duration = order.inclusive_duration_seconds() as f64;

            for slice in self.splitter.split(order.start, order.end) {
                let key = DailyKey {
                    equipment_id: order.equipment_id,
                    date: slice.date,
                };
                let metrics = result
                    .daily
                    .entry(key)
                    .or_insert_with(|| DailyMetrics::new(key));

                metrics.sum_planned_duration += slice.allocate(order.planned_duration_seconds);
                metrics.sum_planned_quantity += slice.allocate(order.planned_quantity);
                metrics.sum_actual_duration += slice.allocate(actual_duration);
                metrics.sum_actual_quantity += slice.allocate(order.actual_quantity);
                metrics.sum_defect_quantity += slice.allocate(order.defect_quantity);

                let durations = slicer.durations(order.equipment_id, slice.start, slice.end);
                metrics.running_seconds += durations.running;
                metrics.idle_seconds += durations.idle;
                metrics.down_seconds += durations.down;
            }
        }

        for metrics in result.daily.values_mut() {
            self.finalize(metrics);
        }

        debug!(
            days = result.daily.len(),
            skipped = result.skipped_orders,
            "设备-日指标计算完成"
        );
        result
    }

    /// 计算派生指标（累加完成后调用一次）
    pub fn finalize(&self, metrics: &mut DailyMetrics) {
        metrics.total_time_seconds =
            metrics.running_seconds + metrics.idle_seconds + metrics.down_seconds;

        metrics.availability = availability(
            metrics.running_seconds,
            metrics.idle_seconds,
            metrics.total_time_seconds,
        );
        metrics.performance = performance(
            metrics.sum_planned_duration,
            metrics.sum_planned_quantity,
            metrics.sum_actual_duration,
            metrics.sum_actual_quantity,
        );
        metrics.quality = quality(metrics.sum_actual_quantity, metrics.sum_defect_quantity);
        metrics.oee = combine_oee(metrics.availability, metrics.performance, metrics.quality);
        metrics.category = OeeCategory::from_oee(metrics.oee);
    }
}

impl Default for OeeCalculator {
    fn default() -> Self {
        Self::new()
    }
}
