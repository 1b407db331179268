// ==========================================
// 设备 OEE 分析系统 - 数据源对账引擎
// ==========================================
// 职责: 合并自动采集与人工修正区间，按设备消解时间重叠
// 红线: 人工修正优先；保留区间的起止时间永不改变
// ==========================================
// 算法:
// 1. 两源合并并标记来源，按 start 升序稳定排序（同起点保持 AUTO 在前）
// 2. 逐个候选，与同设备全部已保留区间做半开重叠判定
// 3. 无重叠 → 作为新区间保留
// 4. 命中第一个重叠的保留区间:
//    - 候选为 MANUAL → 原地覆写其 status/reason/source
//    - 候选为 AUTO   → 丢弃候选（先保留者胜出）
// 注意: 只与"第一个命中"比较；链式重叠（A∩B, B∩C, A∩C=∅）结果依赖处理顺序，
//       B 越过 A 的尾段被整体吸收，C 不会与 B 比较。此处不做归一化，
//       仅当后续候选落入被吸收尾段时告警并计数
// ==========================================

use crate::domain::interval::StatusInterval;
use crate::domain::types::{EquipmentId, IntervalSource};
use serde::Serialize;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// 对账统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileStats {
    pub auto_in: usize,
    pub manual_in: usize,
    /// 最终保留的区间数
    pub retained: usize,
    /// 被人工记录覆写的保留区间次数
    pub overridden: usize,
    /// 被丢弃的候选数（含已被吸收的人工记录）
    pub discarded: usize,
    /// 与已吸收候选尾段重叠的候选数（顺序敏感场景）
    pub chained_overlaps: usize,
}

/// 对账结果
#[derive(Debug, Clone, Default)]
pub struct Reconciled {
    /// 按 start 升序的保留区间
    pub intervals: Vec<StatusInterval>,
    pub stats: ReconcileStats,
}

/// 单台设备的扫描状态
#[derive(Default)]
struct EquipmentLane {
    /// 保留区间在 arena 中的下标
    retained: Vec<usize>,
    /// 被吸收候选越过命中区间的尾段 [retained.end, candidate.end)
    absorbed_tails: Vec<(NaiveDateTime, NaiveDateTime)>,
}

impl EquipmentLane {
    fn overlaps_absorbed_tail(&self, candidate: &StatusInterval) -> bool {
        self.absorbed_tails
            .iter()
            .any(|&(start, end)| candidate.start < end && candidate.end > start)
    }
}

// ==========================================
// SourceReconciler - 数据源对账引擎
// ==========================================
pub struct SourceReconciler {
    // 无状态引擎
}

impl SourceReconciler {
    pub fn new() -> Self {
        Self {}
    }

    /// 执行对账
    ///
    /// # 参数
    /// - auto: 自动采集区间（来源强制标记为 AUTO）
    /// - manual: 人工修正区间（来源强制标记为 MANUAL）
    #[instrument(skip_all, fields(auto = auto.len(), manual = manual.len()))]
    pub fn reconcile(&self, auto: &[StatusInterval], manual: &[StatusInterval]) -> Reconciled {
        let mut stats = ReconcileStats {
            auto_in: auto.len(),
            manual_in: manual.len(),
            ..ReconcileStats::default()
        };

        // 1. 合并并标记来源
        let mut merged: Vec<StatusInterval> = Vec::with_capacity(auto.len() + manual.len());
        merged.extend(auto.iter().cloned().map(|mut i| {
            i.source = IntervalSource::Auto;
            i
        }));
        merged.extend(manual.iter().cloned().map(|mut i| {
            i.source = IntervalSource::Manual;
            i
        }));

        // sort_by_key 为稳定排序
        merged.sort_by_key(|i| i.start);

        // 2. 扫描：保留区间 arena + 设备索引
        let mut retained: Vec<StatusInterval> = Vec::new();
        let mut lanes: HashMap<EquipmentId, EquipmentLane> = HashMap::new();

        for candidate in merged {
            let lane = lanes.entry(candidate.equipment_id).or_default();

            if lane.overlaps_absorbed_tail(&candidate) {
                stats.chained_overlaps += 1;
                warn!(
                    equipment_id = candidate.equipment_id,
                    start = %candidate.start,
                    end = %candidate.end,
                    source = %candidate.source,
                    "候选区间与已吸收候选的尾段重叠，结果依赖处理顺序"
                );
            }

            let first_match = lane
                .retained
                .iter()
                .copied()
                .find(|&idx| candidate.overlaps(&retained[idx]));

            let Some(idx) = first_match else {
                lane.retained.push(retained.len());
                retained.push(candidate);
                continue;
            };

            if candidate.end > retained[idx].end {
                lane.absorbed_tails.push((retained[idx].end, candidate.end));
            }

            if candidate.source == IntervalSource::Manual {
                debug!(
                    equipment_id = candidate.equipment_id,
                    retained_start = %retained[idx].start,
                    from_status = %retained[idx].status,
                    to_status = %candidate.status,
                    "人工修正覆写保留区间"
                );
                retained[idx].apply_override(&candidate);
                stats.overridden += 1;
            }
            stats.discarded += 1;
        }

        stats.retained = retained.len();
        Reconciled {
            intervals: retained,
            stats,
        }
    }
}

impl Default for SourceReconciler {
    fn default() -> Self {
        Self::new()
    }
}
