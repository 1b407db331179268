// ==========================================
// 设备 OEE 分析系统 - 字段映射器实现
// ==========================================
// 阶段 1: 源字段 → 标准字段映射（支持列名别名）
// 说明: 只做列名归一与空值标准化，类型转换在区间解析阶段完成
// ==========================================

use crate::domain::interval::RawStatusRecord;
use crate::domain::production::RawProductionRecord;
use crate::importer::importer_trait::{FieldMapper as FieldMapperTrait, RawRow};

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_to_raw_status(&self, row: &RawRow, row_number: usize) -> RawStatusRecord {
        RawStatusRecord {
            equipment_id: self.get_string(row, "equipment_id"),
            status: self.get_string(row, "status"),
            reason: self.get_string(row, "reason"),
            start_time: self.get_string(row, "start_time"),
            end_time: self.get_string(row, "end_time"),
            row_number,
        }
    }

    fn map_to_raw_production(&self, row: &RawRow, row_number: usize) -> RawProductionRecord {
        RawProductionRecord {
            equipment_id: self.get_string(row, "equipment_id"),
            planned_duration_in_second: self.get_string(row, "planned_duration_in_second"),
            planned_quantity: self.get_string(row, "planned_quantity"),
            actual_quantity: self.get_string(row, "actual_quantity"),
            defect_quantity: self.get_string(row, "defect_quantity"),
            start_production: self.get_string(row, "start_production"),
            finish_production: self.get_string(row, "finish_production"),
            row_number,
        }
    }
}

impl FieldMapper {
    /// 提取字符串字段（空白视为缺失），支持多个可能的列名（别名）
    fn get_string(&self, row: &RawRow, key: &str) -> Option<String> {
        let aliases: &[&str] = match key {
            "equipment_id" => &["equipment_id", "equipment", "设备编号"],
            "start_time" => &["start_time", "start", "开始时间"],
            "end_time" => &["end_time", "end", "结束时间"],
            "reason" => &["reason", "停机原因"],
            "planned_duration_in_second" => &[
                "planned_duration_in_second",
                "planned_duration_seconds",
                "planned_duration",
            ],
            "start_production" => &["start_production", "start_time", "start"],
            "finish_production" => &["finish_production", "end_time", "end"],
            "defect_quantity" => &["defect_quantity", "defects"],
            _ => std::slice::from_ref(&key),
        };

        for alias in aliases {
            if let Some(v) = row.get(*alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_map_status_with_aliases() {
        let r = row(&[
            ("equipment", "7"),
            ("status", "DOWN"),
            ("reason", ""),
            ("start", "2024/01/01 10:00:00"),
            ("end_time", "2024/01/01 11:00:00"),
        ]);

        let raw = FieldMapper.map_to_raw_status(&r, 4);

        assert_eq!(raw.equipment_id.as_deref(), Some("7"));
        assert_eq!(raw.reason, None);
        assert_eq!(raw.start_time.as_deref(), Some("2024/01/01 10:00:00"));
        assert_eq!(raw.end_time.as_deref(), Some("2024/01/01 11:00:00"));
        assert_eq!(raw.row_number, 4);
    }

    #[test]
    fn test_map_production_fields() {
        let r = row(&[
            ("equipment_id", "1"),
            ("planned_duration_in_second", "3600"),
            ("planned_quantity", "100"),
            ("start_production", "2024/01/01 08:00:00"),
            ("finish_production", "2024/01/01 09:00:00"),
        ]);

        let raw = FieldMapper.map_to_raw_production(&r, 1);

        assert_eq!(raw.planned_duration_in_second.as_deref(), Some("3600"));
        assert_eq!(raw.actual_quantity, None);
        assert_eq!(raw.finish_production.as_deref(), Some("2024/01/01 09:00:00"));
    }
}
