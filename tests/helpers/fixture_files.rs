// ==========================================
// 测试输入文件生成
// ==========================================
// 职责: 在临时目录中写出 JSON / CSV 输入文件
// ==========================================

use equipment_oee::config::EngineConfig;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const STATUS_JSON: &str = r#"[
  {"equipment_id": 1, "status": "DOWN", "reason": "jam", "start_time": "2024/01/01 23:00:00", "end_time": "2024/01/02 01:00:00"},
  {"equipment_id": 2, "status": "DOWN", "reason": "jam", "start_time": "2024/01/01 10:00:00", "end_time": "2024/01/01 12:00:00"},
  {"equipment_id": 3, "status": "RUNNING", "reason": "", "start_time": "2024/01/01 07:00:00", "end_time": "2024/01/01 10:00:00"},
  {"equipment_id": 3, "status": "RUNNING", "reason": "", "start_time": "not a time", "end_time": "2024/01/01 10:00:00"},
  {"equipment_id": 3, "status": "IDLE", "reason": "", "start_time": "2024/01/01 12:00:00", "end_time": "2024/01/01 11:00:00"}
]"#;

pub const MANUAL_JSON: &str = r#"[
  {"equipment_id": 2, "status": "RUNNING", "start_time": "2024/01/01 10:30:00", "end_time": "2024/01/01 11:30:00"}
]"#;

pub const PRODUCTION_JSON: &str = r#"[
  {"equipment_id": 3, "planned_duration_in_second": 3600, "planned_quantity": 100, "actual_quantity": 90, "defect_quantity": 9, "start_production": "2024/01/01 08:00:00", "finish_production": "2024/01/01 09:00:00"},
  {"equipment_id": 3, "planned_duration_in_second": 3600, "planned_quantity": 100, "actual_quantity": 90, "defect_quantity": -1, "start_production": "2024/01/01 08:00:00", "finish_production": "2024/01/01 09:00:00"}
]"#;

/// 临时输入目录（需保持存活）
pub struct FixtureDir {
    pub dir: TempDir,
}

impl FixtureDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// 写出默认三份 JSON 输入并返回对应配置
    pub fn standard_config(&self) -> EngineConfig {
        EngineConfig {
            status_file: self.write("status.json", STATUS_JSON),
            manual_status_file: self.write("manual_status.json", MANUAL_JSON),
            production_file: self.write("production.json", PRODUCTION_JSON),
            ..EngineConfig::default()
        }
    }
}
