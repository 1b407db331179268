// ==========================================
// 设备 OEE 分析系统 - 领域类型定义
// ==========================================
// 职责: 设备状态 / 数据来源 / OEE 等级 / 停机时长单位
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 设备编号
pub type EquipmentId = i64;

// ==========================================
// 设备状态 (Equipment Status)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据源一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentStatus {
    Running, // 运行
    Idle,    // 待机
    Down,    // 停机
    Offline, // 离线（不计入任何时间口径）
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipmentStatus::Running => write!(f, "RUNNING"),
            EquipmentStatus::Idle => write!(f, "IDLE"),
            EquipmentStatus::Down => write!(f, "DOWN"),
            EquipmentStatus::Offline => write!(f, "OFFLINE"),
        }
    }
}

impl FromStr for EquipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "RUNNING" => Ok(EquipmentStatus::Running),
            "IDLE" => Ok(EquipmentStatus::Idle),
            "DOWN" => Ok(EquipmentStatus::Down),
            "OFFLINE" => Ok(EquipmentStatus::Offline),
            other => Err(format!("未知设备状态: {}", other)),
        }
    }
}

// ==========================================
// 区间来源 (Interval Source)
// ==========================================
// 红线: 人工修正优先于自动采集
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntervalSource {
    Auto,   // 传感器自动采集
    Manual, // 人工修正
}

impl fmt::Display for IntervalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalSource::Auto => write!(f, "AUTO"),
            IntervalSource::Manual => write!(f, "MANUAL"),
        }
    }
}

// ==========================================
// OEE 等级 (OEE Category)
// ==========================================
// 区间规则: 下界开、上界闭 (> lower, <= upper)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OeeCategory {
    Bad,         // <= 0.50
    Minimum,     // (0.50, 0.60]
    Good,        // (0.60, 0.75]
    Recommended, // (0.75, 0.85]
    Excellent,   // > 0.85
    #[serde(rename = "No Data")]
    NoData,      // OEE 无法计算
}

impl OeeCategory {
    /// 按固定阈值对 OEE 分级
    pub fn from_oee(oee: Option<f64>) -> Self {
        match oee {
            None => OeeCategory::NoData,
            Some(v) if v <= 0.50 => OeeCategory::Bad,
            Some(v) if v <= 0.60 => OeeCategory::Minimum,
            Some(v) if v <= 0.75 => OeeCategory::Good,
            Some(v) if v <= 0.85 => OeeCategory::Recommended,
            Some(_) => OeeCategory::Excellent,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OeeCategory::Bad => "Bad",
            OeeCategory::Minimum => "Minimum",
            OeeCategory::Good => "Good",
            OeeCategory::Recommended => "Recommended",
            OeeCategory::Excellent => "Excellent",
            OeeCategory::NoData => "No Data",
        }
    }
}

impl fmt::Display for OeeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ==========================================
// 停机时长展示单位 (Downtime Unit)
// ==========================================
// 停机桶内部始终按秒累计，单位只影响报表展示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DowntimeUnit {
    Second,
    #[default]
    Minute,
}

impl DowntimeUnit {
    /// 将秒数换算为展示单位
    pub fn convert(&self, seconds: i64) -> f64 {
        match self {
            DowntimeUnit::Second => seconds as f64,
            DowntimeUnit::Minute => seconds as f64 / 60.0,
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            DowntimeUnit::Second => "sec",
            DowntimeUnit::Minute => "min",
        }
    }
}

impl FromStr for DowntimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "second" | "seconds" | "sec" | "s" => Ok(DowntimeUnit::Second),
            "minute" | "minutes" | "min" | "m" => Ok(DowntimeUnit::Minute),
            other => Err(format!("未知停机时长单位: {}", other)),
        }
    }
}
