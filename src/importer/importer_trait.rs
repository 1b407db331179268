// ==========================================
// 设备 OEE 分析系统 - 导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 阶段: 文件解析 → 字段映射 → 区间解析
// ==========================================

use crate::domain::interval::RawStatusRecord;
use crate::domain::production::RawProductionRecord;
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

/// 原始行记录（列名 → 值）
pub type RawRow = HashMap<String, String>;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: JsonParser, CsvParser, ExcelParser
pub trait FileParser {
    /// 解析文件为原始行记录
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 行记录列表（已跳过完全空白的行）
    /// - Err: 文件读取错误、格式错误
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 1），支持列名别名
// 实现者: FieldMapperImpl
pub trait FieldMapper {
    /// 行记录 → 原始状态记录
    ///
    /// # 参数
    /// - row_number: 数据行号（从 1 开始，不含表头）
    fn map_to_raw_status(&self, row: &RawRow, row_number: usize) -> RawStatusRecord;

    /// 行记录 → 原始工单记录
    fn map_to_raw_production(&self, row: &RawRow, row_number: usize) -> RawProductionRecord;
}
