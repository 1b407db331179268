// ==========================================
// 设备 OEE 分析系统 - 数据装载器
// ==========================================
// 职责: 串联导入管道（文件解析 → 字段映射 → 区间解析）
// 输入: 自动状态文件 + 人工修正文件 + 生产工单文件
// 输出: ImportedData（类型化输入快照 + 解析报告）
// ==========================================

use crate::config::EngineConfig;
use crate::domain::interval::StatusInterval;
use crate::domain::production::ProductionOrder;
use crate::domain::types::IntervalSource;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::{FieldMapper as FieldMapperTrait, RawRow};
use crate::importer::interval_parser::{IntervalParser, ParseReport};
use std::path::Path;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// 导入结果（不可变输入快照）
#[derive(Debug, Clone)]
pub struct ImportedData {
    /// 导入批次 ID
    pub batch_id: String,
    pub auto_intervals: Vec<StatusInterval>,
    pub manual_intervals: Vec<StatusInterval>,
    pub orders: Vec<ProductionOrder>,
    pub report: ParseReport,
}

pub struct DataLoader {
    file_parser: UniversalFileParser,
    field_mapper: FieldMapper,
    interval_parser: IntervalParser,
}

impl DataLoader {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            file_parser: UniversalFileParser,
            field_mapper: FieldMapper,
            interval_parser: IntervalParser::new(config.timestamp_format.clone()),
        }
    }

    /// 按配置装载全部输入
    ///
    /// 人工修正文件缺失时视为空集（仅告警），其余文件缺失则报错。
    #[instrument(skip(self, config), fields(
        status_file = %config.status_file.display(),
        manual_file = %config.manual_status_file.display(),
        production_file = %config.production_file.display()
    ))]
    pub fn load_all(&self, config: &EngineConfig) -> ImportResult<ImportedData> {
        let batch_id = Uuid::new_v4().to_string();
        let mut report = ParseReport::default();

        let auto_intervals =
            self.load_status_file(&config.status_file, IntervalSource::Auto, &mut report)?;

        let manual_intervals = if config.manual_status_file.exists() {
            self.load_status_file(&config.manual_status_file, IntervalSource::Manual, &mut report)?
        } else {
            warn!(
                path = %config.manual_status_file.display(),
                "人工修正文件不存在，按无人工修正处理"
            );
            Vec::new()
        };

        let orders = self.load_production_file(&config.production_file, &mut report)?;

        info!(
            batch_id = %batch_id,
            auto = auto_intervals.len(),
            manual = manual_intervals.len(),
            orders = orders.len(),
            rejected = report.rejected_count(),
            "输入数据装载完成"
        );

        Ok(ImportedData {
            batch_id,
            auto_intervals,
            manual_intervals,
            orders,
            report,
        })
    }

    /// 装载单个状态文件
    pub fn load_status_file<P: AsRef<Path>>(
        &self,
        path: P,
        source: IntervalSource,
        report: &mut ParseReport,
    ) -> ImportResult<Vec<StatusInterval>> {
        let rows = self.file_parser.parse(path.as_ref())?;
        Ok(self.status_from_rows(&rows, source, report))
    }

    /// 装载单个工单文件
    pub fn load_production_file<P: AsRef<Path>>(
        &self,
        path: P,
        report: &mut ParseReport,
    ) -> ImportResult<Vec<ProductionOrder>> {
        let rows = self.file_parser.parse(path.as_ref())?;
        Ok(self.orders_from_rows(&rows, report))
    }

    /// 行记录 → 状态区间（行号从 1 开始）
    pub fn status_from_rows(
        &self,
        rows: &[RawRow],
        source: IntervalSource,
        report: &mut ParseReport,
    ) -> Vec<StatusInterval> {
        let raw: Vec<_> = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.field_mapper.map_to_raw_status(row, idx + 1))
            .collect();
        self.interval_parser
            .parse_status_records(&raw, source, report)
    }

    /// 行记录 → 生产工单
    pub fn orders_from_rows(&self, rows: &[RawRow], report: &mut ParseReport) -> Vec<ProductionOrder> {
        let raw: Vec<_> = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.field_mapper.map_to_raw_production(row, idx + 1))
            .collect();
        self.interval_parser.parse_production_records(&raw, report)
    }
}
