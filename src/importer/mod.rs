// ==========================================
// 设备 OEE 分析系统 - 导入层
// ==========================================
// 职责: 外部数据导入,生成类型化输入
// 支持: JSON, CSV, Excel
// ==========================================

pub mod data_loader;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod interval_parser;

// 重导出核心类型
pub use data_loader::{DataLoader, ImportedData};
pub use error::{ImportError, ImportResult, RecordError};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, JsonParser, UniversalFileParser};
pub use interval_parser::{IntervalParser, ParseReport, RecordSource, RejectedRecord};

// 重导出 Trait 接口
pub use importer_trait::{FieldMapper, FileParser, RawRow};
