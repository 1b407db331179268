// ==========================================
// 设备 OEE 分析系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分层: ImportError（文件级，终止该文件）/ RecordError（记录级，丢弃该行并计数）
// ==========================================

use thiserror::Error;

/// 文件级导入错误
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .json/.csv/.xlsx/.xls）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("JSON 解析失败: {0}")]
    JsonParseError(String),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::JsonParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

/// 记录级错误（单行被丢弃，不影响其余记录）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("字段缺失 (行 {row}): {field}")]
    MissingField { row: usize, field: String },

    #[error("时间格式错误 (行 {row}, 字段 {field}): 期望 YYYY/MM/DD HH:mm:ss，实际 {value}")]
    InvalidTimestamp {
        row: usize,
        field: String,
        value: String,
    },

    #[error("数值格式错误 (行 {row}, 字段 {field}): {value}")]
    InvalidNumber {
        row: usize,
        field: String,
        value: String,
    },

    #[error("数值为负 (行 {row}, 字段 {field}): {value}")]
    NegativeQuantity { row: usize, field: String, value: f64 },

    #[error("未知设备状态 (行 {row}): {value}")]
    UnknownStatus { row: usize, value: String },

    #[error("无效区间 (行 {row}): end({end}) <= start({start})")]
    InvalidInterval {
        row: usize,
        start: String,
        end: String,
    },
}

impl RecordError {
    pub fn row(&self) -> usize {
        match self {
            RecordError::MissingField { row, .. }
            | RecordError::InvalidTimestamp { row, .. }
            | RecordError::InvalidNumber { row, .. }
            | RecordError::NegativeQuantity { row, .. }
            | RecordError::UnknownStatus { row, .. }
            | RecordError::InvalidInterval { row, .. } => *row,
        }
    }

    /// 是否属于 ParseError 类（区别于 InvalidInterval）
    pub fn is_parse_error(&self) -> bool {
        !matches!(self, RecordError::InvalidInterval { .. })
    }
}
