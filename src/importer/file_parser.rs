// ==========================================
// 设备 OEE 分析系统 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: JSON 数组 (.json) / CSV (.csv) / Excel (.xlsx/.xls)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{FileParser, RawRow};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn is_blank(row: &RawRow) -> bool {
    row.values().all(|v| v.is_empty())
}

// ==========================================
// JSON Parser 实现
// ==========================================
// 格式: 顶层数组，每个元素是一个扁平对象
pub struct JsonParser;

impl JsonParser {
    /// 解析 JSON 文本（便于测试与非文件来源复用）
    pub fn parse_str(&self, raw: &str) -> ImportResult<Vec<RawRow>> {
        let value: Value = serde_json::from_str(raw)?;
        self.rows_from_value(value)
    }

    fn rows_from_value(&self, value: Value) -> ImportResult<Vec<RawRow>> {
        let items = match value {
            Value::Array(items) => items,
            _ => {
                return Err(ImportError::JsonParseError(
                    "顶层结构必须是数组".to_string(),
                ))
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for (idx, item) in items.into_iter().enumerate() {
            let object = match item {
                Value::Object(map) => map,
                other => {
                    tracing::warn!(row = idx + 1, value = %other, "JSON 元素不是对象，已跳过");
                    continue;
                }
            };

            let mut row_map = RawRow::new();
            for (key, value) in object {
                let text = match value {
                    Value::Null => continue,
                    Value::String(s) => s.trim().to_string(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    other => other.to_string(),
                };
                row_map.insert(key.trim().to_string(), text);
            }

            if is_blank(&row_map) {
                continue;
            }
            records.push(row_map);
        }

        Ok(records)
    }
}

impl FileParser for JsonParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        let file = File::open(file_path)?;
        let value: Value = serde_json::from_reader(BufReader::new(file))?;
        self.rows_from_value(value)
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        let path = file_path;
        ensure_exists(path)?;

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        // 读取所有行
        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = RawRow::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if is_blank(&row_map) {
                continue;
            }

            records.push(row_map);
        }

        Ok(records)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 注意: 时间列需为文本格式；Excel 日期序列值会按数字读入并在解析阶段被丢弃
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        let path = file_path;
        ensure_exists(path)?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !ext.eq_ignore_ascii_case("xlsx") && !ext.eq_ignore_ascii_case("xls") {
            return Err(ImportError::UnsupportedFormat(ext.to_string()));
        }

        let mut workbook = open_workbook_auto(path)?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::ExcelParseError(
                "Excel 文件无工作表".to_string(),
            ));
        }

        let sheet_name = sheet_names[0].clone();
        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut records = Vec::new();
        for data_row in rows {
            let mut row_map = RawRow::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), cell.to_string().trim().to_string());
                }
            }

            if is_blank(&row_map) {
                continue;
            }

            records.push(row_map);
        }

        Ok(records)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<RawRow>> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "json" => JsonParser.parse_to_raw_records(path),
            "csv" => CsvParser.parse_to_raw_records(path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_records(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[test]
    fn test_json_parser_values_to_strings() {
        let rows = JsonParser
            .parse_str(
                r#"[{"equipment_id": 1, "status": "DOWN", "reason": null, "start_time": " 2024/01/01 10:00:00 "}]"#,
            )
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("equipment_id"), Some(&"1".to_string()));
        assert_eq!(rows[0].get("reason"), None);
        assert_eq!(
            rows[0].get("start_time"),
            Some(&"2024/01/01 10:00:00".to_string())
        );
    }

    #[test]
    fn test_json_parser_rejects_non_array() {
        let result = JsonParser.parse_str(r#"{"equipment_id": 1}"#);
        assert!(matches!(result, Err(ImportError::JsonParseError(_))));
    }

    #[test]
    fn test_json_parser_skips_non_objects() {
        let rows = JsonParser
            .parse_str(r#"[1, {"equipment_id": 2}, {}, "x"]"#)
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp_file, "equipment_id,status,start_time,end_time").unwrap();
        writeln!(temp_file, "1,DOWN,2024/01/01 10:00:00,2024/01/01 11:00:00").unwrap();
        writeln!(temp_file, ",,,").unwrap(); // 空行
        writeln!(temp_file, "2,IDLE,2024/01/01 10:00:00,2024/01/01 11:00:00").unwrap();

        let records = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("status"), Some(&"DOWN".to_string()));
        assert_eq!(records[1].get("equipment_id"), Some(&"2".to_string()));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_records(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_universal_parser_dispatches_json() {
        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(temp_file, r#"[{{"equipment_id": "3"}}]"#).unwrap();

        let rows = UniversalFileParser.parse(temp_file.path()).unwrap();
        assert_eq!(rows[0].get("equipment_id"), Some(&"3".to_string()));
    }

    #[test]
    fn test_universal_parser_unsupported_extension() {
        let temp_file = NamedTempFile::new().unwrap();
        let result = UniversalFileParser.parse(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
