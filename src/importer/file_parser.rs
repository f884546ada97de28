// ==========================================
// 钢构件清单合并系统 - 文件解析器实现
// ==========================================
// 职责: 读取源文件的全部工作表（首行为表头）
// 支持: Excel (.xlsx/.xlsm/.xls) / CSV (.csv)
// ==========================================

use crate::domain::table::{CellValue, Table};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::source_trait::TableSource;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// 支持的 Excel 扩展名
const EXCEL_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls"];

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ImportError::FileNotFound(path.display().to_string()))
    }
}

/// 由表头 + 数据行组装 Table（跳过完全空白的行）
fn build_table<I>(cleaner: &DataCleaner, raw_headers: &[String], data_rows: I) -> Table
where
    I: IntoIterator<Item = Vec<CellValue>>,
{
    let mut table = Table::new(cleaner.normalize_headers(raw_headers));
    for row in data_rows {
        if cleaner.is_blank_row(&row) {
            continue;
        }
        table.push_row(row);
    }
    table
}

// ==========================================
// CSV Parser 实现
// ==========================================
// 单个 CSV 文件视为一个工作表，工作表名取文件名（不含扩展名）
pub struct CsvParser;

impl TableSource for CsvParser {
    fn read_tables(&self, file_path: &Path) -> ImportResult<Vec<(String, Table)>> {
        let path = file_path;

        // 检查文件存在
        ensure_exists(path)?;

        // 检查扩展名
        let ext = extension_of(path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开 CSV 文件
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        // 读取所有行
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(CellValue::text).collect::<Vec<_>>());
        }

        let table = build_table(&DataCleaner, &headers, rows);
        let sheet_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        debug!(file = %path.display(), rows = table.row_count(), "CSV 解析完成");
        Ok(vec![(sheet_name, table)])
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    fn convert_cell(cell: &Data) -> CellValue {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::text(s.as_str()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::Error(_) => CellValue::Empty,
            other => CellValue::text(other.to_string()),
        }
    }
}

impl TableSource for ExcelParser {
    fn read_tables(&self, file_path: &Path) -> ImportResult<Vec<(String, Table)>> {
        let path = file_path;

        // 检查文件存在
        ensure_exists(path)?;

        // 检查扩展名
        let ext = extension_of(path);
        if !EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开 Excel 文件（按扩展名自动识别 xls / xlsx）
        let mut workbook = open_workbook_auto(path)?;

        let cleaner = DataCleaner;
        let mut tables = Vec::new();

        // 依次读取所有工作表
        for sheet_name in workbook.sheet_names() {
            let range = workbook.worksheet_range(&sheet_name)?;

            let mut rows = range.rows();
            let table = match rows.next() {
                // 空工作表: 无列、无行
                None => Table::default(),
                Some(header_row) => {
                    let headers: Vec<String> =
                        header_row.iter().map(|cell| cell.to_string()).collect();
                    let data_rows =
                        rows.map(|row| row.iter().map(Self::convert_cell).collect::<Vec<_>>());
                    build_table(&cleaner, &headers, data_rows)
                }
            };

            debug!(
                file = %path.display(),
                sheet = %sheet_name,
                columns = table.columns.len(),
                rows = table.row_count(),
                "工作表解析完成"
            );
            tables.push((sheet_name, table));
        }

        Ok(tables)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl TableSource for UniversalFileParser {
    fn read_tables(&self, file_path: &Path) -> ImportResult<Vec<(String, Table)>> {
        let ext = extension_of(file_path);

        match ext.as_str() {
            "csv" => CsvParser.read_tables(file_path),
            e if EXCEL_EXTENSIONS.contains(&e) => ExcelParser.read_tables(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let temp_file = csv_file(&["规格,数量,表面处理", "FB-100-20-0-0,2,Y", "L50X5,3,G"]);

        let tables = CsvParser.read_tables(temp_file.path()).unwrap();

        assert_eq!(tables.len(), 1);
        let (_, table) = &tables[0];
        assert_eq!(table.columns, vec!["规格", "数量", "表面处理"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0][0], CellValue::Text("FB-100-20-0-0".to_string()));
        // CSV 单元格保持文本，由加载器统一数值化数量列
        assert_eq!(table.rows[0][1], CellValue::Text("2".to_string()));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.read_tables(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let temp_file = csv_file(&["规格,数量", "FB-1,2", ",", "FB-2,3"]);

        let tables = CsvParser.read_tables(temp_file.path()).unwrap();

        // 应跳过空行
        assert_eq!(tables[0].1.row_count(), 2);
    }

    #[test]
    fn test_csv_parser_short_rows_padded() {
        let temp_file = csv_file(&["规格,数量,备注", "FB-1,2"]);

        let tables = CsvParser.read_tables(temp_file.path()).unwrap();

        assert_eq!(tables[0].1.rows[0].len(), 3);
        assert_eq!(tables[0].1.rows[0][2], CellValue::Empty);
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let temp_file = Builder::new().suffix(".txt").tempfile().unwrap();
        let result = UniversalFileParser.read_tables(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_excel_parser_all_sheets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parts.xlsx");

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let first = workbook.add_worksheet();
        first.set_name("一车间").unwrap();
        first.write_string(0, 0, "规格").unwrap();
        first.write_string(0, 1, "数量").unwrap();
        first.write_string(1, 0, "FB-100-20-0-0").unwrap();
        first.write_number(1, 1, 4.0).unwrap();
        let second = workbook.add_worksheet();
        second.set_name("二车间").unwrap();
        second.write_string(0, 0, "规格").unwrap();
        second.write_string(0, 1, "备注").unwrap();
        second.write_string(1, 0, "L50X5").unwrap();
        workbook.save(&path).unwrap();

        let tables = ExcelParser.read_tables(&path).unwrap();

        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].0, "一车间");
        assert_eq!(tables[0].1.rows[0][1], CellValue::Number(4.0));
        assert_eq!(tables[1].0, "二车间");
        assert_eq!(tables[1].1.columns, vec!["规格", "备注"]);
        assert_eq!(tables[1].1.rows[0][1], CellValue::Empty);
    }
}
