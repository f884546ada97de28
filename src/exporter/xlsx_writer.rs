// ==========================================
// 钢构件清单合并系统 - Excel 报表写出
// ==========================================
// 规则: 每个 ReportSheet 一个工作表，按顺序写出
//       首行为表头（加粗）; Empty 留空; 数值写数值; 文本写文本
// ==========================================

use crate::domain::report::ReportSheet;
use crate::domain::table::CellValue;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// 导出错误
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("工作表 {sheet} 写出失败: {message}")]
    SheetWriteError { sheet: String, message: String },

    #[error("报表保存失败: {0}")]
    SaveError(String),

    #[error("报表没有任何工作表")]
    NoSheets,
}

// ==========================================
// ReportWriter Trait
// ==========================================
// 实现者: XlsxReportWriter
pub trait ReportWriter: Send + Sync {
    /// 写出报表
    ///
    /// # 参数
    /// - path: 目标文件路径
    /// - sheets: 按顺序排列的工作表
    fn write_report(&self, path: &Path, sheets: &[ReportSheet]) -> Result<(), ExportError>;
}

pub struct XlsxReportWriter;

impl XlsxReportWriter {
    fn write_sheet(
        worksheet: &mut Worksheet,
        sheet: &ReportSheet,
        header_format: &Format,
    ) -> Result<(), XlsxError> {
        worksheet.set_name(&sheet.name)?;

        for (col, name) in sheet.table.columns.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, name, header_format)?;
        }

        for (row_idx, row) in sheet.table.rows.iter().enumerate() {
            let row_num = (row_idx + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                let col = col as u16;
                match cell {
                    CellValue::Empty => {}
                    CellValue::Text(s) => {
                        worksheet.write_string(row_num, col, s)?;
                    }
                    CellValue::Number(n) => {
                        worksheet.write_number(row_num, col, *n)?;
                    }
                    CellValue::Bool(b) => {
                        worksheet.write_boolean(row_num, col, *b)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl ReportWriter for XlsxReportWriter {
    fn write_report(&self, path: &Path, sheets: &[ReportSheet]) -> Result<(), ExportError> {
        if sheets.is_empty() {
            return Err(ExportError::NoSheets);
        }

        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        for sheet in sheets {
            let worksheet = workbook.add_worksheet();
            Self::write_sheet(worksheet, sheet, &header_format).map_err(|e| {
                ExportError::SheetWriteError {
                    sheet: sheet.name.clone(),
                    message: e.to_string(),
                }
            })?;
            debug!(sheet = %sheet.name, rows = sheet.table.row_count(), "工作表写出完成");
        }

        workbook
            .save(path)
            .map_err(|e| ExportError::SaveError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::Table;
    use calamine::{open_workbook_auto, Data, Reader};

    #[test]
    fn test_write_report_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let sheets = vec![
            ReportSheet::new(
                "总",
                Table {
                    columns: vec!["规格".into(), "数量".into()],
                    rows: vec![
                        vec![CellValue::Text("FB-1".into()), CellValue::Number(2.0)],
                        vec![CellValue::Text("FB-2".into()), CellValue::Empty],
                    ],
                },
            ),
            ReportSheet::new("扁钢Y", Table::new(vec!["规格".into()])),
        ];

        XlsxReportWriter.write_report(&path, &sheets).unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["总".to_string(), "扁钢Y".to_string()]);
        let range = workbook.worksheet_range("总").unwrap();
        assert_eq!(range.get_value((1, 1)), Some(&Data::Float(2.0)));
        // 空值写出为空白单元格
        assert!(matches!(range.get_value((2, 1)), None | Some(Data::Empty)));
    }

    #[test]
    fn test_write_report_rejects_invalid_sheet_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.xlsx");
        let sheets = vec![ReportSheet::new("a/b", Table::new(vec!["规格".into()]))];

        let result = XlsxReportWriter.write_report(&path, &sheets);

        assert!(matches!(result, Err(ExportError::SheetWriteError { .. })));
    }

    #[test]
    fn test_write_report_requires_sheets() {
        let dir = tempfile::tempdir().unwrap();
        let result = XlsxReportWriter.write_report(&dir.path().join("x.xlsx"), &[]);
        assert!(matches!(result, Err(ExportError::NoSheets)));
    }
}
