// ==========================================
// 钢构件清单合并系统 - 导出层
// ==========================================
// 职责: 将组装好的工作表写出为报表文件
// 支持: Excel (.xlsx)
// ==========================================

pub mod xlsx_writer;

pub use xlsx_writer::{ExportError, ReportWriter, XlsxReportWriter};
