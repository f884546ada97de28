// ==========================================
// 钢构件清单合并系统 - 领域模型层
// ==========================================
// 职责: 定义表格、行、报表等领域结构
// 红线: 不含文件读写逻辑,不含引擎逻辑
// ==========================================

pub mod report;
pub mod table;
pub mod types;

// 重导出核心类型
pub use report::{MergeSummary, ReportSheet, SheetSummary};
pub use table::{CellValue, Table};
pub use types::{AggregatedRow, PartRow, ProcessorKind};
