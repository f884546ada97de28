// ==========================================
// 钢构件清单合并系统 - 导入层
// ==========================================
// 职责: 读取外部清单文件,生成内存总表
// 支持: Excel (.xlsx/.xlsm/.xls), CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod file_parser;
pub mod source_trait;
pub mod table_loader;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use source_trait::TableSource;
pub use table_loader::{concat_tables, SourceLoadError, TableLoader};
