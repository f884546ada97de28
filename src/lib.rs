// ==========================================
// 钢构件清单合并系统 - 核心库
// ==========================================
// 功能: 多个构件清单（Excel/CSV）合并为一张总表，
//       按表面处理拆分、按材料族分类汇总，输出多工作表报表
// 技术栈: Rust + calamine + rust_xlsxwriter
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 表格与报表结构
pub mod domain;

// 导入层 - 外部清单文件
pub mod importer;

// 引擎层 - 拆分/标准化/分类/汇总
pub mod engine;

// 导出层 - 报表写出
pub mod exporter;

// 配置层 - 列名/标记/材料族
pub mod config;

// API 层 - 业务接口
pub mod api;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    AggregatedRow, CellValue, MergeSummary, PartRow, ProcessorKind, ReportSheet, SheetSummary,
    Table,
};

// 配置
pub use config::{ConfigManager, FamilyConfig, MergeConfig, TreatmentConfig};

// 引擎
pub use engine::{EngineError, ReportAssembler};

// 导入 / 导出
pub use exporter::{ReportWriter, XlsxReportWriter};
pub use importer::{TableSource, UniversalFileParser};

// API
pub use api::{ApiError, ApiResult, MergeApi, MergeRequest};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "钢构件清单合并系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(!APP_NAME.is_empty());
    }
}
