// ==========================================
// 钢构件清单合并系统 - 报表领域模型
// ==========================================

use crate::domain::table::Table;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ==========================================
// ReportSheet - 输出报表中的一个工作表
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSheet {
    /// 工作表名称（同一次合并内唯一）
    pub name: String,

    /// 工作表内容
    pub table: Table,
}

impl ReportSheet {
    pub fn new(name: impl Into<String>, table: Table) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }
}

// ==========================================
// SheetSummary / MergeSummary - 合并结果汇总
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetSummary {
    pub name: String,
    pub rows: usize,
}

/// 一次合并调用的结果汇总
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeSummary {
    /// 本次合并的运行 ID（日志关联用）
    pub run_id: String,

    /// 输出文件路径
    pub output_path: PathBuf,

    /// 开始时间
    pub started_at: DateTime<Utc>,

    /// 耗时（毫秒）
    pub elapsed_ms: u64,

    /// 实际读取的源文件数（去重后）
    pub source_count: usize,

    /// 总表行数
    pub unified_rows: usize,

    /// 各工作表行数（按写出顺序）
    pub sheets: Vec<SheetSummary>,
}
