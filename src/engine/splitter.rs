// ==========================================
// 钢构件清单合并系统 - 表面处理拆分
// ==========================================
// 职责: 按表面处理代码筛选总表; 收集非标底座
// 规则: 规格包含非标标记的行只进入非标总,不进入任何表面处理视图
// ==========================================

use crate::config::{ColumnNames, MarkerConfig};
use crate::domain::table::{CellValue, Table};
use tracing::debug;

pub struct TreatmentSplitter<'a> {
    columns: &'a ColumnNames,
    markers: &'a MarkerConfig,
}

impl<'a> TreatmentSplitter<'a> {
    pub fn new(columns: &'a ColumnNames, markers: &'a MarkerConfig) -> Self {
        Self { columns, markers }
    }

    fn is_non_standard(&self, spec: Option<&CellValue>) -> bool {
        spec.and_then(CellValue::as_text)
            .map(|s| s.contains(self.markers.non_standard.as_str()))
            .unwrap_or(false)
    }

    /// 筛选某一表面处理代码的视图
    ///
    /// # 参数
    /// - unified: 总表
    /// - code: 表面处理代码（精确匹配）
    ///
    /// # 返回
    /// - 过滤后的表（列与总表一致）；无匹配时为空表
    pub fn split(&self, unified: &Table, code: &str) -> Table {
        let spec_col = unified.column_index(&self.columns.spec);
        let treatment_col = unified.column_index(&self.columns.treatment);

        let view = unified.filter_rows(|row| {
            let treatment_matches = treatment_col
                .and_then(|col| row[col].as_text())
                .map(|t| t == code)
                .unwrap_or(false);
            treatment_matches && !self.is_non_standard(spec_col.map(|col| &row[col]))
        });

        debug!(code, rows = view.row_count(), "表面处理视图筛选完成");
        view
    }

    /// 收集非标底座（不区分表面处理）
    pub fn non_standard(&self, unified: &Table) -> Table {
        let spec_col = unified.column_index(&self.columns.spec);
        unified.filter_rows(|row| self.is_non_standard(spec_col.map(|col| &row[col])))
    }
}
