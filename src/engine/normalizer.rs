// ==========================================
// 钢构件清单合并系统 - 规格标准化
// ==========================================
// 规则: 是否带腹板 = 是 且 规格以 LDK/L4/L5 开头 → 规格追加 " P"
// 必须在材料族分类之前执行（分类基于标准化后的规格）
// ==========================================

use crate::config::{ColumnNames, MarkerConfig};
use crate::domain::table::{CellValue, Table};
use tracing::debug;

pub struct CodeNormalizer<'a> {
    columns: &'a ColumnNames,
    markers: &'a MarkerConfig,
}

impl<'a> CodeNormalizer<'a> {
    pub fn new(columns: &'a ColumnNames, markers: &'a MarkerConfig) -> Self {
        Self { columns, markers }
    }

    fn has_web(&self, cell: &CellValue) -> bool {
        cell.as_text()
            .map(|v| self.markers.web_yes_values.iter().any(|yes| *yes == v))
            .unwrap_or(false)
    }

    fn needs_marker(&self, spec: &str) -> bool {
        self.markers
            .web_prefixes
            .iter()
            .any(|p| spec.starts_with(p.as_str()))
    }

    /// 返回标准化后的副本（不修改输入）
    pub fn normalize(&self, view: &Table) -> Table {
        let mut out = view.clone();
        let (Some(spec_col), Some(web_col)) = (
            out.column_index(&self.columns.spec),
            out.column_index(&self.columns.has_web),
        ) else {
            return out;
        };

        let mut marked = 0usize;
        for row in &mut out.rows {
            if !self.has_web(&row[web_col]) {
                continue;
            }
            let new_spec = match row[spec_col].as_text() {
                Some(spec) if self.needs_marker(&spec) => {
                    format!("{} {}", spec, self.markers.web_suffix)
                }
                _ => continue,
            };
            row[spec_col] = CellValue::Text(new_spec);
            marked += 1;
        }

        debug!(marked, "带腹板规格标记完成");
        out
    }
}
