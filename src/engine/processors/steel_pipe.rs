// ==========================================
// 钢构件清单合并系统 - 钢管处理器
// ==========================================
// 规格编码: <任意前缀>Ф<直径>-<长度>
// 规则:
//   1. 按规格分组求和，插入长度列（默认 0）
//   2. 自直径标记起截取，按 '-' 拆分；至少两段时 规格=第一段, 长度=第二段（保持文本）
//   3. 无直径标记时该行保持不变
//   4. 按改写后的规格稳定升序
// ==========================================

use crate::config::{ColumnNames, MarkerConfig};
use crate::domain::table::{CellValue, Table};
use crate::domain::types::PartRow;
use crate::engine::processors::generic::aggregate;
use tracing::debug;

/// 无法拆分时的长度
const DEFAULT_LENGTH: f64 = 0.0;

/// 拆分钢管规格
///
/// # 返回
/// - Some((规格, 长度文本)): 找到直径标记且至少两段
/// - None: 保持原样
pub fn split_pipe_spec(spec: &str, marker: &str) -> Option<(String, String)> {
    if marker.is_empty() {
        return None;
    }
    let start = spec.find(marker)?;
    let mut parts = spec[start..].split('-');
    let diameter = parts.next()?;
    let length = parts.next()?;
    Some((diameter.to_string(), length.to_string()))
}

pub struct SteelPipeProcessor<'a> {
    columns: &'a ColumnNames,
    markers: &'a MarkerConfig,
}

impl<'a> SteelPipeProcessor<'a> {
    pub fn new(columns: &'a ColumnNames, markers: &'a MarkerConfig) -> Self {
        Self { columns, markers }
    }
}

impl super::FamilyProcessor for SteelPipeProcessor<'_> {
    fn process(&self, rows: &[PartRow]) -> Table {
        let marker = self.markers.diameter_marker.as_str();
        let mut unsplit = 0usize;

        let mut lines: Vec<(String, CellValue, Option<f64>)> = aggregate(rows)
            .into_iter()
            .map(|row| match split_pipe_spec(&row.spec, marker) {
                Some((spec, length)) => (spec, CellValue::text(length), row.quantity),
                None => {
                    unsplit += 1;
                    (row.spec, CellValue::Number(DEFAULT_LENGTH), row.quantity)
                }
            })
            .collect();
        if unsplit > 0 {
            debug!(unsplit, "钢管规格未找到直径标记或长度段，保持原样");
        }

        // sort_by 为稳定排序：改写后规格相同的行保持分组顺序
        lines.sort_by(|a, b| a.0.cmp(&b.0));

        let mut table = Table::new(vec![
            self.columns.spec.clone(),
            self.columns.length.clone(),
            self.columns.quantity.clone(),
        ]);
        for (spec, length, quantity) in lines {
            table.push_row(vec![
                CellValue::Text(spec),
                length,
                CellValue::from_number(quantity),
            ]);
        }
        table
    }
}
