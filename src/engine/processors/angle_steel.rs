// ==========================================
// 钢构件清单合并系统 - 角钢处理器
// ==========================================
// 布局: [带P规格, 带P数量, 规格, 数量] 两组并列
// 规则:
//   1. 按规格分组求和
//   2. 按规格是否包含腹板标记拆为两组，各自升序
//   3. 按行号并列，短的一组下方补空值（不做关联）
//   4. 按 (规格, 带P规格) 排序，空值排在最后
// ==========================================

use crate::config::{ColumnNames, MarkerConfig};
use crate::domain::table::{CellValue, Table};
use crate::domain::types::{AggregatedRow, PartRow};
use crate::engine::processors::generic::aggregate;
use std::cmp::Ordering;

/// 并列的一行: 左侧带P, 右侧不带P
#[derive(Debug, Clone, PartialEq)]
struct SideBySide {
    marked: Option<AggregatedRow>,
    plain: Option<AggregatedRow>,
}

/// 空值排在所有有值之后
fn cmp_missing_last(a: Option<&AggregatedRow>, b: Option<&AggregatedRow>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.spec.cmp(&y.spec),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn spec_cells(row: Option<AggregatedRow>) -> [CellValue; 2] {
    match row {
        Some(r) => [CellValue::Text(r.spec), CellValue::from_number(r.quantity)],
        None => [CellValue::Empty, CellValue::Empty],
    }
}

pub struct AngleSteelProcessor<'a> {
    columns: &'a ColumnNames,
    markers: &'a MarkerConfig,
}

impl<'a> AngleSteelProcessor<'a> {
    pub fn new(columns: &'a ColumnNames, markers: &'a MarkerConfig) -> Self {
        Self { columns, markers }
    }
}

impl super::FamilyProcessor for AngleSteelProcessor<'_> {
    fn process(&self, rows: &[PartRow]) -> Table {
        let marker = self.markers.web_suffix.as_str();
        let (marked, plain): (Vec<AggregatedRow>, Vec<AggregatedRow>) = aggregate(rows)
            .into_iter()
            .partition(|row| !marker.is_empty() && row.spec.contains(marker));

        let height = marked.len().max(plain.len());
        let mut marked = marked.into_iter();
        let mut plain = plain.into_iter();
        let mut lines: Vec<SideBySide> = (0..height)
            .map(|_| SideBySide {
                marked: marked.next(),
                plain: plain.next(),
            })
            .collect();

        lines.sort_by(|a, b| {
            cmp_missing_last(a.plain.as_ref(), b.plain.as_ref())
                .then_with(|| cmp_missing_last(a.marked.as_ref(), b.marked.as_ref()))
        });

        let mut table = Table::new(vec![
            self.columns.spec_with_marker.clone(),
            self.columns.quantity_with_marker.clone(),
            self.columns.spec.clone(),
            self.columns.quantity.clone(),
        ]);
        for line in lines {
            let [marked_spec, marked_qty] = spec_cells(line.marked);
            let [plain_spec, plain_qty] = spec_cells(line.plain);
            table.push_row(vec![marked_spec, marked_qty, plain_spec, plain_qty]);
        }
        table
    }
}
