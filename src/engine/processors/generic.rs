// ==========================================
// 钢构件清单合并系统 - 通用汇总
// ==========================================
// 规则: 按规格分组 → 数量求和 → 按规格升序
// 空值: 求和时跳过; 整组均为空值时结果为空值（不是 0）
// ==========================================

use crate::config::ColumnNames;
use crate::domain::table::{CellValue, Table};
use crate::domain::types::{AggregatedRow, PartRow};
use std::collections::BTreeMap;

/// 空值感知的累加
pub(crate) fn add_quantity(total: &mut Option<f64>, quantity: Option<f64>) {
    if let Some(q) = quantity {
        *total = Some(total.unwrap_or(0.0) + q);
    }
}

/// 按规格分组求和（结果规格唯一且升序）
pub fn aggregate(rows: &[PartRow]) -> Vec<AggregatedRow> {
    let mut groups: BTreeMap<&str, Option<f64>> = BTreeMap::new();
    for row in rows {
        let total = groups.entry(row.spec.as_str()).or_insert(None);
        add_quantity(total, row.quantity);
    }

    groups
        .into_iter()
        .map(|(spec, quantity)| AggregatedRow {
            spec: spec.to_string(),
            quantity,
        })
        .collect()
}

pub struct GenericAggregator<'a> {
    columns: &'a ColumnNames,
}

impl<'a> GenericAggregator<'a> {
    pub fn new(columns: &'a ColumnNames) -> Self {
        Self { columns }
    }

    /// 汇总结果转换为 [规格, 数量] 两列表
    pub(crate) fn to_table(&self, rows: Vec<AggregatedRow>) -> Table {
        let mut table = Table::new(vec![
            self.columns.spec.clone(),
            self.columns.quantity.clone(),
        ]);
        for row in rows {
            table.push_row(vec![
                CellValue::Text(row.spec),
                CellValue::from_number(row.quantity),
            ]);
        }
        table
    }
}

impl super::FamilyProcessor for GenericAggregator<'_> {
    fn process(&self, rows: &[PartRow]) -> Table {
        self.to_table(aggregate(rows))
    }
}
