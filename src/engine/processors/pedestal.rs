// ==========================================
// 钢构件清单合并系统 - 底座处理器
// ==========================================
// 规则: 与通用汇总一致；空输入直接返回空表
// ==========================================

use crate::config::ColumnNames;
use crate::domain::table::Table;
use crate::domain::types::PartRow;
use crate::engine::processors::generic::{aggregate, GenericAggregator};

pub struct PedestalProcessor<'a> {
    inner: GenericAggregator<'a>,
}

impl<'a> PedestalProcessor<'a> {
    pub fn new(columns: &'a ColumnNames) -> Self {
        Self {
            inner: GenericAggregator::new(columns),
        }
    }
}

impl super::FamilyProcessor for PedestalProcessor<'_> {
    fn process(&self, rows: &[PartRow]) -> Table {
        if rows.is_empty() {
            return self.inner.to_table(Vec::new());
        }
        self.inner.to_table(aggregate(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::CellValue;
    use crate::engine::processors::FamilyProcessor;

    #[test]
    fn test_empty_input_returns_empty_table() {
        let columns = ColumnNames::default();
        let table = PedestalProcessor::new(&columns).process(&[]);
        assert!(table.is_empty());
        assert_eq!(table.columns, vec!["规格", "数量"]);
    }

    #[test]
    fn test_pedestal_aggregates() {
        let columns = ColumnNames::default();
        let rows = vec![
            PartRow::new("DZ-2", Some(1.0)),
            PartRow::new("DZ-1", Some(2.0)),
            PartRow::new("DZ-2", Some(4.0)),
        ];

        let table = PedestalProcessor::new(&columns).process(&rows);

        assert_eq!(
            table.rows,
            vec![
                vec![CellValue::Text("DZ-1".to_string()), CellValue::Number(2.0)],
                vec![CellValue::Text("DZ-2".to_string()), CellValue::Number(5.0)],
            ]
        );
    }
}
