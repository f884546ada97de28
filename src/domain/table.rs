// ==========================================
// 钢构件清单合并系统 - 表格领域模型
// ==========================================
// 职责: 单元格 / 行 / 表的内存表示
// 约定: CellValue::Empty 即"无值"，写出时为空白单元格
// ==========================================

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

// ==========================================
// CellValue - 单元格值
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// 由文本构造单元格（空字符串视为无值）
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }

    /// 由可选数值构造单元格
    pub fn from_number(value: Option<f64>) -> Self {
        match value {
            Some(n) => CellValue::Number(n),
            None => CellValue::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// 以文本视角读取单元格
    ///
    /// # 返回
    /// - Text: 原文
    /// - Number: 整数值不带小数点（100.0 → "100"）
    /// - Bool: "true"/"false"
    /// - Empty: None
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => Some(Cow::Borrowed(s.as_str())),
            CellValue::Number(n) => Some(Cow::Owned(format_number(*n))),
            CellValue::Bool(b) => Some(Cow::Owned(b.to_string())),
        }
    }

    /// 以数值视角读取单元格（仅 Number 返回值）
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => write!(f, "{}", text),
            None => Ok(()),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

// ==========================================
// Table - 表头 + 行
// ==========================================
// 不变量: 每一行的长度等于 columns.len()
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// 创建只有表头的空表
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// 追加一行，长度不足补 Empty，超出部分截断
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(row);
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 保留表头，按谓词过滤行（保持原有顺序）
    pub fn filter_rows<F>(&self, mut predicate: F) -> Table
    where
        F: FnMut(&[CellValue]) -> bool,
    {
        Table {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| predicate(row))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_text_formats_whole_numbers() {
        assert_eq!(CellValue::Number(100.0).as_text().as_deref(), Some("100"));
        assert_eq!(CellValue::Number(2.5).as_text().as_deref(), Some("2.5"));
        assert_eq!(CellValue::Empty.as_text(), None);
    }

    #[test]
    fn test_text_constructor_treats_empty_as_no_value() {
        assert_eq!(CellValue::text(""), CellValue::Empty);
        assert_eq!(CellValue::text("FB"), CellValue::Text("FB".to_string()));
    }

    #[test]
    fn test_push_row_pads_missing_cells() {
        let mut table = Table::new(vec!["a".to_string(), "b".to_string()]);
        table.push_row(vec![CellValue::Number(1.0)]);
        assert_eq!(table.rows[0], vec![CellValue::Number(1.0), CellValue::Empty]);
    }

    #[test]
    fn test_filter_rows_keeps_order() {
        let mut table = Table::new(vec!["v".to_string()]);
        for i in 0..5 {
            table.push_row(vec![CellValue::Number(i as f64)]);
        }
        let odd = table.filter_rows(|row| row[0].as_number().unwrap_or(0.0) as i64 % 2 == 1);
        assert_eq!(
            odd.rows,
            vec![vec![CellValue::Number(1.0)], vec![CellValue::Number(3.0)]]
        );
    }
}
