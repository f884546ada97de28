// ==========================================
// 钢构件清单合并系统 - 扁钢处理器
// ==========================================
// 规格编码: <标签>-<b>-<c>-<d>-<e>，分隔符 '-' / 'X' / 'P'
// 长度推算:
//   FB  → c + 2d - 10
//   FBZ → c + 2d + 250 - 15
//   FBF → d + 2e - 10
//   其他 → 默认长度 0
// ==========================================

use crate::config::ColumnNames;
use crate::domain::table::{CellValue, Table};
use crate::domain::types::PartRow;
use crate::engine::processors::generic::add_quantity;
use std::collections::BTreeMap;

/// 规格分隔符
pub const DELIMITERS: [char; 3] = ['-', 'X', 'P'];

/// 最多拆分的段数
const MAX_TOKENS: usize = 5;

/// 无法推算时的长度
pub const DEFAULT_LENGTH: f64 = 0.0;

/// 扁钢规格拆分结果
#[derive(Debug, Clone, PartialEq)]
pub struct FlatBarTokens {
    pub tag: String,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
}

/// 数值段解析，缺失或无法解析时为 0
fn numeric_token(token: Option<&str>) -> f64 {
    token
        .and_then(|t| t.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// 拆分扁钢规格
pub fn tokenize(spec: &str) -> FlatBarTokens {
    let mut parts = spec.splitn(MAX_TOKENS, |c: char| DELIMITERS.contains(&c));
    let tag = parts.next().unwrap_or("").to_string();
    FlatBarTokens {
        tag,
        b: numeric_token(parts.next()),
        c: numeric_token(parts.next()),
        d: numeric_token(parts.next()),
        e: numeric_token(parts.next()),
    }
}

/// 按标签推算长度（未知标签返回 None）
pub fn derive_length(tokens: &FlatBarTokens) -> Option<f64> {
    let (c, d, e) = (tokens.c, tokens.d, tokens.e);
    match tokens.tag.as_str() {
        "FB" => Some(c + 2.0 * d - 10.0),
        "FBZ" => Some(c + 2.0 * d + 250.0 - 15.0),
        "FBF" => Some(d + 2.0 * e - 10.0),
        _ => None,
    }
}

pub struct FlatBarProcessor<'a> {
    columns: &'a ColumnNames,
}

impl<'a> FlatBarProcessor<'a> {
    pub fn new(columns: &'a ColumnNames) -> Self {
        Self { columns }
    }
}

impl super::FamilyProcessor for FlatBarProcessor<'_> {
    fn process(&self, rows: &[PartRow]) -> Table {
        // 规格 → (首个长度, 数量合计)
        let mut groups: BTreeMap<&str, (f64, Option<f64>)> = BTreeMap::new();
        for row in rows {
            let entry = groups.entry(row.spec.as_str()).or_insert_with(|| {
                let length = derive_length(&tokenize(&row.spec)).unwrap_or(DEFAULT_LENGTH);
                (length, None)
            });
            add_quantity(&mut entry.1, row.quantity);
        }

        let mut table = Table::new(vec![
            self.columns.spec.clone(),
            self.columns.length.clone(),
            self.columns.quantity.clone(),
        ]);
        for (spec, (length, quantity)) in groups {
            table.push_row(vec![
                CellValue::Text(spec.to_string()),
                CellValue::Number(length),
                CellValue::from_number(quantity),
            ]);
        }
        table
    }
}
