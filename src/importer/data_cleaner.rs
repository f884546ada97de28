// ==========================================
// 钢构件清单合并系统 - 数据清洗器
// ==========================================
// 职责: 表头规整 / 空行识别 / 数量列数值化
// ==========================================

use crate::domain::table::CellValue;
use std::collections::HashMap;

pub struct DataCleaner;

impl DataCleaner {
    /// 规整表头
    ///
    /// # 规则
    /// - TRIM
    /// - 空白表头 → "Unnamed: <列序号>"
    /// - 重名表头 → "<名称>.1", "<名称>.2" ...（保证不丢列）
    pub fn normalize_headers(&self, raw: &[String]) -> Vec<String> {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut headers = Vec::with_capacity(raw.len());

        for (idx, header) in raw.iter().enumerate() {
            let trimmed = header.trim();
            let base = if trimmed.is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                trimmed.to_string()
            };

            let mut name = base.clone();
            while let Some(count) = seen.get_mut(&name) {
                *count += 1;
                name = format!("{}.{}", base, count);
            }
            seen.insert(name.clone(), 0);
            headers.push(name);
        }

        headers
    }

    /// 行内是否全部为空
    pub fn is_blank_row(&self, row: &[CellValue]) -> bool {
        row.iter().all(|cell| match cell {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        })
    }

    /// 数量列数值化
    ///
    /// # 规则
    /// - Number → 原值
    /// - Text → TRIM 后按 f64 解析，失败为 Empty
    /// - Bool → 1 / 0
    /// - Empty → Empty
    pub fn coerce_quantity(&self, cell: &CellValue) -> CellValue {
        match cell {
            CellValue::Number(n) => CellValue::Number(*n),
            CellValue::Text(s) => match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => CellValue::Number(n),
                _ => CellValue::Empty,
            },
            CellValue::Bool(b) => CellValue::Number(if *b { 1.0 } else { 0.0 }),
            CellValue::Empty => CellValue::Empty,
        }
    }
}
