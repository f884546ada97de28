// ==========================================
// 钢构件清单合并系统 - 总表加载器
// ==========================================
// 职责: 多文件 × 多工作表 → 一张总表
// 流程: 读取 → 列并集对齐 → 顺序拼接 → 数量列数值化
// ==========================================

use crate::domain::table::{CellValue, Table};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::ImportError;
use crate::importer::source_trait::TableSource;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 加载失败（携带出错的源文件）
#[derive(Debug)]
pub struct SourceLoadError {
    pub path: PathBuf,
    pub error: ImportError,
}

// ==========================================
// TableLoader - 总表加载器
// ==========================================
pub struct TableLoader<'a> {
    source: &'a dyn TableSource,
    cleaner: DataCleaner,
}

impl<'a> TableLoader<'a> {
    pub fn new(source: &'a dyn TableSource) -> Self {
        Self {
            source,
            cleaner: DataCleaner,
        }
    }

    /// 读取全部源文件并拼接为总表
    ///
    /// # 参数
    /// - paths: 源文件路径（顺序决定行顺序）
    /// - quantity_column: 数量列名
    ///
    /// # 返回
    /// - Ok(Table): 总表（列为所有输入列的并集，按首次出现顺序）
    /// - Err(SourceLoadError): 任一文件无法读取，整体失败，不返回部分结果
    pub fn load_unified<P: AsRef<Path>>(
        &self,
        paths: &[P],
        quantity_column: &str,
    ) -> Result<Table, SourceLoadError> {
        let mut sheets = Vec::new();
        for path in paths {
            let path = path.as_ref();
            let tables = self.source.read_tables(path).map_err(|error| SourceLoadError {
                path: path.to_path_buf(),
                error,
            })?;
            debug!(file = %path.display(), sheets = tables.len(), "源文件读取完成");
            sheets.extend(tables.into_iter().map(|(_, table)| table));
        }

        let mut unified = concat_tables(sheets);
        let invalid = self.coerce_quantity_column(&mut unified, quantity_column);
        if invalid > 0 {
            warn!(invalid, column = quantity_column, "数量列存在无法解析的值，已置为空");
        }

        info!(
            sources = paths.len(),
            columns = unified.columns.len(),
            rows = unified.row_count(),
            "总表拼接完成"
        );
        Ok(unified)
    }

    /// 数量列数值化，返回被置空的非空单元格数
    fn coerce_quantity_column(&self, table: &mut Table, quantity_column: &str) -> usize {
        let Some(col) = table.column_index(quantity_column) else {
            return 0;
        };

        let mut invalid = 0;
        for row in &mut table.rows {
            let coerced = self.cleaner.coerce_quantity(&row[col]);
            if coerced.is_empty() && !row[col].is_empty() {
                invalid += 1;
            }
            row[col] = coerced;
        }
        invalid
    }
}

/// 按顺序拼接多张表
///
/// # 规则
/// - 列: 所有输入列的并集，按首次出现顺序
/// - 行: 输入顺序 + 表内原顺序
/// - 缺失列填 Empty
pub fn concat_tables(tables: Vec<Table>) -> Table {
    let mut columns: Vec<String> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for table in &tables {
        for column in &table.columns {
            if !positions.contains_key(column) {
                positions.insert(column.clone(), columns.len());
                columns.push(column.clone());
            }
        }
    }

    let mut unified = Table::new(columns);
    let width = unified.columns.len();
    for table in tables {
        let mapping: Vec<usize> = table.columns.iter().map(|c| positions[c]).collect();
        for row in table.rows {
            let mut out = vec![CellValue::Empty; width];
            for (cell, &target) in row.into_iter().zip(&mapping) {
                out[target] = cell;
            }
            unified.rows.push(out);
        }
    }
    unified
}
