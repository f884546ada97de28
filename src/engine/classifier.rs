// ==========================================
// 钢构件清单合并系统 - 材料族分类
// ==========================================
// 规则: 规格以材料族任一前缀开头即属于该族（区分大小写）
// 说明: 各材料族独立筛选，前缀重叠时同一行可进入多个族，不去重
// ==========================================

use crate::config::{ColumnNames, FamilyConfig};
use crate::domain::table::Table;
use crate::domain::types::PartRow;
use tracing::debug;

/// 某一材料族的分类结果（已投影为 规格 + 数量）
#[derive(Debug, Clone)]
pub struct ClassifiedFamily<'f> {
    pub family: &'f FamilyConfig,
    pub rows: Vec<PartRow>,
}

pub struct FamilyClassifier<'a> {
    columns: &'a ColumnNames,
}

impl<'a> FamilyClassifier<'a> {
    pub fn new(columns: &'a ColumnNames) -> Self {
        Self { columns }
    }

    /// 按材料族前缀表分类
    ///
    /// # 参数
    /// - view: 已标准化的表面处理视图
    /// - families: 材料族前缀表（按配置顺序）
    ///
    /// # 返回
    /// - 按配置顺序排列的非空材料族；无匹配行的材料族不出现
    pub fn classify<'f>(&self, view: &Table, families: &'f [FamilyConfig]) -> Vec<ClassifiedFamily<'f>> {
        let Some(spec_col) = view.column_index(&self.columns.spec) else {
            return Vec::new();
        };
        let quantity_col = view.column_index(&self.columns.quantity);

        // 先投影一次，各材料族在同一行集上独立筛选
        let projected: Vec<PartRow> = view
            .rows
            .iter()
            .filter_map(|row| {
                let spec = row[spec_col].as_text()?;
                let quantity = quantity_col.and_then(|col| row[col].as_number());
                Some(PartRow::new(spec.into_owned(), quantity))
            })
            .collect();

        let mut result = Vec::new();
        for family in families {
            let rows: Vec<PartRow> = projected
                .iter()
                .filter(|part| family.matches(&part.spec))
                .cloned()
                .collect();
            if rows.is_empty() {
                continue;
            }
            debug!(family = %family.name, rows = rows.len(), "材料族分类");
            result.push(ClassifiedFamily { family, rows });
        }
        result
    }
}
