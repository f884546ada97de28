// ==========================================
// 钢构件清单合并系统 - 报表组装
// ==========================================
// 输出顺序:
//   1. 总
//   2. 非标总（非空时）
//   3. 按表面处理配置顺序:
//      a. <处理方式>总（标准化后的视图，非空时）
//      b. 按材料族配置顺序: <材料族><后缀>（分类结果非空时）
// 约束: 工作表名唯一，重复即报错（不覆盖）
// ==========================================

use crate::config::MergeConfig;
use crate::domain::report::ReportSheet;
use crate::domain::table::Table;
use crate::engine::classifier::FamilyClassifier;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::normalizer::CodeNormalizer;
use crate::engine::processors::processor_for;
use crate::engine::splitter::TreatmentSplitter;
use crate::perf::PerfGuard;
use std::collections::HashSet;
use tracing::{debug, info, instrument};

pub struct ReportAssembler<'a> {
    config: &'a MergeConfig,
}

impl<'a> ReportAssembler<'a> {
    pub fn new(config: &'a MergeConfig) -> Self {
        Self { config }
    }

    /// 校验总表包含 规格 / 数量 / 表面处理 列
    pub fn check_required_columns(&self, unified: &Table) -> EngineResult<()> {
        let columns = &self.config.columns;
        for name in [&columns.spec, &columns.quantity, &columns.treatment] {
            if !unified.has_column(name) {
                return Err(EngineError::MissingColumn(name.clone()));
            }
        }
        Ok(())
    }

    /// 组装全部输出工作表
    ///
    /// # 参数
    /// - unified: 总表（数量列已数值化）
    ///
    /// # 返回
    /// - Ok(Vec<ReportSheet>): 按输出顺序排列
    /// - Err(EngineError): 缺少必需列 / 工作表名重复
    #[instrument(skip_all, fields(rows = unified.row_count()))]
    pub fn assemble(&self, unified: &Table) -> EngineResult<Vec<ReportSheet>> {
        let _perf = PerfGuard::new("assemble_report");
        self.check_required_columns(unified)?;

        let config = self.config;
        let splitter = TreatmentSplitter::new(&config.columns, &config.markers);
        let normalizer = CodeNormalizer::new(&config.columns, &config.markers);
        let classifier = FamilyClassifier::new(&config.columns);

        let mut sheets = vec![ReportSheet::new(config.sheets.total.clone(), unified.clone())];

        let non_standard = splitter.non_standard(unified);
        if !non_standard.is_empty() {
            sheets.push(ReportSheet::new(
                config.sheets.non_standard_total.clone(),
                non_standard,
            ));
        }

        for treatment in &config.treatments {
            let view = splitter.split(unified, &treatment.code);
            if view.is_empty() {
                debug!(code = %treatment.code, "表面处理视图为空，跳过");
                continue;
            }

            let normalized = normalizer.normalize(&view);
            let classified = classifier.classify(&normalized, &config.families);
            sheets.push(ReportSheet::new(treatment.total_sheet.clone(), normalized));

            for entry in classified {
                let processor =
                    processor_for(entry.family.processor, &config.columns, &config.markers);
                let table = processor.process(&entry.rows);
                debug!(
                    family = %entry.family.name,
                    processor = %entry.family.processor,
                    input_rows = entry.rows.len(),
                    output_rows = table.row_count(),
                    "材料族汇总完成"
                );
                sheets.push(ReportSheet::new(
                    treatment.family_sheet_name(&entry.family.name),
                    table,
                ));
            }
        }

        ensure_unique_names(&sheets)?;
        info!(sheets = sheets.len(), "报表组装完成");
        Ok(sheets)
    }
}

/// 工作表名唯一性校验（Excel 工作表名不区分大小写）
fn ensure_unique_names(sheets: &[ReportSheet]) -> EngineResult<()> {
    let mut seen: HashSet<String> = HashSet::new();
    for sheet in sheets {
        if !seen.insert(sheet.name.to_lowercase()) {
            return Err(EngineError::DuplicateSheetName(sheet.name.clone()));
        }
    }
    Ok(())
}
