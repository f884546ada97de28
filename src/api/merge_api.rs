// ==========================================
// 钢构件清单合并系统 - 合并API
// ==========================================
// 职责: 封装一次完整的合并调用
// 流程: 参数校验 → 源文件去重 → 加载总表 → 组装报表 → 写出 → 汇总
// 红线: 任一步骤失败即整体失败，不保留半成品输出文件
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::MergeConfig;
use crate::domain::report::{MergeSummary, ReportSheet, SheetSummary};
use crate::engine::ReportAssembler;
use crate::exporter::{ReportWriter, XlsxReportWriter};
use crate::importer::{TableLoader, TableSource, UniversalFileParser};
use crate::perf::PerfGuard;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, info_span, warn};
use uuid::Uuid;

/// 输出文件扩展名
const OUTPUT_EXTENSION: &str = "xlsx";

// ==========================================
// MergeRequest - 合并请求
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeRequest {
    /// 源文件列表（顺序决定总表行顺序）
    pub sources: Vec<PathBuf>,

    /// 输出目录
    pub output_dir: Option<PathBuf>,

    /// 输出文件名（不含扩展名）
    pub output_name: Option<String>,
}

impl MergeRequest {
    pub fn new(sources: Vec<PathBuf>, output_dir: impl Into<PathBuf>, output_name: &str) -> Self {
        Self {
            sources,
            output_dir: Some(output_dir.into()),
            output_name: Some(output_name.to_string()),
        }
    }

    /// 校验请求参数
    ///
    /// # 规则
    /// - 源文件列表非空
    /// - 输出目录已设置且非空白
    /// - 输出文件名已设置且非空白
    pub fn validate(&self) -> ApiResult<()> {
        if self.sources.is_empty() {
            return Err(ApiError::InvalidInput("未选择任何源文件".to_string()));
        }

        let dir_blank = self
            .output_dir
            .as_ref()
            .map_or(true, |d| d.as_os_str().to_string_lossy().trim().is_empty());
        if dir_blank {
            return Err(ApiError::InvalidInput("未设置输出目录".to_string()));
        }

        let name_blank = self
            .output_name
            .as_deref()
            .map_or(true, |n| n.trim().is_empty());
        if name_blank {
            return Err(ApiError::InvalidInput("未设置输出文件名".to_string()));
        }

        Ok(())
    }

    /// 输出文件路径: <输出目录>/<文件名>.xlsx
    pub fn output_path(&self) -> ApiResult<PathBuf> {
        self.validate()?;
        match (&self.output_dir, &self.output_name) {
            (Some(dir), Some(name)) => {
                Ok(dir.join(format!("{}.{}", name.trim(), OUTPUT_EXTENSION)))
            }
            _ => Err(ApiError::InvalidInput("输出路径不完整".to_string())),
        }
    }

    /// 去重后的源文件（保持首次出现顺序）
    pub fn distinct_sources(&self) -> Vec<PathBuf> {
        let mut seen = HashSet::new();
        let mut distinct = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            if seen.insert(source.clone()) {
                distinct.push(source.clone());
            } else {
                warn!(file = %source.display(), "源文件重复，已跳过");
            }
        }
        distinct
    }
}

// ==========================================
// MergeApi - 合并API
// ==========================================
pub struct MergeApi {
    config: MergeConfig,
    source: Box<dyn TableSource>,
    writer: Box<dyn ReportWriter>,
}

impl MergeApi {
    /// 使用默认的文件解析器与 xlsx 写出器
    pub fn new(config: MergeConfig) -> Self {
        Self::with_io(
            config,
            Box::new(UniversalFileParser),
            Box::new(XlsxReportWriter),
        )
    }

    /// 指定数据源与写出器（测试或其他存储介质）
    pub fn with_io(
        config: MergeConfig,
        source: Box<dyn TableSource>,
        writer: Box<dyn ReportWriter>,
    ) -> Self {
        Self {
            config,
            source,
            writer,
        }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// 执行合并
    ///
    /// # 参数
    /// - request: 合并请求
    ///
    /// # 返回
    /// - Ok(MergeSummary): 输出文件路径及各工作表行数
    /// - Err(ApiError): 加载错误 / 校验错误 / 写出错误
    pub fn merge(&self, request: &MergeRequest) -> ApiResult<MergeSummary> {
        let run_id = Uuid::new_v4().to_string();
        let span = info_span!("merge", run_id = %run_id);
        let _enter = span.enter();

        let started_at = Utc::now();
        let clock = Instant::now();

        request.validate()?;
        self.config.validate()?;
        let output_path = request.output_path()?;
        let sources = request.distinct_sources();

        info!(
            sources = sources.len(),
            output = %output_path.display(),
            "开始合并"
        );

        // 1. 加载总表
        let unified = {
            let _perf = PerfGuard::new("load_sources");
            TableLoader::new(self.source.as_ref())
                .load_unified(&sources, &self.config.columns.quantity)?
        };

        // 2. 组装报表（必需列与工作表名校验在写出之前完成）
        let sheets = ReportAssembler::new(&self.config).assemble(&unified)?;

        // 3. 写出
        {
            let _perf = PerfGuard::new("write_report");
            if let Err(err) = self.write(&output_path, &sheets) {
                remove_partial_output(&output_path);
                return Err(err);
            }
        }

        let summary = MergeSummary {
            run_id,
            output_path,
            started_at,
            elapsed_ms: clock.elapsed().as_millis() as u64,
            source_count: sources.len(),
            unified_rows: unified.row_count(),
            sheets: sheets
                .iter()
                .map(|s| SheetSummary {
                    name: s.name.clone(),
                    rows: s.table.row_count(),
                })
                .collect(),
        };

        info!(
            sheets = summary.sheets.len(),
            unified_rows = summary.unified_rows,
            elapsed_ms = summary.elapsed_ms,
            "合并完成"
        );
        Ok(summary)
    }

    fn write(&self, output_path: &Path, sheets: &[ReportSheet]) -> ApiResult<()> {
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    ApiError::WriteError(format!("无法创建输出目录 {}: {}", parent.display(), e))
                })?;
            }
        }
        self.writer.write_report(output_path, sheets)?;
        Ok(())
    }
}

/// 删除写出失败后残留的输出文件
fn remove_partial_output(path: &Path) {
    if path.exists() {
        match fs::remove_file(path) {
            Ok(()) => warn!(file = %path.display(), "已删除未完成的输出文件"),
            Err(e) => warn!(file = %path.display(), error = %e, "无法删除未完成的输出文件"),
        }
    }
}
