// ==========================================
// 钢构件清单合并系统 - API层错误类型
// ==========================================
// 职责: 汇总导入/引擎/导出/配置各层错误，转换为面向调用方的错误
// 分类: 加载错误 / 校验错误 / 写出错误
// ==========================================

use crate::config::ConfigError;
use crate::engine::EngineError;
use crate::exporter::ExportError;
use crate::importer::{ImportError, SourceLoadError};
use thiserror::Error;

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 源文件无法打开或解析
    Load,
    /// 调用参数缺失 / 缺少必需列 / 工作表重名 / 配置非法
    Validation,
    /// 报表写出失败
    Write,
}

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 校验错误（写出之前报告）
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("总表缺少必需列: {0}")]
    MissingColumn(String),

    #[error("工作表名称重复: {0}")]
    DuplicateSheetName(String),

    #[error("配置错误: {0}")]
    ConfigError(#[from] ConfigError),

    // ==========================================
    // 加载错误
    // ==========================================
    #[error("文件加载失败 ({path}): {source}")]
    LoadError {
        path: String,
        #[source]
        source: ImportError,
    },

    // ==========================================
    // 写出错误
    // ==========================================
    #[error("报表写出失败: {0}")]
    WriteError(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::LoadError { .. } => ErrorKind::Load,
            ApiError::WriteError(_) => ErrorKind::Write,
            ApiError::InvalidInput(_)
            | ApiError::MissingColumn(_)
            | ApiError::DuplicateSheetName(_)
            | ApiError::ConfigError(_) => ErrorKind::Validation,
        }
    }
}

// ==========================================
// 从各层错误转换
// ==========================================
impl From<SourceLoadError> for ApiError {
    fn from(err: SourceLoadError) -> Self {
        ApiError::LoadError {
            path: err.path.display().to_string(),
            source: err.error,
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::MissingColumn(name) => ApiError::MissingColumn(name),
            EngineError::DuplicateSheetName(name) => ApiError::DuplicateSheetName(name),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::WriteError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
