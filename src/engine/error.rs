// ==========================================
// 钢构件清单合并系统 - 引擎错误类型
// ==========================================

use thiserror::Error;

/// 引擎层错误（均属于校验类错误，发生在写出之前）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("总表缺少必需列: {0}")]
    MissingColumn(String),

    #[error("工作表名称重复: {0}")]
    DuplicateSheetName(String),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
