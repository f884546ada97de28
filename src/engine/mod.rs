// ==========================================
// 钢构件清单合并系统 - 引擎层
// ==========================================
// 职责: 拆分 → 标准化 → 分类 → 汇总 → 组装
// 红线: 纯内存变换，不做文件读写
// ==========================================

pub mod assembler;
pub mod classifier;
pub mod error;
pub mod normalizer;
pub mod processors;
pub mod splitter;

// 重导出核心类型
pub use assembler::ReportAssembler;
pub use classifier::{ClassifiedFamily, FamilyClassifier};
pub use error::{EngineError, EngineResult};
pub use normalizer::CodeNormalizer;
pub use processors::{processor_for, FamilyProcessor};
pub use splitter::TreatmentSplitter;
