// ==========================================
// 钢构件清单合并系统 - API层
// ==========================================
// 职责: 面向调用方（命令行 / 其他宿主）的业务接口
// ==========================================

pub mod error;
pub mod merge_api;

pub use error::{ApiError, ApiResult, ErrorKind};
pub use merge_api::{MergeApi, MergeRequest};
