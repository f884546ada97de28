// ==========================================
// 性能统计
// ==========================================
// 按阶段记录耗时，输出到 target = "perf"
// ==========================================

use std::time::Instant;

/// 性能统计 Guard：离开作用域时记录 elapsed_ms
///
/// 使用方式：
/// ```ignore
/// let _perf = steel_merge::perf::PerfGuard::new("load_sources");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: Instant::now(),
        }
    }

    /// 已耗时（毫秒）
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms = self.elapsed_ms(),
            "done"
        );
    }
}
