//! util — общие хелперы, не привязанные к конвейеру.
//!
//! Содержит:
//! - auto_workers(): размер пула воркеров по числу логических CPU.
//! - fmt_elapsed(): короткое человекочитаемое время для сводок.

use std::time::Duration;

use crate::consts::WORKER_RESERVE;

/// Default worker-pool size: logical CPUs minus WORKER_RESERVE, floored at 1
/// so small machines still make forward progress.
#[inline]
pub fn auto_workers() -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    cpus.saturating_sub(WORKER_RESERVE).max(1)
}

/// "1.2s" / "83.4s" — достаточно для итоговой строки extract'а.
#[inline]
pub fn fmt_elapsed(d: Duration) -> String {
    format!("{:.1}s", d.as_secs_f64())
}
