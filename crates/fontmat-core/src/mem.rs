//! Allocation diagnostics for heap-owned matrices
//!
//! Every matrix that moves onto the heap through
//! [`MatrixHandle::owned`](crate::MatrixHandle::owned) is tallied here,
//! and every one that drops is tallied back out. The counters are
//! observational: nothing reads them to make decisions. They exist so
//! a leak or an unexpected copy storm shows up as numbers instead of a
//! profiler session.
//!
//! # Environment Variable
//!
//! Set `FONTMAT_MEM_TRACE=1` to additionally emit a `log::trace!` line
//! per allocation event:
//!
//! ```bash
//! FONTMAT_MEM_TRACE=1 ./my_app
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::OnceLock;

use crate::matrix::Matrix;

/// Bytes charged per heap matrix
pub const MATRIX_SIZE: usize = std::mem::size_of::<Matrix>();

static LIVE: AtomicUsize = AtomicUsize::new(0);
static TOTAL_ALLOCS: AtomicUsize = AtomicUsize::new(0);
static TOTAL_FREES: AtomicUsize = AtomicUsize::new(0);

/// Global flag for per-event trace logging (disabled by default)
static TRACE_ENABLED: AtomicBool = AtomicBool::new(false);

/// Whether the env var has been checked
static ENV_CHECKED: OnceLock<()> = OnceLock::new();

fn trace_enabled() -> bool {
    ENV_CHECKED.get_or_init(|| {
        if let Ok(val) = std::env::var("FONTMAT_MEM_TRACE") {
            let enabled = matches!(val.to_lowercase().as_str(), "1" | "true" | "yes" | "on");
            if enabled {
                TRACE_ENABLED.store(true, Ordering::SeqCst);
                log::info!("Fontmat memory tracing enabled via FONTMAT_MEM_TRACE env var");
            }
        }
    });
    TRACE_ENABLED.load(Ordering::SeqCst)
}

/// Enable or disable per-event trace logging at runtime
///
/// This overrides the environment variable setting. The counters keep
/// running either way; only the log output is affected.
pub fn set_trace_enabled(enabled: bool) {
    ENV_CHECKED.get_or_init(|| {});
    TRACE_ENABLED.store(enabled, Ordering::SeqCst);
}

/// Record one matrix-sized allocation
pub(crate) fn note_alloc() {
    let live = LIVE.fetch_add(1, Ordering::Relaxed) + 1;
    TOTAL_ALLOCS.fetch_add(1, Ordering::Relaxed);
    if trace_enabled() {
        log::trace!("matrix alloc ({MATRIX_SIZE} bytes), {live} live");
    }
}

/// Record one matrix-sized free
pub(crate) fn note_free() {
    let live = LIVE.fetch_sub(1, Ordering::Relaxed).saturating_sub(1);
    TOTAL_FREES.fetch_add(1, Ordering::Relaxed);
    if trace_enabled() {
        log::trace!("matrix free ({MATRIX_SIZE} bytes), {live} live");
    }
}

/// Point-in-time allocation counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemStats {
    /// Heap matrices currently alive
    pub live: usize,
    /// Matrices allocated since process start
    pub total_allocs: usize,
    /// Matrices freed since process start
    pub total_frees: usize,
}

impl MemStats {
    /// Bytes currently charged to heap matrices
    pub fn live_bytes(&self) -> usize {
        self.live * MATRIX_SIZE
    }
}

/// Snapshot the counters
pub fn stats() -> MemStats {
    MemStats {
        live: LIVE.load(Ordering::Relaxed),
        total_allocs: TOTAL_ALLOCS.load(Ordering::Relaxed),
        total_frees: TOTAL_FREES.load(Ordering::Relaxed),
    }
}
