//! Process-level run ID for correlating recommendation work.
//!
//! Every process gets one ULID at first use; batch generation and failure
//! logs carry it so a whole batch can be traced back to the run that
//! produced it.

use std::sync::LazyLock;
use ulid::Ulid;

static RUN_ID: LazyLock<String> = LazyLock::new(|| Ulid::new().to_string());

/// The process-level run ID. Stable for the process lifetime, time-ordered,
/// 26 characters.
#[inline]
pub fn get() -> &'static str {
    &RUN_ID
}

/// A fresh ULID for sub-operations (per-request ids, event ids).
#[inline]
pub fn generate() -> String {
    Ulid::new().to_string()
}
