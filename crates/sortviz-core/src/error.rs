//! Error type shared by the configuration and session layers.
//!
//! Trace generation and playback never fail: anomalies during playback are
//! skipped (see [`crate::player`]). Only caller mistakes surface here.

use std::ops::RangeInclusive;

/// Errors returned by `sortviz-core`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortvizError {
    /// An algorithm name that none of the four algorithms answers to.
    #[error("unknown algorithm '{0}' (expected merge, quick, heap or bubble)")]
    UnknownAlgorithm(String),

    #[error("array size {size} outside {}..={}", .range.start(), .range.end())]
    ArraySizeOutOfRange {
        size: usize,
        range: RangeInclusive<usize>,
    },

    #[error("step delay {delay_ms}ms outside {}..={}ms", .range.start(), .range.end())]
    StepDelayOutOfRange {
        delay_ms: u64,
        range: RangeInclusive<u64>,
    },

    /// A sort is already playing; only one playback session may be active.
    #[error("a sort is already running; stop it first")]
    Busy,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SortvizError>;
