#![forbid(unsafe_code)]

//! Tracing re-exports.
//!
//! With the `tracing` feature enabled, dependent crates log through
//! `rove_core::debug!` and friends without naming `tracing` themselves.
//! Without it this module is empty and every call site is compiled out
//! behind `#[cfg(feature = "tracing")]`.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
