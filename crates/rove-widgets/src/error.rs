#![forbid(unsafe_code)]

//! Engine error model.
//!
//! # Design Principles
//!
//! 1. **Nothing terminates**: every error maps to a [`Recovery`] that leaves
//!    the engine usable; [`EngineError::is_recoverable`] is always true.
//! 2. **No-op conditions are not errors**: navigation with no destination,
//!    activation of a disabled member, and dismissal with an empty registry
//!    succeed without changing state.
//! 3. **Idempotent lifecycle**: unregistering an unknown widget, overlay, or
//!    scope returns `false` rather than an error.
//!
//! Errors are reserved for requests the engine cannot interpret: an id it
//! never issued, or an operation the widget's shape does not support.

use std::fmt;

use crate::focus::ScopeHandle;
use crate::state::WidgetId;

/// Errors returned by [`crate::Engine`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The widget id was never registered, or was unregistered.
    UnknownWidget(WidgetId),
    /// The scope handle was never issued, or its scope was destroyed.
    UnknownScope(ScopeHandle),
    /// The operation does not apply to the widget's shape (e.g. sorting a
    /// listbox, typing into a toolbar).
    ShapeMismatch {
        widget: WidgetId,
        operation: &'static str,
        shape: &'static str,
    },
}

/// Standard result type for engine APIs.
pub type Result<T> = std::result::Result<T, EngineError>;

// ── Recovery ────────────────────────────────────────────────────────────

/// What a caller should do after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// The request was rejected; widget state is unchanged.
    NoStateChange,
    /// The target no longer exists; drop the request.
    Ignore,
}

impl EngineError {
    /// Recovery action for this error.
    #[must_use]
    pub const fn recovery(&self) -> Recovery {
        match self {
            Self::UnknownWidget(_) | Self::UnknownScope(_) => Recovery::Ignore,
            Self::ShapeMismatch { .. } => Recovery::NoStateChange,
        }
    }

    /// Error type label for logs.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::UnknownWidget(_) => "unknown_widget",
            Self::UnknownScope(_) => "unknown_scope",
            Self::ShapeMismatch { .. } => "shape_mismatch",
        }
    }

    /// Whether the engine stays usable. Always true.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self.recovery(), Recovery::NoStateChange | Recovery::Ignore)
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownWidget(id) => write!(f, "unknown widget: {id}"),
            Self::UnknownScope(handle) => write!(f, "unknown focus scope: {}", handle.raw()),
            Self::ShapeMismatch {
                widget,
                operation,
                shape,
            } => write!(f, "{operation} is not supported by {shape} widget {widget}"),
        }
    }
}

impl std::error::Error for EngineError {}
