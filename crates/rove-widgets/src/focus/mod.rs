#![forbid(unsafe_code)]

//! Focus scopes (traps with restore) and focus-visible tracking.

pub mod scope;
pub mod visible;

pub use scope::{FocusScopeManager, ScopeHandle, TabOutcome};
pub use visible::{FocusVisible, Modality};
