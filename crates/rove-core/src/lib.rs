#![forbid(unsafe_code)]

//! Core: events, the DOM seam, members, and timers.
//!
//! # Role in rove
//! `rove-core` is the input layer. It owns the normalized event types the
//! engine consumes, the narrow DOM view the engine may query, the member
//! records the renderer supplies, and the deadline type behind every timer.
//!
//! # Primary responsibilities
//! - **Event**: canonical key and pointer events with bitflag modifiers.
//! - **DomView / DomFocus**: containment, tree-order queries, focus moves.
//! - **Document**: in-memory arena implementing the DOM seam.
//! - **Member**: one focusable/selectable unit of a widget.
//! - **Deadline**: cancellable timers driven by explicit instants.
//!
//! # How it fits in the system
//! `rove-widgets` consumes these types and runs the interaction state
//! machines. Nothing here holds widget state.

pub mod dom;
pub mod event;
pub mod logging;
pub mod member;
pub mod timer;

pub use dom::{Document, DomFocus, DomView, Element, NodeId, Tag};
pub use event::{
    Hit, KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerButton, PointerEvent,
    PointerEventKind,
};
pub use member::{Cell, Member, MemberId, position_of};
pub use timer::Deadline;
pub use web_time::Instant;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
