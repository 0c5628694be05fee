#![forbid(unsafe_code)]

//! rove public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from the internal crates and offers a prelude
//! for day-to-day usage.
//!
//! ```
//! use rove::prelude::*;
//!
//! let mut host = MemoryHost::new();
//! let root = host.document().root();
//! let list = host.document_mut().append(root, Element::generic("ul"));
//! let id = WidgetId::new(1);
//! for name in ["red", "green", "blue"] {
//!     host.add_member(id, list, Member::new(name));
//! }
//!
//! let mut engine = Engine::new(host);
//! engine.register_widget(id, WidgetSpec::new(WidgetKind::RadioGroup));
//! let out = engine.dispatch_key(id, KeyEvent::new(KeyCode::Down))?;
//! assert_eq!(out.state.active().map(|m| m.as_str()), Some("green"));
//! # Ok::<(), rove::EngineError>(())
//! ```

// --- Core re-exports -------------------------------------------------------

pub use rove_core::{
    Cell, Deadline, Document, DomFocus, DomView, Element, Hit, Instant, KeyCode, KeyEvent,
    KeyEventKind, Member, MemberId, Modifiers, NodeId, PointerButton, PointerEvent,
    PointerEventKind, Tag,
};

// --- Engine re-exports -----------------------------------------------------

pub use rove_widgets::{
    Activation, AttrName, AttributeSet, Dispatched, DocumentDispatch, Effect, Engine,
    EngineConfig, EngineError, FilterMode, GridConfig, Host, LinearConfig, ListenerChange,
    ListenerKind, MemoryHost, Modality, OpenState, Orientation, OverlayConfig, OverlayKind,
    Recovery, Result, ScopeHandle, SelectionAttr, Shape, SortCycle, SortDirection, SubscriptionId,
    WidgetId, WidgetKind, WidgetSpec, WidgetState, synchronize,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AttrName, Document, DomFocus, DomView, Effect, Element, Engine, EngineConfig, EngineError,
        Hit, Host, KeyCode, KeyEvent, Member, MemberId, MemoryHost, Modifiers, NodeId,
        PointerEvent, Result, WidgetId, WidgetKind, WidgetSpec, WidgetState,
    };

    pub use crate::{core, widgets};
}

pub use rove_core as core;
pub use rove_widgets as widgets;
