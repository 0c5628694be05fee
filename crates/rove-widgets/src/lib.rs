#![forbid(unsafe_code)]

//! Interaction state machines for composite widgets.
//!
//! A composite widget is one tab stop containing many members: a toolbar, a
//! radio group, a listbox, a menu, a tab list, a grid, a combobox. This crate
//! owns what happens between the key press and the attribute write:
//!
//! - [`nav`]: linear, grid, and overlay navigators behind one trait.
//! - [`roving`] and [`typeahead`]: the shared movement primitives.
//! - [`focus`]: focus scopes with Tab trapping, and focus-visible tracking.
//! - [`dismiss`]: outside-press and Escape dismissal of open overlays.
//! - [`aria`]: the pure synchronizer from widget state to attributes.
//! - [`engine`]: the dispatcher that ties them to a [`Host`].
//!
//! The renderer stays outside. It supplies members and writes attributes
//! through the [`Host`] trait.

pub mod aria;
pub mod config;
pub mod dismiss;
pub mod engine;
pub mod error;
pub mod focus;
pub mod host;
pub mod listeners;
pub mod nav;
pub mod roving;
pub mod state;
pub mod typeahead;

pub use aria::{AttrName, AttributeSet, synchronize};
pub use config::{EngineConfig, SortCycle};
pub use dismiss::{DismissReason, DismissalCoordinator};
pub use engine::{Dispatched, DocumentDispatch, Engine, SubscriptionId, WidgetSpec};
pub use error::{EngineError, Recovery, Result};
pub use focus::{FocusScopeManager, FocusVisible, Modality, ScopeHandle, TabOutcome};
pub use host::{Host, MemoryHost};
pub use listeners::{ListenerChange, ListenerKind, ListenerKinds, ListenerRegistry};
pub use nav::{
    Activation, Effect, FilterMode, GridConfig, LinearConfig, Navigator, Orientation,
    OverlayConfig, OverlayKind, SelectionAttr, Shape, Transition, WidgetKind,
};
pub use roving::{RovingTabindex, Travel};
pub use state::{OpenState, SortDirection, WidgetId, WidgetState};
pub use typeahead::TypeAhead;
