#![forbid(unsafe_code)]

//! Keyboard and pointer navigation state machines.
//!
//! Every widget picks one of three shapes:
//!
//! - [`LinearConfig`]: an ordered list (toolbar, radio group, listbox, menu,
//!   tab list, disclosure group, toggle group).
//! - [`GridConfig`]: a two-dimensional layout keyed by member cells (grid
//!   list, table).
//! - [`OverlayConfig`]: a trigger with a transient popup of options
//!   (combobox, custom select, menu button).
//!
//! Each shape implements [`Navigator`]; [`Shape`] forwards to the selected
//! one. A navigator never reads the DOM. It receives the live member list
//! through a [`NavContext`], mutates a [`WidgetState`], and reports what
//! happened as a [`Transition`].
//!
//! # Invariants
//!
//! 1. A command with no valid destination leaves the state untouched.
//! 2. The active member is never disabled after a transition if an enabled
//!    member exists.
//! 3. Single-select configurations never leave more than one id selected.

mod grid;
mod linear;
mod overlay;

use rove_core::{Instant, KeyEvent, Member, MemberId, PointerEvent};

pub use grid::{GridLayout, apply_sort};
pub use overlay::filter_members;

use crate::config::{EngineConfig, SortCycle};
use crate::state::{SortDirection, WidgetState};
use crate::typeahead::TypeAhead;

/// Which arrow keys move through a linear widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Left/Right (toolbars, tab lists).
    Horizontal,
    /// Up/Down (menus, listboxes).
    #[default]
    Vertical,
    /// Both arrow pairs.
    Both,
}

/// What activating a member (Enter, Space, click) does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Activation {
    /// Replace the selection with the member (radio, single listbox, tab).
    #[default]
    Single,
    /// Flip the member's selection on Enter or Space (toggle and
    /// disclosure groups, multi-select listboxes).
    Toggle,
    /// Native checkbox parity: Space flips, Enter is left unhandled.
    Checkbox,
    /// Invoke the member's action (menu items).
    Action {
        /// Close the owning overlay after the action.
        closes_owner: bool,
    },
    /// Flip the widget-level pressed state (a lone toggle button).
    Press,
}

/// Attribute that exposes selection membership on each member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionAttr {
    /// `aria-selected`.
    #[default]
    Selected,
    /// `aria-checked`.
    Checked,
    /// `aria-pressed`.
    Pressed,
    /// `aria-expanded` (disclosure buttons).
    Expanded,
    /// `aria-current`.
    Current,
    /// No selection attribute (toolbars, menus).
    None,
}

/// Parameters of the linear shape.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearConfig {
    /// Arrow keys that move the active member.
    pub orientation: Orientation,
    /// Wrap past either end (default: true).
    pub wrap: bool,
    /// Effect of Enter/Space/click.
    pub activation: Activation,
    /// Attribute exposing selection.
    pub selection_attr: SelectionAttr,
    /// Moving the active member also selects it (automatic tab activation).
    pub selection_follows_focus: bool,
    /// Printable characters jump to matching members.
    pub typeahead: bool,
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            wrap: true,
            activation: Activation::Single,
            selection_attr: SelectionAttr::Selected,
            selection_follows_focus: false,
            typeahead: true,
        }
    }
}

impl LinearConfig {
    /// Set the orientation.
    #[must_use]
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Enable or disable wrapping.
    #[must_use]
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Set the activation mode.
    #[must_use]
    pub fn activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    /// Set the selection attribute.
    #[must_use]
    pub fn selection_attr(mut self, attr: SelectionAttr) -> Self {
        self.selection_attr = attr;
        self
    }

    /// Select members as they become active.
    #[must_use]
    pub fn selection_follows_focus(mut self, follows: bool) -> Self {
        self.selection_follows_focus = follows;
        self
    }

    /// Enable or disable type-ahead.
    #[must_use]
    pub fn typeahead(mut self, enabled: bool) -> Self {
        self.typeahead = enabled;
        self
    }
}

/// Parameters of the grid shape. Grids never wrap.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Clicks and Space add to the selection instead of replacing it.
    pub multi_select: bool,
    /// Moving the active cell selects it (single-select only).
    pub selection_follows_focus: bool,
    /// Rows moved by PageUp/PageDown; falls back to the engine default.
    pub page_size: Option<usize>,
    /// Number of sortable column headers (0 for grids that do not sort).
    pub sortable_columns: usize,
    /// Sort cycle; falls back to the engine default.
    pub sort_cycle: Option<SortCycle>,
}

impl GridConfig {
    /// Enable multi-select.
    #[must_use]
    pub fn multi_select(mut self, multi: bool) -> Self {
        self.multi_select = multi;
        self
    }

    /// Select cells as they become active.
    #[must_use]
    pub fn selection_follows_focus(mut self, follows: bool) -> Self {
        self.selection_follows_focus = follows;
        self
    }

    /// Set the page size.
    #[must_use]
    pub fn page_size(mut self, rows: usize) -> Self {
        self.page_size = Some(rows.max(1));
        self
    }

    /// Declare `columns` sortable headers.
    #[must_use]
    pub fn sortable_columns(mut self, columns: usize) -> Self {
        self.sortable_columns = columns;
        self
    }

    /// Override the sort cycle.
    #[must_use]
    pub fn sort_cycle(mut self, cycle: SortCycle) -> Self {
        self.sort_cycle = Some(cycle);
        self
    }
}

/// Flavor of overlay widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverlayKind {
    /// Editable input with a filtered listbox.
    Combobox,
    /// Button trigger with a listbox (custom select).
    #[default]
    Select,
    /// Button trigger with a popup that has no options of its own (menu
    /// button, popover). Its items live in a separate widget owned by it.
    Popup,
}

/// How combobox text filters options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterMode {
    /// Label starts with the text.
    #[default]
    Prefix,
    /// Label contains the text.
    Substring,
}

/// Parameters of the overlay shape.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayConfig {
    /// Overlay flavor.
    pub kind: OverlayKind,
    /// Filter applied to combobox text.
    pub filter: FilterMode,
    /// Arrow keys wrap among visible options (default: true).
    pub wrap: bool,
    /// Printable keys jump to options (select only).
    pub typeahead: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            kind: OverlayKind::Select,
            filter: FilterMode::Prefix,
            wrap: true,
            typeahead: true,
        }
    }
}

impl OverlayConfig {
    /// Set the overlay kind.
    #[must_use]
    pub fn kind(mut self, kind: OverlayKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the filter mode.
    #[must_use]
    pub fn filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    /// Enable or disable wrapping.
    #[must_use]
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }
}

/// Named widget presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WidgetKind {
    Toolbar,
    RadioGroup,
    CheckboxGroup,
    /// Plain list of native-style checkboxes. Same behavior as
    /// [`WidgetKind::CheckboxGroup`].
    NativeCheckboxList,
    Listbox,
    MultiListbox,
    Menu,
    TabList,
    DisclosureGroup,
    ToggleGroup,
    ToggleButton,
    GridList,
    Table,
    Combobox,
    Select,
    MenuButton,
}

impl WidgetKind {
    /// The shape and default parameters of this preset.
    #[must_use]
    pub fn shape(self) -> Shape {
        let linear = LinearConfig::default();
        match self {
            Self::Toolbar => Shape::Linear(
                linear
                    .orientation(Orientation::Horizontal)
                    .activation(Activation::Action {
                        closes_owner: false,
                    })
                    .selection_attr(SelectionAttr::None)
                    .typeahead(false),
            ),
            Self::RadioGroup => Shape::Linear(
                linear
                    .orientation(Orientation::Both)
                    .selection_attr(SelectionAttr::Checked)
                    .selection_follows_focus(true)
                    .typeahead(false),
            ),
            Self::CheckboxGroup | Self::NativeCheckboxList => Shape::Linear(
                linear
                    .activation(Activation::Checkbox)
                    .selection_attr(SelectionAttr::Checked)
                    .typeahead(false),
            ),
            Self::Listbox => Shape::Linear(linear.selection_follows_focus(true)),
            Self::MultiListbox => Shape::Linear(linear.activation(Activation::Toggle)),
            Self::Menu => Shape::Linear(
                linear
                    .activation(Activation::Action { closes_owner: true })
                    .selection_attr(SelectionAttr::None),
            ),
            Self::TabList => Shape::Linear(
                linear
                    .orientation(Orientation::Horizontal)
                    .selection_follows_focus(true)
                    .typeahead(false),
            ),
            Self::DisclosureGroup => Shape::Linear(
                linear
                    .activation(Activation::Toggle)
                    .selection_attr(SelectionAttr::Expanded)
                    .typeahead(false),
            ),
            Self::ToggleGroup => Shape::Linear(
                linear
                    .orientation(Orientation::Horizontal)
                    .activation(Activation::Toggle)
                    .selection_attr(SelectionAttr::Pressed)
                    .typeahead(false),
            ),
            Self::ToggleButton => Shape::Linear(
                linear
                    .activation(Activation::Press)
                    .selection_attr(SelectionAttr::None)
                    .typeahead(false),
            ),
            Self::GridList => Shape::Grid(GridConfig::default().multi_select(true)),
            Self::Table => Shape::Grid(GridConfig::default().multi_select(true)),
            Self::Combobox => Shape::Overlay(OverlayConfig::default().kind(OverlayKind::Combobox)),
            Self::Select => Shape::Overlay(OverlayConfig::default()),
            Self::MenuButton => Shape::Overlay(OverlayConfig::default().kind(OverlayKind::Popup)),
        }
    }
}

/// A widget's navigation shape.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    Linear(LinearConfig),
    Grid(GridConfig),
    Overlay(OverlayConfig),
}

impl Shape {
    /// Short name used in logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Linear(_) => "linear",
            Self::Grid(_) => "grid",
            Self::Overlay(_) => "overlay",
        }
    }

    /// Whether the shape keeps a roving tabindex over its members.
    #[must_use]
    pub const fn is_roving(&self) -> bool {
        !matches!(self, Self::Overlay(_))
    }

    /// The overlay parameters, if this is an overlay.
    #[must_use]
    pub const fn as_overlay(&self) -> Option<&OverlayConfig> {
        match self {
            Self::Overlay(config) => Some(config),
            _ => None,
        }
    }

    /// The grid parameters, if this is a grid.
    #[must_use]
    pub const fn as_grid(&self) -> Option<&GridConfig> {
        match self {
            Self::Grid(config) => Some(config),
            _ => None,
        }
    }

    fn navigator(&self) -> &dyn Navigator {
        match self {
            Self::Linear(config) => config,
            Self::Grid(config) => config,
            Self::Overlay(config) => config,
        }
    }
}

impl From<WidgetKind> for Shape {
    fn from(kind: WidgetKind) -> Self {
        kind.shape()
    }
}

impl Navigator for Shape {
    fn init(&self, state: &mut WidgetState, members: &[Member], preselected: Option<&MemberId>) {
        self.navigator().init(state, members, preselected);
    }

    fn reconcile(&self, state: &mut WidgetState, members: &[Member]) -> bool {
        self.navigator().reconcile(state, members)
    }

    fn handle_key(&self, state: &mut WidgetState, key: &KeyEvent, cx: &mut NavContext<'_>) -> Transition {
        self.navigator().handle_key(state, key, cx)
    }

    fn handle_pointer(
        &self,
        state: &mut WidgetState,
        event: &PointerEvent,
        cx: &mut NavContext<'_>,
    ) -> Transition {
        self.navigator().handle_pointer(state, event, cx)
    }
}

/// Side effect requested by a transition. The engine performs the ones it
/// can (focus moves, closing owners) and returns all of them to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A member was activated (clicked, Enter, Space, or committed).
    Activated(MemberId),
    /// A member was held past the long-press threshold.
    LongPress(MemberId),
    /// The owning overlay should close.
    CloseOwner,
    /// DOM focus should follow the active member.
    FocusMember(MemberId),
    /// DOM focus should return to the widget's trigger.
    FocusTrigger,
    /// A column's sort direction changed.
    SortChanged {
        column: usize,
        direction: SortDirection,
    },
}

/// Outcome of feeding one event to a navigator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// The event was consumed (the host should suppress its default action).
    pub handled: bool,
    /// The widget state changed.
    pub changed: bool,
    /// Requested side effects, in order.
    pub effects: Vec<Effect>,
}

impl Transition {
    /// The event is not for this widget.
    #[must_use]
    pub fn ignored() -> Self {
        Self::default()
    }

    /// The event was consumed.
    #[must_use]
    pub fn handled(changed: bool) -> Self {
        Self {
            handled: true,
            changed,
            effects: Vec::new(),
        }
    }

    /// Append an effect.
    #[must_use]
    pub fn with(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub(crate) fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Fold another transition into this one.
    pub(crate) fn merge(&mut self, other: Self) {
        self.handled |= other.handled;
        self.changed |= other.changed;
        self.effects.extend(other.effects);
    }
}

/// Inputs a navigator may consult besides the state it mutates.
pub struct NavContext<'a> {
    /// Live member list, freshly queried for this invocation.
    pub members: &'a [Member],
    /// The widget's type-ahead buffer.
    pub typeahead: &'a mut TypeAhead,
    /// Event time.
    pub now: Instant,
    /// Engine defaults.
    pub config: &'a EngineConfig,
}

impl<'a> NavContext<'a> {
    /// Bundle a navigation context.
    pub fn new(
        members: &'a [Member],
        typeahead: &'a mut TypeAhead,
        now: Instant,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            members,
            typeahead,
            now,
            config,
        }
    }

    pub(crate) fn page_size(&self, local: Option<usize>) -> usize {
        local.unwrap_or(self.config.page_size).max(1)
    }
}

/// A navigation state machine for one widget shape.
pub trait Navigator {
    /// Pick the initial active member.
    fn init(&self, state: &mut WidgetState, members: &[Member], preselected: Option<&MemberId>);

    /// Re-resolve the state against a fresh member list. Returns whether
    /// anything changed.
    fn reconcile(&self, state: &mut WidgetState, members: &[Member]) -> bool {
        let before = state.clone();
        state.prune_selection(members);
        if state.reconcile(members).is_none() {
            self.init(state, members, None);
        }
        *state != before
    }

    /// Feed a key event.
    fn handle_key(&self, state: &mut WidgetState, key: &KeyEvent, cx: &mut NavContext<'_>) -> Transition;

    /// Feed a pointer event.
    fn handle_pointer(
        &self,
        state: &mut WidgetState,
        event: &PointerEvent,
        cx: &mut NavContext<'_>,
    ) -> Transition;
}
