#![forbid(unsafe_code)]

//! The engine: per-widget state machines behind one dispatcher.
//!
//! # Flow
//!
//! ```text
//! host event ─► Engine::dispatch_* ─► reconcile(members) ─► Navigator
//!                                                              │
//!                  subscribers ◄─ apply_state ◄─ synchronize ◄─┘ (if changed)
//! ```
//!
//! Every entry point queries the host for the live member list first, so a
//! member index never outlives one call. Document-level events go through
//! [`Engine::document_key`] and [`Engine::document_pointer_down`], which feed
//! focus traps, dismissal, and focus-visible tracking.
//!
//! # Invariants
//!
//! 1. The synchronizer runs exactly once per accepted transition, and
//!    `apply_state` is called with its output.
//! 2. An overlay is registered with the dismissal coordinator exactly while
//!    it is open and has a container bound.
//! 3. Blurring or unregistering a widget cancels its type-ahead and
//!    long-press timers.
//!
//! # Failure Modes
//!
//! - Unknown widget ids return [`EngineError::UnknownWidget`]; nothing else
//!   is touched.
//! - Operations that do not fit the widget's shape return
//!   [`EngineError::ShapeMismatch`] and leave state unchanged.

use ahash::AHashMap;
use rove_core::{
    Deadline, Hit, Instant, KeyCode, KeyEvent, Member, MemberId, NodeId, PointerEvent,
    PointerEventKind, position_of,
};

use crate::aria::{AttributeSet, synchronize};
use crate::config::EngineConfig;
use crate::dismiss::{DismissReason, DismissalCoordinator};
use crate::error::{EngineError, Result};
use crate::focus::{FocusScopeManager, FocusVisible, ScopeHandle, TabOutcome};
use crate::host::Host;
use crate::listeners::{ListenerChange, ListenerKind, ListenerRegistry};
use crate::nav::{
    Activation, Effect, NavContext, Navigator, OverlayKind, Shape, Transition, apply_sort,
};
use crate::roving::Travel;
use crate::state::{WidgetId, WidgetState};
use crate::typeahead::TypeAhead;

/// Registration parameters of a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSpec {
    shape: Shape,
    container: Option<NodeId>,
    trigger: Option<NodeId>,
    owner: Option<WidgetId>,
    selected: Vec<MemberId>,
    pressed: Option<bool>,
}

impl WidgetSpec {
    /// A widget of the given shape or preset.
    #[must_use]
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            container: None,
            trigger: None,
            owner: None,
            selected: Vec::new(),
            pressed: None,
        }
    }

    /// Node whose subtree is "inside" the widget (the popup of an overlay).
    #[must_use]
    pub fn container(mut self, node: NodeId) -> Self {
        self.container = Some(node);
        self
    }

    /// Trigger node: the button or input focus returns to.
    #[must_use]
    pub fn trigger(mut self, node: NodeId) -> Self {
        self.trigger = Some(node);
        self
    }

    /// Overlay this widget lives in (a menu inside a menu button).
    #[must_use]
    pub fn owner(mut self, owner: WidgetId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Pre-select a member (a checked radio, a select's current value).
    #[must_use]
    pub fn selected(mut self, id: impl Into<MemberId>) -> Self {
        self.selected.push(id.into());
        self
    }

    /// Initial pressed state of a toggle button.
    #[must_use]
    pub fn pressed(mut self, pressed: bool) -> Self {
        self.pressed = Some(pressed);
        self
    }

    /// The shape.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    fn single_select(&self) -> bool {
        match &self.shape {
            Shape::Linear(config) => {
                !matches!(config.activation, Activation::Toggle | Activation::Checkbox)
            }
            Shape::Grid(config) => !config.multi_select,
            Shape::Overlay(_) => true,
        }
    }
}

/// Result of dispatching an event to a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    /// Widget state after the event.
    pub state: WidgetState,
    /// The event was consumed; the host should suppress its default action.
    pub handled: bool,
    /// Side effects, in order. Focus moves have already been performed.
    pub effects: Vec<Effect>,
}

/// Result of a document-level event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentDispatch {
    /// The event was consumed.
    pub handled: bool,
    /// Overlays closed by this event, innermost first.
    pub dismissed: Vec<WidgetId>,
    /// Node that received focus, if focus moved.
    pub focused: Option<NodeId>,
}

/// Handle of a state-change subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(WidgetId, &WidgetState)>;

#[derive(Debug)]
struct WidgetEntry {
    spec: WidgetSpec,
    state: WidgetState,
    typeahead: TypeAhead,
    press: Deadline,
    press_member: Option<MemberId>,
    attributes: AttributeSet,
}

/// Interaction engine over a [`Host`].
pub struct Engine<H: Host> {
    host: H,
    config: EngineConfig,
    widgets: AHashMap<WidgetId, WidgetEntry>,
    scopes: FocusScopeManager,
    dismissal: DismissalCoordinator,
    listeners: ListenerRegistry,
    focus_visible: FocusVisible,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<H: Host + std::fmt::Debug> std::fmt::Debug for Engine<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("host", &self.host)
            .field("config", &self.config)
            .field("widgets", &self.widgets.len())
            .field("scopes", &self.scopes.len())
            .field("open_overlays", &self.dismissal.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<H: Host> Engine<H> {
    /// Engine with default configuration.
    pub fn new(host: H) -> Self {
        Self::with_config(host, EngineConfig::default())
    }

    /// Engine with explicit configuration.
    pub fn with_config(host: H, config: EngineConfig) -> Self {
        Self {
            host,
            config,
            widgets: AHashMap::new(),
            scopes: FocusScopeManager::new(),
            dismissal: DismissalCoordinator::new(),
            listeners: ListenerRegistry::new(),
            focus_visible: FocusVisible::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access, for DOM and member mutations.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared document listener counts.
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Document listeners the host must attach or detach, in order, since
    /// the previous call.
    pub fn take_listener_changes(&mut self) -> Vec<(ListenerKind, ListenerChange)> {
        self.listeners.take_changes()
    }

    /// Focus-visible tracker.
    pub fn focus_visible(&self) -> &FocusVisible {
        &self.focus_visible
    }

    /// Open overlays registered for dismissal, outermost first.
    pub fn open_overlays(&self) -> Vec<WidgetId> {
        self.dismissal.open_overlays()
    }

    /// State of a widget.
    pub fn state(&self, widget: WidgetId) -> Option<&WidgetState> {
        self.widgets.get(&widget).map(|e| &e.state)
    }

    /// Attribute set last applied for a widget.
    pub fn attributes(&self, widget: WidgetId) -> Option<&AttributeSet> {
        self.widgets.get(&widget).map(|e| &e.attributes)
    }

    /// Whether `widget` is registered.
    pub fn is_registered(&self, widget: WidgetId) -> bool {
        self.widgets.contains_key(&widget)
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// Register a widget and apply its initial attributes.
    ///
    /// Registering an id twice keeps the existing widget and returns its
    /// state.
    pub fn register_widget(&mut self, widget: WidgetId, spec: WidgetSpec) -> WidgetState {
        if let Some(entry) = self.widgets.get(&widget) {
            return entry.state.clone();
        }
        if self.widgets.is_empty() {
            self.focus_visible.attach(&mut self.listeners);
        }
        let members = self.host.members(widget);
        let mut state = WidgetState::new();
        let single = spec.single_select();
        for id in spec.selected.iter().take(if single { 1 } else { usize::MAX }) {
            if position_of(&members, id).is_some() {
                state.insert_selected(id);
            }
        }
        state.set_pressed(spec.pressed);
        spec.shape.init(&mut state, &members, spec.selected.first());
        let entry = WidgetEntry {
            spec,
            state,
            typeahead: TypeAhead::new(self.config.typeahead_timeout),
            press: Deadline::new(),
            press_member: None,
            attributes: AttributeSet::default(),
        };
        self.widgets.insert(widget, entry);
        self.commit(widget, &members);
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "engine.dispatch", action = "register", widget = widget.raw());
        self.widgets
            .get(&widget)
            .map(|e| e.state.clone())
            .unwrap_or_default()
    }

    /// Tear down a widget, cancelling its timers and dismissal registration.
    /// Returns whether it was registered.
    pub fn unregister_widget(&mut self, widget: WidgetId) -> bool {
        let Some(mut entry) = self.widgets.remove(&widget) else {
            return false;
        };
        entry.typeahead.clear();
        entry.press.cancel();
        self.dismissal.unregister(widget, &mut self.listeners);
        if self.widgets.is_empty() {
            self.focus_visible.detach(&mut self.listeners);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "engine.dispatch", action = "unregister", widget = widget.raw());
        true
    }

    /// Re-read members after the renderer changed them and re-apply
    /// attributes if the active member or selection had to move.
    pub fn refresh(&mut self, widget: WidgetId) -> Result<Dispatched> {
        let members = self.host.members(widget);
        let entry = self.entry_mut(widget)?;
        let was_open = entry.state.is_open();
        let changed = entry.spec.shape.reconcile(&mut entry.state, &members);
        self.finish(widget, Transition::ignored(), changed, was_open, &members)
    }

    // ── Widget events ───────────────────────────────────────────────────

    /// Feed a key event to a widget.
    pub fn dispatch_key(&mut self, widget: WidgetId, key: KeyEvent) -> Result<Dispatched> {
        self.dispatch_key_at(widget, key, Instant::now())
    }

    /// Feed a key event at an explicit instant.
    pub fn dispatch_key_at(&mut self, widget: WidgetId, key: KeyEvent, now: Instant) -> Result<Dispatched> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("engine.dispatch", widget = widget.raw(), event = "key").entered();
        let members = self.host.members(widget);
        let entry = self.widgets.get_mut(&widget).ok_or(EngineError::UnknownWidget(widget))?;
        entry.typeahead.expire(now);
        let was_open = entry.state.is_open();
        let reconciled = entry.spec.shape.reconcile(&mut entry.state, &members);
        let mut cx = NavContext::new(&members, &mut entry.typeahead, now, &self.config);
        let transition = entry.spec.shape.handle_key(&mut entry.state, &key, &mut cx);
        self.finish(widget, transition, reconciled, was_open, &members)
    }

    /// Feed a pointer event to a widget.
    pub fn dispatch_pointer(&mut self, widget: WidgetId, event: PointerEvent) -> Result<Dispatched> {
        self.dispatch_pointer_at(widget, event, Instant::now())
    }

    /// Feed a pointer event at an explicit instant.
    ///
    /// A primary press on an enabled member arms the long-press timer; the
    /// release (or any other pointer event) cancels it.
    pub fn dispatch_pointer_at(
        &mut self,
        widget: WidgetId,
        event: PointerEvent,
        now: Instant,
    ) -> Result<Dispatched> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("engine.dispatch", widget = widget.raw(), event = "pointer").entered();
        let members = self.host.members(widget);
        let threshold = self.config.long_press_threshold;
        let entry = self.widgets.get_mut(&widget).ok_or(EngineError::UnknownWidget(widget))?;
        entry.typeahead.expire(now);
        entry.press.cancel();
        entry.press_member = None;
        if event.is_primary_down()
            && let Hit::Member(id) = &event.hit
            && position_of(&members, id).is_some_and(|i| members[i].is_enabled())
        {
            entry.press.arm(now, threshold);
            entry.press_member = Some(id.clone());
        }
        let was_open = entry.state.is_open();
        let reconciled = entry.spec.shape.reconcile(&mut entry.state, &members);
        let transition = if event.kind == PointerEventKind::Down {
            let mut cx = NavContext::new(&members, &mut entry.typeahead, now, &self.config);
            entry.spec.shape.handle_pointer(&mut entry.state, &event, &mut cx)
        } else {
            Transition::ignored()
        };
        self.finish(widget, transition, reconciled, was_open, &members)
    }

    /// Apply text typed into a combobox input.
    pub fn dispatch_input(&mut self, widget: WidgetId, text: &str) -> Result<Dispatched> {
        let members = self.host.members(widget);
        let entry = self.entry_mut(widget)?;
        let config = match entry.spec.shape.as_overlay() {
            Some(config) if config.kind == OverlayKind::Combobox => config.clone(),
            _ => return Err(mismatch(widget, "dispatch_input", &entry.spec.shape)),
        };
        let was_open = entry.state.is_open();
        let reconciled = entry.spec.shape.reconcile(&mut entry.state, &members);
        entry.typeahead.clear();
        let transition = config.input(&mut entry.state, text, &members);
        self.finish(widget, transition, reconciled, was_open, &members)
    }

    /// Open an overlay programmatically.
    pub fn open(&mut self, widget: WidgetId) -> Result<Dispatched> {
        let members = self.host.members(widget);
        let entry = self.entry_mut(widget)?;
        let Some(config) = entry.spec.shape.as_overlay().cloned() else {
            return Err(mismatch(widget, "open", &entry.spec.shape));
        };
        let was_open = entry.state.is_open();
        let reconciled = entry.spec.shape.reconcile(&mut entry.state, &members);
        let transition = if was_open {
            Transition::handled(false)
        } else {
            config.open(&mut entry.state, &members, Travel::Forward)
        };
        self.finish(widget, transition, reconciled, was_open, &members)
    }

    /// Close an overlay programmatically. Focus is left where it is.
    pub fn close(&mut self, widget: WidgetId) -> Result<Dispatched> {
        self.close_overlay(widget, false, "close")
    }

    /// Advance the sort of a table column.
    pub fn sort_column(&mut self, widget: WidgetId, column: usize) -> Result<Dispatched> {
        let members = self.host.members(widget);
        let default_cycle = self.config.sort_cycle;
        let entry = self.entry_mut(widget)?;
        let Some(config) = entry.spec.shape.as_grid() else {
            return Err(mismatch(widget, "sort_column", &entry.spec.shape));
        };
        let cycle = config.sort_cycle.unwrap_or(default_cycle);
        let columns = config.sortable_columns;
        let was_open = entry.state.is_open();
        let reconciled = entry.spec.shape.reconcile(&mut entry.state, &members);
        let transition = match apply_sort(&mut entry.state, columns, column, cycle) {
            Some(direction) => Transition::handled(true).with(Effect::SortChanged { column, direction }),
            None => Transition::ignored(),
        };
        self.finish(widget, transition, reconciled, was_open, &members)
    }

    /// Cancel a widget's timers when it loses focus.
    pub fn blur(&mut self, widget: WidgetId) -> Result<()> {
        let entry = self.entry_mut(widget)?;
        entry.typeahead.clear();
        entry.press.cancel();
        entry.press_member = None;
        Ok(())
    }

    /// Expire idle type-ahead buffers and fire due long presses.
    ///
    /// Returns `(widget, Effect::LongPress(member))` pairs in widget id order.
    pub fn tick(&mut self, now: Instant) -> Vec<(WidgetId, Effect)> {
        let mut ids: Vec<WidgetId> = self.widgets.keys().copied().collect();
        ids.sort_unstable();
        let mut fired = Vec::new();
        for id in ids {
            let Some(entry) = self.widgets.get_mut(&id) else {
                continue;
            };
            entry.typeahead.expire(now);
            if entry.press.take_expired(now)
                && let Some(member) = entry.press_member.take()
            {
                #[cfg(feature = "tracing")]
                tracing::debug!(message = "engine.dispatch", action = "long_press", widget = id.raw(), member = member.as_str());
                fired.push((id, Effect::LongPress(member)));
            }
        }
        fired
    }

    // ── Document events ─────────────────────────────────────────────────

    /// Handle a document-level keydown: focus-visible, Escape dismissal
    /// (innermost overlay only), and Tab trapping.
    pub fn document_key(&mut self, key: KeyEvent) -> DocumentDispatch {
        self.focus_visible.on_key(&key);
        if !key.is_actionable() {
            return DocumentDispatch::default();
        }
        if key.code == KeyCode::Escape {
            let Some(overlay) = self.dismissal.on_escape() else {
                return DocumentDispatch::default();
            };
            let closed = self.close_overlay(overlay, true, DismissReason::Escape.as_str());
            return DocumentDispatch {
                handled: closed.is_ok(),
                dismissed: vec![overlay],
                focused: self.host.active_element(),
            };
        }
        match self.scopes.handle_tab(&key, &mut self.host) {
            TabOutcome::Wrapped(node) => DocumentDispatch {
                handled: true,
                dismissed: Vec::new(),
                focused: Some(node),
            },
            TabOutcome::PassThrough => DocumentDispatch::default(),
        }
    }

    /// Handle a document-level pointer-down on `target`: focus-visible and
    /// outside-press dismissal. Dismissal never moves focus.
    pub fn document_pointer_down(&mut self, target: NodeId) -> DocumentDispatch {
        self.focus_visible.on_pointer_down();
        let outside = self.dismissal.on_pointer_down(&self.host, target);
        let mut dismissed = Vec::with_capacity(outside.len());
        for overlay in outside {
            if self
                .close_overlay(overlay, false, DismissReason::OutsidePointer.as_str())
                .is_ok()
            {
                dismissed.push(overlay);
            }
        }
        DocumentDispatch {
            handled: false,
            dismissed,
            focused: None,
        }
    }

    // ── Focus scopes ────────────────────────────────────────────────────

    /// Open a focus scope over `container`, capturing the focused element.
    pub fn create_scope(&mut self, container: NodeId) -> ScopeHandle {
        self.scopes.create(&self.host, container)
    }

    /// Close a scope and restore focus. Returns whether it existed.
    pub fn destroy_scope(&mut self, scope: ScopeHandle) -> bool {
        self.scopes.destroy(scope, &mut self.host, &mut self.listeners)
    }

    /// Enable or disable Tab trapping.
    pub fn set_trapping(&mut self, scope: ScopeHandle, enabled: bool) -> Result<()> {
        if self.scopes.set_trapping(scope, enabled, &mut self.listeners) {
            Ok(())
        } else {
            Err(EngineError::UnknownScope(scope))
        }
    }

    /// Focus the first focusable member of a scope.
    pub fn focus_first(&mut self, scope: ScopeHandle) -> Result<Option<NodeId>> {
        if !self.scopes.contains(scope) {
            return Err(EngineError::UnknownScope(scope));
        }
        Ok(self.scopes.focus_first(scope, &mut self.host))
    }

    /// Focus the last focusable member of a scope.
    pub fn focus_last(&mut self, scope: ScopeHandle) -> Result<Option<NodeId>> {
        if !self.scopes.contains(scope) {
            return Err(EngineError::UnknownScope(scope));
        }
        Ok(self.scopes.focus_last(scope, &mut self.host))
    }

    // ── Subscriptions ───────────────────────────────────────────────────

    /// Receive `(widget, state)` after every accepted transition.
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(WidgetId, &WidgetState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Drop a subscription. Returns whether it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        before != self.subscribers.len()
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn entry_mut(&mut self, widget: WidgetId) -> Result<&mut WidgetEntry> {
        self.widgets
            .get_mut(&widget)
            .ok_or(EngineError::UnknownWidget(widget))
    }

    fn close_overlay(&mut self, widget: WidgetId, focus_trigger: bool, reason: &'static str) -> Result<Dispatched> {
        let members = self.host.members(widget);
        let entry = self.entry_mut(widget)?;
        let Some(config) = entry.spec.shape.as_overlay().cloned() else {
            return Err(mismatch(widget, "close", &entry.spec.shape));
        };
        let was_open = entry.state.is_open();
        entry.typeahead.clear();
        let mut transition = config.close(&mut entry.state);
        if focus_trigger && transition.changed {
            transition.push(Effect::FocusTrigger);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "dismiss", reason, widget = widget.raw(), closed = transition.changed);
        #[cfg(not(feature = "tracing"))]
        let _ = reason;
        self.finish(widget, transition, false, was_open, &members)
    }

    /// Commit a transition: synchronize once if anything changed, keep the
    /// dismissal registry in step with the open state, perform focus
    /// effects, and close owners.
    fn finish(
        &mut self,
        widget: WidgetId,
        transition: Transition,
        reconciled: bool,
        was_open: bool,
        members: &[Member],
    ) -> Result<Dispatched> {
        if transition.changed || reconciled {
            self.commit(widget, members);
        }
        let entry = self.widgets.get(&widget).ok_or(EngineError::UnknownWidget(widget))?;
        let is_open = entry.state.is_open();
        let (container, trigger, owner) = (entry.spec.container, entry.spec.trigger, entry.spec.owner);
        if is_open != was_open {
            self.sync_dismissal(widget, is_open, container, trigger);
        }

        for effect in &transition.effects {
            match effect {
                Effect::FocusTrigger => {
                    if let Some(node) = trigger {
                        self.host.focus(node);
                    }
                }
                Effect::FocusMember(member) => {
                    if let Some(node) = self.host.member_node(widget, member) {
                        self.host.focus(node);
                    }
                }
                Effect::CloseOwner => {
                    if let Some(owner) = owner {
                        // A missing or non-overlay owner is ignored.
                        let _ = self.close_overlay(owner, true, "owner");
                    }
                }
                Effect::Activated(_) | Effect::LongPress(_) | Effect::SortChanged { .. } => {}
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "engine.dispatch",
            widget = widget.raw(),
            handled = transition.handled,
            changed = transition.changed || reconciled,
            effects = transition.effects.len()
        );

        let state = self
            .widgets
            .get(&widget)
            .map(|e| e.state.clone())
            .ok_or(EngineError::UnknownWidget(widget))?;
        Ok(Dispatched {
            state,
            handled: transition.handled,
            effects: transition.effects,
        })
    }

    fn sync_dismissal(&mut self, widget: WidgetId, open: bool, container: Option<NodeId>, trigger: Option<NodeId>) {
        match (open, container) {
            (true, Some(container)) => {
                self.dismissal
                    .register(widget, container, trigger, &mut self.listeners);
            }
            (false, _) => {
                self.dismissal.unregister(widget, &mut self.listeners);
            }
            (true, None) => {}
        }
    }

    /// Run the synchronizer, write attributes, notify subscribers.
    fn commit(&mut self, widget: WidgetId, members: &[Member]) {
        let Some(entry) = self.widgets.get_mut(&widget) else {
            return;
        };
        entry.attributes = synchronize(&entry.spec.shape, &entry.state, members);
        self.host.apply_state(widget, &entry.attributes);
        for (_, subscriber) in &mut self.subscribers {
            subscriber(widget, &entry.state);
        }
    }
}

fn mismatch(widget: WidgetId, operation: &'static str, shape: &Shape) -> EngineError {
    EngineError::ShapeMismatch {
        widget,
        operation,
        shape: shape.name(),
    }
}
