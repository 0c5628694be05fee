#![forbid(unsafe_code)]

//! Focus scopes: Tab trapping inside a container with focus restore.
//!
//! A scope is created when a dialog or other trapping context opens. It
//! snapshots the focused element at creation time and refocuses it when
//! destroyed, provided it is still attached to the document.
//!
//! # Invariants
//!
//! 1. **Fresh queries**: focusable members are recomputed on every Tab and
//!    every `focus_first`/`focus_last`; nothing is memoized.
//! 2. **Edge wrap only**: Tab on the last focusable wraps to the first,
//!    Shift+Tab on the first wraps to the last. Every other Tab passes
//!    through to default handling, including Tab pressed while focus is
//!    outside the container.
//! 3. **LIFO**: the innermost trapping scope handles Tab; nested scopes
//!    restore in reverse creation order.
//! 4. **Symmetric listeners**: enabling trapping takes one keydown
//!    subscription; disabling or destroying releases it.
//!
//! # Failure Modes
//!
//! - A container with no focusable members does not trap; Tab passes through.
//! - A restore target removed from the document is skipped; focus stays put.
//! - Destroying an unknown or already-destroyed scope is a no-op.

use rove_core::{DomFocus, DomView, KeyEvent, NodeId};

use crate::listeners::{ListenerKind, ListenerRegistry};

/// Handle to a live focus scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeHandle(u32);

impl ScopeHandle {
    /// The raw handle value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// What a trap did with a Tab keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabOutcome {
    /// Focus was moved to this node; suppress the default action.
    Wrapped(NodeId),
    /// Not intercepted.
    PassThrough,
}

impl TabOutcome {
    /// Whether the keypress was consumed.
    #[must_use]
    pub const fn is_handled(self) -> bool {
        matches!(self, Self::Wrapped(_))
    }
}

#[derive(Debug, Clone)]
struct Scope {
    handle: ScopeHandle,
    container: NodeId,
    restore: Option<NodeId>,
    trapping: bool,
}

/// Owns every live focus scope, innermost last.
#[derive(Debug, Default)]
pub struct FocusScopeManager {
    scopes: Vec<Scope>,
    next: u32,
}

impl FocusScopeManager {
    /// An empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a scope over `container`, capturing the focused element as its
    /// restore target. Trapping starts disabled.
    pub fn create<D: DomView + ?Sized>(&mut self, dom: &D, container: NodeId) -> ScopeHandle {
        let handle = ScopeHandle(self.next);
        self.next = self.next.wrapping_add(1);
        let restore = dom.active_element();
        self.scopes.push(Scope {
            handle,
            container,
            restore,
            trapping: false,
        });
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "focus.scope",
            action = "create",
            scope = handle.0,
            restore = restore.map(NodeId::raw)
        );
        handle
    }

    /// Close a scope, releasing its listener and restoring focus if the
    /// saved target is still attached. Returns whether the scope existed.
    pub fn destroy<D: DomView + DomFocus + ?Sized>(
        &mut self,
        handle: ScopeHandle,
        dom: &mut D,
        listeners: &mut ListenerRegistry,
    ) -> bool {
        let Some(pos) = self.position(handle) else {
            return false;
        };
        let scope = self.scopes.remove(pos);
        if scope.trapping {
            listeners.release(ListenerKind::KeyDown);
        }
        let restored = scope
            .restore
            .filter(|&node| dom.is_attached(node))
            .is_some_and(|node| dom.focus(node));
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "focus.scope",
            action = "destroy",
            scope = handle.0,
            restored
        );
        #[cfg(not(feature = "tracing"))]
        let _ = restored;
        true
    }

    /// Enable or disable Tab trapping. Returns `false` for an unknown scope.
    pub fn set_trapping(
        &mut self,
        handle: ScopeHandle,
        enabled: bool,
        listeners: &mut ListenerRegistry,
    ) -> bool {
        let Some(pos) = self.position(handle) else {
            return false;
        };
        let scope = &mut self.scopes[pos];
        if scope.trapping != enabled {
            scope.trapping = enabled;
            if enabled {
                listeners.acquire(ListenerKind::KeyDown);
            } else {
                listeners.release(ListenerKind::KeyDown);
            }
        }
        true
    }

    /// Focus the first focusable member of the scope.
    pub fn focus_first<D: DomView + DomFocus + ?Sized>(
        &self,
        handle: ScopeHandle,
        dom: &mut D,
    ) -> Option<NodeId> {
        let container = self.container(handle)?;
        let first = *dom.focusable_within(container).first()?;
        dom.focus(first).then_some(first)
    }

    /// Focus the last focusable member of the scope.
    pub fn focus_last<D: DomView + DomFocus + ?Sized>(
        &self,
        handle: ScopeHandle,
        dom: &mut D,
    ) -> Option<NodeId> {
        let container = self.container(handle)?;
        let last = *dom.focusable_within(container).last()?;
        dom.focus(last).then_some(last)
    }

    /// Apply the innermost trapping scope to a Tab keypress.
    pub fn handle_tab<D: DomView + DomFocus + ?Sized>(&self, key: &KeyEvent, dom: &mut D) -> TabOutcome {
        if !key.is_tab() || !key.is_actionable() {
            return TabOutcome::PassThrough;
        }
        let Some(scope) = self.scopes.iter().rev().find(|s| s.trapping) else {
            return TabOutcome::PassThrough;
        };
        let focusable = dom.focusable_within(scope.container);
        let (Some(&first), Some(&last)) = (focusable.first(), focusable.last()) else {
            return TabOutcome::PassThrough;
        };
        let Some(active) = dom
            .active_element()
            .filter(|&node| dom.contains(scope.container, node))
        else {
            return TabOutcome::PassThrough;
        };
        let backward = key.is_backward_tab();

        let target = match backward {
            false if active == last => Some(first),
            true if active == first => Some(last),
            _ => None,
        };
        match target {
            Some(node) if dom.focus(node) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    message = "focus.scope",
                    action = "wrap",
                    scope = scope.handle.0,
                    backward,
                    to = node.raw()
                );
                TabOutcome::Wrapped(node)
            }
            _ => TabOutcome::PassThrough,
        }
    }

    /// Container of a live scope.
    #[must_use]
    pub fn container(&self, handle: ScopeHandle) -> Option<NodeId> {
        self.scope(handle).map(|s| s.container)
    }

    /// Restore target captured at creation.
    #[must_use]
    pub fn restore_target(&self, handle: ScopeHandle) -> Option<NodeId> {
        self.scope(handle).and_then(|s| s.restore)
    }

    /// Whether the scope traps Tab.
    #[must_use]
    pub fn is_trapping(&self, handle: ScopeHandle) -> bool {
        self.scope(handle).is_some_and(|s| s.trapping)
    }

    /// Whether `handle` names a live scope.
    #[must_use]
    pub fn contains(&self, handle: ScopeHandle) -> bool {
        self.position(handle).is_some()
    }

    /// Number of live scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Whether no scope is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    fn scope(&self, handle: ScopeHandle) -> Option<&Scope> {
        self.scopes.iter().find(|s| s.handle == handle)
    }

    fn position(&self, handle: ScopeHandle) -> Option<usize> {
        self.scopes.iter().position(|s| s.handle == handle)
    }
}
