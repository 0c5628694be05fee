#![forbid(unsafe_code)]

//! Dismissal coordinator: outside-press and Escape handling for open
//! overlays.
//!
//! Overlays register while open and unregister when they close. The
//! coordinator answers two questions for the engine, which then applies the
//! close transition to each overlay it names:
//!
//! - On a document pointer-down: which overlays does the target lie outside
//!   of? Each overlay is checked on its own, against its container and its
//!   trigger.
//! - On a document Escape: which overlay opened most recently?
//!
//! # Invariants
//!
//! 1. Registration order is open order; the last entry is the innermost.
//! 2. Re-registering an overlay updates it in place and moves it to the top;
//!    it never appears twice.
//! 3. The document listeners are held exactly while at least one overlay is
//!    registered.
//!
//! # Failure Modes
//!
//! - Unregistering an unknown overlay is a no-op.
//! - Events with an empty registry dismiss nothing.

use rove_core::{DomView, NodeId};

use crate::listeners::{ListenerKind, ListenerRegistry};
use crate::state::WidgetId;

/// Why an overlay was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissReason {
    /// Pointer-down outside the overlay and its trigger.
    OutsidePointer,
    /// Escape keydown.
    Escape,
}

impl DismissReason {
    /// Short name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OutsidePointer => "outside_pointer",
            Self::Escape => "escape",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    overlay: WidgetId,
    container: NodeId,
    trigger: Option<NodeId>,
}

/// Open overlays, innermost last.
#[derive(Debug, Default)]
pub struct DismissalCoordinator {
    entries: Vec<Entry>,
}

impl DismissalCoordinator {
    /// An empty coordinator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an open overlay. Returns `true` when it was not registered
    /// before.
    pub fn register(
        &mut self,
        overlay: WidgetId,
        container: NodeId,
        trigger: Option<NodeId>,
        listeners: &mut ListenerRegistry,
    ) -> bool {
        let existed = self.remove_entry(overlay);
        if self.entries.is_empty() && !existed {
            listeners.acquire(ListenerKind::PointerDown);
            listeners.acquire(ListenerKind::KeyDown);
        }
        self.entries.push(Entry {
            overlay,
            container,
            trigger,
        });
        !existed
    }

    /// Unregister an overlay. Returns whether it was registered.
    pub fn unregister(&mut self, overlay: WidgetId, listeners: &mut ListenerRegistry) -> bool {
        let existed = self.remove_entry(overlay);
        if existed && self.entries.is_empty() {
            listeners.release(ListenerKind::PointerDown);
            listeners.release(ListenerKind::KeyDown);
        }
        existed
    }

    fn remove_entry(&mut self, overlay: WidgetId) -> bool {
        match self.entries.iter().position(|e| e.overlay == overlay) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Overlays to dismiss for a pointer-down on `target`, innermost first.
    #[must_use]
    pub fn on_pointer_down<D: DomView + ?Sized>(&self, dom: &D, target: NodeId) -> Vec<WidgetId> {
        let outside: Vec<WidgetId> = self
            .entries
            .iter()
            .rev()
            .filter(|e| {
                !dom.contains(e.container, target)
                    && !e.trigger.is_some_and(|trigger| dom.contains(trigger, target))
            })
            .map(|e| e.overlay)
            .collect();
        #[cfg(feature = "tracing")]
        if !outside.is_empty() {
            tracing::debug!(
                message = "dismiss",
                reason = DismissReason::OutsidePointer.as_str(),
                count = outside.len()
            );
        }
        outside
    }

    /// The overlay to dismiss for Escape: the most recently opened one.
    #[must_use]
    pub fn on_escape(&self) -> Option<WidgetId> {
        let innermost = self.entries.last().map(|e| e.overlay);
        #[cfg(feature = "tracing")]
        if let Some(overlay) = innermost {
            tracing::debug!(
                message = "dismiss",
                reason = DismissReason::Escape.as_str(),
                overlay = overlay.raw()
            );
        }
        innermost
    }

    /// Whether `overlay` is registered.
    #[must_use]
    pub fn is_registered(&self, overlay: WidgetId) -> bool {
        self.entries.iter().any(|e| e.overlay == overlay)
    }

    /// Registered overlays, outermost first.
    #[must_use]
    pub fn open_overlays(&self) -> Vec<WidgetId> {
        self.entries.iter().map(|e| e.overlay).collect()
    }

    /// Number of registered overlays.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rove_core::{Document, Element};

    struct Page {
        doc: Document,
        trigger: NodeId,
        menu: NodeId,
        item: NodeId,
        elsewhere: NodeId,
    }

    fn page() -> Page {
        let mut doc = Document::new();
        let root = doc.root();
        let trigger = doc.append(root, Element::button());
        let menu = doc.append(root, Element::generic("ul"));
        let item = doc.append(menu, Element::generic("li"));
        let elsewhere = doc.append(root, Element::generic("main"));
        Page {
            doc,
            trigger,
            menu,
            item,
            elsewhere,
        }
    }

    const MENU: WidgetId = WidgetId::new(1);
    const SUBMENU: WidgetId = WidgetId::new(2);

    #[test]
    fn inside_and_trigger_presses_do_not_dismiss() {
        let p = page();
        let mut reg = ListenerRegistry::new();
        let mut dc = DismissalCoordinator::new();
        dc.register(MENU, p.menu, Some(p.trigger), &mut reg);
        assert!(dc.on_pointer_down(&p.doc, p.item).is_empty());
        assert!(dc.on_pointer_down(&p.doc, p.trigger).is_empty());
        assert_eq!(dc.on_pointer_down(&p.doc, p.elsewhere), [MENU]);
    }

    #[test]
    fn nested_overlays_are_checked_independently() {
        let mut p = page();
        let sub = p.doc.append(p.elsewhere, Element::generic("ul"));
        let mut reg = ListenerRegistry::new();
        let mut dc = DismissalCoordinator::new();
        dc.register(MENU, p.menu, Some(p.trigger), &mut reg);
        dc.register(SUBMENU, sub, Some(p.item), &mut reg);
        // A press on the submenu is outside the menu's container.
        assert_eq!(dc.on_pointer_down(&p.doc, sub), [MENU]);
        assert_eq!(dc.on_pointer_down(&p.doc, p.doc.root()), [SUBMENU, MENU]);
    }

    #[test]
    fn escape_targets_innermost_only() {
        let p = page();
        let mut reg = ListenerRegistry::new();
        let mut dc = DismissalCoordinator::new();
        assert_eq!(dc.on_escape(), None);
        dc.register(MENU, p.menu, None, &mut reg);
        dc.register(SUBMENU, p.item, None, &mut reg);
        assert_eq!(dc.on_escape(), Some(SUBMENU));
        dc.unregister(SUBMENU, &mut reg);
        assert_eq!(dc.on_escape(), Some(MENU));
    }

    #[test]
    fn registration_is_idempotent_and_symmetric() {
        let p = page();
        let mut reg = ListenerRegistry::new();
        let mut dc = DismissalCoordinator::new();
        assert!(dc.register(MENU, p.menu, None, &mut reg));
        assert!(dc.register(SUBMENU, p.item, None, &mut reg));
        assert!(!dc.register(MENU, p.menu, None, &mut reg));
        assert_eq!(dc.len(), 2);
        assert_eq!(dc.on_escape(), Some(MENU));
        assert_eq!(reg.count(ListenerKind::PointerDown), 1);
        assert!(dc.unregister(MENU, &mut reg));
        assert!(!dc.unregister(MENU, &mut reg));
        assert!(dc.unregister(SUBMENU, &mut reg));
        assert!(reg.attached().is_empty());
    }

    #[test]
    fn empty_registry_dismisses_nothing() {
        let p = page();
        let dc = DismissalCoordinator::new();
        assert!(dc.on_pointer_down(&p.doc, p.elsewhere).is_empty());
    }
}
