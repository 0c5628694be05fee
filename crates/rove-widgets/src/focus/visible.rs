#![forbid(unsafe_code)]

//! Focus-visible detection.
//!
//! Focus rings should show after keyboard navigation and hide after pointer
//! interaction. The tracker listens (through the shared registry) for
//! document key and pointer events and records the last input modality.

use rove_core::{KeyCode, KeyEvent};

use crate::listeners::{ListenerKind, ListenerRegistry};

/// Last input modality observed at the document level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Modality {
    /// Keyboard navigation. Initial state, so programmatic focus on load
    /// shows a ring.
    #[default]
    Keyboard,
    /// Pointer press.
    Pointer,
}

/// Tracks whether focus should be drawn visibly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusVisible {
    modality: Modality,
    attached: bool,
}

impl FocusVisible {
    /// A detached tracker in keyboard modality.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to document key, pointer, and focus listeners. Idempotent.
    pub fn attach(&mut self, listeners: &mut ListenerRegistry) {
        if self.attached {
            return;
        }
        listeners.acquire(ListenerKind::KeyDown);
        listeners.acquire(ListenerKind::PointerDown);
        listeners.acquire(ListenerKind::FocusIn);
        self.attached = true;
    }

    /// Drop the subscriptions taken by [`FocusVisible::attach`]. Idempotent.
    pub fn detach(&mut self, listeners: &mut ListenerRegistry) {
        if !self.attached {
            return;
        }
        listeners.release(ListenerKind::KeyDown);
        listeners.release(ListenerKind::PointerDown);
        listeners.release(ListenerKind::FocusIn);
        self.attached = false;
    }

    /// Whether the tracker holds listener subscriptions.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    /// Record a document keydown. Only navigation keys switch to keyboard
    /// modality; shortcuts and typing do not.
    pub fn on_key(&mut self, key: &KeyEvent) -> bool {
        if !key.is_actionable() || key.ctrl() || key.alt() || key.super_key() {
            return false;
        }
        let navigation = matches!(
            key.code,
            KeyCode::Tab
                | KeyCode::BackTab
                | KeyCode::Up
                | KeyCode::Down
                | KeyCode::Left
                | KeyCode::Right
                | KeyCode::Home
                | KeyCode::End
                | KeyCode::PageUp
                | KeyCode::PageDown
                | KeyCode::Enter
                | KeyCode::Escape
        ) || key.is_space();
        if navigation {
            self.set(Modality::Keyboard)
        } else {
            false
        }
    }

    /// Record a document pointer-down.
    pub fn on_pointer_down(&mut self) -> bool {
        self.set(Modality::Pointer)
    }

    fn set(&mut self, modality: Modality) -> bool {
        let changed = self.modality != modality;
        self.modality = modality;
        changed
    }

    /// Last observed modality.
    #[must_use]
    pub const fn modality(&self) -> Modality {
        self.modality
    }

    /// Whether a focus ring should be shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(self.modality, Modality::Keyboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rove_core::Modifiers;

    #[test]
    fn pointer_hides_keyboard_shows() {
        let mut fv = FocusVisible::new();
        assert!(fv.is_visible());
        assert!(fv.on_pointer_down());
        assert!(!fv.is_visible());
        assert!(fv.on_key(&KeyEvent::new(KeyCode::Tab)));
        assert!(fv.is_visible());
    }

    #[test]
    fn typing_and_shortcuts_keep_modality() {
        let mut fv = FocusVisible::new();
        fv.on_pointer_down();
        assert!(!fv.on_key(&KeyEvent::new(KeyCode::Char('x'))));
        assert!(!fv.on_key(&KeyEvent::new(KeyCode::Down).with_modifiers(Modifiers::CTRL)));
        assert_eq!(fv.modality(), Modality::Pointer);
    }

    #[test]
    fn attach_is_idempotent_and_symmetric() {
        let mut reg = ListenerRegistry::new();
        let mut fv = FocusVisible::new();
        fv.attach(&mut reg);
        fv.attach(&mut reg);
        assert_eq!(reg.count(ListenerKind::KeyDown), 1);
        fv.detach(&mut reg);
        fv.detach(&mut reg);
        assert!(reg.attached().is_empty());
    }
}
