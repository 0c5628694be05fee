#![forbid(unsafe_code)]

//! Canonical input event types.
//!
//! The host translates its native keyboard and pointer events into these
//! types before handing them to the engine. All events derive `Clone`,
//! `PartialEq`, and `Eq` for use in tests and pattern matching.
//!
//! # Design Notes
//!
//! - Space is `KeyCode::Char(' ')`; there is no dedicated variant.
//! - Shift+Tab may arrive either as `BackTab` or as `Tab` with `SHIFT` held.
//!   [`KeyEvent::is_backward_tab`] folds both spellings together.
//! - Pointer events carry the raw DOM target (for containment checks) and a
//!   renderer-resolved [`Hit`] (for member lookup). The engine never
//!   hit-tests on its own.

use bitflags::bitflags;

use crate::dom::NodeId;
use crate::member::MemberId;

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if this is the Space key.
    #[must_use]
    pub fn is_space(&self) -> bool {
        self.is_char(' ')
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Alt modifier is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Check if Super/Meta/Cmd modifier is held.
    #[must_use]
    pub const fn super_key(&self) -> bool {
        self.modifiers.contains(Modifiers::SUPER)
    }

    /// Whether this event should drive a transition.
    ///
    /// Releases never do; presses and auto-repeats do.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        !matches!(self.kind, KeyEventKind::Release)
    }

    /// Tab in either direction.
    #[must_use]
    pub const fn is_tab(&self) -> bool {
        matches!(self.code, KeyCode::Tab | KeyCode::BackTab)
    }

    /// Shift+Tab, in either of its encodings.
    #[must_use]
    pub const fn is_backward_tab(&self) -> bool {
        matches!(self.code, KeyCode::BackTab)
            || (matches!(self.code, KeyCode::Tab) && self.shift())
    }

    /// The printable character carried by this event, if it can feed a
    /// type-ahead buffer.
    ///
    /// Control characters and Ctrl/Alt/Super chords are not printable.
    /// Shift is allowed so uppercase input survives.
    #[must_use]
    pub fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(ch)
                if !ch.is_control() && !self.ctrl() && !self.alt() && !self.super_key() =>
            {
                Some(ch)
            }
            _ => None,
        }
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key. Space is `Char(' ')`.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Tab key.
    Tab,

    /// Shift+Tab (back-tab).
    BackTab,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,
}

impl KeyCode {
    /// Whether this is one of the four arrow keys.
    #[must_use]
    pub const fn is_arrow(self) -> bool {
        matches!(self, Self::Up | Self::Down | Self::Left | Self::Right)
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key or pointer event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// What the renderer's hit test resolved a pointer event to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Hit {
    /// A member of the widget receiving the event.
    Member(MemberId),
    /// The widget's trigger (select button, combobox input, menu button).
    Trigger,
    /// A sortable column header, by column index.
    ColumnHeader(usize),
    /// Nothing the widget owns.
    #[default]
    Outside,
}

/// A pointer event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEvent {
    /// Press or release.
    pub kind: PointerEventKind,

    /// Which button.
    pub button: PointerButton,

    /// The DOM node the event was dispatched to.
    pub target: NodeId,

    /// Renderer-resolved hit for the widget receiving the event.
    pub hit: Hit,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Primary-button press on `target`.
    #[must_use]
    pub fn down(target: NodeId, hit: Hit) -> Self {
        Self {
            kind: PointerEventKind::Down,
            button: PointerButton::Primary,
            target,
            hit,
            modifiers: Modifiers::NONE,
        }
    }

    /// Primary-button release on `target`.
    #[must_use]
    pub fn up(target: NodeId, hit: Hit) -> Self {
        Self {
            kind: PointerEventKind::Up,
            ..Self::down(target, hit)
        }
    }

    /// Create a pointer event with modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a pointer event with a specific button.
    #[must_use]
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Primary-button press.
    #[must_use]
    pub fn is_primary_down(&self) -> bool {
        self.kind == PointerEventKind::Down && self.button == PointerButton::Primary
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Button pressed down.
    Down,
    /// Button released.
    Up,
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    /// Primary button (left mouse, touch contact, pen tip).
    #[default]
    Primary,
    /// Secondary button (right mouse).
    Secondary,
    /// Auxiliary button (wheel click).
    Auxiliary,
}
