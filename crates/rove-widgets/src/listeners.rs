#![forbid(unsafe_code)]

//! Reference-counted document-level listeners.
//!
//! The dismissal coordinator, focus traps, and focus-visible detection all
//! need document listeners. Rather than each instance attaching its own,
//! they share one listener per [`ListenerKind`]: the host attaches it when
//! the first subscriber arrives ([`ListenerChange::Attached`]) and removes it
//! when the last leaves ([`ListenerChange::Detached`]).
//!
//! Every transition is also queued until the host drains it with
//! [`ListenerRegistry::take_changes`], so callers that go through the engine
//! see the same signal the direct `acquire`/`release` return value carries.
//!
//! # Invariants
//!
//! - A kind is attached exactly when its count is non-zero.
//! - Releasing a kind with a zero count is a no-op, never an underflow.

use bitflags::bitflags;

/// A document-level event listener type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// `pointerdown` (outside-click dismissal, pointer modality).
    PointerDown,
    /// `keydown` (Escape dismissal, Tab trapping, keyboard modality).
    KeyDown,
    /// `focusin` (focus-visible bookkeeping).
    FocusIn,
}

impl ListenerKind {
    const ALL: [Self; 3] = [Self::PointerDown, Self::KeyDown, Self::FocusIn];

    const fn slot(self) -> usize {
        match self {
            Self::PointerDown => 0,
            Self::KeyDown => 1,
            Self::FocusIn => 2,
        }
    }

    /// The matching flag.
    #[must_use]
    pub const fn flag(self) -> ListenerKinds {
        match self {
            Self::PointerDown => ListenerKinds::POINTER_DOWN,
            Self::KeyDown => ListenerKinds::KEY_DOWN,
            Self::FocusIn => ListenerKinds::FOCUS_IN,
        }
    }
}

bitflags! {
    /// Set of attached listener kinds.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ListenerKinds: u8 {
        const POINTER_DOWN = 0b001;
        const KEY_DOWN     = 0b010;
        const FOCUS_IN     = 0b100;
    }
}

/// What the host must do after an acquire or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerChange {
    /// First subscriber: attach the document listener.
    Attached,
    /// Last subscriber left: detach it.
    Detached,
    /// Nothing to do.
    Unchanged,
}

/// Subscriber counts per listener kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListenerRegistry {
    counts: [usize; 3],
    pending: Vec<(ListenerKind, ListenerChange)>,
}

impl ListenerRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subscriber for `kind`.
    pub fn acquire(&mut self, kind: ListenerKind) -> ListenerChange {
        let count = &mut self.counts[kind.slot()];
        *count += 1;
        if *count == 1 {
            self.pending.push((kind, ListenerChange::Attached));
            ListenerChange::Attached
        } else {
            ListenerChange::Unchanged
        }
    }

    /// Remove a subscriber for `kind`.
    pub fn release(&mut self, kind: ListenerKind) -> ListenerChange {
        let count = &mut self.counts[kind.slot()];
        match *count {
            0 => ListenerChange::Unchanged,
            1 => {
                *count = 0;
                self.pending.push((kind, ListenerChange::Detached));
                ListenerChange::Detached
            }
            _ => {
                *count -= 1;
                ListenerChange::Unchanged
            }
        }
    }

    /// Subscribers of `kind`.
    #[must_use]
    pub fn count(&self, kind: ListenerKind) -> usize {
        self.counts[kind.slot()]
    }

    /// Whether `kind` is attached.
    #[must_use]
    pub fn is_attached(&self, kind: ListenerKind) -> bool {
        self.count(kind) > 0
    }

    /// Drain the attach/detach transitions queued since the last call, in
    /// the order they happened.
    pub fn take_changes(&mut self) -> Vec<(ListenerKind, ListenerChange)> {
        std::mem::take(&mut self.pending)
    }

    /// Every attached kind.
    #[must_use]
    pub fn attached(&self) -> ListenerKinds {
        ListenerKind::ALL
            .into_iter()
            .filter(|&kind| self.is_attached(kind))
            .fold(ListenerKinds::empty(), |set, kind| set | kind.flag())
    }
}
