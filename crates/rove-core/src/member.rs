#![forbid(unsafe_code)]

//! Members: the focusable/selectable units inside a composite widget.
//!
//! The renderer supplies a fresh `Vec<Member>` on every engine invocation.
//! An index into that list is a transient view, valid for one synchronous
//! operation only; anything that must survive across invocations is keyed by
//! [`MemberId`].

use std::fmt;

/// Stable identifier of a member (its DOM `id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberId(String);

impl MemberId {
    /// Create a member id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for MemberId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position of a member in a two-dimensional layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl Cell {
    /// Create a cell position.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// One focusable/selectable unit inside a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Stable identifier.
    pub id: MemberId,
    /// Text content used for type-ahead, filtering, and trigger labels.
    pub label: String,
    /// Disabled members are skipped by navigation and cannot be activated.
    pub disabled: bool,
    /// Grid position; `None` for members of linear widgets.
    pub cell: Option<Cell>,
}

impl Member {
    /// Create an enabled member whose label is also its id.
    #[must_use]
    pub fn new(id: impl Into<MemberId>) -> Self {
        let id = id.into();
        Self {
            label: id.as_str().to_owned(),
            id,
            disabled: false,
            cell: None,
        }
    }

    /// Set the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the disabled flag.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Place the member in a grid.
    #[must_use]
    pub fn at(mut self, row: usize, col: usize) -> Self {
        self.cell = Some(Cell::new(row, col));
        self
    }

    /// Whether the member can take the active position.
    #[inline]
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !self.disabled
    }
}

/// Index of the member with `id` in `members`.
#[must_use]
pub fn position_of(members: &[Member], id: &MemberId) -> Option<usize> {
    members.iter().position(|m| &m.id == id)
}
