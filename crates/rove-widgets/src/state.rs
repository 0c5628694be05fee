#![forbid(unsafe_code)]

//! Per-widget interaction state.
//!
//! A [`WidgetState`] is owned by the engine and mutated only by state-machine
//! transitions. The renderer receives clones of it (and the attribute set
//! derived from it) after every accepted transition.
//!
//! # Invariants
//!
//! - The active member is always an enabled member of the latest member list
//!   if any enabled member exists ([`WidgetState::reconcile`] restores this).
//! - `open == Closed` implies no active member for overlay widgets.
//! - Single-select widgets never hold more than one selected id.

use std::collections::BTreeSet;
use std::fmt;

use rove_core::{Cell, Member, MemberId, position_of};

/// Identifier of a live widget instance, assigned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WidgetId(u64);

impl WidgetId {
    /// Wrap a renderer-assigned id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "widget#{}", self.0)
    }
}

/// Open/closed state of overlay widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpenState {
    /// Popup hidden. Initial state.
    #[default]
    Closed,
    /// Popup shown.
    Open,
}

impl OpenState {
    /// Whether the popup is shown.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Sort state of a sortable column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortDirection {
    /// Not sorted by this column.
    #[default]
    None,
    /// Sorted ascending.
    Ascending,
    /// Sorted descending.
    Descending,
}

impl SortDirection {
    /// The `aria-sort` token.
    #[must_use]
    pub const fn as_aria(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

/// Interaction state of one widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WidgetState {
    active: Option<MemberId>,
    active_index: Option<usize>,
    active_cell: Option<Cell>,
    open: OpenState,
    selection: BTreeSet<MemberId>,
    anchor: Option<MemberId>,
    pressed: Option<bool>,
    sort: Vec<SortDirection>,
    filter: String,
    trigger_label: Option<String>,
}

impl WidgetState {
    /// Empty state: nothing active, closed, nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier of the active member.
    #[must_use]
    pub fn active(&self) -> Option<&MemberId> {
        self.active.as_ref()
    }

    /// Flat index of the active member as of the last transition.
    ///
    /// For overlay widgets this indexes the filtered member list.
    #[inline]
    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Grid position of the active member (grid widgets only).
    #[inline]
    #[must_use]
    pub const fn active_cell(&self) -> Option<Cell> {
        self.active_cell
    }

    /// Open/closed state.
    #[inline]
    #[must_use]
    pub const fn open_state(&self) -> OpenState {
        self.open
    }

    /// Whether the overlay is open.
    #[inline]
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open.is_open()
    }

    /// Selected member ids.
    #[must_use]
    pub fn selection(&self) -> &BTreeSet<MemberId> {
        &self.selection
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: &MemberId) -> bool {
        self.selection.contains(id)
    }

    /// Range-selection anchor (grid widgets).
    #[must_use]
    pub fn anchor(&self) -> Option<&MemberId> {
        self.anchor.as_ref()
    }

    /// Pressed state of toggle-button widgets.
    #[inline]
    #[must_use]
    pub const fn pressed(&self) -> Option<bool> {
        self.pressed
    }

    /// Per-column sort directions (sortable tables).
    #[must_use]
    pub fn sort(&self) -> &[SortDirection] {
        &self.sort
    }

    /// Sort direction of one column.
    #[must_use]
    pub fn sort_of(&self, column: usize) -> SortDirection {
        self.sort.get(column).copied().unwrap_or_default()
    }

    /// Text typed into a combobox input.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Label shown on the trigger after the last commit.
    #[must_use]
    pub fn trigger_label(&self) -> Option<&str> {
        self.trigger_label.as_deref()
    }

    // --- Transition-side mutators -------------------------------------------

    pub(crate) fn set_active(&mut self, members: &[Member], index: usize) -> bool {
        let Some(member) = members.get(index) else {
            return false;
        };
        let changed = self.active.as_ref() != Some(&member.id) || self.active_index != Some(index);
        self.active = Some(member.id.clone());
        self.active_index = Some(index);
        self.active_cell = member.cell;
        changed
    }

    pub(crate) fn clear_active(&mut self) -> bool {
        let changed = self.active.is_some();
        self.active = None;
        self.active_index = None;
        self.active_cell = None;
        changed
    }

    pub(crate) fn set_open(&mut self, open: OpenState) -> bool {
        let changed = self.open != open;
        self.open = open;
        changed
    }

    pub(crate) fn select_only(&mut self, id: &MemberId) -> bool {
        if self.selection.len() == 1 && self.selection.contains(id) {
            return false;
        }
        self.selection.clear();
        self.selection.insert(id.clone());
        true
    }

    pub(crate) fn toggle_selected(&mut self, id: &MemberId) {
        if !self.selection.remove(id) {
            self.selection.insert(id.clone());
        }
    }

    pub(crate) fn insert_selected(&mut self, id: &MemberId) -> bool {
        self.selection.insert(id.clone())
    }

    pub(crate) fn replace_selection(&mut self, ids: BTreeSet<MemberId>) -> bool {
        if self.selection == ids {
            return false;
        }
        self.selection = ids;
        true
    }

    pub(crate) fn clear_selection(&mut self) -> bool {
        let changed = !self.selection.is_empty();
        self.selection.clear();
        changed
    }

    pub(crate) fn set_anchor(&mut self, id: Option<MemberId>) {
        self.anchor = id;
    }

    pub(crate) fn set_pressed(&mut self, pressed: Option<bool>) {
        self.pressed = pressed;
    }

    pub(crate) fn sort_mut(&mut self, columns: usize) -> &mut Vec<SortDirection> {
        if self.sort.len() < columns {
            self.sort.resize(columns, SortDirection::None);
        }
        &mut self.sort
    }

    pub(crate) fn set_filter(&mut self, text: &str) -> bool {
        if self.filter == text {
            return false;
        }
        self.filter.clear();
        self.filter.push_str(text);
        true
    }

    pub(crate) fn set_trigger_label(&mut self, label: Option<String>) {
        self.trigger_label = label;
    }

    /// Re-resolve the active member against a fresh member list.
    ///
    /// The stored id wins when it is still present and enabled. If the member
    /// was removed or disabled, the nearest enabled member to the last known
    /// index takes over. Returns the resolved index.
    pub(crate) fn reconcile(&mut self, members: &[Member]) -> Option<usize> {
        let by_id = self.active.as_ref().and_then(|id| position_of(members, id));
        let resolved = match by_id {
            Some(index) if members[index].is_enabled() => Some(index),
            Some(index) => crate::roving::nearest_enabled(members, index),
            None => match self.active_index {
                Some(last) if !members.is_empty() => {
                    crate::roving::nearest_enabled(members, last.min(members.len() - 1))
                }
                _ => None,
            },
        };
        match resolved {
            Some(index) => {
                self.set_active(members, index);
            }
            None => {
                self.clear_active();
            }
        }
        resolved
    }

    /// Drop selected ids that no longer name a member.
    pub(crate) fn prune_selection(&mut self, members: &[Member]) -> bool {
        let before = self.selection.len();
        self.selection
            .retain(|id| members.iter().any(|member| &member.id == id));
        if let Some(anchor) = &self.anchor
            && position_of(members, anchor).is_none()
        {
            self.anchor = None;
        }
        before != self.selection.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(spec: &[(&str, bool)]) -> Vec<Member> {
        spec.iter()
            .map(|&(id, disabled)| Member::new(id).disabled(disabled))
            .collect()
    }

    #[test]
    fn reconcile_keeps_present_member_by_id() {
        let list = members(&[("a", false), ("b", false), ("c", false)]);
        let mut state = WidgetState::new();
        state.set_active(&list, 2);
        // "a" removed, indices shift: "c" is now at 1.
        let shifted = members(&[("b", false), ("c", false)]);
        assert_eq!(state.reconcile(&shifted), Some(1));
        assert_eq!(state.active().map(MemberId::as_str), Some("c"));
    }

    #[test]
    fn reconcile_falls_back_to_nearest_when_removed() {
        let list = members(&[("a", false), ("b", false), ("c", false)]);
        let mut state = WidgetState::new();
        state.set_active(&list, 2);
        let shrunk = members(&[("a", false), ("b", false)]);
        assert_eq!(state.reconcile(&shrunk), Some(1));
        assert_eq!(state.active().map(MemberId::as_str), Some("b"));
    }

    #[test]
    fn reconcile_moves_off_disabled_member() {
        let list = members(&[("a", false), ("b", false), ("c", false)]);
        let mut state = WidgetState::new();
        state.set_active(&list, 1);
        let disabled = members(&[("a", false), ("b", true), ("c", false)]);
        let index = state.reconcile(&disabled);
        assert!(matches!(index, Some(0) | Some(2)));
        assert!(disabled[index.unwrap_or_default()].is_enabled());
    }

    #[test]
    fn reconcile_clears_when_everything_is_disabled() {
        let list = members(&[("a", false)]);
        let mut state = WidgetState::new();
        state.set_active(&list, 0);
        assert_eq!(state.reconcile(&members(&[("a", true)])), None);
        assert_eq!(state.active(), None);
        assert_eq!(state.reconcile(&[]), None);
    }

    #[test]
    fn prune_drops_stale_selection() {
        let mut state = WidgetState::new();
        state.insert_selected(&MemberId::from("a"));
        state.insert_selected(&MemberId::from("gone"));
        state.set_anchor(Some(MemberId::from("gone")));
        assert!(state.prune_selection(&members(&[("a", false)])));
        assert_eq!(state.selection().len(), 1);
        assert_eq!(state.anchor(), None);
    }

    #[test]
    fn select_only_reports_change() {
        let mut state = WidgetState::new();
        let a = MemberId::from("a");
        assert!(state.select_only(&a));
        assert!(!state.select_only(&a));
        assert!(state.is_selected(&a));
    }

    #[test]
    fn sort_tokens() {
        assert_eq!(SortDirection::None.as_aria(), "none");
        assert_eq!(SortDirection::Ascending.as_aria(), "ascending");
        assert_eq!(SortDirection::Descending.as_aria(), "descending");
        assert_eq!(WidgetState::new().sort_of(4), SortDirection::None);
    }
}
