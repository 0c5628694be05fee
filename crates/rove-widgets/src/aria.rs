#![forbid(unsafe_code)]

//! Accessible state synchronizer.
//!
//! [`synchronize`] maps a widget's state onto the attributes the renderer
//! writes. It is a pure function: the same shape, state, and member list
//! always produce the same [`AttributeSet`].
//!
//! # Invariants
//!
//! - Roving widgets: exactly one member carries `tabindex="0"` when an
//!   active member exists; every other member carries `tabindex="-1"`.
//! - Selection attributes are always explicit (`"true"` or `"false"`),
//!   never omitted for unselected members.
//! - `aria-activedescendant` is present only while an overlay is open and
//!   has an active option.

use std::collections::BTreeMap;
use std::fmt;

use rove_core::{Member, MemberId};

use crate::nav::{Activation, OverlayKind, SelectionAttr, Shape};
use crate::state::WidgetState;

/// Attribute names written by the synchronizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttrName {
    Expanded,
    Selected,
    Checked,
    Pressed,
    ActiveDescendant,
    Sort,
    Current,
    TabIndex,
}

impl AttrName {
    /// The exact attribute name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expanded => "aria-expanded",
            Self::Selected => "aria-selected",
            Self::Checked => "aria-checked",
            Self::Pressed => "aria-pressed",
            Self::ActiveDescendant => "aria-activedescendant",
            Self::Sort => "aria-sort",
            Self::Current => "aria-current",
            Self::TabIndex => "tabindex",
        }
    }
}

impl fmt::Display for AttrName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute values of one element.
pub type Attrs = BTreeMap<AttrName, String>;

/// Everything the renderer must write after a transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    /// Attributes of the trigger or combobox input (overlays only).
    pub trigger: Attrs,
    /// Attributes of each member, in member order.
    pub members: Vec<(MemberId, Attrs)>,
    /// Attributes of each sortable column header.
    pub columns: Vec<Attrs>,
}

impl AttributeSet {
    /// Attributes of the member with `id`.
    #[must_use]
    pub fn member(&self, id: &str) -> Option<&Attrs> {
        self.members
            .iter()
            .find(|(member, _)| member.as_str() == id)
            .map(|(_, attrs)| attrs)
    }

    /// One attribute of the member with `id`.
    #[must_use]
    pub fn member_attr(&self, id: &str, name: AttrName) -> Option<&str> {
        self.member(id)?.get(&name).map(String::as_str)
    }

    /// One attribute of the trigger.
    #[must_use]
    pub fn trigger_attr(&self, name: AttrName) -> Option<&str> {
        self.trigger.get(&name).map(String::as_str)
    }

    /// One attribute of column header `column`.
    #[must_use]
    pub fn column_attr(&self, column: usize, name: AttrName) -> Option<&str> {
        self.columns.get(column)?.get(&name).map(String::as_str)
    }

    /// Ids of members whose `tabindex` is `"0"`.
    #[must_use]
    pub fn tab_stops(&self) -> Vec<&MemberId> {
        self.members
            .iter()
            .filter(|(_, attrs)| attrs.get(&AttrName::TabIndex).map(String::as_str) == Some("0"))
            .map(|(id, _)| id)
            .collect()
    }
}

fn flag(value: bool) -> String {
    String::from(if value { "true" } else { "false" })
}

const fn selection_name(attr: SelectionAttr) -> Option<AttrName> {
    match attr {
        SelectionAttr::Selected => Some(AttrName::Selected),
        SelectionAttr::Checked => Some(AttrName::Checked),
        SelectionAttr::Pressed => Some(AttrName::Pressed),
        SelectionAttr::Expanded => Some(AttrName::Expanded),
        SelectionAttr::Current => Some(AttrName::Current),
        SelectionAttr::None => None,
    }
}

fn roving(state: &WidgetState, member: &Member) -> Attrs {
    let mut attrs = Attrs::new();
    let tabindex = if state.active() == Some(&member.id) { "0" } else { "-1" };
    attrs.insert(AttrName::TabIndex, tabindex.to_owned());
    attrs
}

/// Derive the attribute set of a widget.
#[must_use]
pub fn synchronize(shape: &Shape, state: &WidgetState, members: &[Member]) -> AttributeSet {
    let mut out = AttributeSet::default();
    match shape {
        Shape::Linear(config) => {
            let selection = selection_name(config.selection_attr);
            let pressed = (config.activation == Activation::Press).then(|| state.pressed().unwrap_or(false));
            for member in members {
                let mut attrs = roving(state, member);
                if let Some(name) = selection {
                    attrs.insert(name, flag(state.is_selected(&member.id)));
                }
                if let Some(pressed) = pressed {
                    attrs.insert(AttrName::Pressed, flag(pressed));
                }
                out.members.push((member.id.clone(), attrs));
            }
        }
        Shape::Grid(config) => {
            for member in members.iter().filter(|m| m.cell.is_some()) {
                let mut attrs = roving(state, member);
                attrs.insert(AttrName::Selected, flag(state.is_selected(&member.id)));
                out.members.push((member.id.clone(), attrs));
            }
            for column in 0..config.sortable_columns {
                let mut attrs = Attrs::new();
                attrs.insert(AttrName::Sort, state.sort_of(column).as_aria().to_owned());
                out.columns.push(attrs);
            }
        }
        Shape::Overlay(config) => {
            out.trigger.insert(AttrName::Expanded, flag(state.is_open()));
            if state.is_open()
                && let Some(active) = state.active()
            {
                out.trigger
                    .insert(AttrName::ActiveDescendant, active.as_str().to_owned());
            }
            if config.kind != OverlayKind::Popup {
                for member in members {
                    let mut attrs = Attrs::new();
                    attrs.insert(AttrName::Selected, flag(state.is_selected(&member.id)));
                    out.members.push((member.id.clone(), attrs));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::{Navigator, WidgetKind};
    use crate::state::{OpenState, SortDirection};

    fn members(ids: &[&str]) -> Vec<Member> {
        ids.iter().map(|&id| Member::new(id)).collect()
    }

    #[test]
    fn attribute_names_are_exact() {
        assert_eq!(AttrName::Expanded.as_str(), "aria-expanded");
        assert_eq!(AttrName::ActiveDescendant.to_string(), "aria-activedescendant");
        assert_eq!(AttrName::TabIndex.as_str(), "tabindex");
    }

    #[test]
    fn roving_members_have_one_tab_stop() {
        let shape = WidgetKind::Toolbar.shape();
        let list = members(&["a", "b", "c"]);
        let mut state = WidgetState::new();
        shape.init(&mut state, &list, None);
        let attrs = synchronize(&shape, &state, &list);
        assert_eq!(attrs.tab_stops(), [&MemberId::from("a")]);
        assert_eq!(attrs.member_attr("b", AttrName::TabIndex), Some("-1"));
        assert_eq!(attrs.member_attr("a", AttrName::Selected), None);
    }

    #[test]
    fn selection_is_always_explicit() {
        let shape = WidgetKind::CheckboxGroup.shape();
        let list = members(&["a", "b"]);
        let mut state = WidgetState::new();
        shape.init(&mut state, &list, None);
        state.insert_selected(&MemberId::from("b"));
        let attrs = synchronize(&shape, &state, &list);
        assert_eq!(attrs.member_attr("a", AttrName::Checked), Some("false"));
        assert_eq!(attrs.member_attr("b", AttrName::Checked), Some("true"));
    }

    #[test]
    fn toggle_button_exposes_pressed() {
        let shape = WidgetKind::ToggleButton.shape();
        let list = members(&["bold"]);
        let mut state = WidgetState::new();
        shape.init(&mut state, &list, None);
        let attrs = synchronize(&shape, &state, &list);
        assert_eq!(attrs.member_attr("bold", AttrName::Pressed), Some("false"));
        state.set_pressed(Some(true));
        let attrs = synchronize(&shape, &state, &list);
        assert_eq!(attrs.member_attr("bold", AttrName::Pressed), Some("true"));
    }

    #[test]
    fn overlay_activedescendant_only_while_open() {
        let shape = WidgetKind::Select.shape();
        let list = members(&["a", "b"]);
        let mut state = WidgetState::new();
        shape.init(&mut state, &list, None);
        let closed = synchronize(&shape, &state, &list);
        assert_eq!(closed.trigger_attr(AttrName::Expanded), Some("false"));
        assert_eq!(closed.trigger_attr(AttrName::ActiveDescendant), None);

        state.set_open(OpenState::Open);
        state.set_active(&list, 1);
        let open = synchronize(&shape, &state, &list);
        assert_eq!(open.trigger_attr(AttrName::Expanded), Some("true"));
        assert_eq!(open.trigger_attr(AttrName::ActiveDescendant), Some("b"));
        assert_eq!(open.member_attr("a", AttrName::Selected), Some("false"));
    }

    #[test]
    fn sortable_columns_expose_sort() {
        let shape = Shape::Grid(crate::nav::GridConfig::default().sortable_columns(2));
        let mut state = WidgetState::new();
        state.sort_mut(2)[1] = SortDirection::Descending;
        let attrs = synchronize(&shape, &state, &[]);
        assert_eq!(attrs.column_attr(0, AttrName::Sort), Some("none"));
        assert_eq!(attrs.column_attr(1, AttrName::Sort), Some("descending"));
    }

    #[test]
    fn synchronize_is_deterministic() {
        let shape = WidgetKind::Listbox.shape();
        let list = members(&["a", "b", "c"]);
        let mut state = WidgetState::new();
        shape.init(&mut state, &list, None);
        state.select_only(&MemberId::from("c"));
        assert_eq!(
            synchronize(&shape, &state, &list),
            synchronize(&shape, &state, &list)
        );
    }
}
