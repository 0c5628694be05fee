#![forbid(unsafe_code)]

//! Renderer-driven member changes between interactions.
//!
//! The host may add, remove, or disable members at any time. The engine
//! re-resolves the active member by id on the next refresh or event, so
//! every test mutates the [`MemoryHost`] member list directly and then
//! refreshes or dispatches.
//!
//! # Invariants tested
//!
//! 1. A removed or disabled active member hands over to the nearest enabled
//!    one, ties going forward.
//! 2. Exactly one enabled member carries `tabindex="0"` after reconciliation.
//! 3. Grids only ever land on members that carry a cell.
//! 4. Selections naming removed members are dropped before the next
//!    transition, including combobox text input.
//!
//! Run:
//!   cargo test -p rove-widgets --test member_changes

use rove_core::{Element, KeyCode, KeyEvent, Member, MemberId};
use rove_widgets::{AttrName, Dispatched, Engine, MemoryHost, WidgetId, WidgetKind, WidgetSpec};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const W: WidgetId = WidgetId::new(7);

fn engine(kind: WidgetKind, members: Vec<Member>) -> Engine<MemoryHost> {
    let mut host = MemoryHost::new();
    let root = host.document().root();
    let trigger = host.document_mut().append(root, Element::button());
    let container = host.document_mut().append(root, Element::generic("div"));
    for member in members {
        host.add_member(W, container, member);
    }
    let mut engine = Engine::new(host);
    engine.register_widget(W, WidgetSpec::new(kind).container(container).trigger(trigger));
    engine
}

fn named(ids: &[&str]) -> Vec<Member> {
    ids.iter().map(|&id| Member::new(id)).collect()
}

fn press(engine: &mut Engine<MemoryHost>, code: KeyCode) -> Dispatched {
    engine
        .dispatch_key(W, KeyEvent::new(code))
        .expect("widget is registered")
}

fn remove(engine: &mut Engine<MemoryHost>, id: &str) {
    engine
        .host_mut()
        .members_mut(W)
        .retain(|member| member.id.as_str() != id);
}

fn active(engine: &Engine<MemoryHost>) -> Option<&str> {
    engine.state(W).and_then(|s| s.active()).map(MemberId::as_str)
}

fn tab_stops(engine: &Engine<MemoryHost>) -> Vec<String> {
    engine
        .host()
        .applied(W)
        .map(|attrs| attrs.tab_stops().into_iter().map(|id| id.as_str().to_owned()).collect())
        .unwrap_or_default()
}

// ============================================================================
// Linear widgets
// ============================================================================

#[test]
fn removed_active_member_hands_over_on_refresh() {
    let mut e = engine(WidgetKind::Listbox, named(&["a", "b", "c", "d"]));
    press(&mut e, KeyCode::Down);
    press(&mut e, KeyCode::Down);
    assert_eq!(active(&e), Some("c"));

    remove(&mut e, "c");
    let before = e.host().apply_count(W);
    e.refresh(W).expect("registered");
    assert_eq!(active(&e), Some("d"));
    assert_eq!(tab_stops(&e), ["d"]);
    assert_eq!(e.host().apply_count(W), before + 1);

    press(&mut e, KeyCode::Up);
    assert_eq!(active(&e), Some("b"));
}

#[test]
fn disabled_active_member_ties_go_forward() {
    let mut e = engine(WidgetKind::Toolbar, named(&["a", "b", "c"]));
    press(&mut e, KeyCode::Right);
    assert_eq!(active(&e), Some("b"));

    e.host_mut().members_mut(W)[1].disabled = true;
    e.refresh(W).expect("registered");
    assert_eq!(active(&e), Some("c"));
    assert_eq!(tab_stops(&e), ["c"]);
}

#[test]
fn dispatch_reconciles_before_navigating() {
    let mut e = engine(WidgetKind::Listbox, named(&["a", "b", "c", "d"]));
    press(&mut e, KeyCode::Down);
    remove(&mut e, "b");

    // "b" was at index 1; "c" takes over, then Down moves past it.
    press(&mut e, KeyCode::Down);
    assert_eq!(active(&e), Some("d"));
    assert_eq!(tab_stops(&e), ["d"]);
}

#[test]
fn unchanged_refresh_does_not_rewrite_attributes() {
    let mut e = engine(WidgetKind::RadioGroup, named(&["x", "y"]));
    let before = e.host().apply_count(W);
    e.refresh(W).expect("registered");
    assert_eq!(e.host().apply_count(W), before);
}

#[test]
fn emptied_widget_has_no_tab_stop_and_ignores_keys() {
    let mut e = engine(WidgetKind::Listbox, named(&["a", "b"]));
    e.host_mut().set_members(W, Vec::new());
    e.refresh(W).expect("registered");
    assert_eq!(active(&e), None);
    assert!(tab_stops(&e).is_empty());
    assert!(!press(&mut e, KeyCode::Down).handled);
}

#[test]
fn removed_selection_is_pruned() {
    let mut e = engine(WidgetKind::MultiListbox, named(&["a", "b", "c"]));
    press(&mut e, KeyCode::Char(' '));
    press(&mut e, KeyCode::Down);
    press(&mut e, KeyCode::Char(' '));
    let selected: Vec<&str> = e
        .state(W)
        .map(|s| s.selection().iter().map(MemberId::as_str).collect())
        .unwrap_or_default();
    assert_eq!(selected, ["a", "b"]);

    remove(&mut e, "a");
    e.refresh(W).expect("registered");
    let selected: Vec<&str> = e
        .state(W)
        .map(|s| s.selection().iter().map(MemberId::as_str).collect())
        .unwrap_or_default();
    assert_eq!(selected, ["b"]);
}

// ============================================================================
// Grids
// ============================================================================

#[test]
fn grid_never_lands_on_a_member_without_a_cell() {
    let members = vec![
        Member::new("a").at(0, 0),
        Member::new("caption"),
        Member::new("b").at(0, 1),
    ];
    let mut e = engine(WidgetKind::GridList, members);
    press(&mut e, KeyCode::Right);
    assert_eq!(active(&e), Some("b"));

    remove(&mut e, "b");
    e.refresh(W).expect("registered");
    assert_eq!(active(&e), Some("a"));
    assert_eq!(tab_stops(&e), ["a"]);
}

#[test]
fn grid_disabled_row_hands_over_to_following_row() {
    let members: Vec<Member> = (0..3)
        .flat_map(|r| (0..2).map(move |c| Member::new(format!("r{r}c{c}")).at(r, c)))
        .collect();
    let mut e = engine(WidgetKind::Table, members);
    press(&mut e, KeyCode::Down);
    press(&mut e, KeyCode::Right);
    assert_eq!(active(&e), Some("r1c1"));

    for member in &mut e.host_mut().members_mut(W)[2..4] {
        member.disabled = true;
    }
    e.refresh(W).expect("registered");
    assert_eq!(active(&e), Some("r2c1"));
    assert_eq!(tab_stops(&e), ["r2c1"]);
}

// ============================================================================
// Overlays
// ============================================================================

#[test]
fn combobox_input_drops_removed_selection() {
    let mut e = engine(WidgetKind::Combobox, named(&["Apple", "Banana", "Cherry"]));
    e.dispatch_input(W, "b").expect("combobox");
    press(&mut e, KeyCode::Enter);
    let state = e.state(W).expect("registered");
    assert!(state.is_selected(&MemberId::from("Banana")));
    assert_eq!(state.trigger_label(), Some("Banana"));

    remove(&mut e, "Banana");
    let out = e.dispatch_input(W, "a").expect("combobox");
    assert!(out.state.selection().is_empty());
    assert_eq!(out.state.trigger_label(), None);
    assert_eq!(out.state.active().map(MemberId::as_str), Some("Apple"));

    let attrs = e.host().applied(W).expect("attributes written");
    assert_ne!(attrs.member_attr("Apple", AttrName::Selected), Some("true"));
    assert_eq!(attrs.member_attr("Banana", AttrName::Selected), None);
}

#[test]
fn open_select_after_removal_starts_at_first_option() {
    let mut e = engine(WidgetKind::Select, named(&["one", "two", "three"]));
    press(&mut e, KeyCode::Down);
    press(&mut e, KeyCode::Down);
    press(&mut e, KeyCode::Enter);
    remove(&mut e, "two");

    let out = e.open(W).expect("overlay");
    assert!(out.state.is_open());
    assert!(out.state.selection().is_empty());
    assert_eq!(out.state.active().map(MemberId::as_str), Some("one"));
}
