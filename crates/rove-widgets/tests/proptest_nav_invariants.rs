//! Property-based invariant tests for navigation through the engine.
//!
//! These tests verify structural invariants that must hold for any member
//! list and any key sequence:
//!
//! 1. A roving widget with an enabled member has exactly one tab stop, and
//!    it is the active member.
//! 2. The active member is never disabled.
//! 3. Pressing Down `n` times in a wrapping list of `n` enabled members
//!    returns to the start.
//! 4. Grid navigation stays on a cell of the grid.
//! 5. A closed overlay never exposes `aria-activedescendant`.
//! 6. No panics for any key sequence.

use proptest::prelude::*;
use rove_core::{DomView, Element, KeyCode, KeyEvent, Member, Modifiers};
use rove_widgets::{AttrName, Engine, Host, MemoryHost, WidgetId, WidgetKind, WidgetSpec};

// ── Helpers ─────────────────────────────────────────────────────────────

const W: WidgetId = WidgetId::new(1);

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

fn linear_members(disabled: &[bool]) -> Vec<Member> {
    disabled
        .iter()
        .enumerate()
        .map(|(i, &d)| Member::new(format!("m{i}")).disabled(d))
        .collect()
}

fn grid_members(rows: usize, cols: usize, holes: &[bool]) -> Vec<Member> {
    (0..rows * cols)
        .filter(|&i| !holes.get(i).copied().unwrap_or(false))
        .map(|i| Member::new(format!("c{i}")).at(i / cols, i % cols))
        .collect()
}

fn key_strategy() -> impl Strategy<Value = KeyEvent> {
    let code = prop_oneof![
        Just(KeyCode::Up),
        Just(KeyCode::Down),
        Just(KeyCode::Left),
        Just(KeyCode::Right),
        Just(KeyCode::Home),
        Just(KeyCode::End),
        Just(KeyCode::PageUp),
        Just(KeyCode::PageDown),
        Just(KeyCode::Enter),
        Just(KeyCode::Escape),
        Just(KeyCode::Char(' ')),
        Just(KeyCode::Char('m')),
    ];
    let modifiers = prop_oneof![
        4 => Just(Modifiers::NONE),
        1 => Just(Modifiers::SHIFT),
        1 => Just(Modifiers::CTRL),
        1 => Just(Modifiers::ALT),
    ];
    (code, modifiers).prop_map(|(code, modifiers)| KeyEvent::new(code).with_modifiers(modifiers))
}

fn linear_kind() -> impl Strategy<Value = WidgetKind> {
    prop_oneof![
        Just(WidgetKind::Toolbar),
        Just(WidgetKind::RadioGroup),
        Just(WidgetKind::CheckboxGroup),
        Just(WidgetKind::Listbox),
        Just(WidgetKind::MultiListbox),
        Just(WidgetKind::Menu),
        Just(WidgetKind::TabList),
        Just(WidgetKind::DisclosureGroup),
    ]
}

fn check_roving(engine: &Engine<MemoryHost>) -> Result<(), TestCaseError> {
    let members = engine.host().members(W);
    let attrs = engine.host().applied(W).cloned().unwrap_or_default();
    let active = engine.state(W).and_then(|s| s.active()).cloned();
    match &active {
        Some(id) => {
            prop_assert_eq!(attrs.tab_stops(), vec![id]);
            let member = members.iter().find(|m| &m.id == id);
            prop_assert!(member.is_some_and(Member::is_enabled), "active {} is disabled", id);
        }
        None => prop_assert!(members.iter().all(|m| !m.is_enabled())),
    }
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// 1–2. Linear widgets: one tab stop, never on a disabled member
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn linear_keeps_one_enabled_tab_stop(
        kind in linear_kind(),
        disabled in proptest::collection::vec(prop::bool::weighted(0.3), 1..8),
        keys in proptest::collection::vec(key_strategy(), 0..24),
    ) {
        let mut engine = engine(kind, linear_members(&disabled));
        check_roving(&engine)?;
        for key in keys {
            engine.dispatch_key(W, key).map_err(|e| TestCaseError::fail(e.to_string()))?;
            check_roving(&engine)?;
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Wrap closure
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn down_n_times_returns_to_start(n in 1usize..10, start in 0usize..10) {
        let start = start % n;
        let mut engine = engine(WidgetKind::Menu, linear_members(&vec![false; n]));
        for _ in 0..start {
            let _ = engine.dispatch_key(W, KeyEvent::new(KeyCode::Down));
        }
        let before = engine.state(W).and_then(|s| s.active()).cloned();
        for _ in 0..n {
            let _ = engine.dispatch_key(W, KeyEvent::new(KeyCode::Down));
        }
        let after = engine.state(W).and_then(|s| s.active()).cloned();
        prop_assert_eq!(before, after);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Grid navigation stays on the grid
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn grid_active_is_always_a_cell(
        rows in 1usize..5,
        cols in 1usize..5,
        holes in proptest::collection::vec(prop::bool::weighted(0.2), 0..25),
        keys in proptest::collection::vec(key_strategy(), 0..24),
    ) {
        let mut engine = engine(WidgetKind::GridList, grid_members(rows, cols, &holes));
        for key in keys {
            let _ = engine.dispatch_key(W, key);
            check_roving(&engine)?;
            let members = engine.host().members(W);
            if let Some(id) = engine.state(W).and_then(|s| s.active()) {
                let cell = members.iter().find(|m| &m.id == id).and_then(|m| m.cell);
                prop_assert!(cell.is_some_and(|c| c.row < rows && c.col < cols));
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Overlays: no active descendant while closed
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn closed_overlay_has_no_active_descendant(
        select in any::<bool>(),
        disabled in proptest::collection::vec(prop::bool::weighted(0.3), 0..6),
        keys in proptest::collection::vec(key_strategy(), 0..24),
    ) {
        let kind = if select { WidgetKind::Select } else { WidgetKind::Combobox };
        let mut engine = engine(kind, linear_members(&disabled));
        for key in keys {
            let _ = engine.dispatch_key(W, key);
            let state = engine.state(W).cloned().unwrap_or_default();
            let attrs = engine.host().applied(W).cloned().unwrap_or_default();
            let descendant = attrs.trigger_attr(AttrName::ActiveDescendant);
            let expanded = attrs.trigger_attr(AttrName::Expanded);
            if state.is_open() {
                prop_assert_eq!(expanded, Some("true"));
                prop_assert_eq!(descendant, state.active().map(|id| id.as_str()));
            } else {
                prop_assert_eq!(expanded, Some("false"));
                prop_assert_eq!(descendant, None);
                prop_assert!(engine.open_overlays().is_empty());
            }
            // Focus, when the engine moved it, is on a live node.
            if let Some(node) = engine.host().active_element() {
                prop_assert!(engine.host().is_attached(node));
            }
        }
    }
}
