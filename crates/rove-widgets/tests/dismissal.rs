#![forbid(unsafe_code)]

//! Outside-press and Escape dismissal of open overlays through the engine.
//!
//! # Invariants tested
//!
//! 1. A press inside an overlay or on its trigger keeps it open.
//! 2. A press elsewhere closes it and the trigger reports
//!    `aria-expanded="false"`.
//! 3. Escape closes only the most recently opened overlay.
//! 4. Document listeners are held exactly while an overlay is open, and the
//!    host is told once per attach or detach.

use rove_core::{DomView, Element, Hit, KeyCode, KeyEvent, Member, NodeId, PointerEvent};
use rove_widgets::{
    AttrName, Engine, ListenerChange, ListenerKind, MemoryHost, WidgetId, WidgetKind, WidgetSpec,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const MENU: WidgetId = WidgetId::new(1);
const SUBMENU: WidgetId = WidgetId::new(2);

struct Page {
    engine: Engine<MemoryHost>,
    trigger: NodeId,
    popup: NodeId,
    item: NodeId,
    sub_trigger: NodeId,
    sub_popup: NodeId,
    elsewhere: NodeId,
}

/// ```text
/// body
/// ├── button            (menu trigger)
/// ├── ul                (menu popup)
/// │   ├── li "new"
/// │   └── li "recent"   (submenu trigger)
/// ├── ul                (submenu popup)
/// │   └── li "a.txt"
/// └── main
/// ```
fn page() -> Page {
    let mut host = MemoryHost::new();
    let root = host.document().root();
    let trigger = host.document_mut().append(root, Element::button());
    let popup = host.document_mut().append(root, Element::generic("ul"));
    let item = host.add_member(MENU, popup, Member::new("new"));
    let sub_trigger = host.add_member(MENU, popup, Member::new("recent"));
    let sub_popup = host.document_mut().append(root, Element::generic("ul"));
    host.add_member(SUBMENU, sub_popup, Member::new("a.txt"));
    let elsewhere = host.document_mut().append(root, Element::generic("main"));

    let mut engine = Engine::new(host);
    engine.register_widget(
        MENU,
        WidgetSpec::new(WidgetKind::Select).container(popup).trigger(trigger),
    );
    engine.register_widget(
        SUBMENU,
        WidgetSpec::new(WidgetKind::Select)
            .container(sub_popup)
            .trigger(sub_trigger),
    );
    Page {
        engine,
        trigger,
        popup,
        item,
        sub_trigger,
        sub_popup,
        elsewhere,
    }
}

fn is_open(p: &Page, id: WidgetId) -> bool {
    p.engine.state(id).is_some_and(|s| s.is_open())
}

fn expanded(p: &Page, id: WidgetId) -> Option<String> {
    p.engine
        .host()
        .applied(id)
        .and_then(|a| a.trigger_attr(AttrName::Expanded))
        .map(str::to_owned)
}

// ============================================================================
// Outside press
// ============================================================================

#[test]
fn press_inside_keeps_menu_open() {
    let mut p = page();
    p.engine.open(MENU).expect("overlay");
    let out = p.engine.document_pointer_down(p.item);
    assert!(out.dismissed.is_empty());
    assert!(is_open(&p, MENU));
    assert!(p.engine.document_pointer_down(p.popup).dismissed.is_empty());
}

#[test]
fn press_on_trigger_is_not_outside() {
    let mut p = page();
    p.engine.open(MENU).expect("overlay");
    assert!(p.engine.document_pointer_down(p.trigger).dismissed.is_empty());
    // The trigger's own click handler toggles it closed.
    let toggle = PointerEvent::down(p.trigger, Hit::Trigger);
    let out = p.engine.dispatch_pointer(MENU, toggle).expect("overlay");
    assert!(!out.state.is_open());
}

#[test]
fn press_elsewhere_closes_and_updates_trigger() {
    let mut p = page();
    p.engine.open(MENU).expect("overlay");
    assert_eq!(expanded(&p, MENU).as_deref(), Some("true"));

    let out = p.engine.document_pointer_down(p.elsewhere);
    assert_eq!(out.dismissed, [MENU]);
    assert!(!is_open(&p, MENU));
    assert_eq!(expanded(&p, MENU).as_deref(), Some("false"));
    assert!(p.engine.open_overlays().is_empty());
}

#[test]
fn outside_press_does_not_move_focus() {
    let mut p = page();
    p.engine.open(MENU).expect("overlay");
    p.engine.document_pointer_down(p.elsewhere);
    assert_ne!(p.engine.host().active_element(), Some(p.trigger));
}

#[test]
fn nested_overlays_are_checked_independently() {
    let mut p = page();
    p.engine.open(MENU).expect("overlay");
    p.engine.open(SUBMENU).expect("overlay");

    // Inside the submenu: outside the menu's own popup, so the menu closes.
    let out = p.engine.document_pointer_down(p.sub_popup);
    assert_eq!(out.dismissed, [MENU]);
    assert!(is_open(&p, SUBMENU));

    p.engine.open(MENU).expect("overlay");
    let out = p.engine.document_pointer_down(p.elsewhere);
    assert_eq!(out.dismissed, [MENU, SUBMENU]);
}

// ============================================================================
// Escape
// ============================================================================

#[test]
fn escape_closes_innermost_only() {
    let mut p = page();
    p.engine.open(MENU).expect("overlay");
    p.engine.open(SUBMENU).expect("overlay");

    let out = p.engine.document_key(KeyEvent::new(KeyCode::Escape));
    assert!(out.handled);
    assert_eq!(out.dismissed, [SUBMENU]);
    assert!(is_open(&p, MENU));
    assert!(!is_open(&p, SUBMENU));
    assert_eq!(p.engine.host().active_element(), Some(p.sub_trigger));

    let out = p.engine.document_key(KeyEvent::new(KeyCode::Escape));
    assert_eq!(out.dismissed, [MENU]);
    assert_eq!(out.focused, Some(p.trigger));

    let out = p.engine.document_key(KeyEvent::new(KeyCode::Escape));
    assert!(!out.handled);
    assert!(out.dismissed.is_empty());
}

// ============================================================================
// Listener bookkeeping
// ============================================================================

#[test]
fn pointer_listener_is_held_while_open() {
    let mut p = page();
    let baseline = p.engine.listeners().count(ListenerKind::PointerDown);

    p.engine.open(MENU).expect("overlay");
    p.engine.open(SUBMENU).expect("overlay");
    assert_eq!(p.engine.listeners().count(ListenerKind::PointerDown), baseline + 1);

    p.engine.close(SUBMENU).expect("overlay");
    assert_eq!(p.engine.listeners().count(ListenerKind::PointerDown), baseline + 1);
    p.engine.close(MENU).expect("overlay");
    assert_eq!(p.engine.listeners().count(ListenerKind::PointerDown), baseline);

    p.engine.unregister_widget(MENU);
    p.engine.unregister_widget(SUBMENU);
    assert!(p.engine.listeners().attached().is_empty());
}

#[test]
fn listener_transitions_are_reported_once() {
    let mut p = page();
    let attached = p.engine.take_listener_changes();
    assert_eq!(attached.len(), 3);
    assert!(attached.iter().all(|&(_, change)| change == ListenerChange::Attached));

    // Already attached for focus-visible; opening shares the listeners.
    p.engine.open(MENU).expect("overlay");
    p.engine.close(MENU).expect("overlay");
    assert!(p.engine.take_listener_changes().is_empty());

    p.engine.unregister_widget(MENU);
    assert!(p.engine.take_listener_changes().is_empty());
    p.engine.unregister_widget(SUBMENU);
    let detached = p.engine.take_listener_changes();
    assert_eq!(detached.len(), 3);
    assert!(detached.iter().all(|&(_, change)| change == ListenerChange::Detached));
}

#[test]
fn unregistering_an_open_overlay_releases_it() {
    let mut p = page();
    p.engine.open(MENU).expect("overlay");
    assert!(p.engine.unregister_widget(MENU));
    assert!(p.engine.open_overlays().is_empty());
    assert!(p.engine.document_pointer_down(p.elsewhere).dismissed.is_empty());
}
