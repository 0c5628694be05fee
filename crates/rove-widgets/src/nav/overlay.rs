#![forbid(unsafe_code)]

//! Overlay navigation: a trigger plus a transient popup of options.
//!
//! Focus stays on the trigger (or combobox input) the whole time; the active
//! option is exposed through `aria-activedescendant` while the popup is
//! open. Indices in the state refer to the *visible* options: the full list
//! for selects, the filtered list for comboboxes.
//!
//! # Invariants
//!
//! - Closed implies no active option.
//! - Focus alone never opens the popup. Only activation keys, typing, and
//!   pointer presses do.
//! - Escape and Tab close without touching the selection.

use rove_core::{Hit, KeyCode, KeyEvent, Member, MemberId, PointerEvent, position_of};

use super::{Effect, FilterMode, NavContext, Navigator, OverlayConfig, OverlayKind, Transition};
use crate::roving::{Travel, first_enabled, last_enabled, step};
use crate::state::{OpenState, WidgetState};
use crate::typeahead::find_match;

/// Options whose label matches `text` under `mode`, case-insensitively.
/// An empty `text` matches everything.
#[must_use]
pub fn filter_members(members: &[Member], text: &str, mode: FilterMode) -> Vec<Member> {
    if text.is_empty() {
        return members.to_vec();
    }
    let needle = text.to_lowercase();
    members
        .iter()
        .filter(|m| {
            let label = m.label.to_lowercase();
            match mode {
                FilterMode::Prefix => label.starts_with(&needle),
                FilterMode::Substring => label.contains(&needle),
            }
        })
        .cloned()
        .collect()
}

impl OverlayConfig {
    /// Options currently shown in the popup.
    pub(crate) fn visible(&self, state: &WidgetState, members: &[Member]) -> Vec<Member> {
        match self.kind {
            OverlayKind::Combobox => filter_members(members, state.filter(), self.filter),
            OverlayKind::Select => members.to_vec(),
            OverlayKind::Popup => Vec::new(),
        }
    }

    /// Open the popup. The active option starts at the selection when it is
    /// visible and enabled, otherwise at the first (or, travelling backward,
    /// last) enabled option.
    pub(crate) fn open(&self, state: &mut WidgetState, members: &[Member], travel: Travel) -> Transition {
        let visible = self.visible(state, members);
        let selected = state
            .selection()
            .iter()
            .find_map(|id| position_of(&visible, id))
            .filter(|&i| visible[i].is_enabled());
        let start = selected.or_else(|| match travel {
            Travel::Forward => first_enabled(&visible),
            Travel::Backward => last_enabled(&visible),
        });
        let mut changed = state.set_open(OpenState::Open);
        changed |= match start {
            Some(index) => state.set_active(&visible, index),
            None => state.clear_active(),
        };
        #[cfg(feature = "tracing")]
        log_overlay("open", state);
        Transition::handled(changed)
    }

    /// Close the popup without committing.
    pub(crate) fn close(&self, state: &mut WidgetState) -> Transition {
        if !state.is_open() {
            return Transition::handled(false);
        }
        state.set_open(OpenState::Closed);
        state.clear_active();
        #[cfg(feature = "tracing")]
        log_overlay("close", state);
        Transition::handled(true)
    }

    /// Commit the visible option at `index`.
    fn commit(&self, state: &mut WidgetState, visible: &[Member], index: usize) -> Transition {
        let Some(member) = visible.get(index).filter(|m| m.is_enabled()) else {
            return Transition::handled(false);
        };
        state.select_only(&member.id);
        state.set_trigger_label(Some(member.label.clone()));
        state.set_filter("");
        state.set_open(OpenState::Closed);
        state.clear_active();
        #[cfg(feature = "tracing")]
        log_overlay("commit", state);
        Transition::handled(true)
            .with(Effect::Activated(member.id.clone()))
            .with(Effect::FocusTrigger)
    }

    /// Apply typed combobox text: re-filter, open if closed, and make the
    /// first enabled match active.
    pub(crate) fn input(&self, state: &mut WidgetState, text: &str, members: &[Member]) -> Transition {
        let mut changed = state.set_filter(text);
        changed |= state.set_open(OpenState::Open);
        let visible = self.visible(state, members);
        changed |= match first_enabled(&visible) {
            Some(index) => state.set_active(&visible, index),
            None => state.clear_active(),
        };
        #[cfg(feature = "tracing")]
        log_overlay("input", state);
        Transition::handled(changed)
    }

    fn move_active(&self, state: &mut WidgetState, visible: &[Member], travel: Travel) -> Transition {
        let target = match state.active_index() {
            Some(from) => step(visible, from, travel, self.wrap),
            None => match travel {
                Travel::Forward => first_enabled(visible),
                Travel::Backward => last_enabled(visible),
            },
        };
        match target {
            Some(index) => {
                let changed = state.set_active(visible, index);
                #[cfg(feature = "tracing")]
                log_overlay("move", state);
                Transition::handled(changed)
            }
            None => Transition::handled(false),
        }
    }

    fn jump(&self, state: &mut WidgetState, visible: &[Member], index: Option<usize>) -> Transition {
        match index {
            Some(index) => Transition::handled(state.set_active(visible, index)),
            None => Transition::handled(false),
        }
    }

    fn type_ahead(&self, state: &mut WidgetState, ch: char, cx: &mut NavContext<'_>) -> Transition {
        let mut transition = Transition::handled(false);
        if !state.is_open() {
            transition.merge(self.open(state, cx.members, Travel::Forward));
        }
        let visible = self.visible(state, cx.members);
        let query = cx.typeahead.push(ch, cx.now).to_owned();
        if let Some(index) = find_match(&visible, &query, state.active_index()) {
            transition.merge(self.jump(state, &visible, Some(index)));
        }
        transition
    }

    /// Close and report that focus belongs on the trigger.
    fn dismiss(&self, state: &mut WidgetState, cx: &mut NavContext<'_>) -> Transition {
        cx.typeahead.clear();
        self.close(state).with(Effect::FocusTrigger)
    }
}

impl Navigator for OverlayConfig {
    fn init(&self, state: &mut WidgetState, members: &[Member], preselected: Option<&MemberId>) {
        state.set_open(OpenState::Closed);
        state.clear_active();
        if let Some(member) = preselected
            .and_then(|id| position_of(members, id))
            .map(|i| &members[i])
        {
            state.select_only(&member.id);
            state.set_trigger_label(Some(member.label.clone()));
        }
    }

    fn reconcile(&self, state: &mut WidgetState, members: &[Member]) -> bool {
        let before = state.clone();
        if state.prune_selection(members) && state.selection().is_empty() {
            state.set_trigger_label(None);
        }
        if state.is_open() {
            let visible = self.visible(state, members);
            state.reconcile(&visible);
        } else {
            state.clear_active();
        }
        *state != before
    }

    fn handle_key(&self, state: &mut WidgetState, key: &KeyEvent, cx: &mut NavContext<'_>) -> Transition {
        if !key.is_actionable() || key.ctrl() || key.super_key() {
            return Transition::ignored();
        }
        let popup_trigger = self.kind != OverlayKind::Combobox;

        if !state.is_open() {
            return match key.code {
                KeyCode::Down => self.open(state, cx.members, Travel::Forward),
                KeyCode::Up => self.open(state, cx.members, Travel::Backward),
                KeyCode::Enter if popup_trigger => self.open(state, cx.members, Travel::Forward),
                KeyCode::Char(' ') if popup_trigger && !cx.typeahead.is_active() => {
                    self.open(state, cx.members, Travel::Forward)
                }
                _ => match key.printable() {
                    Some(ch) if self.kind == OverlayKind::Select && self.typeahead => {
                        self.type_ahead(state, ch, cx)
                    }
                    _ => Transition::ignored(),
                },
            };
        }

        let visible = self.visible(state, cx.members);
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                cx.typeahead.clear();
                let closed = self.close(state);
                Transition {
                    handled: false,
                    ..closed
                }
            }
            KeyCode::Escape => self.dismiss(state, cx),
            KeyCode::Up if key.alt() => self.dismiss(state, cx),
            KeyCode::Down | KeyCode::Up => {
                cx.typeahead.clear();
                let travel = if key.code == KeyCode::Down {
                    Travel::Forward
                } else {
                    Travel::Backward
                };
                self.move_active(state, &visible, travel)
            }
            KeyCode::Home if popup_trigger => self.jump(state, &visible, first_enabled(&visible)),
            KeyCode::End if popup_trigger => self.jump(state, &visible, last_enabled(&visible)),
            KeyCode::Enter => match state.active_index() {
                Some(index) => {
                    cx.typeahead.clear();
                    self.commit(state, &visible, index)
                }
                None if popup_trigger => self.dismiss(state, cx),
                None => Transition::ignored(),
            },
            KeyCode::Char(' ') if popup_trigger && !cx.typeahead.is_active() => {
                match state.active_index() {
                    Some(index) => self.commit(state, &visible, index),
                    None => self.dismiss(state, cx),
                }
            }
            _ => match key.printable() {
                Some(ch) if self.kind == OverlayKind::Select && self.typeahead => {
                    self.type_ahead(state, ch, cx)
                }
                _ => Transition::ignored(),
            },
        }
    }

    fn handle_pointer(
        &self,
        state: &mut WidgetState,
        event: &PointerEvent,
        cx: &mut NavContext<'_>,
    ) -> Transition {
        if !event.is_primary_down() {
            return Transition::ignored();
        }
        match &event.hit {
            Hit::Trigger if state.is_open() => {
                cx.typeahead.clear();
                self.close(state)
            }
            Hit::Trigger => self.open(state, cx.members, Travel::Forward),
            Hit::Member(id) if state.is_open() => {
                let visible = self.visible(state, cx.members);
                match position_of(&visible, id).filter(|&i| visible[i].is_enabled()) {
                    Some(index) => {
                        cx.typeahead.clear();
                        self.commit(state, &visible, index)
                    }
                    None => Transition::ignored(),
                }
            }
            _ => Transition::ignored(),
        }
    }
}

#[cfg(feature = "tracing")]
fn log_overlay(reason: &str, state: &WidgetState) {
    tracing::debug!(
        message = "nav.overlay",
        reason,
        open = state.is_open(),
        active = state.active().map(MemberId::as_str)
    );
}
