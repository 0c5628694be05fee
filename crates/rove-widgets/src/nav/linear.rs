#![forbid(unsafe_code)]

//! Linear navigation: one ordered list of members.

use rove_core::{Hit, KeyCode, KeyEvent, Member, MemberId, PointerEvent, position_of};

use super::{Activation, Effect, LinearConfig, NavContext, Navigator, Orientation, Transition};
use crate::roving::{RovingTabindex, Travel, first_enabled, last_enabled, step};
use crate::state::WidgetState;

/// Where a navigation key wants to go.
enum Target {
    Step(Travel),
    First,
    Last,
}

impl LinearConfig {
    fn target_for(&self, code: KeyCode) -> Option<Target> {
        let horizontal = matches!(self.orientation, Orientation::Horizontal | Orientation::Both);
        let vertical = matches!(self.orientation, Orientation::Vertical | Orientation::Both);
        match code {
            KeyCode::Right if horizontal => Some(Target::Step(Travel::Forward)),
            KeyCode::Left if horizontal => Some(Target::Step(Travel::Backward)),
            KeyCode::Down if vertical => Some(Target::Step(Travel::Forward)),
            KeyCode::Up if vertical => Some(Target::Step(Travel::Backward)),
            KeyCode::Home => Some(Target::First),
            KeyCode::End => Some(Target::Last),
            _ => None,
        }
    }

    fn resolve(&self, members: &[Member], current: Option<usize>, target: Target) -> Option<usize> {
        match (target, current) {
            (Target::First, _) => first_enabled(members),
            (Target::Last, _) => last_enabled(members),
            (Target::Step(travel), Some(from)) => step(members, from, travel, self.wrap),
            (Target::Step(Travel::Forward), None) => first_enabled(members),
            (Target::Step(Travel::Backward), None) => last_enabled(members),
        }
    }

    /// Make `index` the active member, applying selection-follows-focus.
    fn move_active(&self, state: &mut WidgetState, members: &[Member], index: usize, reason: &str) -> Transition {
        let from = state.active_index();
        let mut roving = RovingTabindex::at(from);
        let Some(to) = roving.move_to(members, index, Travel::Forward) else {
            return Transition::handled(false);
        };
        let mut changed = state.set_active(members, to);
        if self.selection_follows_focus && self.activation == Activation::Single {
            changed |= state.select_only(&members[to].id);
        }
        #[cfg(feature = "tracing")]
        log_move(reason, from, to);
        #[cfg(not(feature = "tracing"))]
        let _ = reason;
        let mut transition = Transition::handled(changed);
        if from != Some(to) {
            transition.push(Effect::FocusMember(members[to].id.clone()));
        }
        transition
    }

    /// Apply the activation mode to the active member.
    fn activate(&self, state: &mut WidgetState, members: &[Member]) -> Transition {
        let Some(member) = state.active_index().and_then(|i| members.get(i)) else {
            return Transition::handled(false);
        };
        if !member.is_enabled() {
            return Transition::handled(false);
        }
        let id = member.id.clone();
        let mut transition = match self.activation {
            Activation::Single => Transition::handled(state.select_only(&id)),
            Activation::Toggle | Activation::Checkbox => {
                state.toggle_selected(&id);
                Transition::handled(true)
            }
            Activation::Action { .. } => Transition::handled(false),
            Activation::Press => {
                let pressed = !state.pressed().unwrap_or(false);
                state.set_pressed(Some(pressed));
                Transition::handled(true)
            }
        };
        transition.push(Effect::Activated(id));
        if matches!(self.activation, Activation::Action { closes_owner: true }) {
            transition.push(Effect::CloseOwner);
        }
        transition
    }

    fn type_ahead(&self, state: &mut WidgetState, ch: char, cx: &mut NavContext<'_>) -> Transition {
        cx.typeahead.push(ch, cx.now);
        match cx.typeahead.find(cx.members, state.active_index()) {
            Some(index) => self.move_active(state, cx.members, index, "typeahead"),
            // Nothing matched: consume the key, keep the buffer for refinement.
            None => Transition::handled(false),
        }
    }
}

impl Navigator for LinearConfig {
    fn init(&self, state: &mut WidgetState, members: &[Member], preselected: Option<&MemberId>) {
        let preselected = preselected
            .cloned()
            .or_else(|| state.selection().iter().next().cloned());
        let mut roving = RovingTabindex::default();
        match roving.init(members, preselected.as_ref()) {
            Some(index) => {
                state.set_active(members, index);
            }
            None => {
                state.clear_active();
            }
        }
    }

    fn handle_key(&self, state: &mut WidgetState, key: &KeyEvent, cx: &mut NavContext<'_>) -> Transition {
        if !key.is_actionable() {
            return Transition::ignored();
        }
        let members = cx.members;
        let chord = key.ctrl() || key.alt() || key.super_key();

        if let Some(target) = self.target_for(key.code) {
            if chord {
                return Transition::ignored();
            }
            cx.typeahead.clear();
            if first_enabled(members).is_none() {
                return Transition::ignored();
            }
            return match self.resolve(members, state.active_index(), target) {
                Some(index) => self.move_active(state, members, index, "key"),
                None => Transition::handled(false),
            };
        }

        match key.code {
            KeyCode::Enter if !chord => {
                if self.activation == Activation::Checkbox {
                    return Transition::ignored();
                }
                cx.typeahead.clear();
                self.activate(state, members)
            }
            KeyCode::Char(' ') if !chord => {
                // Space extends an in-progress type-ahead ("new y" → "new york").
                if self.typeahead && cx.typeahead.is_active() && !cx.typeahead.expire(cx.now) {
                    return self.type_ahead(state, ' ', cx);
                }
                self.activate(state, members)
            }
            _ => match key.printable() {
                Some(ch) if self.typeahead => self.type_ahead(state, ch, cx),
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
        let Hit::Member(id) = &event.hit else {
            return Transition::ignored();
        };
        let members = cx.members;
        let Some(index) = position_of(members, id).filter(|&i| members[i].is_enabled()) else {
            return Transition::ignored();
        };
        cx.typeahead.clear();
        let mut transition = self.move_active(state, members, index, "pointer");
        // The click itself moves DOM focus.
        transition.effects.clear();
        transition.merge(self.activate(state, members));
        transition
    }
}

#[cfg(feature = "tracing")]
fn log_move(reason: &str, from: Option<usize>, to: usize) {
    tracing::debug!(
        message = "nav.linear",
        reason,
        from = from.map_or(-1, |i| i as i64),
        to = to as u64
    );
}
