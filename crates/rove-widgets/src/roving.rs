#![forbid(unsafe_code)]

//! Roving tabindex bookkeeping.
//!
//! Inside a composite widget exactly one member is reachable with Tab
//! (`tabindex="0"`); every other member carries `tabindex="-1"` and is reached
//! with arrow keys instead. [`RovingTabindex`] tracks which member that is over
//! a freshly supplied member list and never lets it rest on a disabled member
//! while an enabled one exists.
//!
//! The free functions are the enabled-member scans shared by every navigation
//! shape.

use rove_core::{Member, MemberId, position_of};

/// Direction of travel through an ordered member list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Travel {
    /// Towards higher indices.
    Forward,
    /// Towards lower indices.
    Backward,
}

/// Index of the first enabled member.
#[must_use]
pub fn first_enabled(members: &[Member]) -> Option<usize> {
    members.iter().position(Member::is_enabled)
}

/// Index of the last enabled member.
#[must_use]
pub fn last_enabled(members: &[Member]) -> Option<usize> {
    members.iter().rposition(Member::is_enabled)
}

/// Next enabled member from `from` in `travel` direction.
///
/// With `wrap`, the scan continues around the ends and may come back to
/// `from` itself when it is the only enabled member. Without `wrap`, the
/// scan stops at the end and returns `None`.
#[must_use]
pub fn step(members: &[Member], from: usize, travel: Travel, wrap: bool) -> Option<usize> {
    let len = members.len();
    if len == 0 {
        return None;
    }
    let from = from.min(len - 1);
    for offset in 1..=len {
        let candidate = match (travel, wrap) {
            (Travel::Forward, true) => (from + offset) % len,
            (Travel::Backward, true) => (from + len * offset - offset) % len,
            (Travel::Forward, false) => {
                let next = from + offset;
                if next >= len {
                    return None;
                }
                next
            }
            (Travel::Backward, false) => from.checked_sub(offset)?,
        };
        if members[candidate].is_enabled() {
            return Some(candidate);
        }
    }
    None
}

/// Enabled member closest to `index`; ties go forward.
#[must_use]
pub fn nearest_enabled(members: &[Member], index: usize) -> Option<usize> {
    let len = members.len();
    if len == 0 {
        return None;
    }
    let index = index.min(len - 1);
    for distance in 0..len {
        let forward = index + distance;
        if forward < len && members[forward].is_enabled() {
            return Some(forward);
        }
        if let Some(backward) = index.checked_sub(distance)
            && members[backward].is_enabled()
        {
            return Some(backward);
        }
    }
    None
}

/// Enabled member at or beyond `index` in `travel` direction, falling back to
/// the other direction when none exists that way.
#[must_use]
pub fn enabled_toward(members: &[Member], index: usize, travel: Travel) -> Option<usize> {
    let len = members.len();
    if len == 0 {
        return None;
    }
    let index = index.min(len - 1);
    let ahead = match travel {
        Travel::Forward => (index..len).find(|&i| members[i].is_enabled()),
        Travel::Backward => (0..=index).rev().find(|&i| members[i].is_enabled()),
    };
    ahead.or_else(|| nearest_enabled(members, index))
}

/// The single keyboard-reachable member of a linear or grid widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RovingTabindex {
    current: Option<usize>,
}

impl RovingTabindex {
    /// A controller positioned at `current` (a transient index).
    #[must_use]
    pub const fn at(current: Option<usize>) -> Self {
        Self { current }
    }

    /// Pick the initial member.
    ///
    /// A pre-selected enabled member (a checked radio, the selected tab) wins;
    /// otherwise the first enabled member. `None` when nothing is enabled.
    pub fn init(&mut self, members: &[Member], preselected: Option<&MemberId>) -> Option<usize> {
        let chosen = preselected
            .and_then(|id| position_of(members, id))
            .filter(|&i| members[i].is_enabled())
            .or_else(|| first_enabled(members));
        self.current = chosen;
        chosen
    }

    /// Move to `index`, clamped into range and onto an enabled member.
    ///
    /// A disabled target resolves to the nearest enabled member in the
    /// direction of travel. Idempotent: moving to the current member changes
    /// nothing. With no enabled member at all, the position is unchanged.
    pub fn move_to(&mut self, members: &[Member], index: usize, travel: Travel) -> Option<usize> {
        if let Some(target) = enabled_toward(members, index, travel) {
            self.current = Some(target);
        }
        self.current
    }

    /// The active index.
    #[inline]
    #[must_use]
    pub const fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// The `tabindex` value for the member at `index`.
    #[must_use]
    pub fn tabindex(&self, index: usize) -> i32 {
        if self.current == Some(index) { 0 } else { -1 }
    }
}
