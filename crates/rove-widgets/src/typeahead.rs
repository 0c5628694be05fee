#![forbid(unsafe_code)]

//! Type-ahead: jump to the member whose label starts with recently typed
//! characters.
//!
//! # Behavior
//!
//! - Printable characters accumulate in a buffer that resets after an idle
//!   interval (500 ms by default, see [`crate::EngineConfig`]).
//! - Non-printable navigation keys clear the buffer immediately.
//! - Matching is a case-insensitive prefix test against member labels,
//!   skipping disabled members and cycling around the end of the list.
//! - A single character searches starting just after the active member, so
//!   repeated presses step through members sharing an initial. A buffer made
//!   of one repeated character ("aaa") behaves the same way.
//! - A longer buffer searches starting at the active member, so refining a
//!   match that is already active keeps it.

use std::time::Duration;

use rove_core::{Deadline, Instant, Member};

/// Accumulated type-ahead characters with an idle reset deadline.
#[derive(Debug, Clone)]
pub struct TypeAhead {
    buffer: String,
    deadline: Deadline,
    timeout: Duration,
}

impl Default for TypeAhead {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

impl TypeAhead {
    /// Create an empty buffer with the given idle timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            buffer: String::new(),
            deadline: Deadline::new(),
            timeout,
        }
    }

    /// The idle timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Current buffer contents (lowercased).
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Whether characters are pending.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Append a character at `now`, first discarding an expired buffer.
    pub fn push(&mut self, ch: char, now: Instant) -> &str {
        self.expire(now);
        self.buffer.extend(ch.to_lowercase());
        self.deadline.arm(now, self.timeout);
        &self.buffer
    }

    /// Clear the buffer if the idle interval has elapsed. Returns whether it
    /// was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.deadline.take_expired(now) {
            self.buffer.clear();
            true
        } else {
            false
        }
    }

    /// Clear the buffer and cancel the idle timer.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.deadline.cancel();
    }

    /// Find the member matching the current buffer.
    #[must_use]
    pub fn find(&self, members: &[Member], current: Option<usize>) -> Option<usize> {
        find_match(members, &self.buffer, current)
    }
}

/// Index of the member whose label starts with `query`, searching
/// cyclically from the active position.
///
/// A single or repeated character searches from just after the active
/// member, so pressing it again cycles through same-letter labels. A longer
/// query includes the active member: typing "bl" after "b" landed on
/// "blueberry" must keep "blueberry" rather than skip to the next match.
#[must_use]
pub fn find_match(members: &[Member], query: &str, current: Option<usize>) -> Option<usize> {
    let len = members.len();
    if len == 0 || query.is_empty() {
        return None;
    }
    let query = query.to_lowercase();
    let mut chars = query.chars();
    let first = chars.next()?;
    let repeated = chars.all(|c| c == first);

    let (needle, start) = if repeated {
        let single = first.to_string();
        let start = current.map_or(0, |i| i + 1);
        (single, start)
    } else {
        (query, current.unwrap_or(0))
    };

    (0..len)
        .map(|offset| (start + offset) % len)
        .find(|&i| members[i].is_enabled() && members[i].label.to_lowercase().starts_with(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn fruits() -> Vec<Member> {
        ["Apple", "Apricot", "Banana", "blueberry", "Cherry"]
            .into_iter()
            .map(Member::new)
            .collect()
    }

    #[test]
    fn single_char_starts_after_current() {
        let members = fruits();
        assert_eq!(find_match(&members, "a", Some(0)), Some(1));
        assert_eq!(find_match(&members, "a", Some(1)), Some(0));
        assert_eq!(find_match(&members, "b", None), Some(2));
        assert_eq!(find_match(&members, "B", Some(2)), Some(3));
    }

    #[test]
    fn repeated_char_cycles() {
        let members = fruits();
        assert_eq!(find_match(&members, "bb", Some(2)), Some(3));
        assert_eq!(find_match(&members, "bbb", Some(3)), Some(2));
    }

    #[test]
    fn multi_char_refines_from_current() {
        let members = fruits();
        assert_eq!(find_match(&members, "ap", Some(0)), Some(0));
        assert_eq!(find_match(&members, "apr", Some(0)), Some(1));
        assert_eq!(find_match(&members, "bl", Some(2)), Some(3));
        assert_eq!(find_match(&members, "zz", Some(0)), None);
        assert_eq!(find_match(&members, "xy", Some(0)), None);
    }

    #[test]
    fn disabled_members_never_match() {
        let mut members = fruits();
        members[4].disabled = true;
        assert_eq!(find_match(&members, "c", None), None);
    }

    #[test]
    fn buffer_resets_after_idle_interval() {
        let t = Instant::now();
        let mut ta = TypeAhead::new(500 * MS);
        assert_eq!(ta.push('A', t), "a");
        assert_eq!(ta.push('p', t + 200 * MS), "ap");
        assert_eq!(ta.push('b', t + 800 * MS), "b");
        assert!(ta.expire(t + 1400 * MS));
        assert!(!ta.is_active());
    }

    #[test]
    fn clear_cancels_timer() {
        let t = Instant::now();
        let mut ta = TypeAhead::default();
        ta.push('x', t);
        ta.clear();
        assert!(!ta.is_active());
        assert!(!ta.expire(t + 10_000 * MS));
        assert_eq!(ta.timeout(), 500 * MS);
    }
}
