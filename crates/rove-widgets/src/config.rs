#![forbid(unsafe_code)]

//! Engine-wide configuration.

use std::time::Duration;

/// Order in which a sortable column header cycles when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortCycle {
    /// None → Ascending → Descending → None.
    #[default]
    TriState,
    /// None → Ascending → Descending → Ascending.
    Toggle,
}

impl SortCycle {
    /// The direction following `current`.
    #[must_use]
    pub const fn next(self, current: crate::SortDirection) -> crate::SortDirection {
        use crate::SortDirection::{Ascending, Descending, None};
        match (self, current) {
            (_, None) => Ascending,
            (_, Ascending) => Descending,
            (Self::TriState, Descending) => None,
            (Self::Toggle, Descending) => Ascending,
        }
    }
}

/// Timeouts and policies shared by every widget an engine drives.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Idle interval after which the type-ahead buffer resets (default: 500ms).
    pub typeahead_timeout: Duration,
    /// Hold duration before a pointer press counts as a long press (default: 500ms).
    pub long_press_threshold: Duration,
    /// Sort cycle applied to tables that do not set their own (default: tri-state).
    pub sort_cycle: SortCycle,
    /// Rows moved by PageUp/PageDown in grids that do not set their own (default: 5).
    pub page_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            typeahead_timeout: Duration::from_millis(500),
            long_press_threshold: Duration::from_millis(500),
            sort_cycle: SortCycle::TriState,
            page_size: 5,
        }
    }
}

impl EngineConfig {
    /// Set the type-ahead idle timeout.
    #[must_use]
    pub fn typeahead_timeout(mut self, timeout: Duration) -> Self {
        self.typeahead_timeout = timeout;
        self
    }

    /// Set the long-press threshold.
    #[must_use]
    pub fn long_press_threshold(mut self, threshold: Duration) -> Self {
        self.long_press_threshold = threshold;
        self
    }

    /// Set the default sort cycle.
    #[must_use]
    pub fn sort_cycle(mut self, cycle: SortCycle) -> Self {
        self.sort_cycle = cycle;
        self
    }

    /// Set the default grid page size. Zero is treated as one.
    #[must_use]
    pub fn page_size(mut self, rows: usize) -> Self {
        self.page_size = rows.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SortDirection;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.typeahead_timeout, Duration::from_millis(500));
        assert_eq!(config.long_press_threshold, Duration::from_millis(500));
        assert_eq!(config.sort_cycle, SortCycle::TriState);
        assert_eq!(config.page_size, 5);
    }

    #[test]
    fn builder_clamps_page_size() {
        assert_eq!(EngineConfig::default().page_size(0).page_size, 1);
    }

    #[test]
    fn tri_state_cycle_returns_to_none() {
        let cycle = SortCycle::TriState;
        let mut dir = SortDirection::None;
        let mut seen = Vec::new();
        for _ in 0..3 {
            dir = cycle.next(dir);
            seen.push(dir);
        }
        assert_eq!(
            seen,
            [
                SortDirection::Ascending,
                SortDirection::Descending,
                SortDirection::None
            ]
        );
    }

    #[test]
    fn toggle_cycle_skips_none() {
        let cycle = SortCycle::Toggle;
        assert_eq!(
            cycle.next(SortDirection::Descending),
            SortDirection::Ascending
        );
    }
}
