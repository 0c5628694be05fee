#![forbid(unsafe_code)]

//! Grid navigation: members laid out by `(row, col)`.
//!
//! Rows may be ragged. Movement clamps at every edge and never wraps. A move
//! onto a disabled cell lands on the nearest enabled cell of the target row,
//! continuing to further rows in the direction of travel when a row has no
//! enabled cell at all.

use std::collections::BTreeSet;

use rove_core::{Cell, Hit, KeyCode, KeyEvent, Member, MemberId, PointerEvent, position_of};

use super::{Effect, GridConfig, NavContext, Navigator, Transition};
use crate::config::SortCycle;
use crate::roving::Travel;
use crate::state::{SortDirection, WidgetState};

/// Row-major view of the members that carry a cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridLayout {
    /// `rows[r]` holds `(col, member index)` sorted by column.
    rows: Vec<Vec<(usize, usize)>>,
}

impl GridLayout {
    /// Build the layout from a member list. Members without a cell are
    /// left out.
    #[must_use]
    pub fn new(members: &[Member]) -> Self {
        let mut rows: Vec<Vec<(usize, usize)>> = Vec::new();
        for (index, member) in members.iter().enumerate() {
            let Some(cell) = member.cell else { continue };
            if rows.len() <= cell.row {
                rows.resize_with(cell.row + 1, Vec::new);
            }
            rows[cell.row].push((cell.col, index));
        }
        for row in &mut rows {
            row.sort_unstable();
        }
        Self { rows }
    }

    /// Number of rows (highest row + 1).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (widest row's highest column + 1).
    #[must_use]
    pub fn cols(&self) -> usize {
        self.rows
            .iter()
            .filter_map(|row| row.last().map(|&(col, _)| col + 1))
            .max()
            .unwrap_or(0)
    }

    /// Member index at `cell`.
    #[must_use]
    pub fn index_at(&self, cell: Cell) -> Option<usize> {
        self.rows
            .get(cell.row)?
            .iter()
            .find(|&&(col, _)| col == cell.col)
            .map(|&(_, index)| index)
    }

    fn row(&self, row: usize) -> &[(usize, usize)] {
        self.rows.get(row).map_or(&[], Vec::as_slice)
    }

    /// Enabled cell in `row` closest to `col`; ties go left.
    fn nearest_in_row(&self, members: &[Member], row: usize, col: usize) -> Option<usize> {
        self.row(row)
            .iter()
            .filter(|&&(_, index)| members[index].is_enabled())
            .min_by_key(|&&(c, _)| c.abs_diff(col))
            .map(|&(_, index)| index)
    }

    fn step_in_row(&self, members: &[Member], cell: Cell, travel: Travel) -> Option<usize> {
        let row = self.row(cell.row);
        let enabled = |&&(_, index): &&(usize, usize)| members[index].is_enabled();
        let found = match travel {
            Travel::Forward => row.iter().filter(|e| e.0 > cell.col).find(enabled),
            Travel::Backward => row.iter().rev().filter(|e| e.0 < cell.col).find(enabled),
        };
        found.map(|&(_, index)| index)
    }

    fn row_edge(&self, members: &[Member], row: usize, travel: Travel) -> Option<usize> {
        let row = self.row(row);
        let enabled = |&&(_, index): &&(usize, usize)| members[index].is_enabled();
        let found = match travel {
            Travel::Backward => row.iter().find(enabled),
            Travel::Forward => row.iter().rev().find(enabled),
        };
        found.map(|&(_, index)| index)
    }

    /// First or last enabled cell in row-major order.
    fn grid_edge(&self, members: &[Member], travel: Travel) -> Option<usize> {
        let mut cells = self.rows.iter().flatten();
        let enabled = |&&(_, index): &&(usize, usize)| members[index].is_enabled();
        let found = match travel {
            Travel::Backward => cells.find(enabled),
            Travel::Forward => cells.rev().find(enabled),
        };
        found.map(|&(_, index)| index)
    }

    /// Enabled cell closest to `cell`: same row first, then rows at growing
    /// distance, the following row before the preceding one.
    fn nearest_cell(&self, members: &[Member], cell: Cell) -> Option<usize> {
        let last = self.rows.len().checked_sub(1)?;
        let origin = cell.row.min(last);
        (0..=last).find_map(|distance| {
            let below = origin
                .checked_add(distance)
                .filter(|&row| row <= last)
                .and_then(|row| self.nearest_in_row(members, row, cell.col));
            below.or_else(|| {
                origin
                    .checked_sub(distance)
                    .filter(|_| distance > 0)
                    .and_then(|row| self.nearest_in_row(members, row, cell.col))
            })
        })
    }

    /// Move `distance` rows from `cell`, clamped to the grid. Rows beyond the
    /// target are tried when the target row has nothing enabled, then rows
    /// between the start and the target.
    fn vertical(&self, members: &[Member], cell: Cell, travel: Travel, distance: usize) -> Option<usize> {
        let last = self.rows.len().checked_sub(1)?;
        let (target, beyond, between): (usize, Vec<usize>, Vec<usize>) = match travel {
            Travel::Forward => {
                let target = (cell.row + distance).min(last);
                (target, (target..=last).collect(), (cell.row + 1..target).rev().collect())
            }
            Travel::Backward => {
                let target = cell.row.saturating_sub(distance);
                (target, (0..=target).rev().collect(), (target + 1..cell.row).collect())
            }
        };
        if target == cell.row {
            return None;
        }
        beyond
            .into_iter()
            .chain(between)
            .find_map(|row| self.nearest_in_row(members, row, cell.col))
    }

    /// Enabled members inside the rectangle spanned by `a` and `b`.
    fn rectangle(&self, members: &[Member], a: Cell, b: Cell) -> BTreeSet<MemberId> {
        let (rows, cols) = (a.row.min(b.row)..=a.row.max(b.row), a.col.min(b.col)..=a.col.max(b.col));
        rows.flat_map(|row| self.row(row).iter())
            .filter(|&&(col, index)| cols.contains(&col) && members[index].is_enabled())
            .map(|&(_, index)| members[index].id.clone())
            .collect()
    }
}

/// Advance the sort of `column` by one step of `cycle`, forcing every other
/// column back to [`SortDirection::None`]. Returns the new direction, or
/// `None` when `column` is not one of the `columns` sortable headers.
pub fn apply_sort(
    state: &mut WidgetState,
    columns: usize,
    column: usize,
    cycle: SortCycle,
) -> Option<SortDirection> {
    if column >= columns {
        return None;
    }
    let sort = state.sort_mut(columns);
    let next = cycle.next(sort[column]);
    for (i, direction) in sort.iter_mut().enumerate() {
        *direction = if i == column { next } else { SortDirection::None };
    }
    Some(next)
}

/// Navigation key resolved against the layout.
enum Move {
    Vertical(Travel, usize),
    Horizontal(Travel),
    RowEdge(Travel),
    GridEdge(Travel),
}

impl GridConfig {
    fn target(&self, layout: &GridLayout, members: &[Member], from: Option<Cell>, mv: Move) -> Option<usize> {
        let Some(cell) = from else {
            return layout.grid_edge(members, Travel::Backward);
        };
        match mv {
            Move::Vertical(travel, distance) => layout.vertical(members, cell, travel, distance),
            Move::Horizontal(travel) => layout.step_in_row(members, cell, travel),
            Move::RowEdge(travel) => layout.row_edge(members, cell.row, travel),
            Move::GridEdge(travel) => layout.grid_edge(members, travel),
        }
    }

    fn current_cell(state: &WidgetState, members: &[Member]) -> Option<Cell> {
        state
            .active_index()
            .and_then(|i| members.get(i))
            .and_then(|m| m.cell)
    }

    /// Toggle (multi) or set/clear (single) the active cell's selection.
    fn toggle_active(&self, state: &mut WidgetState, members: &[Member]) -> bool {
        let Some(member) = state.active_index().and_then(|i| members.get(i)) else {
            return false;
        };
        if !member.is_enabled() {
            return false;
        }
        let id = member.id.clone();
        state.set_anchor(Some(id.clone()));
        if self.multi_select {
            state.toggle_selected(&id);
            true
        } else if state.is_selected(&id) {
            state.clear_selection()
        } else {
            state.select_only(&id)
        }
    }

    /// Replace the selection with the anchor→active rectangle.
    fn extend_to_active(&self, state: &mut WidgetState, members: &[Member], layout: &GridLayout) -> bool {
        let Some(active) = Self::current_cell(state, members) else {
            return false;
        };
        let anchor = state
            .anchor()
            .and_then(|id| position_of(members, id))
            .and_then(|i| members[i].cell)
            .unwrap_or(active);
        state.replace_selection(layout.rectangle(members, anchor, active))
    }

    fn handle_move(
        &self,
        state: &mut WidgetState,
        key: &KeyEvent,
        mv: Move,
        members: &[Member],
        layout: &GridLayout,
    ) -> Transition {
        let from = Self::current_cell(state, members);
        let Some(to) = self.target(layout, members, from, mv) else {
            return Transition::handled(false);
        };
        let previous = state.active().cloned();
        let mut changed = state.set_active(members, to);
        let id = members[to].id.clone();

        if key.shift() && self.multi_select {
            if state.anchor().is_none() {
                state.set_anchor(previous.or_else(|| Some(id.clone())));
            }
            changed |= self.extend_to_active(state, members, layout);
        } else if !key.ctrl() {
            state.set_anchor(Some(id.clone()));
            if self.selection_follows_focus && !self.multi_select {
                changed |= state.select_only(&id);
            }
        }

        #[cfg(feature = "tracing")]
        log_move(from, members[to].cell);

        let mut transition = Transition::handled(changed);
        if from != members[to].cell {
            transition.push(Effect::FocusMember(id));
        }
        transition
    }

    fn select_all(&self, state: &mut WidgetState, members: &[Member], layout: &GridLayout) -> bool {
        let all = layout
            .rows
            .iter()
            .flatten()
            .filter(|&&(_, index)| members[index].is_enabled())
            .map(|&(_, index)| members[index].id.clone())
            .collect();
        state.replace_selection(all)
    }
}

impl Navigator for GridConfig {
    fn init(&self, state: &mut WidgetState, members: &[Member], preselected: Option<&MemberId>) {
        let layout = GridLayout::new(members);
        let chosen = preselected
            .and_then(|id| position_of(members, id))
            .filter(|&i| members[i].is_enabled() && members[i].cell.is_some())
            .or_else(|| layout.grid_edge(members, Travel::Backward));
        match chosen {
            Some(index) => {
                state.set_active(members, index);
            }
            None => {
                state.clear_active();
            }
        }
    }

    /// Only members with a cell are eligible. A removed or disabled active
    /// cell hands over to the nearest enabled cell of its last position.
    fn reconcile(&self, state: &mut WidgetState, members: &[Member]) -> bool {
        let before = state.clone();
        state.prune_selection(members);
        let layout = GridLayout::new(members);
        let kept = state
            .active()
            .and_then(|id| position_of(members, id))
            .filter(|&i| members[i].is_enabled() && members[i].cell.is_some());
        let resolved = kept
            .or_else(|| {
                state
                    .active_cell()
                    .and_then(|cell| layout.nearest_cell(members, cell))
            })
            .or_else(|| layout.grid_edge(members, Travel::Backward));
        match resolved {
            Some(index) => {
                state.set_active(members, index);
            }
            None => {
                state.clear_active();
            }
        }
        *state != before
    }

    fn handle_key(&self, state: &mut WidgetState, key: &KeyEvent, cx: &mut NavContext<'_>) -> Transition {
        if !key.is_actionable() || key.alt() || key.super_key() {
            return Transition::ignored();
        }
        let members = cx.members;
        let layout = GridLayout::new(members);
        let page = cx.page_size(self.page_size);

        let mv = match key.code {
            KeyCode::Up => Some(Move::Vertical(Travel::Backward, 1)),
            KeyCode::Down => Some(Move::Vertical(Travel::Forward, 1)),
            KeyCode::Left => Some(Move::Horizontal(Travel::Backward)),
            KeyCode::Right => Some(Move::Horizontal(Travel::Forward)),
            KeyCode::PageUp => Some(Move::Vertical(Travel::Backward, page)),
            KeyCode::PageDown => Some(Move::Vertical(Travel::Forward, page)),
            KeyCode::Home if key.ctrl() => Some(Move::GridEdge(Travel::Backward)),
            KeyCode::End if key.ctrl() => Some(Move::GridEdge(Travel::Forward)),
            KeyCode::Home => Some(Move::RowEdge(Travel::Backward)),
            KeyCode::End => Some(Move::RowEdge(Travel::Forward)),
            _ => None,
        };
        if let Some(mv) = mv {
            if layout.grid_edge(members, Travel::Backward).is_none() {
                return Transition::ignored();
            }
            return self.handle_move(state, key, mv, members, &layout);
        }

        match key.code {
            KeyCode::Char(' ') if !key.ctrl() => {
                if key.shift() && self.multi_select {
                    Transition::handled(self.extend_to_active(state, members, &layout))
                } else {
                    Transition::handled(self.toggle_active(state, members))
                }
            }
            KeyCode::Char('a' | 'A') if key.ctrl() && self.multi_select => {
                Transition::handled(self.select_all(state, members, &layout))
            }
            KeyCode::Enter if !key.ctrl() => match state.active() {
                Some(id) => Transition::handled(false).with(Effect::Activated(id.clone())),
                None => Transition::handled(false),
            },
            _ => Transition::ignored(),
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
        let members = cx.members;
        match &event.hit {
            Hit::ColumnHeader(column) => {
                let cycle = self.sort_cycle.unwrap_or(cx.config.sort_cycle);
                match apply_sort(state, self.sortable_columns, *column, cycle) {
                    Some(direction) => Transition::handled(true).with(Effect::SortChanged {
                        column: *column,
                        direction,
                    }),
                    None => Transition::ignored(),
                }
            }
            Hit::Member(id) => {
                let Some(index) = position_of(members, id)
                    .filter(|&i| members[i].is_enabled() && members[i].cell.is_some())
                else {
                    return Transition::ignored();
                };
                let layout = GridLayout::new(members);
                let mut changed = state.set_active(members, index);
                if event.modifiers.contains(rove_core::Modifiers::SHIFT) && self.multi_select {
                    if state.anchor().is_none() {
                        state.set_anchor(Some(id.clone()));
                    }
                    changed |= self.extend_to_active(state, members, &layout);
                } else {
                    changed |= self.toggle_active(state, members);
                }
                #[cfg(feature = "tracing")]
                log_move(None, members[index].cell);
                Transition::handled(changed).with(Effect::Activated(id.clone()))
            }
            _ => Transition::ignored(),
        }
    }
}

#[cfg(feature = "tracing")]
fn log_move(from: Option<Cell>, to: Option<Cell>) {
    let from = from.map(|c| (c.row, c.col));
    let to = to.map(|c| (c.row, c.col));
    tracing::debug!(message = "nav.grid", ?from, ?to);
}
