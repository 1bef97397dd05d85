//! Move resolution for one cycle.
//!
//! Unhappy agents are visited in scan order and each is sent to the next
//! vacancy found by a cursor that only ever moves forward. Vacancies are
//! looked up on the board as it stood when the cycle began, so a cell
//! vacated during the cycle is not offered to anyone until the next one,
//! and no vacancy is handed out twice.

use log::trace;

use crate::cell::Cell;
use crate::grid::{Grid, Position};
use crate::happiness::is_unhappy;

/// Scan position for the vacancy search. Lives for one cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanCursor {
    row: usize,
    col: usize,
}

impl ScanCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the top-left corner; done at the start of every cycle.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Next position the search will examine.
    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    /// True once the whole board of width `dim` has been scanned.
    pub fn is_exhausted(&self, dim: usize) -> bool {
        self.row >= dim
    }

    /// Finds the first vacancy at or after the cursor and leaves the cursor
    /// one cell past it. Returns `None` when the rest of the board is full.
    pub fn next_vacancy(&mut self, grid: &Grid) -> Option<Position> {
        let dim = grid.dim();
        while self.row < dim {
            while self.col < dim {
                let pos = Position::new(self.row, self.col);
                self.col += 1;
                if grid[pos] == Cell::Vacant {
                    return Some(pos);
                }
            }
            self.col = 0;
            self.row += 1;
        }
        None
    }
}

/// Moves the agent at `from` (as recorded in `previous`) into the next
/// vacancy of `previous`, applying the change to `next`.
///
/// Returns whether the agent moved.
pub fn relocate(previous: &Grid, next: &mut Grid, from: Position, cursor: &mut ScanCursor) -> bool {
    match cursor.next_vacancy(previous) {
        Some(to) => {
            trace!("{:?} moves ({},{}) -> ({},{})", previous[from], from.row, from.col, to.row, to.col);
            next[to] = previous[from];
            next[from] = Cell::Vacant;
            true
        }
        None => false,
    }
}

/// Relocates every agent of `previous` whose happiness is below
/// `threshold`, writing the result into `next`, which must start out as an
/// exact copy of `previous`.
///
/// Happiness is always judged on `previous`, so the order agents are
/// processed in cannot change who wants to move. Returns the number of
/// agents that moved.
pub fn resolve(previous: &Grid, next: &mut Grid, cursor: &mut ScanCursor, threshold: f32) -> usize {
    debug_assert_eq!(previous, next, "next board must start as a copy");

    let dim = previous.dim();
    let mut moved = 0;
    for pos in previous.positions() {
        if cursor.is_exhausted(dim) {
            // No vacancy left behind the cursor; nobody else can move.
            break;
        }
        if is_unhappy(previous, pos, threshold) && relocate(previous, next, pos, cursor) {
            moved += 1;
        }
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(text: &str) -> Grid {
        text.parse().unwrap()
    }

    #[test]
    fn cursor_walks_forward_and_wraps_rows() {
        let g = grid(".e\ne.");
        let mut cursor = ScanCursor::new();
        assert_eq!(cursor.next_vacancy(&g), Some(Position::new(0, 0)));
        assert_eq!(cursor.position(), Position::new(0, 1));
        assert_eq!(cursor.next_vacancy(&g), Some(Position::new(1, 1)));
        assert_eq!(cursor.next_vacancy(&g), None);
        assert!(cursor.is_exhausted(2));

        cursor.reset();
        assert_eq!(cursor.position(), Position::new(0, 0));
    }

    #[test]
    fn happy_board_is_left_alone() {
        let prev = grid("ee.\n...\n.nn");
        let mut next = prev.clone();
        let mut cursor = ScanCursor::new();
        assert_eq!(resolve(&prev, &mut next, &mut cursor, 0.5), 0);
        assert_eq!(prev, next);
    }

    #[test]
    fn unhappy_agent_takes_first_vacancy() {
        // The n only sees e neighbours; every e is at least half content.
        let prev = grid("eee\nen.\n...");
        let mut next = prev.clone();
        let mut cursor = ScanCursor::new();
        assert_eq!(resolve(&prev, &mut next, &mut cursor, 0.5), 1);
        assert_eq!(next, grid("eee\ne.n\n..."));
        assert_eq!(cursor.position(), Position::new(1, 3));
    }

    #[test]
    fn moves_can_go_backwards_in_scan_order() {
        // The unhappy agent sits after the vacancy it lands in.
        let prev = grid(".ee\neee\neen");
        let mut next = prev.clone();
        let mut cursor = ScanCursor::new();
        assert_eq!(resolve(&prev, &mut next, &mut cursor, 0.5), 1);
        assert_eq!(next, grid("nee\neee\nee."));
    }

    #[test]
    fn vacated_cells_are_not_reused_in_same_cycle() {
        // Both n are unhappy. The first takes the only vacancy and frees
        // (1,0), which is ahead of the cursor but was occupied when the
        // cycle began, so the second n stays put.
        let prev = grid(".ee\nnee\neen");
        let mut next = prev.clone();
        let mut cursor = ScanCursor::new();
        assert_eq!(resolve(&prev, &mut next, &mut cursor, 0.5), 1);
        assert_eq!(next, grid("nee\n.ee\neen"));
        assert_eq!(prev.population(), next.population());
    }

    #[test]
    fn relocate_reports_failure_when_full() {
        let prev = grid("en\nne");
        let mut next = prev.clone();
        let mut cursor = ScanCursor::new();
        assert!(!relocate(&prev, &mut next, Position::new(0, 0), &mut cursor));
        assert_eq!(prev, next);
    }
}
