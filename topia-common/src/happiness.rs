use crate::cell::Cell;
use crate::grid::{Grid, Position};

/// Fraction of the occupied neighbours of `pos` that share its type.
///
/// Vacant neighbours are ignored entirely. An agent with no occupied
/// neighbours scores 1.0. Only meaningful for occupied cells; callers must
/// evaluate against the board as it stood at the start of the cycle.
pub fn happiness(grid: &Grid, pos: Position) -> f32 {
    let own = grid[pos];
    let mut total = 0u32;
    let mut same = 0u32;

    grid.for_each_neighbor(pos, |neighbor| {
        if neighbor.is_occupied() {
            total += 1;
            if neighbor == own {
                same += 1;
            }
        }
    });

    if total == 0 {
        return 1.0;
    }
    same as f32 / total as f32
}

/// Mean happiness over all occupied cells, or 0.0 when nobody lives here.
pub fn mean_happiness(grid: &Grid) -> f32 {
    let mut sum = 0.0f32;
    let mut people = 0u32;
    for (pos, cell) in grid.iter() {
        if cell.is_occupied() {
            people += 1;
            sum += happiness(grid, pos);
        }
    }
    if people == 0 {
        0.0
    } else {
        sum / people as f32
    }
}

/// True if the agent at `pos` wants to move.
#[inline]
pub fn is_unhappy(grid: &Grid, pos: Position, threshold: f32) -> bool {
    grid[pos] != Cell::Vacant && happiness(grid, pos) < threshold
}
