use crate::grid::Cell;
use std::collections::HashSet;

/// Cells an agent at `origin` can see: its own cell plus up to `sight` steps
/// along each cardinal ray, wrapped onto the torus.
///
/// Rays overlap once `sight` reaches half the grid; duplicates are removed so
/// no cell is scored twice. Result is sorted, at most `4 * sight + 1` cells.
pub fn visible_cells(origin: Cell, sight: u32, size: usize) -> Vec<Cell> {
    let mut cells = Vec::with_capacity(4 * sight as usize + 1);
    cells.push(origin);
    let (x, y) = (origin.0 as isize, origin.1 as isize);
    let n = size as isize;
    let wrap = |coord: isize| coord.rem_euclid(n) as usize;
    for step in 1..=sight as isize {
        cells.push((wrap(x + step), origin.1));
        cells.push((wrap(x - step), origin.1));
        cells.push((origin.0, wrap(y + step)));
        cells.push((origin.0, wrap(y - step)));
    }
    cells.sort_unstable();
    cells.dedup();
    cells
}

/// Mobility score for a candidate cell: how many cells would be open to move
/// to from there next turn.
///
/// Counts members of `visible_cells(cell, ..)` that are unoccupied, plus the
/// cell itself. Single-step, single-agent approximation: other agents'
/// simultaneous moves are deliberately ignored.
pub fn empowerment(cell: Cell, sight: u32, size: usize, occupied: &HashSet<Cell>) -> usize {
    visible_cells(cell, sight, size)
        .into_iter()
        .filter(|&seen| seen == cell || !occupied.contains(&seen))
        .count()
}
