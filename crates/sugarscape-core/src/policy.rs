use crate::grid::{Cell, SugarGrid};
use crate::vision::{empowerment, visible_cells};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Movement strategy gene.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MovementPolicy {
    /// Maximize the sugar level of the destination.
    #[default]
    Greedy,
    /// Maximize sugar plus a weighted count of moves the destination would
    /// leave open next turn.
    Empowered,
}

/// Pick a destination for one agent's move.
///
/// Candidates are the visible cells that are either the agent's own cell or
/// unoccupied. Ties at the maximum score are broken uniformly at random;
/// first-match selection biases the emergent dynamics and is not an
/// acceptable substitute. Returns `None` only when no candidate exists.
pub fn select_destination<R: Rng + ?Sized>(
    policy: MovementPolicy,
    position: Cell,
    sight: u32,
    empowerment_weight: f64,
    grid: &SugarGrid,
    occupied: &HashSet<Cell>,
    rng: &mut R,
) -> Option<Cell> {
    let candidates: Vec<Cell> = visible_cells(position, sight, grid.size())
        .into_iter()
        .filter(|&cell| cell == position || !occupied.contains(&cell))
        .collect();
    if candidates.is_empty() {
        return None;
    }

    let best = match policy {
        MovementPolicy::Greedy => {
            let top = candidates
                .iter()
                .map(|&cell| grid.level_at(cell))
                .max()
                .unwrap_or(0);
            candidates
                .into_iter()
                .filter(|&cell| grid.level_at(cell) == top)
                .collect::<Vec<Cell>>()
        }
        MovementPolicy::Empowered => {
            // Mobility is judged as if the agent had already left its old
            // cell; the candidate itself is not marked occupied while being
            // evaluated.
            let mut vacated = occupied.clone();
            vacated.remove(&position);
            let mut best_score = f64::NEG_INFINITY;
            let mut best = Vec::new();
            for &cell in &candidates {
                let mobility = empowerment(cell, sight, grid.size(), &vacated);
                let score =
                    f64::from(grid.level_at(cell)) + empowerment_weight * mobility as f64;
                // Scores are integers plus weight-scaled integers, so exact
                // equality is the tie condition.
                if score > best_score {
                    best_score = score;
                    best.clear();
                    best.push(cell);
                } else if score == best_score {
                    best.push(cell);
                }
            }
            best
        }
    };
    best.choose(rng).copied()
}
