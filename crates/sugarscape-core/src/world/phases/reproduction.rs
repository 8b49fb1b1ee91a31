use super::super::World;
use crate::agent::Agent;
use crate::config::SimConfig;
use crate::grid::Cell;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Apply the single-gene point mutation to an inherited sight radius.
///
/// One draw out of `mutation_draws` equally likely outcomes: draw 0
/// decrements, draw 1 increments, everything else inherits unchanged. With
/// the floor enforced both directions clamp to `[min_sight, max_sight]`;
/// with it disabled the decrement saturates only at zero and the increment
/// is uncapped.
fn mutated_sight<R: Rng + ?Sized>(sight: u32, config: &SimConfig, rng: &mut R) -> u32 {
    let draw = rng.random_range(0..config.mutation_draws);
    if config.enforce_sight_floor {
        match draw {
            0 if sight > config.min_sight => sight - 1,
            1 if sight < config.max_sight => sight + 1,
            _ => sight,
        }
    } else {
        match draw {
            0 => sight.saturating_sub(1),
            1 => sight + 1,
            _ => sight,
        }
    }
}

impl World {
    /// Let sufficiently energetic survivors place one child each in a free
    /// orthogonal neighbor cell.
    ///
    /// Occupancy is rebuilt from living agents (movement and deaths already
    /// applied) and children claim their cells immediately, so two births in
    /// the same pass can never collide. Children join the population at the
    /// end of the pass and first act next turn.
    pub(in crate::world) fn step_reproduction_phase(&mut self) {
        let mut occupied = self.living_positions();
        let mut children = Vec::new();

        for idx in 0..self.agents.len() {
            let (position, energy, sight, policy) = {
                let agent = &self.agents[idx];
                if !agent.alive {
                    continue;
                }
                (agent.position, agent.energy, agent.sight, agent.policy)
            };
            if energy <= self.config.reproduction_threshold {
                continue;
            }

            let neighbors = self.grid.orthogonal_neighbors(position);
            let free: Vec<Cell> = neighbors
                .iter()
                .copied()
                .filter(|cell| !occupied.contains(cell))
                .collect();
            let Some(&birth_cell) = free.choose(&mut self.rng) else {
                continue;
            };

            // Floor split: the child takes the smaller half, conservation is
            // exact, and both halves stay positive for any threshold >= 2.
            let child_energy = energy / 2;
            self.agents[idx].energy = energy - child_energy;

            let child_sight = mutated_sight(sight, &self.config, &mut self.rng);
            let id = self.next_agent_id;
            self.next_agent_id += 1;
            children.push(Agent::new(id, birth_cell, child_energy, child_sight, policy));
            occupied.insert(birth_cell);
            self.births_last_turn += 1;
            self.total_births += 1;
        }

        self.agents.extend(children);
    }
}
