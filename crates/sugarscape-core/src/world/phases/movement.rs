use super::super::World;
use crate::policy;
use rand::seq::SliceRandom;

impl World {
    /// Move every living agent once, harvesting on arrival.
    ///
    /// Agents are processed strictly one at a time in a freshly shuffled
    /// order, with the occupancy set updated immediately after each move.
    /// That sequential pass is the simultaneity surrogate: later agents see
    /// earlier agents' results, and the per-turn reshuffle keeps any one
    /// agent from systematically winning contested cells. Replacing it with a
    /// compute-all-then-apply batch would change the collision semantics.
    pub(in crate::world) fn step_movement_phase(&mut self) {
        self.agents.shuffle(&mut self.rng);
        let mut occupied = self.living_positions();

        for idx in 0..self.agents.len() {
            let (position, sight, policy) = {
                let agent = &self.agents[idx];
                if !agent.alive {
                    continue;
                }
                (agent.position, agent.sight, agent.policy)
            };

            let Some(destination) = policy::select_destination(
                policy,
                position,
                sight,
                self.config.empowerment_weight,
                &self.grid,
                &occupied,
                &mut self.rng,
            ) else {
                continue;
            };

            occupied.remove(&position);
            occupied.insert(destination);

            // Standing still is still a harvest: the chosen cell may be the
            // agent's own, and harvesting always fully depletes it.
            let gained = self.grid.harvest(destination);
            let agent = &mut self.agents[idx];
            agent.position = destination;
            agent.energy += i64::from(gained);
            self.harvested_last_turn += u64::from(gained);
        }
    }
}
