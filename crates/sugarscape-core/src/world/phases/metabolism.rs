use super::super::World;

impl World {
    /// Charge every living agent the per-turn metabolic cost; agents at or
    /// below zero energy die permanently and skip this turn's reproduction.
    pub(in crate::world) fn step_metabolism_phase(&mut self) {
        let rate = self.config.metabolic_rate;
        for agent in &mut self.agents {
            if !agent.alive {
                continue;
            }
            agent.energy -= rate;
            if agent.energy <= 0 {
                agent.alive = false;
                self.deaths_last_turn += 1;
                self.total_deaths += 1;
            }
        }
    }
}
