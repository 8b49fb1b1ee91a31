use crate::agent::Agent;
use crate::config::{SightInit, SimConfig, SimConfigError};
use crate::grid::{Cell, SugarGrid};
use crate::metrics::{collect_grid_snapshot, collect_turn_metrics, PopulationStats, RunSummary};
use crate::policy::MovementPolicy;
use crate::rng::create_rng;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha12Rng;
use std::collections::HashSet;
use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    TooManyTurns { max: usize, actual: usize },
    TooManySnapshots { max: usize, actual: usize },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::TooManyTurns { max, actual } => {
                write!(f, "turns ({actual}) exceed supported maximum ({max})")
            }
            RunError::TooManySnapshots { max, actual } => {
                write!(
                    f,
                    "snapshot count ({actual}) exceeds supported maximum ({max})"
                )
            }
        }
    }
}

impl Error for RunError {}

/// The simulation: grid, population, and the shared randomness source.
///
/// All randomness (placement, shuffle order, tie-breaks, mutation rolls) is
/// drawn from one seeded generator, so a fixed seed reproduces a run exactly.
pub struct World {
    pub agents: Vec<Agent>,
    grid: SugarGrid,
    config: SimConfig,
    rng: ChaCha12Rng,
    turn_index: usize,
    next_agent_id: u64,
    births_last_turn: usize,
    deaths_last_turn: usize,
    harvested_last_turn: u64,
    total_births: usize,
    total_deaths: usize,
}

impl World {
    pub const MAX_RUN_TURNS: usize = SimConfig::MAX_TURNS;
    pub const MAX_RUN_SNAPSHOTS: usize = 1_000;

    /// Build a world from a validated configuration, placing `num_agents`
    /// agents on distinct random cells.
    pub fn new(config: SimConfig) -> Result<Self, SimConfigError> {
        config.validate()?;
        let mut rng = create_rng(config.seed);
        let grid = SugarGrid::new(config.grid_size);

        // Shuffling the full cell list guarantees distinct positions without
        // rejection sampling; validate() already bounded num_agents by the
        // cell count.
        let mut cells: Vec<Cell> = (0..config.grid_size)
            .flat_map(|x| (0..config.grid_size).map(move |y| (x, y)))
            .collect();
        cells.shuffle(&mut rng);

        let mut agents = Vec::with_capacity(config.num_agents);
        for (id, &cell) in cells.iter().take(config.num_agents).enumerate() {
            let sight = match config.initial_sight {
                SightInit::Fixed(sight) => sight,
                SightInit::Uniform { min, max } => rng.random_range(min..=max),
            };
            let policy = if rng.random::<f64>() < config.empowered_fraction {
                MovementPolicy::Empowered
            } else {
                MovementPolicy::Greedy
            };
            agents.push(Agent::new(
                id as u64,
                cell,
                config.initial_energy,
                sight,
                policy,
            ));
        }

        let next_agent_id = agents.len() as u64;
        Ok(Self {
            agents,
            grid,
            config,
            rng,
            turn_index: 0,
            next_agent_id,
            births_last_turn: 0,
            deaths_last_turn: 0,
            harvested_last_turn: 0,
            total_births: 0,
            total_deaths: 0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &SugarGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut SugarGrid {
        &mut self.grid
    }

    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    pub fn alive_count(&self) -> usize {
        self.agents.iter().filter(|a| a.alive).count()
    }

    /// Sum of energy over living agents.
    pub fn total_energy(&self) -> i64 {
        self.agents
            .iter()
            .filter(|a| a.alive)
            .map(|a| a.energy)
            .sum()
    }

    pub fn births_last_turn(&self) -> usize {
        self.births_last_turn
    }

    pub fn deaths_last_turn(&self) -> usize {
        self.deaths_last_turn
    }

    /// Sugar removed from the grid during the last turn's movement phase.
    pub fn harvested_last_turn(&self) -> u64 {
        self.harvested_last_turn
    }

    pub fn population_stats(&self) -> PopulationStats {
        let mut stats = PopulationStats {
            total_births: self.total_births,
            total_deaths: self.total_deaths,
            ..PopulationStats::default()
        };
        for agent in self.agents.iter().filter(|a| a.alive) {
            stats.alive_count += 1;
            match agent.policy {
                MovementPolicy::Empowered => stats.empowered_alive += 1,
                MovementPolicy::Greedy => stats.greedy_alive += 1,
            }
        }
        stats
    }

    /// Cells currently held by living agents.
    pub(in crate::world) fn living_positions(&self) -> HashSet<Cell> {
        self.agents
            .iter()
            .filter(|a| a.alive)
            .map(|a| a.position)
            .collect()
    }

    /// Advance one turn: regrowth, movement, metabolism, reproduction.
    pub fn step(&mut self) {
        self.turn_index += 1;
        self.births_last_turn = 0;
        self.deaths_last_turn = 0;
        self.harvested_last_turn = 0;

        // Regrowth happens first so this turn's movement sees it.
        self.grid.grow();
        self.step_movement_phase();
        self.step_metabolism_phase();
        self.step_reproduction_phase();
    }

    /// Run for a fixed horizon, collecting per-turn metrics.
    pub fn run(&mut self, turns: usize) -> Result<RunSummary, RunError> {
        self.run_with_snapshots(turns, &[])
    }

    /// Run for a fixed horizon, additionally capturing full grid/population
    /// snapshots at the listed turns.
    pub fn run_with_snapshots(
        &mut self,
        turns: usize,
        snapshot_turns: &[usize],
    ) -> Result<RunSummary, RunError> {
        if turns > Self::MAX_RUN_TURNS {
            return Err(RunError::TooManyTurns {
                max: Self::MAX_RUN_TURNS,
                actual: turns,
            });
        }
        if snapshot_turns.len() > Self::MAX_RUN_SNAPSHOTS {
            return Err(RunError::TooManySnapshots {
                max: Self::MAX_RUN_SNAPSHOTS,
                actual: snapshot_turns.len(),
            });
        }

        let snapshot_set: HashSet<usize> = snapshot_turns.iter().copied().collect();
        let births_before = self.total_births;
        let deaths_before = self.total_deaths;
        let mut samples = Vec::with_capacity(turns);
        let mut snapshots = Vec::with_capacity(snapshot_set.len());

        for turn in 1..=turns {
            self.step();
            samples.push(collect_turn_metrics(
                turn,
                &self.agents,
                &self.grid,
                self.births_last_turn,
                self.deaths_last_turn,
                self.harvested_last_turn,
            ));
            if snapshot_set.contains(&turn) {
                snapshots.push(collect_grid_snapshot(turn, &self.agents, &self.grid));
            }
        }

        Ok(RunSummary {
            schema_version: 1,
            turns,
            final_alive_count: self.alive_count(),
            samples,
            total_births: self.total_births - births_before,
            total_deaths: self.total_deaths - deaths_before,
            snapshots,
        })
    }
}

mod phases;
#[cfg(test)]
mod tests;
