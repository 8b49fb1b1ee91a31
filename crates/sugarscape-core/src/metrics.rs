use crate::agent::Agent;
use crate::grid::SugarGrid;
use crate::policy::MovementPolicy;
use serde::{Deserialize, Serialize};

/// Per-turn aggregate readings over the living population.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TurnMetrics {
    pub turn: usize,
    pub alive_count: usize,
    /// Sum of energy over living agents.
    pub total_energy: i64,
    /// Sugar removed from the grid by this turn's movement phase.
    pub sugar_harvested: u64,
    pub births: usize,
    pub deaths: usize,
    /// Sugar remaining on the grid after the turn.
    pub grid_sugar_total: u64,
    pub empowered_count: usize,
    pub greedy_count: usize,
    pub empowered_mean_energy: f64,
    pub greedy_mean_energy: f64,
    /// Living agents per sight value; index `s` counts agents with sight `s`.
    pub sight_counts: Vec<usize>,
}

/// Cumulative population counters, partitioned by movement policy.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct PopulationStats {
    pub alive_count: usize,
    pub empowered_alive: usize,
    pub greedy_alive: usize,
    pub total_births: usize,
    pub total_deaths: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub id: u64,
    pub x: usize,
    pub y: usize,
    pub energy: i64,
    pub sight: u32,
    pub policy: MovementPolicy,
}

/// Full grid state plus the living population at one checkpoint turn.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub turn: usize,
    pub size: usize,
    /// Row-major sugar levels, `index = x * size + y`.
    pub sugar: Vec<u32>,
    pub agents: Vec<AgentSnapshot>,
}

fn default_schema_version() -> u32 {
    1
}

/// Everything a run produces, ready for serialization by external reporting.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub turns: usize,
    pub final_alive_count: usize,
    pub samples: Vec<TurnMetrics>,
    pub total_births: usize,
    pub total_deaths: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub snapshots: Vec<GridSnapshot>,
}

pub fn collect_turn_metrics(
    turn: usize,
    agents: &[Agent],
    grid: &SugarGrid,
    births: usize,
    deaths: usize,
    sugar_harvested: u64,
) -> TurnMetrics {
    let mut alive_count = 0;
    let mut total_energy = 0i64;
    let mut empowered_count = 0;
    let mut empowered_energy = 0i64;
    let mut greedy_count = 0;
    let mut greedy_energy = 0i64;
    let mut sight_counts: Vec<usize> = Vec::new();

    for agent in agents.iter().filter(|a| a.alive) {
        alive_count += 1;
        total_energy += agent.energy;
        match agent.policy {
            MovementPolicy::Empowered => {
                empowered_count += 1;
                empowered_energy += agent.energy;
            }
            MovementPolicy::Greedy => {
                greedy_count += 1;
                greedy_energy += agent.energy;
            }
        }
        let sight = agent.sight as usize;
        if sight >= sight_counts.len() {
            sight_counts.resize(sight + 1, 0);
        }
        sight_counts[sight] += 1;
    }

    let mean = |sum: i64, count: usize| {
        if count > 0 {
            sum as f64 / count as f64
        } else {
            0.0
        }
    };

    TurnMetrics {
        turn,
        alive_count,
        total_energy,
        sugar_harvested,
        births,
        deaths,
        grid_sugar_total: grid.total_level(),
        empowered_count,
        greedy_count,
        empowered_mean_energy: mean(empowered_energy, empowered_count),
        greedy_mean_energy: mean(greedy_energy, greedy_count),
        sight_counts,
    }
}

pub fn collect_grid_snapshot(turn: usize, agents: &[Agent], grid: &SugarGrid) -> GridSnapshot {
    let agents = agents
        .iter()
        .filter(|a| a.alive)
        .map(|a| AgentSnapshot {
            id: a.id,
            x: a.position.0,
            y: a.position.1,
            energy: a.energy,
            sight: a.sight,
            policy: a.policy,
        })
        .collect();
    GridSnapshot {
        turn,
        size: grid.size(),
        sugar: grid.levels().to_vec(),
        agents,
    }
}
