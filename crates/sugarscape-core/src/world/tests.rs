use super::*;
use std::collections::HashMap;

fn make_world(config: SimConfig) -> World {
    World::new(config).expect("test config should be valid")
}

fn default_world() -> World {
    make_world(SimConfig::default())
}

fn mixed_config() -> SimConfig {
    SimConfig {
        initial_sight: SightInit::Uniform { min: 2, max: 5 },
        empowered_fraction: 0.5,
        ..SimConfig::default()
    }
}

#[test]
fn new_places_agents_on_distinct_cells_in_bounds() {
    let world = default_world();
    assert_eq!(world.agents.len(), 20);
    let positions = world.living_positions();
    assert_eq!(positions.len(), 20, "no two agents share a cell");
    for agent in &world.agents {
        assert!(agent.position.0 < 20 && agent.position.1 < 20);
        assert_eq!(agent.energy, 10);
        assert_eq!(agent.sight, 3);
        assert!(agent.alive);
    }
}

#[test]
fn new_rejects_overfull_grid() {
    let config = SimConfig {
        grid_size: 3,
        num_agents: 10,
        ..SimConfig::default()
    };
    assert!(matches!(
        World::new(config),
        Err(SimConfigError::TooManyAgents {
            capacity: 9,
            actual: 10,
        })
    ));
}

#[test]
fn empowered_fraction_one_makes_every_agent_empowered() {
    let config = SimConfig {
        empowered_fraction: 1.0,
        ..SimConfig::default()
    };
    let world = make_world(config);
    assert!(world
        .agents
        .iter()
        .all(|a| a.policy == MovementPolicy::Empowered));
}

#[test]
fn identical_seeds_reproduce_identical_energy_sequences() {
    let mut a = make_world(mixed_config());
    let mut b = make_world(mixed_config());
    let summary_a = a.run(100).expect("run fits the bounds");
    let summary_b = b.run(100).expect("run fits the bounds");
    let energies_a: Vec<i64> = summary_a.samples.iter().map(|s| s.total_energy).collect();
    let energies_b: Vec<i64> = summary_b.samples.iter().map(|s| s.total_energy).collect();
    assert_eq!(energies_a, energies_b);
    assert_eq!(summary_a.final_alive_count, summary_b.final_alive_count);
}

#[test]
fn different_seeds_diverge() {
    let mut a = make_world(SimConfig {
        seed: Some(1),
        ..SimConfig::default()
    });
    let mut b = make_world(SimConfig {
        seed: Some(2),
        ..SimConfig::default()
    });
    let energies_a: Vec<i64> = a
        .run(50)
        .expect("run fits the bounds")
        .samples
        .iter()
        .map(|s| s.total_energy)
        .collect();
    let energies_b: Vec<i64> = b
        .run(50)
        .expect("run fits the bounds")
        .samples
        .iter()
        .map(|s| s.total_energy)
        .collect();
    assert_ne!(energies_a, energies_b);
}

#[test]
fn no_two_living_agents_share_a_cell_after_any_turn() {
    let mut world = make_world(mixed_config());
    for _ in 0..100 {
        world.step();
        let positions = world.living_positions();
        assert_eq!(positions.len(), world.alive_count());
    }
}

#[test]
fn movement_leaves_every_destination_cell_empty() {
    // A prohibitive threshold keeps newborns (who sit on unharvested cells)
    // out of the picture.
    let config = SimConfig {
        reproduction_threshold: 1_000_000,
        ..SimConfig::default()
    };
    let mut world = make_world(config);
    world.step();
    for agent in world.agents.iter().filter(|a| a.alive) {
        assert_eq!(world.grid().level_at(agent.position), 0);
    }
}

#[test]
fn turn_one_energy_accounting_is_exact() {
    let mut world = default_world();
    world.step();
    // 20 agents start with 10 each; no agent can die on turn one, and
    // reproduction conserves energy, so the only flows are harvest in and
    // metabolism out.
    let expected = 200 + world.harvested_last_turn() as i64 - 20;
    assert_eq!(world.total_energy(), expected);
    assert_eq!(world.deaths_last_turn(), 0);
}

#[test]
fn starving_agent_dies_permanently_and_the_world_keeps_running() {
    // A 1x1 grid has capacity 0 at its only cell, so nothing can be
    // harvested and the lone agent starves on the first turn.
    let config = SimConfig {
        grid_size: 1,
        num_agents: 1,
        initial_energy: 1,
        ..SimConfig::default()
    };
    let mut world = make_world(config);
    world.step();
    assert!(!world.agents[0].alive);
    assert_eq!(world.alive_count(), 0);
    assert_eq!(world.deaths_last_turn(), 1);

    let position = world.agents[0].position;
    let summary = world.run(10).expect("run fits the bounds");
    assert_eq!(world.agents[0].position, position, "the dead do not move");
    assert_eq!(summary.final_alive_count, 0);
    assert!(summary.samples.iter().all(|s| s.total_energy == 0));
    assert!(summary.samples.iter().all(|s| s.alive_count == 0));
}

#[test]
fn reproduction_splits_energy_with_floor_division() {
    let config = SimConfig {
        grid_size: 5,
        num_agents: 1,
        ..SimConfig::default()
    };
    let mut world = make_world(config);
    world.agents[0].position = (2, 2);
    world.agents[0].energy = 25;

    world.step_reproduction_phase();

    assert_eq!(world.agents.len(), 2);
    let parent = &world.agents[0];
    let child = &world.agents[1];
    assert_eq!(child.energy, 12);
    assert_eq!(parent.energy, 13);
    assert_eq!(child.energy + parent.energy, 25);
    assert!(child.alive);
    assert_eq!(child.policy, parent.policy);
    assert_eq!(world.births_last_turn(), 1);
    assert!(world
        .grid()
        .orthogonal_neighbors((2, 2))
        .contains(&child.position));
}

#[test]
fn child_lands_on_the_only_free_neighbor() {
    let config = SimConfig {
        grid_size: 5,
        num_agents: 4,
        ..SimConfig::default()
    };
    let mut world = make_world(config);
    world.agents[0].position = (2, 2);
    world.agents[0].energy = 25;
    // Three of the four neighbors are blocked by low-energy bystanders.
    for (agent, cell) in world.agents[1..].iter_mut().zip([(3, 2), (1, 2), (2, 1)]) {
        agent.position = cell;
        agent.energy = 5;
    }

    world.step_reproduction_phase();

    assert_eq!(world.agents.len(), 5);
    assert_eq!(world.agents[4].position, (2, 3));
    assert_eq!(world.births_last_turn(), 1);
}

#[test]
fn no_free_neighbor_means_no_child() {
    let config = SimConfig {
        grid_size: 5,
        num_agents: 5,
        ..SimConfig::default()
    };
    let mut world = make_world(config);
    world.agents[0].position = (2, 2);
    world.agents[0].energy = 25;
    for (agent, cell) in world.agents[1..]
        .iter_mut()
        .zip([(3, 2), (1, 2), (2, 1), (2, 3)])
    {
        agent.position = cell;
        agent.energy = 5;
    }

    world.step_reproduction_phase();

    assert_eq!(world.agents.len(), 5, "no child was produced");
    assert_eq!(world.agents[0].energy, 25, "the parent kept its energy");
    assert_eq!(world.births_last_turn(), 0);
}

#[test]
fn threshold_energy_is_not_enough_to_reproduce() {
    let config = SimConfig {
        grid_size: 5,
        num_agents: 1,
        ..SimConfig::default()
    };
    let mut world = make_world(config);
    world.agents[0].energy = 20;
    world.step_reproduction_phase();
    assert_eq!(world.agents.len(), 1);
}

#[test]
fn a_full_grid_freezes_everyone_in_place() {
    let config = SimConfig {
        grid_size: 3,
        num_agents: 9,
        initial_energy: 100,
        reproduction_threshold: 1_000_000,
        ..SimConfig::default()
    };
    let mut world = make_world(config);
    let before: HashMap<u64, Cell> = world.agents.iter().map(|a| (a.id, a.position)).collect();

    world.step();

    for agent in &world.agents {
        assert_eq!(agent.position, before[&agent.id]);
        assert!(agent.alive);
    }
}

#[test]
fn sight_stays_within_bounds_across_generations() {
    let mut world = make_world(mixed_config());
    let summary = world.run(300).expect("run fits the bounds");
    assert!(summary.total_births > 0, "mutation must have been exercised");
    for agent in world.agents.iter().filter(|a| a.alive) {
        assert!((2..=5).contains(&agent.sight));
    }
}

#[test]
fn empty_population_is_a_valid_configuration() {
    let config = SimConfig {
        num_agents: 0,
        ..SimConfig::default()
    };
    let mut world = make_world(config);
    let summary = world.run(10).expect("run fits the bounds");
    assert_eq!(summary.final_alive_count, 0);
    assert!(summary.samples.iter().all(|s| s.total_energy == 0));
}

#[test]
fn run_rejects_oversized_horizons_and_snapshot_lists() {
    let mut world = default_world();
    assert!(matches!(
        world.run(World::MAX_RUN_TURNS + 1),
        Err(RunError::TooManyTurns { .. })
    ));
    let too_many = vec![1usize; World::MAX_RUN_SNAPSHOTS + 1];
    assert!(matches!(
        world.run_with_snapshots(10, &too_many),
        Err(RunError::TooManySnapshots { .. })
    ));
}

#[test]
fn snapshots_are_captured_at_the_requested_turns() {
    let mut world = default_world();
    let summary = world
        .run_with_snapshots(5, &[1, 3])
        .expect("run fits the bounds");
    assert_eq!(summary.snapshots.len(), 2);
    assert_eq!(summary.snapshots[0].turn, 1);
    assert_eq!(summary.snapshots[1].turn, 3);
    for snapshot in &summary.snapshots {
        assert_eq!(snapshot.sugar.len(), 400);
        let sample = &summary.samples[snapshot.turn - 1];
        assert_eq!(snapshot.agents.len(), sample.alive_count);
    }
}

#[test]
fn grid_levels_never_exceed_capacity_during_a_long_run() {
    let mut world = make_world(mixed_config());
    world.run(200).expect("run fits the bounds");
    let grid = world.grid();
    for x in 0..grid.size() {
        for y in 0..grid.size() {
            assert!(grid.level_at((x, y)) <= grid.capacity_at((x, y)));
        }
    }
}

#[test]
fn policy_partition_covers_the_living_population() {
    let mut world = make_world(mixed_config());
    let summary = world.run(50).expect("run fits the bounds");
    let last = summary.samples.last().expect("samples are per turn");
    assert_eq!(last.empowered_count + last.greedy_count, last.alive_count);

    let stats = world.population_stats();
    assert_eq!(
        stats.empowered_alive + stats.greedy_alive,
        stats.alive_count
    );
}

#[test]
fn run_summary_counts_match_per_turn_samples() {
    let mut world = make_world(mixed_config());
    let summary = world.run(200).expect("run fits the bounds");
    let births: usize = summary.samples.iter().map(|s| s.births).sum();
    let deaths: usize = summary.samples.iter().map(|s| s.deaths).sum();
    assert_eq!(summary.total_births, births);
    assert_eq!(summary.total_deaths, deaths);
    assert_eq!(summary.samples.len(), 200);
}
