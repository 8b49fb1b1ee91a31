use serde::{Deserialize, Serialize};

/// How initial agents receive their sight radius.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SightInit {
    /// Every agent starts with the same radius.
    Fixed(u32),
    /// Each agent draws a radius uniformly from `min..=max`.
    Uniform { min: u32, max: u32 },
}

impl Default for SightInit {
    fn default() -> Self {
        Self::Fixed(3)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Deterministic seed for reproducible runs. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Side length of the square toroidal grid, in cells.
    pub grid_size: usize,
    /// Number of agents placed at setup. Must fit the grid (`grid_size²`).
    pub num_agents: usize,
    /// Energy every initial agent starts with.
    pub initial_energy: i64,
    /// Sight radius assignment for initial agents.
    pub initial_sight: SightInit,
    /// Lower clamp for the sight gene under mutation (when the floor is enforced).
    pub min_sight: u32,
    /// Upper clamp for the sight gene under mutation (when the floor is enforced).
    pub max_sight: u32,
    /// Clamp mutated sight to `[min_sight, max_sight]`. When disabled, the
    /// decrement saturates only at zero (the agent then sees just its own
    /// cell) and the increment is uncapped.
    pub enforce_sight_floor: bool,
    /// Energy every living agent pays per turn.
    pub metabolic_rate: i64,
    /// Post-metabolism energy a parent must exceed to reproduce.
    pub reproduction_threshold: i64,
    /// Probability that an initial agent carries the empowerment-weighted
    /// movement policy. 0 is the pure-greedy baseline.
    pub empowered_fraction: f64,
    /// Weight of the mobility term in empowerment-weighted scoring.
    pub empowerment_weight: f64,
    /// Number of equally likely sight-mutation outcomes per birth. Draw 0
    /// decrements the child's sight, draw 1 increments it, the rest leave it
    /// unchanged.
    pub mutation_draws: u32,
    /// Default turn horizon used by front-ends.
    pub turns: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: Some(42),
            grid_size: 20,
            num_agents: 20,
            initial_energy: 10,
            initial_sight: SightInit::default(),
            min_sight: 2,
            max_sight: 5,
            enforce_sight_floor: true,
            metabolic_rate: 1,
            reproduction_threshold: 20,
            empowered_fraction: 0.0,
            empowerment_weight: 0.5,
            mutation_draws: 11,
            turns: 500,
        }
    }
}

macro_rules! define_sim_config_error {
    (
        $(
            $variant:ident $( { $($field:ident : $type:ty),* } )? => $fmt:literal $(, $arg:expr)*
        );* $(;)?
    ) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum SimConfigError {
            $(
                $variant $( { $($field : $type),* } )?,
            )*
        }

        impl std::fmt::Display for SimConfigError {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        Self::$variant $( { $($field),* } )? => write!(f, $fmt $(, $arg)*),
                    )*
                }
            }
        }
    };
}

define_sim_config_error! {
    InvalidGridSize => "grid_size must be greater than 0";
    GridSizeTooLarge { max: usize, actual: usize } => "grid_size ({actual}) exceeds supported maximum ({max})";
    TooManyAgents { capacity: usize, actual: usize } => "num_agents ({actual}) exceeds grid capacity ({capacity})";
    InvalidInitialEnergy => "initial_energy must be positive";
    InvalidInitialSight => "initial sight must be at least 1, with min <= max for a uniform range";
    InvalidMinSight => "min_sight must be at least 1";
    InvalidSightBounds => "min_sight must not exceed max_sight";
    InvalidMetabolicRate => "metabolic_rate must be non-negative";
    InvalidReproductionThreshold => "reproduction_threshold must be at least 2";
    InvalidEmpoweredFraction => "empowered_fraction must be finite and within [0,1]";
    InvalidEmpowermentWeight => "empowerment_weight must be finite and non-negative";
    InvalidMutationDraws => "mutation_draws must be at least 2";
    TooManyTurns { max: usize, actual: usize } => "turns ({actual}) exceeds supported maximum ({max})";
}

impl std::error::Error for SimConfigError {}

impl SimConfig {
    pub const MAX_GRID_SIZE: usize = crate::constants::MAX_GRID_SIZE;

    pub const MAX_TURNS: usize = 1_000_000;

    pub fn validate(&self) -> Result<(), SimConfigError> {
        if self.grid_size == 0 {
            return Err(SimConfigError::InvalidGridSize);
        }
        if self.grid_size > Self::MAX_GRID_SIZE {
            return Err(SimConfigError::GridSizeTooLarge {
                max: Self::MAX_GRID_SIZE,
                actual: self.grid_size,
            });
        }
        // grid_size <= MAX_GRID_SIZE, so the product cannot overflow.
        let cell_count = self.grid_size * self.grid_size;
        if self.num_agents > cell_count {
            return Err(SimConfigError::TooManyAgents {
                capacity: cell_count,
                actual: self.num_agents,
            });
        }
        if self.initial_energy <= 0 {
            return Err(SimConfigError::InvalidInitialEnergy);
        }
        match self.initial_sight {
            SightInit::Fixed(sight) if sight == 0 => {
                return Err(SimConfigError::InvalidInitialSight);
            }
            SightInit::Uniform { min, max } if min == 0 || min > max => {
                return Err(SimConfigError::InvalidInitialSight);
            }
            _ => {}
        }
        if self.min_sight == 0 {
            return Err(SimConfigError::InvalidMinSight);
        }
        if self.min_sight > self.max_sight {
            return Err(SimConfigError::InvalidSightBounds);
        }
        if self.metabolic_rate < 0 {
            return Err(SimConfigError::InvalidMetabolicRate);
        }
        if self.reproduction_threshold < 2 {
            return Err(SimConfigError::InvalidReproductionThreshold);
        }
        if !(self.empowered_fraction.is_finite() && (0.0..=1.0).contains(&self.empowered_fraction))
        {
            return Err(SimConfigError::InvalidEmpoweredFraction);
        }
        if !(self.empowerment_weight.is_finite() && self.empowerment_weight >= 0.0) {
            return Err(SimConfigError::InvalidEmpowermentWeight);
        }
        if self.mutation_draws < 2 {
            return Err(SimConfigError::InvalidMutationDraws);
        }
        if self.turns > Self::MAX_TURNS {
            return Err(SimConfigError::TooManyTurns {
                max: Self::MAX_TURNS,
                actual: self.turns,
            });
        }
        Ok(())
    }
}
