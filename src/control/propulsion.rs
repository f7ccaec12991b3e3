use crate::constants::{
    DRY_MASS, MAIN_ENGINE_BURN_RATE, MAIN_ENGINE_FORCE, SECONDARY_ENGINE_BURN_RATE,
    SECONDARY_ENGINE_COUNT, SECONDARY_ENGINE_FORCE,
};
use crate::errors::{ensure_non_negative, ensure_positive, SimulationResult};

/// Engine cluster and structure of the lander: one main engine plus a fixed
/// number of secondary engines, all throttled together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropulsionConfig {
    pub dry_mass: f64,
    pub main_engine_force: f64,
    pub secondary_engine_force: f64,
    pub secondary_engine_count: u32,
    pub main_engine_burn_rate: f64,
    pub secondary_engine_burn_rate: f64,
}

impl PropulsionConfig {
    /// Liters per second at full throttle.
    pub fn total_burn_rate(&self) -> f64 {
        self.main_engine_burn_rate
            + f64::from(self.secondary_engine_count) * self.secondary_engine_burn_rate
    }

    fn total_force(&self) -> f64 {
        self.main_engine_force + f64::from(self.secondary_engine_count) * self.secondary_engine_force
    }

    /// Full-throttle acceleration of a lander of the given mass.
    pub fn max_acceleration(&self, mass: f64) -> f64 {
        self.total_force() / mass
    }

    pub fn validate(&self) -> SimulationResult<()> {
        ensure_positive("dry_mass", self.dry_mass)?;
        ensure_non_negative("main_engine_force", self.main_engine_force)?;
        ensure_non_negative("secondary_engine_force", self.secondary_engine_force)?;
        ensure_non_negative("main_engine_burn_rate", self.main_engine_burn_rate)?;
        ensure_non_negative("secondary_engine_burn_rate", self.secondary_engine_burn_rate)
    }
}

impl Default for PropulsionConfig {
    fn default() -> Self {
        PropulsionConfig {
            dry_mass: DRY_MASS,
            main_engine_force: MAIN_ENGINE_FORCE,
            secondary_engine_force: SECONDARY_ENGINE_FORCE,
            secondary_engine_count: SECONDARY_ENGINE_COUNT,
            main_engine_burn_rate: MAIN_ENGINE_BURN_RATE,
            secondary_engine_burn_rate: SECONDARY_ENGINE_BURN_RATE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropulsionSystem {
    pub config: PropulsionConfig,
    fuel: f64,
    total_mass: f64,
}

impl PropulsionSystem {
    pub fn new(config: PropulsionConfig, initial_fuel: f64) -> Self {
        PropulsionSystem {
            config,
            fuel: initial_fuel,
            total_mass: config.dry_mass + initial_fuel,
        }
    }

    /// Burns fuel for one step and returns the new thrust acceleration.
    ///
    /// The step that drains the tank still delivers full thrust; every step
    /// after it returns 0.
    pub fn burn(&mut self, throttle: f64, delta_time: f64) -> f64 {
        debug_assert!((0.0..=1.0).contains(&throttle), "Throttle must be between 0 and 1");

        if self.is_out_of_fuel() {
            return 0.0;
        }

        let fuel_consumed = delta_time * self.config.total_burn_rate() * throttle;
        if self.fuel > fuel_consumed {
            self.fuel -= fuel_consumed;
        } else if fuel_consumed > 0.0 {
            self.fuel = 0.0;
            tracing::warn!("fuel exhausted, engines shut down");
        }
        self.total_mass = self.config.dry_mass + self.fuel;
        throttle * self.config.max_acceleration(self.total_mass)
    }

    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    pub fn total_mass(&self) -> f64 {
        self.total_mass
    }

    pub fn is_out_of_fuel(&self) -> bool {
        self.fuel <= 0.0
    }
}
