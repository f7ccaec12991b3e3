use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::constants::MAX_TICKS;
use crate::control::lander::{DescentSimulator, LanderStatus};
use crate::control::mission::{InitialConditions, SimulationConfig};
use crate::errors::{ensure_non_negative, SimulationError, SimulationResult};

/// Uniform `±` spreads applied to the initial conditions of a base mission.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispersion {
    pub runs: usize,
    pub seed: u64,
    pub max_ticks: u32,
    pub vertical_speed: f64,
    pub horizontal_speed: f64,
    pub pitch_angle: f64,
    pub altitude: f64,
    pub fuel: f64,
}

impl Default for Dispersion {
    fn default() -> Self {
        Dispersion {
            runs: 50,
            seed: 2019,
            max_ticks: 2 * MAX_TICKS,
            vertical_speed: 2.0,
            horizontal_speed: 10.0,
            pitch_angle: 1.0,
            altitude: 200.0,
            fuel: 0.0,
        }
    }
}

impl Dispersion {
    pub fn validate(&self) -> SimulationResult<()> {
        ensure_non_negative("vertical_speed spread", self.vertical_speed)?;
        ensure_non_negative("horizontal_speed spread", self.horizontal_speed)?;
        ensure_non_negative("pitch_angle spread", self.pitch_angle)?;
        ensure_non_negative("altitude spread", self.altitude)?;
        ensure_non_negative("fuel spread", self.fuel)?;
        if self.max_ticks == 0 {
            return Err(SimulationError::InitializationError(
                "dispersion max_ticks must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn sample(&self, rng: &mut StdRng, nominal: &InitialConditions) -> InitialConditions {
        InitialConditions {
            altitude: perturb(rng, nominal.altitude, self.altitude).max(0.0),
            vertical_speed: perturb(rng, nominal.vertical_speed, self.vertical_speed),
            horizontal_speed: perturb(rng, nominal.horizontal_speed, self.horizontal_speed)
                .max(0.0),
            pitch_angle: perturb(rng, nominal.pitch_angle, self.pitch_angle),
            fuel: perturb(rng, nominal.fuel, self.fuel).max(0.0),
            ..*nominal
        }
    }
}

fn perturb(rng: &mut StdRng, value: f64, spread: f64) -> f64 {
    if spread > 0.0 {
        value + rng.gen_range(-spread..=spread)
    } else {
        value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispersionOutcome {
    pub initial: InitialConditions,
    /// `Flying` when the run hit the tick limit.
    pub status: LanderStatus,
    pub flight_time: f64,
    pub touchdown_vertical_speed: f64,
    pub fuel_remaining: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DispersionReport {
    pub outcomes: Vec<DispersionOutcome>,
}

impl DispersionReport {
    fn count(&self, status: LanderStatus) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status == status)
            .count()
    }

    pub fn landed(&self) -> usize {
        self.count(LanderStatus::Landed)
    }

    pub fn crashed(&self) -> usize {
        self.count(LanderStatus::Crashed)
    }

    pub fn unfinished(&self) -> usize {
        self.count(LanderStatus::Flying)
    }

    pub fn landing_rate(&self) -> f64 {
        if self.outcomes.is_empty() {
            0.0
        } else {
            self.landed() as f64 / self.outcomes.len() as f64
        }
    }
}

/// Flies `dispersion.runs` descents from perturbed starting points. The same
/// seed always produces the same report.
pub fn run_dispersion(
    base: &SimulationConfig,
    dispersion: &Dispersion,
) -> SimulationResult<DispersionReport> {
    dispersion.validate()?;
    let mut rng = StdRng::seed_from_u64(dispersion.seed);
    let mut report = DispersionReport::default();

    for _ in 0..dispersion.runs {
        let initial = dispersion.sample(&mut rng, &base.initial);
        let mut simulator = DescentSimulator::new(base.clone().with_initial(initial))?;
        let status = match simulator.run_until_terminal(dispersion.max_ticks) {
            Ok(status) => status,
            Err(SimulationError::MissionError(_)) => LanderStatus::Flying,
            Err(err) => return Err(err),
        };

        report.outcomes.push(DispersionOutcome {
            initial,
            status,
            flight_time: simulator.elapsed_time(),
            touchdown_vertical_speed: simulator.vertical_speed(),
            fuel_remaining: simulator.fuel_remaining(),
        });
    }

    info!(
        "{}: {} runs, {} landed, {} crashed, {} unfinished",
        base.name,
        report.outcomes.len(),
        report.landed(),
        report.crashed(),
        report.unfinished()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::mission::MissionFactory;

    fn small_dispersion(seed: u64) -> Dispersion {
        Dispersion {
            runs: 8,
            seed,
            ..Dispersion::default()
        }
    }

    #[test]
    fn test_same_seed_same_report() {
        let base = MissionFactory::reference_descent();
        let first = run_dispersion(&base, &small_dispersion(7)).unwrap();
        let second = run_dispersion(&base, &small_dispersion(7)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_outcomes_partition_runs() {
        let base = MissionFactory::reference_descent();
        let report = run_dispersion(&base, &small_dispersion(11)).unwrap();
        assert_eq!(report.outcomes.len(), 8);
        assert_eq!(
            report.landed() + report.crashed() + report.unfinished(),
            report.outcomes.len()
        );
        assert!((0.0..=1.0).contains(&report.landing_rate()));
    }

    #[test]
    fn test_samples_stay_within_spread() {
        let base = MissionFactory::reference_descent();
        let dispersion = small_dispersion(3);
        let report = run_dispersion(&base, &dispersion).unwrap();
        for outcome in &report.outcomes {
            let initial = outcome.initial;
            assert!((initial.altitude - base.initial.altitude).abs() <= dispersion.altitude);
            assert!(
                (initial.horizontal_speed - base.initial.horizontal_speed).abs()
                    <= dispersion.horizontal_speed
            );
            assert_eq!(initial.fuel, base.initial.fuel);
            assert_eq!(initial.distance, base.initial.distance);
        }
    }

    #[test]
    fn test_zero_spread_reproduces_nominal_flight() {
        let base = MissionFactory::reference_descent();
        let dispersion = Dispersion {
            runs: 2,
            vertical_speed: 0.0,
            horizontal_speed: 0.0,
            pitch_angle: 0.0,
            altitude: 0.0,
            fuel: 0.0,
            ..Dispersion::default()
        };
        let report = run_dispersion(&base, &dispersion).unwrap();
        assert_eq!(report.landed(), 2);
        assert_eq!(report.outcomes[0], report.outcomes[1]);
        assert_eq!(report.outcomes[0].initial, base.initial);
    }

    #[test]
    fn test_tiny_tick_limit_leaves_runs_unfinished() {
        let base = MissionFactory::reference_descent();
        let dispersion = Dispersion {
            runs: 3,
            max_ticks: 5,
            ..Dispersion::default()
        };
        let report = run_dispersion(&base, &dispersion).unwrap();
        assert_eq!(report.unfinished(), 3);
        assert_eq!(report.landing_rate(), 0.0);
    }

    #[test]
    fn test_rejects_negative_spread() {
        let base = MissionFactory::reference_descent();
        let dispersion = Dispersion {
            altitude: -1.0,
            ..Dispersion::default()
        };
        assert!(run_dispersion(&base, &dispersion).is_err());
    }
}
