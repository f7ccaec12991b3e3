use tracing::info;

use crate::constants::{LOW_ALTITUDE_REPORTING, STATUS_INTERVAL};
use crate::control::lander::{DescentSimulator, LanderStatus, SimulationState};

/// Status lines go out every `STATUS_INTERVAL` seconds of simulated time and
/// on every tick once the lander is low.
pub fn should_report(elapsed_time: f64, time_step: f64, altitude: f64) -> bool {
    if altitude < LOW_ALTITUDE_REPORTING || elapsed_time == 0.0 {
        return true;
    }
    (elapsed_time / STATUS_INTERVAL).floor() > ((elapsed_time - time_step) / STATUS_INTERVAL).floor()
}

pub fn status_line(state: &SimulationState) -> String {
    let k = &state.kinematics;
    format!(
        "t={:>6.1}s vs={:>7.2} m/s hs={:>7.2} m/s dist={:>10.1} m alt={:>9.2} m \
         angle={:>6.2}° mass={:>7.2} kg acc={:>5.3} m/s² fuel={:>7.2} L throttle={:.3}",
        state.elapsed_time,
        k.vertical_speed,
        k.horizontal_speed,
        k.distance_remaining,
        k.altitude,
        k.pitch_angle,
        state.total_mass,
        state.current_acceleration,
        state.fuel_remaining,
        state.throttle
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySample {
    pub time: f64,
    pub altitude: f64,
    pub downrange: f64,
    pub vertical_speed: f64,
    pub horizontal_speed: f64,
    pub pitch_angle: f64,
    pub throttle: f64,
    pub fuel: f64,
    pub acceleration: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlightSummary {
    pub status: LanderStatus,
    pub flight_time: f64,
    pub touchdown_vertical_speed: f64,
    pub touchdown_horizontal_speed: f64,
    pub touchdown_speed: f64,
    pub downrange: f64,
    pub fuel_used: f64,
    pub fuel_remaining: f64,
    pub max_vertical_speed: f64,
    pub max_acceleration: f64,
}

pub struct Telemetry {
    samples: Vec<TelemetrySample>,
    max_vertical_speed: f64,
    max_acceleration: f64,
    initial_fuel: Option<f64>,
    outcome: Option<FlightSummary>,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl Telemetry {
    pub fn new() -> Self {
        Telemetry {
            samples: Vec::new(),
            max_vertical_speed: f64::MIN,
            max_acceleration: 0.0,
            initial_fuel: None,
            outcome: None,
        }
    }

    pub fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 3600.0 {
            let hours = (elapsed_time / 3600.0).floor();
            let minutes = ((elapsed_time % 3600.0) / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}h {:.0}m {:.2}s", hours, minutes, seconds)
        } else if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    pub fn format_altitude(altitude: f64) -> String {
        if altitude >= 1000.0 {
            format!("{:.2} km", altitude / 1000.0)
        } else {
            format!("{:.2} m", altitude)
        }
    }

    /// Records the simulator's current state. Samples after touchdown are
    /// ignored, so calling this every tick of a driver loop is fine.
    pub fn collect_data(&mut self, simulator: &DescentSimulator) {
        if self.outcome.is_some() {
            return;
        }

        let state = simulator.state();
        let initial_fuel = *self.initial_fuel.get_or_insert(state.fuel_remaining);

        self.max_vertical_speed = self.max_vertical_speed.max(simulator.vertical_speed());
        self.max_acceleration = self.max_acceleration.max(state.current_acceleration);

        self.samples.push(TelemetrySample {
            time: state.elapsed_time,
            altitude: simulator.altitude(),
            downrange: simulator.downrange_distance(),
            vertical_speed: simulator.vertical_speed(),
            horizontal_speed: simulator.horizontal_speed(),
            pitch_angle: simulator.pitch_angle(),
            throttle: state.throttle,
            fuel: state.fuel_remaining,
            acceleration: state.current_acceleration,
        });

        if state.status.is_terminal() {
            self.outcome = Some(FlightSummary {
                status: state.status,
                flight_time: state.elapsed_time,
                touchdown_vertical_speed: simulator.vertical_speed(),
                touchdown_horizontal_speed: simulator.horizontal_speed(),
                touchdown_speed: state.kinematics.speed(),
                downrange: simulator.downrange_distance(),
                fuel_used: initial_fuel - state.fuel_remaining,
                fuel_remaining: state.fuel_remaining,
                max_vertical_speed: self.max_vertical_speed,
                max_acceleration: self.max_acceleration,
            });
        }
    }

    pub fn samples(&self) -> &[TelemetrySample] {
        &self.samples
    }

    /// `(downrange, altitude)` pairs, the track a trajectory plot draws.
    pub fn trajectory(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .map(|sample| (sample.downrange, sample.altitude))
            .collect()
    }

    /// Available once a terminal state has been collected.
    pub fn summary(&self) -> Option<&FlightSummary> {
        self.outcome.as_ref()
    }

    pub fn display_data(&self) {
        let Some(summary) = &self.outcome else {
            info!(
                "Descent still in progress after {} samples",
                self.samples.len()
            );
            return;
        };

        info!("--- Descent Summary ---");
        info!("Outcome: {}", summary.status);
        info!("Flight time: {}", Telemetry::format_time(summary.flight_time));
        info!(
            "Touchdown speed: {:.2} m/s (vertical {:.2} m/s, horizontal {:.2} m/s)",
            summary.touchdown_speed,
            summary.touchdown_vertical_speed,
            summary.touchdown_horizontal_speed
        );
        info!(
            "Downrange distance: {}",
            Telemetry::format_altitude(summary.downrange)
        );
        info!(
            "Fuel used: {:.2} L, remaining: {:.2} L",
            summary.fuel_used, summary.fuel_remaining
        );
        info!(
            "Max vertical speed: {:.2} m/s, max thrust acceleration: {:.3} m/s²",
            summary.max_vertical_speed, summary.max_acceleration
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_TICKS;
    use crate::control::mission::{InitialConditions, MissionFactory};
    use approx::assert_relative_eq;

    #[test]
    fn test_report_cadence() {
        assert!(should_report(0.0, 1.0, 13_000.0));
        assert!(should_report(10.0, 1.0, 13_000.0));
        assert!(!should_report(11.0, 1.0, 13_000.0));
        assert!(should_report(20.0, 1.0, 13_000.0));
        assert!(should_report(11.0, 1.0, 99.0));
    }

    #[test]
    fn test_report_cadence_with_fractional_steps() {
        assert!(should_report(10.25, 0.5, 5_000.0));
        assert!(!should_report(10.75, 0.5, 5_000.0));
    }

    #[test]
    fn test_status_line_contains_fields() {
        let simulator = DescentSimulator::reference().unwrap();
        let line = status_line(simulator.state());
        assert!(line.contains("alt= 13748.00 m"));
        assert!(line.contains("fuel= 121.06 L"));
        assert!(line.contains("throttle=0.700"));
    }

    #[test]
    fn test_format_time() {
        assert_eq!(Telemetry::format_time(30.0), "30.00s");
        assert_eq!(Telemetry::format_time(628.0), "10m 28.00s");
        assert_eq!(Telemetry::format_time(3725.0), "1h 2m 5.00s");
    }

    #[test]
    fn test_format_altitude() {
        assert_eq!(Telemetry::format_altitude(13_748.0), "13.75 km");
        assert_eq!(Telemetry::format_altitude(99.5), "99.50 m");
    }

    #[test]
    fn test_summary_after_touchdown() {
        let config = MissionFactory::reference_descent().with_initial(InitialConditions {
            vertical_speed: 2.0,
            horizontal_speed: 1.0,
            altitude: 4.0,
            ..InitialConditions::default()
        });
        let mut simulator = DescentSimulator::new(config).unwrap();
        let mut telemetry = Telemetry::new();

        telemetry.collect_data(&simulator);
        assert!(telemetry.summary().is_none());

        simulator.step();
        telemetry.collect_data(&simulator);
        telemetry.collect_data(&simulator);

        let summary = telemetry.summary().unwrap();
        assert_eq!(summary.status, LanderStatus::Landed);
        assert_eq!(summary.fuel_used, 0.0);
        assert_relative_eq!(summary.touchdown_speed, 5.0_f64.sqrt(), epsilon = 1e-12);
        assert_eq!(telemetry.samples().len(), 2);
    }

    #[test]
    fn test_trajectory_tracks_downrange() {
        let mut simulator = DescentSimulator::reference().unwrap();
        let mut telemetry = Telemetry::new();
        telemetry.collect_data(&simulator);
        for _ in 0..MAX_TICKS {
            simulator.step();
            telemetry.collect_data(&simulator);
            if simulator.status().is_terminal() {
                break;
            }
        }

        let trajectory = telemetry.trajectory();
        assert_eq!(trajectory[0], (0.0, 13_748.0));
        assert!(trajectory.windows(2).all(|pair| pair[1].0 >= pair[0].0));
        assert_eq!(trajectory.last().map(|point| point.1), Some(0.0));

        let summary = telemetry.summary().unwrap();
        assert!(summary.fuel_used > 0.0);
        assert!(summary.max_vertical_speed >= 24.8);
    }
}
