use std::fmt;

use tracing::{debug, info};

use crate::control::guidance::ControlLoop;
use crate::control::mission::{AttitudeMode, MissionFactory, SimulationConfig, TerminationLimits};
use crate::control::pid::PidController;
use crate::control::propulsion::PropulsionSystem;
use crate::errors::{SimulationError, SimulationResult};
use crate::telemetry_system::telemetry::{should_report, status_line};
use crate::trajectory_system::kinematics::Kinematics;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum LanderStatus {
    Flying,
    Landed,
    Crashed,
}

impl LanderStatus {
    /// Touchdown rule: too fast near the ground is a crash, slow enough at or
    /// below touchdown altitude is a landing.
    ///
    /// At exactly `touchdown_altitude` with excess speed neither rule applies
    /// and the lander keeps flying.
    pub fn classify(
        vertical_speed: f64,
        horizontal_speed: f64,
        altitude: f64,
        limits: &TerminationLimits,
    ) -> Self {
        let too_fast =
            vertical_speed > limits.crash_speed || horizontal_speed > limits.crash_speed;
        if too_fast && altitude < limits.touchdown_altitude {
            LanderStatus::Crashed
        } else if !too_fast && altitude <= limits.touchdown_altitude {
            LanderStatus::Landed
        } else {
            LanderStatus::Flying
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, LanderStatus::Flying)
    }
}

impl fmt::Display for LanderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LanderStatus::Flying => "flying",
            LanderStatus::Landed => "landed",
            LanderStatus::Crashed => "crashed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub kinematics: Kinematics,
    pub elapsed_time: f64,
    pub fuel_remaining: f64,
    pub total_mass: f64,
    pub throttle: f64,
    pub current_acceleration: f64,
    pub status: LanderStatus,
}

#[derive(Debug, Clone)]
enum AttitudeController {
    Pid(PidController),
    FixedRate { rate: f64 },
}

/// Owns one descent and advances it a fixed timestep per call to [`step`].
///
/// [`step`]: DescentSimulator::step
#[derive(Debug, Clone)]
pub struct DescentSimulator {
    config: SimulationConfig,
    state: SimulationState,
    propulsion: PropulsionSystem,
    throttle_pid: PidController,
    attitude: AttitudeController,
    fired_transitions: Vec<bool>,
    ticks: u32,
}

impl DescentSimulator {
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;

        let initial = config.initial;
        let propulsion = PropulsionSystem::new(config.lander, initial.fuel);
        let attitude = match config.attitude {
            AttitudeMode::Pid { gains, .. } => AttitudeController::Pid(PidController::new(gains)),
            AttitudeMode::FixedRate { rate, .. } => AttitudeController::FixedRate { rate },
        };

        let state = SimulationState {
            kinematics: Kinematics::new(
                initial.vertical_speed,
                initial.horizontal_speed,
                initial.distance,
                initial.altitude,
                initial.pitch_angle,
            ),
            elapsed_time: 0.0,
            fuel_remaining: propulsion.fuel(),
            total_mass: propulsion.total_mass(),
            throttle: initial.throttle,
            current_acceleration: 0.0,
            status: LanderStatus::Flying,
        };

        Ok(DescentSimulator {
            throttle_pid: PidController::new(config.throttle_gains),
            fired_transitions: vec![false; config.guidance.gain_transitions.len()],
            config,
            state,
            propulsion,
            attitude,
            ticks: 0,
        })
    }

    pub fn reference() -> SimulationResult<Self> {
        DescentSimulator::new(MissionFactory::reference_descent())
    }

    /// Advances one timestep. A no-op once the lander has landed or crashed.
    pub fn step(&mut self) {
        if self.state.status.is_terminal() {
            return;
        }

        if should_report(
            self.state.elapsed_time,
            self.config.time_step,
            self.state.kinematics.altitude,
        ) {
            info!("{}", status_line(&self.state));
        }

        if self.check_touchdown() {
            return;
        }

        let delta_time = self.config.time_step;
        let kinematics = self.state.kinematics;
        let targets = self
            .config
            .guidance
            .targets(kinematics.altitude, kinematics.horizontal_speed);

        self.apply_gain_transitions(kinematics.altitude);
        self.update_attitude(targets.pitch_angle, delta_time);
        self.update_throttle(targets.vertical_speed, delta_time);

        let thrust = self
            .state
            .kinematics
            .thrust_vector(self.state.current_acceleration);
        let gravity = self
            .config
            .gravity
            .gravitational_deceleration(kinematics.horizontal_speed);

        self.state.elapsed_time += delta_time;
        self.state.current_acceleration = self.propulsion.burn(self.state.throttle, delta_time);
        self.state.fuel_remaining = self.propulsion.fuel();
        self.state.total_mass = self.propulsion.total_mass();

        self.state.kinematics.integrate(thrust, gravity, delta_time);
        self.ticks += 1;

        if self.state.kinematics.altitude < 0.0 {
            self.check_touchdown();
        }
    }

    /// Steps until touchdown, failing if the lander is still flying after
    /// `max_ticks` steps.
    pub fn run_until_terminal(&mut self, max_ticks: u32) -> SimulationResult<LanderStatus> {
        let mut remaining = max_ticks;
        while !self.state.status.is_terminal() && remaining > 0 {
            self.step();
            remaining -= 1;
        }

        if self.state.status.is_terminal() {
            Ok(self.state.status)
        } else {
            Err(SimulationError::MissionError(format!(
                "{} still flying after {} ticks at altitude {:.1} m",
                self.config.name, max_ticks, self.state.kinematics.altitude
            )))
        }
    }

    fn check_touchdown(&mut self) -> bool {
        let kinematics = &self.state.kinematics;
        let status = LanderStatus::classify(
            kinematics.vertical_speed,
            kinematics.horizontal_speed,
            kinematics.altitude,
            &self.config.limits,
        );
        if !status.is_terminal() {
            return false;
        }

        info!(
            "{} at t={:.0}s (vs {:.2} m/s, hs {:.2} m/s)",
            status, self.state.elapsed_time, kinematics.vertical_speed, kinematics.horizontal_speed
        );
        self.state.status = status;
        self.state.kinematics.altitude = 0.0;
        self.state.throttle = 0.0;
        self.state.current_acceleration = 0.0;
        true
    }

    fn apply_gain_transitions(&mut self, altitude: f64) {
        let transitions = &self.config.guidance.gain_transitions;
        for (transition, fired) in transitions.iter().zip(self.fired_transitions.iter_mut()) {
            if *fired || !transition.is_due(altitude) {
                continue;
            }
            *fired = true;
            debug!(
                "gain transition '{}' at altitude {:.1} m",
                transition.name, altitude
            );
            match (transition.control_loop, &mut self.attitude) {
                (ControlLoop::Throttle, _) => self.throttle_pid.apply(&transition.update),
                (ControlLoop::Attitude, AttitudeController::Pid(pid)) => {
                    pid.apply(&transition.update)
                }
                (ControlLoop::Attitude, AttitudeController::FixedRate { .. }) => {}
            }
        }
    }

    fn update_attitude(&mut self, target_pitch: f64, delta_time: f64) {
        let deadband = self.config.attitude.deadband();
        let pitch = &mut self.state.kinematics.pitch_angle;

        match &mut self.attitude {
            AttitudeController::Pid(pid) => {
                *pitch += pid.compute_angle_correction(target_pitch, *pitch, delta_time);
            }
            AttitudeController::FixedRate { rate } => {
                let offset = *pitch - target_pitch;
                if offset > deadband {
                    *pitch -= *rate * delta_time;
                } else if offset < -deadband {
                    *pitch += *rate * delta_time;
                } else {
                    *pitch = target_pitch;
                }
            }
        }

        // Snap upright inside the deadband to avoid chatter around vertical.
        if pitch.abs() < deadband {
            *pitch = 0.0;
        }
    }

    fn update_throttle(&mut self, target_vertical_speed: f64, delta_time: f64) {
        let correction = self.throttle_pid.compute_throttle_correction(
            target_vertical_speed,
            self.state.kinematics.vertical_speed,
            delta_time,
        );
        self.state.throttle = (self.state.throttle - correction).clamp(0.0, 1.0);

        if self.state.kinematics.altitude <= self.config.limits.engine_cutoff_altitude {
            self.state.throttle = 0.0;
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn status(&self) -> LanderStatus {
        self.state.status
    }

    pub fn vertical_speed(&self) -> f64 {
        self.state.kinematics.vertical_speed
    }

    pub fn horizontal_speed(&self) -> f64 {
        self.state.kinematics.horizontal_speed
    }

    pub fn distance_remaining(&self) -> f64 {
        self.state.kinematics.distance_remaining
    }

    /// Distance flown along track since the start of the descent.
    pub fn downrange_distance(&self) -> f64 {
        self.config.initial.distance - self.state.kinematics.distance_remaining
    }

    pub fn pitch_angle(&self) -> f64 {
        self.state.kinematics.pitch_angle
    }

    pub fn altitude(&self) -> f64 {
        self.state.kinematics.altitude
    }

    pub fn elapsed_time(&self) -> f64 {
        self.state.elapsed_time
    }

    pub fn fuel_remaining(&self) -> f64 {
        self.state.fuel_remaining
    }

    pub fn total_mass(&self) -> f64 {
        self.state.total_mass
    }

    pub fn throttle(&self) -> f64 {
        self.state.throttle
    }

    pub fn current_acceleration(&self) -> f64 {
        self.state.current_acceleration
    }

    pub fn throttle_controller(&self) -> &PidController {
        &self.throttle_pid
    }
}
