use crate::constants::{
    COAST_ALTITUDE, COAST_DESCENT_RATE, FINAL_APPROACH_ALTITUDE, FINAL_DESCENT_RATE, KILL_SPEED,
    NEAR_GROUND_ALTITUDE, TERMINAL_DAMPING_KD, TILT_ANGLE, TOUCHDOWN_DESCENT_RATE,
    VERTICAL_SPEED_THRESHOLD,
};
use crate::control::pid::GainUpdate;
use crate::errors::{ensure_finite, ensure_non_negative, SimulationError, SimulationResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuidanceTargets {
    pub vertical_speed: f64,
    pub pitch_angle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlLoop {
    Throttle,
    Attitude,
}

/// Gain change that fires once, the first tick the lander is at or below
/// `below_altitude`.
#[derive(Debug, Clone, PartialEq)]
pub struct GainTransition {
    pub name: String,
    pub below_altitude: f64,
    pub control_loop: ControlLoop,
    pub update: GainUpdate,
}

impl GainTransition {
    pub fn new(
        name: impl Into<String>,
        below_altitude: f64,
        control_loop: ControlLoop,
        update: GainUpdate,
    ) -> Self {
        GainTransition {
            name: name.into(),
            below_altitude,
            control_loop,
            update,
        }
    }

    pub fn is_due(&self, altitude: f64) -> bool {
        altitude <= self.below_altitude
    }
}

/// Altitude bands for the descent-rate target and the speed ramp for the
/// pitch target.
#[derive(Debug, Clone, PartialEq)]
pub struct GuidanceProfile {
    pub coast_altitude: f64,
    pub coast_descent_rate: f64,
    pub near_ground_altitude: f64,
    pub final_descent_rate: f64,
    pub touchdown_descent_rate: f64,
    pub tilt_angle: f64,
    pub kill_speed: f64,
    pub vertical_speed_threshold: f64,
    pub final_approach_altitude: f64,
    pub gain_transitions: Vec<GainTransition>,
}

impl GuidanceProfile {
    pub fn targets(&self, altitude: f64, horizontal_speed: f64) -> GuidanceTargets {
        GuidanceTargets {
            vertical_speed: self.target_vertical_speed(altitude),
            pitch_angle: self.target_pitch(altitude, horizontal_speed),
        }
    }

    pub fn target_vertical_speed(&self, altitude: f64) -> f64 {
        if altitude > self.coast_altitude {
            self.coast_descent_rate
        } else if altitude > self.near_ground_altitude {
            let low = self.final_descent_rate.min(self.coast_descent_rate);
            let high = self.final_descent_rate.max(self.coast_descent_rate);
            ramp(
                altitude,
                self.near_ground_altitude,
                self.coast_altitude,
                self.final_descent_rate,
                self.coast_descent_rate,
            )
            .clamp(low, high)
        } else {
            self.touchdown_descent_rate
        }
    }

    /// Horizontal speed is killed first; the lander is forced upright for the
    /// final approach whatever drift is left.
    pub fn target_pitch(&self, altitude: f64, horizontal_speed: f64) -> f64 {
        if altitude < self.final_approach_altitude {
            return 0.0;
        }
        if horizontal_speed >= self.kill_speed {
            self.tilt_angle
        } else if horizontal_speed <= self.vertical_speed_threshold {
            0.0
        } else {
            ramp(
                horizontal_speed,
                self.vertical_speed_threshold,
                self.kill_speed,
                0.0,
                self.tilt_angle,
            )
        }
    }

    pub fn validate(&self) -> SimulationResult<()> {
        ensure_non_negative("coast_altitude", self.coast_altitude)?;
        ensure_non_negative("near_ground_altitude", self.near_ground_altitude)?;
        ensure_non_negative("coast_descent_rate", self.coast_descent_rate)?;
        ensure_non_negative("final_descent_rate", self.final_descent_rate)?;
        ensure_non_negative("touchdown_descent_rate", self.touchdown_descent_rate)?;
        ensure_finite("tilt_angle", self.tilt_angle)?;
        ensure_non_negative("kill_speed", self.kill_speed)?;
        ensure_non_negative("vertical_speed_threshold", self.vertical_speed_threshold)?;
        ensure_finite("final_approach_altitude", self.final_approach_altitude)?;

        if self.coast_altitude <= self.near_ground_altitude {
            return Err(SimulationError::InitializationError(format!(
                "coast altitude ({}) must be above the near-ground altitude ({})",
                self.coast_altitude, self.near_ground_altitude
            )));
        }
        if self.kill_speed <= self.vertical_speed_threshold {
            return Err(SimulationError::InitializationError(format!(
                "kill speed ({}) must be above the vertical speed threshold ({})",
                self.kill_speed, self.vertical_speed_threshold
            )));
        }
        for transition in &self.gain_transitions {
            ensure_finite(&transition.name, transition.below_altitude)?;
        }
        Ok(())
    }
}

impl Default for GuidanceProfile {
    fn default() -> Self {
        GuidanceProfile {
            coast_altitude: COAST_ALTITUDE,
            coast_descent_rate: COAST_DESCENT_RATE,
            near_ground_altitude: NEAR_GROUND_ALTITUDE,
            final_descent_rate: FINAL_DESCENT_RATE,
            touchdown_descent_rate: TOUCHDOWN_DESCENT_RATE,
            tilt_angle: TILT_ANGLE,
            kill_speed: KILL_SPEED,
            vertical_speed_threshold: VERTICAL_SPEED_THRESHOLD,
            final_approach_altitude: FINAL_APPROACH_ALTITUDE,
            gain_transitions: vec![GainTransition::new(
                "terminal approach damping",
                COAST_ALTITUDE,
                ControlLoop::Throttle,
                GainUpdate::derivative(TERMINAL_DAMPING_KD),
            )],
        }
    }
}

// Linear map of x from [x_lo, x_hi] onto [y_lo, y_hi].
fn ramp(x: f64, x_lo: f64, x_hi: f64, y_lo: f64, y_hi: f64) -> f64 {
    y_lo + (x - x_lo) / (x_hi - x_lo) * (y_hi - y_lo)
}
