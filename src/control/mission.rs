use crate::constants::{
    ATTITUDE_DEADBAND, ATTITUDE_KD, ATTITUDE_KI, ATTITUDE_KP, ATTITUDE_SLEW_RATE, CRASH_SPEED,
    ENGINE_CUTOFF_ALTITUDE, FIXED_RATE_KILL_SPEED, INITIAL_ALTITUDE, INITIAL_DISTANCE,
    INITIAL_FUEL, INITIAL_HORIZONTAL_SPEED, INITIAL_PITCH_ANGLE, INITIAL_THROTTLE,
    INITIAL_VERTICAL_SPEED, THROTTLE_KD, THROTTLE_KI, THROTTLE_KP, TIME_STEP, TOUCHDOWN_ALTITUDE,
};
use crate::control::environment::GravityModel;
use crate::control::guidance::GuidanceProfile;
use crate::control::pid::PidGains;
use crate::control::propulsion::PropulsionConfig;
use crate::errors::{
    ensure_finite, ensure_non_negative, ensure_positive, SimulationError, SimulationResult,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialConditions {
    pub altitude: f64,
    pub vertical_speed: f64,
    pub horizontal_speed: f64,
    pub distance: f64,
    pub pitch_angle: f64,
    pub fuel: f64,
    pub throttle: f64,
}

impl InitialConditions {
    pub fn validate(&self) -> SimulationResult<()> {
        ensure_finite("initial altitude", self.altitude)?;
        ensure_finite("initial vertical_speed", self.vertical_speed)?;
        ensure_non_negative("initial horizontal_speed", self.horizontal_speed)?;
        ensure_finite("initial distance", self.distance)?;
        ensure_finite("initial pitch_angle", self.pitch_angle)?;
        ensure_non_negative("initial fuel", self.fuel)?;
        ensure_finite("initial throttle", self.throttle)?;
        if !(0.0..=1.0).contains(&self.throttle) {
            return Err(SimulationError::InitializationError(format!(
                "initial throttle must be within [0, 1], got {}",
                self.throttle
            )));
        }
        Ok(())
    }
}

impl Default for InitialConditions {
    fn default() -> Self {
        InitialConditions {
            altitude: INITIAL_ALTITUDE,
            vertical_speed: INITIAL_VERTICAL_SPEED,
            horizontal_speed: INITIAL_HORIZONTAL_SPEED,
            distance: INITIAL_DISTANCE,
            pitch_angle: INITIAL_PITCH_ANGLE,
            fuel: INITIAL_FUEL,
            throttle: INITIAL_THROTTLE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminationLimits {
    /// Highest vertical or horizontal speed that still counts as a landing.
    pub crash_speed: f64,
    pub touchdown_altitude: f64,
    /// Engines are cut at or below this altitude regardless of the controller.
    pub engine_cutoff_altitude: f64,
}

impl TerminationLimits {
    pub fn validate(&self) -> SimulationResult<()> {
        ensure_positive("crash_speed", self.crash_speed)?;
        ensure_non_negative("touchdown_altitude", self.touchdown_altitude)?;
        ensure_non_negative("engine_cutoff_altitude", self.engine_cutoff_altitude)
    }
}

impl Default for TerminationLimits {
    fn default() -> Self {
        TerminationLimits {
            crash_speed: CRASH_SPEED,
            touchdown_altitude: TOUCHDOWN_ALTITUDE,
            engine_cutoff_altitude: ENGINE_CUTOFF_ALTITUDE,
        }
    }
}

/// How the pitch angle follows the guidance target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttitudeMode {
    /// Independent PID loop; its output is added to the pitch angle.
    Pid { gains: PidGains, deadband: f64 },
    /// Constant-rate slew toward the target, degrees per second.
    FixedRate { rate: f64, deadband: f64 },
}

impl AttitudeMode {
    pub fn deadband(&self) -> f64 {
        match self {
            AttitudeMode::Pid { deadband, .. } | AttitudeMode::FixedRate { deadband, .. } => {
                *deadband
            }
        }
    }

    pub fn validate(&self) -> SimulationResult<()> {
        ensure_non_negative("attitude deadband", self.deadband())?;
        match self {
            AttitudeMode::Pid { gains, .. } => {
                ensure_finite("attitude kp", gains.kp)?;
                ensure_finite("attitude ki", gains.ki)?;
                ensure_finite("attitude kd", gains.kd)
            }
            AttitudeMode::FixedRate { rate, .. } => ensure_positive("attitude slew rate", *rate),
        }
    }
}

/// Immutable description of one descent: vehicle, starting point, guidance,
/// controller tuning and the body being landed on.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub name: String,
    pub time_step: f64,
    pub lander: PropulsionConfig,
    pub initial: InitialConditions,
    pub limits: TerminationLimits,
    pub guidance: GuidanceProfile,
    pub throttle_gains: PidGains,
    pub attitude: AttitudeMode,
    pub gravity: GravityModel,
}

impl SimulationConfig {
    pub fn with_initial(mut self, initial: InitialConditions) -> Self {
        self.initial = initial;
        self
    }

    pub fn with_throttle_gains(mut self, gains: PidGains) -> Self {
        self.throttle_gains = gains;
        self
    }

    pub fn with_attitude(mut self, attitude: AttitudeMode) -> Self {
        self.attitude = attitude;
        self
    }

    pub fn with_guidance(mut self, guidance: GuidanceProfile) -> Self {
        self.guidance = guidance;
        self
    }

    pub fn with_gravity(mut self, gravity: GravityModel) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn validate(&self) -> SimulationResult<()> {
        ensure_positive("time_step", self.time_step)?;
        ensure_finite("throttle kp", self.throttle_gains.kp)?;
        ensure_finite("throttle ki", self.throttle_gains.ki)?;
        ensure_finite("throttle kd", self.throttle_gains.kd)?;
        self.lander.validate()?;
        self.initial.validate()?;
        self.limits.validate()?;
        self.guidance.validate()?;
        self.attitude.validate()?;
        self.gravity.validate()
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        MissionFactory::reference_descent()
    }
}

pub struct MissionFactory;

impl MissionFactory {
    /// Two independent loops: throttle tracks the descent rate, a second PID
    /// tracks the pitch schedule.
    pub fn reference_descent() -> SimulationConfig {
        SimulationConfig {
            name: "Reference Descent".to_string(),
            time_step: TIME_STEP,
            lander: PropulsionConfig::default(),
            initial: InitialConditions::default(),
            limits: TerminationLimits::default(),
            guidance: GuidanceProfile::default(),
            throttle_gains: PidGains::new(THROTTLE_KP, THROTTLE_KI, THROTTLE_KD),
            attitude: AttitudeMode::Pid {
                gains: PidGains::new(ATTITUDE_KP, ATTITUDE_KI, ATTITUDE_KD),
                deadband: ATTITUDE_DEADBAND,
            },
            gravity: GravityModel::moon(),
        }
    }

    /// Single throttle loop; attitude follows the schedule at a fixed slew rate.
    pub fn fixed_rate_attitude_descent() -> SimulationConfig {
        SimulationConfig {
            name: "Fixed-Rate Attitude Descent".to_string(),
            attitude: AttitudeMode::FixedRate {
                rate: ATTITUDE_SLEW_RATE,
                deadband: ATTITUDE_DEADBAND,
            },
            guidance: GuidanceProfile {
                kill_speed: FIXED_RATE_KILL_SPEED,
                ..GuidanceProfile::default()
            },
            ..MissionFactory::reference_descent()
        }
    }

    pub fn custom(
        name: String,
        initial: InitialConditions,
        guidance: GuidanceProfile,
    ) -> SimulationConfig {
        SimulationConfig {
            name,
            initial,
            guidance,
            ..MissionFactory::reference_descent()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_descent_is_valid() {
        let config = MissionFactory::reference_descent();
        assert!(config.validate().is_ok());
        assert_eq!(config.time_step, 1.0);
        assert_eq!(config.initial.altitude, 13_748.0);
        assert_eq!(config.initial.horizontal_speed, 932.0);
        assert!(matches!(config.attitude, AttitudeMode::Pid { .. }));
    }

    #[test]
    fn test_fixed_rate_preset_shares_mission() {
        let reference = MissionFactory::reference_descent();
        let variant = MissionFactory::fixed_rate_attitude_descent();
        assert!(variant.validate().is_ok());
        assert_eq!(variant.initial, reference.initial);
        assert_eq!(variant.throttle_gains, reference.throttle_gains);
        assert_eq!(variant.guidance.kill_speed, FIXED_RATE_KILL_SPEED);
        assert_eq!(
            variant.guidance.gain_transitions,
            reference.guidance.gain_transitions
        );
        assert!(matches!(variant.attitude, AttitudeMode::FixedRate { .. }));
    }

    #[test]
    fn test_rejects_non_positive_time_step() {
        let mut config = MissionFactory::reference_descent();
        config.time_step = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InitializationError(_))
        ));

        config.time_step = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_dry_mass() {
        let mut config = MissionFactory::reference_descent();
        config.lander.dry_mass = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_throttle_out_of_range() {
        let config = MissionFactory::reference_descent().with_initial(InitialConditions {
            throttle: 1.2,
            ..InitialConditions::default()
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_invalid_gravity() {
        let config =
            MissionFactory::reference_descent().with_gravity(GravityModel::Table(Vec::new()));
        assert!(matches!(
            config.validate(),
            Err(SimulationError::PhysicsError(_))
        ));
    }

    #[test]
    fn test_custom_mission() {
        let initial = InitialConditions {
            altitude: 2_000.0,
            ..InitialConditions::default()
        };
        let config = MissionFactory::custom(
            "Low Start".to_string(),
            initial,
            GuidanceProfile::default(),
        );
        assert_eq!(config.name, "Low Start");
        assert_eq!(config.initial.altitude, 2_000.0);
        assert!(config.validate().is_ok());
    }
}
