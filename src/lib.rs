pub mod constants;
pub mod control;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use constants::*;
pub use control::environment::GravityModel;
pub use control::guidance::{ControlLoop, GainTransition, GuidanceProfile, GuidanceTargets};
pub use control::lander::{DescentSimulator, LanderStatus, SimulationState};
pub use control::mission::{
    AttitudeMode, InitialConditions, MissionFactory, SimulationConfig, TerminationLimits,
};
pub use control::pid::{GainUpdate, PidController, PidGains};
pub use control::propulsion::{PropulsionConfig, PropulsionSystem};
pub use errors::{SimulationError, SimulationResult};

// Re-export commonly used items from trajectory_system
pub use trajectory_system::dispersion::{run_dispersion, Dispersion, DispersionReport};
pub use trajectory_system::kinematics::Kinematics;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::{FlightSummary, Telemetry};

// Re-export commonly used utilities
pub use utils::vector2d::Vector2D;
