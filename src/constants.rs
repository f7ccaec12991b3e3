// Lunar Environment
pub const MOON_SURFACE_GRAVITY: f64 = 1.622; // m/s²
pub const MOON_ORBITAL_SPEED: f64 = 1700.0; // m/s, horizontal speed at which gravity is fully relieved

// Lander Constants
pub const DRY_MASS: f64 = 165.0; // kg
pub const MAIN_ENGINE_FORCE: f64 = 430.0; // N
pub const SECONDARY_ENGINE_FORCE: f64 = 25.0; // N
pub const SECONDARY_ENGINE_COUNT: u32 = 8;
pub const MAIN_ENGINE_BURN_RATE: f64 = 0.15; // liter/s
pub const SECONDARY_ENGINE_BURN_RATE: f64 = 0.009; // liter/s

// Initial Conditions
pub const INITIAL_ALTITUDE: f64 = 13_748.0; // m
pub const INITIAL_VERTICAL_SPEED: f64 = 24.8; // m/s, positive = descending
pub const INITIAL_HORIZONTAL_SPEED: f64 = 932.0; // m/s
pub const INITIAL_DISTANCE: f64 = 181_000.0; // m
pub const INITIAL_PITCH_ANGLE: f64 = 58.0; // degrees, 0 = vertical
pub const INITIAL_FUEL: f64 = 121.06; // liters
pub const INITIAL_THROTTLE: f64 = 0.7;

// Termination Limits
pub const CRASH_SPEED: f64 = 2.5; // m/s
pub const TOUCHDOWN_ALTITUDE: f64 = 5.0; // m
pub const ENGINE_CUTOFF_ALTITUDE: f64 = 3.0; // m

// Guidance
pub const COAST_ALTITUDE: f64 = 1_000.0; // m
pub const COAST_DESCENT_RATE: f64 = 25.0; // m/s
pub const NEAR_GROUND_ALTITUDE: f64 = 10.0; // m
pub const FINAL_DESCENT_RATE: f64 = 2.0; // m/s
pub const TOUCHDOWN_DESCENT_RATE: f64 = 1.0; // m/s
pub const TILT_ANGLE: f64 = 58.0; // degrees
pub const KILL_SPEED: f64 = 100.0; // m/s
// A constant-rate slew lags the pitch schedule, so it holds the tilt longer.
pub const FIXED_RATE_KILL_SPEED: f64 = 20.0; // m/s
pub const VERTICAL_SPEED_THRESHOLD: f64 = 10.0; // m/s, horizontal speed at which pitch reaches 0
pub const FINAL_APPROACH_ALTITUDE: f64 = 100.0; // m
pub const TERMINAL_DAMPING_KD: f64 = 0.2;

// Controller Gains
pub const THROTTLE_KP: f64 = 0.04;
pub const THROTTLE_KI: f64 = 0.001;
pub const THROTTLE_KD: f64 = 0.1;
pub const ATTITUDE_KP: f64 = 0.04;
pub const ATTITUDE_KI: f64 = 0.001;
pub const ATTITUDE_KD: f64 = 0.1;
pub const ATTITUDE_DEADBAND: f64 = 3.0; // degrees
pub const ATTITUDE_SLEW_RATE: f64 = 2.0; // degrees/s

// Simulation Parameters
pub const TIME_STEP: f64 = 1.0; // s
pub const MAX_TICKS: u32 = 1_000;
pub const STATUS_INTERVAL: f64 = 10.0; // s
pub const LOW_ALTITUDE_REPORTING: f64 = 100.0; // m
