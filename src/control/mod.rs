pub mod environment;
pub mod guidance;
pub mod lander;
pub mod mission;
pub mod pid;
pub mod propulsion;
