pub mod dispersion;
pub mod kinematics;
