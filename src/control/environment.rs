use crate::constants::{MOON_ORBITAL_SPEED, MOON_SURFACE_GRAVITY};
use crate::errors::{ensure_finite, ensure_positive, SimulationError, SimulationResult};

/// Local gravity felt by the lander as a function of its horizontal speed.
///
/// Moving sideways over a curved body relieves part of the weight, so the
/// effective deceleration drops as horizontal speed grows.
#[derive(Debug, Clone, PartialEq)]
pub enum GravityModel {
    Constant(f64),
    Orbital {
        surface_gravity: f64,
        orbital_speed: f64,
    },
    /// `(horizontal speed, deceleration)` points, linearly interpolated and
    /// clamped to the end values outside the table.
    Table(Vec<(f64, f64)>),
}

impl GravityModel {
    pub fn moon() -> Self {
        GravityModel::Orbital {
            surface_gravity: MOON_SURFACE_GRAVITY,
            orbital_speed: MOON_ORBITAL_SPEED,
        }
    }

    pub fn gravitational_deceleration(&self, horizontal_speed: f64) -> f64 {
        match self {
            GravityModel::Constant(gravity) => *gravity,
            GravityModel::Orbital {
                surface_gravity,
                orbital_speed,
            } => (1.0 - horizontal_speed.abs() / orbital_speed) * surface_gravity,
            GravityModel::Table(points) => interpolate(points, horizontal_speed.abs()),
        }
    }

    pub fn validate(&self) -> SimulationResult<()> {
        match self {
            GravityModel::Constant(gravity) => ensure_finite("gravity", *gravity),
            GravityModel::Orbital {
                surface_gravity,
                orbital_speed,
            } => {
                ensure_finite("surface_gravity", *surface_gravity)?;
                ensure_positive("orbital_speed", *orbital_speed)
            }
            GravityModel::Table(points) => validate_table(points),
        }
    }
}

impl Default for GravityModel {
    fn default() -> Self {
        GravityModel::moon()
    }
}

fn interpolate(points: &[(f64, f64)], speed: f64) -> f64 {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return 0.0,
    };
    if speed <= first.0 {
        return first.1;
    }
    if speed >= last.0 {
        return last.1;
    }

    points
        .windows(2)
        .find(|pair| speed <= pair[1].0)
        .map(|pair| {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            y0 + (speed - x0) / (x1 - x0) * (y1 - y0)
        })
        .unwrap_or(last.1)
}

fn validate_table(points: &[(f64, f64)]) -> SimulationResult<()> {
    let first = points.first().ok_or_else(|| {
        SimulationError::PhysicsError("gravity table needs at least one point".to_string())
    })?;
    if first.0 != 0.0 {
        return Err(SimulationError::PhysicsError(format!(
            "gravity table must start at zero speed, starts at {}",
            first.0
        )));
    }
    for &(speed, deceleration) in points {
        if !speed.is_finite() || !deceleration.is_finite() {
            return Err(SimulationError::PhysicsError(
                "gravity table contains a non-finite value".to_string(),
            ));
        }
    }

    if points.windows(2).any(|pair| pair[1].0 <= pair[0].0) {
        return Err(SimulationError::PhysicsError(
            "gravity table speeds must be strictly increasing".to_string(),
        ));
    }

    let non_increasing = points.windows(2).all(|pair| pair[1].1 <= pair[0].1);
    let non_decreasing = points.windows(2).all(|pair| pair[1].1 >= pair[0].1);
    if !(non_increasing || non_decreasing) {
        return Err(SimulationError::PhysicsError(
            "gravity table must be monotonic in speed".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_moon_baseline() {
        let moon = GravityModel::moon();
        assert_relative_eq!(
            moon.gravitational_deceleration(0.0),
            MOON_SURFACE_GRAVITY,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_orbital_relief() {
        let moon = GravityModel::moon();
        assert_relative_eq!(
            moon.gravitational_deceleration(850.0),
            MOON_SURFACE_GRAVITY / 2.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            moon.gravitational_deceleration(MOON_ORBITAL_SPEED),
            0.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_orbital_is_monotonic_over_operating_range() {
        let moon = GravityModel::moon();
        let mut previous = moon.gravitational_deceleration(0.0);
        for speed in (10..=1000).step_by(10) {
            let current = moon.gravitational_deceleration(speed as f64);
            assert!(current < previous);
            previous = current;
        }
    }

    #[test]
    fn test_constant_ignores_speed() {
        let model = GravityModel::Constant(1.62);
        assert_eq!(model.gravitational_deceleration(0.0), 1.62);
        assert_eq!(model.gravitational_deceleration(900.0), 1.62);
    }

    #[test]
    fn test_table_interpolation() {
        let model = GravityModel::Table(vec![(0.0, 1.6), (1000.0, 0.6), (2000.0, 0.0)]);
        assert!(model.validate().is_ok());
        assert_relative_eq!(model.gravitational_deceleration(0.0), 1.6, epsilon = 1e-12);
        assert_relative_eq!(model.gravitational_deceleration(500.0), 1.1, epsilon = 1e-12);
        assert_relative_eq!(model.gravitational_deceleration(1500.0), 0.3, epsilon = 1e-12);
        assert_relative_eq!(model.gravitational_deceleration(5000.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_table_validation() {
        assert!(GravityModel::Table(vec![]).validate().is_err());
        assert!(GravityModel::Table(vec![(10.0, 1.6)]).validate().is_err());
        assert!(GravityModel::Table(vec![(0.0, 1.6), (0.0, 1.0)])
            .validate()
            .is_err());
        assert!(GravityModel::Table(vec![(0.0, 1.6), (10.0, 1.0), (20.0, 1.2)])
            .validate()
            .is_err());
        assert!(GravityModel::Table(vec![(0.0, 1.6)]).validate().is_ok());
    }

    #[test]
    fn test_orbital_validation() {
        let model = GravityModel::Orbital {
            surface_gravity: 1.622,
            orbital_speed: 0.0,
        };
        assert!(model.validate().is_err());
        assert!(GravityModel::moon().validate().is_ok());
    }
}
