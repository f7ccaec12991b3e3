use std::ops::{Mul, Sub};

/// Planar vector, `x` horizontal (along track) and `y` vertical (up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    /// Vector of the given magnitude tilted `pitch_degrees` away from vertical.
    pub fn from_pitch(magnitude: f64, pitch_degrees: f64) -> Self {
        let pitch = pitch_degrees.to_radians();
        Vector2D::new(pitch.sin() * magnitude, pitch.cos() * magnitude)
    }

    pub fn magnitude(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2)).sqrt()
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Vector2D::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Vector2D::new(self.x * scalar, self.y * scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_pitch_vertical() {
        let v = Vector2D::from_pitch(2.0, 0.0);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_from_pitch_preserves_magnitude() {
        let v = Vector2D::from_pitch(3.0, 58.0);
        assert_relative_eq!(v.magnitude(), 3.0, epsilon = 1e-12);
        assert!(v.x > v.y);
    }

    #[test]
    fn test_arithmetic() {
        let a = Vector2D::new(1.0, 2.0);
        let b = Vector2D::new(0.5, -1.0);
        assert_eq!(a - b, Vector2D::new(0.5, 3.0));
        assert_eq!(a * 2.0, Vector2D::new(2.0, 4.0));
    }
}
