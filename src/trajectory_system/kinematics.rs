use crate::utils::vector2d::Vector2D;

/// Planar motion state of the lander.
///
/// Vertical speed is positive while descending, so altitude decreases by
/// `vertical_speed * dt` each step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub vertical_speed: f64,
    pub horizontal_speed: f64,
    pub distance_remaining: f64,
    pub altitude: f64,
    pub pitch_angle: f64,
}

impl Kinematics {
    pub fn new(
        vertical_speed: f64,
        horizontal_speed: f64,
        distance_remaining: f64,
        altitude: f64,
        pitch_angle: f64,
    ) -> Self {
        Kinematics {
            vertical_speed,
            horizontal_speed: horizontal_speed.max(0.0),
            distance_remaining,
            altitude,
            pitch_angle,
        }
    }

    /// Splits a thrust acceleration along the current attitude.
    pub fn thrust_vector(&self, acceleration: f64) -> Vector2D {
        Vector2D::from_pitch(acceleration, self.pitch_angle)
    }

    /// One explicit Euler step.
    ///
    /// Horizontal speed only ever bleeds off toward zero; a lander that has
    /// stopped drifting is never pushed backwards.
    pub fn integrate(&mut self, thrust: Vector2D, gravity: f64, delta_time: f64) {
        let delta_v = (thrust - Vector2D::new(0.0, gravity)) * delta_time;

        if self.horizontal_speed > 0.0 {
            self.horizontal_speed -= delta_v.x;
            if self.horizontal_speed < 0.0 {
                self.horizontal_speed = 0.0;
            }
        }

        self.distance_remaining -= self.horizontal_speed * delta_time;
        self.vertical_speed -= delta_v.y;
        self.altitude -= self.vertical_speed * delta_time;
    }

    pub fn speed(&self) -> f64 {
        Vector2D::new(self.horizontal_speed, self.vertical_speed).magnitude()
    }
}
