#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidGains {
    pub kp: f64, // Proportional gain
    pub ki: f64, // Integral gain
    pub kd: f64, // Derivative gain
}

impl PidGains {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        PidGains { kp, ki, kd }
    }
}

/// Partial gain change, applied by a guidance gain transition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GainUpdate {
    pub kp: Option<f64>,
    pub ki: Option<f64>,
    pub kd: Option<f64>,
}

impl GainUpdate {
    pub fn derivative(kd: f64) -> Self {
        GainUpdate {
            kd: Some(kd),
            ..Default::default()
        }
    }
}

/// Feedback controller shared by the throttle and attitude loops.
///
/// The integral accumulates `kp * error * dt` rather than the bare error, so
/// the integral contribution scales with `kp * ki`. Flight tuning depends on
/// this form.
#[derive(Debug, Clone, PartialEq)]
pub struct PidController {
    gains: PidGains,
    previous_error: f64,
    integral: f64,
}

impl PidController {
    pub fn new(gains: PidGains) -> Self {
        PidController {
            gains,
            previous_error: 0.0,
            integral: 0.0,
        }
    }

    fn calculate(&mut self, target: f64, current: f64, delta_time: f64) -> f64 {
        let error = target - current;
        self.integral += self.gains.kp * error * delta_time;
        let derivative = (error - self.previous_error) / delta_time;
        self.previous_error = error;
        error * self.gains.kp + self.integral * self.gains.ki + derivative * self.gains.kd
    }

    /// Positive output means the lander descends faster than the target.
    /// The caller subtracts the result from the throttle.
    pub fn compute_throttle_correction(
        &mut self,
        target_vertical_speed: f64,
        current_vertical_speed: f64,
        delta_time: f64,
    ) -> f64 {
        self.calculate(target_vertical_speed, current_vertical_speed, delta_time)
    }

    /// The caller adds the result to the pitch angle.
    pub fn compute_angle_correction(
        &mut self,
        target_angle: f64,
        current_angle: f64,
        delta_time: f64,
    ) -> f64 {
        self.calculate(target_angle, current_angle, delta_time)
    }

    pub fn set_p(&mut self, kp: f64) {
        self.gains.kp = kp;
    }

    pub fn set_i(&mut self, ki: f64) {
        self.gains.ki = ki;
    }

    pub fn set_d(&mut self, kd: f64) {
        self.gains.kd = kd;
    }

    pub fn apply(&mut self, update: &GainUpdate) {
        if let Some(kp) = update.kp {
            self.set_p(kp);
        }
        if let Some(ki) = update.ki {
            self.set_i(ki);
        }
        if let Some(kd) = update.kd {
            self.set_d(kd);
        }
    }

    pub fn gains(&self) -> PidGains {
        self.gains
    }

    pub fn integral(&self) -> f64 {
        self.integral
    }

    pub fn previous_error(&self) -> f64 {
        self.previous_error
    }
}
