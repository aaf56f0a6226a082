//! Steering filter
//!
//! Turns the digital steering axis into a bounded steer value. Two stages,
//! each of which can be switched off:
//! - smoothing: rate-limits how fast the wheel turns in and returns
//! - safe steer: shrinks steering authority as speed rises

/// Steer value change per second while a direction is held
pub const STEER_RATE: f32 = 2.0;

/// Steer value change per second while returning to centre
pub const STEER_RETURN_RATE: f32 = 1.0;

/// Speed above which safe steer stops reducing authority further
pub const SAFE_STEER_SPEED_CAP: f32 = 250.0;

pub const SAFE_STEER_SPEED_SCALE: f32 = 280.0;

/// Move the steer value towards the held direction, or back to centre
pub fn smooth_steer(steer: f32, steer_input: f32, delta_secs: f32) -> f32 {
    if steer_input != 0.0 {
        (steer + steer_input * delta_secs * STEER_RATE).clamp(-1.0, 1.0)
    } else if steer > 0.0 {
        (steer - delta_secs * STEER_RETURN_RATE).max(0.0)
    } else if steer < 0.0 {
        (steer + delta_secs * STEER_RETURN_RATE).min(0.0)
    } else {
        0.0
    }
}

/// Fraction of steering authority left at the given speed
pub fn safe_steer_factor(speed: f32) -> f32 {
    1.0 - speed.min(SAFE_STEER_SPEED_CAP) / SAFE_STEER_SPEED_SCALE
}

/// Limit steering by speed, trading oversteer for understeer
pub fn safe_steer(steer: f32, speed: f32) -> f32 {
    steer * safe_steer_factor(speed)
}

/// The two toggleable steering stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SteeringFilter {
    pub smooth: bool,
    pub safe: bool,
}

impl Default for SteeringFilter {
    fn default() -> Self {
        Self {
            smooth: true,
            safe: true,
        }
    }
}

impl SteeringFilter {
    pub fn new(smooth: bool, safe: bool) -> Self {
        Self { smooth, safe }
    }

    /// Filter one tick of steering input into the new steer value
    pub fn apply(&self, steer: f32, steer_input: f32, speed: f32, delta_secs: f32) -> f32 {
        let smoothed = if self.smooth {
            smooth_steer(steer, steer_input, delta_secs)
        } else {
            steer_input
        };

        if self.safe {
            safe_steer(smoothed, speed)
        } else {
            smoothed
        }
    }
}
