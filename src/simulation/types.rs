//! Core types for the vehicle simulation
//!
//! Plain value types shared by every stage of the tick pipeline.

use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// A 2D vector in the simulation plane
///
/// Used both for world-frame quantities and for vehicle-frame quantities
/// (x = forward, y = lateral).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(&self, other: &Vec2) -> f32 {
        (*other - *self).length()
    }

    /// Rotate a vehicle-frame vector into the world frame
    pub fn to_world(&self, heading: f32) -> Vec2 {
        let (sn, cs) = heading.sin_cos();
        Vec2 {
            x: cs * self.x - sn * self.y,
            y: sn * self.x + cs * self.y,
        }
    }

    /// Rotate a world-frame vector into the vehicle frame
    pub fn to_local(&self, heading: f32) -> Vec2 {
        let (sn, cs) = heading.sin_cos();
        Vec2 {
            x: cs * self.x + sn * self.y,
            y: cs * self.y - sn * self.x,
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

/// Driver controls sampled once per tick
///
/// Each signal is 0 or 1 for digital controls. Throttle may also carry a
/// fractional value, which scales drive force linearly.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Inputs {
    pub left: f32,
    pub right: f32,
    pub throttle: f32,
    pub brake: f32,
    pub ebrake: f32,
}

impl Inputs {
    /// Build inputs from digital (pressed / released) controls
    pub fn from_digital(
        left: bool,
        right: bool,
        throttle: bool,
        brake: bool,
        ebrake: bool,
    ) -> Self {
        let signal = |pressed: bool| if pressed { 1.0 } else { 0.0 };
        Self {
            left: signal(left),
            right: signal(right),
            throttle: signal(throttle),
            brake: signal(brake),
            ebrake: signal(ebrake),
        }
    }

    /// Net steering axis: right minus left, in [-1, 1]
    ///
    /// Holding both directions cancels out to zero.
    pub fn steer_axis(&self) -> f32 {
        (self.right - self.left).clamp(-1.0, 1.0)
    }

    pub fn with_throttle(mut self, throttle: f32) -> Self {
        self.throttle = throttle;
        self
    }
}

/// Sign with zero treated as positive
pub fn sign(value: f32) -> f32 {
    if value >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Conversion factor from m/s to km/h
pub const MPS_TO_KMH: f32 = 3.6;
