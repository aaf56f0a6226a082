//! Engine and drivetrain model
//!
//! Maps engine speed to torque through a calibration table and turns that
//! torque into a drive force at the rear wheels.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use super::config::VehicleConfig;

/// One calibration point of the torque curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorquePoint {
    /// Engine speed in rpm
    pub rpm: f32,
    /// Torque in Nm
    pub torque: f32,
}

impl TorquePoint {
    pub fn new(rpm: f32, torque: f32) -> Self {
        Self { rpm, torque }
    }
}

/// Piecewise-linear torque curve over strictly increasing engine speeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TorqueCurve {
    points: Vec<TorquePoint>,
}

impl Default for TorqueCurve {
    fn default() -> Self {
        Self::new(vec![
            TorquePoint::new(1000.0, 250.0),
            TorquePoint::new(2000.0, 310.0),
            TorquePoint::new(3000.0, 360.0),
            TorquePoint::new(4000.0, 390.0),
            TorquePoint::new(5000.0, 380.0),
            TorquePoint::new(6000.0, 320.0),
            TorquePoint::new(7000.0, 0.0),
        ])
    }
}

impl TorqueCurve {
    pub fn new(points: Vec<TorquePoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[TorquePoint] {
        &self.points
    }

    /// Lowest calibrated engine speed
    pub fn min_rpm(&self) -> Option<f32> {
        self.points.first().map(|point| point.rpm)
    }

    /// Highest calibrated engine speed; the engine makes no torque at or past it
    pub fn max_rpm(&self) -> Option<f32> {
        self.points.last().map(|point| point.rpm)
    }

    /// Look up torque at the given engine speed
    ///
    /// Returns the exact breakpoint torque on a breakpoint, the linear
    /// interpolant between breakpoints and zero at or above the top
    /// breakpoint. Speeds below the table clamp to the first breakpoint.
    pub fn torque_at(&self, rpm: f32) -> f32 {
        let Some(last) = self.points.last() else {
            return 0.0;
        };
        if rpm >= last.rpm {
            return 0.0;
        }

        // Index of the first breakpoint strictly above `rpm`
        let upper = self.points.partition_point(|point| point.rpm <= rpm);
        if upper == 0 {
            return self.points[0].torque;
        }

        let lo = self.points[upper - 1];
        let hi = self.points[upper];
        let t = (rpm - lo.rpm) / (hi.rpm - lo.rpm);
        lo.torque + (hi.torque - lo.torque) * t
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.points.len() >= 2,
            "torque curve needs at least two breakpoints, got {}",
            self.points.len()
        );
        for pair in self.points.windows(2) {
            ensure!(
                pair[1].rpm > pair[0].rpm,
                "torque curve rpm must be strictly increasing ({} followed by {})",
                pair[0].rpm,
                pair[1].rpm
            );
        }
        for point in &self.points {
            ensure!(
                point.rpm.is_finite() && point.torque.is_finite(),
                "torque curve contains a non-finite breakpoint {:?}",
                point
            );
        }
        Ok(())
    }
}

/// Drive force at the contact patch for the given engine torque and gear
///
/// The gear index is not range checked; keeping it valid is the caller's job.
pub fn drive_force(config: &VehicleConfig, torque: f32, gear: usize) -> f32 {
    torque * config.gear_ratios[gear] * config.diff_ratio * config.transmission_efficiency
        / config.wheel_radius
}

/// Engine speed implied by wheel speed and gearing, floored at idle
pub fn engine_rpm(config: &VehicleConfig, longitudinal_speed: f32, gear: usize) -> f32 {
    let wheel_rpm_factor = 60.0 / (2.0 * PI * config.wheel_radius);
    let rpm =
        longitudinal_speed.abs() * config.gear_ratios[gear] * config.diff_ratio * wheel_rpm_factor;
    rpm.max(config.idle_rpm)
}
