//! Vehicle configuration
//!
//! Immutable per-session parameters of the simulated car. Defaults describe
//! a light rear-wheel-drive hatchback; any subset of the values can be
//! overridden from a TOML file.

use anyhow::{ensure, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::engine::TorqueCurve;
use super::tire_tracks::TIRE_TRACK_CAPACITY;

/// Physical and tuning parameters for one vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    /// m/s^2
    pub gravity: f32,
    /// kg
    pub mass: f32,
    /// Multiplied by mass to get the yaw inertia
    pub inertia_scale: f32,
    /// Centre to side of chassis (m)
    pub half_width: f32,
    /// Centre of gravity to front of chassis (m)
    pub cg_to_front: f32,
    /// Centre of gravity to rear of chassis (m)
    pub cg_to_rear: f32,
    pub cg_to_front_axle: f32,
    pub cg_to_rear_axle: f32,
    pub cg_height: f32,
    /// Including tire, also the height of the axle (m)
    pub wheel_radius: f32,
    /// Only used by renderers
    pub wheel_width: f32,
    pub tire_grip: f32,
    /// Fraction of grip left when the wheel is locked
    pub lock_grip: f32,
    pub corner_stiffness_front: f32,
    pub corner_stiffness_rear: f32,
    pub air_resist: f32,
    pub roll_resist: f32,
    /// N
    pub brake_force: f32,
    /// N
    pub ebrake_force: f32,
    /// How much weight moves between axles under acceleration and braking
    pub weight_transfer: f32,
    /// Maximum steering angle (radians)
    pub max_steer: f32,
    pub gear_ratios: Vec<f32>,
    pub diff_ratio: f32,
    pub transmission_efficiency: f32,
    pub torque_curve: TorqueCurve,
    pub idle_rpm: f32,
    pub smooth_steer: bool,
    pub safe_steer: bool,
    /// Slip ratio magnitude above which rear tire tracks are laid down
    pub skid_slip_ratio: f32,
    /// Slip angle magnitude (radians) above which tire tracks are laid down
    pub skid_slip_angle: f32,
    pub tire_track_capacity: usize,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        let brake_force = 12000.0;
        Self {
            gravity: 9.8,
            mass: 900.0,
            inertia_scale: 1.0,
            half_width: 0.8,
            cg_to_front: 2.0,
            cg_to_rear: 2.0,
            cg_to_front_axle: 1.25,
            cg_to_rear_axle: 1.25,
            cg_height: 0.55,
            wheel_radius: 0.3,
            wheel_width: 0.2,
            tire_grip: 2.0,
            lock_grip: 0.7,
            corner_stiffness_front: 5.0,
            corner_stiffness_rear: 5.2,
            air_resist: 2.5,
            roll_resist: 8.0,
            brake_force,
            ebrake_force: brake_force / 2.5,
            weight_transfer: 0.2,
            max_steer: 0.6,
            gear_ratios: vec![2.66, 1.78, 1.30, 1.0, 0.74, 0.50],
            diff_ratio: 3.42,
            transmission_efficiency: 0.7,
            torque_curve: TorqueCurve::default(),
            idle_rpm: 1000.0,
            smooth_steer: true,
            safe_steer: true,
            skid_slip_ratio: 0.05,
            skid_slip_angle: 0.2,
            tire_track_capacity: TIRE_TRACK_CAPACITY,
        }
    }
}

impl VehicleConfig {
    /// Parse a configuration from TOML; missing keys keep their defaults
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw).context("failed to parse vehicle config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read vehicle config `{}`", path.display()))?;
        let config = Self::from_toml_str(&raw)
            .with_context(|| format!("invalid vehicle config `{}`", path.display()))?;
        debug!("Loaded vehicle config from {}", path.display());
        Ok(config)
    }

    /// Yaw moment of inertia
    pub fn inertia(&self) -> f32 {
        self.mass * self.inertia_scale
    }

    pub fn wheelbase(&self) -> f32 {
        self.cg_to_front_axle + self.cg_to_rear_axle
    }

    /// Share of the static weight carried by the front axle
    pub fn axle_weight_ratio_front(&self) -> f32 {
        self.cg_to_front_axle / self.wheelbase()
    }

    /// Share of the static weight carried by the rear axle
    pub fn axle_weight_ratio_rear(&self) -> f32 {
        self.cg_to_rear_axle / self.wheelbase()
    }

    pub fn gear_count(&self) -> usize {
        self.gear_ratios.len()
    }

    /// Check the invariants the tick pipeline relies on without re-checking
    pub fn validate(&self) -> Result<()> {
        ensure!(self.mass > 0.0, "mass must be positive, got {}", self.mass);
        ensure!(
            self.inertia_scale > 0.0,
            "inertia_scale must be positive, got {}",
            self.inertia_scale
        );
        ensure!(
            self.cg_to_front_axle >= 0.0 && self.cg_to_rear_axle >= 0.0,
            "axle distances must not be negative"
        );
        ensure!(
            self.wheelbase() > 0.0,
            "wheelbase must be positive, got {}",
            self.wheelbase()
        );
        ensure!(
            self.wheel_radius > 0.0,
            "wheel_radius must be positive, got {}",
            self.wheel_radius
        );
        ensure!(
            (0.0..=1.0).contains(&self.lock_grip),
            "lock_grip must be within [0, 1], got {}",
            self.lock_grip
        );
        for (name, value) in [
            ("gravity", self.gravity),
            ("tire_grip", self.tire_grip),
            ("corner_stiffness_front", self.corner_stiffness_front),
            ("corner_stiffness_rear", self.corner_stiffness_rear),
            ("air_resist", self.air_resist),
            ("roll_resist", self.roll_resist),
            ("brake_force", self.brake_force),
            ("ebrake_force", self.ebrake_force),
            ("weight_transfer", self.weight_transfer),
            ("max_steer", self.max_steer),
            ("diff_ratio", self.diff_ratio),
            ("transmission_efficiency", self.transmission_efficiency),
            ("skid_slip_ratio", self.skid_slip_ratio),
            ("skid_slip_angle", self.skid_slip_angle),
        ] {
            ensure!(value >= 0.0, "{name} must not be negative, got {value}");
        }
        ensure!(!self.gear_ratios.is_empty(), "gear_ratios must not be empty");
        ensure!(
            self.gear_ratios.iter().all(|ratio| *ratio > 0.0),
            "gear ratios must be positive, got {:?}",
            self.gear_ratios
        );
        self.torque_curve.validate().context("invalid torque_curve")?;
        ensure!(
            self.torque_curve.min_rpm() == Some(self.idle_rpm),
            "idle_rpm ({}) must equal the lowest torque curve rpm ({:?})",
            self.idle_rpm,
            self.torque_curve.min_rpm()
        );
        ensure!(
            self.tire_track_capacity > 0,
            "tire_track_capacity must be positive"
        );
        Ok(())
    }
}
