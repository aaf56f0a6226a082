//! Standalone vehicle dynamics module
//!
//! This module contains the planar car model: steering filter, engine and
//! gearing, weight transfer, tire forces, integration and tire track
//! history. It performs no I/O and can be driven from a console runner or
//! any renderer that reads the vehicle state between ticks.

mod config;
mod engine;
mod steering;
mod tire_tracks;
mod tires;
mod types;
mod vehicle;
mod weight_transfer;

// Re-export public types for external use
pub use config::VehicleConfig;
pub use engine::{drive_force, engine_rpm, TorqueCurve, TorquePoint};
pub use steering::{
    safe_steer, safe_steer_factor, smooth_steer, SteeringFilter, SAFE_STEER_SPEED_CAP,
    SAFE_STEER_SPEED_SCALE, STEER_RATE, STEER_RETURN_RATE,
};
pub use tire_tracks::{
    axle_contact_points, record_tire_tracks, skid_state, slip_ratio, SkidState, TireTrackBuffer,
    TIRE_TRACK_CAPACITY,
};
pub use tires::{lateral_force, lateral_forces, rear_grip, slip_angles, LateralForces, SlipAngles};
pub use types::{sign, Inputs, Vec2, MPS_TO_KMH};
pub use vehicle::{Vehicle, VehicleState, REST_SPEED_THRESHOLD};
pub use weight_transfer::{axle_loads, AxleLoads};
