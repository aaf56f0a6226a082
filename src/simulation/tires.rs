//! Lateral tire model
//!
//! Each axle gets a slip angle from the local velocity of its contact
//! patch. Lateral force grows linearly with slip until the grip limit and
//! is then saturated.

use super::config::VehicleConfig;
use super::types::{sign, Vec2};
use super::weight_transfer::AxleLoads;

/// Slip angle of each axle (radians)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SlipAngles {
    pub front: f32,
    pub rear: f32,
}

/// Lateral force of each axle in the vehicle frame (N)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LateralForces {
    pub front: f32,
    pub rear: f32,
}

/// Slip angles for the given vehicle-frame velocity and yaw rate
///
/// The front axle's slip is offset by the steer angle since the front
/// wheels point away from the chassis axis. Reversing flips that offset.
pub fn slip_angles(
    config: &VehicleConfig,
    velocity_local: Vec2,
    yaw_rate: f32,
    steer_angle: f32,
) -> SlipAngles {
    let yaw_speed_front = config.cg_to_front_axle * yaw_rate;
    let yaw_speed_rear = -config.cg_to_rear_axle * yaw_rate;
    let forward_speed = velocity_local.x.abs();

    SlipAngles {
        front: (velocity_local.y + yaw_speed_front).atan2(forward_speed)
            - sign(velocity_local.x) * steer_angle,
        rear: (velocity_local.y + yaw_speed_rear).atan2(forward_speed),
    }
}

/// Saturating lateral force for one axle
pub fn lateral_force(corner_stiffness: f32, slip_angle: f32, grip: f32, load: f32) -> f32 {
    (-corner_stiffness * slip_angle).clamp(-grip, grip) * load
}

/// Rear grip, reduced towards the lock grip while the e-brake is held
pub fn rear_grip(config: &VehicleConfig, ebrake: f32) -> f32 {
    (config.tire_grip * (1.0 - ebrake * (1.0 - config.lock_grip))).max(0.0)
}

pub fn lateral_forces(
    config: &VehicleConfig,
    slip: &SlipAngles,
    loads: &AxleLoads,
    ebrake: f32,
) -> LateralForces {
    LateralForces {
        front: lateral_force(
            config.corner_stiffness_front,
            slip.front,
            config.tire_grip,
            loads.front,
        ),
        rear: lateral_force(
            config.corner_stiffness_rear,
            slip.rear,
            rear_grip(config, ebrake),
            loads.rear,
        ),
    }
}
