//! Longitudinal weight transfer
//!
//! Pitch is not simulated. Instead the normal load moves between the axles
//! in proportion to the longitudinal acceleration of the previous tick.

use super::config::VehicleConfig;

/// Normal load on each axle (N)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxleLoads {
    pub front: f32,
    pub rear: f32,
}

impl AxleLoads {
    pub fn total(&self) -> f32 {
        self.front + self.rear
    }
}

/// Axle loads under the given vehicle-frame longitudinal acceleration
///
/// Accelerating forward unloads the front axle and loads the rear one;
/// braking does the opposite.
pub fn axle_loads(config: &VehicleConfig, longitudinal_accel: f32) -> AxleLoads {
    let weight = config.mass * config.gravity;
    let transfer =
        config.weight_transfer * longitudinal_accel * config.cg_height / config.wheelbase();

    AxleLoads {
        front: config.axle_weight_ratio_front() * weight - transfer,
        rear: config.axle_weight_ratio_rear() * weight + transfer,
    }
}
