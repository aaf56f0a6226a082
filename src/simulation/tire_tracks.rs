//! Tire track history
//!
//! Contact points are recorded while a tire slides and kept in a
//! fixed-capacity ring buffer so skid marks can be drawn by a renderer.

use super::config::VehicleConfig;
use super::tires::SlipAngles;
use super::types::Vec2;

/// Default number of track points kept
pub const TIRE_TRACK_CAPACITY: usize = 100_000;

/// Floor for the speed used as slip ratio denominator
const MIN_SLIP_RATIO_SPEED: f32 = 0.1;

/// Fixed-capacity ring of world-frame contact points
///
/// Only recorded points are stored. Once full, each new point overwrites
/// the oldest one.
#[derive(Debug, Clone)]
pub struct TireTrackBuffer {
    points: Vec<Vec2>,
    capacity: usize,
    /// Next slot to overwrite once the buffer is full
    cursor: usize,
    total_recorded: u64,
}

impl Default for TireTrackBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TireTrackBuffer {
    pub fn new() -> Self {
        Self::with_capacity(TIRE_TRACK_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            capacity,
            cursor: 0,
            total_recorded: 0,
        }
    }

    pub fn push(&mut self, point: Vec2) {
        if self.capacity == 0 {
            return;
        }

        if self.points.len() < self.capacity {
            self.points.push(point);
        } else {
            self.points[self.cursor] = point;
        }
        self.cursor = (self.cursor + 1) % self.capacity;
        self.total_recorded += 1;
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.points.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Points ever recorded, including those already overwritten
    pub fn total_recorded(&self) -> u64 {
        self.total_recorded
    }

    /// Iterate from the oldest to the newest stored point
    pub fn iter(&self) -> impl Iterator<Item = &Vec2> + '_ {
        let split = if self.is_full() { self.cursor } else { 0 };
        let (newer, older) = self.points.split_at(split);
        older.iter().chain(newer.iter())
    }

    pub fn latest(&self) -> Option<&Vec2> {
        if self.points.is_empty() {
            return None;
        }
        let index = (self.cursor + self.capacity - 1) % self.capacity;
        self.points.get(index)
    }
}

/// Longitudinal slip indicator, zero when rolling straight
pub fn slip_ratio(longitudinal_speed: f32, speed: f32) -> f32 {
    (longitudinal_speed - speed) / speed.max(MIN_SLIP_RATIO_SPEED)
}

/// World positions of the left and right contact patch of an axle
///
/// `axle_offset` is the signed distance of the axle from the centre of
/// gravity along the vehicle's forward axis.
pub fn axle_contact_points(
    config: &VehicleConfig,
    position: Vec2,
    heading: f32,
    axle_offset: f32,
) -> [Vec2; 2] {
    let left = Vec2::new(axle_offset, -config.half_width).to_world(heading);
    let right = Vec2::new(axle_offset, config.half_width).to_world(heading);
    [position + left, position + right]
}

/// Which axles slid far enough this tick to leave tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkidState {
    pub front: bool,
    pub rear: bool,
}

pub fn skid_state(config: &VehicleConfig, slip_ratio: f32, slip: &SlipAngles) -> SkidState {
    let wheelspin = slip_ratio.abs() > config.skid_slip_ratio;
    SkidState {
        front: slip.front.abs() > config.skid_slip_angle,
        rear: wheelspin || slip.rear.abs() > config.skid_slip_angle,
    }
}

/// Record contact points for every skidding axle, two points per axle
pub fn record_tire_tracks(
    tracks: &mut TireTrackBuffer,
    config: &VehicleConfig,
    position: Vec2,
    heading: f32,
    skid: SkidState,
) {
    if skid.rear {
        for point in axle_contact_points(config, position, heading, -config.cg_to_rear_axle) {
            tracks.push(point);
        }
    }
    if skid.front {
        for point in axle_contact_points(config, position, heading, config.cg_to_front_axle) {
            tracks.push(point);
        }
    }
}
