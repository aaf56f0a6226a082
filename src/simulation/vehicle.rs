//! Vehicle state and the per-tick update
//!
//! `Vehicle::advance` runs the whole pipeline for one frame: steering,
//! engine and weight transfer, tire forces, integration and tire track
//! recording. Readers only ever see the state between ticks.

use anyhow::{bail, Result};
use log::{debug, trace, warn};

use super::config::VehicleConfig;
use super::engine::{drive_force, engine_rpm};
use super::steering::SteeringFilter;
use super::tire_tracks::{record_tire_tracks, skid_state, slip_ratio, SkidState, TireTrackBuffer};
use super::tires::{lateral_forces, slip_angles, SlipAngles};
use super::types::{sign, Inputs, Vec2, MPS_TO_KMH};
use super::weight_transfer::axle_loads;

/// Below this speed (m/s) an unpowered car is snapped to rest
pub const REST_SPEED_THRESHOLD: f32 = 0.5;

/// Mutable state of the simulated car
///
/// Positive heading and yaw rate rotate the forward axis towards +y, so
/// with y pointing down the screen steering right turns clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleState {
    /// Angle the car is pointed at (radians)
    pub heading: f32,
    /// World position (m)
    pub position: Vec2,
    /// World velocity (m/s)
    pub velocity: Vec2,
    /// Vehicle-frame velocity (m/s)
    pub velocity_local: Vec2,
    /// World acceleration (m/s^2)
    pub accel: Vec2,
    /// Vehicle-frame acceleration (m/s^2)
    pub accel_local: Vec2,
    /// Magnitude of `velocity`
    pub speed: f32,
    /// rad/s
    pub yaw_rate: f32,
    /// Steer value in [-1, 1]
    pub steer: f32,
    /// Front wheel angle (radians)
    pub steer_angle: f32,
    pub engine_rpm: f32,
    /// Index into the gear ratio table
    pub gear: usize,
    /// Torque at the current engine speed (Nm)
    pub engine_torque: f32,
    /// Slip angles from the most recent tick
    pub slip: SlipAngles,
    /// Axles that laid down tracks on the most recent tick
    pub skid: SkidState,
    /// Controls applied on the most recent tick
    pub inputs: Inputs,
    /// Simulated time (s)
    pub time: f32,
}

impl VehicleState {
    /// A car at rest at `position`, engine idling in first gear
    pub fn at_rest(config: &VehicleConfig, position: Vec2) -> Self {
        Self {
            heading: 0.0,
            position,
            velocity: Vec2::ZERO,
            velocity_local: Vec2::ZERO,
            accel: Vec2::ZERO,
            accel_local: Vec2::ZERO,
            speed: 0.0,
            yaw_rate: 0.0,
            steer: 0.0,
            steer_angle: 0.0,
            engine_rpm: config.idle_rpm,
            gear: 0,
            engine_torque: config.torque_curve.torque_at(config.idle_rpm),
            slip: SlipAngles::default(),
            skid: SkidState::default(),
            inputs: Inputs::default(),
            time: 0.0,
        }
    }
}

/// A single simulated car: configuration, state and tire track history
#[derive(Debug, Clone)]
pub struct Vehicle {
    config: VehicleConfig,
    steering: SteeringFilter,
    state: VehicleState,
    tire_tracks: TireTrackBuffer,
}

impl Vehicle {
    /// Create a car at rest at the origin
    pub fn new(config: VehicleConfig) -> Result<Self> {
        Self::new_at(config, Vec2::ZERO)
    }

    /// Create a car at rest at `position`
    pub fn new_at(config: VehicleConfig, position: Vec2) -> Result<Self> {
        config.validate()?;

        debug!(
            "Created vehicle: mass={}kg, wheelbase={}m, {} gears",
            config.mass,
            config.wheelbase(),
            config.gear_count()
        );

        Ok(Self {
            steering: SteeringFilter::new(config.smooth_steer, config.safe_steer),
            state: VehicleState::at_rest(&config, position),
            tire_tracks: TireTrackBuffer::with_capacity(config.tire_track_capacity),
            config,
        })
    }

    /// Create a car at `position` already rolling with world `velocity`
    ///
    /// The heading is zero, so `velocity.x` is the forward speed. Engine
    /// speed and torque are derived from it in first gear.
    pub fn new_moving(config: VehicleConfig, position: Vec2, velocity: Vec2) -> Result<Self> {
        let mut vehicle = Self::new_at(config, position)?;
        vehicle.state.velocity = velocity;
        vehicle.state.velocity_local = velocity.to_local(vehicle.state.heading);
        vehicle.state.speed = velocity.length();
        vehicle.refresh_engine();
        Ok(vehicle)
    }

    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn tire_tracks(&self) -> &TireTrackBuffer {
        &self.tire_tracks
    }

    /// Advance the simulation by `delta_secs` with the given controls
    pub fn advance(&mut self, delta_secs: f32, inputs: Inputs) {
        self.state.inputs = inputs;
        self.state.time += delta_secs;

        self.state.steer = self.steering.apply(
            self.state.steer,
            inputs.steer_axis(),
            self.state.speed,
            delta_secs,
        );
        self.state.steer_angle = self.config.max_steer * self.state.steer;

        self.integrate(delta_secs, &inputs);

        let state = &self.state;
        let skid = skid_state(
            &self.config,
            slip_ratio(state.velocity_local.x, state.speed),
            &state.slip,
        );
        record_tire_tracks(
            &mut self.tire_tracks,
            &self.config,
            state.position,
            state.heading,
            skid,
        );
        self.state.skid = skid;

        trace!(
            "t={:.3} pos=({:.2}, {:.2}) speed={:.2} yaw_rate={:.3} rpm={:.0}",
            self.state.time,
            self.state.position.x,
            self.state.position.y,
            self.state.speed,
            self.state.yaw_rate,
            self.state.engine_rpm
        );
    }

    /// Sum forces in the vehicle frame and step velocity, yaw and position
    fn integrate(&mut self, delta_secs: f32, inputs: &Inputs) {
        let config = &self.config;
        let state = &mut self.state;

        state.velocity_local = state.velocity.to_local(state.heading);
        let velocity_local = state.velocity_local;

        let loads = axle_loads(config, state.accel_local.x);
        state.slip = slip_angles(config, velocity_local, state.yaw_rate, state.steer_angle);
        let lateral = lateral_forces(config, &state.slip, &loads, inputs.ebrake);

        let brake = (inputs.brake * config.brake_force + inputs.ebrake * config.ebrake_force)
            .min(config.brake_force);

        state.engine_torque = config.torque_curve.torque_at(state.engine_rpm);
        let throttle = inputs.throttle * drive_force(config, state.engine_torque, state.gear);

        let traction = Vec2::new(throttle - brake * sign(velocity_local.x), 0.0);
        let drag = Vec2::new(
            -config.roll_resist * velocity_local.x
                - config.air_resist * velocity_local.x * velocity_local.x.abs(),
            -config.roll_resist * velocity_local.y
                - config.air_resist * velocity_local.y * velocity_local.y.abs(),
        );
        // Only the chassis-lateral part of the turned front wheel's force is kept
        let cornering = Vec2::new(0.0, state.steer_angle.cos() * lateral.front + lateral.rear);
        let total_force = drag + traction + cornering;

        state.accel_local = total_force / config.mass;
        state.accel = state.accel_local.to_world(state.heading);

        state.velocity += state.accel * delta_secs;
        state.speed = state.velocity.length();

        let mut yaw_torque =
            lateral.front * config.cg_to_front_axle - lateral.rear * config.cg_to_rear_axle;

        if state.speed < REST_SPEED_THRESHOLD && throttle == 0.0 {
            state.velocity = Vec2::ZERO;
            state.speed = 0.0;
            yaw_torque = 0.0;
            state.yaw_rate = 0.0;
        }

        let yaw_accel = yaw_torque / config.inertia();
        state.yaw_rate += yaw_accel * delta_secs;
        state.heading += state.yaw_rate * delta_secs;

        state.position += state.velocity * delta_secs;

        state.velocity_local = state.velocity.to_local(state.heading);
        self.refresh_engine();
    }

    /// Re-derive engine speed and torque from wheel speed and the current gear
    fn refresh_engine(&mut self) {
        let state = &mut self.state;
        state.engine_rpm = engine_rpm(&self.config, state.velocity_local.x, state.gear);
        state.engine_torque = self.config.torque_curve.torque_at(state.engine_rpm);
    }

    /// Shift one gear up; returns whether the gear changed
    pub fn shift_up(&mut self) -> bool {
        if self.state.gear + 1 >= self.config.gear_count() {
            return false;
        }
        self.state.gear += 1;
        self.refresh_engine();
        debug!("Shifted up to gear {}", self.state.gear + 1);
        true
    }

    /// Shift one gear down; returns whether the gear changed
    pub fn shift_down(&mut self) -> bool {
        if self.state.gear == 0 {
            return false;
        }
        self.state.gear -= 1;
        self.refresh_engine();
        debug!("Shifted down to gear {}", self.state.gear + 1);
        true
    }

    /// Select a gear by index, refusing indices outside the ratio table
    pub fn select_gear(&mut self, gear: usize) -> Result<()> {
        if gear >= self.config.gear_count() {
            warn!(
                "Refused gear {} (only {} gears)",
                gear,
                self.config.gear_count()
            );
            bail!(
                "gear index {} out of range, vehicle has {} gears",
                gear,
                self.config.gear_count()
            );
        }
        self.state.gear = gear;
        self.refresh_engine();
        debug!("Selected gear {}", gear + 1);
        Ok(())
    }

    pub fn speed_kmh(&self) -> f32 {
        self.state.speed * MPS_TO_KMH
    }

    pub fn gear_ratio(&self) -> f32 {
        self.config.gear_ratios[self.state.gear]
    }

    pub fn engine_torque(&self) -> f32 {
        self.state.engine_torque
    }

    pub fn engine_rpm(&self) -> f32 {
        self.state.engine_rpm
    }

    /// Get a one-line summary string for display
    pub fn summary(&self) -> String {
        let pose = format!(
            "pos=({:.1}, {:.1}) | heading={:.2}",
            self.state.position.x, self.state.position.y, self.state.heading
        );
        format!(
            "t={:.2}s | {pose} | speed={:.1} km/h | gear {} | {:.0} rpm | tracks={}",
            self.state.time,
            self.speed_kmh(),
            self.state.gear + 1,
            self.state.engine_rpm,
            self.tire_tracks.len()
        )
    }

    /// HUD readout, one value per line
    pub fn hud_lines(&self) -> Vec<String> {
        let state = &self.state;
        vec![
            format!("accel       = ({:.2}, {:.2})", state.accel.x, state.accel.y),
            format!(
                "accel_c     = ({:.2}, {:.2})",
                state.accel_local.x, state.accel_local.y
            ),
            format!(
                "velocity    = ({:.2}, {:.2})",
                state.velocity.x, state.velocity.y
            ),
            format!(
                "velocity_c  = ({:.2}, {:.2})",
                state.velocity_local.x, state.velocity_local.y
            ),
            format!("speed       = {:.2} km/h", self.speed_kmh()),
            format!("yaw_rate    = {:.2} rad/s", state.yaw_rate),
            format!("heading     = {:.2}", state.heading),
            format!("gear        = {} ({:.2})", state.gear + 1, self.gear_ratio()),
            format!("rpm         = {:.0}", state.engine_rpm),
            format!("torque      = {:.1} Nm", state.engine_torque),
        ]
    }
}
