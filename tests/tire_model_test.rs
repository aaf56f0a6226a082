//! Tire force and weight transfer tests

use car_sim::simulation::{
    axle_loads, lateral_force, lateral_forces, rear_grip, slip_angles, AxleLoads, SlipAngles, Vec2,
    VehicleConfig,
};

#[test]
fn test_static_loads_share_the_weight() {
    let config = VehicleConfig::default();
    let loads = axle_loads(&config, 0.0);
    let weight = config.mass * config.gravity;

    assert!((loads.total() - weight).abs() < 1e-2);
    assert!(
        (config.axle_weight_ratio_front() + config.axle_weight_ratio_rear() - 1.0).abs() < 1e-6
    );
}

#[test]
fn test_acceleration_moves_load_rearwards() {
    let config = VehicleConfig::default();
    let still = axle_loads(&config, 0.0);
    let accelerating = axle_loads(&config, 5.0);
    let braking = axle_loads(&config, -5.0);

    assert!(accelerating.front < still.front);
    assert!(accelerating.rear > still.rear);
    assert!(braking.front > still.front);
    assert!(braking.rear < still.rear);

    let transfer = config.weight_transfer * 5.0 * config.cg_height / config.wheelbase();
    assert!((still.front - accelerating.front - transfer).abs() < 1e-3);
    assert!((accelerating.total() - still.total()).abs() < 1e-2);
}

#[test]
fn test_no_slip_when_rolling_straight() {
    let config = VehicleConfig::default();
    let slip = slip_angles(&config, Vec2::new(20.0, 0.0), 0.0, 0.0);
    assert_eq!(slip.front, 0.0);
    assert_eq!(slip.rear, 0.0);
}

#[test]
fn test_steering_offsets_front_slip() {
    let config = VehicleConfig::default();

    let forward = slip_angles(&config, Vec2::new(20.0, 0.0), 0.0, 0.3);
    assert!((forward.front + 0.3).abs() < 1e-6);
    assert_eq!(forward.rear, 0.0);

    // Reversing flips the effect of the turned wheels
    let reverse = slip_angles(&config, Vec2::new(-20.0, 0.0), 0.0, 0.3);
    assert!((reverse.front - 0.3).abs() < 1e-6);
}

#[test]
fn test_yaw_rate_slips_axles_in_opposite_directions() {
    let config = VehicleConfig::default();
    let slip = slip_angles(&config, Vec2::new(20.0, 0.0), 0.5, 0.0);
    assert!(slip.front > 0.0);
    assert!(slip.rear < 0.0);
}

#[test]
fn test_lateral_force_saturates_at_grip() {
    let linear = lateral_force(5.0, 0.1, 2.0, 1000.0);
    assert!((linear + 500.0).abs() < 1e-3);

    assert_eq!(lateral_force(5.0, 1.0, 2.0, 1000.0), -2000.0);
    assert_eq!(lateral_force(5.0, -1.0, 2.0, 1000.0), 2000.0);
}

#[test]
fn test_ebrake_only_reduces_rear_grip() {
    let config = VehicleConfig::default();
    assert_eq!(rear_grip(&config, 0.0), config.tire_grip);
    assert!((rear_grip(&config, 1.0) - config.tire_grip * config.lock_grip).abs() < 1e-6);

    let slip = SlipAngles {
        front: 1.0,
        rear: 1.0,
    };
    let loads = AxleLoads {
        front: 4000.0,
        rear: 4000.0,
    };
    let rolling = lateral_forces(&config, &slip, &loads, 0.0);
    let locked = lateral_forces(&config, &slip, &loads, 1.0);

    assert_eq!(rolling.front, locked.front);
    assert!(locked.rear.abs() < rolling.rear.abs());
}
