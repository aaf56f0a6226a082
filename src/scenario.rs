//! Scripted drivers for the headless runner
//!
//! Stand-ins for a human at the keyboard: each scenario maps simulated
//! time to digital controls.

use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use car_sim::simulation::Inputs;

/// How often the random driver changes its mind (s)
const RANDOM_HOLD_SECS: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Full throttle in a straight line
    Accelerate,
    /// Build up speed, then hold right steer
    Corner,
    /// Build up speed, then brake to a stop
    Brake,
    /// Build up speed, then yank the e-brake while steering left
    HandbrakeTurn,
    /// Alternate left and right under throttle
    Slalom,
    /// Random controls from a seeded generator
    Random,
}

/// Produces the controls for each tick of a scenario
pub struct ScriptedDriver {
    scenario: Scenario,
    rng: StdRng,
    held: Inputs,
    next_change: f32,
}

impl ScriptedDriver {
    pub fn new(scenario: Scenario, seed: u64) -> Self {
        Self {
            scenario,
            rng: StdRng::seed_from_u64(seed),
            held: Inputs::default(),
            next_change: 0.0,
        }
    }

    /// Controls to apply at simulated time `time`
    pub fn inputs(&mut self, time: f32) -> Inputs {
        match self.scenario {
            Scenario::Accelerate => Inputs::from_digital(false, false, true, false, false),
            Scenario::Corner => {
                let turning = time >= 3.0;
                Inputs::from_digital(false, turning, true, false, false)
            }
            Scenario::Brake => {
                let braking = time >= 4.0;
                Inputs::from_digital(false, false, !braking, braking, false)
            }
            Scenario::HandbrakeTurn => {
                let sliding = (3.0..4.0).contains(&time);
                Inputs::from_digital(sliding, false, !sliding, false, sliding)
            }
            Scenario::Slalom => {
                if time < 2.0 {
                    return Inputs::from_digital(false, false, true, false, false);
                }
                let phase = ((time - 2.0) / 1.5) as u32;
                let left = phase % 2 == 0;
                Inputs::from_digital(left, !left, true, false, false)
            }
            Scenario::Random => {
                if time >= self.next_change {
                    self.held = Inputs::from_digital(
                        self.rng.random_bool(0.3),
                        self.rng.random_bool(0.3),
                        self.rng.random_bool(0.7),
                        self.rng.random_bool(0.1),
                        self.rng.random_bool(0.05),
                    );
                    self.next_change = time + RANDOM_HOLD_SECS;
                }
                self.held
            }
        }
    }
}
