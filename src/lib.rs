//! Car Simulation Library
//!
//! A planar vehicle dynamics model that can be driven headless or by any
//! external renderer.

pub mod simulation;
