//! Core state types for the N-body simulation.
//!
//! Defines the 2D body/system structs used everywhere else:
//! - `Body` holds one body's position, velocity and mass
//! - `System` holds the ordered body list and the current simulation time `t`
//!
//! Body order is significant: it fixes the slot layout of the flattened
//! state vector, so it must not change while a step is in flight.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>, // ordered collection of bodies
    pub t: f64, // time
}
