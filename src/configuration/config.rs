//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – numerical parameters and physical constants
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! parameters:
//!   t_end: 30.0             # headless run length in simulated time
//!   h0: 0.015               # fixed step size
//!   eps2: 0.1               # softening epsilon^2
//!   G: 1.0                  # gravitational constant
//!   seed: 42                # deterministic seed for random scatter
//!   steps_per_frame: 4      # integration sub-steps per rendered frame
//!
//! bodies:
//!   - x: [ -0.5, 0.0 ]
//!     v: [  0.0, 1.0 ]
//!     m: 1.0
//!   - x: [  0.5, 0.0 ]
//!     v: [  0.0, -1.0 ]
//!     m: 1.0
//! ```
//!
//! Every parameter has a default, so the `parameters:` block may be
//! partial or missing entirely. Validation (positive masses, positive
//! step size) happens when the config is turned into a runtime
//! `Scenario`, not here.

use serde::Deserialize;

use crate::simulation::params::Parameters;

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
#[allow(non_snake_case)]
#[serde(default)]
pub struct ParametersConfig {
    pub t_end: f64,   // headless run length in simulated time
    pub h0: f64,      // fixed time step size
    pub eps2: f64,    // softening - prevent singular forces at very small separations
    pub G: f64,       // gravitational constant
    pub seed: u64,    // deterministic seed to make scatter runs reproducable
    pub steps_per_frame: usize, // integration sub-steps per rendered frame
}

impl Default for ParametersConfig {
    fn default() -> Self {
        let p = Parameters::default();
        Self {
            t_end: p.t_end,
            h0: p.h0,
            eps2: p.eps2,
            G: p.G,
            seed: p.seed,
            steps_per_frame: p.steps_per_frame,
        }
    }
}

/// Configuration for a single body’s initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // Initial position vector `x` in simulation units
    pub v: [f64; 2], // Initial velocity vector `v` in simulation units per time unit
    pub m: f64,      // Mass of the body, strictly positive
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    pub bodies: Vec<BodyConfig>, // List of bodies that define the initial state of the system
}
