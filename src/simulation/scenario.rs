//! Build fully-initialized simulation scenarios
//!
//! A `Scenario` is the runtime bundle the viewer and the headless driver
//! consume:
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//! - active force set (`AccelSet`)
//!
//! Scenarios come from built-in presets or from a YAML-facing
//! `ScenarioConfig`; the config path validates its inputs, the presets
//! are known-good. In Bevy terms, this is inserted as a `Resource` and
//! then read by the integration and visualization systems

use bevy::prelude::Resource;

use anyhow::{ensure, Result};

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2, System};

/// Bevy resource representing a fully-initialized simulation scenario
#[derive(Resource)]
pub struct Scenario {
    pub parameters: Parameters,
    pub system: System,
    pub forces: AccelSet,
}

impl Scenario {
    /// Assemble a scenario from parameters and an initial body set.
    /// Every preset and the config path funnel through here so the
    /// force set is always wired the same way
    pub fn assemble(parameters: Parameters, bodies: Vec<Body>) -> Self {
        // Initial system state: bodies at t = 0
        let system = System {
            bodies,
            t: 0.0
        };

        // Forces: construct an AccelSet and register Newtonian gravity
        let forces = AccelSet::new().with(NewtonianGravity {
            G: parameters.G,
            eps2: parameters.eps2,
        });

        Self {
            parameters,
            system,
            forces,
        }
    }

    /// Build a scenario from a YAML-facing config, rejecting degenerate
    /// inputs here so the integrator never has to
    pub fn from_config(cfg: ScenarioConfig) -> Result<Self> {
        let p = cfg.parameters;
        ensure!(
            p.h0.is_finite() && p.h0 > 0.0,
            "step size h0 must be positive and finite, got {}",
            p.h0
        );
        ensure!(
            p.eps2.is_finite() && p.eps2 >= 0.0,
            "softening eps2 must be non-negative and finite, got {}",
            p.eps2
        );
        ensure!(p.steps_per_frame >= 1, "steps_per_frame must be at least 1");
        if p.eps2 == 0.0 {
            log::warn!("eps2 = 0: close encounters can produce huge accelerations");
        }

        // Bodies: map `BodyConfig` -> runtime `Body` using nalgebra vectors
        let mut bodies = Vec::with_capacity(cfg.bodies.len());
        for (i, bc) in cfg.bodies.iter().enumerate() {
            bodies.push(body_from_config(i, bc)?);
        }

        let parameters = Parameters {
            t_end: p.t_end,
            h0: p.h0,
            eps2: p.eps2,
            G: p.G,
            seed: p.seed,
            steps_per_frame: p.steps_per_frame,
        };

        Ok(Self::assemble(parameters, bodies))
    }

    /// Three equal masses chasing each other around the figure-eight
    /// choreography (Chenciner-Montgomery initial condition)
    pub fn figure_eight() -> Self {
        let x1 = NVec2::new(0.97000436, -0.24308753);
        // v3 is the full velocity of the middle body; the outer two get -v3/2
        let v3 = NVec2::new(-2.0 * 0.4662036850, -2.0 * 0.4323657300);
        let bodies = vec![
            Body { x: x1, v: -0.5 * v3, m: 1.0 },
            Body { x: -x1, v: -0.5 * v3, m: 1.0 },
            Body { x: NVec2::zeros(), v: v3, m: 1.0 },
        ];
        Self::assemble(Parameters::default(), bodies)
    }

    /// Burrau's Pythagorean problem: masses 3, 4, 5 at rest on the
    /// corners of a 3-4-5 right triangle. Produces violent close
    /// encounters; the softening keeps the forces finite
    pub fn pythagorean() -> Self {
        let bodies = vec![
            Body { x: NVec2::new(1.0, 3.0), v: NVec2::zeros(), m: 3.0 },
            Body { x: NVec2::new(-2.0, -1.0), v: NVec2::zeros(), m: 4.0 },
            Body { x: NVec2::new(1.0, -1.0), v: NVec2::zeros(), m: 5.0 },
        ];
        let parameters = Parameters {
            h0: 0.005,
            ..Parameters::default()
        };
        Self::assemble(parameters, bodies)
    }

    /// Two equal masses on a mutual near-circular orbit
    pub fn binary() -> Self {
        let eps2: f64 = 1.0e-4;
        // Circular speed about the barycenter at separation 1 with unit
        // masses and G = 1: v^2 / r_orbit = G m / (1 + eps2)^(3/2)
        let a_mag = 1.0 / (1.0 + eps2).sqrt().powi(3);
        let v = (0.5 * a_mag).sqrt();
        let bodies = vec![
            Body { x: NVec2::new(-0.5, 0.0), v: NVec2::new(0.0, -v), m: 1.0 },
            Body { x: NVec2::new(0.5, 0.0), v: NVec2::new(0.0, v), m: 1.0 },
        ];
        let parameters = Parameters {
            eps2,
            ..Parameters::default()
        };
        Self::assemble(parameters, bodies)
    }

    /// A heavier central body plus `n` light bodies scattered in an
    /// annulus with roughly circular tangential velocities.
    /// Deterministic for a given seed
    pub fn random_scatter(n: usize, seed: u64) -> Self {
        let parameters = Parameters {
            seed,
            ..Parameters::default()
        };
        let bodies = scatter_bodies(n, seed);
        Self::assemble(parameters, bodies)
    }
}

fn body_from_config(i: usize, bc: &BodyConfig) -> Result<Body> {
    ensure!(
        bc.m.is_finite() && bc.m > 0.0,
        "body {}: mass must be strictly positive and finite, got {}",
        i,
        bc.m
    );
    let finite = bc.x.iter().chain(bc.v.iter()).all(|c| c.is_finite());
    ensure!(finite, "body {}: non-finite position or velocity component", i);
    Ok(Body {
        x: NVec2::new(bc.x[0], bc.x[1]),
        v: NVec2::new(bc.v[0], bc.v[1]),
        m: bc.m,
    })
}

/// Scatter `n` light bodies around a heavier central body.
/// Radii are uniform-in-area over the annulus, speeds are circular for
/// the central mass alone (G = 1), direction tangential
pub fn scatter_bodies(n: usize, seed: u64) -> Vec<Body> {
    const CENTRAL_MASS: f64 = 8.0;
    const R_MIN: f64 = 1.0;
    const R_MAX: f64 = 3.0;

    let mut rng = fastrand::Rng::with_seed(seed);
    let mut bodies = Vec::with_capacity(n + 1);

    bodies.push(Body {
        x: NVec2::zeros(),
        v: NVec2::zeros(),
        m: CENTRAL_MASS,
    });

    for _ in 0..n {
        let angle = rng.f64() * std::f64::consts::TAU;
        let (sin, cos) = angle.sin_cos();
        let u = rng.f64();
        let radius = (R_MIN * R_MIN + u * (R_MAX * R_MAX - R_MIN * R_MIN)).sqrt();
        let speed = (CENTRAL_MASS / radius).sqrt();
        bodies.push(Body {
            x: NVec2::new(cos, sin) * radius,
            v: NVec2::new(-sin, cos) * speed,
            m: 0.01,
        });
    }

    bodies
}
