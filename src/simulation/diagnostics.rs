//! Conserved-quantity accounting for a system snapshot
//!
//! The potential uses the same additive softening as the force law, so
//! the total reported here is the invariant of the dynamics actually
//! integrated; its drift measures integrator error, not model error

use super::params::Parameters;
use super::states::{NVec2, System};

/// Kinetic energy: sum of (1/2) m |v|^2
pub fn kinetic_energy(sys: &System) -> f64 {
    sys.bodies.iter().map(|b| 0.5 * b.m * b.v.dot(&b.v)).sum()
}

/// Softened potential energy: sum over pairs of
/// -G m_i m_j / sqrt(|r|^2 + eps2)
pub fn potential_energy(sys: &System, params: &Parameters) -> f64 {
    let n = sys.bodies.len();
    let mut pe = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let r = sys.bodies[j].x - sys.bodies[i].x;
            let d = (r.dot(&r) + params.eps2).sqrt();
            pe -= params.G * sys.bodies[i].m * sys.bodies[j].m / d;
        }
    }
    pe
}

/// Total energy, kinetic plus softened potential
pub fn total_energy(sys: &System, params: &Parameters) -> f64 {
    kinetic_energy(sys) + potential_energy(sys, params)
}

/// Total linear momentum: sum of m v
pub fn total_momentum(sys: &System) -> NVec2 {
    sys.bodies.iter().map(|b| b.m * b.v).sum()
}

/// Total angular momentum about the origin, the z component of
/// m (x cross v) in 2D
pub fn angular_momentum(sys: &System) -> f64 {
    sys.bodies
        .iter()
        .map(|b| b.m * (b.x.x * b.v.y - b.x.y * b.v.x))
        .sum()
}
