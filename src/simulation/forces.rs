//! Force / acceleration contributors and the state derivative.
//!
//! Defines the acceleration trait and softened Newtonian gravity, plus
//! [`derivatives`], which maps a flattened state to its time derivative
//! (velocity pass-through + summed accelerations).

use crate::simulation::states::{NVec2, System};
use crate::simulation::statevec::StateVec;

/// Collection of acceleration terms (gravity, drag, etc.)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations at time `t` for all bodies
    /// - positions come from `state`, masses from `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, t: f64, state: &StateVec, sys: &System, out: &mut [NVec2]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        // Iterate over all acceleration contributors
        for term in &self.terms {
            term.acceleration(t, state, sys, out);
        }
    }
}

/// Trait for acceleration sources
/// Implementations add their contribution into `out[i]` for each body.
/// Positions must be read from `state`: during the middle stages of an
/// RK4 step the bodies in `sys` still hold the pre-step state, and only
/// the masses are taken from them
pub trait Acceleration {
    fn acceleration(&self, t: f64, state: &StateVec, sys: &System, out: &mut [NVec2]);
}

/// Newtonian gravity with additive softening
/// `eps2` is added to the squared separation of every pair, at every
/// separation, so the denominator can never reach zero. Close passes
/// trade accuracy for bounded accelerations
#[allow(non_snake_case)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub eps2: f64, // softening added to the squared separation
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, _t: f64, state: &StateVec, sys: &System, out: &mut [NVec2]) {
        let n = state.body_count();
        if n == 0 { // No bodies, return
            return;
        }

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            let xi = state.pos(i);    // position of body i (stage position)
            let mi = sys.bodies[i].m; // mass of body i

            for j in (i + 1)..n {
                let xj = state.pos(j);    // position of body j
                let mj = sys.bodies[j].m; // mass of body j

                // r is the displacement vector from i to j
                // If r points from i to j, then i feels a pull along +r,
                // j feels a pull along -r
                let r = xj - xi;

                // Softened squared distance:
                // d2 = |r|^2 + eps2
                // eps2 > 0 keeps this positive even for coincident bodies
                let d2 = r.dot(&r) + self.eps2;

                // 1 / |r_soft|
                let inv_r = d2.sqrt().recip();

                // 1 / |r_soft|^3
                // (this is what appears in the Newtonian acceleration formula:
                //   a = r / |r|^3
                //   => a = r * (1 / |r|^3) )
                let inv_r3 = inv_r * inv_r * inv_r;

                // Combine G and the distance factor:
                // coef = G / |r_soft|^3
                let coef = self.G * inv_r3;

                // -------------------------
                // Apply Newton's law:
                // a_i +=  G * m_j * r / |r_soft|^3
                // a_j += -G * m_i * r / |r_soft|^3
                // (equal and opposite)
                // -------------------------
                out[i] += coef * mj * r;
                out[j] -= coef * mi * r;
            }
        }
    }
}

/// Time derivative of a flattened state at time `t`
///
/// The result uses the same slot layout as the input:
/// - position slots receive the body's velocity (dx/dt = v)
/// - velocity slots receive the summed acceleration (dv/dt = a)
pub fn derivatives(t: f64, state: &StateVec, sys: &System, forces: &AccelSet) -> StateVec {
    let n = state.body_count();
    let mut deriv = StateVec::zeroed(n);

    // dx/dt and dy/dt come straight out of the velocity slots
    for i in 0..n {
        deriv.set_pos(i, state.vel(i));
    }

    // dvx/dt and dvy/dt come from the force set
    let mut acc = vec![NVec2::zeros(); n];
    forces.accumulate_accels(t, state, sys, &mut acc);
    for (i, a) in acc.iter().enumerate() {
        deriv.set_vel(i, *a);
    }

    deriv
}
