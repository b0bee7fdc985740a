//! Fixed-step RK4 time integrator for the N-body system.
//!
//! One step flattens the bodies into a state vector, evaluates the
//! derivative four times (classical RK4 staging), combines the stages,
//! and writes the result back into the bodies in a single pass. The
//! step size is always `params.h0`: there is no error estimation and
//! no step-size control.

use super::forces::{derivatives, AccelSet};
use super::params::Parameters;
use super::states::System;
use super::statevec::StateVec;

/// Advance the system by one step of classical RK4.
/// Uses four derivative evaluations per step and updates positions,
/// velocities, and `sys.t` in-place based on `params.h0`.
pub fn rk4_step(sys: &mut System, forces: &AccelSet, params: &Parameters) {
    if sys.bodies.is_empty() { // no bodies, return
        return;
    }

    let dt = params.h0; // time step dt
    let half_dt = 0.5 * dt; // half step dt/2 used by the middle stages
    let t = sys.t;

    // Pack the current bodies into one flat vector. The bodies are not
    // touched again until the single write-back at the end.
    let s0 = StateVec::flatten(&sys.bodies);

    // k1: slope at the start of the step
    let k1 = derivatives(t, &s0, &*sys, forces);

    // k2: slope at the midpoint, after an Euler half-step along k1
    let s1 = s0.add_scaled(&k1, half_dt);
    let k2 = derivatives(t + half_dt, &s1, &*sys, forces);

    // k3: slope at the midpoint again, now along k2
    let s2 = s0.add_scaled(&k2, half_dt);
    let k3 = derivatives(t + half_dt, &s2, &*sys, forces);

    // k4: slope at the end of the step, after a full step along k3
    let s3 = s0.add_scaled(&k3, dt);
    let k4 = derivatives(t + dt, &s3, &*sys, forces);

    // Weighted combination:
    // s_next = s0 + (dt/6) * (k1 + 2 k2 + 2 k3 + k4)
    let sixth = dt / 6.0;
    let s_next = s0
        .add_scaled(&k1, sixth)
        .add_scaled(&k2, 2.0 * sixth)
        .add_scaled(&k3, 2.0 * sixth)
        .add_scaled(&k4, sixth);

    // Single write-back after the full combination; the intermediate
    // stage states never reach the bodies
    s_next.unflatten(&mut sys.bodies);

    // Increment the system time by one full step
    sys.t += dt;
}

/// Advance the system by `steps` fixed RK4 steps.
/// Batch API for callers without a frame loop (the headless driver and
/// tests); the viewer calls [`rk4_step`] directly so it can record a
/// trail point after every sub-step.
pub fn advance(sys: &mut System, forces: &AccelSet, params: &Parameters, steps: usize) {
    for _ in 0..steps {
        rk4_step(sys, forces, params);
    }
}
