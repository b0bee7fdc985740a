use std::time::Instant;
use crate::simulation::states::{Body, System, NVec2};
use crate::simulation::params::Parameters;
use crate::simulation::forces::{AccelSet, NewtonianGravity, derivatives};
use crate::simulation::integrator::rk4_step;
use crate::simulation::statevec::StateVec;

/// Helper to build a manual System of size `n`
fn make_system(n: usize) -> System {
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec2::new(
            (i_f * 0.37).sin() * 5.0,
            (i_f * 0.13).cos() * 5.0,
        );

        bodies.push(Body {
            x,
            v: NVec2::zeros(),
            m: 1.0,
        });
    }

    System { bodies, t: 0.0 }
}

/// Parameters shared by all benchmark runs
fn make_params() -> Parameters {
    Parameters {
        h0: 0.001,
        eps2: 1e-4,
        ..Parameters::default()
    }
}

/// Time single derivative evaluations for a range of N
pub fn bench_derivatives() {
    // Different system sizes to test
    let ns = [8, 16, 32, 64, 128, 256, 512, 1024];

    for n in ns {
        let sys = make_system(n);
        let params = make_params();
        let forces = AccelSet::new().with(NewtonianGravity {
            G: params.G,
            eps2: params.eps2,
        });
        let state = StateVec::flatten(&sys.bodies);

        // Warm up
        let _ = derivatives(0.0, &state, &sys, &forces);

        let t0 = Instant::now();
        let deriv = derivatives(0.0, &state, &sys, &forces);
        let dt = t0.elapsed().as_secs_f64();

        println!("N = {n:5}, derivatives = {dt:9.6} s, slots = {}", deriv.len());
    }
}

/// Benchmark the per-step cost of rk4_step for a range of N
/// Paste output directly into excel to graph
pub fn bench_rk4_curve() {
    println!("N,ms_per_step");

    for n in (8..=512).step_by(8) {
        // Small n: average over several steps to smooth noise
        // Large n: fewer steps to keep the runtime down
        let steps = if n <= 64 { 50 } else { 5 };

        let mut sys = make_system(n);
        let params = make_params();
        let forces = AccelSet::new().with(NewtonianGravity {
            G: params.G,
            eps2: params.eps2,
        });

        // Warm-up one step
        rk4_step(&mut sys, &forces, &params);

        let t0 = Instant::now();
        for _ in 0..steps {
            rk4_step(&mut sys, &forces, &params);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
}
