use gravsim::simulation::states::{Body, System, NVec2};
use gravsim::simulation::statevec::StateVec;
use gravsim::simulation::params::Parameters;
use gravsim::simulation::forces::{AccelSet, NewtonianGravity, derivatives};
use gravsim::simulation::integrator::{rk4_step, advance};
use gravsim::simulation::scenario::{scatter_bodies, Scenario};
use gravsim::simulation::diagnostics::{angular_momentum, total_energy, total_momentum};
use gravsim::configuration::config::{BodyConfig, ParametersConfig, ScenarioConfig};
use gravsim::visualization::trail::{Trail, Trails, TRAIL_MAX_POINTS, TRAIL_MIN_DIST};

/// Build a simple 2-body System separated along the x-axis
pub fn two_body_system(dist: f64, m1: f64, m2: f64) -> System {
    let b1 = Body {
        x: [-dist / 2.0, 0.0].into(),
        v: [0.0, 0.0].into(),
        m: m1,
    };
    let b2 = Body {
        x: [dist / 2.0, 0.0].into(),
        v: [0.0, 0.0].into(),
        m: m2,
    };
    System {
        bodies: vec![b1, b2],
        t: 0.0,
    }
}

/// Default physics parameters for tests
pub fn test_params() -> Parameters {
    Parameters {
        t_end: 1.0,
        h0: 0.001,
        eps2: 0.0,
        G: 1.0,
        seed: 42,
        steps_per_frame: 4,
    }
}

/// Build a gravity term + AccelSet
pub fn gravity_set(p: &Parameters) -> AccelSet {
    AccelSet::new().with(NewtonianGravity {
        G: p.G,
        eps2: p.eps2,
    })
}

/// Accelerations of `sys` at its current state
pub fn accels(sys: &System, p: &Parameters) -> Vec<NVec2> {
    let forces = gravity_set(p);
    let state = StateVec::flatten(&sys.bodies);
    let mut acc = vec![Default::default(); sys.bodies.len()];
    forces.accumulate_accels(sys.t, &state, sys, &mut acc);
    acc
}

// ==================================================================================
// State vector tests
// ==================================================================================

#[test]
fn statevec_layout_is_pos_then_vel_per_body() {
    let bodies = vec![
        Body { x: [1.0, 2.0].into(), v: [3.0, 4.0].into(), m: 1.0 },
        Body { x: [5.0, 6.0].into(), v: [7.0, 8.0].into(), m: 2.0 },
    ];
    let s = StateVec::flatten(&bodies);

    assert_eq!(s.len(), 8);
    assert_eq!(s.body_count(), 2);
    assert_eq!(s.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    assert_eq!(s.pos(1), NVec2::new(5.0, 6.0));
    assert_eq!(s.vel(1), NVec2::new(7.0, 8.0));
}

#[test]
fn statevec_round_trip_is_exact() {
    let bodies = vec![
        Body { x: [0.97000436, -0.24308753].into(), v: [0.466203685, 0.43236573].into(), m: 1.5 },
        Body { x: [-2.0, -1.0].into(), v: [1e-9, -3.7].into(), m: 4.0 },
        Body { x: [0.0, 0.0].into(), v: [0.0, 0.0].into(), m: 5.0 },
    ];

    let mut back = bodies.clone();
    for b in back.iter_mut() {
        b.x = NVec2::zeros();
        b.v = NVec2::zeros();
    }

    StateVec::flatten(&bodies).unflatten(&mut back);

    for (orig, round) in bodies.iter().zip(back.iter()) {
        assert_eq!(orig.x, round.x);
        assert_eq!(orig.v, round.v);
    }
}

#[test]
fn statevec_add_scaled_is_componentwise() {
    let s = StateVec::flatten(&[Body { x: [1.0, 2.0].into(), v: [3.0, 4.0].into(), m: 1.0 }]);
    let k = StateVec::flatten(&[Body { x: [10.0, 20.0].into(), v: [30.0, 40.0].into(), m: 1.0 }]);

    let out = s.add_scaled(&k, 0.5);
    assert_eq!(out.as_slice(), &[6.0, 12.0, 18.0, 24.0]);
}

#[test]
fn derivative_matches_state_layout() {
    let sys = two_body_system(2.0, 1.0, 3.0);
    let p = test_params();
    let forces = gravity_set(&p);

    let mut state = StateVec::flatten(&sys.bodies);
    state.set_vel(0, NVec2::new(0.5, -0.25));

    let deriv = derivatives(sys.t, &state, &sys, &forces);

    // Same slot count, position slots carry the velocities
    assert_eq!(deriv.len(), state.len());
    assert_eq!(deriv.pos(0), state.vel(0));
    assert_eq!(deriv.pos(1), state.vel(1));
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let sys = two_body_system(1.0, 2.0, 3.0);
    let p = test_params();
    let acc = accels(&sys, &p);

    let net = acc[0] * sys.bodies[0].m + acc[1] * sys.bodies[1].m;

    assert!(net.norm() < 1e-12, "Net momentum not zero: {:?}", net);
}

#[test]
fn gravity_points_toward_other_body() {
    let sys = two_body_system(2.0, 1.0, 1.0);
    let p = test_params();
    let acc = accels(&sys, &p);

    let dx = sys.bodies[1].x - sys.bodies[0].x;

    // Should point in same direction as +dx (attraction)
    assert!(dx.norm() > 0.0);
    assert!(acc[0].dot(&dx) > 0.0, "Acceleration is not toward second body");
}

#[test]
fn gravity_inverse_square_law() {
    let p = test_params();
    let acc_r = accels(&two_body_system(1.0, 1.0, 1.0), &p);
    let acc_2r = accels(&two_body_system(2.0, 1.0, 1.0), &p);

    let ratio = acc_r[0].norm() / acc_2r[0].norm();

    assert!((ratio - 4.0).abs() < 1e-3, "Expected ~4x, got {}", ratio);
}

#[test]
fn gravity_softening_prevents_blowup() {
    let mut p = test_params();
    p.eps2 = 0.1;

    // Nearly coincident pair: unsoftened this would be ~1e18
    let sys = two_body_system(1e-9, 1.0, 1.0);
    let acc = accels(&sys, &p);

    assert!(acc[0].norm().is_finite());
    assert!(
        acc[0].norm() <= p.G * 1.0 / p.eps2.powf(1.5),
        "Softening failed; acceleration too large: {}",
        acc[0].norm()
    );
}

#[test]
fn gravity_coincident_bodies_stay_finite() {
    let mut p = test_params();
    p.eps2 = 0.1;

    let sys = two_body_system(0.0, 1.0, 1.0);
    let acc = accels(&sys, &p);

    // Displacement is exactly zero, so the force is too, but finite
    assert_eq!(acc[0], NVec2::zeros());
    assert_eq!(acc[1], NVec2::zeros());
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn rk4_step_on_empty_system_is_a_noop() {
    let mut sys = System { bodies: vec![], t: 0.0 };
    let p = test_params();
    let forces = gravity_set(&p);

    rk4_step(&mut sys, &forces, &p);

    assert!(sys.bodies.is_empty());
    assert_eq!(sys.t, 0.0);
}

#[test]
fn rk4_single_body_moves_in_a_straight_line() {
    let mut sys = System {
        bodies: vec![Body { x: [1.0, 2.0].into(), v: [0.5, -0.25].into(), m: 1.0 }],
        t: 0.0,
    };
    let p = Parameters { h0: 0.01, ..test_params() };
    let forces = gravity_set(&p);

    advance(&mut sys, &forces, &p, 100);

    // One isolated body feels no force: x(t) = x0 + v t, v constant
    let b = &sys.bodies[0];
    assert!((sys.t - 1.0).abs() < 1e-12);
    assert!((b.x - NVec2::new(1.5, 1.75)).norm() < 1e-9, "Drifted off line: {:?}", b.x);
    assert!((b.v - NVec2::new(0.5, -0.25)).norm() < 1e-12);
}

#[test]
fn rk4_head_on_pair_stays_symmetric() {
    let mut sys = two_body_system(2.0, 1.0, 1.0);
    let p = Parameters { h0: 0.01, eps2: 0.1, ..test_params() };
    let forces = gravity_set(&p);

    advance(&mut sys, &forces, &p, 50);

    // Mirror-image setup must collapse along the axis symmetrically
    let (b1, b2) = (&sys.bodies[0], &sys.bodies[1]);
    assert!((b1.x + b2.x).norm() < 1e-12, "Asymmetric positions: {:?} {:?}", b1.x, b2.x);
    assert!((b1.v + b2.v).norm() < 1e-12, "Asymmetric velocities");
    assert_eq!(b1.x.y, 0.0);
    assert_eq!(b2.x.y, 0.0);
}

#[test]
fn rk4_runs_are_deterministic() {
    let run = || {
        let mut s = Scenario::pythagorean();
        let Scenario { system, parameters, forces } = &mut s;
        advance(system, forces, parameters, 400);
        StateVec::flatten(&system.bodies)
    };

    // Same inputs, bitwise-identical trajectories
    assert_eq!(run(), run());
}

#[test]
fn figure_eight_energy_drift_stays_below_one_percent() {
    let mut s = Scenario::figure_eight();
    let Scenario { system, parameters, forces } = &mut s;

    let e0 = total_energy(system, parameters);
    advance(system, forces, parameters, 600);
    let e1 = total_energy(system, parameters);

    let drift = (e1 - e0).abs() / e0.abs();
    assert!(drift < 0.01, "Energy drift too large: {:.3e}", drift);
}

#[test]
fn figure_eight_momentum_stays_near_zero() {
    let mut s = Scenario::figure_eight();
    let Scenario { system, parameters, forces } = &mut s;

    assert!(total_momentum(system).norm() < 1e-12);

    advance(system, forces, parameters, 600);

    assert!(
        total_momentum(system).norm() < 1e-9,
        "Momentum drifted: {:?}",
        total_momentum(system)
    );
}

// ==================================================================================
// Diagnostics tests
// ==================================================================================

#[test]
fn energy_matches_hand_computed_values() {
    let mut sys = two_body_system(2.0, 2.0, 3.0);
    sys.bodies[0].v = NVec2::new(1.0, 0.0);
    sys.bodies[1].v = NVec2::new(0.0, -2.0);

    let p = test_params();

    // KE = 0.5*2*1 + 0.5*3*4 = 7, PE = -2*3/2 = -3 (eps2 = 0)
    let e = total_energy(&sys, &p);
    assert!((e - 4.0).abs() < 1e-12, "Expected 4, got {}", e);
}

#[test]
fn angular_momentum_of_single_orbiting_body() {
    let sys = System {
        bodies: vec![Body { x: [1.0, 0.0].into(), v: [0.0, 2.0].into(), m: 3.0 }],
        t: 0.0,
    };

    // L = m (x vy - y vx) = 3 * (1*2 - 0*0)
    assert!((angular_momentum(&sys) - 6.0).abs() < 1e-12);
}

// ==================================================================================
// Trail tests
// ==================================================================================

#[test]
fn trail_records_first_point_unconditionally() {
    let mut trail = Trail::default();
    trail.record(NVec2::new(0.3, 0.4));

    assert_eq!(trail.len(), 1);
    assert_eq!(trail.last(), Some(&NVec2::new(0.3, 0.4)));
}

#[test]
fn trail_skips_points_within_min_distance() {
    let mut trail = Trail::default();
    trail.record(NVec2::new(0.0, 0.0));
    trail.record(NVec2::new(0.03, 0.0)); // too close
    trail.record(NVec2::new(0.04, 0.0)); // still too close to (0, 0)
    trail.record(NVec2::new(TRAIL_MIN_DIST, 0.0)); // exactly at threshold, not farther
    assert_eq!(trail.len(), 1);

    trail.record(NVec2::new(0.06, 0.0));
    assert_eq!(trail.len(), 2);
    assert_eq!(trail.last(), Some(&NVec2::new(0.06, 0.0)));
}

#[test]
fn trail_caps_history_and_drops_oldest() {
    let mut trail = Trail::default();
    let total = 2 * TRAIL_MAX_POINTS;
    for k in 0..total {
        trail.record(NVec2::new(k as f64 * 0.1, 0.0));
    }

    assert_eq!(trail.len(), TRAIL_MAX_POINTS);

    // Oldest surviving point is the one recorded `TRAIL_MAX_POINTS` ago
    let first_kept = (total - TRAIL_MAX_POINTS) as f64 * 0.1;
    assert_eq!(trail.iter().next(), Some(&NVec2::new(first_kept, 0.0)));
    assert_eq!(trail.last(), Some(&NVec2::new((total - 1) as f64 * 0.1, 0.0)));
}

#[test]
fn trails_track_stepped_bodies() {
    let mut sys = System {
        bodies: vec![Body { x: [0.0, 0.0].into(), v: [2.0, 0.0].into(), m: 1.0 }],
        t: 0.0,
    };
    // 0.1 world units per step, always beyond the recording threshold
    let p = Parameters { h0: 0.05, ..test_params() };
    let forces = gravity_set(&p);
    let mut trails = Trails::new(1);

    for _ in 0..10 {
        rk4_step(&mut sys, &forces, &p);
        trails.record(&sys);
    }

    let trail = trails.iter().next().unwrap();
    assert_eq!(trail.len(), 10);
    assert_eq!(trail.last(), Some(&sys.bodies[0].x));
}

#[test]
fn trails_reset_and_grow_with_body_list() {
    let mut trails = Trails::new(2);
    assert_eq!(trails.len(), 2);

    trails.push_body();
    assert_eq!(trails.len(), 3);

    trails.clear();
    assert!(trails.is_empty());

    trails.reset(5);
    assert_eq!(trails.len(), 5);
    assert!(trails.iter().all(|t| t.is_empty()));
}

// ==================================================================================
// Scenario and config tests
// ==================================================================================

#[test]
fn yaml_scenario_parses_with_partial_parameters() {
    let yaml = r#"
parameters:
  h0: 0.01
  eps2: 0.05
bodies:
  - x: [ 1.0, 3.0 ]
    v: [ 0.0, 0.0 ]
    m: 3.0
  - x: [ -2.0, -1.0 ]
    v: [ 0.5, -0.5 ]
    m: 4.0
"#;

    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.parameters.h0, 0.01);
    assert_eq!(cfg.parameters.eps2, 0.05);
    // Omitted fields fall back to defaults
    assert_eq!(cfg.parameters.G, 1.0);
    assert_eq!(cfg.parameters.steps_per_frame, 4);

    let scenario = Scenario::from_config(cfg).unwrap();
    assert_eq!(scenario.system.bodies.len(), 2);
    assert_eq!(scenario.system.t, 0.0);
    assert_eq!(scenario.system.bodies[1].v, NVec2::new(0.5, -0.5));
}

#[test]
fn config_rejects_nonpositive_mass() {
    let cfg = ScenarioConfig {
        parameters: ParametersConfig::default(),
        bodies: vec![BodyConfig { x: [0.0, 0.0], v: [0.0, 0.0], m: 0.0 }],
    };

    let err = Scenario::from_config(cfg).err().expect("config should be rejected");
    assert!(err.to_string().contains("mass"), "Unexpected error: {err}");
}

#[test]
fn config_rejects_nonpositive_step_size() {
    let cfg = ScenarioConfig {
        parameters: ParametersConfig { h0: 0.0, ..Default::default() },
        bodies: vec![BodyConfig { x: [0.0, 0.0], v: [0.0, 0.0], m: 1.0 }],
    };

    assert!(Scenario::from_config(cfg).is_err());
}

#[test]
fn config_rejects_zero_steps_per_frame() {
    let cfg = ScenarioConfig {
        parameters: ParametersConfig { steps_per_frame: 0, ..Default::default() },
        bodies: vec![],
    };

    assert!(Scenario::from_config(cfg).is_err());
}

#[test]
fn figure_eight_preset_is_momentum_free() {
    let s = Scenario::figure_eight();

    assert_eq!(s.system.bodies.len(), 3);
    assert!(s.system.bodies.iter().all(|b| b.m == 1.0));
    assert!(total_momentum(&s.system).norm() < 1e-12);
}

#[test]
fn pythagorean_preset_matches_burrau_setup() {
    let s = Scenario::pythagorean();

    let ms: Vec<f64> = s.system.bodies.iter().map(|b| b.m).collect();
    assert_eq!(ms, vec![3.0, 4.0, 5.0]);
    assert!(s.system.bodies.iter().all(|b| b.v == NVec2::zeros()));
    assert_eq!(s.system.bodies[0].x, NVec2::new(1.0, 3.0));
}

#[test]
fn binary_preset_is_symmetric() {
    let s = Scenario::binary();

    assert_eq!(s.system.bodies.len(), 2);
    assert!(total_momentum(&s.system).norm() < 1e-12);
    assert_eq!(s.system.bodies[0].x, -s.system.bodies[1].x);
}

#[test]
fn random_scatter_is_deterministic_per_seed() {
    let a = scatter_bodies(16, 7);
    let b = scatter_bodies(16, 7);
    let c = scatter_bodies(16, 8);

    assert_eq!(a.len(), 17); // central body + 16 scattered
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.x, y.x);
        assert_eq!(x.v, y.v);
    }
    assert!(
        a.iter().zip(c.iter()).any(|(x, y)| x.x != y.x),
        "Different seeds produced identical layouts"
    );
}

#[test]
fn scatter_runs_are_reproducible_end_to_end() {
    let run = || {
        let mut s = Scenario::random_scatter(12, 99);
        let Scenario { system, parameters, forces } = &mut s;
        advance(system, forces, parameters, 50);
        StateVec::flatten(&system.bodies)
    };

    assert_eq!(run(), run());
}
