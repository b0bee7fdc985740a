pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, System, NVec2};
pub use simulation::statevec::StateVec;
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity, derivatives};
pub use simulation::integrator::{rk4_step, advance};
pub use simulation::params::Parameters;
pub use simulation::scenario::Scenario;
pub use simulation::diagnostics::{kinetic_energy, potential_energy, total_energy, total_momentum, angular_momentum};

pub use configuration::config::{ParametersConfig, BodyConfig, ScenarioConfig};

pub use visualization::gravsim_vis2d::run_2d;
pub use visualization::trail::{Trail, Trails, TRAIL_MIN_DIST, TRAIL_MAX_POINTS};

pub use benchmark::benchmark::{bench_derivatives, bench_rk4_curve};
