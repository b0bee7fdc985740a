//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed integration step size and headless end time,
//! - softening and gravitational constant (`eps2`, `G`),
//! - sub-steps per rendered frame and the scatter seed

#[derive(Debug, Clone)]
#[allow(non_snake_case)]
pub struct Parameters {
    pub t_end: f64, // headless run length in simulated time
    pub h0: f64, // fixed step size
    pub eps2: f64, // softening added to squared separations
    pub G: f64, // gravitational constant
    pub seed: u64, // deterministic seed for random scatter
    pub steps_per_frame: usize, // fixed sub-steps per rendered frame
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            t_end: 30.0,
            h0: 0.015,
            eps2: 0.1,
            G: 1.0,
            seed: 42,
            steps_per_frame: 4,
        }
    }
}
