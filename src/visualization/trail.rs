//! Capped position history for rendering body trails
//!
//! Trails are presentation metadata: the integrator never reads or
//! writes them. The driving loop records one point per integration
//! sub-step while running, and records nothing while paused

use std::collections::VecDeque;

use bevy::prelude::Resource;

use crate::simulation::states::{NVec2, System};

/// Minimum world-space distance between recorded points
pub const TRAIL_MIN_DIST: f64 = 0.05;
/// Maximum points kept per body; the oldest go first
pub const TRAIL_MAX_POINTS: usize = 150;

/// Recent positions of one body, oldest first
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: VecDeque<NVec2>,
}

impl Trail {
    /// Append `pos` if the trail is empty or `pos` is farther than
    /// [`TRAIL_MIN_DIST`] from the last recorded point, dropping the
    /// oldest point once [`TRAIL_MAX_POINTS`] would be exceeded
    pub fn record(&mut self, pos: NVec2) {
        if let Some(last) = self.points.back() {
            if (pos - last).norm() <= TRAIL_MIN_DIST {
                return;
            }
        }
        self.points.push_back(pos);
        if self.points.len() > TRAIL_MAX_POINTS {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in recording order, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &NVec2> {
        self.points.iter()
    }

    /// Most recently recorded point
    pub fn last(&self) -> Option<&NVec2> {
        self.points.back()
    }
}

/// One trail per body, in body-list order. Lives beside the `Scenario`
/// resource; the shell keeps it sized to the body list
#[derive(Resource, Debug, Default)]
pub struct Trails {
    trails: Vec<Trail>,
}

impl Trails {
    /// Empty trails for `n` bodies
    pub fn new(n: usize) -> Self {
        Self {
            trails: vec![Trail::default(); n],
        }
    }

    /// Record every body's current position. Call once per integration
    /// sub-step; skip entirely while paused
    pub fn record(&mut self, sys: &System) {
        debug_assert_eq!(self.trails.len(), sys.bodies.len());
        for (trail, body) in self.trails.iter_mut().zip(&sys.bodies) {
            trail.record(body.x);
        }
    }

    /// Drop all history and resize for `n` bodies
    pub fn reset(&mut self, n: usize) {
        self.trails.clear();
        self.trails.resize_with(n, Trail::default);
    }

    /// Drop everything, leaving no per-body trails at all
    pub fn clear(&mut self) {
        self.trails.clear();
    }

    /// Register one more body at the end of the list
    pub fn push_body(&mut self) {
        self.trails.push(Trail::default());
    }

    pub fn len(&self) -> usize {
        self.trails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trail> {
        self.trails.iter()
    }
}
