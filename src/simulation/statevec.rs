//! Flattened state-vector representation of the whole system.
//!
//! `StateVec` packs every body's position and velocity into one flat
//! `Vec<f64>`. The four slots starting at index `4 * i` belong to body
//! `i`, in body-list order:
//!
//! ```text
//! [pos.x, pos.y, vel.x, vel.y]
//! ```
//!
//! Flatten -> unflatten is lossless and order-preserving. This module
//! owns only the packing contract; no physics lives here.

use super::states::{Body, NVec2};

#[derive(Debug, Clone, PartialEq)]
pub struct StateVec {
    data: Vec<f64>,
}

impl StateVec {
    /// Pack `bodies` into a flat vector, 4 slots per body.
    pub fn flatten(bodies: &[Body]) -> Self {
        let mut data = Vec::with_capacity(4 * bodies.len());
        for b in bodies {
            data.push(b.x.x);
            data.push(b.x.y);
            data.push(b.v.x);
            data.push(b.v.y);
        }
        Self { data }
    }

    /// All-zero vector with room for `n` bodies.
    pub fn zeroed(n: usize) -> Self {
        Self { data: vec![0.0; 4 * n] }
    }

    /// Write positions and velocities back into `bodies`, in order.
    ///
    /// Called exactly once per integration step, after the stage
    /// combination; intermediate stage states are never written back.
    pub fn unflatten(&self, bodies: &mut [Body]) {
        debug_assert_eq!(self.data.len(), 4 * bodies.len());
        for (i, b) in bodies.iter_mut().enumerate() {
            b.x = NVec2::new(self.data[4 * i], self.data[4 * i + 1]);
            b.v = NVec2::new(self.data[4 * i + 2], self.data[4 * i + 3]);
        }
    }

    /// Number of bodies represented (slot count / 4).
    pub fn body_count(&self) -> usize {
        self.data.len() / 4
    }

    /// Total slot count; always a multiple of 4.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Position of body `i`.
    pub fn pos(&self, i: usize) -> NVec2 {
        NVec2::new(self.data[4 * i], self.data[4 * i + 1])
    }

    /// Velocity of body `i`.
    pub fn vel(&self, i: usize) -> NVec2 {
        NVec2::new(self.data[4 * i + 2], self.data[4 * i + 3])
    }

    pub fn set_pos(&mut self, i: usize, p: NVec2) {
        self.data[4 * i] = p.x;
        self.data[4 * i + 1] = p.y;
    }

    pub fn set_vel(&mut self, i: usize, v: NVec2) {
        self.data[4 * i + 2] = v.x;
        self.data[4 * i + 3] = v.y;
    }

    /// Component-wise `self + h * k`, the only arithmetic RK4 needs:
    /// every stage state and the final combination are built from it.
    pub fn add_scaled(&self, k: &StateVec, h: f64) -> StateVec {
        debug_assert_eq!(self.data.len(), k.data.len());
        let data = self
            .data
            .iter()
            .zip(&k.data)
            .map(|(s, d)| s + h * d)
            .collect();
        StateVec { data }
    }

    /// Raw slot view, mostly for layout assertions in tests.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
