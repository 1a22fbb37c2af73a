//! Interpolation.
//!
//! The server produces discrete snapshots at tick boundaries.
//! The renderer draws at its own rate and interpolates mover positions.

use std::collections::VecDeque;

use standin_shared::{
    entity::MoverId,
    math::Vec2,
    net::WorldSnapshot,
};

/// Buffered snapshot history for interpolation.
#[derive(Default)]
pub struct SnapshotBuffer {
    history: VecDeque<WorldSnapshot>,
    max: usize,
}

impl SnapshotBuffer {
    pub fn new(max: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(max),
            max,
        }
    }

    pub fn push(&mut self, snap: WorldSnapshot) {
        self.history.push_back(snap);
        while self.history.len() > self.max {
            self.history.pop_front();
        }
    }

    /// Returns the number of buffered snapshots.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Returns true if no snapshots are buffered.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Gets an interpolated position for a mover given a fractional alpha.
    ///
    /// `alpha` should be in $[0,1]$ where 0 = older snapshot, 1 = newer.
    /// A mover that wrapped around an edge between the two snapshots is
    /// drawn at its newer position rather than sliding across the world.
    pub fn interp_mover(&self, id: MoverId, alpha: f32) -> Option<Vec2> {
        if self.history.len() < 2 {
            return None;
        }
        let a = &self.history[self.history.len() - 2];
        let b = &self.history[self.history.len() - 1];

        let pa = a.find_mover(id).map(|m| m.position);
        let pb = b.find_mover(id).map(|m| m.position);
        match (pa, pb) {
            (Some(pa), Some(pb)) if wrapped(pa, pb, b.size) => Some(pb),
            (Some(pa), Some(pb)) => Some(pa.lerp(pb, alpha)),
            _ => None,
        }
    }

    pub fn last_snapshot(&self) -> Option<&WorldSnapshot> {
        self.history.back()
    }
}

fn wrapped(from: Vec2, to: Vec2, size: u32) -> bool {
    let half = size as f32 / 2.0;
    (to.x - from.x).abs() > half || (to.y - from.y).abs() > half
}
