//! Math types.
//!
//! This module intentionally stays small and deterministic.

use serde::{Deserialize, Serialize};

/// 2D vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `degrees` (0 = +x, counter-clockwise).
    pub fn from_heading(degrees: f32) -> Self {
        let rad = degrees.to_radians();
        Self::new(rad.cos(), rad.sin())
    }

    pub fn scale(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s)
    }

    pub fn lerp(self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(self.x + (to.x - self.x) * t, self.y + (to.y - self.y) * t)
    }

    /// Wraps both axes into `[0, size)`.
    pub fn wrap(self, size: u32) -> Self {
        Self::new(wrap_axis(self.x, size), wrap_axis(self.y, size))
    }

    /// True if both axes lie in `[0, size)`.
    pub fn within(self, size: u32) -> bool {
        let s = size as f32;
        (0.0..s).contains(&self.x) && (0.0..s).contains(&self.y)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

fn wrap_axis(v: f32, size: u32) -> f32 {
    let s = size as f32;
    let w = v.rem_euclid(s);
    // rem_euclid rounds up to `s` for tiny negative inputs.
    if w >= s {
        0.0
    } else {
        w
    }
}
