//! Entity records for the two populations.
//!
//! Movers and pickups are plain data owned by [`WorldState`](crate::world::WorldState).
//! Each one advances itself once per tick through [`Simulate`]; the world
//! decides when they are created and removed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Distance a mover covers per tick.
pub const MOVER_SPEED: f32 = 1.0;

/// Ticks a pickup stays active after it spawns.
pub const PICKUP_LIFESPAN_TICKS: u32 = 500;

/// Mover id, unique within the mover population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MoverId(pub u64);

/// Pickup id, unique within the pickup population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PickupId(pub u64);

impl fmt::Display for MoverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mover#{}", self.0)
    }
}

impl fmt::Display for PickupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pickup#{}", self.0)
    }
}

/// Per-tick entity update.
///
/// Called once per tick on every entity that survived the reap. Implementors
/// may change position, heading and the active flag, never the id.
pub trait Simulate {
    fn step(&mut self, world_size: u32);
}

/// A moving entity (a player ship in the client's terms).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    id: MoverId,
    pub position: Vec2,
    /// Degrees, 0 = +x, counter-clockwise.
    pub heading: f32,
    pub active: bool,
}

impl Mover {
    pub fn new(id: MoverId, position: Vec2, heading: f32) -> Self {
        Self {
            id,
            position,
            heading,
            active: true,
        }
    }

    pub fn id(&self) -> MoverId {
        self.id
    }
}

impl Simulate for Mover {
    /// Moves forward along the heading and wraps at the world edges.
    fn step(&mut self, world_size: u32) {
        if !self.active {
            return;
        }
        let delta = Vec2::from_heading(self.heading).scale(MOVER_SPEED);
        self.position = (self.position + delta).wrap(world_size);
    }
}

/// A stationary collectible that expires after a fixed number of ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    id: PickupId,
    pub position: Vec2,
    pub active: bool,
    /// Ticks left before the pickup deactivates itself.
    pub ttl: u32,
}

impl Pickup {
    pub fn new(id: PickupId, position: Vec2) -> Self {
        Self {
            id,
            position,
            active: true,
            ttl: PICKUP_LIFESPAN_TICKS,
        }
    }

    pub fn id(&self) -> PickupId {
        self.id
    }
}

impl Simulate for Pickup {
    fn step(&mut self, _world_size: u32) {
        if !self.active {
            return;
        }
        self.ttl = self.ttl.saturating_sub(1);
        if self.ttl == 0 {
            self.active = false;
        }
    }
}
