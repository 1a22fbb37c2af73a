//! World state container.
//!
//! Holds the two entity populations keyed by id plus the world extent. It has
//! no lifecycle policy of its own: the simulation driver decides what to
//! insert, reap and step. Maps are ordered so snapshots come out sorted by id.

use std::collections::BTreeMap;

use crate::{
    entity::{Mover, MoverId, Pickup, PickupId, Simulate},
    error::{SimError, SimResult},
};

/// Largest world side whose every integer coordinate is exact in `f32`.
pub const MAX_WORLD_SIZE: u32 = 1 << 24;

/// Counts of entities removed by one reap pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reaped {
    pub movers: usize,
    pub pickups: usize,
}

/// The authoritative world.
#[derive(Debug, Clone)]
pub struct WorldState {
    size: u32,
    movers: BTreeMap<MoverId, Mover>,
    pickups: BTreeMap<PickupId, Pickup>,
}

impl WorldState {
    /// Creates an empty world. Fails if `size` is zero or above
    /// [`MAX_WORLD_SIZE`].
    pub fn new(size: u32) -> SimResult<Self> {
        if size == 0 {
            return Err(SimError::invalid("world size must be positive"));
        }
        if size > MAX_WORLD_SIZE {
            return Err(SimError::invalid(format!(
                "world size {size} exceeds {MAX_WORLD_SIZE}"
            )));
        }
        Ok(Self {
            size,
            movers: BTreeMap::new(),
            pickups: BTreeMap::new(),
        })
    }

    /// Side length of the square world.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn movers(&self) -> &BTreeMap<MoverId, Mover> {
        &self.movers
    }

    pub fn pickups(&self) -> &BTreeMap<PickupId, Pickup> {
        &self.pickups
    }

    pub fn mover(&self, id: MoverId) -> Option<&Mover> {
        self.movers.get(&id)
    }

    pub fn mover_mut(&mut self, id: MoverId) -> Option<&mut Mover> {
        self.movers.get_mut(&id)
    }

    pub fn pickup(&self, id: PickupId) -> Option<&Pickup> {
        self.pickups.get(&id)
    }

    pub fn pickup_mut(&mut self, id: PickupId) -> Option<&mut Pickup> {
        self.pickups.get_mut(&id)
    }

    /// Inserts/replaces a mover under its own id.
    pub fn insert_mover(&mut self, mover: Mover) {
        self.movers.insert(mover.id(), mover);
    }

    /// Inserts/replaces a pickup under its own id.
    pub fn insert_pickup(&mut self, pickup: Pickup) {
        self.pickups.insert(pickup.id(), pickup);
    }

    /// Removes every inactive entity from both populations.
    pub fn reap_inactive(&mut self) -> Reaped {
        let movers_before = self.movers.len();
        let pickups_before = self.pickups.len();
        self.movers.retain(|_, m| m.active);
        self.pickups.retain(|_, p| p.active);
        Reaped {
            movers: movers_before - self.movers.len(),
            pickups: pickups_before - self.pickups.len(),
        }
    }

    /// Runs the per-tick update on every entity.
    pub fn step_entities(&mut self) {
        let size = self.size;
        for mover in self.movers.values_mut() {
            mover.step(size);
        }
        for pickup in self.pickups.values_mut() {
            pickup.step(size);
        }
    }
}
