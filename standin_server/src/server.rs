//! Simulation driver.
//!
//! `FakeServer` plays the part of a remote game server for a client that has
//! no network. Every poll waits out the rest of the current tick, runs one
//! step and hands back copies of both populations:
//!
//! 1. reap inactive movers and pickups,
//! 2. spawn new ones up to the population caps,
//! 3. advance every remaining entity by one tick.
//!
//! Reaping runs before spawning so a slot freed this tick is refilled in the
//! same tick. Ids come from per-population counters that only ever go up.

use std::time::Instant;

use rand::{rngs::StdRng, Rng, SeedableRng};
use standin_shared::{
    config::SimConfig,
    entity::{Mover, MoverId, Pickup, PickupId},
    error::SimResult,
    math::Vec2,
    net::WorldSnapshot,
    world::WorldState,
};
use tracing::{debug, info, trace};

use crate::tick::TickGate;

/// Driver lifecycle. There is no way back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Never polled or stepped.
    Idle,
    /// Clock running, one step per poll.
    Running,
}

/// Entities spawned by one repopulate pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Spawned {
    movers: usize,
    pickups: usize,
}

/// Offline stand-in for the game server.
pub struct FakeServer<R = StdRng> {
    cfg: SimConfig,
    world: WorldState,
    gate: TickGate,
    rng: R,
    next_mover_id: u64,
    next_pickup_id: u64,
    tick: u64,
}

impl FakeServer<StdRng> {
    /// Creates a server for a world of side `size` with default caps.
    pub fn new(size: u32) -> SimResult<Self> {
        Self::with_config(SimConfig::new(size))
    }

    /// Creates a server from a config, seeding the RNG from OS entropy.
    pub fn with_config(cfg: SimConfig) -> SimResult<Self> {
        Self::with_rng(cfg, StdRng::from_entropy())
    }

    /// Creates a server whose spawn placement is reproducible.
    pub fn seeded(cfg: SimConfig, seed: u64) -> SimResult<Self> {
        Self::with_rng(cfg, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> FakeServer<R> {
    /// Creates a server drawing spawn positions from `rng`.
    pub fn with_rng(cfg: SimConfig, rng: R) -> SimResult<Self> {
        cfg.validate()?;
        let world = WorldState::new(cfg.size)?;
        let gate = TickGate::new(cfg.frame_interval());
        Ok(Self {
            cfg,
            world,
            gate,
            rng,
            next_mover_id: 0,
            next_pickup_id: 0,
            tick: 0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    /// `Running` once the tick clock has started or a step has run.
    pub fn state(&self) -> DriverState {
        if self.gate.is_idle() && self.tick == 0 {
            DriverState::Idle
        } else {
            DriverState::Running
        }
    }

    /// Number of steps run so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// When the tick gate last released a step.
    pub fn last_tick_at(&self) -> Option<Instant> {
        self.gate.last_release()
    }

    /// Read-only view of the live world.
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Mutable access to one mover between polls, e.g. to deactivate it.
    pub fn mover_mut(&mut self, id: MoverId) -> Option<&mut Mover> {
        self.world.mover_mut(id)
    }

    /// Mutable access to one pickup between polls.
    pub fn pickup_mut(&mut self, id: PickupId) -> Option<&mut Pickup> {
        self.world.pickup_mut(id)
    }

    /// Waits for the next tick, steps once and returns copies of both
    /// populations sorted by id.
    pub fn poll(&mut self) -> (Vec<Mover>, Vec<Pickup>) {
        let snap = self.poll_snapshot();
        (snap.movers, snap.pickups)
    }

    /// Like [`poll`](Self::poll) but returns a tick-stamped snapshot.
    pub fn poll_snapshot(&mut self) -> WorldSnapshot {
        self.note_start();
        self.gate.wait_blocking();
        self.step();
        self.snapshot()
    }

    /// Async poll. The wait is a timer sleep instead of a blocked thread.
    ///
    /// Dropping the future before it resolves leaves the world untouched
    /// and keeps the current tick interval running.
    pub async fn poll_async(&mut self) -> WorldSnapshot {
        self.note_start();
        self.gate.wait().await;
        self.step();
        self.snapshot()
    }

    /// Runs one simulation step without waiting on the tick gate. The gate
    /// is left alone, so the next poll still starts the clock.
    pub fn step(&mut self) {
        let reaped = self.world.reap_inactive();
        let spawned = self.repopulate();
        self.world.step_entities();
        self.tick += 1;

        debug!(
            tick = self.tick,
            reaped_movers = reaped.movers,
            reaped_pickups = reaped.pickups,
            spawned_movers = spawned.movers,
            spawned_pickups = spawned.pickups,
            "Stepped world"
        );
    }

    /// Copies the current world into a snapshot.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::new(
            self.tick,
            self.world.size(),
            self.world.movers().values().cloned().collect(),
            self.world.pickups().values().cloned().collect(),
        )
    }

    fn note_start(&self) {
        if self.gate.is_idle() {
            info!(
                ms_per_frame = self.cfg.ms_per_frame,
                max_players = self.cfg.max_players,
                max_powerups = self.cfg.max_powerups,
                size = self.cfg.size,
                "Simulation clock started"
            );
        }
    }

    fn repopulate(&mut self) -> Spawned {
        let size = self.world.size();
        let mut spawned = Spawned::default();

        while self.world.movers().len() < self.cfg.max_players {
            let id = MoverId(self.next_mover_id);
            self.next_mover_id += 1;
            let position = random_position(&mut self.rng, size);
            let heading: f32 = self.rng.gen_range(0.0..360.0);
            trace!(%id, x = position.x, y = position.y, heading, "Spawned mover");
            self.world.insert_mover(Mover::new(id, position, heading));
            spawned.movers += 1;
        }

        while self.world.pickups().len() < self.cfg.max_powerups {
            let id = PickupId(self.next_pickup_id);
            self.next_pickup_id += 1;
            let position = random_position(&mut self.rng, size);
            trace!(%id, x = position.x, y = position.y, "Spawned pickup");
            self.world.insert_pickup(Pickup::new(id, position));
            spawned.pickups += 1;
        }

        spawned
    }
}

/// Uniform integer-valued position in `[0, size)` on each axis.
fn random_position<R: Rng>(rng: &mut R, size: u32) -> Vec2 {
    Vec2::new(rng.gen_range(0..size) as f32, rng.gen_range(0..size) as f32)
}
