//! Snapshot types and codec.
//!
//! There is no transport here. A caller that forwards snapshots somewhere
//! (a socket, a recording, a test fixture) serializes them with the helpers
//! below; the encoding is plain JSON so it stays explicit and versionable.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{
    entity::{Mover, MoverId, Pickup, PickupId},
    error::SimResult,
};

/// Snapshot format version, bumped on incompatible layout changes.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Copy of the world after one simulation step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldSnapshot {
    #[serde(default = "current_version")]
    pub version: u32,
    /// Step number that produced this snapshot (first step is 1).
    pub tick: u64,
    pub size: u32,
    /// Sorted by ascending id.
    pub movers: Vec<Mover>,
    /// Sorted by ascending id.
    pub pickups: Vec<Pickup>,
}

fn current_version() -> u32 {
    SNAPSHOT_VERSION
}

impl WorldSnapshot {
    pub fn new(tick: u64, size: u32, movers: Vec<Mover>, pickups: Vec<Pickup>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            tick,
            size,
            movers,
            pickups,
        }
    }

    /// An empty snapshot, as seen before the first step.
    pub fn empty(size: u32) -> Self {
        Self::new(0, size, Vec::new(), Vec::new())
    }

    pub fn find_mover(&self, id: MoverId) -> Option<&Mover> {
        self.movers
            .binary_search_by_key(&id, Mover::id)
            .ok()
            .map(|i| &self.movers[i])
    }

    pub fn find_pickup(&self, id: PickupId) -> Option<&Pickup> {
        self.pickups
            .binary_search_by_key(&id, Pickup::id)
            .ok()
            .map(|i| &self.pickups[i])
    }
}

/// Encodes a snapshot to bytes.
pub fn encode_snapshot(snap: &WorldSnapshot) -> SimResult<Bytes> {
    let payload = serde_json::to_vec(snap)?;
    Ok(Bytes::from(payload))
}

/// Decodes a snapshot from bytes.
pub fn decode_snapshot(b: &[u8]) -> SimResult<WorldSnapshot> {
    Ok(serde_json::from_slice(b)?)
}
