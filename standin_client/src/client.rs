//! Client implementation.
//!
//! The client owns the stand-in server directly instead of a connection.
//! Each frame it polls once (which paces it to the server tick rate),
//! buffers the snapshot for interpolation and exposes a small console.

use standin_server::{DriverState, FakeServer};
use standin_shared::{
    config::SimConfig, error::SimResult, net::WorldSnapshot, render::RenderBackend,
};
use tracing::{debug, info};

use crate::{
    input::{parse_command, ClientCommand},
    interp::SnapshotBuffer,
};

/// Snapshots kept for interpolation.
const SNAPSHOT_HISTORY: usize = 32;

/// Renderer stand-in driving an in-process server.
pub struct OfflineClient {
    server: FakeServer,
    pub snaps: SnapshotBuffer,
    frames: u64,
}

impl OfflineClient {
    /// Creates a client with its own server.
    pub fn new(cfg: SimConfig) -> SimResult<Self> {
        Ok(Self::with_server(FakeServer::with_config(cfg)?))
    }

    /// Wraps an existing server (e.g. a seeded one).
    pub fn with_server(server: FakeServer) -> Self {
        Self {
            server,
            snaps: SnapshotBuffer::new(SNAPSHOT_HISTORY),
            frames: 0,
        }
    }

    pub fn server(&self) -> &FakeServer {
        &self.server
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Polls the server once, buffers the result and returns a copy of it.
    pub fn frame(&mut self) -> WorldSnapshot {
        let snap = self.server.poll_snapshot();
        self.record(snap)
    }

    /// Async form of [`frame`](Self::frame) for use inside a runtime.
    pub async fn frame_async(&mut self) -> WorldSnapshot {
        let snap = self.server.poll_async().await;
        self.record(snap)
    }

    fn record(&mut self, snap: WorldSnapshot) -> WorldSnapshot {
        debug!(
            tick = snap.tick,
            movers = snap.movers.len(),
            pickups = snap.pickups.len(),
            "Frame"
        );
        self.snaps.push(snap.clone());
        self.frames += 1;
        snap
    }

    /// Draws the newest snapshot, placing movers `alpha` of the way from
    /// the previous snapshot. Returns false if nothing has been polled yet.
    pub fn render(&self, backend: &mut dyn RenderBackend, alpha: f32) -> bool {
        let Some(snap) = self.snaps.last_snapshot() else {
            return false;
        };
        backend.begin_frame(snap.size);
        for mover in &snap.movers {
            let position = self
                .snaps
                .interp_mover(mover.id(), alpha)
                .unwrap_or(mover.position);
            backend.draw_mover(mover.id(), position, mover.heading);
        }
        for pickup in &snap.pickups {
            backend.draw_pickup(pickup.id(), pickup.position);
        }
        backend.end_frame();
        true
    }

    /// Executes a console command and returns the lines to print.
    pub fn exec_console(&mut self, line: &str) -> Vec<String> {
        let cmd = match parse_command(line.trim()) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => return Vec::new(),
            Err(msg) => return vec![msg],
        };

        match cmd {
            ClientCommand::Status => {
                let mut out = Vec::new();
                let state = self.server.state();
                out.push(format!("Server state: {state:?}"));
                out.push(format!("Tick: {}", self.server.tick()));
                out.push(format!(
                    "Tick interval: {}ms",
                    self.server.config().ms_per_frame
                ));
                out.push(format!("Frames: {}", self.frames));
                let world = self.server.world();
                out.push(format!("World size: {}", world.size()));
                out.push(format!("Movers: {}", world.movers().len()));
                out.push(format!("Pickups: {}", world.pickups().len()));
                out.push(format!("Snapshots buffered: {}", self.snaps.len()));
                if state == DriverState::Idle {
                    out.push("Not polled yet".to_string());
                }
                out
            }
            ClientCommand::Kill(id) => match self.server.mover_mut(id) {
                Some(mover) => {
                    mover.active = false;
                    info!(%id, "Mover deactivated");
                    vec![format!("{id} will be removed next tick")]
                }
                None => vec![format!("No such mover: {id}")],
            },
            ClientCommand::Collect(id) => match self.server.pickup_mut(id) {
                Some(pickup) => {
                    pickup.active = false;
                    info!(%id, "Pickup collected");
                    vec![format!("{id} will be removed next tick")]
                }
                None => vec![format!("No such pickup: {id}")],
            },
            ClientCommand::Help => vec![
                "status               - Show world status".to_string(),
                "kill <mover-id>      - Deactivate a mover".to_string(),
                "collect <pickup-id>  - Deactivate a pickup".to_string(),
            ],
        }
    }
}
