//! Snapshot publisher.
//!
//! `FakeServer::poll` is single-caller by construction (`&mut self`). When
//! more than one observer wants the world, `SimHost` moves the server onto a
//! dedicated task that polls in a loop and publishes each result as an
//! immutable `Arc<WorldSnapshot>` on a watch channel. Observers only ever see
//! the latest published snapshot and never touch the live world.

use std::sync::Arc;

use anyhow::Context;
use rand::Rng;
use standin_shared::net::WorldSnapshot;
use tokio::{
    sync::{oneshot, watch},
    task::JoinHandle,
};
use tracing::info;

use crate::server::FakeServer;

/// Handle to a simulation task.
pub struct SimHost {
    snapshots: watch::Receiver<Arc<WorldSnapshot>>,
    stop: oneshot::Sender<()>,
    task: JoinHandle<u64>,
}

impl SimHost {
    /// Moves `server` onto a new tokio task and starts polling.
    pub fn spawn<R>(mut server: FakeServer<R>) -> Self
    where
        R: Rng + Send + 'static,
    {
        let initial = Arc::new(WorldSnapshot::empty(server.world().size()));
        let (tx, rx) = watch::channel(initial);
        let (stop, mut stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    snap = server.poll_async() => {
                        tx.send_replace(Arc::new(snap));
                        // A zero interval never sleeps; yield so `shutdown`
                        // and timers still run on a current-thread runtime.
                        tokio::task::yield_now().await;
                    }
                }
            }
            info!(ticks = server.tick(), "Simulation task stopped");
            server.tick()
        });

        Self {
            snapshots: rx,
            stop,
            task,
        }
    }

    /// A new observer. It starts out having seen the current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<WorldSnapshot>> {
        self.snapshots.clone()
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> Arc<WorldSnapshot> {
        self.snapshots.borrow().clone()
    }

    /// Stops the task and returns how many ticks it ran.
    pub async fn shutdown(self) -> anyhow::Result<u64> {
        let SimHost { stop, task, .. } = self;
        // The task may already have exited on its own.
        let _ = stop.send(());
        task.await.context("join simulation task")
    }
}
