//! `standin_server`
//!
//! Offline replacement for the game server:
//! - Tick-gated simulation driver (`FakeServer`)
//! - Entity lifecycle: reap, repopulate up to caps, advance
//! - Snapshot copies handed back on every poll
//! - Optional publisher task for multiple observers (`SimHost`)

pub mod host;
pub mod server;
pub mod tick;

pub use host::SimHost;
pub use server::{DriverState, FakeServer};
