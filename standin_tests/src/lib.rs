//! Helpers shared by the integration tests.

use standin_server::FakeServer;
use standin_shared::config::SimConfig;

/// Installs a test-writer subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();
}

/// A config with explicit caps and tick interval.
pub fn config(size: u32, ms_per_frame: u64, max_players: usize, max_powerups: usize) -> SimConfig {
    SimConfig {
        size,
        ms_per_frame,
        max_players,
        max_powerups,
    }
}

/// A seeded server so failures reproduce.
pub fn seeded_server(cfg: SimConfig) -> anyhow::Result<FakeServer> {
    Ok(FakeServer::seeded(cfg, 0x5eed)?)
}
