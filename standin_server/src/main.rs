//! Standalone server binary.
//!
//! Usage:
//!   cargo run -p standin_server -- [--size 1000] [--ms-per-frame 20]
//!       [--max-players 50] [--max-powerups 50] [--frames N] [--config sim.json]
//!
//! Runs the simulation on its own task and logs a summary of the published
//! snapshots. Stops after `--frames` ticks, or on Ctrl-C when no limit is set.

use std::env;

use anyhow::Context;
use standin_server::{FakeServer, SimHost};
use standin_shared::{config::SimConfig, net::encode_snapshot};
use tracing::info;

/// How often (in ticks) a snapshot summary is logged.
const LOG_EVERY: u64 = 50;

fn parse_args() -> anyhow::Result<(SimConfig, Option<u64>)> {
    let mut cfg = SimConfig::default();
    let mut frames = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--config", Some(path)) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("read config {path}"))?;
                cfg = SimConfig::from_json_str(&text).context("parse config")?;
            }
            ("--size", Some(v)) => cfg.size = v.parse().context("--size")?,
            ("--ms-per-frame", Some(v)) => cfg.ms_per_frame = v.parse().context("--ms-per-frame")?,
            ("--max-players", Some(v)) => cfg.max_players = v.parse().context("--max-players")?,
            ("--max-powerups", Some(v)) => {
                cfg.max_powerups = v.parse().context("--max-powerups")?
            }
            ("--frames", Some(v)) => frames = Some(v.parse().context("--frames")?),
            _ => {
                i += 1;
                continue;
            }
        }
        i += 2;
    }
    Ok((cfg, frames))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let (cfg, frames) = parse_args()?;
    info!(
        size = cfg.size,
        ms_per_frame = cfg.ms_per_frame,
        max_players = cfg.max_players,
        max_powerups = cfg.max_powerups,
        ?frames,
        "Starting stand-in server"
    );

    let server = FakeServer::with_config(cfg).context("create server")?;
    let host = SimHost::spawn(server);
    let mut snapshots = host.subscribe();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
            changed = snapshots.changed() => {
                changed.context("simulation task ended")?;
                let snap = snapshots.borrow_and_update().clone();
                if snap.tick % LOG_EVERY == 0 {
                    let encoded = encode_snapshot(&snap).context("encode snapshot")?;
                    info!(
                        tick = snap.tick,
                        movers = snap.movers.len(),
                        pickups = snap.pickups.len(),
                        bytes = encoded.len(),
                        "Snapshot"
                    );
                }
                if frames.is_some_and(|n| snap.tick >= n) {
                    break;
                }
            }
        }
    }

    let ticks = host.shutdown().await?;
    info!(ticks, "Server stopped");
    Ok(())
}
