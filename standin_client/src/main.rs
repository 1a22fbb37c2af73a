//! Standalone client binary.
//!
//! Usage:
//!   cargo run -p standin_client -- [--size 1000] [--ms-per-frame 20]
//!       [--max-players 50] [--max-powerups 50] [--frames N] [--config sim.json]
//!
//! The client runs the stand-in server in-process, polls it once per frame
//! and logs what it would render.
//!
//! Console commands:
//!   status              - Show world status
//!   kill <mover-id>     - Deactivate a mover
//!   collect <pickup-id> - Deactivate a pickup
//!   quit                - Exit client

use std::env;
use std::io::{BufRead, Write};

use anyhow::Context;
use standin_client::OfflineClient;
use standin_shared::{config::SimConfig, entity::MoverId, render::NullRenderer};
use tokio::sync::mpsc;
use tracing::info;

/// How often (in frames) a snapshot summary is logged.
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
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let (cfg, frames) = parse_args()?;
    info!(size = cfg.size, ms_per_frame = cfg.ms_per_frame, ?frames, "Starting client");

    let mut client = OfflineClient::new(cfg).context("create client")?;
    let mut renderer = NullRenderer;

    // Set up console input channel.
    let (console_tx, mut console_rx) = mpsc::channel::<String>(32);

    // Spawn stdin reader thread.
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        loop {
            print!("] ");
            let _ = stdout.flush();
            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            let line = line.trim().to_string();
            if !line.is_empty() && console_tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    println!("Client running. Type 'help' for commands, 'quit' to exit.");
    println!();

    loop {
        // Process console commands.
        while let Ok(line) = console_rx.try_recv() {
            if matches!(line.as_str(), "quit" | "exit") {
                info!(frames = client.frames(), "Client exiting");
                return Ok(());
            }
            for out in client.exec_console(&line) {
                println!("{}", out);
            }
        }

        let snap = client.frame_async().await;
        client.render(&mut renderer, 1.0);

        if snap.tick % LOG_EVERY == 0 {
            let tracked = client.snaps.interp_mover(MoverId(0), 0.5);
            info!(
                tick = snap.tick,
                movers = snap.movers.len(),
                pickups = snap.pickups.len(),
                ?tracked,
                "Snapshot"
            );
        }

        if frames.is_some_and(|n| client.frames() >= n) {
            break;
        }
    }

    info!(frames = client.frames(), "Client finished");
    Ok(())
}
