//! End-to-end checks of the driver's tick gating and entity lifecycle.

use std::{
    collections::HashSet,
    time::{Duration, Instant},
};

use rand::{rngs::StdRng, SeedableRng};
use standin_client::OfflineClient;
use standin_server::{DriverState, FakeServer, SimHost};
use standin_shared::{
    entity::{MoverId, PickupId, PICKUP_LIFESPAN_TICKS},
    error::SimError,
    net::{decode_snapshot, encode_snapshot},
};
use standin_tests::{config, init_tracing, seeded_server};
use tracing::info;

/// World 100, two movers, no pickups; deactivate mover 0 between polls.
#[test]
fn two_mover_scenario() -> anyhow::Result<()> {
    init_tracing();
    let mut server = seeded_server(config(100, 20, 2, 0))?;

    let (movers, pickups) = server.poll();
    let ids: Vec<MoverId> = movers.iter().map(|m| m.id()).collect();
    assert_eq!(ids, vec![MoverId(0), MoverId(1)]);
    assert!(movers.iter().all(|m| m.position.within(100)));
    assert!(pickups.is_empty());

    let mover_one = movers[1].clone();
    server
        .mover_mut(MoverId(0))
        .expect("mover 0 exists")
        .active = false;

    let (movers, pickups) = server.poll();
    let ids: Vec<MoverId> = movers.iter().map(|m| m.id()).collect();
    assert_eq!(ids, vec![MoverId(1), MoverId(2)]);
    assert!(pickups.is_empty());
    assert_ne!(movers[0].position, mover_one.position);
    assert_eq!(movers[0].heading, mover_one.heading);
    Ok(())
}

#[test]
fn zero_size_is_an_invalid_configuration() {
    let err = FakeServer::with_config(config(0, 20, 1, 1)).err();
    assert!(matches!(err, Some(SimError::InvalidConfiguration { .. })));
}

#[test]
fn steps_are_spaced_by_the_tick_interval() -> anyhow::Result<()> {
    let interval = Duration::from_millis(15);
    let mut server = seeded_server(config(100, 15, 3, 3))?;

    let start = Instant::now();
    let mut releases = Vec::new();
    for _ in 0..5 {
        server.poll();
        releases.push(server.last_tick_at().expect("clock is running"));
    }

    assert!(start.elapsed() >= interval * 5);
    for pair in releases.windows(2) {
        assert!(pair[1] - pair[0] >= interval);
    }
    Ok(())
}

#[test]
fn slow_caller_gets_one_step_per_poll() -> anyhow::Result<()> {
    let interval = Duration::from_millis(50);
    let mut server = seeded_server(config(100, 50, 1, 1))?;
    server.poll();
    std::thread::sleep(interval * 3);

    let before = Instant::now();
    server.poll();
    // No catch-up: several missed intervals still produce a single step,
    // and the late poll is not made to wait.
    assert_eq!(server.tick(), 2);
    assert!(before.elapsed() < interval);
    Ok(())
}

#[test]
fn populations_stay_at_their_caps() -> anyhow::Result<()> {
    let mut server = seeded_server(config(300, 0, 7, 4))?;
    for round in 0..20u64 {
        let (movers, pickups) = server.poll();
        assert_eq!(movers.len(), 7);
        assert_eq!(pickups.len(), 4);

        // Knock out a few entities so the next poll has to refill.
        for m in movers.iter().filter(|m| m.id().0 % 3 == round % 3) {
            server.mover_mut(m.id()).expect("mover is live").active = false;
        }
        if let Some(p) = pickups.first() {
            server.pickup_mut(p.id()).expect("pickup is live").active = false;
        }
    }
    Ok(())
}

#[test]
fn ids_are_unique_and_increase_per_population() -> anyhow::Result<()> {
    let mut server = seeded_server(config(100, 0, 5, 5))?;
    let mut movers_seen = HashSet::new();
    let mut pickups_seen = HashSet::new();
    let mut mover_order = Vec::new();
    let mut pickup_order = Vec::new();

    for _ in 0..15 {
        let (movers, pickups) = server.poll();
        for m in &movers {
            if movers_seen.insert(m.id()) {
                mover_order.push(m.id());
            }
        }
        for p in &pickups {
            if pickups_seen.insert(p.id()) {
                pickup_order.push(p.id());
            }
        }
        let oldest = movers[0].id();
        server.mover_mut(oldest).expect("mover is live").active = false;
        let newest = pickups[pickups.len() - 1].id();
        server.pickup_mut(newest).expect("pickup is live").active = false;
    }

    assert!(mover_order.windows(2).all(|w| w[0] < w[1]));
    assert!(pickup_order.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(mover_order.len(), 5 + 14);
    assert_eq!(pickup_order.len(), 5 + 14);
    Ok(())
}

#[test]
fn deactivated_entity_is_gone_from_the_next_snapshot() -> anyhow::Result<()> {
    let mut server = seeded_server(config(100, 0, 3, 3))?;
    server.poll();
    server.pickup_mut(PickupId(1)).expect("pickup 1").active = false;

    let snap = server.poll_snapshot();
    assert!(snap.find_pickup(PickupId(1)).is_none());
    assert!(snap.find_pickup(PickupId(3)).is_some());
    assert_eq!(snap.pickups.len(), 3);
    Ok(())
}

#[test]
fn mutating_a_snapshot_leaves_the_world_alone() -> anyhow::Result<()> {
    let mut server = seeded_server(config(100, 0, 4, 4))?;
    let (mut movers, mut pickups) = server.poll();
    let live_before = server.world().movers().clone();

    for m in &mut movers {
        m.active = false;
        m.heading = 0.0;
    }
    pickups.truncate(1);

    assert_eq!(server.world().movers(), &live_before);
    let (movers, pickups) = server.poll();
    assert_eq!(movers.len(), 4);
    assert_eq!(pickups.len(), 4);
    assert!(movers.iter().all(|m| m.active));
    Ok(())
}

#[test]
fn expired_pickups_are_replaced() -> anyhow::Result<()> {
    let mut server = seeded_server(config(100, 0, 0, 3))?;
    for _ in 0..PICKUP_LIFESPAN_TICKS {
        server.step();
    }
    assert!(server.world().pickups().values().all(|p| !p.active));

    server.step();
    let ids: Vec<u64> = server.world().pickups().keys().map(|id| id.0).collect();
    assert_eq!(ids, vec![3, 4, 5]);
    Ok(())
}

#[test]
fn caller_supplied_rng_is_reproducible() -> anyhow::Result<()> {
    let cfg = config(1000, 0, 10, 10);
    let mut a = FakeServer::with_rng(cfg.clone(), StdRng::seed_from_u64(99))?;
    let mut b = FakeServer::with_rng(cfg, StdRng::seed_from_u64(99))?;
    assert_eq!(a.poll(), b.poll());
    assert_eq!(a.poll(), b.poll());
    Ok(())
}

#[tokio::test]
async fn cancelled_async_poll_does_not_step() -> anyhow::Result<()> {
    let mut server = seeded_server(config(100, 200, 2, 2))?;

    let res = tokio::time::timeout(Duration::from_millis(10), server.poll_async()).await;
    assert!(res.is_err());
    assert_eq!(server.state(), DriverState::Running);
    assert_eq!(server.tick(), 0);
    assert!(server.world().movers().is_empty());

    let snap = server.poll_async().await;
    assert_eq!(snap.tick, 1);
    assert_eq!(snap.movers.len(), 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn many_observers_share_one_simulation() -> anyhow::Result<()> {
    init_tracing();
    let host = SimHost::spawn(seeded_server(config(100, 2, 6, 6))?);

    let mut readers = Vec::new();
    for n in 0..3 {
        let mut rx = host.subscribe();
        readers.push(tokio::spawn(async move {
            let mut ticks = Vec::new();
            while ticks.len() < 5 {
                rx.changed().await?;
                let snap = rx.borrow_and_update().clone();
                assert_eq!(snap.movers.len(), 6);
                ticks.push(snap.tick);
            }
            info!(reader = n, ?ticks, "Observer done");
            Ok::<_, anyhow::Error>(ticks)
        }));
    }

    for reader in readers {
        let ticks = reader.await??;
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }
    host.shutdown().await?;
    Ok(())
}

#[test]
fn forwarded_snapshot_decodes_identically() -> anyhow::Result<()> {
    let mut server = seeded_server(config(100, 0, 3, 2))?;
    let snap = server.poll_snapshot();
    let bytes = encode_snapshot(&snap)?;
    assert_eq!(decode_snapshot(&bytes)?, snap);
    Ok(())
}

#[test]
fn client_interpolates_between_polls() -> anyhow::Result<()> {
    let mut client = OfflineClient::with_server(seeded_server(config(1000, 0, 1, 0))?);
    let first = client.frame();
    let second = client.frame();

    let a = first.find_mover(MoverId(0)).expect("mover 0").position;
    let b = second.find_mover(MoverId(0)).expect("mover 0").position;
    let mid = client
        .snaps
        .interp_mover(MoverId(0), 0.5)
        .expect("two snapshots buffered");

    // A wrap between frames snaps to the newer position instead.
    if (b.x - a.x).abs() < 500.0 && (b.y - a.y).abs() < 500.0 {
        assert!((mid.x - (a.x + b.x) / 2.0).abs() < 1e-3);
        assert!((mid.y - (a.y + b.y) / 2.0).abs() < 1e-3);
    } else {
        assert_eq!(mid, b);
    }
    Ok(())
}
