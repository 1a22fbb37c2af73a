//! `standin_client`
//!
//! Renderer stand-in for the offline server:
//! - Polls the in-process server once per frame
//! - Snapshot history and mover interpolation
//! - Console commands that deactivate entities

pub mod client;
pub mod input;
pub mod interp;

pub use client::OfflineClient;
