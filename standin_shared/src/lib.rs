//! `standin_shared`
//!
//! Types shared by the stand-in server and its callers.
//!
//! Design goals:
//! - The world is plain owned data; only the driver mutates it.
//! - Snapshots are copies, never views into the live world.
//! - Entity behavior sits behind the `Simulate` trait.
//! - No `unsafe`.

pub mod config;
pub mod entity;
pub mod error;
pub mod math;
pub mod net;
pub mod render;
pub mod world;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::config::*;
    pub use crate::entity::*;
    pub use crate::error::*;
    pub use crate::math::*;
    pub use crate::net::*;
    pub use crate::render::*;
    pub use crate::world::*;
}
