//! Rendering abstraction.
//!
//! This crate intentionally does not depend on a graphics backend.
//! Define traits that a renderer implementation would satisfy.

use crate::{
    entity::{MoverId, PickupId},
    math::Vec2,
};

/// A minimal 2D rendering API for world snapshots.
pub trait RenderBackend {
    fn begin_frame(&mut self, world_size: u32);
    fn draw_mover(&mut self, id: MoverId, position: Vec2, heading: f32);
    fn draw_pickup(&mut self, id: PickupId, position: Vec2);
    fn end_frame(&mut self);
}

/// A no-op renderer useful for headless runs.
#[derive(Default)]
pub struct NullRenderer;

impl RenderBackend for NullRenderer {
    fn begin_frame(&mut self, _world_size: u32) {}
    fn draw_mover(&mut self, _id: MoverId, _position: Vec2, _heading: f32) {}
    fn draw_pickup(&mut self, _id: PickupId, _position: Vec2) {}
    fn end_frame(&mut self) {}
}
