//! Flat-shaded box drawn by the renderer.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

/// Axis-aligned box drawn at the entity's world position plus `offset`,
/// coloured with a named entry from
/// [`MaterialStore`](crate::resources::materialstore::MaterialStore).
#[derive(Component, Clone, Debug)]
pub struct Renderable {
    pub size: Vector3,
    pub offset: Vector3,
    pub material: String,
}

impl Renderable {
    pub fn new(size: Vector3, material: impl Into<String>) -> Self {
        Self {
            size,
            offset: Vector3::zero(),
            material: material.into(),
        }
    }

    pub fn with_offset(mut self, offset: Vector3) -> Self {
        self.offset = offset;
        self
    }
}
