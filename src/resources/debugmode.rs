//! Debug toggle resource.
//!
//! While present, the occlusion resolver logs its ray hits and the renderer
//! draws collider wireframes, the occlusion ray and a status overlay.

use bevy_ecs::prelude::Resource;

/// Marker resource toggled with F11.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct DebugMode;
