//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the game world: transforms and hierarchy data, physics bodies and
//! colliders, the player and camera rig, and level furniture.
//!
//! Submodules overview:
//! - [`boxcollider`] – world-axis-aligned box collider with layer masks
//! - [`camerarig`] – camera rig wiring and terrain-adaptive framing settings
//! - [`globaltransform3d`] – world-space transform computed from the hierarchy
//! - [`groundsensor`] – contact counter answering "is the player grounded?"
//! - [`occlusion`] – camera occlusion resolver and special occluders
//! - [`persistent`] – marker for entities that persist across scene changes
//! - [`player`] – player markers and the locomotion controller
//! - [`renderable`] – flat-shaded box drawn by the renderer
//! - [`rigidbody`] – velocity-driven body affected by gravity
//! - [`teleporter`] – trigger volume that moves the player to a target
//! - [`texttrigger`] – trigger volume that reveals a UI text
//! - [`transform3d`] – local position, yaw and pitch
//! - [`ttl`] – time-to-live countdown before despawn

pub mod boxcollider;
pub mod camerarig;
pub mod globaltransform3d;
pub mod groundsensor;
pub mod occlusion;
pub mod persistent;
pub mod player;
pub mod renderable;
pub mod rigidbody;
pub mod teleporter;
pub mod texttrigger;
pub mod transform3d;
pub mod ttl;
