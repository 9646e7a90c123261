//! Engine systems.
//!
//! This module groups all ECS systems that advance simulation, input, and
//! rendering. [`crate::pipeline`] fixes their order.
//!
//! Submodules overview
//! - [`camera`] – yaw follow, terrain-adaptive pitch and rig validation
//! - [`groundsensor`] – count ground contacts from trigger events
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`locomotion`] – turn, move, sprint and jump the player
//! - [`occlusion`] – zoom and keep the camera in front of occluders
//! - [`physics`] – integrate bodies, snapshot colliders and detect triggers
//! - [`propagate_transforms`] – compute world transforms from the hierarchy
//! - [`render`] – draw world and debug overlays using Raylib
//! - [`scene`] – pending scene checks, the menu and deferred transitions
//! - [`teleport`] – move the player on teleporter entry
//! - [`texttrigger`] – reveal UI texts and end the level
//! - [`time`] – update simulation time and delta
//! - [`ttl`] – despawn entities whose time ran out

pub mod camera;
pub mod groundsensor;
pub mod input;
pub mod locomotion;
pub mod occlusion;
pub mod physics;
pub mod propagate_transforms;
pub mod render;
pub mod scene;
pub mod teleport;
pub mod texttrigger;
pub mod time;
pub mod ttl;
