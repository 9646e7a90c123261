//! Third-person character controller library.
//!
//! This module exposes the ECS components, resources, systems, events and the
//! update pipeline for use in integration tests and by the executable.

pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod pipeline;
pub mod resources;
pub mod systems;
