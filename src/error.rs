//! Error types.
//!
//! Configuration and level files fail with [`ConfigError`] / [`LevelError`]
//! at start-up; malformed camera rigs fail with [`RigError`] when they are
//! first validated.

use bevy_ecs::entity::Entity;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config file: {0}")]
    Load(String),
    #[error("failed to save config file: {0}")]
    Save(String),
    #[error("invalid config value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse level file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid level: {0}")]
    Invalid(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RigError {
    #[error("camera rig {rig:?}: {role} entity {entity:?} does not exist")]
    MissingEntity {
        rig: Entity,
        role: &'static str,
        entity: Entity,
    },
    #[error("camera rig {rig:?}: {role} entity {entity:?} has no {component}")]
    MissingComponent {
        rig: Entity,
        role: &'static str,
        entity: Entity,
        component: &'static str,
    },
}
