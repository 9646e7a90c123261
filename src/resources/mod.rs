//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: input state, timing, the physics
//! snapshot, configuration, level data and scene bookkeeping.
//!
//! Overview
//! - `debugmode` – presence toggles optional debug overlays and logs
//! - `gameconfig` – tunables loaded from an INI file
//! - `input` – per-frame keyboard state of keys relevant to the game
//! - `level` – JSON level description
//! - `materialstore` – named colours used by renderables
//! - `physicsscene` – world-space collider snapshot, raycasts and overlaps
//! - `scene` – authoritative and pending scene
//! - `scenetransition` – deferred, cancellable scene change
//! - `systemsstore` – registry of dynamically-lookup-able systems by name
//! - `worldtime` – simulation time and delta
pub mod debugmode;
pub mod gameconfig;
pub mod input;
pub mod level;
pub mod materialstore;
pub mod physicsscene;
pub mod scene;
pub mod scenetransition;
pub mod systemsstore;
pub mod worldtime;
