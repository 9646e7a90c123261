//! Level description loaded from JSON.
//!
//! A level is a list of axis-aligned blocks plus gameplay volumes:
//!
//! ```json
//! {
//!   "name": "course",
//!   "spawn": [0.0, 0.0, 0.0],
//!   "spawn_yaw": 0.0,
//!   "materials": [{ "name": "brick", "rgba": [160, 70, 50, 255] }],
//!   "blocks": [
//!     { "center": [0, -0.5, 0], "size": [60, 1, 60], "material": "ground" },
//!     { "center": [4, 2, 6], "size": [1, 4, 6], "material": "stone",
//!       "special": { "transparent_material": "stone_transparent" } }
//!   ],
//!   "teleporters": [{ "center": [10, 1, 0], "size": [2, 2, 2], "target": [-15, 0, -15] }],
//!   "text_triggers": [{ "center": [0, 1, 20], "size": [4, 2, 4], "message": "Bye", "ends_level": true }]
//! }
//! ```

use bevy_ecs::prelude::Resource;
use log::info;
use raylib::prelude::Vector3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::LevelError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MaterialDef {
    pub name: String,
    pub rgba: [u8; 4],
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SpecialDef {
    pub transparent_material: String,
    /// Hide the block instead of drawing it see-through.
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BlockDef {
    pub center: [f32; 3],
    pub size: [f32; 3],
    pub material: String,
    #[serde(default)]
    pub special: Option<SpecialDef>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TeleporterDef {
    pub center: [f32; 3],
    pub size: [f32; 3],
    pub target: [f32; 3],
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TextTriggerDef {
    pub center: [f32; 3],
    pub size: [f32; 3],
    pub message: String,
    #[serde(default)]
    pub ends_level: bool,
}

#[derive(Resource, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LevelData {
    pub name: String,
    pub spawn: [f32; 3],
    #[serde(default)]
    pub spawn_yaw: f32,
    #[serde(default)]
    pub materials: Vec<MaterialDef>,
    pub blocks: Vec<BlockDef>,
    #[serde(default)]
    pub teleporters: Vec<TeleporterDef>,
    #[serde(default)]
    pub text_triggers: Vec<TextTriggerDef>,
}

pub fn vec3(v: [f32; 3]) -> Vector3 {
    Vector3::new(v[0], v[1], v[2])
}

impl LevelData {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let level = Self::from_json(&text)?;
        info!(
            "Loaded level '{}' from {:?}: {} blocks, {} teleporters, {} text triggers",
            level.name,
            path.as_ref(),
            level.blocks.len(),
            level.teleporters.len(),
            level.text_triggers.len()
        );
        Ok(level)
    }

    pub fn from_json(text: &str) -> Result<Self, LevelError> {
        let level: LevelData = serde_json::from_str(text)?;
        level.validate()?;
        Ok(level)
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        if self.blocks.is_empty() {
            return Err(LevelError::Invalid(format!("level '{}' has no blocks", self.name)));
        }
        let sizes = self
            .blocks
            .iter()
            .map(|b| b.size)
            .chain(self.teleporters.iter().map(|t| t.size))
            .chain(self.text_triggers.iter().map(|t| t.size));
        for size in sizes {
            if size.iter().any(|s| *s <= 0.0 || !s.is_finite()) {
                return Err(LevelError::Invalid(format!(
                    "level '{}' has a volume with non-positive size {:?}",
                    self.name, size
                )));
            }
        }
        let points = std::iter::once(("spawn", self.spawn))
            .chain(self.blocks.iter().map(|b| ("block center", b.center)))
            .chain(self.teleporters.iter().map(|t| ("teleporter center", t.center)))
            .chain(self.teleporters.iter().map(|t| ("teleporter target", t.target)))
            .chain(self.text_triggers.iter().map(|t| ("text trigger center", t.center)));
        for (what, point) in points {
            if point.iter().any(|c| !c.is_finite()) {
                return Err(LevelError::Invalid(format!(
                    "level '{}' has a non-finite {} {:?}",
                    self.name, what, point
                )));
            }
        }
        if !self.spawn_yaw.is_finite() {
            return Err(LevelError::Invalid(format!(
                "level '{}' has a non-finite spawn yaw",
                self.name
            )));
        }
        Ok(())
    }

    /// Built-in course: flat ground, a staircase, a see-through wall, a
    /// solid wall, a teleporter and two text triggers.
    pub fn default_course() -> Self {
        let block = |center: [f32; 3], size: [f32; 3], material: &str| BlockDef {
            center,
            size,
            material: material.to_string(),
            special: None,
        };
        let mut blocks = vec![
            block([0.0, -0.5, 0.0], [60.0, 1.0, 60.0], "ground"),
            block([0.0, 0.25, 8.0], [6.0, 0.5, 2.0], "stone"),
            block([0.0, 0.5, 10.0], [6.0, 1.0, 2.0], "stone"),
            block([0.0, 0.75, 12.0], [6.0, 1.5, 2.0], "stone"),
            block([0.0, 1.0, 16.0], [6.0, 2.0, 6.0], "stone"),
            block([-8.0, 2.0, 0.0], [1.0, 4.0, 10.0], "wood"),
        ];
        blocks.push(BlockDef {
            special: Some(SpecialDef {
                transparent_material: "stone_transparent".to_string(),
                hidden: false,
            }),
            ..block([6.0, 2.0, -4.0], [1.0, 4.0, 8.0], "stone")
        });
        LevelData {
            name: "course".to_string(),
            spawn: [0.0, 0.0, 0.0],
            spawn_yaw: 0.0,
            materials: Vec::new(),
            blocks,
            teleporters: vec![TeleporterDef {
                center: [12.0, 1.0, 0.0],
                size: [2.0, 2.0, 2.0],
                target: [-15.0, 0.05, -15.0],
            }],
            text_triggers: vec![
                TextTriggerDef {
                    center: [0.0, 1.0, -6.0],
                    size: [4.0, 2.0, 2.0],
                    message: "W/S move, A/D turn, Q/E strafe, Space jumps, V sprints".to_string(),
                    ends_level: false,
                },
                TextTriggerDef {
                    center: [0.0, 3.0, 17.0],
                    size: [2.0, 2.0, 2.0],
                    message: "You made it to the top! Back to the menu...".to_string(),
                    ends_level: true,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_course_is_valid() {
        assert!(LevelData::default_course().validate().is_ok());
    }

    #[test]
    fn parses_minimal_level() {
        let level = LevelData::from_json(
            r#"{ "name": "t", "spawn": [1, 2, 3],
                 "blocks": [{ "center": [0, -0.5, 0], "size": [10, 1, 10], "material": "ground" }] }"#,
        )
        .unwrap();
        assert_eq!(level.spawn, [1.0, 2.0, 3.0]);
        assert_eq!(level.spawn_yaw, 0.0);
        assert!(level.teleporters.is_empty());
        assert!(level.blocks[0].special.is_none());
    }

    #[test]
    fn rejects_empty_and_degenerate_levels() {
        assert!(matches!(
            LevelData::from_json(r#"{ "name": "t", "spawn": [0, 0, 0], "blocks": [] }"#),
            Err(LevelError::Invalid(_))
        ));
        assert!(matches!(
            LevelData::from_json(
                r#"{ "name": "t", "spawn": [0, 0, 0],
                     "blocks": [{ "center": [0, 0, 0], "size": [1, 0, 1], "material": "x" }] }"#
            ),
            Err(LevelError::Invalid(_))
        ));
        assert!(matches!(LevelData::from_json("{"), Err(LevelError::Json(_))));
    }

    #[test]
    fn rejects_non_finite_positions() {
        // 1e300 overflows to infinity when narrowed to f32.
        assert!(matches!(
            LevelData::from_json(
                r#"{ "name": "t", "spawn": [0, 1e300, 0],
                     "blocks": [{ "center": [0, 0, 0], "size": [1, 1, 1], "material": "x" }] }"#
            ),
            Err(LevelError::Invalid(_))
        ));

        let mut level = LevelData::default_course();
        level.teleporters[0].target[0] = f32::NAN;
        assert!(level.validate().is_err());

        let mut level = LevelData::default_course();
        level.blocks[1].center[2] = f32::INFINITY;
        assert!(level.validate().is_err());
    }
}
