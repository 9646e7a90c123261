//! Game configuration resource.
//!
//! Settings are loaded from an INI file. Missing keys keep their defaults,
//! and the result is checked with [`GameConfig::validate`] before use.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 60
//!
//! [player]
//! move_speed = 5
//! rotate_speed = 3
//! jump_speed = 5
//! sprint_multiplier = 2
//! gravity = -9.81
//!
//! [camera]
//! yaw_interpolation_speed = 2
//! pitch_interpolation_speed = 0.1
//! min_pitch = -85
//! max_pitch = 85
//!
//! [zoom]
//! distance = 10
//! min = 0
//! max = 15
//! sensitivity = 1
//! interpolant = 0.15
//! occlusion_offset = 0.5
//!
//! [scene]
//! menu_delay = 6.5
//! text_trigger_lifetime = 5
//! level = ./assets/levels/course.json
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::camerarig::CameraFraming;
use crate::components::occlusion::OcclusionResolver;
use crate::components::player::LocomotionController;
use crate::error::ConfigError;
use crate::resources::physicsscene::DEFAULT_GRAVITY;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_MOVE_SPEED: f32 = 5.0;
const DEFAULT_ROTATE_SPEED: f32 = 3.0;
const DEFAULT_JUMP_SPEED: f32 = 5.0;
const DEFAULT_SPRINT_MULTIPLIER: f32 = 2.0;
const DEFAULT_YAW_INTERPOLATION_SPEED: f32 = 2.0;
const DEFAULT_PITCH_INTERPOLATION_SPEED: f32 = 0.1;
const DEFAULT_MIN_PITCH: f32 = -85.0;
const DEFAULT_MAX_PITCH: f32 = 85.0;
const DEFAULT_ZOOM: f32 = 10.0;
const DEFAULT_MIN_ZOOM: f32 = 0.0;
const DEFAULT_MAX_ZOOM: f32 = 15.0;
const DEFAULT_ZOOM_SENSITIVITY: f32 = 1.0;
const DEFAULT_ZOOM_INTERPOLANT: f32 = 0.15;
const DEFAULT_OCCLUSION_OFFSET: f32 = 0.5;
const DEFAULT_MENU_DELAY: f32 = 6.5;
const DEFAULT_TEXT_TRIGGER_LIFETIME: f32 = 5.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const DEFAULT_LEVEL_PATH: &str = "./assets/levels/course.json";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,

    pub move_speed: f32,
    /// Degrees per tick while a turn key is held.
    pub rotate_speed: f32,
    pub jump_speed: f32,
    pub sprint_multiplier: f32,
    pub gravity: f32,

    pub yaw_interpolation_speed: f32,
    pub pitch_interpolation_speed: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,

    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub zoom_sensitivity: f32,
    pub zoom_interpolant: f32,
    pub occlusion_offset: f32,

    /// Seconds between an ending text trigger and the return to the menu.
    pub menu_delay: f32,
    pub text_trigger_lifetime: f32,
    pub level_path: PathBuf,

    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            move_speed: DEFAULT_MOVE_SPEED,
            rotate_speed: DEFAULT_ROTATE_SPEED,
            jump_speed: DEFAULT_JUMP_SPEED,
            sprint_multiplier: DEFAULT_SPRINT_MULTIPLIER,
            gravity: DEFAULT_GRAVITY,
            yaw_interpolation_speed: DEFAULT_YAW_INTERPOLATION_SPEED,
            pitch_interpolation_speed: DEFAULT_PITCH_INTERPOLATION_SPEED,
            min_pitch: DEFAULT_MIN_PITCH,
            max_pitch: DEFAULT_MAX_PITCH,
            zoom: DEFAULT_ZOOM,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            zoom_sensitivity: DEFAULT_ZOOM_SENSITIVITY,
            zoom_interpolant: DEFAULT_ZOOM_INTERPOLANT,
            occlusion_offset: DEFAULT_OCCLUSION_OFFSET,
            menu_delay: DEFAULT_MENU_DELAY,
            text_trigger_lifetime: DEFAULT_TEXT_TRIGGER_LIFETIME,
            level_path: PathBuf::from(DEFAULT_LEVEL_PATH),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file at `config_path`.
    pub fn load_from_file(&mut self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.load(&self.config_path).map_err(ConfigError::Load)?;
        self.apply_ini(&config);
        info!(
            "Loaded config from {:?}: {}x{} window, fps={}, zoom={} [{}, {}]",
            self.config_path,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.zoom,
            self.min_zoom,
            self.max_zoom
        );
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        config.read(text.to_string()).map_err(ConfigError::Load)?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        let float = |section: &str, key: &str| config.getfloat(section, key).ok().flatten();

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [player], [camera], [zoom] and [scene] numbers
        let floats: [(&str, &str, &mut f32); 17] = [
            ("player", "move_speed", &mut self.move_speed),
            ("player", "rotate_speed", &mut self.rotate_speed),
            ("player", "jump_speed", &mut self.jump_speed),
            ("player", "sprint_multiplier", &mut self.sprint_multiplier),
            ("player", "gravity", &mut self.gravity),
            ("camera", "yaw_interpolation_speed", &mut self.yaw_interpolation_speed),
            ("camera", "pitch_interpolation_speed", &mut self.pitch_interpolation_speed),
            ("camera", "min_pitch", &mut self.min_pitch),
            ("camera", "max_pitch", &mut self.max_pitch),
            ("zoom", "distance", &mut self.zoom),
            ("zoom", "min", &mut self.min_zoom),
            ("zoom", "max", &mut self.max_zoom),
            ("zoom", "sensitivity", &mut self.zoom_sensitivity),
            ("zoom", "interpolant", &mut self.zoom_interpolant),
            ("zoom", "occlusion_offset", &mut self.occlusion_offset),
            ("scene", "menu_delay", &mut self.menu_delay),
            ("scene", "text_trigger_lifetime", &mut self.text_trigger_lifetime),
        ];
        for (section, key, field) in floats {
            if let Some(value) = float(section, key) {
                *field = value as f32;
            }
        }

        if let Some(level) = config.get("scene", "level") {
            self.level_path = PathBuf::from(level);
        }
    }

    /// Reject inconsistent values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &'static str, reason: String| Err(ConfigError::Invalid { key, reason });

        // NaN slips through every comparison below and panics in `clamp`.
        let finite = [
            ("player.gravity", self.gravity),
            ("camera.min_pitch", self.min_pitch),
            ("camera.max_pitch", self.max_pitch),
            ("zoom.distance", self.zoom),
            ("zoom.min", self.min_zoom),
            ("zoom.max", self.max_zoom),
        ];
        for (key, value) in finite {
            if !value.is_finite() {
                return invalid(key, format!("{} is not a finite number", value));
            }
        }
        if self.min_zoom < 0.0 || self.min_zoom > self.max_zoom {
            return invalid(
                "zoom.min",
                format!("expected 0 <= min ({}) <= max ({})", self.min_zoom, self.max_zoom),
            );
        }
        if self.min_pitch > self.max_pitch {
            return invalid(
                "camera.min_pitch",
                format!("min ({}) is greater than max ({})", self.min_pitch, self.max_pitch),
            );
        }
        if !(0.0..=1.0).contains(&self.zoom_interpolant) {
            return invalid(
                "zoom.interpolant",
                format!("{} is outside [0, 1]", self.zoom_interpolant),
            );
        }
        let non_negative = [
            ("player.move_speed", self.move_speed),
            ("player.rotate_speed", self.rotate_speed),
            ("player.jump_speed", self.jump_speed),
            ("player.sprint_multiplier", self.sprint_multiplier),
            ("camera.yaw_interpolation_speed", self.yaw_interpolation_speed),
            ("camera.pitch_interpolation_speed", self.pitch_interpolation_speed),
            ("zoom.sensitivity", self.zoom_sensitivity),
            ("zoom.occlusion_offset", self.occlusion_offset),
            ("scene.menu_delay", self.menu_delay),
            ("scene.text_trigger_lifetime", self.text_trigger_lifetime),
        ];
        for (key, value) in non_negative {
            if value < 0.0 || !value.is_finite() {
                return invalid(key, format!("{} must be a non-negative number", value));
            }
        }
        if self.window_width == 0 || self.window_height == 0 {
            return invalid("window.width", "window size must be non-zero".to_string());
        }
        Ok(())
    }

    /// Save configuration to the INI file at `config_path`.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut config = Ini::new();
        let mut set = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        set("window", "width", self.window_width.to_string());
        set("window", "height", self.window_height.to_string());
        set("window", "target_fps", self.target_fps.to_string());

        set("player", "move_speed", self.move_speed.to_string());
        set("player", "rotate_speed", self.rotate_speed.to_string());
        set("player", "jump_speed", self.jump_speed.to_string());
        set("player", "sprint_multiplier", self.sprint_multiplier.to_string());
        set("player", "gravity", self.gravity.to_string());

        set("camera", "yaw_interpolation_speed", self.yaw_interpolation_speed.to_string());
        set("camera", "pitch_interpolation_speed", self.pitch_interpolation_speed.to_string());
        set("camera", "min_pitch", self.min_pitch.to_string());
        set("camera", "max_pitch", self.max_pitch.to_string());

        set("zoom", "distance", self.zoom.to_string());
        set("zoom", "min", self.min_zoom.to_string());
        set("zoom", "max", self.max_zoom.to_string());
        set("zoom", "sensitivity", self.zoom_sensitivity.to_string());
        set("zoom", "interpolant", self.zoom_interpolant.to_string());
        set("zoom", "occlusion_offset", self.occlusion_offset.to_string());

        set("scene", "menu_delay", self.menu_delay.to_string());
        set("scene", "text_trigger_lifetime", self.text_trigger_lifetime.to_string());
        set("scene", "level", self.level_path.display().to_string());

        config
            .write(&self.config_path)
            .map_err(|e| ConfigError::Save(e.to_string()))?;

        info!("Saved config to {:?}", self.config_path);
        Ok(())
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    pub fn locomotion(&self, model_root: Entity, ground_sensor: Entity) -> LocomotionController {
        LocomotionController::new(model_root, ground_sensor)
            .with_speeds(self.move_speed, self.rotate_speed, self.jump_speed)
            .with_sprint_multiplier(self.sprint_multiplier)
    }

    pub fn camera_framing(&self) -> CameraFraming {
        CameraFraming {
            yaw_interpolation_speed: self.yaw_interpolation_speed,
            pitch_interpolation_speed: self.pitch_interpolation_speed,
            min_pitch: self.min_pitch,
            max_pitch: self.max_pitch,
            ..CameraFraming::default()
        }
    }

    pub fn occlusion_resolver(&self, pivot: Entity) -> OcclusionResolver {
        OcclusionResolver {
            zoom: self.zoom.clamp(self.min_zoom, self.max_zoom),
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            zoom_sensitivity: self.zoom_sensitivity,
            zoom_interpolant: self.zoom_interpolant,
            occlusion_offset: self.occlusion_offset,
            ..OcclusionResolver::new(pivot)
        }
    }
}
