//! UI text labels and the trigger volumes that reveal them.

use bevy_ecs::prelude::*;

/// Trigger volume that shows a [`UiText`] the first time the player enters.
///
/// After firing, the trigger entity despawns once `lifetime` seconds have
/// passed. With `ends_level` set it also schedules the return to the menu
/// `menu_delay` seconds later.
#[derive(Component, Clone, Copy, Debug)]
pub struct TextTrigger {
    pub ui: Entity,
    pub lifetime: f32,
    pub ends_level: bool,
    pub menu_delay: f32,
    pub fired: bool,
}

impl TextTrigger {
    pub fn new(ui: Entity, lifetime: f32) -> Self {
        Self {
            ui,
            lifetime,
            ends_level: false,
            menu_delay: 0.0,
            fired: false,
        }
    }

    pub fn ending_level(mut self, menu_delay: f32) -> Self {
        self.ends_level = true;
        self.menu_delay = menu_delay;
        self
    }
}

/// Screen-space text label.
#[derive(Component, Clone, Debug)]
pub struct UiText {
    pub content: String,
    pub x: i32,
    pub y: i32,
    pub font_size: i32,
    pub visible: bool,
}

impl UiText {
    pub fn hidden(content: impl Into<String>, x: i32, y: i32, font_size: i32) -> Self {
        Self {
            content: content.into(),
            x,
            y,
            font_size,
            visible: false,
        }
    }

    pub fn shown(mut self) -> Self {
        self.visible = true;
        self
    }
}
