//! Scene state resources.
//!
//! [`ActiveScene`] is the authoritative current scene and [`NextScene`] holds
//! a pending request. See
//! [`observe_scene_change_event`](crate::events::scene::observe_scene_change_event)
//! for how a request is applied and hooks are run.

use bevy_ecs::prelude::Resource;

/// Discrete scenes the game can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SceneStates {
    #[default]
    None,
    Setup,
    Menu,
    Level,
    Quitting,
}

impl SceneStates {
    /// Parse a scene by the names used in level data ("Menu", "Level", ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "menu" => Some(SceneStates::Menu),
            "level" | "game" => Some(SceneStates::Level),
            "quit" | "quitting" => Some(SceneStates::Quitting),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NextScenes {
    #[default]
    Unchanged,
    Pending(SceneStates),
}

#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveScene {
    current: SceneStates,
}

impl ActiveScene {
    pub fn new() -> Self {
        ActiveScene {
            current: SceneStates::None,
        }
    }

    pub fn get(&self) -> SceneStates {
        self.current
    }

    /// Update the current scene immediately, without running hooks.
    pub fn set(&mut self, scene: SceneStates) {
        self.current = scene;
    }
}

/// Intent to change scene.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Default)]
pub struct NextScene {
    next: NextScenes,
}

impl NextScene {
    pub fn new() -> Self {
        NextScene {
            next: NextScenes::Unchanged,
        }
    }

    pub fn get(&self) -> NextScenes {
        self.next
    }

    /// Mark a transition as pending; `check_pending_scene` emits the event.
    pub fn set(&mut self, next: SceneStates) {
        self.next = NextScenes::Pending(next);
    }

    pub fn reset(&mut self) {
        self.next = NextScenes::Unchanged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_names_parse() {
        assert_eq!(SceneStates::from_name("Menu"), Some(SceneStates::Menu));
        assert_eq!(SceneStates::from_name(" level "), Some(SceneStates::Level));
        assert_eq!(SceneStates::from_name("credits"), None);
    }

    #[test]
    fn next_scene_set_and_reset() {
        let mut next = NextScene::new();
        assert_eq!(next.get(), NextScenes::Unchanged);
        next.set(SceneStates::Menu);
        assert_eq!(next.get(), NextScenes::Pending(SceneStates::Menu));
        next.reset();
        assert_eq!(next.get(), NextScenes::Unchanged);
    }
}
