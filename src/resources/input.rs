//! Per-frame keyboard and mouse input resource.
//!
//! Captures the subset of input the controller cares about and exposes it to
//! systems via the [`InputState`] resource. Bindings follow the classic layout
//! of the project: W/S move, A/D turn, Q/E strafe, Space jumps, V toggles
//! sprint and Escape quits.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is held this frame.
    pub active: bool,
    /// Whether the key went down this frame.
    pub just_pressed: bool,
    /// Whether the key went up this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    pub fn bound_to(key_binding: KeyboardKey) -> Self {
        Self {
            key_binding,
            ..Self::default()
        }
    }

    /// Overwrite the per-frame flags.
    pub fn set(&mut self, active: bool, just_pressed: bool, just_released: bool) {
        self.active = active;
        self.just_pressed = just_pressed;
        self.just_released = just_released;
    }

    /// Hold the key (test and replay helper).
    pub fn press(&mut self) {
        self.set(true, true, false);
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: KeyboardKey::KEY_NULL,
        }
    }
}

/// Resource capturing the per-frame input relevant to gameplay.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub move_forward: BoolState,
    pub move_back: BoolState,
    pub strafe_left: BoolState,
    pub strafe_right: BoolState,
    pub turn_left: BoolState,
    pub turn_right: BoolState,
    pub jump: BoolState,
    pub sprint_toggle: BoolState,
    pub action_back: BoolState,
    pub action_confirm: BoolState,
    pub mode_debug: BoolState,
    /// Mouse wheel movement this frame. Positive when scrolling up.
    pub scroll_delta: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            move_forward: BoolState::bound_to(KeyboardKey::KEY_W),
            move_back: BoolState::bound_to(KeyboardKey::KEY_S),
            strafe_left: BoolState::bound_to(KeyboardKey::KEY_Q),
            strafe_right: BoolState::bound_to(KeyboardKey::KEY_E),
            turn_left: BoolState::bound_to(KeyboardKey::KEY_A),
            turn_right: BoolState::bound_to(KeyboardKey::KEY_D),
            jump: BoolState::bound_to(KeyboardKey::KEY_SPACE),
            sprint_toggle: BoolState::bound_to(KeyboardKey::KEY_V),
            action_back: BoolState::bound_to(KeyboardKey::KEY_ESCAPE),
            action_confirm: BoolState::bound_to(KeyboardKey::KEY_ENTER),
            mode_debug: BoolState::bound_to(KeyboardKey::KEY_F11),
            scroll_delta: 0.0,
        }
    }
}

impl InputState {
    /// Mutable access to every key state, for polling loops.
    pub fn keys_mut(&mut self) -> [&mut BoolState; 11] {
        [
            &mut self.move_forward,
            &mut self.move_back,
            &mut self.strafe_left,
            &mut self.strafe_right,
            &mut self.turn_left,
            &mut self.turn_right,
            &mut self.jump,
            &mut self.sprint_toggle,
            &mut self.action_back,
            &mut self.action_confirm,
            &mut self.mode_debug,
        ]
    }

    /// Forward/back and right/left axes in {-1, 0, 1}.
    pub fn move_axes(&self) -> (f32, f32) {
        let axis = |pos: &BoolState, neg: &BoolState| {
            (pos.active as i32 - neg.active as i32) as f32
        };
        (
            axis(&self.move_forward, &self.move_back),
            axis(&self.strafe_right, &self.strafe_left),
        )
    }

    /// Clear per-frame edges and scroll so a stale frame is not replayed.
    pub fn clear_edges(&mut self) {
        for key in self.keys_mut() {
            key.just_pressed = false;
            key.just_released = false;
        }
        self.scroll_delta = 0.0;
    }
}
