//! Input polling.
//!
//! [`update_input_state`] reads hardware input from raylib each frame and
//! writes it into [`InputState`]. F11 toggles debug mode through
//! [`SwitchDebugEvent`].
use bevy_ecs::prelude::*;

use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::InputState;

/// Poll raylib for keyboard and mouse wheel input.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSendMut<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    for key in input.keys_mut() {
        let binding = key.key_binding;
        key.set(
            rl.is_key_down(binding),
            rl.is_key_pressed(binding),
            rl.is_key_released(binding),
        );
    }
    input.scroll_delta = rl.get_mouse_wheel_move();

    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
}
