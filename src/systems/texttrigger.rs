//! Text trigger volumes.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::player::Player;
use crate::components::texttrigger::{TextTrigger, UiText};
use crate::components::ttl::Ttl;
use crate::events::levelcomplete::LevelCompleteEvent;
use crate::events::trigger::TriggerEnterEvent;
use crate::resources::scene::SceneStates;

/// Reveal the linked text the first time the player enters, schedule the
/// trigger's despawn and, for ending triggers, the return to the menu.
pub fn text_trigger_observer(
    trigger: On<TriggerEnterEvent>,
    mut text_triggers: Query<&mut TextTrigger>,
    players: Query<(), With<Player>>,
    mut texts: Query<&mut UiText>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let Ok(mut text_trigger) = text_triggers.get_mut(event.trigger) else {
        return;
    };
    if text_trigger.fired || !players.contains(event.other) {
        return;
    }
    text_trigger.fired = true;

    if let Ok(mut text) = texts.get_mut(text_trigger.ui) {
        text.visible = true;
        info!("Showing text: {}", text.content);
    }
    commands
        .entity(event.trigger)
        .insert(Ttl::new(text_trigger.lifetime));

    if text_trigger.ends_level {
        commands.trigger(LevelCompleteEvent {
            scene: SceneStates::Menu,
            delay: text_trigger.menu_delay,
        });
    }
}
