//! Ground sensor observers.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::components::groundsensor::GroundSensor;
use crate::events::trigger::{TriggerEnterEvent, TriggerExitEvent};

pub fn ground_sensor_enter_observer(
    trigger: On<TriggerEnterEvent>,
    mut sensors: Query<&mut GroundSensor>,
) {
    if let Ok(mut sensor) = sensors.get_mut(trigger.event().trigger) {
        sensor.on_enter();
    }
}

pub fn ground_sensor_exit_observer(
    trigger: On<TriggerExitEvent>,
    mut sensors: Query<&mut GroundSensor>,
) {
    if let Ok(mut sensor) = sensors.get_mut(trigger.event().trigger) {
        sensor.on_exit();
    }
}
