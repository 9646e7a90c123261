//! Keyboard locomotion for the player.
//!
//! - [`player_toggles`] handles the sprint toggle and the quit key.
//! - [`player_move`] turns the model and writes the horizontal velocity.
//! - [`player_jump`] launches the body when the ground sensor reports contact.

use bevy_ecs::prelude::*;
use log::{debug, info};
use raylib::prelude::Vector3;

use crate::components::groundsensor::GroundSensor;
use crate::components::player::{LocomotionController, ModelRoot, Player};
use crate::components::rigidbody::RigidBody3D;
use crate::components::transform3d::{Transform3D, forward_of, right_of};
use crate::resources::input::InputState;
use crate::resources::scene::{NextScene, SceneStates};
use crate::systems::camera::wrap_degrees;

/// Unit planar direction from forward/right axes in the frame of `yaw`, or
/// zero when there is no input.
pub fn planar_direction(yaw: f32, forward_axis: f32, right_axis: f32) -> Vector3 {
    let dir = forward_of(yaw, 0.0) * forward_axis + right_of(yaw, 0.0) * right_axis;
    let len = dir.length();
    if len <= f32::EPSILON {
        Vector3::zero()
    } else {
        dir * (1.0 / len)
    }
}

pub fn player_toggles(
    input: Res<InputState>,
    mut players: Query<&mut LocomotionController, With<Player>>,
    mut next_scene: ResMut<NextScene>,
) {
    if input.sprint_toggle.just_pressed {
        for mut loco in players.iter_mut() {
            if loco.toggle_sprint() {
                info!("Sprint enabled, move speed {}", loco.move_speed);
            } else {
                info!("Sprint disabled, move speed {}", loco.move_speed);
            }
        }
    }
    if input.action_back.just_pressed && !players.is_empty() {
        info!("Quit requested");
        next_scene.set(SceneStates::Quitting);
    }
}

pub fn player_move(
    input: Res<InputState>,
    mut bodies: Query<(&LocomotionController, &mut RigidBody3D), With<Player>>,
    mut models: Query<&mut Transform3D, With<ModelRoot>>,
) {
    let turn = (input.turn_right.active as i32 - input.turn_left.active as i32) as f32;
    let (forward_axis, right_axis) = input.move_axes();

    for (loco, mut body) in bodies.iter_mut() {
        let Ok(mut model) = models.get_mut(loco.model_root) else {
            continue;
        };
        if turn != 0.0 {
            model.yaw = wrap_degrees(model.yaw + turn * loco.rotate_speed);
        }
        let dir = planar_direction(model.yaw, forward_axis, right_axis) * loco.move_speed;
        body.set_horizontal_velocity(dir.x, dir.z);
    }
}

pub fn player_jump(
    input: Res<InputState>,
    mut bodies: Query<(&LocomotionController, &mut RigidBody3D), With<Player>>,
    sensors: Query<&GroundSensor>,
) {
    if !input.jump.just_pressed {
        return;
    }
    for (loco, mut body) in bodies.iter_mut() {
        let grounded = sensors
            .get(loco.ground_sensor)
            .is_ok_and(|sensor| sensor.is_grounded());
        if grounded {
            body.velocity.y = loco.jump_speed;
            debug!("Jump with vertical speed {}", loco.jump_speed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_input_is_normalized() {
        let d = planar_direction(0.0, 1.0, 1.0);
        assert!((d.length() - 1.0).abs() < 1e-5);
        assert!(d.x > 0.0 && d.z > 0.0);
        assert_eq!(d.y, 0.0);
    }

    #[test]
    fn no_input_is_zero() {
        assert_eq!(planar_direction(45.0, 0.0, 0.0), Vector3::zero());
    }

    #[test]
    fn direction_follows_yaw() {
        let d = planar_direction(90.0, 1.0, 0.0);
        assert!((d.x - 1.0).abs() < 1e-5);
        assert!(d.z.abs() < 1e-5);
    }
}
