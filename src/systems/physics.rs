//! Body integration, physics snapshot and trigger detection.
//!
//! - [`physics_step`] applies gravity and velocity to root rigid bodies and
//!   pushes them out of static solids one axis at a time.
//! - [`sync_physics_scene`] rebuilds the [`PhysicsScene`] snapshot from
//!   world-space colliders; it must run after transform propagation.
//! - [`trigger_detector`] compares trigger overlaps with the previous tick
//!   and emits [`TriggerEnterEvent`] / [`TriggerExitEvent`].

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::*;
use raylib::prelude::Vector3;
use rustc_hash::FxHashSet;

use crate::components::boxcollider::BoxCollider3D;
use crate::components::globaltransform3d::GlobalTransform3D;
use crate::components::rigidbody::RigidBody3D;
use crate::components::transform3d::Transform3D;
use crate::events::trigger::{TriggerEnterEvent, TriggerExitEvent};
use crate::resources::physicsscene::{
    ColliderEntry, PhysicsScene, TriggerContacts, overlap_with_skin,
};
use crate::resources::worldtime::WorldTime;

fn component(v: Vector3, axis: usize) -> f32 {
    match axis {
        0 => v.x,
        1 => v.y,
        _ => v.z,
    }
}

fn component_mut(v: &mut Vector3, axis: usize) -> &mut f32 {
    match axis {
        0 => &mut v.x,
        1 => &mut v.y,
        _ => &mut v.z,
    }
}

/// Move `position` by `velocity * dt` against the static boxes.
///
/// Resolves Y first so standing bodies slide freely. A blocked axis has its
/// velocity zeroed.
pub fn integrate_body(
    position: &mut Vector3,
    velocity: &mut Vector3,
    collider: &BoxCollider3D,
    statics: &[(Vector3, Vector3)],
    dt: f32,
) {
    for axis in [1, 0, 2] {
        let delta = component(*velocity, axis) * dt;
        if delta == 0.0 {
            continue;
        }
        *component_mut(position, axis) += delta;
        for (s_min, s_max) in statics {
            let (min, max) = collider.aabb(*position);
            if !overlap_with_skin(min, max, *s_min, *s_max) {
                continue;
            }
            let push = if delta > 0.0 {
                component(*s_min, axis) - component(max, axis)
            } else {
                component(*s_max, axis) - component(min, axis)
            };
            *component_mut(position, axis) += push;
            *component_mut(velocity, axis) = 0.0;
        }
    }
}

pub fn physics_step(
    time: Res<WorldTime>,
    scene: Res<PhysicsScene>,
    mut bodies: Query<(&mut Transform3D, &mut RigidBody3D, &BoxCollider3D), Without<ChildOf>>,
    solids: Query<(&GlobalTransform3D, &BoxCollider3D), Without<RigidBody3D>>,
) {
    let dt = time.delta;
    if dt <= 0.0 {
        return;
    }
    let statics: Vec<(Vector3, Vector3)> = solids
        .iter()
        .filter(|(_, collider)| !collider.is_trigger)
        .map(|(gt, collider)| collider.aabb(gt.position))
        .collect();

    for (mut transform, mut body, collider) in bodies.iter_mut() {
        if body.frozen {
            continue;
        }
        let mut velocity = body.velocity + scene.gravity * dt;
        let mut position = transform.position;
        integrate_body(&mut position, &mut velocity, collider, &statics, dt);
        transform.position = position;
        body.velocity = velocity;
    }
}

pub fn sync_physics_scene(
    mut scene: ResMut<PhysicsScene>,
    colliders: Query<(Entity, &GlobalTransform3D, &BoxCollider3D)>,
) {
    scene.clear();
    for (entity, gt, collider) in colliders.iter() {
        let (min, max) = collider.aabb(gt.position);
        scene.push(ColliderEntry {
            entity,
            min,
            max,
            layer: collider.layer,
            detects: collider.detects,
            is_trigger: collider.is_trigger,
        });
    }
}

/// Emit exits first, then enters, each in entity order.
pub fn trigger_detector(
    scene: Res<PhysicsScene>,
    mut contacts: ResMut<TriggerContacts>,
    mut commands: Commands,
) {
    let current = scene.trigger_overlaps();
    let current_set: FxHashSet<(Entity, Entity)> = current.iter().copied().collect();

    let mut exits: Vec<(Entity, Entity)> = contacts
        .pairs
        .iter()
        .filter(|pair| !current_set.contains(*pair))
        .copied()
        .collect();
    exits.sort();
    for (trigger, other) in exits {
        commands.trigger(TriggerExitEvent { trigger, other });
    }

    for &(trigger, other) in current.iter() {
        if !contacts.pairs.contains(&(trigger, other)) {
            commands.trigger(TriggerEnterEvent { trigger, other });
        }
    }

    contacts.pairs = current_set;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground() -> (Vector3, Vector3) {
        (Vector3::new(-10.0, -1.0, -10.0), Vector3::new(10.0, 0.0, 10.0))
    }

    fn body() -> BoxCollider3D {
        BoxCollider3D::new(0.8, 1.8, 0.8).with_offset(Vector3::new(0.0, 0.9, 0.0))
    }

    #[test]
    fn falling_body_lands_on_top() {
        let mut pos = Vector3::new(0.0, 0.05, 0.0);
        let mut vel = Vector3::new(0.0, -6.0, 0.0);
        integrate_body(&mut pos, &mut vel, &body(), &[ground()], 1.0 / 60.0);
        assert!((pos.y - 0.0).abs() < 1e-5);
        assert_eq!(vel.y, 0.0);
    }

    #[test]
    fn standing_body_walks_freely() {
        let mut pos = Vector3::new(0.0, 0.0, 0.0);
        let mut vel = Vector3::new(3.0, -0.1, 0.0);
        integrate_body(&mut pos, &mut vel, &body(), &[ground()], 0.1);
        assert!((pos.x - 0.3).abs() < 1e-5);
        assert_eq!(vel.x, 3.0);
    }

    #[test]
    fn wall_blocks_horizontal_motion() {
        let wall = (Vector3::new(1.0, 0.0, -5.0), Vector3::new(2.0, 4.0, 5.0));
        let mut pos = Vector3::new(0.5, 0.0, 0.0);
        let mut vel = Vector3::new(5.0, 0.0, 0.0);
        integrate_body(&mut pos, &mut vel, &body(), &[ground(), wall], 0.1);
        assert!((pos.x - 0.6).abs() < 1e-5);
        assert_eq!(vel.x, 0.0);
    }
}
