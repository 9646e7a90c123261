//! Camera framing: yaw follow and terrain-adaptive pitch.
//!
//! The yaw pivot chases the model's facing and the pitch pivot chases a pitch
//! sampled from the terrain ahead. Both use [`track_angle`], a capped-rate
//! tracker: the angle moves by at most `180 * dt * speed` degrees per tick
//! along the shortest path and lands exactly on the target once it is within
//! one step.

use bevy_ecs::prelude::*;
use log::error;
use raylib::prelude::Vector3;

use crate::components::boxcollider::LayerMask;
use crate::components::camerarig::{CameraFraming, CameraRig, PitchProbe, RigNode};
use crate::components::globaltransform3d::GlobalTransform3D;
use crate::components::occlusion::OcclusionResolver;
use crate::components::transform3d::Transform3D;
use crate::resources::physicsscene::PhysicsScene;
use crate::resources::worldtime::WorldTime;

/// Wrap an angle into (-180, 180].
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Largest angle change allowed this tick.
pub fn max_angle_step(dt: f32, speed: f32) -> f32 {
    180.0 * dt * speed
}

/// Move `current` toward `target` by at most `max_step` degrees along the
/// shortest path. Returns `target` itself once it is within reach.
pub fn track_angle(current: f32, target: f32, max_step: f32) -> f32 {
    let diff = wrap_degrees(target - current);
    if diff.abs() <= max_step {
        target
    } else {
        wrap_degrees(current + max_step.copysign(diff))
    }
}

/// Pick one of the three terrain samples.
///
/// Rules in priority order, first match wins: uphill (short ≥ medium ≥ long)
/// and downhill (short ≤ medium ≤ long) use long; a crest (short ≥ medium ≤
/// long) or a dip (short ≤ medium ≥ long) uses medium; anything else uses
/// short.
pub fn select_pitch(short: f32, medium: f32, long: f32) -> f32 {
    if short >= medium && medium >= long {
        long
    } else if short <= medium && medium <= long {
        long
    } else if short >= medium && medium <= long {
        medium
    } else if short <= medium && medium >= long {
        medium
    } else {
        short
    }
}

/// Pitch (degrees, positive looks down) toward the ground ahead of `origin`.
///
/// Casts along `normalize(forward * 2 + up)` for `probe.forward_distance`,
/// backs off to 90% of the nearest hit, then casts along `-up` for
/// `probe.down_distance`. The angle comes from the height and horizontal
/// distance of the down-cast end point relative to `origin`. With nothing
/// below, the full down distance is used.
pub fn sample_terrain_pitch(
    scene: &PhysicsScene,
    origin: Vector3,
    forward: Vector3,
    up: Vector3,
    probe: PitchProbe,
    mask: LayerMask,
) -> f32 {
    let forward_and_up = (forward * 2.0 + up).normalized();

    let forward_distance = scene
        .raycast(origin, forward_and_up, probe.forward_distance, mask)
        .map_or(probe.forward_distance, |hit| hit.distance)
        * 0.9;

    let down_origin = origin + forward_and_up * forward_distance;
    let down_distance = scene
        .raycast(down_origin, -up, probe.down_distance, mask)
        .map_or(probe.down_distance, |hit| hit.distance);

    let height = forward_and_up.y * forward_distance - down_distance;
    let horizontal = Vector3::new(forward_and_up.x, 0.0, forward_and_up.z) * forward_distance;
    -height.atan2(horizontal.length()).to_degrees()
}

/// Target pitch from the three configured probes.
pub fn terrain_pitch(
    scene: &PhysicsScene,
    framing: &CameraFraming,
    model: &GlobalTransform3D,
) -> f32 {
    let sample = |probe: PitchProbe| {
        sample_terrain_pitch(
            scene,
            model.position,
            model.forward(),
            model.up(),
            probe,
            framing.terrain_mask,
        )
    };
    select_pitch(
        sample(framing.short_probe),
        sample(framing.medium_probe),
        sample(framing.long_probe),
    )
}

/// Turn each yaw pivot toward its model's facing.
pub fn camera_yaw(
    time: Res<WorldTime>,
    mut rigs: Query<(&CameraRig, &CameraFraming, &mut Transform3D)>,
    models: Query<&GlobalTransform3D>,
) {
    for (rig, framing, mut yaw_pivot) in rigs.iter_mut() {
        let Ok(model) = models.get(rig.model_root) else {
            continue;
        };
        let step = max_angle_step(time.delta, framing.yaw_interpolation_speed);
        yaw_pivot.yaw = track_angle(yaw_pivot.yaw, model.yaw, step);
    }
}

/// Tilt each pitch pivot toward the terrain ahead of the model.
pub fn camera_pitch(
    time: Res<WorldTime>,
    scene: Res<PhysicsScene>,
    rigs: Query<(&CameraRig, &CameraFraming)>,
    models: Query<&GlobalTransform3D>,
    mut pivots: Query<&mut Transform3D>,
) {
    for (rig, framing) in rigs.iter() {
        let Ok(model) = models.get(rig.model_root) else {
            continue;
        };
        let Ok(mut pitch_pivot) = pivots.get_mut(rig.pitch_pivot) else {
            continue;
        };
        let target = terrain_pitch(&scene, framing, model);
        let step = max_angle_step(time.delta, framing.pitch_interpolation_speed);
        let pitch = track_angle(pitch_pivot.pitch, target, step);
        pitch_pivot.pitch = framing.clamp_pitch(pitch);
    }
}

/// Check newly added rigs before they are used.
pub fn validate_camera_rigs(
    rigs: Query<(Entity, &CameraRig), Added<CameraRig>>,
    nodes: Query<(Has<Transform3D>, Has<OcclusionResolver>)>,
) -> Result {
    for (entity, rig) in rigs.iter() {
        let lookup = |e: Entity| {
            nodes
                .get(e)
                .ok()
                .map(|(has_transform, has_resolver)| RigNode {
                    has_transform,
                    has_resolver,
                })
        };
        if let Err(err) = rig.check(entity, lookup) {
            error!("{}", err);
            return Err(err.into());
        }
    }
    Ok(())
}
