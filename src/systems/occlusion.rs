//! Camera occlusion handling.
//!
//! Per tick, in schedule order:
//! 1. [`camera_zoom`] applies scroll input to the desired zoom.
//! 2. [`special_occluder_reset`] clears every special occluder flag.
//! 3. [`occlusion_check`] casts from the move pivot toward the camera, lets
//!    special occluders handle themselves and eases the camera toward the
//!    distance left by generic ones.
//! 4. [`special_occluder_apply`] turns the flags into materials.

use bevy_ecs::prelude::*;
use log::debug;
use raylib::prelude::Vector3;
use smallvec::SmallVec;

use crate::components::globaltransform3d::GlobalTransform3D;
use crate::components::occlusion::{
    OccluderKind, OcclusionHandler, OcclusionHit, OcclusionResolver, SpecialOccluder,
    proposed_distance,
};
use crate::components::renderable::Renderable;
use crate::components::transform3d::Transform3D;
use crate::resources::debugmode::DebugMode;
use crate::resources::input::InputState;
use crate::resources::physicsscene::PhysicsScene;

pub fn camera_zoom(input: Res<InputState>, mut resolvers: Query<&mut OcclusionResolver>) {
    if input.scroll_delta == 0.0 {
        return;
    }
    for mut resolver in resolvers.iter_mut() {
        resolver.apply_scroll(input.scroll_delta);
    }
}

pub fn special_occluder_reset(mut occluders: Query<&mut SpecialOccluder>) {
    for mut occluder in occluders.iter_mut() {
        occluder.reset();
    }
}

/// Classify the hits closer than the desired zoom.
pub fn classify_hits(
    scene: &PhysicsScene,
    origin: Vector3,
    direction: Vector3,
    resolver: &OcclusionResolver,
    is_special: impl Fn(Entity) -> bool,
) -> SmallVec<[OcclusionHit; 8]> {
    scene
        .raycast_all(origin, direction, resolver.zoom, resolver.mask)
        .iter()
        .filter(|hit| hit.distance < resolver.zoom)
        .map(|hit| OcclusionHit {
            distance: hit.distance,
            entity: hit.entity,
            kind: OccluderKind::classify(is_special(hit.entity)),
        })
        .collect()
}

pub fn occlusion_check(
    scene: Res<PhysicsScene>,
    debug_mode: Option<Res<DebugMode>>,
    mut cameras: Query<(&mut OcclusionResolver, &mut Transform3D, &GlobalTransform3D)>,
    pivots: Query<&GlobalTransform3D>,
    mut specials: Query<&mut SpecialOccluder>,
) {
    for (mut resolver, mut transform, camera_gt) in cameras.iter_mut() {
        let Ok(pivot) = pivots.get(resolver.pivot) else {
            continue;
        };
        let origin = pivot.position;
        // The camera sits on its pitch pivot's -Z axis.
        let direction = -camera_gt.forward();

        let hits = classify_hits(&scene, origin, direction, &resolver, |e| {
            specials.contains(e)
        });
        for hit in hits.iter().filter(|h| h.kind == OccluderKind::Special) {
            if let Ok(mut special) = specials.get_mut(hit.entity) {
                special.handle_occlusion();
            }
        }

        let proposed = proposed_distance(resolver.zoom, resolver.occlusion_offset, &hits);
        let target = Vector3::new(0.0, 0.0, -proposed);
        transform.position =
            transform.position + (target - transform.position) * resolver.zoom_interpolant;

        resolver.debug_ray = Some((origin, origin + direction * resolver.zoom));
        if debug_mode.is_some() {
            debug!(
                "Occlusion ray hit {} objects ({} special), proposed distance {:.2}",
                hits.len(),
                hits.iter()
                    .filter(|h| h.kind == OccluderKind::Special)
                    .count(),
                proposed
            );
        }
    }
}

/// Swap special occluders between their usual and transparent materials.
pub fn special_occluder_apply(mut occluders: Query<(&SpecialOccluder, &mut Renderable)>) {
    for (occluder, mut renderable) in occluders.iter_mut() {
        let material = occluder.current_material();
        if renderable.material != material {
            renderable.material = material.to_string();
        }
    }
}
