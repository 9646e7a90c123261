//! Physics query service.
//!
//! [`PhysicsScene`] holds a world-space snapshot of every
//! [`BoxCollider3D`](crate::components::boxcollider::BoxCollider3D), rebuilt
//! each tick by [`sync_physics_scene`](crate::systems::physics::sync_physics_scene)
//! after transforms are propagated. Camera systems query it with raycasts;
//! the trigger detector compares overlaps against [`TriggerContacts`].
//!
//! Raycasts follow the usual engine rules: trigger volumes are never hit, and
//! a collider that contains the ray origin is not reported.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector3;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::components::boxcollider::LayerMask;

/// Penetration below this is treated as touching, not overlapping.
pub const CONTACT_SKIN: f32 = 1e-4;

/// Gravity applied by default, in world units per second squared.
pub const DEFAULT_GRAVITY: f32 = -9.81;

/// One collider in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColliderEntry {
    pub entity: Entity,
    pub min: Vector3,
    pub max: Vector3,
    pub layer: LayerMask,
    pub detects: LayerMask,
    pub is_trigger: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub distance: f32,
}

pub type RayHits = SmallVec<[RayHit; 8]>;

#[derive(Resource, Debug, Clone)]
pub struct PhysicsScene {
    pub gravity: Vector3,
    pub colliders: Vec<ColliderEntry>,
}

impl Default for PhysicsScene {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY)
    }
}

impl PhysicsScene {
    pub fn new(gravity_y: f32) -> Self {
        Self {
            gravity: Vector3::new(0.0, gravity_y, 0.0),
            colliders: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.colliders.clear();
    }

    pub fn push(&mut self, entry: ColliderEntry) {
        self.colliders.push(entry);
    }

    /// All solid colliders on `mask` hit within `max_distance`, nearest first.
    ///
    /// `direction` does not need to be normalized. A zero direction hits
    /// nothing.
    pub fn raycast_all(
        &self,
        origin: Vector3,
        direction: Vector3,
        max_distance: f32,
        mask: LayerMask,
    ) -> RayHits {
        let mut hits = RayHits::new();
        let len = direction.length();
        if len <= f32::EPSILON || max_distance <= 0.0 {
            return hits;
        }
        let dir = direction * (1.0 / len);
        for c in &self.colliders {
            if c.is_trigger || !c.layer.intersects(mask) {
                continue;
            }
            if let Some(t) = ray_aabb(origin, dir, c.min, c.max) {
                if t <= max_distance {
                    hits.push(RayHit {
                        entity: c.entity,
                        distance: t,
                    });
                }
            }
        }
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Nearest solid hit, if any.
    pub fn raycast(
        &self,
        origin: Vector3,
        direction: Vector3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        self.raycast_all(origin, direction, max_distance, mask)
            .into_iter()
            .next()
    }

    /// Current (trigger, other) overlap pairs, sorted.
    ///
    /// A trigger reports solid colliders whose layer is in its `detects`
    /// mask. Colliders never pair with themselves.
    pub fn trigger_overlaps(&self) -> Vec<(Entity, Entity)> {
        let mut pairs = Vec::new();
        for t in self.colliders.iter().filter(|c| c.is_trigger) {
            for o in &self.colliders {
                if o.is_trigger || o.entity == t.entity || !o.layer.intersects(t.detects) {
                    continue;
                }
                if overlap_with_skin(t.min, t.max, o.min, o.max) {
                    pairs.push((t.entity, o.entity));
                }
            }
        }
        pairs.sort();
        pairs.dedup();
        pairs
    }
}

/// AABB overlap that ignores penetrations shallower than [`CONTACT_SKIN`].
pub fn overlap_with_skin(min_a: Vector3, max_a: Vector3, min_b: Vector3, max_b: Vector3) -> bool {
    min_a.x < max_b.x - CONTACT_SKIN
        && max_a.x > min_b.x + CONTACT_SKIN
        && min_a.y < max_b.y - CONTACT_SKIN
        && max_a.y > min_b.y + CONTACT_SKIN
        && min_a.z < max_b.z - CONTACT_SKIN
        && max_a.z > min_b.z + CONTACT_SKIN
}

fn axis(v: Vector3, i: usize) -> f32 {
    match i {
        0 => v.x,
        1 => v.y,
        _ => v.z,
    }
}

/// Slab test of a normalized ray against an AABB.
///
/// Returns the entry distance. Boxes behind the origin or containing it
/// yield `None`.
pub fn ray_aabb(origin: Vector3, dir: Vector3, min: Vector3, max: Vector3) -> Option<f32> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    for i in 0..3 {
        let o = axis(origin, i);
        let d = axis(dir, i);
        let lo = axis(min, i);
        let hi = axis(max, i);
        if d.abs() < 1e-8 {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t1 = (lo - o) * inv;
        let mut t2 = (hi - o) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        t_enter = t_enter.max(t1);
        t_exit = t_exit.min(t2);
        if t_enter > t_exit {
            return None;
        }
    }
    if t_exit < 0.0 || t_enter < 0.0 {
        return None;
    }
    Some(t_enter)
}

/// Trigger overlap pairs seen on the previous tick.
#[derive(Resource, Debug, Clone, Default)]
pub struct TriggerContacts {
    pub pairs: FxHashSet<(Entity, Entity)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(entity: Entity, min: Vector3, max: Vector3) -> ColliderEntry {
        ColliderEntry {
            entity,
            min,
            max,
            layer: LayerMask::DEFAULT,
            detects: LayerMask::NONE,
            is_trigger: false,
        }
    }

    #[test]
    fn ray_hits_box_in_front() {
        let t = ray_aabb(
            Vector3::zero(),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(-1.0, -1.0, 4.0),
            Vector3::new(1.0, 1.0, 6.0),
        );
        assert_eq!(t, Some(4.0));
    }

    #[test]
    fn ray_misses_box_behind_or_beside() {
        let dir = Vector3::new(0.0, 0.0, 1.0);
        let behind = (Vector3::new(-1.0, -1.0, -6.0), Vector3::new(1.0, 1.0, -4.0));
        let beside = (Vector3::new(2.0, -1.0, 4.0), Vector3::new(3.0, 1.0, 6.0));
        assert!(ray_aabb(Vector3::zero(), dir, behind.0, behind.1).is_none());
        assert!(ray_aabb(Vector3::zero(), dir, beside.0, beside.1).is_none());
    }

    #[test]
    fn ray_from_inside_is_not_reported() {
        let t = ray_aabb(
            Vector3::zero(),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(-1.0, -1.0, -1.0),
            Vector3::new(1.0, 1.0, 1.0),
        );
        assert!(t.is_none());
    }

    #[test]
    fn raycast_all_sorted_and_filtered() {
        let mut world = World::new();
        let near = world.spawn_empty().id();
        let far = world.spawn_empty().id();
        let trigger = world.spawn_empty().id();
        let player = world.spawn_empty().id();
        let mut scene = PhysicsScene::default();
        scene.push(solid(far, Vector3::new(-1.0, -1.0, 8.0), Vector3::new(1.0, 1.0, 9.0)));
        scene.push(solid(near, Vector3::new(-1.0, -1.0, 2.0), Vector3::new(1.0, 1.0, 3.0)));
        scene.push(ColliderEntry {
            is_trigger: true,
            ..solid(trigger, Vector3::new(-1.0, -1.0, 1.0), Vector3::new(1.0, 1.0, 1.5))
        });
        scene.push(ColliderEntry {
            layer: LayerMask::PLAYER,
            ..solid(player, Vector3::new(-1.0, -1.0, 0.5), Vector3::new(1.0, 1.0, 0.8))
        });

        let forward = Vector3::new(0.0, 0.0, 1.0);
        let hits = scene.raycast_all(Vector3::zero(), forward * 2.0, 20.0, LayerMask::DEFAULT);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].entity, near);
        assert_eq!(hits[0].distance, 2.0);
        assert_eq!(hits[1].entity, far);

        let limited = scene.raycast_all(Vector3::zero(), forward, 5.0, LayerMask::DEFAULT);
        assert_eq!(limited.len(), 1);
        let short = scene.raycast(Vector3::zero(), forward, 1.0, LayerMask::DEFAULT);
        assert_eq!(short, None);
    }

    #[test]
    fn zero_direction_hits_nothing() {
        let mut world = World::new();
        let e = world.spawn_empty().id();
        let mut scene = PhysicsScene::default();
        scene.push(solid(e, Vector3::new(-1.0, -1.0, 1.0), Vector3::new(1.0, 1.0, 2.0)));
        let hits = scene.raycast_all(Vector3::zero(), Vector3::zero(), 10.0, LayerMask::ALL);
        assert!(hits.is_empty());
    }

    #[test]
    fn trigger_overlaps_respect_detect_mask() {
        let mut world = World::new();
        let sensor = world.spawn_empty().id();
        let ground = world.spawn_empty().id();
        let body = world.spawn_empty().id();
        let mut scene = PhysicsScene::default();
        scene.push(ColliderEntry {
            is_trigger: true,
            detects: LayerMask::DEFAULT,
            ..solid(sensor, Vector3::new(-0.3, -0.1, -0.3), Vector3::new(0.3, 0.1, 0.3))
        });
        scene.push(solid(ground, Vector3::new(-5.0, -1.0, -5.0), Vector3::new(5.0, 0.0, 5.0)));
        scene.push(ColliderEntry {
            layer: LayerMask::PLAYER,
            ..solid(body, Vector3::new(-0.4, 0.0, -0.4), Vector3::new(0.4, 1.8, 0.4))
        });
        assert_eq!(scene.trigger_overlaps(), vec![(sensor, ground)]);
    }

    #[test]
    fn skin_ignores_touching() {
        assert!(!overlap_with_skin(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(0.0, 1.0 - 1e-6, 0.0),
            Vector3::new(1.0, 2.0, 1.0),
        ));
    }
}
