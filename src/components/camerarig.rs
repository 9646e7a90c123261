//! Camera rig wiring and framing tuning.
//!
//! A rig is a chain of pivots parented under the player body:
//!
//! ```text
//! body ─┬─ model root
//!       ├─ ground sensor
//!       └─ yaw pivot (CameraRig + CameraFraming)
//!            └─ move pivot
//!                 └─ pitch pivot
//!                      └─ camera (OcclusionResolver)
//! ```
//!
//! The yaw pivot follows the model's facing, the pitch pivot tilts with the
//! terrain ahead, and the camera slides along its local Z axis to avoid
//! occluders. References are checked once by
//! [`validate_camera_rigs`](crate::systems::camera::validate_camera_rigs).

use bevy_ecs::prelude::*;

use super::boxcollider::LayerMask;
use crate::error::RigError;

/// What a rig check needs to know about one referenced entity.
#[derive(Clone, Copy, Debug, Default)]
pub struct RigNode {
    pub has_transform: bool,
    pub has_resolver: bool,
}

/// Entities making up a camera rig. Lives on the yaw pivot.
#[derive(Component, Clone, Copy, Debug)]
pub struct CameraRig {
    pub model_root: Entity,
    pub move_pivot: Entity,
    pub pitch_pivot: Entity,
    pub camera: Entity,
}

impl CameraRig {
    /// Verify every referenced entity exists with the components it needs.
    ///
    /// `lookup` returns `None` for entities that do not exist.
    pub fn check(
        &self,
        rig: Entity,
        lookup: impl Fn(Entity) -> Option<RigNode>,
    ) -> Result<(), RigError> {
        let roles = [
            ("model root", self.model_root),
            ("move pivot", self.move_pivot),
            ("pitch pivot", self.pitch_pivot),
            ("camera", self.camera),
        ];
        for (role, entity) in roles {
            let node = lookup(entity).ok_or(RigError::MissingEntity { rig, role, entity })?;
            if !node.has_transform {
                return Err(RigError::MissingComponent {
                    rig,
                    role,
                    entity,
                    component: "Transform3D",
                });
            }
        }
        let camera = lookup(self.camera).unwrap_or_default();
        if !camera.has_resolver {
            return Err(RigError::MissingComponent {
                rig,
                role: "camera",
                entity: self.camera,
                component: "OcclusionResolver",
            });
        }
        Ok(())
    }
}

/// One terrain sample: how far ahead and how far down to probe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PitchProbe {
    pub forward_distance: f32,
    pub down_distance: f32,
}

impl PitchProbe {
    pub const fn new(forward_distance: f32, down_distance: f32) -> Self {
        Self {
            forward_distance,
            down_distance,
        }
    }
}

/// Yaw follow and terrain-adaptive pitch tuning.
#[derive(Component, Clone, Copy, Debug)]
pub struct CameraFraming {
    pub yaw_interpolation_speed: f32,
    pub pitch_interpolation_speed: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub short_probe: PitchProbe,
    pub medium_probe: PitchProbe,
    pub long_probe: PitchProbe,
    /// Layers the probes can hit. Must exclude the player.
    pub terrain_mask: LayerMask,
}

impl Default for CameraFraming {
    fn default() -> Self {
        Self {
            yaw_interpolation_speed: 2.0,
            pitch_interpolation_speed: 0.1,
            min_pitch: -85.0,
            max_pitch: 85.0,
            short_probe: PitchProbe::new(2.0, 5.0),
            medium_probe: PitchProbe::new(5.0, 100.0),
            long_probe: PitchProbe::new(5.0, 25.0),
            terrain_mask: LayerMask::DEFAULT,
        }
    }
}

impl CameraFraming {
    pub fn clamp_pitch(&self, pitch: f32) -> f32 {
        pitch.clamp(self.min_pitch, self.max_pitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig(world: &mut World) -> (Entity, CameraRig) {
        let ids: Vec<Entity> = (0..5).map(|_| world.spawn_empty().id()).collect();
        (
            ids[0],
            CameraRig {
                model_root: ids[1],
                move_pivot: ids[2],
                pitch_pivot: ids[3],
                camera: ids[4],
            },
        )
    }

    #[test]
    fn check_accepts_complete_rig() {
        let mut world = World::new();
        let (e, r) = rig(&mut world);
        let ok = r.check(e, |_| {
            Some(RigNode {
                has_transform: true,
                has_resolver: true,
            })
        });
        assert!(ok.is_ok());
    }

    #[test]
    fn check_reports_missing_pitch_pivot_transform() {
        let mut world = World::new();
        let (e, r) = rig(&mut world);
        let pitch = r.pitch_pivot;
        let err = r
            .check(e, |x| {
                Some(RigNode {
                    has_transform: x != pitch,
                    has_resolver: true,
                })
            })
            .unwrap_err();
        assert_eq!(
            err,
            RigError::MissingComponent {
                rig: e,
                role: "pitch pivot",
                entity: pitch,
                component: "Transform3D"
            }
        );
    }

    #[test]
    fn check_reports_missing_entities_and_resolver() {
        let mut world = World::new();
        let (e, r) = rig(&mut world);
        let model = r.model_root;
        assert!(matches!(
            r.check(e, |x| (x != model).then(RigNode::default)),
            Err(RigError::MissingEntity { role: "model root", .. })
        ));
        assert!(matches!(
            r.check(e, |_| Some(RigNode {
                has_transform: true,
                has_resolver: false
            })),
            Err(RigError::MissingComponent {
                component: "OcclusionResolver",
                ..
            })
        ));
    }

    #[test]
    fn default_probes() {
        let f = CameraFraming::default();
        assert_eq!(f.short_probe, PitchProbe::new(2.0, 5.0));
        assert_eq!(f.medium_probe, PitchProbe::new(5.0, 100.0));
        assert_eq!(f.long_probe, PitchProbe::new(5.0, 25.0));
        assert!(!f.terrain_mask.intersects(LayerMask::PLAYER));
    }

    #[test]
    fn clamp_pitch_limits() {
        let f = CameraFraming::default();
        assert_eq!(f.clamp_pitch(120.0), 85.0);
        assert_eq!(f.clamp_pitch(-90.0), -85.0);
        assert_eq!(f.clamp_pitch(10.0), 10.0);
    }
}
