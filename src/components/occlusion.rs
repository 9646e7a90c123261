//! Camera occlusion components.
//!
//! [`OcclusionResolver`] lives on the camera entity. Each tick the occlusion
//! systems cast a ray from the rig's move pivot toward the camera and either
//! pull the camera in front of the nearest generic occluder or, for objects
//! carrying [`SpecialOccluder`], let the object react on its own.
//!
//! Distances are positive magnitudes behind the pivot; the camera's local
//! position is `(0, 0, -distance)`.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector3;

use super::boxcollider::LayerMask;

/// Zoom state and occlusion tuning for one camera.
#[derive(Component, Clone, Copy, Debug)]
pub struct OcclusionResolver {
    /// Ray origin (the rig's move pivot).
    pub pivot: Entity,
    /// Desired, unoccluded distance. Adjusted by scrolling.
    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub zoom_sensitivity: f32,
    /// Lerp factor applied to the camera distance every tick.
    pub zoom_interpolant: f32,
    /// Clearance kept in front of a generic occluder.
    pub occlusion_offset: f32,
    pub mask: LayerMask,
    /// Last cast ray (start, end), kept for the debug overlay.
    pub debug_ray: Option<(Vector3, Vector3)>,
}

impl OcclusionResolver {
    pub fn new(pivot: Entity) -> Self {
        Self {
            pivot,
            zoom: 10.0,
            min_zoom: 0.0,
            max_zoom: 15.0,
            zoom_sensitivity: 1.0,
            zoom_interpolant: 0.15,
            occlusion_offset: 0.5,
            mask: LayerMask::DEFAULT,
            debug_ray: None,
        }
    }

    /// Apply a scroll delta to the desired zoom. Scrolling up moves closer.
    pub fn apply_scroll(&mut self, scroll: f32) {
        self.zoom =
            (self.zoom - scroll * self.zoom_sensitivity).clamp(self.min_zoom, self.max_zoom);
    }
}

/// How a special occluder reacts while it blocks the view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OcclusionResponse {
    /// Swap to the transparent material.
    #[default]
    Translucent,
    /// Not drawn at all.
    Hidden,
}

/// Objects that handle being in front of the camera themselves.
pub trait OcclusionHandler {
    fn handle_occlusion(&mut self);
}

/// Object that turns see-through instead of pushing the camera in.
///
/// `is_occluding` is level-triggered: cleared at the start of every tick,
/// raised by the resolver, and turned into a material choice afterwards.
#[derive(Component, Clone, Debug)]
pub struct SpecialOccluder {
    pub usual_material: String,
    pub transparent_material: String,
    pub response: OcclusionResponse,
    pub is_occluding: bool,
}

impl SpecialOccluder {
    pub fn new(usual_material: impl Into<String>, transparent_material: impl Into<String>) -> Self {
        Self {
            usual_material: usual_material.into(),
            transparent_material: transparent_material.into(),
            response: OcclusionResponse::Translucent,
            is_occluding: false,
        }
    }

    pub fn with_response(mut self, response: OcclusionResponse) -> Self {
        self.response = response;
        self
    }

    pub fn reset(&mut self) {
        self.is_occluding = false;
    }

    /// Material to draw with this tick.
    pub fn current_material(&self) -> &str {
        if self.is_occluding {
            &self.transparent_material
        } else {
            &self.usual_material
        }
    }

    /// Whether the object should be drawn this tick.
    pub fn visible(&self) -> bool {
        !(self.is_occluding && self.response == OcclusionResponse::Hidden)
    }
}

impl OcclusionHandler for SpecialOccluder {
    fn handle_occlusion(&mut self) {
        self.is_occluding = true;
    }
}

/// Capability classification of a ray hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OccluderKind {
    Generic,
    Special,
}

impl OccluderKind {
    pub fn classify(has_special_handler: bool) -> Self {
        if has_special_handler {
            OccluderKind::Special
        } else {
            OccluderKind::Generic
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OcclusionHit {
    pub distance: f32,
    pub entity: Entity,
    pub kind: OccluderKind,
}

/// Camera distance proposed for this tick.
///
/// Starts from the desired `zoom`; every generic hit closer than `zoom`
/// proposes `distance - offset` (never below zero) and the closest proposal
/// wins. Special hits never shorten the distance.
///
/// The zero floor is deliberate: a wall closer to the pivot than `offset`
/// parks the camera on the pivot instead of pushing it out in front.
pub fn proposed_distance(zoom: f32, offset: f32, hits: &[OcclusionHit]) -> f32 {
    hits.iter()
        .filter(|h| h.kind == OccluderKind::Generic && h.distance < zoom)
        .map(|h| (h.distance - offset).max(0.0))
        .fold(zoom, f32::min)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(world: &mut World, distance: f32, kind: OccluderKind) -> OcclusionHit {
        OcclusionHit {
            distance,
            entity: world.spawn_empty().id(),
            kind,
        }
    }

    #[test]
    fn no_hits_keeps_zoom() {
        assert_eq!(proposed_distance(10.0, 0.5, &[]), 10.0);
    }

    #[test]
    fn closest_generic_wins_in_any_order() {
        let mut world = World::new();
        let far = hit(&mut world, 8.0, OccluderKind::Generic);
        let near = hit(&mut world, 3.0, OccluderKind::Generic);
        assert_eq!(proposed_distance(10.0, 0.5, &[far, near]), 2.5);
        assert_eq!(proposed_distance(10.0, 0.5, &[near, far]), 2.5);
    }

    #[test]
    fn special_hits_are_ignored() {
        let mut world = World::new();
        let special = hit(&mut world, 1.0, OccluderKind::Special);
        let generic = hit(&mut world, 6.0, OccluderKind::Generic);
        assert_eq!(proposed_distance(10.0, 0.5, &[special, generic]), 5.5);
        assert_eq!(proposed_distance(10.0, 0.5, &[generic, special]), 5.5);
        assert_eq!(proposed_distance(10.0, 0.5, &[special]), 10.0);
    }

    #[test]
    fn hits_beyond_zoom_are_ignored() {
        let mut world = World::new();
        let beyond = hit(&mut world, 12.0, OccluderKind::Generic);
        assert_eq!(proposed_distance(10.0, 0.5, &[beyond]), 10.0);
    }

    #[test]
    fn proposal_never_negative() {
        let mut world = World::new();
        let touching = hit(&mut world, 0.2, OccluderKind::Generic);
        assert_eq!(proposed_distance(10.0, 0.5, &[touching]), 0.0);
        let at_offset = hit(&mut world, 0.5, OccluderKind::Generic);
        assert_eq!(proposed_distance(10.0, 0.5, &[at_offset, touching]), 0.0);
    }

    #[test]
    fn scroll_is_clamped() {
        let mut world = World::new();
        let pivot = world.spawn_empty().id();
        let mut r = OcclusionResolver::new(pivot);
        for _ in 0..100 {
            r.apply_scroll(-1.0);
        }
        assert_eq!(r.zoom, r.max_zoom);
        for _ in 0..100 {
            r.apply_scroll(1.0);
        }
        assert_eq!(r.zoom, r.min_zoom);
    }

    #[test]
    fn special_occluder_material_selection() {
        let mut s = SpecialOccluder::new("stone", "glass");
        assert_eq!(s.current_material(), "stone");
        s.handle_occlusion();
        assert_eq!(s.current_material(), "glass");
        assert!(s.visible());
        s.reset();
        assert_eq!(s.current_material(), "stone");
    }

    #[test]
    fn hidden_response_hides_while_occluding() {
        let mut s = SpecialOccluder::new("stone", "glass").with_response(OcclusionResponse::Hidden);
        assert!(s.visible());
        s.handle_occlusion();
        assert!(!s.visible());
    }

    #[test]
    fn classify_capability() {
        assert_eq!(OccluderKind::classify(true), OccluderKind::Special);
        assert_eq!(OccluderKind::classify(false), OccluderKind::Generic);
    }
}
