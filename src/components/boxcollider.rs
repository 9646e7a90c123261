use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

/// Collision layer membership / filter bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    /// Level geometry and props.
    pub const DEFAULT: LayerMask = LayerMask(1);
    /// The player body.
    pub const PLAYER: LayerMask = LayerMask(1 << 1);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(self, other: LayerMask) -> LayerMask {
        LayerMask(self.0 | other.0)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::DEFAULT
    }
}

/// World-axis-aligned box collider.
///
/// Solid colliders block bodies and raycasts. Trigger colliders are ignored
/// by raycasts and instead report overlaps with colliders on the layers in
/// `detects`.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider3D {
    pub half_extents: Vector3,
    pub offset: Vector3,
    pub is_trigger: bool,
    pub layer: LayerMask,
    pub detects: LayerMask,
}

impl BoxCollider3D {
    /// Create a solid collider with the given full size.
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            half_extents: Vector3::new(width * 0.5, height * 0.5, depth * 0.5),
            offset: Vector3::zero(),
            is_trigger: false,
            layer: LayerMask::DEFAULT,
            detects: LayerMask::NONE,
        }
    }

    /// Turn this collider into a trigger that reports overlaps with `detects`.
    pub fn trigger(mut self, detects: LayerMask) -> Self {
        self.is_trigger = true;
        self.detects = detects;
        self
    }

    pub fn with_offset(mut self, offset: Vector3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_layer(mut self, layer: LayerMask) -> Self {
        self.layer = layer;
        self
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Negative extents are normalized.
    pub fn aabb(&self, position: Vector3) -> (Vector3, Vector3) {
        let c = position + self.offset;
        let h = Vector3::new(
            self.half_extents.x.abs(),
            self.half_extents.y.abs(),
            self.half_extents.z.abs(),
        );
        (c - h, c + h)
    }

    /// AABB vs AABB overlap test against another collider at a different position.
    /// Touching faces do not count.
    pub fn overlaps(&self, position: Vector3, other: &Self, other_position: Vector3) -> bool {
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);
        aabb_overlap(min_a, max_a, min_b, max_b)
    }
}

/// Strict AABB overlap on all three axes.
pub fn aabb_overlap(min_a: Vector3, max_a: Vector3, min_b: Vector3, max_b: Vector3) -> bool {
    min_a.x < max_b.x
        && max_a.x > min_b.x
        && min_a.y < max_b.y
        && max_a.y > min_b.y
        && min_a.z < max_b.z
        && max_a.z > min_b.z
}
