//! Local 3D transform component.
//!
//! [`Transform3D`] stores a position relative to the parent entity (or the
//! world for roots) and an Euler orientation made of a yaw around the world
//! up axis followed by a pitch around the local right axis. Angles are in
//! degrees and follow a left-handed convention: yaw 0 faces +Z, yaw 90 faces
//! +X, and a positive pitch tilts the forward axis downward.
//!
//! World-space values are computed by
//! [`propagate_transforms`](crate::systems::propagate_transforms::propagate_transforms)
//! into [`GlobalTransform3D`](super::globaltransform3d::GlobalTransform3D).

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

/// Rotate `v` by `pitch_degrees` around X, then by `yaw_degrees` around Y.
pub fn rotate_yaw_pitch(v: Vector3, yaw_degrees: f32, pitch_degrees: f32) -> Vector3 {
    let (sp, cp) = pitch_degrees.to_radians().sin_cos();
    let (sy, cy) = yaw_degrees.to_radians().sin_cos();
    let y = v.y * cp - v.z * sp;
    let z = v.y * sp + v.z * cp;
    Vector3::new(v.x * cy + z * sy, y, -v.x * sy + z * cy)
}

/// Unit forward vector for the given orientation.
pub fn forward_of(yaw_degrees: f32, pitch_degrees: f32) -> Vector3 {
    rotate_yaw_pitch(Vector3::new(0.0, 0.0, 1.0), yaw_degrees, pitch_degrees)
}

/// Unit right vector for the given orientation.
pub fn right_of(yaw_degrees: f32, pitch_degrees: f32) -> Vector3 {
    rotate_yaw_pitch(Vector3::new(1.0, 0.0, 0.0), yaw_degrees, pitch_degrees)
}

/// Unit up vector for the given orientation.
pub fn up_of(yaw_degrees: f32, pitch_degrees: f32) -> Vector3 {
    rotate_yaw_pitch(Vector3::new(0.0, 1.0, 0.0), yaw_degrees, pitch_degrees)
}

/// Position and yaw/pitch orientation relative to the parent.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Transform3D {
    pub position: Vector3,
    /// Rotation around the up axis, in degrees.
    pub yaw: f32,
    /// Rotation around the local right axis, in degrees. Positive looks down.
    pub pitch: f32,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            position: Vector3::zero(),
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl Transform3D {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            ..Self::default()
        }
    }

    pub fn from_position(position: Vector3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn forward(&self) -> Vector3 {
        forward_of(self.yaw, self.pitch)
    }

    pub fn right(&self) -> Vector3 {
        right_of(self.yaw, self.pitch)
    }

    pub fn up(&self) -> Vector3 {
        up_of(self.yaw, self.pitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn vec_approx(a: Vector3, b: Vector3) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON && (a.z - b.z).abs() < EPSILON
    }

    #[test]
    fn identity_axes() {
        let t = Transform3D::default();
        assert!(vec_approx(t.forward(), Vector3::new(0.0, 0.0, 1.0)));
        assert!(vec_approx(t.right(), Vector3::new(1.0, 0.0, 0.0)));
        assert!(vec_approx(t.up(), Vector3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn yaw_ninety_faces_positive_x() {
        let t = Transform3D::default().with_yaw(90.0);
        assert!(vec_approx(t.forward(), Vector3::new(1.0, 0.0, 0.0)));
        assert!(vec_approx(t.right(), Vector3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn positive_pitch_looks_down() {
        let t = Transform3D::default().with_pitch(30.0);
        let f = t.forward();
        assert!(f.y < 0.0);
        assert!((f.y + 0.5).abs() < EPSILON);
        assert!(vec_approx(t.right(), Vector3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn pitch_is_applied_before_yaw() {
        let f = forward_of(90.0, 30.0);
        let (s, c) = 30f32.to_radians().sin_cos();
        assert!(vec_approx(f, Vector3::new(c, -s, 0.0)));
    }

    #[test]
    fn builder_sets_fields() {
        let t = Transform3D::new(1.0, 2.0, 3.0).with_yaw(10.0).with_pitch(-5.0);
        assert_eq!(t.position, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(t.yaw, 10.0);
        assert_eq!(t.pitch, -5.0);
    }
}
