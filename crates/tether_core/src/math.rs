//! Geometric value types carried across the bridge
//!
//! These are pure data carriers. Nothing here normalizes or validates;
//! the host owns the meaning of whatever it stores.

use serde::{Deserialize, Serialize};

/// Three `f32` components, laid out exactly as the host expects.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);
    pub const BACK: Self = Self::new(0.0, 0.0, -1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<(f32, f32, f32)> for Vector3 {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<glam::Vec3> for Vector3 {
    fn from(v: glam::Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for glam::Vec3 {
    fn from(v: Vector3) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

/// Four `f32` components (x, y, z, w). Not normalized by this layer.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f32; 4]> for Quaternion {
    fn from([x, y, z, w]: [f32; 4]) -> Self {
        Self::new(x, y, z, w)
    }
}

impl From<glam::Quat> for Quaternion {
    fn from(q: glam::Quat) -> Self {
        Self::new(q.x, q.y, q.z, q.w)
    }
}

impl From<Quaternion> for glam::Quat {
    // from_xyzw does not normalize, which keeps the round trip lossless
    fn from(q: Quaternion) -> Self {
        glam::Quat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_match_literals() {
        assert_eq!(Vector3::ZERO, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(Vector3::ONE, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(Vector3::UP, Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(Vector3::DOWN, Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(Vector3::LEFT, Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(Vector3::RIGHT, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(Vector3::FORWARD, Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(Vector3::BACK, Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(Quaternion::IDENTITY, Quaternion::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn mutating_a_copy_leaves_constant_intact() {
        let mut zero = Vector3::ZERO;
        zero.x = 42.0;
        assert_eq!(Vector3::ZERO.x, 0.0);

        let mut identity = Quaternion::IDENTITY;
        identity.w = -3.0;
        assert_eq!(Quaternion::IDENTITY.w, 1.0);
    }

    #[test]
    fn quaternion_is_not_normalized() {
        let raw = Quaternion::new(2.0, 0.0, 0.0, 2.0);
        let through_glam: Quaternion = glam::Quat::from(raw).into();
        assert_eq!(through_glam, raw);
    }

    #[test]
    fn glam_vector_conversion() {
        let v = Vector3::new(1.0, -2.0, 3.5);
        let g: glam::Vec3 = v.into();
        assert_eq!(g, glam::Vec3::new(1.0, -2.0, 3.5));
        assert_eq!(Vector3::from(g + glam::Vec3::ONE), Vector3::new(2.0, -1.0, 4.5));
    }

    #[test]
    fn layout_is_packed_f32() {
        assert_eq!(std::mem::size_of::<Vector3>(), 12);
        assert_eq!(std::mem::size_of::<Quaternion>(), 16);
    }

    #[test]
    fn serializes_as_named_fields() {
        let json = serde_json::to_string(&Vector3::UP).unwrap();
        assert_eq!(json, r#"{"x":0.0,"y":1.0,"z":0.0}"#);
    }
}
