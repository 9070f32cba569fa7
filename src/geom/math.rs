use std::ops::{Add, Mul, Sub};

use super::constants::EPSILON;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 3D vector with f32 components.
/// C-compatible layout for FFI and vertex upload.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Float3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Float3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const BACK: Self = Self::new(0.0, 0.0, -1.0);

    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(self, other: Self) -> f32 {
        (other - self).magnitude()
    }

    /// Returns the unit vector, or `ZERO` when the magnitude is below `EPSILON`.
    pub fn normalize(self) -> Self {
        let mag = self.magnitude();
        if mag < EPSILON {
            return Self::ZERO;
        }
        self * (1.0 / mag)
    }

    /// Like `normalize`, but reports a vanishing vector instead of returning `ZERO`.
    pub fn try_normalize(self) -> Option<Self> {
        let mag = self.magnitude();
        if !mag.is_finite() || mag < EPSILON {
            return None;
        }
        Some(self * (1.0 / mag))
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Float3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Float3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Float3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Default for Float3 {
    fn default() -> Self {
        Self::ZERO
    }
}

/// 2D vector, used for texture coordinates.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Float2 {
    pub x: f32,
    pub y: f32,
}

impl Float2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Self = Self::new(0.0, 0.0);
}

/// 3x3 matrix stored as three column vectors.
/// Used to hand model orientations (direction, normal, lateral) to the renderer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3 {
    pub c0: Float3,
    pub c1: Float3,
    pub c2: Float3,
}

impl Matrix3 {
    pub fn from_columns(c0: Float3, c1: Float3, c2: Float3) -> Self {
        Self { c0, c1, c2 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_float3_normalize() {
        let v = Float3::new(3.0, 4.0, 0.0);
        let normalized = v.normalize();
        assert_relative_eq!(normalized.x, 0.6, epsilon = 1e-6);
        assert_relative_eq!(normalized.y, 0.8, epsilon = 1e-6);
        assert_relative_eq!(normalized.magnitude(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_try_normalize_rejects_zero() {
        assert!(Float3::ZERO.try_normalize().is_none());
        assert!(Float3::new(f32::NAN, 0.0, 0.0).try_normalize().is_none());
        let n = Float3::new(0.0, 0.0, -2.0).try_normalize().unwrap();
        assert_relative_eq!(n.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_float3_cross() {
        let a = Float3::new(1.0, 0.0, 0.0);
        let b = Float3::new(0.0, 1.0, 0.0);
        let c = a.cross(b);
        assert_relative_eq!(c.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(c.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(c.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_float3_distance() {
        let a = Float3::new(1.0, 2.0, 3.0);
        let b = Float3::new(4.0, 6.0, 3.0);
        assert_relative_eq!(a.distance(b), 5.0, epsilon = 1e-6);
    }
}
