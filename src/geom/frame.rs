use super::math::{Float3, Matrix3};

/// Orthonormal coordinate frame riding along the track.
///
/// - `direction`: forward along the track (tangent)
/// - `normal`: upward, perpendicular to the track surface (binormal)
/// - `lateral`: rightward across the road (`direction x up`)
///
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub direction: Float3,
    pub normal: Float3,
    pub lateral: Float3,
}

impl Frame {
    pub const fn new(direction: Float3, normal: Float3, lateral: Float3) -> Self {
        Self {
            direction,
            normal,
            lateral,
        }
    }

    /// Builds a frame from a travel direction and a reference up vector.
    ///
    /// `lateral = normalize(tangent x up)`, `normal = normalize(lateral x tangent)`.
    /// Returns `None` when the tangent vanishes or is parallel to `up`.
    pub fn from_tangent(tangent: Float3, up: Float3) -> Option<Self> {
        let direction = tangent.try_normalize()?;
        let lateral = direction.cross(up).try_normalize()?;
        let normal = lateral.cross(direction).normalize();
        Some(Self::new(direction, normal, lateral))
    }

    /// Model orientation with columns (direction, normal, lateral), ready to
    /// place a rider or pickup model along the track.
    pub fn to_matrix(self) -> Matrix3 {
        Matrix3::from_columns(self.direction, self.normal, self.lateral)
    }

    pub const DEFAULT: Self = Self::new(Float3::BACK, Float3::UP, Float3::RIGHT);
}

impl Default for Frame {
    fn default() -> Self {
        Self::DEFAULT
    }
}
