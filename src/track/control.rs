#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::TrackError;
use crate::geom::Float3;

/// Waypoints defining the rough shape of a closed track.
///
/// The last point logically connects back to the first. Up-vectors are
/// optional; they only take part in interpolation when there is exactly one
/// per position.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlPoints {
    pub positions: Vec<Float3>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub up_vectors: Vec<Float3>,
}

impl ControlPoints {
    pub fn new(positions: Vec<Float3>) -> Self {
        Self {
            positions,
            up_vectors: Vec::new(),
        }
    }

    pub fn with_up_vectors(positions: Vec<Float3>, up_vectors: Vec<Float3>) -> Self {
        Self {
            positions,
            up_vectors,
        }
    }

    /// The eight-waypoint oval used by the demo scene.
    pub fn oval() -> Self {
        Self::new(vec![
            Float3::new(240.0, 0.0, 114.0),
            Float3::new(80.0, 0.0, 70.0),
            Float3::new(-21.0, 0.0, 74.0),
            Float3::new(-110.0, 0.0, 60.0),
            Float3::new(-147.0, 0.0, -82.0),
            Float3::new(0.0, 0.0, -143.0),
            Float3::new(109.0, 0.0, -183.0),
            Float3::new(218.0, 0.0, -223.0),
        ])
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Up-vectors, if their count matches the positions.
    pub fn usable_up_vectors(&self) -> Option<&[Float3]> {
        if !self.up_vectors.is_empty() && self.up_vectors.len() == self.positions.len() {
            Some(&self.up_vectors)
        } else {
            None
        }
    }

    /// Rejects empty sets and non-finite coordinates. Up-vectors are only
    /// checked when they are in use.
    pub fn validate(&self) -> Result<(), TrackError> {
        if self.positions.is_empty() {
            return Err(TrackError::EmptyControlPoints);
        }
        if let Some(index) = self.positions.iter().position(|p| !p.is_finite()) {
            return Err(TrackError::NonFiniteControlPoint { index });
        }
        let ups = self.usable_up_vectors().unwrap_or_default();
        if let Some(index) = ups.iter().position(|u| !u.is_finite()) {
            return Err(TrackError::NonFiniteUpVector { index });
        }
        Ok(())
    }
}
