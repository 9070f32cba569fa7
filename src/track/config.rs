#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::TrackError;
use crate::geom::constants::{
    DEFAULT_PATH_WIDTH, DEFAULT_SAMPLES, DEFAULT_STRIDE, DEFAULT_UV_SPAN, MIN_SAMPLES,
};

/// Whether the loop seam between the last and first point is bridged.
///
/// `Open` leaves the closing segment out of the arc-length table, does not
/// offset the final centreline point and emits no closing mesh cell.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Closure {
    #[default]
    Open,
    Closed,
}

impl Closure {
    pub fn is_closed(self) -> bool {
        matches!(self, Closure::Closed)
    }
}

/// Parameters of the build pipeline.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrackConfig {
    /// Number of centreline points produced by each resampling pass.
    pub samples: usize,
    /// Full road width; each edge sits half of it away from the centreline.
    pub path_width: f32,
    /// Offset-curve indices skipped per mesh cell.
    pub stride: usize,
    /// U texture coordinate at the far edge of each mesh cell.
    pub uv_span: f32,
    pub closure: Closure,
}

impl TrackConfig {
    pub fn new(
        samples: usize,
        path_width: f32,
        stride: usize,
        uv_span: f32,
        closure: Closure,
    ) -> Self {
        Self {
            samples,
            path_width,
            stride,
            uv_span,
            closure,
        }
    }

    pub fn with_samples(self, samples: usize) -> Self {
        Self { samples, ..self }
    }

    pub fn with_path_width(self, path_width: f32) -> Self {
        Self { path_width, ..self }
    }

    pub fn with_stride(self, stride: usize) -> Self {
        Self { stride, ..self }
    }

    pub fn with_closure(self, closure: Closure) -> Self {
        Self { closure, ..self }
    }

    pub fn validate(&self) -> Result<(), TrackError> {
        if self.samples < MIN_SAMPLES {
            return Err(TrackError::TooFewSamples {
                samples: self.samples,
            });
        }
        if !self.path_width.is_finite() || self.path_width <= 0.0 {
            return Err(TrackError::InvalidWidth(self.path_width));
        }
        if self.stride == 0 {
            return Err(TrackError::InvalidStride);
        }
        if !self.uv_span.is_finite() {
            return Err(TrackError::InvalidUvSpan(self.uv_span));
        }
        Ok(())
    }
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            path_width: DEFAULT_PATH_WIDTH,
            stride: DEFAULT_STRIDE,
            uv_span: DEFAULT_UV_SPAN,
            closure: Closure::Open,
        }
    }
}
