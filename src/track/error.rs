//! Build-time error types.

use thiserror::Error;

use crate::persistence::PersistenceError;

/// Errors raised while building a track. Runtime queries never fail with
/// these; they return `None` instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackError {
    /// No control points were supplied.
    #[error("control point set is empty")]
    EmptyControlPoints,

    /// A control point contains NaN or infinity.
    #[error("control point {index} is not finite")]
    NonFiniteControlPoint { index: usize },

    /// An in-use up-vector contains NaN or infinity.
    #[error("up-vector {index} is not finite")]
    NonFiniteUpVector { index: usize },

    /// The centreline needs at least four samples for the interpolation window.
    #[error("centreline needs at least 4 samples, got {samples}")]
    TooFewSamples { samples: usize },

    /// Road width must be finite and positive.
    #[error("invalid path width: {0}")]
    InvalidWidth(f32),

    /// Mesh stride must be at least one.
    #[error("mesh stride must be at least 1")]
    InvalidStride,

    /// UV span must be finite.
    #[error("invalid uv span: {0}")]
    InvalidUvSpan(f32),

    /// The point sequence has no extent to sample along.
    #[error("track has zero length")]
    ZeroLength,

    /// Consecutive centreline points coincide or the tangent points straight up,
    /// so no lateral offset direction exists.
    #[error("degenerate geometry at centreline point {index}")]
    DegenerateGeometry { index: usize },

    /// Loading the control points failed.
    #[error("failed to load track: {0}")]
    Persistence(#[from] PersistenceError),
}
