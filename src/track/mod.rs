//! Track generation pipeline and runtime sampling.
//!
//! Control points are smoothed into a uniformly spaced centreline, offset
//! into left and right road edges, and triangulated into a surface mesh.
//! [`Track`] owns the result and answers per-frame distance queries.

mod arc_length;
mod centreline;
mod config;
mod control;
mod curve;
mod error;
mod mesh;
mod offset;
mod pipeline;

pub use arc_length::ArcLengthTable;
pub use centreline::{build_centreline, Centreline};
pub use config::{Closure, TrackConfig};
pub use control::ControlPoints;
pub use curve::{ClosedCurve, CurveSample};
pub use error::TrackError;
pub use mesh::{build_track_mesh, TrackMesh, TrackVertex};
pub use offset::{build_offset_curves, OffsetCurves};
pub use pipeline::Track;
