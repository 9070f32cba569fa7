//! Racetrack - closed-loop racing track generation.
//!
//! # Architecture
//!
//! Layered modules with strict inward-only dependencies:
//!
//! - **geom**: Math primitives (Float3, Frame, Catmull-Rom interpolation)
//! - **track**: Centreline, road edges, mesh, arc-length sampling
//! - **persistence**: KTRK binary track files
//! - **motion**: Rider, chase camera and pickups driven by track sampling
//! - **ffi**: C FFI bindings
//!
//! # Usage
//!
//! ```
//! use racetrack::{ControlPoints, Track, TrackConfig};
//!
//! let track = Track::build(&ControlPoints::oval(), TrackConfig::default()).unwrap();
//! let sample = track.sample(track.total_length() * 1.5).unwrap();
//! assert_eq!(track.current_lap(track.total_length() * 1.5), 1);
//! # let _ = sample.position;
//! ```
//!
//! For C/C#/Unity, link the cdylib and use `trk_*` FFI functions.

pub mod geom;
pub mod motion;
pub mod persistence;
pub mod track;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types at crate root
pub use geom::{Float2, Float3, Frame, Matrix3};
pub use track::{
    Closure, ControlPoints, CurveSample, Track, TrackConfig, TrackError, TrackVertex,
};
