use log::info;

use super::centreline::{build_centreline, Centreline};
use super::config::TrackConfig;
use super::control::ControlPoints;
use super::curve::CurveSample;
use super::error::TrackError;
use super::mesh::{build_track_mesh, TrackMesh};
use super::offset::{build_offset_curves, OffsetCurves};
use crate::geom::{Float3, Frame, WORLD_UP};
use crate::persistence;

/// A fully built track: centreline, road edges and surface mesh.
///
/// Everything is derived once in [`Track::build`] and never changes
/// afterwards. Moving a control point means building a new `Track`.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    config: TrackConfig,
    control: ControlPoints,
    centreline: Centreline,
    offsets: OffsetCurves,
    mesh: TrackMesh,
}

impl Track {
    /// Runs centreline, offset and mesh stages over `control`.
    pub fn build(control: &ControlPoints, config: TrackConfig) -> Result<Self, TrackError> {
        config.validate()?;

        let centreline = build_centreline(control, config.samples, config.closure)?;
        let offsets =
            build_offset_curves(centreline.points(), config.path_width, config.closure)?;
        let mesh = build_track_mesh(&offsets, config.stride, config.uv_span, config.closure)?;

        info!(
            "built track: {} control points, {} centreline points, length {:.2}, {} vertices",
            control.len(),
            centreline.len(),
            centreline.total_length(),
            mesh.len()
        );

        Ok(Self {
            config,
            control: control.clone(),
            centreline,
            offsets,
            mesh,
        })
    }

    /// Decodes control points from a track file and builds from them.
    pub fn load(bytes: &[u8], config: TrackConfig) -> Result<Self, TrackError> {
        let control = persistence::deserialize(bytes)?;
        Self::build(&control, config)
    }

    /// Encodes this track's control points as a track file.
    pub fn save(&self) -> Vec<u8> {
        persistence::serialize(&self.control)
    }

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    pub fn control_points(&self) -> &ControlPoints {
        &self.control
    }

    pub fn centreline(&self) -> &Centreline {
        &self.centreline
    }

    pub fn offsets(&self) -> &OffsetCurves {
        &self.offsets
    }

    pub fn mesh(&self) -> &TrackMesh {
        &self.mesh
    }

    pub fn total_length(&self) -> f32 {
        self.centreline.total_length()
    }

    /// Point on the final centreline at arc length `d`, wrapping past the end.
    ///
    /// `None` for negative or non-finite `d`. Callers keep their previous
    /// state and skip dependent logic for that frame.
    pub fn sample(&self, d: f32) -> Option<CurveSample> {
        self.centreline.curve().sample(d)
    }

    /// Zero-based lap index: `floor(d / total_length)`.
    pub fn current_lap(&self, d: f32) -> i32 {
        self.centreline.curve().current_lap(d)
    }

    /// Orientation at `d`, facing the centreline point `look_ahead` further on.
    ///
    /// Uses the interpolated up-vector when available, world up otherwise.
    /// A non-positive `look_ahead` falls back to the spline tangent.
    pub fn frame_at(&self, d: f32, look_ahead: f32) -> Option<Frame> {
        let here = self.sample(d)?;
        let up = here.up_or(WORLD_UP);
        let tangent = if look_ahead > 0.0 {
            self.sample(d + look_ahead)?.position - here.position
        } else {
            here.direction
        };
        Frame::from_tangent(tangent, up)
    }

    /// Centreline point at `d` shifted `lateral` units across the road.
    pub fn lateral_point(&self, d: f32, lateral: f32, look_ahead: f32) -> Option<Float3> {
        let here = self.sample(d)?;
        let frame = self.frame_at(d, look_ahead)?;
        Some(here.position + frame.lateral * lateral)
    }
}
