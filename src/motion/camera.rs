use super::rider::Rider;
use crate::geom::{Float3, WORLD_UP};
use crate::track::Track;

/// Eye, target and up vector for a look-at view matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub eye: Float3,
    pub target: Float3,
    pub up: Float3,
}

/// Third-person camera riding the centreline behind the rider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaseCamera {
    /// Eye height above the centreline.
    pub height: f32,
    /// Distance from the camera base to its target.
    pub look_distance: f32,
}

impl ChaseCamera {
    pub const DEFAULT: Self = Self {
        height: 3.0,
        look_distance: 20.0,
    };

    pub fn new(height: f32, look_distance: f32) -> Self {
        Self {
            height,
            look_distance,
        }
    }

    /// Places the eye above the rider's tracked distance, looking toward the
    /// centreline point the rider is attached to.
    pub fn view(&self, track: &Track, rider: &Rider) -> Option<CameraView> {
        let base = track.sample(rider.distance)?.position;
        let ahead = track.sample(rider.lead_distance())?.position;
        let toward = (ahead - base).try_normalize()?;

        Some(CameraView {
            eye: base + WORLD_UP * self.height,
            target: base + toward * self.look_distance,
            up: WORLD_UP,
        })
    }
}

impl Default for ChaseCamera {
    fn default() -> Self {
        Self::DEFAULT
    }
}
