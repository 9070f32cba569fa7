use crate::geom::{Float3, Frame, Matrix3};
use crate::track::Track;

/// Tuning for [`Rider`]. Rates are per unit of `dt`; the defaults assume
/// `dt` in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiderParams {
    /// Track distance covered per unit of time.
    pub speed: f32,
    /// Lateral offset change per unit of time at full steering input.
    pub steer_rate: f32,
    /// The lateral offset is clamped to `±lateral_limit`.
    pub lateral_limit: f32,
    /// How far ahead of the tracked distance the rider is drawn.
    pub lead: f32,
    /// Distance to the point the rider faces.
    pub look_ahead: f32,
}

impl RiderParams {
    pub const DEFAULT: Self = Self {
        speed: 0.05,
        steer_rate: 0.01,
        lateral_limit: 2.0,
        lead: 8.0,
        look_ahead: 1.0,
    };
}

impl Default for RiderParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Where and how the rider is drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiderPose {
    /// Centreline point the rider is attached to.
    pub centre: Float3,
    /// `centre` shifted across the road by the lateral offset.
    pub position: Float3,
    pub frame: Frame,
    pub lap: i32,
}

impl RiderPose {
    /// Model rotation with columns (direction, normal, lateral).
    pub fn orientation(&self) -> Matrix3 {
        self.frame.to_matrix()
    }
}

/// A player moving along the track at constant speed, steering sideways.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rider {
    pub distance: f32,
    pub lateral_offset: f32,
    pub params: RiderParams,
}

impl Rider {
    pub fn new(distance: f32, params: RiderParams) -> Self {
        Self {
            distance,
            lateral_offset: 0.0,
            params,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.distance += self.params.speed * dt;
    }

    /// `input` is the steering axis: positive steers right, negative left.
    pub fn steer(&mut self, input: f32, dt: f32) {
        let limit = self.params.lateral_limit;
        let offset = self.lateral_offset + self.params.steer_rate * input.clamp(-1.0, 1.0) * dt;
        self.lateral_offset = offset.clamp(-limit, limit);
    }

    /// Distance along the track of the point the rider is attached to.
    pub fn lead_distance(&self) -> f32 {
        self.distance + self.params.lead
    }

    pub fn pose(&self, track: &Track) -> Option<RiderPose> {
        let d = self.lead_distance();
        let centre = track.sample(d)?.position;
        let frame = track.frame_at(d, self.params.look_ahead)?;

        Some(RiderPose {
            centre,
            position: centre + frame.lateral * self.lateral_offset,
            frame,
            lap: track.current_lap(self.distance),
        })
    }
}

impl Default for Rider {
    fn default() -> Self {
        Self::new(0.0, RiderParams::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::{ControlPoints, TrackConfig};
    use approx::assert_relative_eq;

    fn track() -> Track {
        Track::build(&ControlPoints::oval(), TrackConfig::default().with_samples(200)).unwrap()
    }

    #[test]
    fn test_advance_moves_by_speed() {
        let mut rider = Rider::default();
        rider.advance(100.0);
        assert_relative_eq!(rider.distance, 5.0, epsilon = 1e-5);
        rider.advance(20.0);
        assert_relative_eq!(rider.distance, 6.0, epsilon = 1e-5);
    }

    #[test]
    fn test_steer_is_clamped() {
        let mut rider = Rider::default();
        rider.steer(1.0, 50.0);
        assert_relative_eq!(rider.lateral_offset, 0.5, epsilon = 1e-6);
        rider.steer(1.0, 1000.0);
        assert_relative_eq!(rider.lateral_offset, 2.0);
        rider.steer(-1.0, 10_000.0);
        assert_relative_eq!(rider.lateral_offset, -2.0);
    }

    #[test]
    fn test_pose_leads_and_offsets() {
        let track = track();
        let mut rider = Rider::new(30.0, RiderParams::default());
        rider.lateral_offset = 1.5;

        let pose = rider.pose(&track).unwrap();
        let expected_centre = track.sample(38.0).unwrap().position;
        assert_relative_eq!(pose.centre.x, expected_centre.x, epsilon = 1e-4);
        assert_relative_eq!(pose.centre.z, expected_centre.z, epsilon = 1e-4);
        assert_relative_eq!(pose.position.distance(pose.centre), 1.5, epsilon = 1e-4);
        assert_relative_eq!(pose.frame.direction.dot(pose.frame.lateral), 0.0, epsilon = 1e-5);
        assert_eq!(pose.lap, 0);

        let m = pose.orientation();
        assert_eq!(m.c0, pose.frame.direction);
        assert_eq!(m.c2, pose.frame.lateral);
        assert_relative_eq!(
            m.c2.dot(pose.position - pose.centre),
            1.5,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_pose_reports_lap() {
        let track = track();
        let rider = Rider::new(track.total_length() * 2.0 + 1.0, RiderParams::default());
        assert_eq!(rider.pose(&track).unwrap().lap, 2);
    }

    #[test]
    fn test_pose_fails_for_negative_distance() {
        let track = track();
        let rider = Rider::new(-100.0, RiderParams::default());
        assert!(rider.pose(&track).is_none());
    }
}
