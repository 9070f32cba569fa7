use log::{debug, warn};

use super::config::Closure;
use super::control::ControlPoints;
use super::curve::ClosedCurve;
use super::error::TrackError;
use crate::geom::{Float3, MIN_SAMPLES};

/// The smoothed racing path: `N` points spaced near-evenly by arc length,
/// sampled as a closed Catmull-Rom loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Centreline {
    curve: ClosedCurve,
}

impl Centreline {
    pub fn curve(&self) -> &ClosedCurve {
        &self.curve
    }

    pub fn points(&self) -> &[Float3] {
        self.curve.points()
    }

    pub fn up_vectors(&self) -> Option<&[Float3]> {
        self.curve.up_vectors()
    }

    pub fn len(&self) -> usize {
        self.curve.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curve.is_empty()
    }

    pub fn total_length(&self) -> f32 {
        self.curve.total_length()
    }
}

/// Resamples the control points into `samples` near-uniformly spaced points.
///
/// Sampling at `i * total / samples` over the raw control polygon yields
/// points whose spacing still follows the uneven chord lengths of that
/// polygon. The same pass is therefore run a second time over its own output,
/// whose arc-length table now tracks the true curve closely.
pub fn build_centreline(
    control: &ControlPoints,
    samples: usize,
    closure: Closure,
) -> Result<Centreline, TrackError> {
    control.validate()?;
    if samples < MIN_SAMPLES {
        return Err(TrackError::TooFewSamples { samples });
    }

    let up_vectors = control.usable_up_vectors().map(<[Float3]>::to_vec);
    if up_vectors.is_none() && !control.up_vectors.is_empty() {
        warn!(
            "ignoring {} up-vectors for {} control points; orientation interpolation disabled",
            control.up_vectors.len(),
            control.len()
        );
    }

    let raw = ClosedCurve::new(control.positions.clone(), up_vectors, closure);
    let (first_points, first_ups) = uniform_pass(&raw, samples)?;

    let intermediate = ClosedCurve::new(first_points, first_ups, closure);
    let (points, ups) = uniform_pass(&intermediate, samples)?;

    let curve = ClosedCurve::new(points, ups, closure);
    if curve.total_length() <= 0.0 {
        return Err(TrackError::ZeroLength);
    }

    debug!(
        "centreline: {} control points -> {} samples, control length {:.3}, first pass {:.3}, final {:.3}",
        control.len(),
        samples,
        raw.total_length(),
        intermediate.total_length(),
        curve.total_length()
    );

    Ok(Centreline { curve })
}

fn uniform_pass(
    curve: &ClosedCurve,
    samples: usize,
) -> Result<(Vec<Float3>, Option<Vec<Float3>>), TrackError> {
    curve.resample(samples).ok_or(TrackError::ZeroLength)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn circle(count: usize, radius: f32) -> ControlPoints {
        let positions = (0..count)
            .map(|i| {
                let a = i as f32 / count as f32 * std::f32::consts::TAU;
                Float3::new(radius * a.cos(), 0.0, radius * a.sin())
            })
            .collect();
        ControlPoints::new(positions)
    }

    fn spacing_deviation(points: &[Float3], closure: Closure) -> f32 {
        let mut gaps: Vec<f32> = points.windows(2).map(|w| w[0].distance(w[1])).collect();
        if closure.is_closed() {
            gaps.push(points[points.len() - 1].distance(points[0]));
        }
        let mean = gaps.iter().sum::<f32>() / gaps.len() as f32;
        gaps.iter()
            .map(|g| (g - mean).abs() / mean)
            .fold(0.0, f32::max)
    }

    #[test]
    fn produces_requested_sample_count() {
        let centreline = build_centreline(&ControlPoints::oval(), 500, Closure::Open).unwrap();
        assert_eq!(centreline.len(), 500);
        assert!(centreline.up_vectors().is_none());
        assert!(centreline.total_length() > 0.0);
    }

    #[test]
    fn first_point_is_first_control_point() {
        let control = ControlPoints::oval();
        let centreline = build_centreline(&control, 200, Closure::Open).unwrap();
        let first = centreline.points()[0];
        assert_relative_eq!(first.x, control.positions[0].x, epsilon = 1e-3);
        assert_relative_eq!(first.z, control.positions[0].z, epsilon = 1e-3);
    }

    #[test]
    fn two_pass_spacing_is_near_uniform_on_smooth_input() {
        let control = circle(12, 50.0);
        let centreline = build_centreline(&control, 300, Closure::Closed).unwrap();
        assert!(spacing_deviation(centreline.points(), Closure::Closed) < 0.05);
    }

    #[test]
    fn second_pass_improves_on_first() {
        let control = ControlPoints::oval();
        let raw = ClosedCurve::new(control.positions.clone(), None, Closure::Closed);
        let (first, _) = raw.resample(500).unwrap();
        let centreline = build_centreline(&control, 500, Closure::Closed).unwrap();

        let before = spacing_deviation(&first, Closure::Closed);
        let after = spacing_deviation(centreline.points(), Closure::Closed);
        assert!(after < before);
    }

    #[test]
    fn up_vectors_carried_through_both_passes() {
        let control = circle(8, 30.0);
        let ups = vec![Float3::UP; control.len()];
        let control = ControlPoints::with_up_vectors(control.positions, ups);
        let centreline = build_centreline(&control, 64, Closure::Closed).unwrap();
        let ups = centreline.up_vectors().unwrap();
        assert_eq!(ups.len(), 64);
        for up in ups {
            assert_relative_eq!(up.y, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn mismatched_up_vectors_disable_orientation() {
        let control = circle(8, 30.0);
        let control = ControlPoints::with_up_vectors(control.positions, vec![Float3::UP; 3]);
        let centreline = build_centreline(&control, 64, Closure::Open).unwrap();
        assert!(centreline.up_vectors().is_none());
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            build_centreline(&ControlPoints::default(), 500, Closure::Open),
            Err(TrackError::EmptyControlPoints)
        );
        assert_eq!(
            build_centreline(&ControlPoints::oval(), 3, Closure::Open),
            Err(TrackError::TooFewSamples { samples: 3 })
        );
        let collapsed = ControlPoints::new(vec![Float3::RIGHT; 5]);
        assert_eq!(
            build_centreline(&collapsed, 16, Closure::Closed),
            Err(TrackError::ZeroLength)
        );
    }
}
