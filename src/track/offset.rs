use log::debug;

use super::config::Closure;
use super::error::TrackError;
use crate::geom::{Float3, WORLD_UP};

/// Left and right road edges, each displaced half the path width from the
/// centreline along the local horizontal normal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OffsetCurves {
    pub left: Vec<Float3>,
    pub right: Vec<Float3>,
}

impl OffsetCurves {
    pub fn len(&self) -> usize {
        self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.right.is_empty()
    }
}

/// Offsets each centreline point by `±width/2` along `normalize(tangent x up)`,
/// where the tangent points toward the next centreline point.
///
/// In `Open` mode the final point has no outgoing tangent and is skipped, so
/// each side gets `N - 1` points. In `Closed` mode the final point uses the
/// tangent back toward point 0 and each side gets `N` points.
pub fn build_offset_curves(
    centreline: &[Float3],
    width: f32,
    closure: Closure,
) -> Result<OffsetCurves, TrackError> {
    if !width.is_finite() || width <= 0.0 {
        return Err(TrackError::InvalidWidth(width));
    }

    let n = centreline.len();
    let count = match closure {
        Closure::Open => n.saturating_sub(1),
        Closure::Closed if n >= 2 => n,
        Closure::Closed => 0,
    };

    let half_width = width * 0.5;
    let mut left = Vec::with_capacity(count);
    let mut right = Vec::with_capacity(count);

    for i in 0..count {
        let point = centreline[i];
        let next = centreline[(i + 1) % n];
        let normal = (next - point)
            .try_normalize()
            .and_then(|tangent| tangent.cross(WORLD_UP).try_normalize())
            .ok_or(TrackError::DegenerateGeometry { index: i })?;

        left.push(point - normal * half_width);
        right.push(point + normal * half_width);
    }

    debug!(
        "offset curves: {} points per side from {} centreline points, width {}",
        count, n, width
    );

    Ok(OffsetCurves { left, right })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOLERANCE: f32 = 1e-4;

    fn ring(count: usize, radius: f32, climb: f32) -> Vec<Float3> {
        (0..count)
            .map(|i| {
                let a = i as f32 / count as f32 * std::f32::consts::TAU;
                Float3::new(radius * a.cos(), climb * i as f32, radius * a.sin())
            })
            .collect()
    }

    #[test]
    fn open_mode_skips_final_point() {
        let curves = build_offset_curves(&ring(20, 10.0, 0.0), 4.0, Closure::Open).unwrap();
        assert_eq!(curves.left.len(), 19);
        assert_eq!(curves.right.len(), 19);
    }

    #[test]
    fn closed_mode_offsets_every_point() {
        let points = ring(20, 10.0, 0.0);
        let curves = build_offset_curves(&points, 4.0, Closure::Closed).unwrap();
        assert_eq!(curves.len(), 20);

        // The last pair uses the tangent toward point 0.
        let last = points[19];
        let mid = (curves.left[19] + curves.right[19]) * 0.5;
        assert_relative_eq!(mid.x, last.x, epsilon = TOLERANCE);
        assert_relative_eq!(mid.z, last.z, epsilon = TOLERANCE);
    }

    #[test]
    fn edges_are_width_apart_and_centred() {
        let points = ring(32, 25.0, 0.5);
        let width = 10.0;
        let curves = build_offset_curves(&points, width, Closure::Open).unwrap();

        for i in 0..curves.len() {
            let (l, r) = (curves.left[i], curves.right[i]);
            assert_relative_eq!(l.distance(r), width, epsilon = TOLERANCE);

            let mid = (l + r) * 0.5;
            assert_relative_eq!(mid.x, points[i].x, epsilon = TOLERANCE);
            assert_relative_eq!(mid.y, points[i].y, epsilon = TOLERANCE);
            assert_relative_eq!(mid.z, points[i].z, epsilon = TOLERANCE);
        }
    }

    #[test]
    fn right_edge_is_on_the_right() {
        // Travelling along -z with y up, the right-hand side is +x.
        let points = vec![
            Float3::new(0.0, 0.0, 0.0),
            Float3::new(0.0, 0.0, -1.0),
            Float3::new(0.0, 0.0, -2.0),
        ];
        let curves = build_offset_curves(&points, 2.0, Closure::Open).unwrap();
        assert_relative_eq!(curves.right[0].x, 1.0, epsilon = TOLERANCE);
        assert_relative_eq!(curves.left[0].x, -1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn coincident_points_are_rejected() {
        let points = vec![
            Float3::new(0.0, 0.0, 0.0),
            Float3::new(1.0, 0.0, 0.0),
            Float3::new(1.0, 0.0, 0.0),
            Float3::new(2.0, 0.0, 0.0),
        ];
        assert_eq!(
            build_offset_curves(&points, 2.0, Closure::Open),
            Err(TrackError::DegenerateGeometry { index: 1 })
        );
    }

    #[test]
    fn vertical_tangent_is_rejected() {
        let points = vec![Float3::ZERO, Float3::new(0.0, 5.0, 0.0), Float3::RIGHT];
        assert_eq!(
            build_offset_curves(&points, 2.0, Closure::Open),
            Err(TrackError::DegenerateGeometry { index: 0 })
        );
    }

    #[test]
    fn invalid_width_is_rejected() {
        let points = ring(8, 5.0, 0.0);
        assert_eq!(
            build_offset_curves(&points, -1.0, Closure::Open),
            Err(TrackError::InvalidWidth(-1.0))
        );
    }

    #[test]
    fn tiny_inputs_produce_no_offsets() {
        let single = [Float3::ZERO];
        assert!(build_offset_curves(&single, 2.0, Closure::Open)
            .unwrap()
            .is_empty());
        assert!(build_offset_curves(&single, 2.0, Closure::Closed)
            .unwrap()
            .is_empty());
    }
}
