use super::config::Closure;
use crate::geom::Float3;

/// Cumulative Euclidean distances along an ordered point sequence.
///
/// `entry[0] == 0` and entries never decrease. In `Open` mode there is one
/// entry per point and the closing segment back to point 0 is not measured;
/// in `Closed` mode a final wrap entry holds the full loop length.
///
/// The table indexes the exact sequence it was built from and must be rebuilt
/// whenever that sequence changes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArcLengthTable {
    distances: Vec<f32>,
}

impl ArcLengthTable {
    pub fn build(points: &[Float3], closure: Closure) -> Self {
        if points.is_empty() {
            return Self::default();
        }

        let extra = usize::from(closure.is_closed());
        let mut distances = Vec::with_capacity(points.len() + extra);

        let mut accumulated = 0.0f32;
        distances.push(accumulated);
        for pair in points.windows(2) {
            accumulated += pair[0].distance(pair[1]);
            distances.push(accumulated);
        }

        if closure.is_closed() {
            let last = points[points.len() - 1];
            accumulated += last.distance(points[0]);
            distances.push(accumulated);
        }

        Self { distances }
    }

    pub fn distances(&self) -> &[f32] {
        &self.distances
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Number of sampleable segments.
    pub fn segment_count(&self) -> usize {
        self.distances.len().saturating_sub(1)
    }

    /// Length covered by the table (its last entry).
    pub fn total_length(&self) -> f32 {
        self.distances.last().copied().unwrap_or(0.0)
    }

    /// Maps any non-negative distance into `[0, total_length)`, turning the
    /// track into an infinite loop.
    ///
    /// Returns `None` for negative or non-finite input, or when the table has
    /// no positive length.
    pub fn wrap(&self, d: f32) -> Option<f32> {
        let total = self.total_length();
        if !d.is_finite() || d < 0.0 || total <= 0.0 {
            return None;
        }
        // Float remainder is exact, so the result stays strictly below `total`.
        Some(d % total)
    }

    /// Finds segment `j` with `table[j] <= d < table[j + 1]` and the local
    /// parameter `t` within it.
    ///
    /// Binary search over the monotonic table; selects the same segment a
    /// front-to-back linear scan would. Zero-length segments are never
    /// selected.
    pub fn segment_at(&self, d: f32) -> Option<(usize, f32)> {
        if self.distances.len() < 2 {
            return None;
        }

        let upper = self.distances.partition_point(|&x| x <= d);
        if upper == 0 || upper >= self.distances.len() {
            return None;
        }

        let j = upper - 1;
        let start = self.distances[j];
        let seg_len = self.distances[j + 1] - start;
        let t = (d - start) / seg_len;
        Some((j, t))
    }

    /// `wrap` followed by `segment_at`.
    pub fn locate(&self, d: f32) -> Option<(usize, f32)> {
        self.wrap(d).and_then(|arc| self.segment_at(arc))
    }

    /// How many full loops `d` represents: `floor(d / total_length)`.
    pub fn lap(&self, d: f32) -> i32 {
        let total = self.total_length();
        if total <= 0.0 || !d.is_finite() {
            return 0;
        }
        (d / total).floor() as i32
    }
}
