use super::arc_length::ArcLengthTable;
use super::config::Closure;
use crate::geom::{catmull_rom_closed, catmull_rom_tangent_closed, Float3, WORLD_UP};

/// A point on the curve at some arc length.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CurveSample {
    /// Distance along the loop after wraparound, in `[0, total_length)`.
    pub arc: f32,
    /// Segment of the arc-length table the sample fell in.
    pub segment: usize,
    pub position: Float3,
    /// Unit travel direction (analytic spline tangent); `ZERO` if it vanishes.
    pub direction: Float3,
    /// Interpolated, normalized up-vector; `None` when up-vectors are disabled
    /// or the interpolated vector vanishes.
    pub up: Option<Float3>,
}

impl CurveSample {
    pub fn up_or(&self, default: Float3) -> Float3 {
        self.up.unwrap_or(default)
    }
}

/// Ordered points treated as a closed Catmull-Rom loop, with the arc-length
/// table over those same points.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedCurve {
    points: Vec<Float3>,
    up_vectors: Option<Vec<Float3>>,
    table: ArcLengthTable,
    closure: Closure,
}

impl ClosedCurve {
    /// Up-vectors whose count differs from `points` are dropped.
    pub fn new(points: Vec<Float3>, up_vectors: Option<Vec<Float3>>, closure: Closure) -> Self {
        let up_vectors = up_vectors.filter(|ups| !ups.is_empty() && ups.len() == points.len());
        let table = ArcLengthTable::build(&points, closure);
        Self {
            points,
            up_vectors,
            table,
            closure,
        }
    }

    pub fn points(&self) -> &[Float3] {
        &self.points
    }

    pub fn up_vectors(&self) -> Option<&[Float3]> {
        self.up_vectors.as_deref()
    }

    pub fn table(&self) -> &ArcLengthTable {
        &self.table
    }

    pub fn closure(&self) -> Closure {
        self.closure
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total_length(&self) -> f32 {
        self.table.total_length()
    }

    /// Point (and up-vector) at arc length `d` along the loop.
    ///
    /// `d` may exceed the total length; it wraps around. Returns `None` for
    /// negative or non-finite `d`, an empty curve, or a curve with no length.
    pub fn sample(&self, d: f32) -> Option<CurveSample> {
        if self.points.is_empty() {
            return None;
        }
        let arc = self.table.wrap(d)?;
        let (segment, t) = self.table.segment_at(arc)?;

        let position = catmull_rom_closed(&self.points, segment, t);
        let direction = catmull_rom_tangent_closed(&self.points, segment, t).normalize();
        let up = self
            .up_vectors
            .as_deref()
            .and_then(|ups| catmull_rom_closed(ups, segment, t).try_normalize());

        Some(CurveSample {
            arc,
            segment,
            position,
            direction,
            up,
        })
    }

    /// Zero-based lap index for distance `d`.
    pub fn current_lap(&self, d: f32) -> i32 {
        self.table.lap(d)
    }

    /// Samples `count` points spaced `total_length / count` apart, starting at 0.
    ///
    /// Returns `None` if the curve cannot be sampled.
    pub fn resample(&self, count: usize) -> Option<(Vec<Float3>, Option<Vec<Float3>>)> {
        let total = self.total_length();
        if count == 0 || total <= 0.0 {
            return None;
        }

        let spacing = total / count as f32;
        let mut points = Vec::with_capacity(count);
        let mut ups = self.up_vectors.as_ref().map(|_| Vec::with_capacity(count));

        for i in 0..count {
            let sample = self.sample(i as f32 * spacing)?;
            points.push(sample.position);
            if let Some(ups) = ups.as_mut() {
                // A vanishing up-vector reuses the previous one so counts stay aligned.
                let up = sample.up.or_else(|| ups.last().copied()).unwrap_or(WORLD_UP);
                ups.push(up);
            }
        }

        Some((points, ups))
    }
}
