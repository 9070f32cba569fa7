use std::ops::{Add, Mul, Sub};

/// Values that can be blended by a spline: positions, up-vectors, scalars.
///
/// Only vector-space operations are required; nothing here assumes a
/// particular dimension.
pub trait Interpolate:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self>
{
}

impl<T> Interpolate for T where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T>
{
}

/// Evaluates the uniform Catmull-Rom segment between `p1` and `p2`.
///
/// Returns `p1` at `t = 0` and `p2` at `t = 1`. Sliding the four-point window
/// by one keeps the curve C1-continuous across segment boundaries. `t` outside
/// `[0, 1]` extrapolates and is not guaranteed to lie on the curve.
pub fn catmull_rom<T: Interpolate>(p0: T, p1: T, p2: T, p3: T, t: f32) -> T {
    let t2 = t * t;
    let t3 = t2 * t;

    let a = p1;
    let b = (p2 - p0) * 0.5;
    let c = (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * 0.5;
    let d = (p1 * 3.0 - p0 - p2 * 3.0 + p3) * 0.5;

    a + b * t + c * t2 + d * t3
}

/// Catmull-Rom over a closed sequence, using the window `(j-1, j, j+1, j+2)`
/// with modulo wraparound so the last segment blends back through 0 and 1.
pub fn catmull_rom_closed<T: Interpolate>(values: &[T], segment: usize, t: f32) -> T {
    debug_assert!(!values.is_empty(), "catmull_rom_closed called with empty values");
    let m = values.len();
    let prev = (segment + m - 1) % m;
    let cur = segment % m;
    let next = (segment + 1) % m;
    let next_next = (segment + 2) % m;
    catmull_rom(values[prev], values[cur], values[next], values[next_next], t)
}

/// Tangent of the segment (derivative with respect to `t`), unnormalized.
pub fn catmull_rom_tangent<T: Interpolate>(p0: T, p1: T, p2: T, p3: T, t: f32) -> T {
    let b = (p2 - p0) * 0.5;
    let c = (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * 0.5;
    let d = (p1 * 3.0 - p0 - p2 * 3.0 + p3) * 0.5;
    b + c * (2.0 * t) + d * (3.0 * t * t)
}

/// Tangent counterpart of [`catmull_rom_closed`].
pub fn catmull_rom_tangent_closed<T: Interpolate>(values: &[T], segment: usize, t: f32) -> T {
    debug_assert!(!values.is_empty());
    let m = values.len();
    catmull_rom_tangent(
        values[(segment + m - 1) % m],
        values[segment % m],
        values[(segment + 1) % m],
        values[(segment + 2) % m],
        t,
    )
}
