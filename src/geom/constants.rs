use super::math::Float3;

/// World up axis; lateral road offsets are taken perpendicular to it.
pub const WORLD_UP: Float3 = Float3::UP;

pub const EPSILON: f32 = 1.192_093e-7;

/// The four-point Catmull-Rom window is ill-defined below this many samples.
pub const MIN_SAMPLES: usize = 4;

pub const DEFAULT_SAMPLES: usize = 500;
pub const DEFAULT_PATH_WIDTH: f32 = 10.0;
pub const DEFAULT_STRIDE: usize = 1;
pub const DEFAULT_UV_SPAN: f32 = 0.1;
