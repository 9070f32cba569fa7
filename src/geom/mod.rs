//! Pure math primitives for track geometry.
//!
//! Vector types, the orthonormal track frame, and the Catmull-Rom
//! interpolator. No dependencies on the rest of the crate.

mod frame;
mod interpolate;
mod math;

pub mod constants;

pub use constants::{EPSILON, MIN_SAMPLES, WORLD_UP};
pub use frame::Frame;
pub use interpolate::{
    catmull_rom, catmull_rom_closed, catmull_rom_tangent, catmull_rom_tangent_closed, Interpolate,
};
pub use math::{Float2, Float3, Matrix3};
