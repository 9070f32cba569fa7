//! Game-side placement on a built track: the rider, the chase camera and
//! collectable pickups. Everything here is driven by [`Track::sample`].
//!
//! [`Track::sample`]: crate::track::Track::sample

mod camera;
mod pickups;
mod rider;

pub use camera::{CameraView, ChaseCamera};
pub use pickups::{Pickup, PickupParams, Pickups};
pub use rider::{Rider, RiderParams, RiderPose};
