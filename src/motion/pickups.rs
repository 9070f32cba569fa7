use log::debug;
use rand::prelude::SmallRng;
use rand::{Rng, SeedableRng};

use crate::geom::{Float3, Frame, Matrix3, WORLD_UP};
use crate::track::Track;

/// Placement and collection settings for [`Pickups`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupParams {
    /// Upper bound on the number of pickups placed.
    pub count: usize,
    /// Distance from the centreline to either side.
    pub side_offset: f32,
    /// Height above the centreline.
    pub height: f32,
    /// No pickup is placed within this many points of the centreline end.
    pub end_margin: usize,
    /// A rider closer than this collects the pickup.
    pub collect_radius: f32,
}

impl PickupParams {
    pub const DEFAULT: Self = Self {
        count: 20,
        side_offset: 3.0,
        height: 1.5,
        end_margin: 10,
        collect_radius: 2.0,
    };
}

impl Default for PickupParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    /// Centreline index the pickup was placed at.
    pub index: usize,
    pub position: Float3,
    pub frame: Frame,
    pub collected: bool,
}

impl Pickup {
    /// Model matrix rotation for the ring, facing along the track.
    pub fn orientation(&self) -> Matrix3 {
        self.frame.to_matrix()
    }
}

/// Collectable rings scattered along the centreline.
#[derive(Debug, Clone, PartialEq)]
pub struct Pickups {
    items: Vec<Pickup>,
    params: PickupParams,
}

impl Pickups {
    /// Scatters pickups with a seeded RNG so the layout is reproducible.
    ///
    /// Gaps between pickups start wide and shrink: 80..=100 centreline points
    /// for the first three, 20..=50 for the next five, 10..=20 after that.
    /// Each pickup goes on a random side of the road.
    pub fn place(track: &Track, params: PickupParams, seed: u64) -> Self {
        let points = track.centreline().points();
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut items = Vec::with_capacity(params.count);

        let mut j = 0;
        while items.len() < params.count && j + params.end_margin < points.len() {
            let gap = match items.len() {
                0..=2 => rng.random_range(80..=100),
                3..=7 => rng.random_range(20..=50),
                _ => rng.random_range(10..=20),
            };
            let right_side = rng.random_bool(0.4);

            let Some(&next) = points.get(j + 1) else {
                break;
            };
            let point = points[j];
            if let Some(frame) = Frame::from_tangent(next - point, WORLD_UP) {
                let side = if right_side {
                    params.side_offset
                } else {
                    -params.side_offset
                };
                items.push(Pickup {
                    index: j,
                    position: point + WORLD_UP * params.height + frame.lateral * side,
                    frame,
                    collected: false,
                });
            }

            j += gap;
        }

        debug!(
            "placed {} pickups over {} centreline points (seed {})",
            items.len(),
            points.len(),
            seed
        );

        Self { items, params }
    }

    pub fn items(&self) -> &[Pickup] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Marks every uncollected pickup within the collect radius of
    /// `position` as collected. Returns how many were collected now.
    pub fn collect(&mut self, position: Float3) -> usize {
        let radius = self.params.collect_radius;
        let mut collected = 0;
        for item in self.items.iter_mut().filter(|p| !p.collected) {
            if item.position.distance(position) < radius {
                item.collected = true;
                collected += 1;
            }
        }
        collected
    }

    pub fn score(&self) -> usize {
        self.items.iter().filter(|p| p.collected).count()
    }
}
