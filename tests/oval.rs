//! End-to-end checks on the reference oval.

use std::sync::Arc;
use std::thread;

use approx::assert_relative_eq;
use racetrack::motion::{ChaseCamera, PickupParams, Pickups, Rider, RiderParams};
use racetrack::{Closure, ControlPoints, Float3, Track, TrackConfig, TrackError};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn oval(closure: Closure) -> Track {
    init_logging();
    Track::build(
        &ControlPoints::oval(),
        TrackConfig::default().with_closure(closure),
    )
    .expect("reference oval builds")
}

fn gaps(points: &[Float3]) -> Vec<f32> {
    points.windows(2).map(|w| w[0].distance(w[1])).collect()
}

fn max_deviation(gaps: &[f32]) -> f32 {
    let mean = gaps.iter().sum::<f32>() / gaps.len() as f32;
    gaps.iter()
        .map(|g| (g - mean).abs() / mean)
        .fold(0.0, f32::max)
}

#[test]
fn sample_at_zero_is_first_control_point() {
    let track = oval(Closure::Open);
    let first = ControlPoints::oval().positions[0];
    let p = track.sample(0.0).unwrap().position;
    assert_relative_eq!(p.x, first.x, epsilon = 1e-2);
    assert_relative_eq!(p.y, first.y, epsilon = 1e-2);
    assert_relative_eq!(p.z, first.z, epsilon = 1e-2);
}

#[test]
fn half_length_is_across_the_loop() {
    let control = ControlPoints::oval();
    let centroid = control
        .positions
        .iter()
        .fold(Float3::ZERO, |acc, &p| acc + p)
        * (1.0 / control.len() as f32);

    for closure in [Closure::Open, Closure::Closed] {
        let track = oval(closure);
        let start = track.sample(0.0).unwrap().position - centroid;
        let half = track.sample(track.total_length() * 0.5).unwrap().position - centroid;
        assert!(start.dot(half) < 0.0, "{closure:?}: half point not opposite");
    }
}

#[test]
fn open_centreline_spacing_is_uniform_away_from_the_seam() {
    let track = oval(Closure::Open);
    let points = track.centreline().points();
    assert_eq!(points.len(), 500);

    // The last interval borders the unmeasured closing segment.
    let interior = gaps(points);
    assert!(max_deviation(&interior[..interior.len() - 1]) < 0.05);
}

#[test]
fn closed_centreline_spacing_is_near_uniform() {
    let track = oval(Closure::Closed);
    let points = track.centreline().points();
    let mut all = gaps(points);
    all.push(points[points.len() - 1].distance(points[0]));
    assert!(max_deviation(&all) < 0.06);
}

#[test]
fn sampling_is_periodic_and_laps_count() {
    let track = oval(Closure::Open);
    let total = track.total_length();

    for d in [0.0, 17.5, 123.0, total * 0.75] {
        let base = track.sample(d).unwrap().position;
        for k in 1..=3 {
            let wrapped = track.sample(d + k as f32 * total).unwrap().position;
            assert_relative_eq!(base.x, wrapped.x, epsilon = 0.05);
            assert_relative_eq!(base.z, wrapped.z, epsilon = 0.05);
        }
    }

    assert_eq!(track.current_lap(0.0), 0);
    assert_eq!(track.current_lap(total * 0.99), 0);
    assert_eq!(track.current_lap(total * 1.01), 1);
    assert_eq!(track.current_lap(total * 3.5), 3);
}

#[test]
fn invalid_queries_fail_without_panicking() {
    let track = oval(Closure::Open);
    assert!(track.sample(-1.0).is_none());
    assert!(track.sample(f32::NAN).is_none());
    assert!(track.sample(f32::INFINITY).is_none());

    assert_eq!(
        Track::build(&ControlPoints::default(), TrackConfig::default()),
        Err(TrackError::EmptyControlPoints)
    );
}

#[test]
fn road_edges_and_mesh() {
    let track = oval(Closure::Open);
    let points = track.centreline().points();
    let offsets = track.offsets();
    assert_eq!(offsets.len(), points.len() - 1);

    for i in 0..offsets.len() {
        let (l, r) = (offsets.left[i], offsets.right[i]);
        assert_relative_eq!(l.distance(r), 10.0, epsilon = 1e-3);
        let mid = (l + r) * 0.5;
        assert_relative_eq!(mid.x, points[i].x, epsilon = 1e-3);
        assert_relative_eq!(mid.z, points[i].z, epsilon = 1e-3);
    }

    assert_eq!(track.mesh().len(), 6 * (offsets.len() - 1));
    assert!(track
        .mesh()
        .vertices()
        .iter()
        .all(|v| v.normal == Float3::UP));
}

#[test]
fn closed_loop_bridges_the_seam() {
    let open = oval(Closure::Open);
    let closed = oval(Closure::Closed);

    assert!(closed.total_length() > open.total_length());
    assert_eq!(closed.offsets().len(), closed.centreline().len());
    assert_eq!(closed.mesh().len(), 6 * closed.offsets().len());
}

#[test]
fn rider_lap_stays_on_the_road() {
    let track = oval(Closure::Closed);
    let mut rider = Rider::new(20.0, RiderParams::default());
    let camera = ChaseCamera::default();
    let mut pickups = Pickups::place(&track, PickupParams::default(), 2024);
    assert!(!pickups.is_empty());

    let dt = 16.0;
    let mut frames = 0;
    while track.current_lap(rider.distance) < 1 {
        rider.advance(dt);
        rider.steer(if frames % 200 < 100 { 1.0 } else { -1.0 }, dt);

        let pose = rider.pose(&track).unwrap();
        assert!(pose.position.distance(pose.centre) <= 2.0 + 1e-4);

        let view = camera.view(&track, &rider).unwrap();
        assert_relative_eq!(view.eye.y, 3.0, epsilon = 1e-3);

        pickups.collect(pose.position + Float3::new(0.0, 1.5, 0.0));
        frames += 1;
    }

    assert!(frames > 0);
    assert!(pickups.score() <= pickups.len());
}

#[test]
fn track_is_shared_across_threads() {
    let track = Arc::new(oval(Closure::Open));
    let total = track.total_length();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let track = Arc::clone(&track);
            thread::spawn(move || {
                let d = total * (i as f32 + 0.25);
                (track.current_lap(d), track.sample(d).map(|s| s.position))
            })
        })
        .collect();

    let expected = track.sample(total * 0.25).unwrap().position;
    for (i, handle) in handles.into_iter().enumerate() {
        let (lap, position) = handle.join().unwrap();
        assert_eq!(lap, i as i32);
        let position = position.unwrap();
        assert_relative_eq!(position.x, expected.x, epsilon = 0.05);
        assert_relative_eq!(position.z, expected.z, epsilon = 0.05);
    }
}

#[test]
fn track_file_round_trip_rebuilds_identically() {
    let track = oval(Closure::Open);
    let bytes = track.save();
    let loaded = Track::load(&bytes, *track.config()).unwrap();
    assert_eq!(loaded.centreline().points(), track.centreline().points());
    assert_eq!(loaded.mesh().vertices(), track.mesh().vertices());
}
