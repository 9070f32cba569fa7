//! C FFI for racetrack.
//!
//! Functions:
//! - `trk_track_build` / `trk_track_load` - control points in, track handle out
//! - `trk_track_free` - release a handle
//! - `trk_track_sample` / `trk_track_current_lap` - per-frame queries
//! - `trk_track_counts` / `trk_track_copy_geometry` - renderer buffers
//! - `trk_track_save_size` / `trk_track_save` - serialize control points
//!
//! # Error Codes
//! - `0`: Success
//! - `-1`: Null pointer
//! - `-2`: Invalid query (negative or non-finite distance)
//! - `-3`: Buffer too small (resize and retry)
//! - `-4`: Invalid config
//! - `-5`: Degenerate geometry or empty input
//! - `-6`: Invalid track file

use log::warn;

use crate::geom::Float3;
use crate::track::{ControlPoints, Track, TrackConfig, TrackError, TrackVertex};

pub const TRK_OK: i32 = 0;
pub const TRK_NULL_POINTER: i32 = -1;
pub const TRK_INVALID_QUERY: i32 = -2;
pub const TRK_BUFFER_TOO_SMALL: i32 = -3;
pub const TRK_INVALID_CONFIG: i32 = -4;
pub const TRK_DEGENERATE: i32 = -5;
pub const TRK_INVALID_FILE: i32 = -6;

/// Opaque handle to a built track.
pub type TrkTrackHandle = *mut std::ffi::c_void;

/// Sizes of the renderer buffers, returned by `trk_track_counts`.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct TrkTrackCounts {
    pub centreline_count: usize,
    pub offset_count: usize,
    pub vertex_count: usize,
    pub total_length: f32,
}

fn error_code(error: &TrackError) -> i32 {
    match error {
        TrackError::TooFewSamples { .. }
        | TrackError::InvalidWidth(_)
        | TrackError::InvalidStride
        | TrackError::InvalidUvSpan(_) => TRK_INVALID_CONFIG,
        TrackError::EmptyControlPoints
        | TrackError::NonFiniteControlPoint { .. }
        | TrackError::NonFiniteUpVector { .. }
        | TrackError::ZeroLength
        | TrackError::DegenerateGeometry { .. } => TRK_DEGENERATE,
        TrackError::Persistence(_) => TRK_INVALID_FILE,
    }
}

unsafe fn read_config(config: *const TrackConfig) -> TrackConfig {
    if config.is_null() {
        TrackConfig::default()
    } else {
        *config
    }
}

unsafe fn to_vec<T: Copy>(ptr: *const T, count: usize) -> Vec<T> {
    if count == 0 || ptr.is_null() {
        return Vec::new();
    }
    std::slice::from_raw_parts(ptr, count).to_vec()
}

unsafe fn finish_build(result: Result<Track, TrackError>, out_handle: *mut TrkTrackHandle) -> i32 {
    match result {
        Ok(track) => {
            *out_handle = Box::into_raw(Box::new(track)) as TrkTrackHandle;
            TRK_OK
        }
        Err(e) => {
            warn!("track build failed: {e}");
            *out_handle = std::ptr::null_mut();
            error_code(&e)
        }
    }
}

unsafe fn track_ref<'a>(handle: TrkTrackHandle) -> Option<&'a Track> {
    (handle as *const Track).as_ref()
}

/// Build a track from control points.
///
/// `up_vectors` may be null; they are used only when `up_count == count`.
/// A null `config` selects the defaults.
///
/// # Safety
/// - `positions` must be valid for `count` reads
/// - `up_vectors` must be null or valid for `up_count` reads
/// - `config` must be null or point to a `TrackConfig` whose `closure` is 0 or 1
/// - `out_handle` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn trk_track_build(
    positions: *const Float3,
    count: usize,
    up_vectors: *const Float3,
    up_count: usize,
    config: *const TrackConfig,
    out_handle: *mut TrkTrackHandle,
) -> i32 {
    if positions.is_null() || out_handle.is_null() {
        return TRK_NULL_POINTER;
    }

    let control =
        ControlPoints::with_up_vectors(to_vec(positions, count), to_vec(up_vectors, up_count));
    finish_build(Track::build(&control, read_config(config)), out_handle)
}

/// Build a track from a serialized track file.
///
/// # Safety
/// - `data` must be valid for `data_len` reads
/// - `config` must be null or point to a valid `TrackConfig`
/// - `out_handle` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn trk_track_load(
    data: *const u8,
    data_len: usize,
    config: *const TrackConfig,
    out_handle: *mut TrkTrackHandle,
) -> i32 {
    if data.is_null() || out_handle.is_null() {
        return TRK_NULL_POINTER;
    }

    let bytes = std::slice::from_raw_parts(data, data_len);
    finish_build(Track::load(bytes, read_config(config)), out_handle)
}

/// Free a track handle.
///
/// # Safety
/// - `handle` must be a handle returned by `trk_track_build`/`trk_track_load`, or null
#[no_mangle]
pub unsafe extern "C" fn trk_track_free(handle: TrkTrackHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle as *mut Track));
    }
}

/// Sample the centreline at arc length `d`.
///
/// Writes the position, and the up-vector when up-vectors are enabled
/// (`out_has_up` is set to 1; otherwise 0 and `out_up` is world up).
///
/// # Safety
/// - `handle` must be a valid track handle
/// - `out_position` must be valid; `out_up` and `out_has_up` may be null
#[no_mangle]
pub unsafe extern "C" fn trk_track_sample(
    handle: TrkTrackHandle,
    d: f32,
    out_position: *mut Float3,
    out_up: *mut Float3,
    out_has_up: *mut u8,
) -> i32 {
    let Some(track) = track_ref(handle) else {
        return TRK_NULL_POINTER;
    };
    if out_position.is_null() {
        return TRK_NULL_POINTER;
    }

    let Some(sample) = track.sample(d) else {
        return TRK_INVALID_QUERY;
    };

    *out_position = sample.position;
    if !out_up.is_null() {
        *out_up = sample.up_or(Float3::UP);
    }
    if !out_has_up.is_null() {
        *out_has_up = u8::from(sample.up.is_some());
    }
    TRK_OK
}

/// Current lap for distance `d`.
///
/// # Safety
/// - `handle` must be a valid track handle
/// - `out_lap` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn trk_track_current_lap(
    handle: TrkTrackHandle,
    d: f32,
    out_lap: *mut i32,
) -> i32 {
    let Some(track) = track_ref(handle) else {
        return TRK_NULL_POINTER;
    };
    if out_lap.is_null() {
        return TRK_NULL_POINTER;
    }
    if !d.is_finite() {
        return TRK_INVALID_QUERY;
    }

    *out_lap = track.current_lap(d);
    TRK_OK
}

/// Get buffer sizes for `trk_track_copy_geometry`.
///
/// # Safety
/// - `handle` must be a valid track handle
/// - `counts` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn trk_track_counts(
    handle: TrkTrackHandle,
    counts: *mut TrkTrackCounts,
) -> i32 {
    let Some(track) = track_ref(handle) else {
        return TRK_NULL_POINTER;
    };
    if counts.is_null() {
        return TRK_NULL_POINTER;
    }

    *counts = TrkTrackCounts {
        centreline_count: track.centreline().len(),
        offset_count: track.offsets().len(),
        vertex_count: track.mesh().len(),
        total_length: track.total_length(),
    };
    TRK_OK
}

/// Copy track geometry into pre-allocated buffers.
///
/// Any output pointer may be null to skip that buffer. `left` and `right`
/// share `offset_capacity`.
///
/// # Safety
/// - `handle` must be a valid track handle
/// - Each non-null buffer must be valid for writes of its capacity
#[no_mangle]
pub unsafe extern "C" fn trk_track_copy_geometry(
    handle: TrkTrackHandle,
    centreline: *mut Float3,
    centreline_capacity: usize,
    left: *mut Float3,
    right: *mut Float3,
    offset_capacity: usize,
    vertices: *mut TrackVertex,
    vertex_capacity: usize,
) -> i32 {
    let Some(track) = track_ref(handle) else {
        return TRK_NULL_POINTER;
    };

    let points = track.centreline().points();
    let offsets = track.offsets();
    let mesh = track.mesh().vertices();

    if (!centreline.is_null() && points.len() > centreline_capacity)
        || ((!left.is_null() || !right.is_null()) && offsets.len() > offset_capacity)
        || (!vertices.is_null() && mesh.len() > vertex_capacity)
    {
        return TRK_BUFFER_TOO_SMALL;
    }

    copy_into(points, centreline);
    copy_into(&offsets.left, left);
    copy_into(&offsets.right, right);
    copy_into(mesh, vertices);
    TRK_OK
}

unsafe fn copy_into<T: Copy>(source: &[T], dest: *mut T) {
    if !dest.is_null() {
        std::ptr::copy_nonoverlapping(source.as_ptr(), dest, source.len());
    }
}

/// Get the buffer size required to serialize a track's control points.
///
/// # Safety
/// - `handle` must be a valid track handle
#[no_mangle]
pub unsafe extern "C" fn trk_track_save_size(handle: TrkTrackHandle) -> i64 {
    match track_ref(handle) {
        Some(track) => track.save().len() as i64,
        None => TRK_NULL_POINTER as i64,
    }
}

/// Serialize a track's control points to a byte buffer.
///
/// # Returns
/// - `0` on success
/// - `-1` on null pointer
/// - `-3` if buffer too small (bytes_written contains required size)
///
/// # Safety
/// - `handle` must be a valid track handle
/// - `buffer` must point to a valid buffer of at least `buffer_capacity` bytes
/// - `bytes_written` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn trk_track_save(
    handle: TrkTrackHandle,
    buffer: *mut u8,
    buffer_capacity: usize,
    bytes_written: *mut usize,
) -> i32 {
    let Some(track) = track_ref(handle) else {
        return TRK_NULL_POINTER;
    };
    if buffer.is_null() || bytes_written.is_null() {
        return TRK_NULL_POINTER;
    }

    let serialized = track.save();
    *bytes_written = serialized.len();
    if serialized.len() > buffer_capacity {
        return TRK_BUFFER_TOO_SMALL;
    }

    copy_into(&serialized, buffer);
    TRK_OK
}
