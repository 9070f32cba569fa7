use log::debug;

use super::config::Closure;
use super::error::TrackError;
use super::offset::OffsetCurves;
use crate::geom::{Float2, Float3, WORLD_UP};

/// One road-surface vertex. C-compatible layout for direct GPU upload.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TrackVertex {
    pub position: Float3,
    pub uv: Float2,
    pub normal: Float3,
}

impl TrackVertex {
    pub const fn new(position: Float3, uv: Float2, normal: Float3) -> Self {
        Self {
            position,
            uv,
            normal,
        }
    }

    pub const DEFAULT: Self = Self::new(Float3::ZERO, Float2::ZERO, Float3::UP);
}

impl Default for TrackVertex {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Flat triangle list covering the road surface, six vertices per cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackMesh {
    vertices: Vec<TrackVertex>,
}

impl TrackMesh {
    pub const VERTICES_PER_CELL: usize = 6;

    pub fn vertices(&self) -> &[TrackVertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn cell_count(&self) -> usize {
        self.vertices.len() / Self::VERTICES_PER_CELL
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

/// Triangulates the strip between the left and right offset curves.
///
/// Cells join row `i` to row `i + stride` for `i = 0, stride, 2*stride, ...`
/// while `i + stride < rows`. Each cell is two triangles:
///
/// ```text
/// (left[i], 0,0) (right[i], 0,1) (left[i+s], u,0)
/// (left[i+s], u,0) (right[i], 0,1) (right[i+s], u,1)
/// ```
///
/// where `u` is `uv_span`. In `Closed` mode one more cell joins the last
/// emitted row back to row 0.
pub fn build_track_mesh(
    offsets: &OffsetCurves,
    stride: usize,
    uv_span: f32,
    closure: Closure,
) -> Result<TrackMesh, TrackError> {
    if stride == 0 {
        return Err(TrackError::InvalidStride);
    }
    if !uv_span.is_finite() {
        return Err(TrackError::InvalidUvSpan(uv_span));
    }

    let rows = offsets.left.len().min(offsets.right.len());
    let cells = if rows > stride {
        (rows - 1) / stride
    } else {
        0
    };
    let closing = closure.is_closed() && cells > 0;
    let capacity = (cells + usize::from(closing)) * TrackMesh::VERTICES_PER_CELL;

    let mut vertices = Vec::with_capacity(capacity);
    let mut i = 0;
    while i + stride < rows {
        push_cell(&mut vertices, offsets, i, i + stride, uv_span);
        i += stride;
    }

    if closing {
        push_cell(&mut vertices, offsets, i, 0, uv_span);
    }

    debug!(
        "track mesh: {} rows, stride {}, {} cells{}, {} vertices",
        rows,
        stride,
        vertices.len() / TrackMesh::VERTICES_PER_CELL,
        if closing { " (closed)" } else { "" },
        vertices.len()
    );

    Ok(TrackMesh { vertices })
}

fn push_cell(
    vertices: &mut Vec<TrackVertex>,
    offsets: &OffsetCurves,
    near: usize,
    far: usize,
    uv_span: f32,
) {
    let uv00 = Float2::new(0.0, 0.0);
    let uv01 = Float2::new(0.0, 1.0);
    let uv10 = Float2::new(uv_span, 0.0);
    let uv11 = Float2::new(uv_span, 1.0);

    let (left, right) = (&offsets.left, &offsets.right);
    vertices.extend_from_slice(&[
        TrackVertex::new(left[near], uv00, WORLD_UP),
        TrackVertex::new(right[near], uv01, WORLD_UP),
        TrackVertex::new(left[far], uv10, WORLD_UP),
        TrackVertex::new(left[far], uv10, WORLD_UP),
        TrackVertex::new(right[near], uv01, WORLD_UP),
        TrackVertex::new(right[far], uv11, WORLD_UP),
    ]);
}
