//! Binary persistence for track files.
//!
//! A track file stores the control points a [`Track`](crate::track::Track)
//! is built from. Derived geometry is never stored; loading rebuilds it.
//!
//! ```text
//! "KTRK" u32 file-version
//! chunk "CTRL" v1: i32 count, count x Float3 positions
//! chunk "UPVC" v1: i32 count, count x Float3 up-vectors (optional)
//! ```
//!
//! Each chunk is `[type; 4] u32 version u32 length` followed by `length`
//! bytes. Unknown chunks are skipped.

mod chunk;
mod format;

pub use chunk::{ChunkHeader, ChunkReader, ChunkWriter};
pub use format::*;

use log::debug;
use thiserror::Error;

use crate::track::ControlPoints;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("invalid file magic (expected KTRK)")]
    InvalidMagic,
    #[error("unsupported version: expected {expected}, found {found}")]
    UnsupportedVersion { expected: u32, found: u32 },
    #[error("truncated data")]
    TruncatedData,
    #[error("missing chunk {}", String::from_utf8_lossy(.0))]
    MissingChunk([u8; 4]),
    #[error("corrupted data")]
    CorruptedData,
}

/// Serialize control points to the KTRK binary format.
pub fn serialize(control: &ControlPoints) -> Vec<u8> {
    let mut writer = ChunkWriter::new();

    writer.write_magic(MAGIC);
    writer.write_u32(FILE_VERSION);

    writer.begin_chunk(CHUNK_CTRL, CONTROL_VERSION);
    writer.write_float3_list(&control.positions);
    writer.end_chunk();

    if !control.up_vectors.is_empty() {
        writer.begin_chunk(CHUNK_UPVC, UP_VECTOR_VERSION);
        writer.write_float3_list(&control.up_vectors);
        writer.end_chunk();
    }

    writer.into_bytes()
}

/// Deserialize control points from the KTRK binary format.
pub fn deserialize(data: &[u8]) -> Result<ControlPoints, PersistenceError> {
    let mut reader = ChunkReader::new(data);

    if reader.remaining() < FILE_HEADER_SIZE {
        return Err(PersistenceError::TruncatedData);
    }

    if reader.read_magic()? != MAGIC {
        return Err(PersistenceError::InvalidMagic);
    }
    check_version(FILE_VERSION, reader.read_u32()?)?;

    let mut positions = None;
    let mut up_vectors = Vec::new();

    while reader.has_data() {
        let header = reader.try_read_header()?;
        let start = reader.position();

        match header.chunk_type {
            CHUNK_CTRL => {
                check_version(CONTROL_VERSION, header.version)?;
                positions = Some(reader.read_float3_list()?);
            }
            CHUNK_UPVC => {
                check_version(UP_VECTOR_VERSION, header.version)?;
                up_vectors = reader.read_float3_list()?;
            }
            other => {
                debug!(
                    "skipping unknown chunk {} ({} bytes)",
                    String::from_utf8_lossy(&other),
                    header.length
                );
            }
        }

        reader.seek_past(start, &header)?;
    }

    let positions = positions.ok_or(PersistenceError::MissingChunk(CHUNK_CTRL))?;
    Ok(ControlPoints::with_up_vectors(positions, up_vectors))
}

fn check_version(expected: u32, found: u32) -> Result<(), PersistenceError> {
    if found > expected {
        return Err(PersistenceError::UnsupportedVersion { expected, found });
    }
    Ok(())
}
