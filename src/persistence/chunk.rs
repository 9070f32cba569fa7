//! Little-endian chunk reader/writer for track files.

use super::format::{CHUNK_HEADER_SIZE, FLOAT3_SIZE};
use super::PersistenceError;
use crate::geom::Float3;

#[derive(Debug, Clone)]
pub struct ChunkHeader {
    pub chunk_type: [u8; 4],
    pub version: u32,
    pub length: u32,
}

pub struct ChunkReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ChunkReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn has_data(&self) -> bool {
        self.position < self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    pub fn try_read_header(&mut self) -> Result<ChunkHeader, PersistenceError> {
        if self.remaining() < CHUNK_HEADER_SIZE {
            return Err(PersistenceError::TruncatedData);
        }

        let chunk_type = self.read_array::<4>()?;
        let version = self.read_u32()?;
        let length = self.read_u32()?;

        if length as usize > self.remaining() {
            return Err(PersistenceError::TruncatedData);
        }

        Ok(ChunkHeader {
            chunk_type,
            version,
            length,
        })
    }

    /// Moves to the end of a chunk whose header was just read at `start`.
    pub fn seek_past(&mut self, start: usize, header: &ChunkHeader) -> Result<(), PersistenceError> {
        let end = start + header.length as usize;
        if end > self.data.len() || end < self.position {
            return Err(PersistenceError::CorruptedData);
        }
        self.position = end;
        Ok(())
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], PersistenceError> {
        let end = self.position + N;
        let slice = self
            .data
            .get(self.position..end)
            .ok_or(PersistenceError::TruncatedData)?;
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(slice);
        self.position = end;
        Ok(bytes)
    }

    pub fn read_magic(&mut self) -> Result<[u8; 4], PersistenceError> {
        self.read_array::<4>()
    }

    pub fn read_u32(&mut self) -> Result<u32, PersistenceError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, PersistenceError> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32, PersistenceError> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    pub fn read_float3(&mut self) -> Result<Float3, PersistenceError> {
        Ok(Float3::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    /// Reads an `i32` count followed by that many `Float3` values.
    pub fn read_float3_list(&mut self) -> Result<Vec<Float3>, PersistenceError> {
        let count = self.read_i32()?;
        let count = usize::try_from(count).map_err(|_| PersistenceError::CorruptedData)?;
        if count.saturating_mul(FLOAT3_SIZE) > self.remaining() {
            return Err(PersistenceError::TruncatedData);
        }

        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(self.read_float3()?);
        }
        Ok(values)
    }
}

pub struct ChunkWriter {
    buffer: Vec<u8>,
    chunk_stack: Vec<usize>, // Start positions of open chunks
}

impl ChunkWriter {
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(256),
            chunk_stack: Vec::with_capacity(2),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        debug_assert!(self.chunk_stack.is_empty(), "unterminated chunk");
        self.buffer
    }

    pub fn begin_chunk(&mut self, chunk_type: [u8; 4], version: u32) {
        self.chunk_stack.push(self.buffer.len());

        self.buffer.extend_from_slice(&chunk_type);
        self.write_u32(version);
        self.write_u32(0); // Placeholder for length
    }

    pub fn end_chunk(&mut self) {
        let Some(start_pos) = self.chunk_stack.pop() else {
            debug_assert!(false, "end_chunk without begin_chunk");
            return;
        };
        let content_length = self.buffer.len() - start_pos - CHUNK_HEADER_SIZE;

        // Length sits after type and version
        let length_bytes = (content_length as u32).to_le_bytes();
        self.buffer[start_pos + 8..start_pos + 12].copy_from_slice(&length_bytes);
    }

    pub fn write_magic(&mut self, magic: [u8; 4]) {
        self.buffer.extend_from_slice(&magic);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_f32(&mut self, value: f32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_float3(&mut self, value: Float3) {
        self.write_f32(value.x);
        self.write_f32(value.y);
        self.write_f32(value.z);
    }

    pub fn write_float3_list(&mut self, values: &[Float3]) {
        self.write_i32(values.len() as i32);
        for &value in values {
            self.write_float3(value);
        }
    }
}

impl Default for ChunkWriter {
    fn default() -> Self {
        Self::new()
    }
}
