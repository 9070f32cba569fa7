//! Binary track file constants.

pub const MAGIC: [u8; 4] = [b'K', b'T', b'R', b'K'];

pub const FILE_VERSION: u32 = 1;
pub const CONTROL_VERSION: u32 = 1;
pub const UP_VECTOR_VERSION: u32 = 1;

pub const CHUNK_CTRL: [u8; 4] = [b'C', b'T', b'R', b'L'];
pub const CHUNK_UPVC: [u8; 4] = [b'U', b'P', b'V', b'C'];

pub const FILE_HEADER_SIZE: usize = 8; // 4 magic + 4 version
pub const CHUNK_HEADER_SIZE: usize = 12; // 4 type + 4 version + 4 length
pub const FLOAT3_SIZE: usize = 12;
