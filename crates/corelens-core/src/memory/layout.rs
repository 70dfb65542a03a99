//! Physical layouts of the on-cache structures.
//!
//! This module centralizes the byte offsets used to overlay record headers
//! and layer headers onto a snapshot. Constants are organized by structure
//! and schema generation.

/// Record header layout for schema v1 (bare 32-bit offset slots).
pub mod record_v1 {
    /// External-block offset, signed 32-bit.
    pub const EXTERNAL_BLOCK_OFFSET: u64 = 0;
    /// Payload length, unsigned 32-bit.
    pub const DATA_LENGTH: u64 = 4;
    /// Payload kind byte.
    pub const DATA_TYPE: u64 = 8;
    /// Non-zero when the record is in private use.
    pub const IN_PRIVATE_USE: u64 = 9;
    /// Owner id, unsigned 16-bit.
    pub const PRIVATE_OWNER_ID: u64 = 10;
    /// Token offset, signed 32-bit.
    pub const TOKEN_OFFSET: u64 = 12;
    /// Fixed header size; the payload fallback position.
    pub const SIZEOF: u64 = 16;
}

/// Record header layout for schema v2 and later (structured offset slots).
pub mod record_v2 {
    pub const EXTERNAL_BLOCK_OFFSET: u64 = 0;
    pub const DATA_LENGTH: u64 = 8;
    pub const DATA_TYPE: u64 = 12;
    pub const IN_PRIVATE_USE: u64 = 13;
    pub const PRIVATE_OWNER_ID: u64 = 14;
    pub const TOKEN_OFFSET: u64 = 16;
    pub const SIZEOF: u64 = 24;
}

/// Structured offset slot layout (schema v2 and later).
pub mod offset_slot {
    /// Signed 32-bit displacement.
    pub const OFFSET: u64 = 0;
    /// Layer tag, unsigned 32-bit. Reserved (never read) under schema v2;
    /// the decoder defaults the layer to 0 from the schema tag instead.
    pub const LAYER: u64 = 4;
    pub const SIZEOF: u64 = 8;
}

/// Per-layer region header, written at the base of every cache layer.
pub mod layer_header {
    /// Eyecatcher bytes at the start of each layer region.
    pub const MAGIC: [u8; 4] = *b"SCL1";
    /// Layer index, unsigned 32-bit.
    pub const LAYER_INDEX: u64 = 4;
    /// Total region size in bytes, unsigned 64-bit, header included.
    pub const REGION_SIZE: u64 = 8;
    pub const SIZEOF: u64 = 16;
}
