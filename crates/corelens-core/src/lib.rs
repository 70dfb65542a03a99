//! # corelens-core
//!
//! Core library for the Corelens layered-cache snapshot inspector.
//!
//! This crate provides:
//! - Read-only snapshot access primitives
//! - Schema-version probing for versioned offset encodings
//! - Offset decoding and layered address resolution
//! - Record field helpers (payload, token, header fields)
//! - Layer-header scanning and session configuration
//!
//! Resolution flows one direction: a record helper asks the schema tag
//! which encoding applies, decodes the raw offset and layer, and resolves
//! them to an absolute address against the session's layer table. Corrupt
//! or missing data is a typed error for that field, never a panic and
//! never a retry.

pub mod config;
pub mod error;
pub mod layers;
pub mod locator;
pub mod memory;
pub mod offset;
pub mod record;
pub mod schema;
pub mod session;

pub use config::{LayerBounds, SessionConfig};
pub use error::{Error, Result};
pub use layers::{LayerTable, LayerTableBuilder};
pub use locator::scan_layer_headers;
pub use memory::{ReadSnapshot, SnapshotImage};
pub use offset::{Anchor, CacheOffset, MAX_LAYER_INDEX, decode, offset_for, resolve};
pub use record::{ByteDataRecord, DataType};
pub use schema::{EncodingKind, SchemaVersion};
pub use session::Session;
