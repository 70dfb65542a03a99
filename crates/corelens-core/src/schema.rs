//! Schema-version probing.
//!
//! Snapshots carry an explicit schema version tag; the tag decides which
//! physical encoding a versioned offset field uses. Dispatch is table-driven
//! over the known versions, so an unknown tag is a typed error up front
//! rather than a guess at read time.
//!
//! Known generations:
//! - v1 — bare signed 32-bit offsets, implicit layer 0
//! - v2 — structured offset slots, no per-field layer tag
//! - v3 — structured offset slots with a per-field layer tag

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::memory::layout::{record_v1, record_v2};

/// How a versioned offset field is physically encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingKind {
    /// Bare signed 32-bit offset, layer 0 implied.
    Legacy,
    /// Structured offset slot, layer carried per field from v3 on.
    Layered,
}

/// Schema version tag carried by a capture.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SchemaVersion(u32);

impl SchemaVersion {
    /// Oldest generation this inspector understands.
    pub const MIN_SUPPORTED: Self = SchemaVersion(1);
    /// Newest generation this inspector understands.
    pub const CURRENT: Self = SchemaVersion(3);

    pub const fn new(version: u32) -> Self {
        SchemaVersion(version)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Which offset encoding this generation uses.
    ///
    /// A version this inspector has never seen fails with
    /// [`Error::UnsupportedSchemaVersion`]; a snapshot that merely predates
    /// the layered representation is the normal `Legacy` outcome.
    pub fn encoding(self) -> Result<EncodingKind> {
        match self.0 {
            1 => Ok(EncodingKind::Legacy),
            2 | 3 => Ok(EncodingKind::Layered),
            version => Err(Error::UnsupportedSchemaVersion { version }),
        }
    }

    /// Whether structured offset slots carry a per-field layer tag.
    pub fn has_layer_tags(self) -> bool {
        self.0 >= 3
    }

    pub fn is_supported(self) -> bool {
        self.encoding().is_ok()
    }

    /// Fixed record header size under this generation.
    pub fn record_header_size(self) -> Result<u64> {
        Ok(match self.encoding()? {
            EncodingKind::Legacy => record_v1::SIZEOF,
            EncodingKind::Layered => record_v2::SIZEOF,
        })
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
