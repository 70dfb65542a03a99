//! Versioned offset decoding and layered resolution.

mod decode;
mod resolve;

pub use decode::decode;
pub use resolve::{Anchor, offset_for, resolve};

use serde::{Deserialize, Serialize};

/// Highest layer index a well-formed offset field may carry. Tags above
/// this are structural corruption, not a plausible lookup miss.
pub const MAX_LAYER_INDEX: u32 = 99;

/// A decoded versioned offset field: a signed displacement plus the index
/// of the layer it is relative to.
///
/// A non-negative displacement counts forward from the layer's base; a
/// negative one counts back from the layer's end. Zero doubles as the
/// "field not populated" sentinel in non-resizable caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheOffset {
    pub offset: i32,
    pub layer: u32,
}

impl CacheOffset {
    pub const fn new(offset: i32, layer: u32) -> Self {
        Self { offset, layer }
    }

    /// Whether this offset carries the zero sentinel. Only meaningful for
    /// non-resizable caches; see [`resolve`].
    pub const fn is_zero(self) -> bool {
        self.offset == 0
    }
}
