//! Offset field decoding.

use crate::error::{Error, Result};
use crate::memory::ReadSnapshot;
use crate::memory::layout::offset_slot;
use crate::schema::{EncodingKind, SchemaVersion};

use super::{CacheOffset, MAX_LAYER_INDEX};

/// Decode the versioned offset field at `field_address`.
///
/// The physical encoding follows the snapshot's schema generation:
/// - Legacy (v1): a bare signed 32-bit offset, layer 0 implied.
/// - Layered (v2+): a structured slot; the layer tag is read only when the
///   generation carries one (v3+), otherwise the layer defaults to 0.
///
/// A layer tag above [`MAX_LAYER_INDEX`] fails with
/// [`Error::MalformedField`]: the slot exists per the schema but its value
/// is structurally invalid. Plain read failures propagate as
/// [`Error::UnreadableAddress`].
pub fn decode<R: ReadSnapshot>(
    snapshot: &R,
    field_address: u64,
    schema: SchemaVersion,
) -> Result<CacheOffset> {
    match schema.encoding()? {
        EncodingKind::Legacy => {
            let offset = snapshot.read_i32(field_address)?;
            Ok(CacheOffset::new(offset, 0))
        }
        EncodingKind::Layered => {
            let offset = snapshot.read_i32(field_address + offset_slot::OFFSET)?;
            let layer = if schema.has_layer_tags() {
                let layer = snapshot.read_u32(field_address + offset_slot::LAYER)?;
                if layer > MAX_LAYER_INDEX {
                    return Err(Error::MalformedField {
                        field: "layer tag",
                        message: format!(
                            "layer {layer} exceeds the maximum of {MAX_LAYER_INDEX}"
                        ),
                    });
                }
                layer
            } else {
                // v2 predates per-field layer tagging; the tag word is
                // reserved and must not be interpreted.
                0
            };
            Ok(CacheOffset::new(offset, layer))
        }
    }
}
