//! Layered offset resolution.

use crate::error::{Error, Result};
use crate::layers::LayerTable;

use super::CacheOffset;

/// Which end of a layer an offset is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Displacement counts forward from the layer base (offset >= 0).
    Base,
    /// Displacement counts back from the layer end (offset < 0).
    End,
}

/// Convert a decoded offset into an absolute snapshot address.
///
/// Returns `Ok(None)` for an unpopulated field: a zero offset in a
/// non-resizable cache. In a resizable cache zero is a real displacement
/// and resolves to the layer base.
///
/// The sign convention lets a single field address content laid out from
/// either end of a layer: non-negative offsets resolve against the base,
/// negative ones against the end.
pub fn resolve(
    table: &LayerTable,
    offset: CacheOffset,
    resizable: bool,
) -> Result<Option<u64>> {
    if !resizable && offset.is_zero() {
        return Ok(None);
    }
    let (base, end) = table.bounds(offset.layer)?;
    let address = if offset.offset >= 0 {
        base.wrapping_add(offset.offset as u64)
    } else {
        end.wrapping_add(offset.offset as i64 as u64)
    };
    Ok(Some(address))
}

/// Inverse of [`resolve`]: express an absolute address as a displacement
/// within `layer`, anchored as requested.
///
/// Fails with [`Error::MalformedField`] when the displacement does not fit
/// the signed 32-bit offset a record field can hold.
pub fn offset_for(
    table: &LayerTable,
    address: u64,
    layer: u32,
    anchor: Anchor,
) -> Result<CacheOffset> {
    let (base, end) = table.bounds(layer)?;
    let displacement = match anchor {
        Anchor::Base => address.wrapping_sub(base) as i64,
        Anchor::End => address.wrapping_sub(end) as i64,
    };
    let offset = i32::try_from(displacement).map_err(|_| Error::MalformedField {
        field: "offset",
        message: format!("displacement {displacement} does not fit a 32-bit offset"),
    })?;
    Ok(CacheOffset::new(offset, layer))
}
