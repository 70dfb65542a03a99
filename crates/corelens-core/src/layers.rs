//! Layer address table.
//!
//! A multi-layer cache is a set of independently based memory regions. The
//! table maps a layer index to that layer's base and end addresses. It is
//! immutable once built; the equal-length invariant between bases and ends
//! holds by construction.

use crate::error::{Error, Result};

/// Immutable layer index -> (base, end) mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerTable {
    bases: Vec<u64>,
    ends: Vec<u64>,
}

impl LayerTable {
    /// Build a table from parallel base/end arrays.
    ///
    /// The arrays must be the same length, with `base <= end` per layer.
    pub fn new(bases: Vec<u64>, ends: Vec<u64>) -> Result<Self> {
        if bases.len() != ends.len() {
            return Err(Error::MalformedField {
                field: "layer table",
                message: format!(
                    "{} base(s) but {} end(s)",
                    bases.len(),
                    ends.len()
                ),
            });
        }
        for (layer, (&base, &end)) in bases.iter().zip(ends.iter()).enumerate() {
            if base > end {
                return Err(Error::MalformedField {
                    field: "layer table",
                    message: format!(
                        "layer {layer} base {base:#x} is above its end {end:#x}"
                    ),
                });
            }
        }
        Ok(Self { bases, ends })
    }

    pub fn layer_count(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Bounds of `layer`, failing with [`Error::LayerOutOfRange`] when the
    /// snapshot references a layer the table never configured.
    pub fn bounds(&self, layer: u32) -> Result<(u64, u64)> {
        let index = layer as usize;
        match (self.bases.get(index), self.ends.get(index)) {
            (Some(&base), Some(&end)) => Ok((base, end)),
            _ => Err(Error::LayerOutOfRange {
                layer,
                layers: self.bases.len(),
            }),
        }
    }
}

/// Incremental [`LayerTable`] construction, one layer at a time.
#[derive(Debug, Default)]
pub struct LayerTableBuilder {
    bases: Vec<u64>,
    ends: Vec<u64>,
}

impl LayerTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next layer's bounds.
    pub fn push(&mut self, base: u64, end: u64) -> &mut Self {
        self.bases.push(base);
        self.ends.push(end);
        self
    }

    pub fn build(self) -> Result<LayerTable> {
        LayerTable::new(self.bases, self.ends)
    }
}
