//! Layer-header scanning.
//!
//! A capture that arrives without a sidecar config still carries enough to
//! rebuild the layer table: every layer region begins with a fixed header
//! holding the eyecatcher, the layer index and the region size. Scanning
//! the image for the eyecatcher recovers all of them.

use memchr::memmem;
use tracing::debug;

use crate::error::{Error, Result};
use crate::layers::{LayerTable, LayerTableBuilder};
use crate::memory::layout::layer_header;
use crate::memory::{ReadSnapshot, SnapshotImage};

fn malformed(message: String) -> Error {
    Error::MalformedField {
        field: "layer header",
        message,
    }
}

/// Scan `image` for layer headers and build the address table.
///
/// Layers may appear in any file order but their indexes must cover
/// `0..n` exactly once each. Each layer's slot in the table spans from its
/// header to header + region size.
pub fn scan_layer_headers(image: &SnapshotImage) -> Result<LayerTable> {
    let finder = memmem::Finder::new(&layer_header::MAGIC);
    let mut found: Vec<(u32, u64, u64)> = Vec::new();

    for position in finder.find_iter(image.bytes()) {
        let header_address = image.base() + position as u64;
        let index = image.read_u32(header_address + layer_header::LAYER_INDEX)?;
        let size = image.read_u64(header_address + layer_header::REGION_SIZE)?;

        if size < layer_header::SIZEOF {
            return Err(malformed(format!(
                "region size {size} at {header_address:#x} is smaller than the header"
            )));
        }
        let end = header_address
            .checked_add(size)
            .filter(|&end| end <= image.end())
            .ok_or_else(|| {
                malformed(format!(
                    "layer {index} region at {header_address:#x} runs past the snapshot"
                ))
            })?;

        debug!(
            "Found layer {} at {:#x} ({} bytes)",
            index, header_address, size
        );
        found.push((index, header_address, end));
    }

    if found.is_empty() {
        return Err(malformed("no layer headers found".to_string()));
    }

    found.sort_by_key(|&(index, ..)| index);
    let mut builder = LayerTableBuilder::new();
    for (expected, &(index, base, end)) in found.iter().enumerate() {
        if index as usize != expected {
            return Err(malformed(format!(
                "layer indexes are not contiguous: expected {expected}, found {index}"
            )));
        }
        builder.push(base, end);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MockSnapshotBuilder;

    fn write_header(
        builder: MockSnapshotBuilder,
        address: u64,
        index: u32,
        size: u64,
    ) -> MockSnapshotBuilder {
        builder
            .write_bytes(address, &layer_header::MAGIC)
            .write_u32(address + layer_header::LAYER_INDEX, index)
            .write_u64(address + layer_header::REGION_SIZE, size)
    }

    #[test]
    fn test_scan_two_layers() {
        let builder = MockSnapshotBuilder::new(0x1000, 0x9000);
        let builder = write_header(builder, 0x1000, 0, 0x1000);
        let snapshot = write_header(builder, 0x5000, 1, 0x1000).build();

        let table = scan_layer_headers(&snapshot).unwrap();
        assert_eq!(table.layer_count(), 2);
        assert_eq!(table.bounds(0).unwrap(), (0x1000, 0x2000));
        assert_eq!(table.bounds(1).unwrap(), (0x5000, 0x6000));
    }

    #[test]
    fn test_scan_orders_by_layer_index() {
        // Layer 1 earlier in the file than layer 0.
        let builder = MockSnapshotBuilder::new(0x1000, 0x9000);
        let builder = write_header(builder, 0x1000, 1, 0x800);
        let snapshot = write_header(builder, 0x4000, 0, 0x800).build();

        let table = scan_layer_headers(&snapshot).unwrap();
        assert_eq!(table.bounds(0).unwrap(), (0x4000, 0x4800));
        assert_eq!(table.bounds(1).unwrap(), (0x1000, 0x1800));
    }

    #[test]
    fn test_scan_empty_image() {
        let snapshot = MockSnapshotBuilder::new(0x1000, 0x100).build();
        let err = scan_layer_headers(&snapshot).unwrap_err();
        assert!(matches!(err, Error::MalformedField { field: "layer header", .. }));
    }

    #[test]
    fn test_scan_non_contiguous_indexes() {
        let builder = MockSnapshotBuilder::new(0x1000, 0x9000);
        let builder = write_header(builder, 0x1000, 0, 0x800);
        let snapshot = write_header(builder, 0x4000, 2, 0x800).build();

        let err = scan_layer_headers(&snapshot).unwrap_err();
        assert!(matches!(err, Error::MalformedField { field: "layer header", .. }));
    }

    #[test]
    fn test_scan_duplicate_indexes() {
        let builder = MockSnapshotBuilder::new(0x1000, 0x9000);
        let builder = write_header(builder, 0x1000, 0, 0x800);
        let snapshot = write_header(builder, 0x4000, 0, 0x800).build();

        let err = scan_layer_headers(&snapshot).unwrap_err();
        assert!(matches!(err, Error::MalformedField { field: "layer header", .. }));
    }

    #[test]
    fn test_scan_truncated_region() {
        let builder = MockSnapshotBuilder::new(0x1000, 0x2000);
        let snapshot = write_header(builder, 0x1000, 0, 0x10_0000).build();

        let err = scan_layer_headers(&snapshot).unwrap_err();
        assert!(matches!(err, Error::MalformedField { field: "layer header", .. }));
    }
}
