//! Mock snapshot construction for tests.

use super::SnapshotImage;

/// Builds a [`SnapshotImage`] by poking typed values at absolute addresses.
pub struct MockSnapshotBuilder {
    base: u64,
    bytes: Vec<u8>,
}

impl MockSnapshotBuilder {
    pub fn new(base: u64, size: usize) -> Self {
        Self {
            base,
            bytes: vec![0u8; size],
        }
    }

    pub fn write_bytes(mut self, address: u64, data: &[u8]) -> Self {
        let start = (address - self.base) as usize;
        self.bytes[start..start + data.len()].copy_from_slice(data);
        self
    }

    pub fn write_u8(self, address: u64, value: u8) -> Self {
        self.write_bytes(address, &[value])
    }

    pub fn write_u16(self, address: u64, value: u16) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_u32(self, address: u64, value: u32) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_i32(self, address: u64, value: i32) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_u64(self, address: u64, value: u64) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn build(self) -> SnapshotImage {
        SnapshotImage::new(self.base, self.bytes)
    }
}
