//! Snapshot access primitives.
//!
//! A snapshot is a read-only, absolute-addressed byte space: a core dump or
//! a memory image captured from a live process. The inspector never writes
//! to it; everything here is a plain read at an address.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Read-only access to an absolute-addressed memory capture.
///
/// Implementors report reads outside the captured regions as
/// [`Error::UnreadableAddress`]; the provided integer readers decode
/// little-endian, matching the cache's on-disk byte order.
pub trait ReadSnapshot {
    /// Read exactly `buf.len()` bytes starting at `address`.
    fn read_bytes(&self, address: u64, buf: &mut [u8]) -> Result<()>;

    /// Read `length` bytes starting at `address` into a new buffer.
    fn read_vec(&self, address: u64, length: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; length];
        self.read_bytes(address, &mut buf)?;
        Ok(buf)
    }

    fn read_u8(&self, address: u64) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_bytes(address, &mut buf)?;
        Ok(buf[0])
    }

    fn read_u16(&self, address: u64) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.read_bytes(address, &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    fn read_u32(&self, address: u64) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_bytes(address, &mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn read_i32(&self, address: u64) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.read_bytes(address, &mut buf)?;
        Ok(i32::from_le_bytes(buf))
    }

    fn read_u64(&self, address: u64) -> Result<u64> {
        let mut buf = [0u8; 8];
        self.read_bytes(address, &mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }
}

/// An owned snapshot image: a contiguous byte buffer mapped at `base`.
///
/// This is the concrete snapshot used for dump files loaded from disk and
/// for synthetic images in tests.
#[derive(Debug, Clone)]
pub struct SnapshotImage {
    base: u64,
    bytes: Vec<u8>,
}

impl SnapshotImage {
    pub fn new(base: u64, bytes: Vec<u8>) -> Self {
        Self { base, bytes }
    }

    /// Load a dump file as an image mapped at `base`.
    pub fn from_file<P: AsRef<Path>>(path: P, base: u64) -> Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        Ok(Self::new(base, bytes))
    }

    /// Lowest mapped address.
    pub fn base(&self) -> u64 {
        self.base
    }

    /// One past the highest mapped address.
    pub fn end(&self) -> u64 {
        self.base + self.bytes.len() as u64
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The raw image contents, for scanners that need a contiguous view.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl ReadSnapshot for SnapshotImage {
    fn read_bytes(&self, address: u64, buf: &mut [u8]) -> Result<()> {
        let length = buf.len();
        let unreadable = || Error::UnreadableAddress { address, length };

        let start = address.checked_sub(self.base).ok_or_else(unreadable)?;
        let start = usize::try_from(start).map_err(|_| unreadable())?;
        let end = start.checked_add(buf.len()).ok_or_else(unreadable)?;
        let slice = self.bytes.get(start..end).ok_or_else(unreadable)?;
        buf.copy_from_slice(slice);
        Ok(())
    }
}
