//! Record field helpers.
//!
//! Cache records are fixed-size headers whose fields reference other
//! snapshot locations through versioned offsets. [`ByteDataRecord`] overlays
//! a header at an absolute address and composes the schema probe, the
//! offset decoder and the layered resolver to answer "where is this
//! record's payload / token" for the session's schema generation.
//!
//! Every lower-layer failure surfaces as [`Error::CorruptRecord`] naming
//! the field, with the original cause attached.

mod types;

pub use types::DataType;

use crate::error::{Error, Result};
use crate::memory::ReadSnapshot;
use crate::memory::layout::{record_v1, record_v2};
use crate::offset::{self, CacheOffset};
use crate::schema::EncodingKind;
use crate::session::Session;

struct HeaderLayout {
    external_block_offset: u64,
    data_length: u64,
    data_type: u64,
    in_private_use: u64,
    private_owner_id: u64,
    token_offset: u64,
    sizeof: u64,
}

const LEGACY_LAYOUT: HeaderLayout = HeaderLayout {
    external_block_offset: record_v1::EXTERNAL_BLOCK_OFFSET,
    data_length: record_v1::DATA_LENGTH,
    data_type: record_v1::DATA_TYPE,
    in_private_use: record_v1::IN_PRIVATE_USE,
    private_owner_id: record_v1::PRIVATE_OWNER_ID,
    token_offset: record_v1::TOKEN_OFFSET,
    sizeof: record_v1::SIZEOF,
};

const LAYERED_LAYOUT: HeaderLayout = HeaderLayout {
    external_block_offset: record_v2::EXTERNAL_BLOCK_OFFSET,
    data_length: record_v2::DATA_LENGTH,
    data_type: record_v2::DATA_TYPE,
    in_private_use: record_v2::IN_PRIVATE_USE,
    private_owner_id: record_v2::PRIVATE_OWNER_ID,
    token_offset: record_v2::TOKEN_OFFSET,
    sizeof: record_v2::SIZEOF,
};

fn wrap(field: &'static str) -> impl FnOnce(Error) -> Error {
    move |source| Error::CorruptRecord {
        field,
        source: Box::new(source),
    }
}

/// A record header overlaid at an absolute snapshot address.
pub struct ByteDataRecord<'a, R: ReadSnapshot> {
    snapshot: &'a R,
    session: &'a Session,
    address: u64,
}

impl<'a, R: ReadSnapshot> ByteDataRecord<'a, R> {
    pub fn at(snapshot: &'a R, session: &'a Session, address: u64) -> Self {
        Self {
            snapshot,
            session,
            address,
        }
    }

    pub fn address(&self) -> u64 {
        self.address
    }

    fn layout(&self) -> &'static HeaderLayout {
        match self.session.encoding() {
            EncodingKind::Legacy => &LEGACY_LAYOUT,
            EncodingKind::Layered => &LAYERED_LAYOUT,
        }
    }

    /// Payload length in bytes.
    pub fn data_length(&self) -> Result<u32> {
        self.snapshot
            .read_u32(self.address + self.layout().data_length)
            .map_err(wrap("data_length"))
    }

    /// Raw payload-kind byte.
    pub fn data_type_raw(&self) -> Result<u8> {
        self.snapshot
            .read_u8(self.address + self.layout().data_type)
            .map_err(wrap("data_type"))
    }

    /// Payload kind, when the byte maps to a known [`DataType`].
    pub fn data_type(&self) -> Result<Option<DataType>> {
        Ok(DataType::from_u8(self.data_type_raw()?))
    }

    pub fn in_private_use(&self) -> Result<bool> {
        self.snapshot
            .read_u8(self.address + self.layout().in_private_use)
            .map(|flag| flag != 0)
            .map_err(wrap("in_private_use"))
    }

    pub fn private_owner_id(&self) -> Result<u16> {
        self.snapshot
            .read_u16(self.address + self.layout().private_owner_id)
            .map_err(wrap("private_owner_id"))
    }

    /// The decoded external-block offset field.
    pub fn external_block_offset(&self) -> Result<CacheOffset> {
        offset::decode(
            self.snapshot,
            self.address + self.layout().external_block_offset,
            self.session.schema(),
        )
        .map_err(wrap("external_block_offset"))
    }

    /// Absolute address of the record's payload.
    ///
    /// When the external-block field is unpopulated the payload sits
    /// directly after the fixed header, so the result is always an address,
    /// never absent.
    pub fn data_address(&self) -> Result<u64> {
        let decoded = self.external_block_offset()?;
        let resolved = self
            .session
            .resolve(decoded)
            .map_err(wrap("external_block_offset"))?;
        Ok(match resolved {
            Some(address) => address,
            None => self.address + self.layout().sizeof,
        })
    }

    /// Absolute address of the record's token, or `None` when the record
    /// carries no token. Absence is a normal outcome, not an error.
    pub fn token_address(&self) -> Result<Option<u64>> {
        let decoded = offset::decode(
            self.snapshot,
            self.address + self.layout().token_offset,
            self.session.schema(),
        )
        .map_err(wrap("token_offset"))?;
        self.session.resolve(decoded).map_err(wrap("token_offset"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::LayerTable;
    use crate::memory::MockSnapshotBuilder;
    use crate::memory::layout::{record_v1, record_v2};
    use crate::schema::SchemaVersion;

    fn install_two_layers(session: &Session) {
        let table = LayerTable::new(vec![0x1000, 0x5000], vec![0x2000, 0x6000]).unwrap();
        assert!(session.install_layers(table));
    }

    #[test]
    fn test_legacy_record_fields() {
        let record_addr = 0x1100;
        let snapshot = MockSnapshotBuilder::new(0x1000, 0x1000)
            .write_i32(record_addr + record_v1::EXTERNAL_BLOCK_OFFSET, 0)
            .write_u32(record_addr + record_v1::DATA_LENGTH, 512)
            .write_u8(record_addr + record_v1::DATA_TYPE, 3)
            .write_u8(record_addr + record_v1::IN_PRIVATE_USE, 1)
            .write_u16(record_addr + record_v1::PRIVATE_OWNER_ID, 7)
            .write_i32(record_addr + record_v1::TOKEN_OFFSET, 0)
            .build();

        let session = Session::with_schema(SchemaVersion::new(1), false).unwrap();
        install_two_layers(&session);
        let record = ByteDataRecord::at(&snapshot, &session, record_addr);

        assert_eq!(record.data_length().unwrap(), 512);
        assert_eq!(record.data_type_raw().unwrap(), 3);
        assert_eq!(record.data_type().unwrap(), Some(DataType::ZipEntry));
        assert!(record.in_private_use().unwrap());
        assert_eq!(record.private_owner_id().unwrap(), 7);
    }

    #[test]
    fn test_legacy_fallback_payload_follows_header() {
        // Unpopulated external block: payload sits right after the header.
        let record_addr = 0x1100;
        let snapshot = MockSnapshotBuilder::new(0x1000, 0x1000).build();

        let session = Session::with_schema(SchemaVersion::new(1), false).unwrap();
        install_two_layers(&session);
        let record = ByteDataRecord::at(&snapshot, &session, record_addr);

        assert_eq!(record.data_address().unwrap(), record_addr + record_v1::SIZEOF);
        assert_eq!(record.token_address().unwrap(), None);
    }

    #[test]
    fn test_legacy_populated_external_block() {
        let record_addr = 0x1100;
        let snapshot = MockSnapshotBuilder::new(0x1000, 0x1000)
            .write_i32(record_addr + record_v1::EXTERNAL_BLOCK_OFFSET, 0x80)
            .build();

        let session = Session::with_schema(SchemaVersion::new(1), false).unwrap();
        install_two_layers(&session);
        let record = ByteDataRecord::at(&snapshot, &session, record_addr);

        // Legacy offsets resolve against layer 0.
        assert_eq!(record.data_address().unwrap(), 0x1000 + 0x80);
    }

    #[test]
    fn test_layered_record_resolves_through_upper_layer() {
        let record_addr = 0x1100;
        let snapshot = MockSnapshotBuilder::new(0x1000, 0x1000)
            .write_i32(record_addr + record_v2::EXTERNAL_BLOCK_OFFSET, 0x40)
            .write_u32(record_addr + record_v2::EXTERNAL_BLOCK_OFFSET + 4, 1)
            .write_u32(record_addr + record_v2::DATA_LENGTH, 64)
            .write_i32(record_addr + record_v2::TOKEN_OFFSET, -0x20)
            .write_u32(record_addr + record_v2::TOKEN_OFFSET + 4, 1)
            .build();

        let session = Session::with_schema(SchemaVersion::new(3), false).unwrap();
        install_two_layers(&session);
        let record = ByteDataRecord::at(&snapshot, &session, record_addr);

        assert_eq!(record.data_address().unwrap(), 0x5000 + 0x40);
        assert_eq!(record.token_address().unwrap(), Some(0x6000 - 0x20));
        assert_eq!(record.data_length().unwrap(), 64);
    }

    #[test]
    fn test_resizable_zero_offset_is_layer_base() {
        let record_addr = 0x1100;
        let snapshot = MockSnapshotBuilder::new(0x1000, 0x1000)
            .write_i32(record_addr + record_v2::EXTERNAL_BLOCK_OFFSET, 0)
            .write_u32(record_addr + record_v2::EXTERNAL_BLOCK_OFFSET + 4, 1)
            .build();

        let session = Session::with_schema(SchemaVersion::new(3), true).unwrap();
        install_two_layers(&session);
        let record = ByteDataRecord::at(&snapshot, &session, record_addr);

        // Resizable cache: zero is a real displacement, not the sentinel.
        assert_eq!(record.data_address().unwrap(), 0x5000);
    }

    #[test]
    fn test_uninitialized_table_wrapped_as_corrupt_record() {
        let record_addr = 0x1100;
        let snapshot = MockSnapshotBuilder::new(0x1000, 0x1000)
            .write_i32(record_addr + record_v2::EXTERNAL_BLOCK_OFFSET, 0x40)
            .write_u32(record_addr + record_v2::EXTERNAL_BLOCK_OFFSET + 4, 1)
            .build();

        let session = Session::with_schema(SchemaVersion::new(3), false).unwrap();
        let record = ByteDataRecord::at(&snapshot, &session, record_addr);

        let err = record.data_address().unwrap_err();
        assert!(matches!(
            err,
            Error::CorruptRecord {
                field: "external_block_offset",
                ref source,
            } if matches!(**source, Error::TableUninitialized)
        ));
    }

    #[test]
    fn test_out_of_range_layer_wrapped_as_corrupt_record() {
        let record_addr = 0x1100;
        let snapshot = MockSnapshotBuilder::new(0x1000, 0x1000)
            .write_i32(record_addr + record_v2::TOKEN_OFFSET, 0x10)
            .write_u32(record_addr + record_v2::TOKEN_OFFSET + 4, 5)
            .build();

        let session = Session::with_schema(SchemaVersion::new(3), false).unwrap();
        install_two_layers(&session);
        let record = ByteDataRecord::at(&snapshot, &session, record_addr);

        let err = record.token_address().unwrap_err();
        assert!(matches!(
            err,
            Error::CorruptRecord {
                field: "token_offset",
                ref source,
            } if matches!(**source, Error::LayerOutOfRange { layer: 5, layers: 2 })
        ));
    }

    #[test]
    fn test_unreadable_record_wrapped_as_corrupt_record() {
        let snapshot = MockSnapshotBuilder::new(0x1000, 0x10).build();
        let session = Session::with_schema(SchemaVersion::new(1), false).unwrap();
        let record = ByteDataRecord::at(&snapshot, &session, 0x9000);

        let err = record.data_length().unwrap_err();
        assert!(matches!(
            err,
            Error::CorruptRecord {
                field: "data_length",
                ref source,
            } if matches!(**source, Error::UnreadableAddress { .. })
        ));
    }

    #[test]
    fn test_malformed_layer_tag_wrapped_as_corrupt_record() {
        let record_addr = 0x1100;
        let snapshot = MockSnapshotBuilder::new(0x1000, 0x1000)
            .write_i32(record_addr + record_v2::EXTERNAL_BLOCK_OFFSET, 0x40)
            .write_u32(record_addr + record_v2::EXTERNAL_BLOCK_OFFSET + 4, 5000)
            .build();

        let session = Session::with_schema(SchemaVersion::new(3), false).unwrap();
        install_two_layers(&session);
        let record = ByteDataRecord::at(&snapshot, &session, record_addr);

        let err = record.external_block_offset().unwrap_err();
        assert!(matches!(
            err,
            Error::CorruptRecord {
                field: "external_block_offset",
                ref source,
            } if matches!(**source, Error::MalformedField { field: "layer tag", .. })
        ));
    }
}
