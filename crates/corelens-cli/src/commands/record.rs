//! Record command implementation.
//!
//! Prints every field of a record header, then resolves the payload and
//! token addresses through the session's layer table.

use std::path::Path;

use anyhow::Result;
use corelens_core::{
    ByteDataRecord, DataType, SchemaVersion, Session, SessionConfig, SnapshotImage,
    scan_layer_headers,
};
use owo_colors::OwoColorize;
use tracing::info;

/// Run the record command
pub fn run(dump: &Path, base: u64, address: u64, config: Option<&Path>) -> Result<()> {
    let image = SnapshotImage::from_file(dump, base)?;

    let config = match config {
        Some(path) => SessionConfig::load_from_path(path)?,
        None => SessionConfig::new(SchemaVersion::CURRENT, false),
    };
    let session = Session::new(&config)?;

    if session.layers().is_err() {
        info!("No layer bounds in config; scanning the snapshot");
        session.install_layers(scan_layer_headers(&image)?);
    }

    let record = ByteDataRecord::at(&image, &session, address);

    println!(
        "Record at {:#x} (schema {}):",
        address,
        session.schema()
    );
    println!("  {} {}", "data length:".green(), record.data_length()?);

    let raw_type = record.data_type_raw()?;
    match DataType::from_u8(raw_type) {
        Some(data_type) => println!("  {} {} ({})", "data type:".green(), data_type, raw_type),
        None => println!("  {} unknown ({})", "data type:".green(), raw_type),
    }

    println!("  {} {}", "private use:".green(), record.in_private_use()?);
    println!("  {} {}", "owner id:".green(), record.private_owner_id()?);

    let decoded = record.external_block_offset()?;
    println!(
        "  {} offset {} in layer {}",
        "external block:".green(),
        decoded.offset,
        decoded.layer
    );
    println!("  {} {:#x}", "data address:".green(), record.data_address()?);

    match record.token_address()? {
        Some(token) => println!("  {} {:#x}", "token:".green(), token),
        None => println!("  {} (none)", "token:".green()),
    }

    Ok(())
}
