//! Layers command implementation.

use std::path::Path;

use anyhow::Result;
use corelens_core::{SnapshotImage, scan_layer_headers};
use owo_colors::OwoColorize;

/// Run the layers command
pub fn run(dump: &Path, base: u64) -> Result<()> {
    let image = SnapshotImage::from_file(dump, base)?;
    let table = scan_layer_headers(&image)?;

    println!("{} layer(s) in {}:", table.layer_count(), dump.display());
    for layer in 0..table.layer_count() as u32 {
        let (layer_base, layer_end) = table.bounds(layer)?;
        println!(
            "  {} {:#012x}..{:#012x} ({} bytes)",
            format!("layer {layer}:").cyan(),
            layer_base,
            layer_end,
            layer_end - layer_base
        );
    }
    Ok(())
}
