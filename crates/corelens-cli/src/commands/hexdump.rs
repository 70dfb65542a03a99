//! Hexdump command implementation.
//!
//! Displays raw snapshot bytes in traditional hexdump format, useful for
//! investigating record layouts and debugging offset calculations.
//!
//! # Output Format
//!
//! ```text
//! 0x1000: 53 43 4C 31 00 00 00 00  00 10 00 00 00 00 00 00  |SCL1............|
//! ```

use std::path::Path;

use anyhow::Result;
use corelens_core::{ReadSnapshot, SnapshotImage};

/// Run the hexdump command
pub fn run(dump: &Path, base: u64, address: u64, size: usize, ascii: bool) -> Result<()> {
    let image = SnapshotImage::from_file(dump, base)?;
    let bytes = image.read_vec(address, size)?;

    println!("Hexdump at {:#x} ({} bytes):", address, size);
    println!();

    for (i, chunk) in bytes.chunks(16).enumerate() {
        print!("{:#x}: ", address + (i * 16) as u64);

        // Hex bytes
        for (j, byte) in chunk.iter().enumerate() {
            if j == 8 {
                print!(" ");
            }
            print!("{:02X} ", byte);
        }

        // Padding for incomplete lines
        if chunk.len() < 16 {
            for j in chunk.len()..16 {
                if j == 8 {
                    print!(" ");
                }
                print!("   ");
            }
        }

        // ASCII representation
        if ascii {
            print!(" |");
            for byte in chunk {
                if *byte >= 0x20 && *byte < 0x7F {
                    print!("{}", *byte as char);
                } else {
                    print!(".");
                }
            }
            for _ in chunk.len()..16 {
                print!(" ");
            }
            print!("|");
        }

        println!();
    }

    Ok(())
}
