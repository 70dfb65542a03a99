use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// Parse an address in decimal or `0x` hex form.
fn parse_address(s: &str) -> Result<u64, std::num::ParseIntError> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else {
        s.parse()
    }
}

#[derive(Parser)]
#[command(name = "corelens")]
#[command(about = "Layered shared-cache snapshot inspector")]
struct Args {
    /// Load address of the snapshot image
    #[arg(long, default_value = "0", value_parser = parse_address, global = true)]
    base: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a snapshot for layer headers and list them
    Layers {
        /// Snapshot dump file
        dump: PathBuf,
    },
    /// Inspect a record header and resolve its payload and token
    Record {
        /// Snapshot dump file
        dump: PathBuf,

        /// Absolute address of the record
        #[arg(long, value_parser = parse_address)]
        address: u64,

        /// Session config sidecar (JSON); defaults to the current schema,
        /// non-resizable, with layers scanned from the snapshot
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Hexdump a region of the snapshot
    Hexdump {
        /// Snapshot dump file
        dump: PathBuf,

        /// Absolute start address
        #[arg(long, value_parser = parse_address)]
        address: u64,

        /// Number of bytes to dump
        #[arg(long, default_value_t = 256)]
        size: usize,

        /// Include an ASCII column
        #[arg(long)]
        ascii: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("corelens_core=info".parse()?)
                .add_directive("corelens_cli=info".parse()?),
        )
        .init();

    let args = Args::parse();

    match args.command {
        Command::Layers { dump } => commands::layers::run(&dump, args.base),
        Command::Record {
            dump,
            address,
            config,
        } => commands::record::run(&dump, args.base, address, config.as_deref()),
        Command::Hexdump {
            dump,
            address,
            size,
            ascii,
        } => commands::hexdump::run(&dump, args.base, address, size, ascii),
    }
}
