//! CLI command implementations.

pub mod hexdump;
pub mod layers;
pub mod record;
