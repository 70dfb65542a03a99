pub mod layout;
mod snapshot;

#[cfg(test)]
pub mod mock;

pub use snapshot::{ReadSnapshot, SnapshotImage};

#[cfg(test)]
pub use mock::MockSnapshotBuilder;
