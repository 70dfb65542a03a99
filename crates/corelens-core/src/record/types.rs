use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, FromRepr, IntoStaticStr};

/// Payload kind stored in a record's data-type byte.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    FromRepr,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[repr(u8)]
pub enum DataType {
    Unknown = 0,
    Helper = 1,
    VmData = 2,
    ZipEntry = 3,
    JitProfile = 4,
    JitHints = 5,
    AotHeader = 6,
    StartupHints = 7,
}

impl DataType {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}
