use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Layer table queried before any layers were installed")]
    TableUninitialized,

    #[error("Layer {layer} out of range: table has {layers} layer(s)")]
    LayerOutOfRange { layer: u32, layers: usize },

    #[error("Malformed {field}: {message}")]
    MalformedField {
        field: &'static str,
        message: String,
    },

    #[error("Unreadable snapshot address {address:#x} ({length} bytes)")]
    UnreadableAddress { address: u64, length: usize },

    #[error("Unsupported snapshot schema version {version}")]
    UnsupportedSchemaVersion { version: u32 },

    #[error("Corrupt record field {field}: {source}")]
    CorruptRecord {
        field: &'static str,
        #[source]
        source: Box<Error>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error indicates snapshot corruption (per-field,
    /// reportable) rather than a setup or environment problem.
    pub fn is_corrupt_snapshot(&self) -> bool {
        match self {
            Error::LayerOutOfRange { .. }
            | Error::MalformedField { .. }
            | Error::UnreadableAddress { .. } => true,
            Error::CorruptRecord { source, .. } => source.is_corrupt_snapshot(),
            _ => false,
        }
    }
}
