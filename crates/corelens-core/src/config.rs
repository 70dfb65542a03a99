//! Session configuration sidecar.
//!
//! Capture tooling can write a small JSON file next to a dump recording the
//! schema version, the resizable-cache flag and, optionally, pre-scanned
//! layer bounds. Loading one spares the inspector a layer-header scan.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::schema::SchemaVersion;

/// Bounds of one cache layer, as recorded by the capture tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerBounds {
    pub base: u64,
    pub end: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Schema generation of the captured cache.
    pub schema_version: u32,
    /// Whether the cache is resizable (zero offsets are real displacements).
    #[serde(default)]
    pub resizable_cache: bool,
    /// When the snapshot was captured, if the tooling recorded it.
    #[serde(default)]
    pub captured_at: Option<DateTime<Utc>>,
    /// Pre-scanned layer bounds; absent means the inspector scans for them.
    #[serde(default)]
    pub layers: Option<Vec<LayerBounds>>,
}

impl SessionConfig {
    pub fn new(schema_version: SchemaVersion, resizable_cache: bool) -> Self {
        Self {
            schema_version: schema_version.value(),
            resizable_cache,
            captured_at: Some(Utc::now()),
            layers: None,
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SessionConfig = serde_json::from_str(&content)?;
        debug!(
            "Loaded session config from {} (schema v{})",
            path.as_ref().display(),
            config.schema_version
        );
        Ok(config)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), content)?;
        info!("Saved session config to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();

        let mut config = SessionConfig::new(SchemaVersion::CURRENT, true);
        config.layers = Some(vec![LayerBounds { base: 0x1000, end: 0x2000 }]);
        config.save_to_path(&path).unwrap();

        let loaded = SessionConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded.schema_version, SchemaVersion::CURRENT.value());
        assert!(loaded.resizable_cache);
        assert_eq!(
            loaded.layers.as_deref(),
            Some(&[LayerBounds { base: 0x1000, end: 0x2000 }][..])
        );
        assert_eq!(loaded.captured_at, config.captured_at);
    }

    #[test]
    fn test_config_defaults_for_missing_fields() {
        let loaded: SessionConfig =
            serde_json::from_str(r#"{ "schema_version": 1 }"#).unwrap();
        assert_eq!(loaded.schema_version, 1);
        assert!(!loaded.resizable_cache);
        assert!(loaded.captured_at.is_none());
        assert!(loaded.layers.is_none());
    }
}
