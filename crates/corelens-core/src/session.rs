//! Analysis session state.
//!
//! A session is the only state that outlives a single query: the snapshot's
//! schema tag, the resizable-cache flag, and the layer address table. The
//! table is installed at most once per session; later installs are ignored,
//! so setup code racing to populate it cannot clobber an earlier winner.

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::layers::{LayerTable, LayerTableBuilder};
use crate::offset::{self, CacheOffset};
use crate::schema::{EncodingKind, SchemaVersion};

#[derive(Debug)]
pub struct Session {
    schema: SchemaVersion,
    encoding: EncodingKind,
    resizable: bool,
    layers: OnceCell<LayerTable>,
}

impl Session {
    /// Build a session from a configuration sidecar.
    ///
    /// The schema version is validated here, so every later query can rely
    /// on a supported generation. Configured layer bounds install the table
    /// immediately; otherwise the caller scans the snapshot for layer
    /// headers and installs the result.
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let session = Self::with_schema(
            SchemaVersion::new(config.schema_version),
            config.resizable_cache,
        )?;
        if let Some(bounds) = &config.layers {
            let mut builder = LayerTableBuilder::new();
            for layer in bounds {
                builder.push(layer.base, layer.end);
            }
            session.install_layers(builder.build()?);
        }
        Ok(session)
    }

    /// Build a session directly from its parts, without a table.
    pub fn with_schema(schema: SchemaVersion, resizable: bool) -> Result<Self> {
        let encoding = schema.encoding()?;
        Ok(Self {
            schema,
            encoding,
            resizable,
            layers: OnceCell::new(),
        })
    }

    /// Install the layer address table. First writer wins: returns `true`
    /// when this call installed the table, `false` when an earlier install
    /// already had and this one was ignored.
    pub fn install_layers(&self, table: LayerTable) -> bool {
        let installed = self.layers.set(table).is_ok();
        if !installed {
            debug!("Layer table already installed; ignoring a later install");
        }
        installed
    }

    /// The installed layer table, or [`Error::TableUninitialized`] when
    /// queried before session setup completed.
    pub fn layers(&self) -> Result<&LayerTable> {
        self.layers.get().ok_or(Error::TableUninitialized)
    }

    /// Resolve a decoded offset against this session's layer table.
    ///
    /// The unpopulated-field check happens before the table lookup, so an
    /// absent field never requires the table to be installed.
    pub fn resolve(&self, offset: CacheOffset) -> Result<Option<u64>> {
        if !self.resizable && offset.is_zero() {
            return Ok(None);
        }
        offset::resolve(self.layers()?, offset, self.resizable)
    }

    pub fn schema(&self) -> SchemaVersion {
        self.schema
    }

    pub fn encoding(&self) -> EncodingKind {
        self.encoding
    }

    pub fn is_resizable(&self) -> bool {
        self.resizable
    }
}
