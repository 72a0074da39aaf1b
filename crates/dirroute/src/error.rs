// File: src/error.rs
// Purpose: Error types for discovery, module loading and binding

use std::io;
use std::path::PathBuf;

/// Boxed error produced by a module's own initialization code
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level failure of a binding run
///
/// Every variant is fatal: the run stops at the first one.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No router handle was supplied
    #[error("Router must be set up")]
    Configuration,

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// A directory under the route root could not be listed
#[derive(Debug, thiserror::Error)]
#[error("Failed to read route directory {path:?}: {source}")]
pub struct DiscoveryError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl DiscoveryError {
    pub fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

/// A discovered file could not be loaded as a handler module
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The loader has no module for this path
    #[error("No handler module registered for {path:?}")]
    NotRegistered { path: PathBuf },

    #[error("Failed to read handler module {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse handler module {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The module's initialization failed
    #[error("Handler module {path:?} failed to initialize: {source}")]
    Init {
        path: PathBuf,
        #[source]
        source: BoxError,
    },
}

impl LoadError {
    /// Path of the module that failed
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::NotRegistered { path }
            | LoadError::Io { path, .. }
            | LoadError::Parse { path, .. }
            | LoadError::Init { path, .. } => path,
        }
    }
}
