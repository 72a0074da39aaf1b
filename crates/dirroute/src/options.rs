// File: src/options.rs
// Purpose: Discovery options (route directory and handler file extensions)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where to look for handler modules and which files qualify
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryOptions {
    /// Directory scanned for handler modules (default: "routes")
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// File name suffixes, without the dot (default: ["ts", "js"])
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

// Default values
fn default_directory() -> PathBuf {
    PathBuf::from("routes")
}

fn default_extensions() -> Vec<String> {
    vec!["ts".to_string(), "js".to_string()]
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            extensions: default_extensions(),
        }
    }
}

impl DiscoveryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the route directory
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Replace the accepted extensions
    ///
    /// A leading dot is tolerated: `".rs"` and `"rs"` are the same extension.
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.into();
                match ext.strip_prefix('.') {
                    Some(stripped) => stripped.to_string(),
                    None => ext,
                }
            })
            .collect();
        self
    }

    /// Parse options from a TOML document; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
