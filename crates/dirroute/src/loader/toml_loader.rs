// File: src/loader/toml_loader.rs
// Purpose: Declarative handler modules written as TOML files

use super::{LoadFuture, ModuleExports, ModuleLoader};
use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A fixed response served by a declarative handler
///
/// ```toml
/// [GET]
/// body = "all users"
///
/// [POST]
/// status = 201
/// content_type = "application/json"
/// body = '{"created":true}'
/// headers = { location = "/users/1" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticResponse {
    #[serde(default = "default_status")]
    pub status: u16,

    #[serde(default)]
    pub body: String,

    #[serde(default = "default_content_type")]
    pub content_type: String,

    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

fn default_status() -> u16 {
    200
}

fn default_content_type() -> String {
    "text/plain; charset=utf-8".to_string()
}

impl Default for StaticResponse {
    fn default() -> Self {
        Self {
            status: default_status(),
            body: String::new(),
            content_type: default_content_type(),
            headers: BTreeMap::new(),
        }
    }
}

impl StaticResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            ..Self::default()
        }
    }
}

/// Loads `.toml` handler modules
///
/// Every top-level table is an export whose name is the table name and whose
/// value is a [`StaticResponse`]. Top-level scalars and arrays are plain data,
/// not handlers, and are not exported. Tables come out in key order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlLoader;

impl TomlLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse the exports of a handler module from its source text
    pub fn parse(path: &Path, content: &str) -> Result<ModuleExports<StaticResponse>, LoadError> {
        let parse_error = |source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        };

        let table: toml::Table = toml::from_str(content).map_err(parse_error)?;

        let mut exports = ModuleExports::new();
        for (name, value) in table {
            if value.is_table() {
                let response: StaticResponse = value.try_into().map_err(parse_error)?;
                exports.insert(name, response);
            }
        }

        Ok(exports)
    }
}

impl ModuleLoader<StaticResponse> for TomlLoader {
    fn load<'a>(&'a self, path: &'a Path) -> LoadFuture<'a, StaticResponse> {
        Box::pin(async move {
            let content = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;

            Self::parse(path, &content)
        })
    }
}
