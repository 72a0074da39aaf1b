//! Module loading
//!
//! A loader turns a discovered file into the mapping of export names to
//! values that the binder inspects. Two loaders ship with the crate:
//!
//! - [`StaticLoader`]: a manifest of modules compiled into the binary
//! - [`TomlLoader`]: declarative handler files read at startup

use crate::error::LoadError;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;

mod static_loader;
mod toml_loader;

pub use static_loader::StaticLoader;
pub use toml_loader::{StaticResponse, TomlLoader};

/// Future returned by [`ModuleLoader::load`]
pub type LoadFuture<'a, H> = Pin<Box<dyn Future<Output = Result<ModuleExports<H>, LoadError>> + Send + 'a>>;

/// Turns a file path into the module's exports
pub trait ModuleLoader<H>: Send + Sync {
    fn load<'a>(&'a self, path: &'a Path) -> LoadFuture<'a, H>;
}

impl<H, L: ModuleLoader<H> + ?Sized> ModuleLoader<H> for &L {
    fn load<'a>(&'a self, path: &'a Path) -> LoadFuture<'a, H> {
        (**self).load(path)
    }
}

/// Named values exported by a handler module, in export order
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleExports<H> {
    entries: Vec<(String, H)>,
}

impl<H> Default for ModuleExports<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H> ModuleExports<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an export
    pub fn export(mut self, name: impl Into<String>, value: H) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: H) {
        self.entries.push((name.into(), value));
    }

    /// Export names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&H> {
        self.entries
            .iter()
            .find(|(export, _)| export == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H> IntoIterator for ModuleExports<H> {
    type Item = (String, H);
    type IntoIter = std::vec::IntoIter<(String, H)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<H, N: Into<String>> FromIterator<(N, H)> for ModuleExports<H> {
    fn from_iter<I: IntoIterator<Item = (N, H)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(name, value)| (name.into(), value)).collect(),
        }
    }
}
