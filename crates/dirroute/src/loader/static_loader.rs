// File: src/loader/static_loader.rs
// Purpose: Loader backed by a manifest of modules compiled into the binary

use super::{LoadFuture, ModuleExports, ModuleLoader};
use crate::error::{BoxError, LoadError};
use crate::path::normalize_dir;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

type ExportFactory<H> = Box<dyn Fn() -> Result<ModuleExports<H>, BoxError> + Send + Sync>;

/// Loader for handler modules that are compiled in rather than loaded at runtime
///
/// Each on-disk handler file is paired with a factory that produces its
/// exports. Scanning still decides *which* files take part; the manifest only
/// supplies their contents. Paths are compared after normalization, so
/// `./routes/users/mod.rs` and `routes/users/mod.rs` are the same module.
///
/// ```
/// use dirroute::{ModuleExports, StaticLoader};
///
/// let loader = StaticLoader::new()
///     .module("routes/index.rs", || ModuleExports::new().export("GET", "index"))
///     .module("routes/users/mod.rs", || ModuleExports::new().export("POST", "create"));
///
/// assert_eq!(loader.len(), 2);
/// ```
pub struct StaticLoader<H> {
    modules: HashMap<String, ExportFactory<H>>,
}

impl<H> Default for StaticLoader<H> {
    fn default() -> Self {
        Self {
            modules: HashMap::new(),
        }
    }
}

impl<H> fmt::Debug for StaticLoader<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<_> = self.modules.keys().collect();
        paths.sort();
        f.debug_struct("StaticLoader").field("modules", &paths).finish()
    }
}

/// Lookup key for a module path: normalized, `/`-separated
fn module_key(path: &Path) -> String {
    normalize_dir(path).to_string_lossy().replace('\\', "/")
}

impl<H> StaticLoader<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module whose exports are always available
    pub fn module<F>(mut self, path: impl AsRef<Path>, exports: F) -> Self
    where
        F: Fn() -> ModuleExports<H> + Send + Sync + 'static,
    {
        self.modules
            .insert(module_key(path.as_ref()), Box::new(move || Ok(exports())));
        self
    }

    /// Register a module whose initialization may fail
    ///
    /// A failing factory surfaces as [`LoadError::Init`] and aborts binding.
    pub fn try_module<F, E>(mut self, path: impl AsRef<Path>, exports: F) -> Self
    where
        F: Fn() -> Result<ModuleExports<H>, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.modules.insert(
            module_key(path.as_ref()),
            Box::new(move || exports().map_err(Into::into)),
        );
        self
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.modules.contains_key(&module_key(path.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<H: Send> ModuleLoader<H> for StaticLoader<H> {
    fn load<'a>(&'a self, path: &'a Path) -> LoadFuture<'a, H> {
        Box::pin(async move {
            let factory = self
                .modules
                .get(&module_key(path))
                .ok_or_else(|| LoadError::NotRegistered {
                    path: path.to_path_buf(),
                })?;

            factory().map_err(|source| LoadError::Init {
                path: path.to_path_buf(),
                source,
            })
        })
    }
}
