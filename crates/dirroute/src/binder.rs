// File: src/binder.rs
// Purpose: Binds discovered handler modules onto a router

use crate::error::Error;
use crate::handle::{register, Registration, RouterHandle};
use crate::loader::{ModuleExports, ModuleLoader};
use crate::method::HttpMethod;
use crate::options::DiscoveryOptions;
use crate::path::{derive_route_path, normalize_dir};
use crate::scan::scan;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

/// A handler ready to be registered: route path, method and handler value
#[derive(Debug, Clone, PartialEq)]
pub struct RouteBinding<H> {
    pub route: String,
    pub method: HttpMethod,
    pub handler: H,
    /// Handler module the binding came from
    pub source: PathBuf,
}

/// Summary of a completed binding run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindReport {
    /// Normalized route directory
    pub root: PathBuf,
    /// Number of handler modules loaded
    pub files: usize,
    /// Routes the router accepted, in registration order
    pub routes: Vec<(String, HttpMethod)>,
    /// Registrations the router had no capability for
    pub skipped: usize,
    /// Registrations refused because the route and method were already taken
    pub conflicts: usize,
    /// Registrations whose route the router could not accept
    pub rejected: usize,
}

/// Keep the exports whose names are recognized HTTP methods
///
/// Export order is preserved. Any other name is ignored.
pub fn extract_methods<H>(exports: ModuleExports<H>) -> Vec<(HttpMethod, H)> {
    exports
        .into_iter()
        .filter_map(|(name, value)| match HttpMethod::from_export_name(&name) {
            Some(method) => Some((method, value)),
            None => {
                trace!("Ignoring export {:?}", name);
                None
            }
        })
        .collect()
}

/// Discovers handler modules under a directory and registers them on a router
///
/// ```no_run
/// use dirroute::{DiscoveryOptions, FileRouter, RouteTable, TomlLoader};
///
/// # async fn run() -> Result<(), dirroute::Error> {
/// let mut router = RouteTable::new();
/// let report = FileRouter::new(TomlLoader)
///     .options(DiscoveryOptions::new().directory("routes").extensions(["toml"]))
///     .bind(&mut router)
///     .await?;
///
/// println!("{} routes from {} files", report.routes.len(), report.files);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileRouter<L> {
    loader: L,
    options: DiscoveryOptions,
}

impl<L> FileRouter<L> {
    /// Create a file router with default options
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            options: DiscoveryOptions::default(),
        }
    }

    pub fn options(mut self, options: DiscoveryOptions) -> Self {
        self.options = options;
        self
    }

    pub fn discovery_options(&self) -> &DiscoveryOptions {
        &self.options
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Route directory after normalization
    pub fn root(&self) -> PathBuf {
        normalize_dir(&self.options.directory)
    }

    /// Scan, load and resolve every handler without touching a router
    ///
    /// Files are loaded one at a time in scan order; the first failure aborts.
    pub async fn discover<H>(&self) -> Result<Vec<RouteBinding<H>>, Error>
    where
        L: ModuleLoader<H>,
    {
        let root = self.root();
        self.discover_in(&root).await.map(|(bindings, _)| bindings)
    }

    async fn discover_in<H>(&self, root: &Path) -> Result<(Vec<RouteBinding<H>>, usize), Error>
    where
        L: ModuleLoader<H>,
    {
        let files = scan(root, &self.options.extensions).await?;
        debug!("Found {} handler modules under {:?}", files.len(), root);

        let mut bindings = Vec::new();
        for file in &files {
            let exports = self.loader.load(file).await?;
            let route = derive_route_path(root, file);

            for (method, handler) in extract_methods(exports) {
                bindings.push(RouteBinding {
                    route: route.clone(),
                    method,
                    handler,
                    source: file.clone(),
                });
            }
        }

        Ok((bindings, files.len()))
    }

    /// Register every discovered handler on `router`
    ///
    /// All modules are loaded before the first registration, so a discovery
    /// or load failure leaves `router` untouched. Registration then follows
    /// scan order, and export order within a module.
    pub async fn bind<H, R>(&self, router: &mut R) -> Result<BindReport, Error>
    where
        L: ModuleLoader<H>,
        R: RouterHandle<H> + ?Sized,
    {
        let root = self.root();
        info!("Using {:?} as route directory", root);

        let (bindings, files) = self.discover_in::<H>(&root).await?;

        let mut report = BindReport {
            root,
            files,
            ..BindReport::default()
        };

        for binding in bindings {
            match register(&mut *router, binding.method, &binding.route, binding.handler) {
                Registration::Created => {
                    info!("Created route {} with {} method", binding.route, binding.method);
                    report.routes.push((binding.route, binding.method));
                }
                Registration::Unsupported => {
                    debug!(
                        "Router has no {} capability, skipped {} from {:?}",
                        binding.method.capability(),
                        binding.route,
                        binding.source
                    );
                    report.skipped += 1;
                }
                Registration::Conflict => {
                    warn!(
                        "Route {} already has a {} handler, ignoring the one from {:?}",
                        binding.route, binding.method, binding.source
                    );
                    report.conflicts += 1;
                }
                Registration::Rejected => {
                    warn!(
                        "Router rejected route {} for {} from {:?}",
                        binding.route, binding.method, binding.source
                    );
                    report.rejected += 1;
                }
            }
        }

        Ok(report)
    }
}

/// Discover handler modules and register them on `router`
///
/// A missing router fails with [`Error::Configuration`] before any
/// filesystem access. `None` options mean [`DiscoveryOptions::default`].
pub async fn setup_file_router<H, R, L>(
    router: Option<&mut R>,
    loader: L,
    options: Option<DiscoveryOptions>,
) -> Result<BindReport, Error>
where
    L: ModuleLoader<H>,
    R: RouterHandle<H> + ?Sized,
{
    let router = router.ok_or(Error::Configuration)?;

    FileRouter::new(loader)
        .options(options.unwrap_or_default())
        .bind(router)
        .await
}
