//! # dirroute
//!
//! File-based route discovery. Handler modules live in a directory tree; the
//! tree decides the route path, and the names a module exports decide the
//! HTTP methods:
//!
//! ```text
//! routes/
//! ├── index.toml          → /          (exports GET)
//! └── users/
//!     ├── list.toml       → /users     (exports GET, POST)
//!     └── admin/
//!         └── audit.toml  → /users/admin
//! ```
//!
//! Only the *directory* of a file matters, so two files in the same folder
//! share a route. Export names must match `GET`, `PUT`, `POST`, `DELETE`,
//! `PATCH`, `HEAD` or `OPTIONS` exactly; any other export is ignored.
//!
//! ## Pieces
//!
//! - [`scan()`]: recursive discovery of qualifying files
//! - [`ModuleLoader`]: turns a file into its exports ([`StaticLoader`],
//!   [`TomlLoader`])
//! - [`RouterHandle`]: the seven registration capabilities of a router
//!   ([`RouteTable`], [`axum::AxumRouter`])
//! - [`FileRouter`] / [`setup_file_router`]: the binding run itself
//!
//! ## Example
//!
//! ```no_run
//! use dirroute::{setup_file_router, DiscoveryOptions, RouteTable, TomlLoader};
//!
//! # async fn run() -> Result<(), dirroute::Error> {
//! let mut router = RouteTable::new();
//! let options = DiscoveryOptions::new().directory("routes").extensions(["toml"]);
//!
//! setup_file_router(Some(&mut router), TomlLoader, Some(options)).await?;
//!
//! for (route, method) in router.routes() {
//!     println!("{method} {route}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure policy
//!
//! Discovery is fail-fast: an unreadable directory or a module that fails to
//! load aborts the run. Every module is loaded before the first
//! registration, so a failed run never leaves a half-populated router.

// Lets generated code refer to `::dirroute` from inside this crate too
extern crate self as dirroute;

// ============================================================================
// Module Declarations
// ============================================================================

mod binder;
mod error;
mod handle;
pub mod loader;
mod method;
mod options;
pub mod path;
mod scan;

#[cfg(feature = "axum")]
pub mod axum;

pub use binder::{extract_methods, setup_file_router, BindReport, FileRouter, RouteBinding};
pub use error::{BoxError, DiscoveryError, Error, LoadError};
pub use handle::{register, Registration, RouteEntry, RouteTable, RouterHandle};
pub use loader::{LoadFuture, ModuleExports, ModuleLoader, StaticLoader, StaticResponse, TomlLoader};
pub use method::{HttpMethod, UnknownMethod};
pub use options::DiscoveryOptions;
pub use scan::scan;

#[cfg(feature = "macros")]
pub use dirroute_macro::handlers;
