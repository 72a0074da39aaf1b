// dirroute Procedural Macros
// Compile-time export tables for handler modules

use proc_macro::TokenStream;

mod handlers;

/// Turn an inline module into a handler module
///
/// Generates two items inside the module:
///
/// - `EXPORT_NAMES`: the name of every `pub fn`, in source order
/// - `exports::<S>()`: a `dirroute::ModuleExports` holding every `pub fn` whose name
///   is all uppercase ASCII letters, wrapped as an axum handler
///
/// Which of those exports become routes is decided at binding time: only the
/// seven HTTP method names are registered, so `FETCH` is exported but ignored
/// and `helper` is not exported at all.
///
/// # Examples
///
/// ```ignore
/// // File: routes/users/mod.rs
///
/// #[dirroute::handlers]
/// pub mod users {
///     // GET /users
///     pub async fn GET() -> &'static str {
///         "all users"
///     }
///
///     // POST /users
///     pub async fn POST(body: String) -> String {
///         body
///     }
///
///     // Not a handler
///     pub fn helper() -> u32 {
///         42
///     }
/// }
///
/// let loader = dirroute::StaticLoader::new()
///     .module("routes/users/mod.rs", users::exports::<()>);
/// ```
#[proc_macro_attribute]
pub fn handlers(attr: TokenStream, item: TokenStream) -> TokenStream {
    handlers::expand(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
