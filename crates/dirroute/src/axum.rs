// File: src/axum.rs
// Purpose: RouterHandle implementation on top of axum::Router

use crate::handle::{Registration, RouterHandle};
use crate::loader::StaticResponse;
use crate::method::HttpMethod;
use axum::handler::Handler;
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{on, MethodFilter, MethodRouter};
use axum::Router;
use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use tracing::warn;

type MakeRoute<S> = Box<dyn FnOnce(MethodFilter) -> MethodRouter<S> + Send>;

/// A type-erased axum handler, ready to be routed under any method
///
/// Build one with [`handler`].
pub struct AxumHandler<S = ()> {
    make: MakeRoute<S>,
}

impl<S> fmt::Debug for AxumHandler<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AxumHandler")
    }
}

impl<S> AxumHandler<S> {
    fn into_method_router(self, method: HttpMethod) -> MethodRouter<S> {
        (self.make)(method_filter(method))
    }
}

/// Erase an axum handler so it can be exported from a handler module
///
/// ```
/// use dirroute::axum::handler;
/// use dirroute::ModuleExports;
///
/// async fn list() -> &'static str {
///     "users"
/// }
///
/// let exports: ModuleExports<dirroute::axum::AxumHandler> =
///     ModuleExports::new().export("GET", handler(list));
/// assert_eq!(exports.len(), 1);
/// ```
pub fn handler<H, T, S>(handler: H) -> AxumHandler<S>
where
    H: Handler<T, S>,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    AxumHandler {
        make: Box::new(move |filter| on(filter, handler)),
    }
}

/// Method filter serving exactly `method`
pub fn method_filter(method: HttpMethod) -> MethodFilter {
    match method {
        HttpMethod::Get => MethodFilter::GET,
        HttpMethod::Put => MethodFilter::PUT,
        HttpMethod::Post => MethodFilter::POST,
        HttpMethod::Delete => MethodFilter::DELETE,
        HttpMethod::Patch => MethodFilter::PATCH,
        HttpMethod::Head => MethodFilter::HEAD,
        HttpMethod::Options => MethodFilter::OPTIONS,
    }
}

impl IntoResponse for StaticResponse {
    fn into_response(self) -> Response {
        let Ok(status) = StatusCode::from_u16(self.status) else {
            warn!("Invalid status code {} in static response", self.status);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        };

        let mut response = (status, self.body).into_response();
        let headers = response.headers_mut();

        match HeaderValue::from_str(&self.content_type) {
            Ok(value) => {
                headers.insert(header::CONTENT_TYPE, value);
            }
            Err(_) => {
                warn!("Invalid content type {:?} in static response", self.content_type);
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        }

        for (name, value) in &self.headers {
            let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) else {
                warn!("Invalid header {:?} in static response", name);
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            };
            headers.insert(name, value);
        }

        response
    }
}

/// Collects discovered handlers into an [`axum::Router`]
///
/// Several methods on one route merge into a single method router. A second
/// handler for a route and method already taken is refused with
/// [`Registration::Conflict`]. A route axum cannot insert (a mid-path
/// catch-all, sibling parameters such as `/:id` and `/:slug`, or a method
/// the wrapped router already serves) is refused with
/// [`Registration::Rejected`] and the router is left as it was. axum reports
/// these by panicking, so the panic hook still prints its message.
pub struct AxumRouter<S = ()> {
    router: Router<S>,
    registered: HashSet<(String, HttpMethod)>,
}

impl<S> fmt::Debug for AxumRouter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxumRouter")
            .field("routes", &self.registered.len())
            .finish()
    }
}

impl<S> Default for AxumRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::from_router(Router::new())
    }
}

impl<S> From<Router<S>> for AxumRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn from(router: Router<S>) -> Self {
        Self::from_router(router)
    }
}

impl<S> AxumRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Add discovered routes to an existing router
    pub fn from_router(router: Router<S>) -> Self {
        Self {
            router,
            registered: HashSet::new(),
        }
    }

    /// Whether a handler was registered for this route and method
    pub fn has_route(&self, route: &str, method: HttpMethod) -> bool {
        self.registered.contains(&(route.to_string(), method))
    }

    pub fn into_inner(self) -> Router<S> {
        self.router
    }

    fn add(&mut self, method: HttpMethod, route: &str, method_router: impl FnOnce() -> MethodRouter<S>) -> Registration {
        let key = (route.to_string(), method);
        if self.registered.contains(&key) {
            return Registration::Conflict;
        }

        // Insert into a copy so a refused route leaves self.router intact
        let router = self.router.clone();
        match panic::catch_unwind(AssertUnwindSafe(|| router.route(route, method_router()))) {
            Ok(router) => {
                self.router = router;
                self.registered.insert(key);
                Registration::Created
            }
            Err(payload) => {
                warn!("axum rejected {} {}: {}", method, route, panic_message(payload.as_ref()));
                Registration::Rejected
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else {
        "unknown error"
    }
}

macro_rules! capabilities {
    ($handler:ty, |$method:ident, $value:ident| $make:expr) => {
        fn get(&mut self, route: &str, $value: $handler) -> Registration {
            let $method = HttpMethod::Get;
            self.add($method, route, move || $make)
        }

        fn put(&mut self, route: &str, $value: $handler) -> Registration {
            let $method = HttpMethod::Put;
            self.add($method, route, move || $make)
        }

        fn post(&mut self, route: &str, $value: $handler) -> Registration {
            let $method = HttpMethod::Post;
            self.add($method, route, move || $make)
        }

        fn delete(&mut self, route: &str, $value: $handler) -> Registration {
            let $method = HttpMethod::Delete;
            self.add($method, route, move || $make)
        }

        fn patch(&mut self, route: &str, $value: $handler) -> Registration {
            let $method = HttpMethod::Patch;
            self.add($method, route, move || $make)
        }

        fn head(&mut self, route: &str, $value: $handler) -> Registration {
            let $method = HttpMethod::Head;
            self.add($method, route, move || $make)
        }

        fn options(&mut self, route: &str, $value: $handler) -> Registration {
            let $method = HttpMethod::Options;
            self.add($method, route, move || $make)
        }
    };
}

impl<S> RouterHandle<AxumHandler<S>> for AxumRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    capabilities!(AxumHandler<S>, |method, handler| handler.into_method_router(method));
}

impl<S> RouterHandle<StaticResponse> for AxumRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    capabilities!(StaticResponse, |method, response| on(
        method_filter(method),
        move || async move { response }
    ));
}
