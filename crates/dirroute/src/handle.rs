// File: src/handle.rs
// Purpose: The router capability set that discovered handlers are registered against

use crate::method::HttpMethod;

/// Outcome of a single registration call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The router accepted the handler
    Created,
    /// The router has no capability for this method; nothing happened
    Unsupported,
    /// The router already serves this route and method; the earlier handler stays
    Conflict,
    /// The router refused the route itself, e.g. a path pattern it cannot
    /// represent or one that clashes with an existing pattern
    Rejected,
}

/// A router that handlers can be registered on, one capability per method
///
/// Every capability defaults to [`Registration::Unsupported`], so a router
/// implements only the methods it actually serves. Calling a missing
/// capability is a no-op, never an error.
pub trait RouterHandle<H> {
    fn get(&mut self, _route: &str, _handler: H) -> Registration {
        Registration::Unsupported
    }

    fn put(&mut self, _route: &str, _handler: H) -> Registration {
        Registration::Unsupported
    }

    fn post(&mut self, _route: &str, _handler: H) -> Registration {
        Registration::Unsupported
    }

    fn delete(&mut self, _route: &str, _handler: H) -> Registration {
        Registration::Unsupported
    }

    fn patch(&mut self, _route: &str, _handler: H) -> Registration {
        Registration::Unsupported
    }

    fn head(&mut self, _route: &str, _handler: H) -> Registration {
        Registration::Unsupported
    }

    fn options(&mut self, _route: &str, _handler: H) -> Registration {
        Registration::Unsupported
    }
}

impl<H, R: RouterHandle<H> + ?Sized> RouterHandle<H> for &mut R {
    fn get(&mut self, route: &str, handler: H) -> Registration {
        (**self).get(route, handler)
    }

    fn put(&mut self, route: &str, handler: H) -> Registration {
        (**self).put(route, handler)
    }

    fn post(&mut self, route: &str, handler: H) -> Registration {
        (**self).post(route, handler)
    }

    fn delete(&mut self, route: &str, handler: H) -> Registration {
        (**self).delete(route, handler)
    }

    fn patch(&mut self, route: &str, handler: H) -> Registration {
        (**self).patch(route, handler)
    }

    fn head(&mut self, route: &str, handler: H) -> Registration {
        (**self).head(route, handler)
    }

    fn options(&mut self, route: &str, handler: H) -> Registration {
        (**self).options(route, handler)
    }
}

/// Invoke the capability that matches `method`
pub fn register<H, R>(router: &mut R, method: HttpMethod, route: &str, handler: H) -> Registration
where
    R: RouterHandle<H> + ?Sized,
{
    match method {
        HttpMethod::Get => router.get(route, handler),
        HttpMethod::Put => router.put(route, handler),
        HttpMethod::Post => router.post(route, handler),
        HttpMethod::Delete => router.delete(route, handler),
        HttpMethod::Patch => router.patch(route, handler),
        HttpMethod::Head => router.head(route, handler),
        HttpMethod::Options => router.options(route, handler),
    }
}

/// A route registered on a [`RouteTable`]
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry<H> {
    pub route: String,
    pub method: HttpMethod,
    pub handler: H,
}

/// In-memory router that records every registration in call order
///
/// Supports all seven capabilities. Useful for dry runs and for inspecting
/// what a directory would register before touching a real router.
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    entries: Vec<RouteEntry<H>>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, method: HttpMethod, route: &str, handler: H) -> Registration {
        self.entries.push(RouteEntry {
            route: route.to_string(),
            method,
            handler,
        });
        Registration::Created
    }

    pub fn entries(&self) -> &[RouteEntry<H>] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<RouteEntry<H>> {
        self.entries
    }

    /// `(route, method)` pairs in registration order
    pub fn routes(&self) -> Vec<(&str, HttpMethod)> {
        self.entries
            .iter()
            .map(|entry| (entry.route.as_str(), entry.method))
            .collect()
    }

    /// Handler registered for an exact route and method
    pub fn find(&self, route: &str, method: HttpMethod) -> Option<&H> {
        self.entries
            .iter()
            .find(|entry| entry.route == route && entry.method == method)
            .map(|entry| &entry.handler)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H> RouterHandle<H> for RouteTable<H> {
    fn get(&mut self, route: &str, handler: H) -> Registration {
        self.record(HttpMethod::Get, route, handler)
    }

    fn put(&mut self, route: &str, handler: H) -> Registration {
        self.record(HttpMethod::Put, route, handler)
    }

    fn post(&mut self, route: &str, handler: H) -> Registration {
        self.record(HttpMethod::Post, route, handler)
    }

    fn delete(&mut self, route: &str, handler: H) -> Registration {
        self.record(HttpMethod::Delete, route, handler)
    }

    fn patch(&mut self, route: &str, handler: H) -> Registration {
        self.record(HttpMethod::Patch, route, handler)
    }

    fn head(&mut self, route: &str, handler: H) -> Registration {
        self.record(HttpMethod::Head, route, handler)
    }

    fn options(&mut self, route: &str, handler: H) -> Registration {
        self.record(HttpMethod::Options, route, handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Router that only serves reads
    #[derive(Default)]
    struct ReadOnly {
        seen: Vec<String>,
    }

    impl RouterHandle<u8> for ReadOnly {
        fn get(&mut self, route: &str, _handler: u8) -> Registration {
            self.seen.push(format!("get {}", route));
            Registration::Created
        }

        fn head(&mut self, route: &str, _handler: u8) -> Registration {
            self.seen.push(format!("head {}", route));
            Registration::Created
        }
    }

    #[test]
    fn test_register_selects_matching_capability() {
        let mut table = RouteTable::new();
        for (i, method) in HttpMethod::ALL.into_iter().enumerate() {
            assert_eq!(register(&mut table, method, "/x", i), Registration::Created);
        }

        let methods: Vec<HttpMethod> = table.entries().iter().map(|e| e.method).collect();
        assert_eq!(methods, HttpMethod::ALL.to_vec());
        assert_eq!(table.find("/x", HttpMethod::Delete), Some(&3));
    }

    #[test]
    fn test_missing_capability_is_noop() {
        let mut router = ReadOnly::default();

        assert_eq!(register(&mut router, HttpMethod::Get, "/a", 1u8), Registration::Created);
        assert_eq!(register(&mut router, HttpMethod::Post, "/a", 2u8), Registration::Unsupported);
        assert_eq!(register(&mut router, HttpMethod::Head, "/a", 3u8), Registration::Created);
        assert_eq!(register(&mut router, HttpMethod::Options, "/a", 4u8), Registration::Unsupported);

        assert_eq!(router.seen, vec!["get /a", "head /a"]);
    }

    #[test]
    fn test_mutable_reference_forwards() {
        let mut table: RouteTable<&str> = RouteTable::new();
        {
            let mut borrowed = &mut table;
            register(&mut borrowed, HttpMethod::Patch, "/p", "h");
        }
        assert_eq!(table.routes(), vec![("/p", HttpMethod::Patch)]);
    }
}
