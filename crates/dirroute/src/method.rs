// File: src/method.rs
// Purpose: The seven HTTP methods a handler module may export

use std::fmt;
use std::str::FromStr;

/// HTTP method recognized as a handler export name
///
/// Export names are matched exactly and case-sensitively against the
/// uppercase wire names, so a module exporting `get` registers nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    /// Every recognized method, in canonical order
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    /// Uppercase name, as exported by handler modules
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Lowercase name of the router capability that registers this method
    pub fn capability(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
        }
    }

    /// Looks up the method an export name stands for
    ///
    /// Returns `None` for anything that is not exactly one of the uppercase
    /// method names.
    ///
    /// ```
    /// use dirroute::HttpMethod;
    ///
    /// assert_eq!(HttpMethod::from_export_name("GET"), Some(HttpMethod::Get));
    /// assert_eq!(HttpMethod::from_export_name("get"), None);
    /// assert_eq!(HttpMethod::from_export_name("helper"), None);
    /// ```
    pub fn from_export_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.as_str() == name)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a string that is not a recognized method
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized HTTP method: {0:?}")]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_export_name(s).ok_or_else(|| UnknownMethod(s.to_string()))
    }
}
