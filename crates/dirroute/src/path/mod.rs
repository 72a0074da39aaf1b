/// Path utilities for route derivation
///
/// All functions are **pure**: given same input, always produce same output
/// with no side effects and no filesystem access.

use std::path::{Component, Path, PathBuf};

/// Route path used for files sitting directly in the root directory
pub const ROOT_ROUTE: &str = "/";

/// Normalize a directory path lexically
///
/// - Drops `.` components: `./routes` → `routes`
/// - Folds `name/..` pairs: `routes/api/..` → `routes`
/// - Drops trailing separators: `routes/` → `routes`
/// - An empty result becomes `.`
///
/// Leading `..` components that cannot be folded are kept, and `..` directly
/// under the filesystem root is discarded.
///
/// # Examples
///
/// ```
/// use dirroute::path::normalize_dir;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(normalize_dir(Path::new("./routes/")), PathBuf::from("routes"));
/// assert_eq!(normalize_dir(Path::new("routes/api/../v1")), PathBuf::from("routes/v1"));
/// assert_eq!(normalize_dir(Path::new("./")), PathBuf::from("."));
/// ```
pub fn normalize_dir(dir: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in dir.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }

    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

/// Derive the route path for a handler file
///
/// The route comes from the file's *directory* relative to `root`; the file
/// name itself carries no routing meaning. Separators are always `/`.
///
/// # Rules
///
/// - `root/handler.ts` → `/`
/// - `root/users/list.ts` → `/users`
/// - `root/a/b/handler.ts` → `/a/b`
/// - A file outside `root` keeps its whole directory as the route
/// - A directory name that is not valid UTF-8 is converted lossily: each
///   invalid sequence becomes U+FFFD, so two such directories can derive
///   the same route
///
/// # Examples
///
/// ```
/// use dirroute::path::derive_route_path;
/// use std::path::Path;
///
/// let root = Path::new("routes");
/// assert_eq!(derive_route_path(root, Path::new("routes/index.ts")), "/");
/// assert_eq!(derive_route_path(root, Path::new("routes/users/list.ts")), "/users");
/// assert_eq!(derive_route_path(root, Path::new("routes/a/b/handler.ts")), "/a/b");
/// ```
pub fn derive_route_path(root: &Path, file: &Path) -> String {
    let dir = file.parent().unwrap_or_else(|| Path::new(""));
    let relative = dir.strip_prefix(root).unwrap_or(dir);

    let remainder = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
        .replace('\\', "/");

    if remainder.trim().is_empty() {
        ROOT_ROUTE.to_string()
    } else {
        format!("/{}", remainder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("routes", "routes")]
    #[case("./routes", "routes")]
    #[case("routes/", "routes")]
    #[case("routes/./api", "routes/api")]
    #[case("routes/api/..", "routes")]
    #[case("../shared/routes", "../shared/routes")]
    #[case("", ".")]
    #[case(".", ".")]
    #[case("/srv/app/../routes", "/srv/routes")]
    #[case("/..", "/")]
    fn test_normalize_dir(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_dir(Path::new(input)), PathBuf::from(expected));
    }

    #[rstest]
    #[case("routes", "routes/index.ts", "/")]
    #[case("routes", "routes/users/list.ts", "/users")]
    #[case("routes", "routes/users/index.ts", "/users")]
    #[case("routes", "routes/a/b/handler.ts", "/a/b")]
    #[case("/srv/routes", "/srv/routes/api/v1/items.js", "/api/v1")]
    #[case(".", "./health/check.ts", "/health")]
    fn test_derive_route_path(#[case] root: &str, #[case] file: &str, #[case] expected: &str) {
        assert_eq!(derive_route_path(Path::new(root), Path::new(file)), expected);
    }

    #[test]
    fn test_derive_is_deterministic() {
        let root = Path::new("routes");
        let file = Path::new("routes/users/list.ts");
        assert_eq!(derive_route_path(root, file), derive_route_path(root, file));
    }

    #[test]
    fn test_file_outside_root_keeps_directory() {
        let route = derive_route_path(Path::new("routes"), Path::new("other/place/x.ts"));
        assert_eq!(route, "/other/place");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_directory_is_replaced() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let file = Path::new("routes")
            .join(OsStr::from_bytes(b"caf\xff"))
            .join("index.ts");
        assert_eq!(derive_route_path(Path::new("routes"), &file), "/caf\u{FFFD}");
    }

    #[test]
    fn test_bare_file_name_is_root() {
        assert_eq!(derive_route_path(Path::new("routes"), Path::new("x.ts")), "/");
    }
}
