// File: src/scan.rs
// Purpose: Recursive discovery of handler files under a route directory

use crate::error::DiscoveryError;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tracing::trace;

type ScanFuture<'a> = Pin<Box<dyn Future<Output = Result<(), DiscoveryError>> + Send + 'a>>;

/// Recursively collect every file under `root` whose name ends with
/// `.<ext>` for one of `extensions`
///
/// Traversal is depth-first and keeps the order in which the platform lists
/// each directory; nothing is sorted, so the order can differ between
/// filesystems. Directories never appear in the result. Symbolic links are
/// treated as leaves and are not followed.
///
/// Any directory that cannot be listed fails the whole scan.
pub async fn scan(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, DiscoveryError> {
    let suffixes: Vec<String> = extensions.iter().map(|ext| format!(".{}", ext)).collect();
    let mut files = Vec::new();
    scan_dir(root, &suffixes, &mut files).await?;
    Ok(files)
}

/// Whether a file name ends with one of the dotted suffixes
pub(crate) fn has_suffix(name: &str, suffixes: &[String]) -> bool {
    suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
}

fn scan_dir<'a>(dir: &'a Path, suffixes: &'a [String], files: &'a mut Vec<PathBuf>) -> ScanFuture<'a> {
    Box::pin(async move {
        trace!("Listing {:?}", dir);

        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| DiscoveryError::new(dir, e))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DiscoveryError::new(dir, e))?
        {
            let path = entry.path();
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| DiscoveryError::new(&path, e))?;

            if file_type.is_dir() {
                scan_dir(&path, suffixes, files).await?;
            } else if has_suffix(&entry.file_name().to_string_lossy(), suffixes) {
                files.push(path);
            }
        }

        Ok(())
    })
}
