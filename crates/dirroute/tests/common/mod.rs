//! Shared utilities for binder integration tests.
#![allow(dead_code)]

use dirroute::{LoadFuture, ModuleLoader};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Create an empty file (and its parent directories) under `root`.
pub fn touch(root: &Path, relative: &str) -> PathBuf {
    write(root, relative, "")
}

/// Create a file with `content` (and its parent directories) under `root`.
pub fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

/// Loader wrapper that remembers every path it was asked to load.
pub struct RecordingLoader<L> {
    inner: L,
    loaded: Mutex<Vec<PathBuf>>,
}

impl<L> RecordingLoader<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            loaded: Mutex::new(Vec::new()),
        }
    }

    pub fn loaded(&self) -> Vec<PathBuf> {
        self.loaded.lock().unwrap().clone()
    }
}

impl<H, L: ModuleLoader<H>> ModuleLoader<H> for RecordingLoader<L> {
    fn load<'a>(&'a self, path: &'a Path) -> LoadFuture<'a, H> {
        self.loaded.lock().unwrap().push(path.to_path_buf());
        self.inner.load(path)
    }
}
