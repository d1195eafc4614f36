use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

/// Tracks staged files that must be removed if an install does not complete
#[derive(Default, Debug)]
pub struct CleanupContext {
    paths: Vec<PathBuf>,
}

impl CleanupContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path to be cleaned up on failure
    pub fn add(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    /// Remove a path from the cleanup list (e.g., once it has been committed)
    pub fn remove(&mut self, path: &Path) {
        self.paths.retain(|p| p != path);
    }

    /// Split off the paths registered from position `at` onwards.
    pub fn split_off(&mut self, at: usize) -> CleanupContext {
        CleanupContext {
            paths: self.paths.split_off(at),
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Delete every registered path that still exists and forget them
    pub fn cleanup<R: Runtime + ?Sized>(&mut self, runtime: &R) {
        for path in self.paths.drain(..) {
            if !runtime.exists(&path) {
                continue;
            }

            debug!("Cleaning up: {:?}", path);
            if let Err(e) = runtime.remove_file(&path) {
                warn!("Failed to clean up {:?}: {}", path, e);
            }
        }
    }
}
