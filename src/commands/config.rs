use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

use crate::{index::Index, path::Path, runtime::Runtime};

/// Name of the host application's resource directory under the user's
/// configuration directory.
const RESOURCE_DIR: &str = "REAPER";

pub struct Config<R: Runtime> {
    pub runtime: R,
    pub install_root: Option<PathBuf>,
}

impl<R: Runtime> Config<R> {
    pub fn new(runtime: R, install_root: Option<PathBuf>) -> Self {
        Self {
            runtime,
            install_root,
        }
    }

    /// The install root, falling back to the host's resource directory.
    ///
    /// A relative root is taken from the current directory before it is
    /// normalized, so leading `..` segments still climb.
    #[tracing::instrument(skip(self))]
    pub fn root(&self) -> Result<Path> {
        let mut root = match &self.install_root {
            Some(path) => path.clone(),
            None => default_install_root(&self.runtime)?,
        };
        if root.is_relative() {
            root = self.runtime.current_dir()?.join(root);
        }

        info!("Using install root: {}", root.display());

        let text = root
            .to_str()
            .with_context(|| format!("Install root {:?} is not valid UTF-8", root))?;
        Ok(Path::new(text))
    }

    #[tracing::instrument(skip(self))]
    pub fn load_index(&self, file: &std::path::Path) -> Result<Index> {
        let index = Index::load(&self.runtime, file)
            .with_context(|| format!("Failed to load index {:?}", file))?;
        debug!(
            "Loaded index {} with {} categories",
            index.name(),
            index.categories().len()
        );
        Ok(index)
    }
}

/// Get the default installation root directory
#[tracing::instrument(skip(runtime))]
pub fn default_install_root<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    let config_dir = runtime
        .config_dir()
        .context("Could not find configuration directory")?;
    Ok(config_dir.join(RESOURCE_DIR))
}
