//! Install transaction: stage every file of a version, then move them into
//! place.
//!
//! Files are first written next to their target with a `.part` suffix. Only
//! [`Transaction::commit`] renames them onto the real targets, so a failed or
//! interrupted install leaves previously installed files intact.

use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use std::io::Write;
use std::path::PathBuf;

use crate::cleanup::CleanupContext;
use crate::index::{Package, PackageType, Source, Version};
use crate::path::{Path, RootGuard, TempPath};
use crate::runtime::Runtime;

/// Where a source of `package` is installed, relative to the install root.
///
/// Traversal in index, category and file names is resolved inside the
/// package type's directory and can never leave it.
pub fn target_path(package: &Package, source: &Source) -> Result<Path> {
    let file = source.file().unwrap_or(package.name());

    let (base, scoped) = match package.kind() {
        PackageType::Script | PackageType::Effect => {
            let base = match package.kind() {
                PackageType::Script => "Scripts",
                _ => "Effects",
            };
            let mut scoped = Path::default();
            for name in [package.index_name(), package.category_name()].into_iter().flatten() {
                scoped += name;
            }
            (base, scoped + file)
        }
        PackageType::Extension => ("UserPlugins", Path::new(file)),
        PackageType::Data => ("Data", Path::new(file)),
        PackageType::Unknown => bail!("Unsupported package type for {}", package.full_name()),
    };

    if scoped.is_empty() {
        bail!("Invalid file name {:?} in {}", file, package.full_name());
    }

    Ok(Path::new(base) + scoped)
}

/// Filesystem location of a source. Only local files are supported.
fn source_location(url: &str) -> Result<PathBuf> {
    if let Some(path) = url.strip_prefix("file://") {
        Ok(PathBuf::from(path))
    } else if url.contains("://") {
        bail!("Unsupported source location {}", url)
    } else {
        Ok(PathBuf::from(url))
    }
}

pub struct Transaction<'a, R: Runtime> {
    runtime: &'a R,
    root: Path,
    staged: Vec<TempPath>,
    cleanup: CleanupContext,
}

impl<'a, R: Runtime> Transaction<'a, R> {
    pub fn new(runtime: &'a R, root: Path) -> Self {
        Self {
            runtime,
            root,
            staged: Vec::new(),
            cleanup: CleanupContext::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Targets staged so far, relative to the root.
    pub fn staged(&self) -> impl Iterator<Item = &Path> {
        self.staged.iter().map(TempPath::target)
    }

    /// Write every source of `version` to its staging path.
    ///
    /// Returns the number of files staged. On error nothing of `version`
    /// stays staged; files staged by earlier calls are kept.
    #[tracing::instrument(skip(self, package, version), fields(version = %version.full_name()))]
    pub fn stage(&mut self, package: &Package, version: &Version) -> Result<usize> {
        let _root = RootGuard::new(self.root.clone());
        let start = self.staged.len();
        let tracked = self.cleanup.paths().len();

        match self.stage_sources(package, version) {
            Ok(()) => Ok(self.staged.len() - start),
            Err(e) => {
                warn!("Discarding partly staged {}", version.full_name());
                self.staged.truncate(start);
                self.cleanup.split_off(tracked).cleanup(self.runtime);
                Err(e)
            }
        }
    }

    fn stage_sources(&mut self, package: &Package, version: &Version) -> Result<()> {
        for source in version.sources() {
            let file = TempPath::new(target_path(package, source)?);
            if self.staged.iter().any(|staged| staged.target() == file.target()) {
                bail!("{} is provided by more than one source", file.target());
            }

            self.write(source, &file)
                .with_context(|| format!("Failed to stage {}", file.target()))?;
            self.staged.push(file);
        }
        Ok(())
    }

    fn write(&mut self, source: &Source, file: &TempPath) -> Result<()> {
        let location = source_location(source.url())?;
        let temp = file.temp().prepend_root().to_path_buf();
        debug!("Staging {:?} from {:?}", temp, location);

        self.runtime
            .create_dir_all(&file.target().dirname().prepend_root().to_path_buf())?;

        let mut reader = self.runtime.open(&location)?;
        self.cleanup.add(temp.clone());
        let mut writer = self.runtime.create_file(&temp)?;
        std::io::copy(&mut reader, &mut writer).context("Failed to copy file contents")?;
        writer.flush().context("Failed to flush staged file")?;
        Ok(())
    }

    /// Move every staged file onto its target.
    ///
    /// Returns the installed targets relative to the root. If a rename fails,
    /// the files not yet moved are cleaned up when the transaction drops.
    #[tracing::instrument(skip(self), fields(root = %self.root))]
    pub fn commit(mut self) -> Result<Vec<Path>> {
        let _root = RootGuard::new(self.root.clone());
        let mut installed = Vec::new();

        for file in std::mem::take(&mut self.staged) {
            let temp = file.temp().prepend_root().to_path_buf();
            let target = file.target().prepend_root().to_path_buf();

            self.runtime
                .rename(&temp, &target)
                .with_context(|| format!("Failed to install {}", file.target()))?;
            self.cleanup.remove(&temp);

            info!("Installed {}", file.target());
            installed.push(file.target().clone());
        }

        Ok(installed)
    }

    /// Discard all staged files.
    pub fn rollback(mut self) {
        self.staged.clear();
        self.cleanup.cleanup(self.runtime);
    }
}

impl<R: Runtime> Drop for Transaction<'_, R> {
    fn drop(&mut self) {
        if !self.cleanup.is_empty() {
            warn!("Discarding {} staged file(s)", self.cleanup.paths().len());
            self.cleanup.cleanup(self.runtime);
        }
    }
}
