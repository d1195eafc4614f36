use anyhow::Result;
use log::debug;
use std::path::Path;

use crate::{
    index::Package,
    resolver::VersionResolver,
    runtime::Runtime,
    version_name::VersionName,
};

use super::{Config, Selection, find_package};

/// Show the newest version of a package, or whether `installed` can be
/// updated.
#[tracing::instrument(skip(config, selection))]
pub fn latest<R: Runtime>(
    config: &Config<R>,
    index_file: &Path,
    spec: &str,
    selection: &Selection,
    installed: Option<&str>,
) -> Result<()> {
    let index = config.load_index(index_file)?;
    let package = find_package(&index, spec)?;
    debug!(
        "{} has {} version(s)",
        package.full_name(),
        package.versions().len()
    );

    let installed = installed.map(VersionName::parse);
    println!("{}", report(package, selection, installed.as_ref()));
    Ok(())
}

fn report(package: &Package, selection: &Selection, installed: Option<&VersionName>) -> String {
    let Some(installed) = installed else {
        return match VersionResolver::resolve(package, &selection.constraint()) {
            Some(version) => version.full_name(),
            None => format!("No release of {} matches {}", package.full_name(), selection),
        };
    };

    match VersionResolver::check_update(package, installed, selection.prereleases) {
        Some(update) => format!(
            "Update available for {}: v{} -> v{}",
            package.full_name(),
            installed,
            update.name()
        ),
        None => format!("{} v{} is up to date", package.full_name(), installed),
    }
}
