use anyhow::Result;
use std::path::Path;

use crate::{
    index::{Index, Package},
    runtime::Runtime,
};

use super::Config;

/// List every package published by an index
#[tracing::instrument(skip(config))]
pub fn list<R: Runtime>(config: &Config<R>, index_file: &Path, prereleases: bool) -> Result<()> {
    let index = config.load_index(index_file)?;

    let lines = lines(&index, prereleases);
    if lines.is_empty() {
        println!("No packages in {}.", index.name());
        return Ok(());
    }

    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

fn lines(index: &Index, prereleases: bool) -> Vec<String> {
    index
        .packages()
        .map(|package| line(package, prereleases))
        .collect()
}

fn line(package: &Package, prereleases: bool) -> String {
    let latest = match package.last_version(prereleases, &[]) {
        Some(version) => format!("v{}", version.name()),
        None => "(no stable release)".to_string(),
    };

    let mut line = format!("{} [{}] {}", package.full_name(), package.kind(), latest);
    if !package.description().is_empty() {
        line.push_str(" - ");
        line.push_str(package.description());
    }
    line
}
