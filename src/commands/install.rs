use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use crate::{resolver::VersionResolver, runtime::Runtime, transaction::Transaction};

use super::{Config, Selection, find_package};

/// Install the selected version of a package under the install root.
#[tracing::instrument(skip(config, selection))]
pub fn install<R: Runtime>(
    config: &Config<R>,
    index_file: &Path,
    spec: &str,
    selection: &Selection,
) -> Result<()> {
    let index = config.load_index(index_file)?;
    let package = find_package(&index, spec)?;
    let version = VersionResolver::resolve(package, &selection.constraint()).with_context(|| {
        format!(
            "No release of {} matches {}",
            package.full_name(),
            selection
        )
    })?;

    let root = config.root()?;
    info!("Installing {} into {}", version.full_name(), root);

    let mut transaction = Transaction::new(&config.runtime, root);
    transaction.stage(package, version)?;
    let installed = transaction.commit()?;

    println!("Installed {}", version.full_name());
    for path in installed {
        println!("  {}", path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::RealRuntime;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write_index(dir: &Path, source: &Path) -> PathBuf {
        let index = serde_json::json!({
            "name": "Remote",
            "categories": [{
                "name": "Cat",
                "packages": [{
                    "name": "a.lua",
                    "type": "script",
                    "versions": [
                        {"name": "1.0", "sources": [{"url": source.to_str().unwrap()}]},
                        {"name": "2.0-beta", "sources": [{"url": "missing.lua"}]}
                    ]
                }]
            }]
        });

        let path = dir.join("index.json");
        fs::write(&path, index.to_string()).unwrap();
        path
    }

    #[test]
    fn test_install_latest_stable() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("a.lua");
        fs::write(&source, "print('hello')").unwrap();
        let index_file = write_index(dir.path(), &source);
        let root = dir.path().join("resource");

        let config = Config::new(RealRuntime, Some(root.clone()));
        install(&config, &index_file, "a.lua", &Selection::default()).unwrap();

        let installed = root.join("Scripts/Remote/Cat/a.lua");
        assert_eq!(fs::read_to_string(installed).unwrap(), "print('hello')");
        assert!(!root.join("Scripts/Remote/Cat/a.lua.part").exists());
    }

    #[test]
    fn test_install_failure_leaves_nothing_behind() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("a.lua");
        fs::write(&source, "print('hello')").unwrap();
        let index_file = write_index(dir.path(), &source);
        let root = dir.path().join("resource");

        let selection = Selection {
            prereleases: true,
            ..Selection::default()
        };
        let config = Config::new(RealRuntime, Some(root.clone()));
        assert!(install(&config, &index_file, "Cat/a.lua", &selection).is_err());

        assert!(!root.join("Scripts/Remote/Cat/a.lua").exists());
        assert!(!root.join("Scripts/Remote/Cat/a.lua.part").exists());
    }

    #[test]
    fn test_install_unknown_version() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("a.lua");
        let index_file = write_index(dir.path(), &source);

        let selection = Selection {
            version: Some("3".to_string()),
            ..Selection::default()
        };
        let config = Config::new(RealRuntime, Some(dir.path().join("resource")));
        let err = install(&config, &index_file, "Cat/a.lua", &selection).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No release of Remote/Cat/a.lua matches version 3"
        );
    }
}
