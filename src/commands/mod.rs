use anyhow::{Context, Result};
use std::fmt;

use crate::{
    index::{Index, Package},
    resolver::VersionConstraint,
    version_name::VersionName,
};

pub mod config;
mod install;
mod latest;
mod list;

pub use config::Config;
pub use install::install;
pub use latest::latest;
pub use list::list;

/// Which release of a package a command acts on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Exact version; overrides the prerelease policy and pins
    pub version: Option<String>,
    pub prereleases: bool,
    pub pins: Vec<String>,
}

impl Selection {
    pub fn constraint(&self) -> VersionConstraint {
        match &self.version {
            Some(version) => VersionConstraint::Exact(VersionName::parse(version)),
            None => VersionConstraint::Latest {
                prereleases: self.prereleases,
                pins: self.pins.iter().map(|pin| VersionName::parse(pin)).collect(),
            },
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(version) = &self.version {
            return write!(f, "version {}", version);
        }

        f.write_str(if self.prereleases {
            "latest prerelease"
        } else {
            "latest stable"
        })?;
        if !self.pins.is_empty() {
            write!(f, " (pinned: {})", self.pins.join(", "))?;
        }
        Ok(())
    }
}

/// Look up `spec` (`Category/name` or a bare name) in `index`.
pub(crate) fn find_package<'a>(index: &'a Index, spec: &str) -> Result<&'a Package> {
    index
        .find_package(spec)
        .with_context(|| format!("Package {} not found in index {}", spec, index.name()))
}
