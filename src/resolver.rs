//! Update decisions on top of [`Package::last_version`].

use crate::index::{Package, Version};
use crate::version_name::VersionName;

/// Version constraint for selecting a release.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionConstraint {
    /// Match an exact version (`1` matches `1.0`)
    Exact(VersionName),
    /// Newest version allowed by the prerelease policy and pins
    Latest {
        prereleases: bool,
        pins: Vec<VersionName>,
    },
}

impl Default for VersionConstraint {
    fn default() -> Self {
        VersionConstraint::Latest {
            prereleases: false,
            pins: Vec::new(),
        }
    }
}

/// Version resolver - pure functions over a package's versions.
pub struct VersionResolver;

impl VersionResolver {
    /// Resolve a version constraint to a specific version.
    pub fn resolve<'a>(package: &'a Package, constraint: &VersionConstraint) -> Option<&'a Version> {
        match constraint {
            VersionConstraint::Exact(name) => package.find_version(name),
            VersionConstraint::Latest { prereleases, pins } => {
                package.last_version(*prereleases, pins)
            }
        }
    }

    /// The version to update to from `installed`, if any is newer.
    ///
    /// The installed version pins its own release line, so a prerelease
    /// keeps receiving prereleases of the same release.
    pub fn check_update<'a>(
        package: &'a Package,
        installed: &VersionName,
        include_prereleases: bool,
    ) -> Option<&'a Version> {
        package
            .last_version(include_prereleases, std::slice::from_ref(installed))
            .filter(|latest| latest.name() > installed)
    }
}
