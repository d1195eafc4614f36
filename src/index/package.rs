use log::{debug, warn};
use std::fmt;

use super::{Category, ObjectId, Parent, Version};
use crate::error::{Error, Insertion, Rejected};
use crate::version_name::VersionName;

/// Kind of content a package installs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PackageType {
    #[default]
    Unknown,
    Script,
    Extension,
    Effect,
    Data,
}

impl PackageType {
    /// Parse a type tag from an index. Unrecognized text maps to `Unknown`.
    pub fn parse(text: &str) -> Self {
        match text {
            "script" => PackageType::Script,
            "extension" => PackageType::Extension,
            "effect" => PackageType::Effect,
            "data" => PackageType::Data,
            _ => PackageType::Unknown,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PackageType::Unknown => "Unknown",
            PackageType::Script => "Script",
            PackageType::Extension => "Extension",
            PackageType::Effect => "Effect",
            PackageType::Data => "Data",
        }
    }
}

/// Raw discriminants, as stored by external registries. Values outside the
/// known set map to `Unknown`.
impl From<i32> for PackageType {
    fn from(raw: i32) -> Self {
        match raw {
            1 => PackageType::Script,
            2 => PackageType::Extension,
            3 => PackageType::Effect,
            4 => PackageType::Data,
            _ => PackageType::Unknown,
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// An installable unit and its published versions.
#[derive(Debug)]
pub struct Package {
    id: ObjectId,
    kind: PackageType,
    name: String,
    description: String,
    category: Option<Parent>,
    // sorted ascending by version name, no duplicates
    versions: Vec<Version>,
}

impl Package {
    pub fn new(
        kind: PackageType,
        name: impl Into<String>,
        category: Option<&Category>,
    ) -> Result<Self, Error> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }

        Ok(Self {
            id: ObjectId::next(),
            kind,
            name,
            description: String::new(),
            category: category.map(Category::link),
            versions: Vec::new(),
        })
    }

    pub fn kind(&self) -> PackageType {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `Index/Category/Package`, leaving out missing ancestors.
    pub fn full_name(&self) -> String {
        self.link().names.join("/")
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref()?.names.last().map(String::as_str)
    }

    pub fn index_name(&self) -> Option<&str> {
        match self.category.as_ref()?.names.as_slice() {
            [index, _category] => Some(index.as_str()),
            _ => None,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub(crate) fn category_link(&self) -> Option<&Parent> {
        self.category.as_ref()
    }

    pub(crate) fn link(&self) -> Parent {
        match &self.category {
            Some(category) => category.child(self.id, &self.name),
            None => Parent {
                id: self.id,
                names: vec![self.name.clone()],
            },
        }
    }

    pub(crate) fn attach(&mut self, category: Parent) {
        self.category = Some(category);
        let link = self.link();
        for version in &mut self.versions {
            version.attach(link.clone());
        }
    }

    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    pub fn version(&self, index: usize) -> Option<&Version> {
        self.versions.get(index)
    }

    /// Take ownership of `version`, keeping versions sorted.
    ///
    /// A version without sources, or one equal to a version already present,
    /// is dropped. A version created for another package is handed back and
    /// the package is left untouched.
    pub fn add_version(&mut self, mut version: Version) -> Result<Insertion, Rejected<Version>> {
        if !Parent::accepts(version.package_link(), self.id) {
            return Err(Rejected::new(Error::foreign("version", "package"), version));
        }

        if version.sources().is_empty() {
            debug!("Dropping {} with no sources", version.full_name());
            return Ok(Insertion::Discarded);
        }

        let position = self.versions.partition_point(|v| v.name() < version.name());
        if self
            .versions
            .get(position)
            .is_some_and(|existing| existing.name() == version.name())
        {
            warn!("Duplicate version {}", version.full_name());
            return Ok(Insertion::Discarded);
        }

        version.attach(self.link());
        self.versions.insert(position, version);
        Ok(Insertion::Retained)
    }

    /// The newest version allowed by the update policy.
    ///
    /// A version qualifies when prereleases are included, when it is stable,
    /// or when it shares its main version with one of `pins`. Pins stand for
    /// versions already installed: a user on `1.0-alpha1` keeps receiving
    /// `1.0-*` prereleases without being moved onto another release's
    /// prereleases.
    pub fn last_version(&self, include_prereleases: bool, pins: &[VersionName]) -> Option<&Version> {
        let pinned: Vec<VersionName> = pins.iter().map(VersionName::main_version).collect();

        self.versions.iter().rev().find(|version| {
            include_prereleases
                || version.is_stable()
                || pinned.contains(&version.name().main_version())
        })
    }

    /// The version whose name compares equal to `name`.
    pub fn find_version(&self, name: &VersionName) -> Option<&Version> {
        self.versions
            .binary_search_by(|v| v.name().cmp(name))
            .ok()
            .map(|i| &self.versions[i])
    }
}
