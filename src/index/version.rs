use log::debug;

use super::{ObjectId, Package, Parent, Source};
use crate::error::{Error, Insertion, Rejected};
use crate::version_name::VersionName;

/// One release of a package and the files it ships.
#[derive(Debug)]
pub struct Version {
    id: ObjectId,
    name: VersionName,
    description: String,
    package: Option<Parent>,
    sources: Vec<Source>,
}

impl Version {
    pub fn new(name: impl Into<VersionName>, package: Option<&Package>) -> Self {
        Self {
            id: ObjectId::next(),
            name: name.into(),
            description: String::new(),
            package: package.map(Package::link),
            sources: Vec::new(),
        }
    }

    pub fn name(&self) -> &VersionName {
        &self.name
    }

    pub fn is_stable(&self) -> bool {
        self.name.is_stable()
    }

    /// `<package full name> v<version>`, or `v<version>` when detached.
    pub fn full_name(&self) -> String {
        match &self.package {
            Some(package) => format!("{} v{}", package.names.join("/"), self.name),
            None => format!("v{}", self.name),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub(crate) fn package_link(&self) -> Option<&Parent> {
        self.package.as_ref()
    }

    pub(crate) fn link(&self) -> Parent {
        match &self.package {
            Some(package) => package.child(self.id, self.name.to_string()),
            None => Parent {
                id: self.id,
                names: vec![self.name.to_string()],
            },
        }
    }

    pub(crate) fn attach(&mut self, package: Parent) {
        self.package = Some(package);
        let link = self.link();
        for source in &mut self.sources {
            source.attach(link.clone());
        }
    }

    /// Take ownership of `source`.
    ///
    /// Sources built for another platform than the host are dropped. A
    /// source created for another version is handed back.
    pub fn add_source(&mut self, mut source: Source) -> Result<Insertion, Rejected<Source>> {
        if !Parent::accepts(source.version_link(), self.id) {
            return Err(Rejected::new(Error::foreign("source", "version"), source));
        }

        if !source.platform().matches_host() {
            debug!(
                "Dropping {} source of {} for this host",
                source.platform(),
                self.full_name()
            );
            return Ok(Insertion::Discarded);
        }

        source.attach(self.link());
        self.sources.push(source);
        Ok(Insertion::Retained)
    }
}
