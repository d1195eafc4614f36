use super::{Parent, Platform, Version};

/// A downloadable file belonging to one version.
#[derive(Debug)]
pub struct Source {
    platform: Platform,
    url: String,
    file: Option<String>,
    version: Option<Parent>,
}

impl Source {
    pub fn new(platform: Platform, url: impl Into<String>, version: Option<&Version>) -> Self {
        Self {
            platform,
            url: url.into(),
            file: None,
            version: version.map(Version::link),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Where the file is fetched from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Installed file name, when it differs from the package name.
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn set_file(&mut self, file: impl Into<String>) {
        self.file = Some(file.into());
    }

    pub(crate) fn version_link(&self) -> Option<&Parent> {
        self.version.as_ref()
    }

    pub(crate) fn attach(&mut self, version: Parent) {
        self.version = Some(version);
    }
}
