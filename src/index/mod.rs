//! Package catalogue: Index → Category → Package → Version → Source.
//!
//! Each container owns its children by value. Children keep a [`Parent`]
//! record naming the container they belong to; it is used to compose full
//! names and to refuse moving a child into a second container.

mod category;
mod document;
mod package;
mod platform;
mod source;
mod version;

pub use category::Category;
pub use document::{
    CategoryDocument, IndexDocument, PackageDocument, SourceDocument, VersionDocument,
};
pub use package::{Package, PackageType};
pub use platform::Platform;
pub use source::Source;
pub use version::Version;

use anyhow::Result;
use log::{debug, warn};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Error, Insertion, Rejected};
use crate::runtime::Runtime;

/// Identity of a container, unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ObjectId(u64);

impl ObjectId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Non-owning link from a child to its container.
///
/// `names` lists the container's ancestry from the index down to the
/// container itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Parent {
    pub(crate) id: ObjectId,
    pub(crate) names: Vec<String>,
}

impl Parent {
    pub(crate) fn child(&self, id: ObjectId, name: impl Into<String>) -> Parent {
        let mut names = self.names.clone();
        names.push(name.into());
        Parent { id, names }
    }

    /// Whether an object linked to `self` may be moved into `owner`.
    pub(crate) fn accepts(link: Option<&Parent>, owner: ObjectId) -> bool {
        link.is_none_or(|parent| parent.id == owner)
    }
}

/// A remote repository and the categories it publishes.
#[derive(Debug)]
pub struct Index {
    id: ObjectId,
    name: String,
    categories: Vec<Category>,
}

impl Index {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::next(),
            name: name.into(),
            categories: Vec::new(),
        }
    }

    /// Build an index from its JSON document.
    pub fn from_json(text: &str) -> Result<Self> {
        IndexDocument::from_json(text)?.build()
    }

    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, path: &std::path::Path) -> Result<Self> {
        let content = runtime.read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn link(&self) -> Parent {
        Parent {
            id: self.id,
            names: vec![self.name.clone()],
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name() == name)
    }

    /// Every package of every category, in catalogue order.
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.categories.iter().flat_map(|c| c.packages().iter())
    }

    /// Find a package by `Category/name`, or by bare name across all
    /// categories (first match wins).
    pub fn find_package(&self, spec: &str) -> Option<&Package> {
        match spec.split_once('/') {
            Some((category, name)) => self.category(category)?.package(name),
            None => self.packages().find(|p| p.name() == spec),
        }
    }

    /// Take ownership of `category`.
    ///
    /// Empty categories and categories whose name is already present are
    /// dropped. A category created for another index is handed back.
    pub fn add_category(&mut self, mut category: Category) -> Result<Insertion, Rejected<Category>> {
        if !Parent::accepts(category.index_link(), self.id) {
            return Err(Rejected::new(Error::foreign("category", "index"), category));
        }

        if category.packages().is_empty() {
            debug!("Dropping empty category {}", category.full_name());
            return Ok(Insertion::Discarded);
        }

        if self.category(category.name()).is_some() {
            warn!("Duplicate category {} in index {}", category.name(), self.name);
            return Ok(Insertion::Discarded);
        }

        category.attach(self.link());
        self.categories.push(category);
        Ok(Insertion::Retained)
    }
}
