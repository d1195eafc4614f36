use log::{debug, warn};

use super::{Index, ObjectId, Package, Parent};
use crate::error::{Error, Insertion, Rejected};

/// A named group of packages inside an index.
#[derive(Debug)]
pub struct Category {
    id: ObjectId,
    name: String,
    index: Option<Parent>,
    packages: Vec<Package>,
}

impl Category {
    pub fn new(name: impl Into<String>, index: Option<&Index>) -> Self {
        Self {
            id: ObjectId::next(),
            name: name.into(),
            index: index.map(Index::link),
            packages: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the owning index, if any.
    pub fn index_name(&self) -> Option<&str> {
        self.index.as_ref().and_then(|p| p.names.first()).map(String::as_str)
    }

    pub fn full_name(&self) -> String {
        self.link().names.join("/")
    }

    pub(crate) fn index_link(&self) -> Option<&Parent> {
        self.index.as_ref()
    }

    pub(crate) fn link(&self) -> Parent {
        match &self.index {
            Some(index) => index.child(self.id, &self.name),
            None => Parent {
                id: self.id,
                names: vec![self.name.clone()],
            },
        }
    }

    pub(crate) fn attach(&mut self, index: Parent) {
        self.index = Some(index);
        let link = self.link();
        for package in &mut self.packages {
            package.attach(link.clone());
        }
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.name() == name)
    }

    /// Take ownership of `package`.
    ///
    /// Packages without any version and packages whose name is already
    /// present are dropped. A package created for another category is
    /// handed back.
    pub fn add_package(&mut self, mut package: Package) -> Result<Insertion, Rejected<Package>> {
        if !Parent::accepts(package.category_link(), self.id) {
            return Err(Rejected::new(Error::foreign("package", "category"), package));
        }

        if package.versions().is_empty() {
            debug!("Dropping package {} with no versions", package.full_name());
            return Ok(Insertion::Discarded);
        }

        if self.package(package.name()).is_some() {
            warn!("Duplicate package {} in {}", package.name(), self.full_name());
            return Ok(Insertion::Discarded);
        }

        package.attach(self.link());
        self.packages.push(package);
        Ok(Insertion::Retained)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::PackageType;
    use crate::index::test_support::complete_version;

    fn package_in(category: &Category, name: &str) -> Package {
        let mut package = Package::new(PackageType::Effect, name, Some(category)).unwrap();
        package
            .add_version(complete_version("1", &package))
            .unwrap();
        package
    }

    #[test]
    fn test_full_name() {
        assert_eq!(Category::new("Category Name", None).full_name(), "Category Name");

        let index = Index::new("Remote Name");
        let category = Category::new("Category Name", Some(&index));
        assert_eq!(category.full_name(), "Remote Name/Category Name");
        assert_eq!(category.index_name(), Some("Remote Name"));
    }

    #[test]
    fn test_add_package() {
        let mut category = Category::new("Category Name", None);
        let package = package_in(&category, "a");

        assert_eq!(category.add_package(package).unwrap(), Insertion::Retained);
        assert_eq!(category.packages().len(), 1);
        assert_eq!(category.package("a").unwrap().category_name(), Some("Category Name"));
    }

    #[test]
    fn test_add_detached_package() {
        let mut category = Category::new("Category Name", None);
        let mut package = Package::new(PackageType::Script, "a", None).unwrap();
        package
            .add_version(complete_version("1", &package))
            .unwrap();

        category.add_package(package).unwrap();
        assert_eq!(category.packages()[0].full_name(), "Category Name/a");
    }

    #[test]
    fn test_drop_package_without_versions() {
        let mut category = Category::new("Category Name", None);
        let package = Package::new(PackageType::Script, "a", Some(&category)).unwrap();

        assert_eq!(category.add_package(package).unwrap(), Insertion::Discarded);
        assert!(category.packages().is_empty());
    }

    #[test]
    fn test_add_foreign_package() {
        let other = Category::new("Other", None);
        let mut category = Category::new("Category Name", None);
        let package = package_in(&other, "a");

        let rejected = category.add_package(package).unwrap_err();
        assert_eq!(rejected.to_string(), "package belongs to another category");
        assert!(category.packages().is_empty());
    }

    #[test]
    fn test_package_names_are_unique() {
        let mut category = Category::new("Category Name", None);
        let first = package_in(&category, "a");
        let second = package_in(&category, "a");
        let third = package_in(&category, "b");

        category.add_package(first).unwrap();
        assert_eq!(category.add_package(second).unwrap(), Insertion::Discarded);
        category.add_package(third).unwrap();

        let names: Vec<_> = category.packages().iter().map(Package::name).collect();
        assert_eq!(names, ["a", "b"]);
    }
}
