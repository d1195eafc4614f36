//! JSON form of an index, as published by a repository.
//!
//! Documents are turned into the model through the same constructors and
//! `add_*` calls a caller would use, so loaded data obeys the same rules:
//! sourceless versions vanish, unknown types become `Unknown` and an empty
//! package name is an error.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{Category, Index, Package, PackageType, Platform, Source, Version};
use crate::version_name::VersionName;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IndexDocument {
    pub name: String,
    #[serde(default)]
    pub categories: Vec<CategoryDocument>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategoryDocument {
    pub name: String,
    #[serde(default)]
    pub packages: Vec<PackageDocument>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PackageDocument {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub versions: Vec<VersionDocument>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VersionDocument {
    pub name: VersionName,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sources: Vec<SourceDocument>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SourceDocument {
    #[serde(default = "generic_platform")]
    pub platform: String,
    pub url: String,
    #[serde(default)]
    pub file: Option<String>,
}

fn generic_platform() -> String {
    Platform::Generic.to_string()
}

impl IndexDocument {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse index document")
    }

    pub fn build(self) -> Result<Index> {
        let mut index = Index::new(self.name);

        for category_doc in self.categories {
            let mut category = Category::new(category_doc.name, Some(&index));

            for package_doc in category_doc.packages {
                let package = package_doc
                    .build(&category)
                    .with_context(|| format!("Invalid package in {}", category.full_name()))?;
                category.add_package(package)?;
            }

            index.add_category(category)?;
        }

        Ok(index)
    }
}

impl PackageDocument {
    fn build(self, category: &Category) -> Result<Package> {
        let kind = PackageType::parse(&self.kind);
        let mut package = Package::new(kind, self.name, Some(category))?;
        if let Some(description) = self.description {
            package.set_description(description);
        }

        for version_doc in self.versions {
            let mut version = Version::new(version_doc.name, Some(&package));
            if let Some(description) = version_doc.description {
                version.set_description(description);
            }

            for source_doc in version_doc.sources {
                let mut source =
                    Source::new(Platform::parse(&source_doc.platform), source_doc.url, Some(&version));
                if let Some(file) = source_doc.file {
                    source.set_file(file);
                }
                version.add_source(source)?;
            }

            package.add_version(version)?;
        }

        Ok(package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"{
        "name": "Remote Name",
        "categories": [
            {
                "name": "Tools",
                "packages": [
                    {
                        "name": "hello.lua",
                        "type": "script",
                        "description": "Says hello",
                        "versions": [
                            { "name": "1.0", "sources": [{ "url": "https://example.com/1.0.lua" }] },
                            { "name": "0.9", "description": "First", "sources": [{ "platform": "all", "url": "https://example.com/0.9.lua", "file": "hi.lua" }] },
                            { "name": "2.0-beta", "sources": [] }
                        ]
                    },
                    {
                        "name": "broken.jsfx",
                        "type": "plugin",
                        "versions": [
                            { "name": "1", "sources": [{ "platform": "nowhere", "url": "x" }] }
                        ]
                    }
                ]
            },
            { "name": "Empty", "packages": [] }
        ]
    }"#;

    #[test]
    fn test_build_index() {
        let index = Index::from_json(INDEX).unwrap();
        assert_eq!(index.name(), "Remote Name");
        assert_eq!(index.categories().len(), 1);

        let package = index.find_package("Tools/hello.lua").unwrap();
        assert_eq!(package.kind(), PackageType::Script);
        assert_eq!(package.description(), "Says hello");
        assert_eq!(package.full_name(), "Remote Name/Tools/hello.lua");

        // the sourceless prerelease is dropped, the rest is sorted
        let names: Vec<_> = package.versions().iter().map(|v| v.name().to_string()).collect();
        assert_eq!(names, ["0.9", "1.0"]);

        let first = package.version(0).unwrap();
        assert_eq!(first.description(), "First");
        assert_eq!(first.sources()[0].file(), Some("hi.lua"));
        assert_eq!(first.sources()[0].platform(), Platform::Generic);
    }

    #[test]
    fn test_package_without_installable_sources_is_dropped() {
        let index = Index::from_json(INDEX).unwrap();
        assert!(index.find_package("Tools/broken.jsfx").is_none());
    }

    #[test]
    fn test_empty_package_name_fails() {
        let err = Index::from_json(
            r#"{"name": "r", "categories": [{"name": "c", "packages": [{"name": "", "type": "script"}]}]}"#,
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "Invalid package in r/c");
        assert_eq!(err.root_cause().to_string(), "empty package name");
    }

    #[test]
    fn test_malformed_document() {
        assert!(Index::from_json("{").is_err());
        assert!(Index::from_json(r#"{"categories": []}"#).is_err());
    }

    #[test]
    fn test_document_round_trip() {
        let doc = IndexDocument::from_json(INDEX).unwrap();
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(IndexDocument::from_json(&json).unwrap(), doc);
    }
}
