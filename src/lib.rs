pub mod cleanup;
pub mod commands;
pub mod error;
pub mod index;
pub mod path;
pub mod resolver;
pub mod runtime;
pub mod transaction;
pub mod version_name;

pub use error::{Error, Insertion, Rejected};
pub use index::{Category, Index, Package, PackageType, Platform, Source, Version};
pub use path::{Path, RootGuard, TempPath};
pub use version_name::VersionName;
