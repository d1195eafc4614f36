//! Error kinds raised by the package model.
//!
//! Only construction and ownership transfer can fail. Everything else in the
//! crate (path normalization, version parsing, resolution) is total.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("empty package name")]
    EmptyName,

    /// The object is already owned by a different container.
    #[error("{item} belongs to another {owner}")]
    ForeignOwnership {
        item: &'static str,
        owner: &'static str,
    },
}

impl Error {
    pub(crate) fn foreign(item: &'static str, owner: &'static str) -> Self {
        Error::ForeignOwnership { item, owner }
    }
}

/// An ownership transfer that was refused.
///
/// The container is left untouched and the object travels back to the caller
/// inside the error, so nothing is lost when the transfer fails.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct Rejected<T: fmt::Debug> {
    error: Error,
    item: T,
}

impl<T: fmt::Debug> Rejected<T> {
    pub(crate) fn new(error: Error, item: T) -> Self {
        Self { error, item }
    }

    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Take the rejected object back.
    pub fn into_inner(self) -> T {
        self.item
    }
}

/// What happened to an object handed to a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The container now owns the object.
    Retained,
    /// The object was accepted but dropped (incomplete, duplicate or not
    /// installable on this host).
    Discarded,
}

impl Insertion {
    pub fn is_retained(self) -> bool {
        self == Insertion::Retained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(Error::EmptyName.to_string(), "empty package name");
        assert_eq!(
            Error::foreign("version", "package").to_string(),
            "version belongs to another package"
        );
    }

    #[test]
    fn test_rejected_returns_item() {
        let rejected = Rejected::new(Error::foreign("source", "version"), String::from("payload"));
        assert_eq!(rejected.to_string(), "source belongs to another version");
        assert_eq!(rejected.error(), &Error::foreign("source", "version"));
        assert_eq!(rejected.into_inner(), "payload");
    }
}
