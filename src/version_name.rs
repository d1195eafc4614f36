//! Version identifiers and their ordering.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A parsed version such as `1.2.3` or `1.0-alpha2`.
///
/// The numeric part is a dotted list of integers; anything after it is the
/// prerelease suffix. Parsing never fails: unrecognizable text becomes a
/// suffix on an empty numeric part.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct VersionName {
    text: String,
    numbers: Vec<u64>,
    suffix: Option<String>,
}

impl VersionName {
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        let body = trimmed
            .strip_prefix(['v', 'V'])
            .filter(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
            .unwrap_or(trimmed);

        let mut numbers = Vec::new();
        let mut rest = body;
        loop {
            let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
            if digits == 0 {
                break;
            }

            // Saturate rather than fail on absurdly long segments.
            numbers.push(rest[..digits].parse().unwrap_or(u64::MAX));
            rest = &rest[digits..];

            match rest.strip_prefix('.') {
                Some(next) if next.starts_with(|c: char| c.is_ascii_digit()) => rest = next,
                _ => break,
            }
        }

        let suffix = rest.trim_start_matches(['-', '_', '.', '+']);
        Self {
            text: trimmed.to_string(),
            numbers,
            suffix: (!suffix.is_empty()).then(|| suffix.to_string()),
        }
    }

    /// The text this name was parsed from.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn numbers(&self) -> &[u64] {
        &self.numbers
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    pub fn is_stable(&self) -> bool {
        self.suffix.is_none()
    }

    /// The numeric part alone.
    ///
    /// A stable release and all of its own prerelease candidates share the
    /// same main version.
    pub fn main_version(&self) -> VersionName {
        let text = self
            .numbers
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");

        Self {
            text,
            numbers: self.numbers.clone(),
            suffix: None,
        }
    }

    /// Compare numeric parts only, a missing position counting as zero.
    fn cmp_numbers(&self, other: &Self) -> Ordering {
        let len = self.numbers.len().max(other.numbers.len());
        (0..len)
            .map(|i| {
                let a = self.numbers.get(i).copied().unwrap_or(0);
                let b = other.numbers.get(i).copied().unwrap_or(0);
                a.cmp(&b)
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl Ord for VersionName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_numbers(other).then_with(|| match (&self.suffix, &other.suffix) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(b),
        })
    }
}

impl PartialOrd for VersionName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionName {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for VersionName {}

impl fmt::Display for VersionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for VersionName {
    fn from(text: &str) -> Self {
        VersionName::parse(text)
    }
}

impl From<String> for VersionName {
    fn from(text: String) -> Self {
        VersionName::parse(&text)
    }
}

impl From<VersionName> for String {
    fn from(name: VersionName) -> Self {
        name.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> VersionName {
        VersionName::parse(text)
    }

    #[test]
    fn test_parse_stable() {
        let name = v("1.2.3");
        assert_eq!(name.numbers(), &[1, 2, 3]);
        assert_eq!(name.suffix(), None);
        assert!(name.is_stable());
        assert_eq!(name.to_string(), "1.2.3");
    }

    #[test]
    fn test_parse_prerelease() {
        let name = v("1.0-alpha1");
        assert_eq!(name.numbers(), &[1, 0]);
        assert_eq!(name.suffix(), Some("alpha1"));
        assert!(!name.is_stable());

        assert_eq!(v("2.0rc1").suffix(), Some("rc1"));
        assert_eq!(v("2.0.beta").suffix(), Some("beta"));
    }

    #[test]
    fn test_parse_with_v_prefix() {
        assert_eq!(v("v1.0.0").numbers(), &[1, 0, 0]);
        assert!(v("v1.0.0").is_stable());
        assert_eq!(v("v1.0.0").to_string(), "v1.0.0");
    }

    #[test]
    fn test_parse_is_total() {
        let garbage = v("yoyo");
        assert!(garbage.numbers().is_empty());
        assert_eq!(garbage.suffix(), Some("yoyo"));

        let empty = v("");
        assert!(empty.numbers().is_empty());
        assert!(empty.is_stable());

        let huge = v("99999999999999999999999.1");
        assert_eq!(huge.numbers(), &[u64::MAX, 1]);
    }

    #[test]
    fn test_missing_positions_are_zero() {
        assert_eq!(v("1"), v("1.0"));
        assert_eq!(v("1"), v("1.0.0"));
        assert!(v("1.0.1") > v("1"));
    }

    #[test]
    fn test_numeric_ordering() {
        assert!(v("1.10") > v("1.9"));
        assert!(v("2") > v("1.99.99"));
        assert!(v("0.9") < v("1.0-alpha1"));
    }

    #[test]
    fn test_stable_beats_prerelease_of_same_release() {
        assert!(v("1.0") > v("1.0-rc9"));
        assert!(v("1.0") > v("1.0-beta"));
        assert!(v("1") > v("1.0-zzz"));
    }

    #[test]
    fn test_prerelease_suffixes_compare_lexically() {
        assert!(v("1.0-alpha2") > v("1.0-alpha1"));
        assert!(v("1.0-beta") > v("1.0-alpha"));
        assert!(v("1.0-rc1") > v("1.0-beta9"));
        assert_eq!(v("1.0-beta"), v("1-beta"));
    }

    #[test]
    fn test_main_version() {
        assert_eq!(v("1.0-alpha1").main_version(), v("1.0"));
        assert_eq!(v("1.0-alpha1").main_version(), v("1.0-rc2").main_version());
        assert_ne!(v("1.0-alpha1").main_version(), v("1.1-alpha1").main_version());
        assert_eq!(v("1.0-alpha1").main_version().to_string(), "1.0");
    }

    #[test]
    fn test_serde_as_string() {
        let name: VersionName = serde_json::from_str("\"1.0-beta\"").unwrap();
        assert_eq!(name, v("1.0-beta"));
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"1.0-beta\"");
    }
}
