//! Normalized paths for placing installed files.
//!
//! A [`Path`] is a list of non-empty segments plus an absolute flag. It never
//! touches the filesystem: construction splits on both `/` and `\`, drops empty
//! and `.` segments and resolves `..` lexically. A `..` can only pop segments
//! that are already present, so a path can never climb above its own start.
//!
//! Installed files are resolved relative to an install root. The root can be
//! passed explicitly ([`Path::prepend`], [`Path::strip_root`]) or installed for
//! the current thread with a [`RootGuard`].

use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Index, IndexMut};
use std::path::PathBuf;

#[cfg(windows)]
pub const NATIVE_SEPARATOR: char = '\\';
#[cfg(not(windows))]
pub const NATIVE_SEPARATOR: char = '/';

/// Suffix given to the staging copy of a file being written.
pub const TEMP_SUFFIX: &str = ".part";

#[cfg(windows)]
const MAX_PATH: usize = 260;

thread_local! {
    static ROOT: RefCell<Option<Path>> = const { RefCell::new(None) };
}

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path {
    segments: Vec<String>,
    absolute: bool,
}

impl Path {
    pub fn new(text: &str) -> Self {
        let mut path = Self::default();
        path.append(text, true);
        path
    }

    /// Append `text`, split on any separator.
    ///
    /// The absolute flag is only detected while the path is still empty and
    /// is never cleared by a later append. With `resolve_traversal` unset,
    /// `..` segments are dropped instead of popping.
    pub fn append(&mut self, text: &str, resolve_traversal: bool) {
        if self.segments.is_empty() && !self.absolute && is_absolute_text(text) {
            self.absolute = true;
        }

        for part in text.split(['/', '\\']) {
            match part {
                "" | "." => {}
                ".." => {
                    if resolve_traversal {
                        self.pop_parent();
                    }
                }
                _ => self.segments.push(part.to_string()),
            }
        }
    }

    /// Append the segments of an already normalized path verbatim.
    pub fn append_path(&mut self, other: &Path) {
        if self.segments.is_empty() && !self.absolute {
            self.absolute = other.absolute;
        }
        self.segments.extend(other.segments.iter().cloned());
    }

    fn pop_parent(&mut self) {
        // The drive (or UNC server) anchors an absolute Windows path.
        if cfg!(windows) && self.absolute && self.segments.len() == 1 {
            return;
        }
        self.segments.pop();
    }

    pub fn absolute(&self) -> bool {
        self.absolute
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Reset to an empty relative path.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.absolute = false;
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// First segment, or `""` for an empty path.
    pub fn first(&self) -> &str {
        self.segments.first().map(String::as_str).unwrap_or_default()
    }

    /// Last segment, or `""` for an empty path.
    pub fn last(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    pub fn dirname(&self) -> Path {
        let mut parent = self.clone();
        parent.remove_last();
        parent
    }

    pub fn remove_last(&mut self) {
        self.segments.pop();
    }

    /// Remove `count` segments starting at `index`, clamped to the segments
    /// that exist. Removing the leading segment makes the path relative.
    pub fn remove(&mut self, index: usize, count: usize) {
        let end = index.saturating_add(count).min(self.segments.len());
        if index >= end {
            return;
        }

        self.segments.drain(index..end);
        if index == 0 {
            self.absolute = false;
        }
    }

    pub fn starts_with(&self, other: &Path) -> bool {
        self.absolute == other.absolute && self.segments.starts_with(&other.segments)
    }

    pub fn join(&self) -> String {
        self.join_with(NATIVE_SEPARATOR)
    }

    #[cfg(not(windows))]
    pub fn join_with(&self, separator: char) -> String {
        let body = self.segments.join(&separator.to_string());
        if self.absolute {
            format!("{separator}{body}")
        } else {
            body
        }
    }

    #[cfg(windows)]
    pub fn join_with(&self, separator: char) -> String {
        let body = self.segments.join(&separator.to_string());
        if !self.absolute {
            return body;
        }

        let unc = !is_drive(self.first());
        let path = if unc {
            format!("{separator}{separator}{body}")
        } else {
            body.clone()
        };

        if separator != '\\' || path.len() <= MAX_PATH {
            path
        } else if unc {
            format!(r"\\?\UNC\{body}")
        } else {
            format!(r"\\?\{path}")
        }
    }

    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(self.join())
    }

    /// This path placed under `root`.
    pub fn prepend(&self, root: &Path) -> Path {
        root + self
    }

    /// This path with `root` removed from the front, or unchanged when it
    /// does not start with `root`.
    pub fn strip_root(&self, root: &Path) -> Path {
        if !self.starts_with(root) {
            return self.clone();
        }

        Path {
            segments: self.segments[root.len()..].to_vec(),
            absolute: false,
        }
    }

    /// [`Path::prepend`] with the root installed by the innermost live
    /// [`RootGuard`] on this thread. Identity when no root is active.
    pub fn prepend_root(&self) -> Path {
        match current_root() {
            Some(root) => self.prepend(&root),
            None => self.clone(),
        }
    }

    /// [`Path::strip_root`] with the active root. Identity when no root is
    /// active.
    pub fn remove_root(&self) -> Path {
        match current_root() {
            Some(root) => self.strip_root(&root),
            None => self.clone(),
        }
    }
}

#[cfg(not(windows))]
fn is_absolute_text(text: &str) -> bool {
    text.starts_with('/')
}

#[cfg(windows)]
fn is_absolute_text(text: &str) -> bool {
    let unc = text.starts_with(r"\\") || text.starts_with("//");
    unc || text.split(['/', '\\']).next().is_some_and(is_drive)
}

#[cfg(windows)]
fn is_drive(segment: &str) -> bool {
    matches!(segment.as_bytes(), [letter, b':'] if letter.is_ascii_alphabetic())
}

/// The root installed by the innermost live guard on this thread.
pub fn current_root() -> Option<Path> {
    ROOT.with(|root| root.borrow().clone())
}

/// Scoped install root.
///
/// Creating the guard makes `root` the active root for the current thread;
/// dropping it restores whatever was active before, including on early
/// returns and unwinding. Guards nest and must be dropped in reverse order,
/// which normal scoping guarantees.
#[must_use = "the root is only active while the guard is alive"]
pub struct RootGuard {
    previous: Option<Path>,
    // The root lives in thread-local storage; the guard must stay on its thread.
    _local: PhantomData<*const ()>,
}

impl RootGuard {
    pub fn new(root: Path) -> Self {
        let previous = ROOT.with(|current| current.replace(Some(root)));
        Self {
            previous,
            _local: PhantomData,
        }
    }
}

impl Drop for RootGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        ROOT.with(|current| *current.borrow_mut() = previous);
    }
}

/// A target path paired with the staging path it is written through.
///
/// Content goes to [`TempPath::temp`] first and is renamed onto
/// [`TempPath::target`] once complete, so an interrupted write never
/// clobbers an existing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempPath {
    target: Path,
    temp: Path,
}

impl TempPath {
    pub fn new(target: Path) -> Self {
        let mut temp = target.clone();
        match temp.segments.last_mut() {
            Some(last) => last.push_str(TEMP_SUFFIX),
            None => temp.segments.push(TEMP_SUFFIX.to_string()),
        }
        Self { target, temp }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn temp(&self) -> &Path {
        &self.temp
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join())
    }
}

impl From<&str> for Path {
    fn from(text: &str) -> Self {
        Path::new(text)
    }
}

impl From<String> for Path {
    fn from(text: String) -> Self {
        Path::new(&text)
    }
}

impl Index<usize> for Path {
    type Output = String;

    fn index(&self, index: usize) -> &String {
        &self.segments[index]
    }
}

impl IndexMut<usize> for Path {
    fn index_mut(&mut self, index: usize) -> &mut String {
        &mut self.segments[index]
    }
}

impl AddAssign<&str> for Path {
    fn add_assign(&mut self, text: &str) {
        self.append(text, true);
    }
}

impl AddAssign<&Path> for Path {
    fn add_assign(&mut self, other: &Path) {
        self.append_path(other);
    }
}

/// Text is normalized against the left operand, so `..` can pop its segments.
impl Add<&str> for &Path {
    type Output = Path;

    fn add(self, text: &str) -> Path {
        let mut path = self.clone();
        path += text;
        path
    }
}

impl Add<&str> for Path {
    type Output = Path;

    fn add(mut self, text: &str) -> Path {
        self += text;
        self
    }
}

/// Both operands are already normalized; segments are concatenated as-is.
impl Add<&Path> for &Path {
    type Output = Path;

    fn add(self, other: &Path) -> Path {
        let mut path = self.clone();
        path += other;
        path
    }
}

impl Add<&Path> for Path {
    type Output = Path;

    fn add(mut self, other: &Path) -> Path {
        self += other;
        self
    }
}

impl Add<Path> for Path {
    type Output = Path;

    fn add(mut self, other: Path) -> Path {
        self += &other;
        self
    }
}
