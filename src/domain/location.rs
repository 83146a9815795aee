//! Location records and their content footprints.
//!
//! A [`Location`] pairs a snapshot of the VFS host stack with a normalized
//! directory path. Its identity is a [`Footprint`]: a BLAKE3 digest over the
//! stack and the path, truncated to 64 bits. The footprint depends only on
//! content, so values computed in one run stay valid after a reload.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable content hash identifying a (host stack, path) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Footprint(pub u64);

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// One virtual filesystem layer of a host stack.
///
/// `tag` names the filesystem kind (`native`, `sftp`, `archive`, ...), `junction`
/// is whatever the layer is attached at (a mount point, an archive path inside
/// the parent layer, a server address) and `options` carries the layer's
/// connection parameters. Options live in a `BTreeMap` so their order is
/// canonical for hashing and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostLayer {
    pub tag: String,
    #[serde(default)]
    pub junction: String,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl HostLayer {
    pub fn new(tag: impl Into<String>, junction: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            junction: junction.into(),
            options: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Ordered chain of layers needed to reach a location, root layer first.
///
/// For an archive opened from an SFTP share this is
/// `[native, sftp(server), archive(/path/to/file.zip)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostStack(pub Vec<HostLayer>);

impl HostStack {
    #[must_use]
    pub fn layers(&self) -> &[HostLayer] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true when the stack consists of nothing but the native filesystem.
    #[must_use]
    pub fn is_native(&self) -> bool {
        matches!(self.0.as_slice(), [only] if only.tag == crate::vfs::NATIVE_TAG)
    }
}

impl fmt::Display for HostStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for layer in &self.0 {
            if !first {
                f.write_str(" > ")?;
            }
            first = false;
            if layer.junction.is_empty() {
                write!(f, "{}", layer.tag)?;
            } else {
                write!(f, "{}:{}", layer.tag, layer.junction)?;
            }
        }
        Ok(())
    }
}

/// Immutable location record shared by visits and favorites.
///
/// Construct through [`Location::new`], which normalizes the path and computes
/// the footprint once; the fields are private so the cached footprint can never
/// drift from the content it was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    host_stack: HostStack,
    path: String,
    footprint: Footprint,
}

impl Location {
    pub fn new(host_stack: HostStack, path: &str) -> Self {
        let path = normalize_path(path);
        let footprint = footprint_of(&host_stack, &path);
        Self {
            host_stack,
            path,
            footprint,
        }
    }

    #[must_use]
    pub fn host_stack(&self) -> &HostStack {
        &self.host_stack
    }

    /// Normalized directory path, always absolute with a trailing slash.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// Display name derived from the final path component, `/` for the root.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or("/")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host_stack.is_native() {
            f.write_str(&self.path)
        } else {
            write!(f, "[{}] {}", self.host_stack, self.path)
        }
    }
}

/// Normalizes a directory path into its canonical absolute form.
///
/// Empty and `.` segments are dropped, `..` removes the previous segment, and
/// the result always starts and ends with `/`.
///
/// # Examples
///
/// ```
/// use placemarks::domain::normalize_path;
///
/// assert_eq!(normalize_path("/Users/bob/Documents"), "/Users/bob/Documents/");
/// assert_eq!(normalize_path("//a/./b/../c//"), "/a/c/");
/// assert_eq!(normalize_path(""), "/");
/// ```
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        return "/".to_string();
    }

    let mut normalized = String::with_capacity(path.len() + 2);
    for segment in segments {
        normalized.push('/');
        normalized.push_str(segment);
    }
    normalized.push('/');
    normalized
}

/// Computes the footprint of an already normalized path on a host stack.
///
/// Every field is length-prefixed so that moving bytes between adjacent fields
/// always changes the digest.
#[must_use]
pub fn footprint_of(host_stack: &HostStack, normalized_path: &str) -> Footprint {
    fn feed(hasher: &mut blake3::Hasher, field: &str) {
        hasher.update(&(field.len() as u64).to_le_bytes());
        hasher.update(field.as_bytes());
    }

    let mut hasher = blake3::Hasher::new();
    hasher.update(&(host_stack.0.len() as u64).to_le_bytes());
    for layer in &host_stack.0 {
        feed(&mut hasher, &layer.tag);
        feed(&mut hasher, &layer.junction);
        hasher.update(&(layer.options.len() as u64).to_le_bytes());
        for (key, value) in &layer.options {
            feed(&mut hasher, key);
            feed(&mut hasher, value);
        }
    }
    feed(&mut hasher, normalized_path);

    let digest = hasher.finalize();
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.as_bytes()[..8]);
    Footprint(u64::from_le_bytes(head))
}
