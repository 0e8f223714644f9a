//! Template tree loading.
//!
//! A [`TemplateSet`] is the read-only input to a scaffolding run: the ordered
//! collection of template entries (relative path, content, executable bit)
//! discovered under a template root directory or built from the embedded
//! templates.
//!
//! Entries are ordered lexicographically by relative path. The walk sorts
//! explicitly rather than trusting filesystem enumeration order, which is not
//! stable across platforms, so a given template always materializes in the
//! same order.
//!
//! Text vs binary classification is by content sniffing (a NUL byte in the
//! first 8 KiB, or content that is not valid UTF-8, means binary), not by
//! extension — templates may use arbitrary extensions.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{OvoError, Result};

/// Number of leading bytes inspected for the NUL-byte binary sniff.
const SNIFF_PREFIX_LEN: usize = 8192;

/// Content of one template entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryContent {
    /// UTF-8 text, subject to placeholder substitution.
    Text(String),
    /// Opaque bytes, copied verbatim.
    Binary(Vec<u8>),
}

impl EntryContent {
    /// The entry's content as raw bytes, whichever variant it is.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(s) => s.as_bytes(),
            Self::Binary(b) => b,
        }
    }
}

/// One file in the template tree, possibly containing placeholder tokens in
/// its path or content.
#[derive(Debug, Clone)]
pub struct TemplateEntry {
    /// Path relative to the template root. Always forward-slash separated,
    /// never absolute, never contains `..` segments.
    pub path: String,
    pub content: EntryContent,
    /// Unix executable bit of the source file, preserved on materialization.
    pub executable: bool,
}

impl TemplateEntry {
    /// Construct a text entry. Intended for embedded templates and tests.
    pub fn text(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: EntryContent::Text(content.into()),
            executable: false,
        }
    }
}

/// The ordered, read-only collection of template entries for one run.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    entries: Vec<TemplateEntry>,
}

impl TemplateSet {
    /// Build a set from pre-constructed entries, sorting them by path.
    pub fn from_entries(mut entries: Vec<TemplateEntry>) -> Self {
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Self { entries }
    }

    /// Load a template set from a directory tree on disk.
    ///
    /// Walks the tree following symlinks, but rejects any entry whose real
    /// path resolves outside the root. Fails if the root does not exist or
    /// is not a directory; both checks happen before any entry is read.
    pub fn from_dir(root: &Path) -> Result<Self> {
        let meta = fs::metadata(root).map_err(|source| OvoError::TemplateRootNotFound {
            path: root.to_path_buf(),
            source,
        })?;
        if !meta.is_dir() {
            return Err(OvoError::TemplateRootNotADirectory(root.to_path_buf()));
        }
        let canonical_root = fs::canonicalize(root)?;

        let mut entries = Vec::new();
        for item in WalkDir::new(root).follow_links(true).sort_by_file_name() {
            let item = item.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                match e.into_io_error() {
                    Some(source) => OvoError::TemplateRead { path, source },
                    None => OvoError::SymlinkEscape { path },
                }
            })?;
            if !item.file_type().is_file() {
                continue;
            }

            // Symlinked files (and files under symlinked directories) must
            // still resolve inside the root.
            let real = fs::canonicalize(item.path()).map_err(|source| OvoError::TemplateRead {
                path: item.path().to_path_buf(),
                source,
            })?;
            if !real.starts_with(&canonical_root) {
                return Err(OvoError::SymlinkEscape {
                    path: item.path().to_path_buf(),
                });
            }

            let rel = relative_slash_path(item.path(), root)?;
            let bytes = fs::read(item.path()).map_err(|source| OvoError::TemplateRead {
                path: item.path().to_path_buf(),
                source,
            })?;
            let executable = is_executable(&item.metadata().map_err(|e| {
                OvoError::TemplateRead {
                    path: item.path().to_path_buf(),
                    source: e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("metadata unavailable")),
                }
            })?);

            entries.push(TemplateEntry {
                path: rel,
                content: classify(bytes),
                executable,
            });
        }

        // sort_by_file_name orders siblings, not full relative paths
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        tracing::debug!(
            count = entries.len(),
            root = %root.display(),
            "loaded template set"
        );
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Classify raw bytes as substitutable text or verbatim binary.
fn classify(bytes: Vec<u8>) -> EntryContent {
    let prefix_len = bytes.len().min(SNIFF_PREFIX_LEN);
    if bytes[..prefix_len].contains(&0) {
        return EntryContent::Binary(bytes);
    }
    match String::from_utf8(bytes) {
        Ok(text) => EntryContent::Text(text),
        Err(e) => EntryContent::Binary(e.into_bytes()),
    }
}

/// Relative path from `root` to `path`, forward-slash separated. A non-UTF-8
/// component is an error rather than a lossy rewrite: mangling a file name
/// would corrupt the materialized tree silently.
fn relative_slash_path(path: &Path, root: &Path) -> Result<String> {
    let rel: PathBuf = path.strip_prefix(root).unwrap_or(path).to_path_buf();
    let mut parts = Vec::new();
    for component in rel.components() {
        let part = component
            .as_os_str()
            .to_str()
            .ok_or_else(|| OvoError::NonUtf8Path(path.to_path_buf()))?;
        parts.push(part);
    }
    Ok(parts.join("/"))
}

#[cfg(unix)]
fn is_executable(meta: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_meta: &fs::Metadata) -> bool {
    false
}
