// Copyright 2024 Wladimir Palant
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Resource namespace abstraction with filesystem and in-memory implementations

use bytes::Bytes;
use log::warn;
use std::collections::HashMap;
use std::fmt::Debug;
use std::fs::File;
use std::io::{Cursor, Error, ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Size and modification time of a namespace entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceMetadata {
    /// Size in bytes.
    pub size: u64,
    /// Last modified time. Real for filesystem entries, synthesized for stores lacking the
    /// information.
    pub modified: SystemTime,
}

/// A read-only, path-addressed store of byte blobs.
///
/// Paths are relative, `/`-separated and already normalized, the resource locator guarantees
/// that no `..` or absolute components reach a namespace. Implementations still own the boundary
/// check where the underlying store can alias paths (symlinks).
pub trait ResourceNamespace: Debug + Send + Sync {
    /// Checks whether a regular, readable entry exists at the given path.
    fn exists(&self, path: &str) -> bool {
        self.metadata(path).is_some()
    }

    /// Retrieves size and modification time of the entry at the given path. `None` for missing
    /// entries, directories, unreadable entries and paths leaving the store.
    fn metadata(&self, path: &str) -> Option<ResourceMetadata>;

    /// Opens the entry at the given path for reading.
    fn open(&self, path: &str) -> Result<Box<dyn Read + Send>, Error>;
}

/// Filesystem-backed namespace rooted at a directory.
#[derive(Debug, Clone)]
pub struct DirectoryRoot {
    root: PathBuf,
}

impl DirectoryRoot {
    /// Creates a namespace serving the given directory. The path is canonicalized, an error is
    /// returned if it isn't accessible.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, Error> {
        Ok(Self {
            root: root.into().canonicalize()?,
        })
    }

    /// The canonicalized root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Translates a namespace path into a canonical filesystem path, requiring the result to
    /// stay inside the root. Symlinks pointing outside the root fail this check.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let mut full = self.root.clone();
        for component in path.split('/') {
            full.push(component);
        }

        let full = full.canonicalize().ok()?;
        if full.starts_with(&self.root) {
            Some(full)
        } else {
            warn!("path {path:?} resolves outside root directory {:?}", self.root);
            None
        }
    }
}

impl ResourceNamespace for DirectoryRoot {
    fn metadata(&self, path: &str) -> Option<ResourceMetadata> {
        let full = self.resolve(path)?;
        let meta = full.metadata().ok()?;
        if !meta.is_file() {
            return None;
        }

        Some(ResourceMetadata {
            size: meta.len(),
            modified: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        })
    }

    fn open(&self, path: &str) -> Result<Box<dyn Read + Send>, Error> {
        let full = self.resolve(path).ok_or(ErrorKind::NotFound)?;
        Ok(Box::new(File::open(full)?))
    }
}

/// In-memory namespace for assets bundled with the application.
///
/// Entries are addressed by their full path within the bundle. A base prefix can be configured,
/// it is prepended to every lookup, so a bundle mounted at `static/content` serves the entry
/// `static/content/d1/f3` for the request path `/d1/f3` and nothing for `/static/content/d1/f3`.
///
/// Bundled entries carry no modification time of their own. The bundle records the instant it
/// was constructed, typically process start, and reports it for every entry, keeping entity tags
/// stable for the bundle's lifetime.
#[derive(Debug, Clone)]
pub struct EmbeddedBundle {
    prefix: String,
    entries: HashMap<String, Bytes>,
    modified: SystemTime,
}

impl EmbeddedBundle {
    /// Creates an empty bundle without a base prefix.
    pub fn new() -> Self {
        Self::with_prefix("")
    }

    /// Creates an empty bundle whose lookups are based at the given prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            prefix: prefix.trim_matches('/').to_owned(),
            entries: HashMap::new(),
            modified: SystemTime::now(),
        }
    }

    /// Adds an entry under its full bundle path.
    pub fn insert(&mut self, path: impl Into<String>, data: impl Into<Bytes>) {
        self.entries.insert(path.into(), data.into());
    }

    /// Adds an entry under its full bundle path, builder-style.
    pub fn entry(mut self, path: impl Into<String>, data: impl Into<Bytes>) -> Self {
        self.insert(path, data);
        self
    }

    fn get(&self, path: &str) -> Option<&Bytes> {
        if self.prefix.is_empty() {
            self.entries.get(path)
        } else {
            self.entries.get(&format!("{}/{path}", self.prefix))
        }
    }
}

impl Default for EmbeddedBundle {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceNamespace for EmbeddedBundle {
    fn metadata(&self, path: &str) -> Option<ResourceMetadata> {
        self.get(path).map(|data| ResourceMetadata {
            size: data.len() as u64,
            modified: self.modified,
        })
    }

    fn open(&self, path: &str) -> Result<Box<dyn Read + Send>, Error> {
        let data = self.get(path).ok_or(ErrorKind::NotFound)?;
        Ok(Box::new(Cursor::new(data.clone())))
    }
}
