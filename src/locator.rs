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

//! Resource location and path normalization

use log::{debug, warn};
use std::time::SystemTime;

use crate::metadata::unix_millis;
use crate::namespace::ResourceNamespace;

/// A located resource: an existing, readable, non-directory entry strictly inside its namespace.
#[derive(Debug, Clone)]
pub struct ResolvedResource {
    path: String,
    size: u64,
    modified: SystemTime,
}

impl ResolvedResource {
    /// The normalized namespace path of the resource.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The resource name, the last path segment including any extension.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or_default()
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Last modified time.
    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    /// Last modified time in milliseconds since the Unix epoch.
    pub fn modified_millis(&self) -> u64 {
        unix_millis(self.modified)
    }
}

/// Resolves decoded path segments against a namespace.
///
/// Segments that could escape the namespace (`..`, absolute paths, embedded separators) make the
/// whole path unresolvable. Missing entries, directories and unreadable entries are equally
/// `None`, a traversal attempt is indistinguishable from a plain miss to the caller.
pub fn locate(namespace: &dyn ResourceNamespace, segments: &[String]) -> Option<ResolvedResource> {
    let path = normalize(segments)?;
    let meta = namespace.metadata(&path)?;
    debug!("resolved {segments:?} to namespace path {path:?}");

    Some(ResolvedResource {
        path,
        size: meta.size,
        modified: meta.modified,
    })
}

/// Joins segments into a normalized namespace path. Empty and `.` segments are dropped, an empty
/// result (the namespace root, a directory by definition) is unresolvable.
fn normalize(segments: &[String]) -> Option<String> {
    let mut parts = Vec::with_capacity(segments.len());
    for segment in segments {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment == ".."
            || segment.contains('/')
            || segment.contains('\\')
            || segment.contains('\0')
        {
            warn!("rejecting path segment {segment:?} in {segments:?}");
            return None;
        }
        parts.push(segment.as_str());
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
