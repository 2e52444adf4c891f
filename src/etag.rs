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

//! Entity tag generation and matching

use std::fmt;

/// An entity tag: an opaque payload plus a weak/strong marker.
///
/// Equality compares only the payload, never the weak/strong marker. This is the comparison
/// required when matching `If-None-Match` entries against a resource's tag.
#[derive(Debug, Clone)]
pub struct ETag {
    weak: bool,
    tag: String,
}

impl ETag {
    /// Derives the entity tag for a resource from its last modified time (milliseconds since the
    /// Unix epoch) and its size in bytes.
    ///
    /// The payload is the lowercase hex encoding of both values joined by a hyphen, so identical
    /// metadata always produces an identical tag. File contents are never read, two distinct
    /// contents sharing modification time and size are indistinguishable.
    pub fn from_metadata(last_modified: u64, size: u64) -> Self {
        Self {
            weak: false,
            tag: format!("{last_modified:x}-{size:x}"),
        }
    }

    /// Creates a strong tag with the given payload.
    pub fn strong(tag: impl Into<String>) -> Self {
        Self {
            weak: false,
            tag: tag.into(),
        }
    }

    /// Creates a weak tag with the given payload.
    pub fn weak(tag: impl Into<String>) -> Self {
        Self {
            weak: true,
            tag: tag.into(),
        }
    }

    /// Parses a single entity tag as it appears in a header value. The `W/` prefix and
    /// surrounding quotes are recognized, unquoted opaque tokens are tolerated. Returns `None`
    /// for empty input.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let (weak, value) = match value.strip_prefix("W/") {
            Some(rest) => (true, rest),
            None => (false, value),
        };
        let tag = value
            .strip_prefix('"')
            .and_then(|inner| inner.strip_suffix('"'))
            .unwrap_or(value);
        if tag.is_empty() {
            None
        } else {
            Some(Self {
                weak,
                tag: tag.to_owned(),
            })
        }
    }

    /// The opaque tag payload, without quotes or the `W/` prefix.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Whether this is a weak tag.
    pub fn is_weak(&self) -> bool {
        self.weak
    }
}

impl PartialEq for ETag {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
    }
}

impl Eq for ETag {}

impl fmt::Display for ETag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.weak {
            f.write_str("W/")?;
        }
        write!(f, "\"{}\"", self.tag)
    }
}
