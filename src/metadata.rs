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

//! Response metadata derived from a located resource

use httpdate::fmt_http_date;
use mime_guess::mime::Mime;
use std::time::SystemTime;

use crate::etag::ETag;
use crate::locator::ResolvedResource;

/// Determines the media type for a resource name from its extension. Unknown extensions and
/// names without one fall back to `application/octet-stream`.
pub fn media_type(name: &str) -> Mime {
    mime_guess::from_path(name).first_or_octet_stream()
}

/// Helper wrapping the metadata that ends up in response headers
#[derive(Debug, Clone)]
pub struct Metadata {
    /// Media type of the resource, guessed from its name
    pub mime: Mime,
    /// Resource size in bytes
    pub size: u64,
    /// Last modified time of the resource in the format `Fri, 15 May 2015 15:34:21 GMT`
    pub modified: String,
    /// Entity tag for the resource, encoding last modified time and size
    pub etag: ETag,
}

impl Metadata {
    /// Collects the response metadata for a located resource.
    pub fn from_resource(resource: &ResolvedResource) -> Self {
        Self {
            mime: media_type(resource.name()),
            size: resource.size(),
            modified: fmt_http_date(resource.modified()),
            etag: ETag::from_metadata(resource.modified_millis(), resource.size()),
        }
    }
}

/// Milliseconds since the Unix epoch, clamping anything earlier to zero.
pub(crate) fn unix_millis(time: SystemTime) -> u64 {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map_or(0, |duration| duration.as_millis() as u64)
}
