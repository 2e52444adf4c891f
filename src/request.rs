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

//! Incoming request representation and conditional header parsing

use percent_encoding::percent_decode_str;
use std::time::SystemTime;

use crate::etag::ETag;

/// The parts of an incoming HTTP request relevant for static content resolution: the decoded
/// path segments and the conditional headers.
///
/// The hosting HTTP server is expected to produce this from its own request type and to
/// serialize the resulting [`StaticResponse`](crate::StaticResponse) back to the wire.
#[derive(Debug, Clone, Default)]
pub struct StaticRequest {
    segments: Vec<String>,
    if_modified_since: Option<SystemTime>,
    if_none_match: Vec<ETag>,
}

impl StaticRequest {
    /// Creates a request from already percent-decoded path segments.
    pub fn new<S>(segments: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(S::into).collect(),
            if_modified_since: None,
            if_none_match: Vec::new(),
        }
    }

    /// Creates a request from a raw, still percent-encoded URI path like `/css/site.css`.
    ///
    /// Empty and `.` components are dropped, everything else is percent-decoded. Components that
    /// do not decode into valid UTF-8 are decoded lossily and will consequently not resolve.
    /// `..` components are kept as-is, rejecting them is the resource locator's job.
    pub fn from_uri_path(uri_path: &str) -> Self {
        let uri_path = uri_path.strip_prefix('/').unwrap_or(uri_path);
        Self::new(
            uri_path
                .split('/')
                .filter(|component| !component.is_empty() && *component != ".")
                .map(|component| percent_decode_str(component).decode_utf8_lossy().into_owned()),
        )
    }

    /// Sets the `If-Modified-Since` condition.
    pub fn with_if_modified_since(mut self, time: SystemTime) -> Self {
        self.if_modified_since = Some(time);
        self
    }

    /// Sets the `If-None-Match` condition.
    pub fn with_if_none_match(mut self, tags: impl IntoIterator<Item = ETag>) -> Self {
        self.if_none_match = tags.into_iter().collect();
        self
    }

    /// Fills in both conditions from raw header values as received on the wire. Malformed values
    /// are treated like absent headers.
    pub fn with_conditional_headers(
        mut self,
        if_modified_since: Option<&str>,
        if_none_match: Option<&str>,
    ) -> Self {
        self.if_modified_since = if_modified_since.and_then(parse_if_modified_since);
        self.if_none_match = if_none_match.map(parse_if_none_match).unwrap_or_default();
        self
    }

    /// The decoded path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The `If-Modified-Since` condition if present.
    pub fn if_modified_since(&self) -> Option<SystemTime> {
        self.if_modified_since
    }

    /// The `If-None-Match` entity tags, empty if the header was absent or unparseable.
    pub fn if_none_match(&self) -> &[ETag] {
        &self.if_none_match
    }
}

/// Parses an `If-Modified-Since` header value. Anything that isn't a valid HTTP-date results in
/// `None`, the caller is expected to fail open and serve the resource.
pub fn parse_if_modified_since(value: &str) -> Option<SystemTime> {
    httpdate::parse_http_date(value.trim()).ok()
}

/// Parses an `If-None-Match` header value into the list of entity tags it carries. Unparseable
/// entries are skipped.
pub fn parse_if_none_match(value: &str) -> Vec<ETag> {
    value.split(',').filter_map(ETag::parse).collect()
}
