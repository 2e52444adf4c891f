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

//! Conditional request evaluation

use crate::etag::ETag;
use crate::metadata::unix_millis;
use crate::request::StaticRequest;

/// Decides whether a resource has to be served in full or whether the request's conditions allow
/// a `304 Not Modified` response.
///
/// The branching order follows HTTP conditional semantics with entity tags taking precedence
/// over dates:
///
/// 1. Without a resource tag only the date condition applies.
/// 2. With a resource tag and a non-empty `If-None-Match` set, the resource counts as modified
///    only if every listed tag differs from the resource's (payloads compared, weak/strong
///    markers ignored).
/// 3. With a resource tag but no `If-None-Match` entries the resource is always modified,
///    `If-Modified-Since` is not consulted in this branch.
/// 4. The date condition: modified if `last_modified` is strictly greater than the header value
///    at millisecond resolution, or if the header is absent.
///
/// `last_modified` is the resource's modification time in milliseconds since the Unix epoch.
pub fn is_modified(request: &StaticRequest, etag: Option<&ETag>, last_modified: u64) -> bool {
    if let Some(etag) = etag {
        let candidates = request.if_none_match();
        if !candidates.is_empty() {
            return candidates.iter().all(|candidate| candidate != etag);
        }
        return true;
    }

    if let Some(since) = request.if_modified_since() {
        last_modified > unix_millis(since)
    } else {
        true
    }
}
