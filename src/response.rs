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

//! Response representation and lazy body streaming

use bytes::{Bytes, BytesMut};
use http::header::{self, HeaderMap, HeaderValue};
use http::status::StatusCode;
use std::fmt;
use std::io::{Error, Read};

use crate::metadata::Metadata;

const BUFFER_SIZE: usize = 64 * 1024;

/// The outcome of handling a static content request: status code, headers and, for full
/// responses, a lazy body stream.
///
/// The hosting HTTP server serializes this to the wire. Which headers are present depends
/// entirely on the status: 404 responses carry none, 304 responses carry `ETag` and
/// `Last-Modified`, 200 responses additionally carry `Content-Type` and `Content-Length`.
#[derive(Debug)]
pub struct StaticResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<Body>,
}

impl StaticResponse {
    /// Produces an empty `404 Not Found` response.
    pub(crate) fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Produces a `304 Not Modified` response with validator headers and no body.
    pub(crate) fn not_modified(meta: &Metadata) -> Self {
        let mut headers = HeaderMap::with_capacity(2);
        append_validators(&mut headers, meta);
        Self {
            status: StatusCode::NOT_MODIFIED,
            headers,
            body: None,
        }
    }

    /// Produces a `200 OK` response with all metadata headers and the given body.
    pub(crate) fn full(meta: &Metadata, body: Body) -> Self {
        let mut headers = HeaderMap::with_capacity(4);
        if let Ok(value) = HeaderValue::from_str(meta.mime.as_ref()) {
            headers.insert(header::CONTENT_TYPE, value);
        }
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(meta.size));
        append_validators(&mut headers, meta);
        Self {
            status: StatusCode::OK,
            headers,
            body: Some(body),
        }
    }

    /// The response status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Consumes the response, yielding the body stream. `None` for 304 and 404 responses.
    pub fn into_body(self) -> Option<Body> {
        self.body
    }
}

fn append_validators(headers: &mut HeaderMap, meta: &Metadata) {
    if let Ok(value) = HeaderValue::from_str(&meta.modified) {
        headers.insert(header::LAST_MODIFIED, value);
    }
    if let Ok(value) = HeaderValue::from_str(&meta.etag.to_string()) {
        headers.insert(header::ETAG, value);
    }
}

/// Lazy byte stream of a resource's contents.
///
/// Chunks are read on demand, dropping the stream early stops reading at the next chunk
/// boundary. I/O failures while reading an already located resource surface as stream errors,
/// the response status is committed by then and is not revised.
pub struct Body {
    state: BodyState,
}

enum BodyState {
    Streaming(Box<dyn Read + Send>),
    Failed(Error),
    Done,
}

impl Body {
    pub(crate) fn from_reader(reader: Box<dyn Read + Send>) -> Self {
        Self {
            state: BodyState::Streaming(reader),
        }
    }

    /// A body whose resource became unreadable after it had been located. Yields the error as
    /// its only item.
    pub(crate) fn failed(err: Error) -> Self {
        Self {
            state: BodyState::Failed(err),
        }
    }

    /// Drains the stream into a single buffer.
    pub fn into_bytes(self) -> Result<Vec<u8>, Error> {
        let mut buf = Vec::new();
        for chunk in self {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf)
    }
}

impl Iterator for Body {
    type Item = Result<Bytes, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match std::mem::replace(&mut self.state, BodyState::Done) {
            BodyState::Streaming(mut reader) => {
                let mut buf = BytesMut::zeroed(BUFFER_SIZE);
                match reader.read(buf.as_mut()) {
                    Ok(0) => None,
                    Ok(len) => {
                        buf.truncate(len);
                        self.state = BodyState::Streaming(reader);
                        Some(Ok(buf.freeze()))
                    }
                    Err(err) => Some(Err(err)),
                }
            }
            BodyState::Failed(err) => Some(Err(err)),
            BodyState::Done => None,
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            BodyState::Streaming(_) => f.write_str("Body::Streaming"),
            BodyState::Failed(err) => write!(f, "Body::Failed({err})"),
            BodyState::Done => f.write_str("Body::Done"),
        }
    }
}
