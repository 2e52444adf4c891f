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

//! # Static Content Module
//!
//! This crate implements the static content core of an HTTP server: it maps a request path onto
//! a file or bundled resource, enforces conditional request semantics and produces the complete
//! response, leaving wire-level HTTP to the hosting server.
//!
//! ## Supported functionality
//!
//! * Serving from a filesystem directory or from in-memory bundles via the
//!   [`ResourceNamespace`] abstraction
//! * Conditional requests via `If-Modified-Since` and `If-None-Match` HTTP headers
//! * Entity tags derived from modification time and size, no content hashing
//! * Path traversal protection, rejected paths are indistinguishable from missing files
//! * Lazily streamed response bodies, read in 64 KiB chunks
//!
//! ## Known limitations
//!
//! * Byte range requests, precondition headers (`If-Match`, `If-Unmodified-Since`) and
//!   compression are not handled here. Hosting servers needing them have to layer them on top.
//! * Directory requests always produce 404, there is no index file lookup.
//!
//! ## Code example
//!
//! You will typically create a [`StaticContentHandler`] instance at server startup and call it
//! for each incoming request, translating between your server's request/response types and
//! [`StaticRequest`]/[`StaticResponse`]:
//!
//! ```rust,no_run
//! use static_content_module::{StaticContentConf, StaticContentHandler, StaticRequest};
//!
//! let conf = StaticContentConf {
//!     root: Some("/var/www/html".into()),
//! };
//! let handler = StaticContentHandler::new(conf).unwrap();
//!
//! let request = StaticRequest::from_uri_path("/css/site.css")
//!     .with_conditional_headers(Some("Fri, 15 May 2015 15:34:21 GMT"), None);
//! let response = handler.handle(&request);
//! // Serialize status, headers and body back to the wire here.
//! ```
//!
//! Assets bundled with the application are served the same way:
//!
//! ```rust
//! use static_content_module::{EmbeddedBundle, StaticContentHandler, StaticRequest};
//!
//! let bundle = EmbeddedBundle::new().entry("index.html", &b"<html>Hi!</html>"[..]);
//! let handler = StaticContentHandler::with_namespace(Box::new(bundle));
//!
//! let response = handler.handle(&StaticRequest::from_uri_path("/index.html"));
//! assert_eq!(response.status(), http::StatusCode::OK);
//! ```

mod conditional;
mod configuration;
mod etag;
mod handler;
mod locator;
mod metadata;
mod namespace;
mod request;
mod response;

pub use conditional::is_modified;
pub use configuration::{StaticContentConf, StaticContentOpt};
pub use etag::ETag;
pub use handler::StaticContentHandler;
pub use locator::{locate, ResolvedResource};
pub use metadata::{media_type, Metadata};
pub use namespace::{DirectoryRoot, EmbeddedBundle, ResourceMetadata, ResourceNamespace};
pub use request::{parse_if_modified_since, parse_if_none_match, StaticRequest};
pub use response::{Body, StaticResponse};
