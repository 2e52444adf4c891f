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

//! Request handling orchestration

use log::{debug, warn};
use std::io::{Error, ErrorKind};

use crate::conditional::is_modified;
use crate::configuration::StaticContentConf;
use crate::locator::locate;
use crate::metadata::Metadata;
use crate::namespace::{DirectoryRoot, ResourceNamespace};
use crate::request::StaticRequest;
use crate::response::{Body, StaticResponse};

/// Handler mapping static content requests onto a resource namespace.
///
/// The handler holds no mutable state, a single instance serves any number of concurrent
/// requests.
#[derive(Debug)]
pub struct StaticContentHandler {
    namespace: Box<dyn ResourceNamespace>,
}

impl StaticContentHandler {
    /// Creates a handler serving the root directory from the given configuration. This will
    /// canonicalize the path to the root directory and might result in an error if that path
    /// isn't accessible.
    pub fn new(conf: StaticContentConf) -> Result<Self, Error> {
        let root = conf
            .root
            .ok_or_else(|| Error::new(ErrorKind::InvalidInput, "no root directory configured"))?;
        let namespace = DirectoryRoot::new(root)?;

        debug!("initialized static content handler for {:?}", namespace.root());
        Ok(Self::with_namespace(Box::new(namespace)))
    }

    /// Creates a handler serving an arbitrary resource namespace.
    pub fn with_namespace(namespace: Box<dyn ResourceNamespace>) -> Self {
        Self { namespace }
    }

    /// Handles a request: locates the resource, evaluates the request's conditions and produces
    /// the complete response.
    ///
    /// Unresolvable paths, including traversal attempts, produce an empty 404. A resource
    /// becoming unreadable between location and body streaming surfaces as an error on the body
    /// stream, the committed status is not revised.
    pub fn handle(&self, request: &StaticRequest) -> StaticResponse {
        let Some(resource) = locate(self.namespace.as_ref(), request.segments()) else {
            debug!("no resource for path {:?}", request.segments());
            return StaticResponse::not_found();
        };

        let meta = Metadata::from_resource(&resource);
        if !is_modified(request, Some(&meta.etag), resource.modified_millis()) {
            debug!("If-None-Match/If-Modified-Since check resulted in Not Modified");
            return StaticResponse::not_modified(&meta);
        }

        let body = match self.namespace.open(resource.path()) {
            Ok(reader) => Body::from_reader(reader),
            Err(err) => {
                warn!("failed opening located resource {:?}: {err}", resource.path());
                Body::failed(err)
            }
        };
        StaticResponse::full(&meta, body)
    }
}
