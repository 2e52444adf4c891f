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

//! Data structures required for `StaticContentHandler` configuration

use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

/// Command line options of the static content handler
#[derive(Debug, Default, Parser)]
pub struct StaticContentOpt {
    /// The root directory to serve.
    #[clap(short, long)]
    pub root: Option<PathBuf>,
}

/// Configuration file settings of the static content handler
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StaticContentConf {
    /// The root directory to serve.
    pub root: Option<PathBuf>,
}

impl StaticContentConf {
    /// Merges the command line options into the current configuration. Any command line options
    /// present overwrite existing settings.
    pub fn merge_with_opt(&mut self, opt: StaticContentOpt) {
        if opt.root.is_some() {
            self.root = opt.root;
        }
    }
}
