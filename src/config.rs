// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::Result;
use crate::paths;
use crate::store::HintStore;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "/etc/inhibit/config.toml";
pub const CONFIG_ENV_VAR: &str = "INHIBIT_CONFIG";
const ENV_PREFIX: &str = "INHIBIT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InhibitConfig {
    /// Root prefix the default inhibit directory is resolved under.
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Explicit inhibit directory; bypasses root relocation when set.
    #[serde(default)]
    pub inhibit_dir: Option<PathBuf>,
}

impl Default for InhibitConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            inhibit_dir: None,
        }
    }
}

fn default_root_dir() -> PathBuf {
    PathBuf::from("/")
}

impl InhibitConfig {
    /// Loads configuration from defaults, a TOML file and `INHIBIT_*`
    /// environment variables, later sources taking precedence.
    ///
    /// An explicitly given file must exist. Otherwise `INHIBIT_CONFIG` or
    /// [`DEFAULT_CONFIG_FILE`] is consulted and may be absent.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), true),
            None => match env::var_os(CONFIG_ENV_VAR) {
                Some(value) => (PathBuf::from(value), true),
                None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
            },
        };

        log::debug!("Loading config from {path:?} (required: {required})");

        let config: InhibitConfig = Config::builder()
            .add_source(File::from(path).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        log::debug!("Resolved configuration: {config:?}");
        Ok(config)
    }

    /// Overrides `root_dir`. An explicit `inhibit_dir` still takes
    /// precedence, which is logged as a warning.
    pub fn with_root_dir<P: Into<PathBuf>>(mut self, root_dir: P) -> Self {
        self.root_dir = root_dir.into();
        if let Some(inhibit_dir) = &self.inhibit_dir {
            log::warn!(
                "Root directory {} is ignored because inhibit_dir is set to {}",
                self.root_dir.display(),
                inhibit_dir.display()
            );
        }
        self
    }

    pub fn inhibit_dir(&self) -> PathBuf {
        self.inhibit_dir
            .clone()
            .unwrap_or_else(|| paths::inhibit_dir(&self.root_dir))
    }

    pub fn store(&self) -> HintStore {
        HintStore::new(self.inhibit_dir())
    }
}
