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

use crate::error::{InhibitError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Directory holding hint files when no root relocation is in effect.
pub const DEFAULT_INHIBIT_DIR: &str = "/var/lib/inhibit";
pub const HINT_FILE_EXTENSION: &str = "lock";

/// Resolves the inhibit directory beneath `root`.
///
/// The default directory is treated as relative to `root`, so `/` yields
/// `DEFAULT_INHIBIT_DIR` and `/tmp/chroot` yields `/tmp/chroot/var/lib/inhibit`.
pub fn inhibit_dir(root: &Path) -> PathBuf {
    let relative: PathBuf = Path::new(DEFAULT_INHIBIT_DIR)
        .components()
        .filter(|component| matches!(component, Component::Normal(_)))
        .collect();
    root.join(relative)
}

pub fn hint_file_path(inhibit_dir: &Path, resource: &str) -> PathBuf {
    inhibit_dir.join(format!("{resource}.{HINT_FILE_EXTENSION}"))
}

/// Extracts the resource name from a hint file path, if it is one.
pub fn resource_from_hint_file(path: &Path) -> Option<String> {
    if path.extension()? != HINT_FILE_EXTENSION {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

/// Ensure the inhibit directory exists, creating parents as needed.
pub fn ensure_inhibit_dir(path: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder
        .create(path)
        .map_err(|err| InhibitError::io("create inhibit directory", path, err))
}
