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
use crate::hint::Hint;
use crate::locking::{LockHandle, LockKind};
use crate::paths::{self, DEFAULT_INHIBIT_DIR};
use log::{debug, info};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// File-backed store of per-resource inhibition hints.
///
/// Each resource owns one lock file, `<inhibit_dir>/<resource>.lock`, whose
/// content is the current hint. Mutations hold an exclusive advisory lock on
/// that file and reads hold a shared one, so cooperating processes never see
/// a partially written hint. A missing file reads as [`Hint::NOT_INHIBITED`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintStore {
    inhibit_dir: PathBuf,
}

impl HintStore {
    pub fn new<P: Into<PathBuf>>(inhibit_dir: P) -> Self {
        Self {
            inhibit_dir: inhibit_dir.into(),
        }
    }

    /// Store rooted at the default inhibit directory beneath `root`.
    pub fn for_root(root: &Path) -> Self {
        Self::new(paths::inhibit_dir(root))
    }

    /// Moves the store beneath a new root directory.
    ///
    /// Affects every later operation on this store. Other processes still
    /// using the previous directory are not coordinated with, so relocate
    /// before any hint is set or read.
    pub fn relocate(&mut self, root: &Path) {
        let relocated = paths::inhibit_dir(root);
        debug!(
            "Relocating inhibit directory from {} to {}",
            self.inhibit_dir.display(),
            relocated.display()
        );
        self.inhibit_dir = relocated;
    }

    pub fn inhibit_dir(&self) -> &Path {
        &self.inhibit_dir
    }

    pub fn hint_file_path(&self, resource: &str) -> PathBuf {
        paths::hint_file_path(&self.inhibit_dir, resource)
    }

    /// Sets a persistent inhibition hint for `resource`.
    ///
    /// The hint cannot be empty; use [`HintStore::unlock`] to clear it. An
    /// existing hint is overwritten.
    pub fn lock_with_hint(&self, resource: &str, hint: &Hint) -> Result<()> {
        if hint.is_empty() {
            return Err(InhibitError::InvalidArgument(
                "hint cannot be empty".to_string(),
            ));
        }

        paths::ensure_inhibit_dir(&self.inhibit_dir)?;
        let path = self.hint_file_path(resource);
        let file = open_for_write(&path, true)
            .map_err(|err| InhibitError::io("open hint file", &path, err))?;
        let handle = LockHandle::acquire(file, &path, LockKind::Exclusive)?;

        let mut file = handle.file();
        file.set_len(0)
            .map_err(|err| InhibitError::io("truncate hint file", &path, err))?;
        file.write_all(hint.as_bytes())
            .map_err(|err| InhibitError::io("write hint to", &path, err))?;
        handle.release()?;

        info!("Inhibited {resource} with hint '{hint}'");
        Ok(())
    }

    /// Clears the inhibition hint for `resource`.
    ///
    /// The lock file is truncated rather than removed so its identity stays
    /// stable for concurrent lockers. Clearing a resource that was never
    /// inhibited succeeds without creating anything.
    pub fn unlock(&self, resource: &str) -> Result<()> {
        let path = self.hint_file_path(resource);
        let file = match open_for_write(&path, false) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No hint file at {}; nothing to clear", path.display());
                return Ok(());
            }
            Err(err) => return Err(InhibitError::io("open hint file", &path, err)),
        };
        let handle = LockHandle::acquire(file, &path, LockKind::Exclusive)?;

        handle
            .file()
            .set_len(0)
            .map_err(|err| InhibitError::io("truncate hint file", &path, err))?;
        handle.release()?;

        info!("Cleared inhibition of {resource}");
        Ok(())
    }

    /// Returns the current hint for `resource`, or [`Hint::NOT_INHIBITED`].
    ///
    /// Fails rather than returning a partial hint when fewer bytes can be
    /// read than the file size reported under the shared lock.
    pub fn is_locked(&self, resource: &str) -> Result<Hint> {
        let path = self.hint_file_path(resource);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Hint::NOT_INHIBITED);
            }
            Err(err) => return Err(InhibitError::io("open hint file", &path, err)),
        };
        let handle = LockHandle::acquire(file, &path, LockKind::Shared)?;

        let file = handle.file();
        let size = file
            .metadata()
            .map_err(|err| InhibitError::io("stat hint file", &path, err))?
            .len();
        read_hint(file, size, handle.path())
    }

    /// Lists inhibited resources in name order.
    ///
    /// Each hint is read under its own shared lock, so the result is not a
    /// snapshot across resources. An unreadable hint file fails the whole
    /// listing instead of being skipped, since a caller must not take a
    /// resource it cannot read as uninhibited.
    pub fn list(&self) -> Result<Vec<(String, Hint)>> {
        let entries = match fs::read_dir(&self.inhibit_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(InhibitError::io(
                    "list inhibit directory",
                    &self.inhibit_dir,
                    err,
                ));
            }
        };

        let mut inhibited = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| {
                InhibitError::io("list inhibit directory", &self.inhibit_dir, err)
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(resource) = paths::resource_from_hint_file(&path) else {
                continue;
            };
            let hint = self.is_locked(&resource)?;
            if hint.is_inhibited() {
                inhibited.push((resource, hint));
            }
        }

        inhibited.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(inhibited)
    }
}

impl Default for HintStore {
    fn default() -> Self {
        Self::new(DEFAULT_INHIBIT_DIR)
    }
}

/// Reads exactly `size` bytes of hint from `reader`.
///
/// A short read is an error; a partial hint is never returned.
fn read_hint<R: Read>(mut reader: R, size: u64, path: &Path) -> Result<Hint> {
    if size == 0 {
        return Ok(Hint::NOT_INHIBITED);
    }

    let len = usize::try_from(size).map_err(|_| {
        InhibitError::io(
            "read hint from",
            path,
            io::Error::new(io::ErrorKind::InvalidData, "hint file too large"),
        )
    })?;
    let mut buf = vec![0u8; len];
    reader
        .read_exact(&mut buf)
        .map_err(|err| InhibitError::io("read hint from", path, err))?;

    let hint = String::from_utf8(buf).map_err(|err| {
        InhibitError::io(
            "decode hint from",
            path,
            io::Error::new(io::ErrorKind::InvalidData, err),
        )
    })?;
    Ok(Hint::from(hint))
}

fn open_for_write(path: &Path, create: bool) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(create).truncate(false);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    options.open(path)
}
