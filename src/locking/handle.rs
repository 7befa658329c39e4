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
use log::{debug, warn};
use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Indicates whether a lock should allow concurrent readers or enforce exclusivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockKind {
    Shared,
    Exclusive,
}

impl fmt::Display for LockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockKind::Shared => f.write_str("shared"),
            LockKind::Exclusive => f.write_str("exclusive"),
        }
    }
}

/// Advisory lock held on an open hint file.
///
/// The lock is released when the handle is dropped, so every early return
/// between acquisition and the end of an operation still unlocks the file.
/// Call [`LockHandle::release`] to observe unlock failures instead of only
/// logging them.
#[derive(Debug)]
pub struct LockHandle {
    kind: LockKind,
    path: PathBuf,
    file: File,
    acquired_at: Instant,
    released: bool,
}

impl LockHandle {
    /// Blocks until the requested lock is held on `file`.
    pub fn acquire(file: File, path: &Path, kind: LockKind) -> Result<Self> {
        let wait_start = Instant::now();
        loop {
            let result = match kind {
                LockKind::Shared => file.lock_shared(),
                LockKind::Exclusive => file.lock(),
            };
            match result {
                Ok(()) => break,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(InhibitError::io("lock", path, err)),
            }
        }

        debug!(
            "Acquired {kind} lock on {} after {:.3}s",
            path.display(),
            duration_to_secs(wait_start.elapsed())
        );

        Ok(Self {
            kind,
            path: path.to_path_buf(),
            file,
            acquired_at: Instant::now(),
            released: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file(&self) -> &File {
        &self.file
    }

    pub fn release(mut self) -> Result<()> {
        self.release_inner()
    }

    fn release_inner(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }

        let elapsed = self.acquired_at.elapsed();
        self.released = true;
        self.file
            .unlock()
            .map_err(|err| InhibitError::io("unlock", &self.path, err))?;
        debug!(
            "Released {} lock on {} after {:.3}s",
            self.kind,
            self.path.display(),
            duration_to_secs(elapsed)
        );
        Ok(())
    }
}

impl Drop for LockHandle {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        if let Err(err) = self.file.unlock() {
            warn!(
                "Failed to unlock {} during drop: {err}",
                self.path.display()
            );
        } else {
            debug!(
                "Released {} lock on {} on drop after {:.3}s",
                self.kind,
                self.path.display(),
                duration_to_secs(self.acquired_at.elapsed())
            );
        }

        self.released = true;
    }
}

fn duration_to_secs(duration: Duration) -> f64 {
    duration.as_secs_f64()
}
