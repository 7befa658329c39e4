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

mod context;
mod exit_codes;
mod format;
#[cfg(test)]
mod tests;

pub use context::ErrorContext;
pub use exit_codes::get_exit_code;
pub use format::{format_error_chain, format_error_with_color};

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InhibitError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Timed out after {waited_secs:.1}s waiting for '{resource}' (hint: {hint})")]
    WaitTimeout {
        resource: String,
        hint: String,
        waited_secs: f64,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl InhibitError {
    /// Wraps an I/O failure with the action and path it occurred on.
    pub fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        InhibitError::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns the underlying I/O error kind, if this is an I/O failure.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            InhibitError::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for InhibitError {
    fn from(err: config::ConfigError) -> Self {
        InhibitError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, InhibitError>;
