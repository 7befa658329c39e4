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

use crate::error::InhibitError;
use std::fmt;
use std::io;

pub struct ErrorContext<'a> {
    pub error: &'a InhibitError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a InhibitError) -> Self {
        let (suggestion, details) = match error {
            InhibitError::InvalidArgument(msg) => {
                let suggestion = Some(
                    "Pass a non-empty hint (e.g., '--hint refresh'), or use 'inhibit unlock' to \
                     clear an existing hint."
                        .to_string(),
                );
                let details = Some(format!("Rejected argument: {msg}"));
                (suggestion, details)
            }
            InhibitError::Io {
                action,
                path,
                source,
            } => {
                let suggestion = match source.kind() {
                    io::ErrorKind::PermissionDenied => {
                        if cfg!(unix) {
                            Some(
                                "Check the permissions of the inhibit directory or run with \
                                 sudo."
                                    .to_string(),
                            )
                        } else {
                            Some("Run the command as Administrator.".to_string())
                        }
                    }
                    io::ErrorKind::UnexpectedEof => Some(
                        "The hint file changed while it was being read. Another process may be \
                         bypassing the lock; retry the command."
                            .to_string(),
                    ),
                    io::ErrorKind::InvalidData => Some(
                        "The hint file does not contain valid UTF-8. Run 'inhibit unlock' to \
                         reset it."
                            .to_string(),
                    ),
                    _ => None,
                };
                let details = Some(format!(
                    "Operation '{action}' failed on {}: {source}",
                    path.display()
                ));
                (suggestion, details)
            }
            InhibitError::ConfigError(msg) => {
                let suggestion = Some(
                    "Check the config file passed via --config or INHIBIT_CONFIG, and the \
                     INHIBIT_ROOT_DIR / INHIBIT_INHIBIT_DIR environment variables."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            InhibitError::WaitTimeout { resource, .. } => {
                let suggestion = Some(format!(
                    "'{resource}' is still inhibited. Increase --timeout or wait for the \
                     holding operation to finish."
                ));
                (suggestion, None)
            }
            InhibitError::Json(_) => (None, None),
        };

        Self {
            error,
            suggestion,
            details,
        }
    }
}

impl fmt::Display for ErrorContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
