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

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Reason a resource is inhibited, stored verbatim in its lock file.
///
/// The empty hint means the resource is not inhibited. Any non-empty string is
/// accepted so callers can introduce their own reasons next to the well-known
/// ones below.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Hint(Cow<'static, str>);

impl Hint {
    pub const NOT_INHIBITED: Hint = Hint(Cow::Borrowed(""));
    /// Inhibition while a refresh of the resource is in progress.
    pub const INHIBITED_FOR_REFRESH: Hint = Hint(Cow::Borrowed("refresh"));

    pub fn new(value: impl Into<String>) -> Self {
        Hint(Cow::Owned(value.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_inhibited(&self) -> bool {
        !self.is_empty()
    }
}

impl From<&str> for Hint {
    fn from(value: &str) -> Self {
        Hint::new(value)
    }
}

impl From<String> for Hint {
    fn from(value: String) -> Self {
        Hint(Cow::Owned(value))
    }
}

impl AsRef<str> for Hint {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
