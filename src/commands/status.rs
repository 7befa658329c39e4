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
use crate::hint::Hint;
use crate::store::HintStore;
use colored::Colorize;
use serde::Serialize;

#[derive(Serialize)]
struct StatusOutput<'a> {
    resource: &'a str,
    inhibited: bool,
    hint: &'a Hint,
    path: String,
}

pub struct StatusCommand<'a> {
    store: &'a HintStore,
}

impl<'a> StatusCommand<'a> {
    pub fn new(store: &'a HintStore) -> Result<Self> {
        Ok(Self { store })
    }

    pub fn execute(&self, resource: &str, quiet: bool, json: bool) -> Result<()> {
        let hint = self.store.is_locked(resource)?;

        if json {
            let output = StatusOutput {
                resource,
                inhibited: hint.is_inhibited(),
                hint: &hint,
                path: self.store.hint_file_path(resource).display().to_string(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else if quiet {
            // Empty hint prints nothing so scripts can test the output directly
            if hint.is_inhibited() {
                println!("{hint}");
            }
        } else {
            println!("{}", render_status(resource, &hint));
        }

        Ok(())
    }
}

pub(crate) fn render_status(resource: &str, hint: &Hint) -> String {
    if hint.is_inhibited() {
        format!("{resource}: {} ({hint})", "inhibited".yellow().bold())
    } else {
        format!("{resource}: {}", "not inhibited".green())
    }
}
