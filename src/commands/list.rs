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
struct ListEntry<'a> {
    resource: &'a str,
    hint: &'a Hint,
}

pub struct ListCommand<'a> {
    store: &'a HintStore,
}

impl<'a> ListCommand<'a> {
    pub fn new(store: &'a HintStore) -> Result<Self> {
        Ok(Self { store })
    }

    pub fn execute(&self, json: bool) -> Result<()> {
        let inhibited = self.store.list()?;

        if json {
            let entries: Vec<ListEntry<'_>> = inhibited
                .iter()
                .map(|(resource, hint)| ListEntry { resource, hint })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(());
        }

        if inhibited.is_empty() {
            println!(
                "No inhibited resources in {}",
                self.store.inhibit_dir().display()
            );
            return Ok(());
        }

        let width = inhibited
            .iter()
            .map(|(resource, _)| resource.len())
            .max()
            .unwrap_or(0);
        for (resource, hint) in &inhibited {
            println!("{resource:<width$}  {}", hint.as_str().yellow());
        }
        Ok(())
    }
}
