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
use log::debug;

pub struct LockCommand<'a> {
    store: &'a HintStore,
}

impl<'a> LockCommand<'a> {
    pub fn new(store: &'a HintStore) -> Result<Self> {
        Ok(Self { store })
    }

    pub fn execute(&self, resource: &str, hint: &str) -> Result<()> {
        let hint = Hint::from(hint);
        debug!(
            "Setting hint '{hint}' on {}",
            self.store.hint_file_path(resource).display()
        );
        self.store.lock_with_hint(resource, &hint)?;
        println!("Inhibited {resource} ({hint})");
        Ok(())
    }
}
