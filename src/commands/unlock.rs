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
use crate::store::HintStore;

pub struct UnlockCommand<'a> {
    store: &'a HintStore,
}

impl<'a> UnlockCommand<'a> {
    pub fn new(store: &'a HintStore) -> Result<Self> {
        Ok(Self { store })
    }

    pub fn execute(&self, resource: &str) -> Result<()> {
        self.store.unlock(resource)?;
        println!("Cleared inhibition of {resource}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hint::Hint;
    use tempfile::TempDir;

    #[test]
    fn execute_clears_hint() {
        let temp = TempDir::new().unwrap();
        let store = HintStore::for_root(temp.path());
        store
            .lock_with_hint("firefox", &Hint::INHIBITED_FOR_REFRESH)
            .unwrap();

        UnlockCommand::new(&store)
            .unwrap()
            .execute("firefox")
            .unwrap();

        assert_eq!(store.is_locked("firefox").unwrap(), Hint::NOT_INHIBITED);
    }
}
