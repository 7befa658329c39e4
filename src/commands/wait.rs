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
use crate::locking::{PollingBackoff, WaitBudget};
use crate::store::HintStore;
use log::{debug, info};
use std::thread;
use std::time::Duration;

/// Polls `resource` until it is no longer inhibited.
///
/// Each poll is a regular shared-lock read, so a writer holding the hint file
/// delays the poll rather than failing it. Returns [`InhibitError::WaitTimeout`]
/// once `budget` is exhausted while the resource is still inhibited.
pub fn wait_until_uninhibited(
    store: &HintStore,
    resource: &str,
    budget: &WaitBudget,
    backoff: &mut PollingBackoff,
) -> Result<()> {
    let mut announced = false;
    loop {
        let hint = store.is_locked(resource)?;
        if !hint.is_inhibited() {
            debug!(
                "{resource} is not inhibited after {:.3}s",
                budget.elapsed().as_secs_f64()
            );
            return Ok(());
        }

        if !announced {
            info!("Waiting for {resource} to be released (hint: {hint})");
            announced = true;
        }

        match budget.next_sleep_interval(backoff) {
            Some(delay) => thread::sleep(delay),
            None => {
                return Err(InhibitError::WaitTimeout {
                    resource: resource.to_string(),
                    hint: hint.to_string(),
                    waited_secs: budget.elapsed().as_secs_f64(),
                });
            }
        }
    }
}

pub struct WaitCommand<'a> {
    store: &'a HintStore,
}

impl<'a> WaitCommand<'a> {
    pub fn new(store: &'a HintStore) -> Result<Self> {
        Ok(Self { store })
    }

    pub fn execute(&self, resource: &str, timeout_secs: Option<u64>) -> Result<()> {
        let budget = WaitBudget::new(timeout_secs.map(Duration::from_secs));
        let mut backoff = PollingBackoff::default();
        wait_until_uninhibited(self.store, resource, &budget, &mut backoff)?;
        println!("{resource} is not inhibited");
        Ok(())
    }
}
