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

use std::cmp;
use std::time::{Duration, Instant};

/// Exponential backoff used while polling a hint for changes.
#[derive(Debug, Clone)]
pub struct PollingBackoff {
    factor: u32,
    cap: Duration,
    current: Duration,
}

impl PollingBackoff {
    pub fn new(initial: Duration, factor: u32, cap: Duration) -> Self {
        Self {
            factor: cmp::max(factor, 1),
            cap,
            current: initial,
        }
    }

    /// Returns the current delay and advances the backoff sequence.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        let next = self.current.saturating_mul(self.factor);
        self.current = cmp::min(next, self.cap);
        delay
    }
}

impl Default for PollingBackoff {
    fn default() -> Self {
        Self::new(Duration::from_millis(10), 2, Duration::from_secs(1))
    }
}

/// Tracks elapsed and remaining time for an optional wait deadline.
#[derive(Debug, Clone)]
pub struct WaitBudget {
    limit: Option<Duration>,
    started_at: Instant,
}

impl WaitBudget {
    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            limit,
            started_at: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.limit
            .map(|limit| limit.saturating_sub(self.elapsed()))
    }

    /// Next sleep interval clamped to the remaining budget, or `None` once
    /// the budget is exhausted.
    pub fn next_sleep_interval(&self, backoff: &mut PollingBackoff) -> Option<Duration> {
        let mut delay = backoff.next_delay();
        if let Some(remaining) = self.remaining() {
            if remaining < delay {
                delay = remaining;
            }
            if delay.is_zero() {
                return None;
            }
        }
        Some(delay)
    }
}
