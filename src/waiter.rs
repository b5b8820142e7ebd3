// Copyright 2024 Dmitry Tantsur <divius.inside@gmail.com>
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

//! Waiters.

use std::cmp;
use std::thread;
use std::time::{Duration, Instant};

/// Trait for something that can be polled until it reaches a final state.
///
/// Polling is blocking: every `wait*` call sleeps in the calling thread
/// between polls and never polls again after `poll` returned a result or an
/// error.
pub trait Waiter<T, E>: Sized {
    /// Default timeout for this action, `None` to wait forever.
    fn default_wait_timeout(&self) -> Option<Duration>;

    /// Default delay between two polls.
    fn default_delay(&self) -> Duration;

    /// Error to return on timeout.
    fn timeout_error(&self) -> E;

    /// Poll once, returning `Ok(None)` if the action is not finished yet.
    fn poll(&mut self) -> Result<Option<T>, E>;

    /// Delay to use after the provided one.
    ///
    /// Defaults to a constant delay.
    fn next_delay(&self, previous: Duration) -> Duration {
        previous
    }

    /// Wait for the default amount of time.
    fn wait(self) -> Result<T, E> {
        match self.default_wait_timeout() {
            Some(timeout) => self.wait_for(timeout),
            None => self.wait_forever(),
        }
    }

    /// Wait for the given amount of time.
    fn wait_for(self, duration: Duration) -> Result<T, E> {
        let delay = self.default_delay();
        self.wait_for_with_delay(duration, delay)
    }

    /// Wait forever.
    fn wait_forever(self) -> Result<T, E> {
        let delay = self.default_delay();
        self.wait_forever_with_delay(delay)
    }

    /// Wait for the given amount of time, starting with the given delay.
    ///
    /// A duration too large to be represented as a point in time means
    /// waiting forever.
    fn wait_for_with_delay(self, duration: Duration, delay: Duration) -> Result<T, E> {
        wait_until(self, Instant::now().checked_add(duration), delay)
    }

    /// Wait forever, starting with the given delay.
    fn wait_forever_with_delay(self, delay: Duration) -> Result<T, E> {
        wait_until(self, None, delay)
    }
}

/// Current state of the waiter.
pub trait WaiterCurrentState<T> {
    /// Get the current state of the object being waited for.
    fn waiter_current_state(&self) -> &T;
}

/// Smallest delay between two polls.
const MIN_DELAY: Duration = Duration::from_millis(1);

fn wait_until<W, T, E>(mut waiter: W, deadline: Option<Instant>, delay: Duration) -> Result<T, E>
where
    W: Waiter<T, E>,
{
    let mut delay = cmp::max(delay, MIN_DELAY);
    loop {
        if let Some(result) = waiter.poll()? {
            return Ok(result);
        }

        let sleep = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return Err(waiter.timeout_error());
                }
                cmp::min(delay, deadline - now)
            }
            None => delay,
        };

        thread::sleep(sleep);
        delay = cmp::max(waiter.next_delay(delay), MIN_DELAY);
    }
}
