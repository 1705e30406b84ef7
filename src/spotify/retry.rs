// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Rate-limit retry policy.
//!
//! When the catalog answers 429 the fetcher rotates to the next credential
//! pair in the [`CredentialPool`], re-authenticates, waits for the delay given
//! by [`RetryPolicy::delay_for`], and tries again. After
//! [`RetryPolicy::max_attempts`] attempts the rate-limit error is returned to
//! the caller.

use std::{thread, time::Duration};

use serde::{Deserialize, Serialize};

use crate::spotify::Credentials;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct RetryPolicy {
    /// Total attempts per request, including the first.
    pub(crate) max_attempts: u32,
    pub(crate) base_delay_ms: u64,
    pub(crate) max_delay_ms: u64,
    /// Up to this fraction of the delay is added at random.
    pub(crate) jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 500,
            max_delay_ms: 8_000,
            jitter: 0.2,
        }
    }
}

impl RetryPolicy {
    /// The wait before retry number `retry` (1-based).
    ///
    /// Doubles from the base delay, is never shorter than an upstream
    /// `Retry-After`, and never longer than the maximum delay.
    pub(crate) fn delay_for(&self, retry: u32, retry_after: Option<Duration>) -> Duration {
        let exponent = retry.saturating_sub(1).min(16);
        let backoff = self.base_delay_ms.saturating_mul(1u64 << exponent);

        let jitter = if self.jitter > 0.0 {
            (backoff as f64 * self.jitter * rand::random::<f64>()) as u64
        } else {
            0
        };

        let mut delay = Duration::from_millis(backoff.saturating_add(jitter));
        if let Some(retry_after) = retry_after {
            delay = delay.max(retry_after);
        }

        delay.min(Duration::from_millis(self.max_delay_ms))
    }

    pub(crate) fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Credential pairs used round-robin.
#[derive(Debug, Clone)]
pub(crate) struct CredentialPool {
    credentials: Vec<Credentials>,
    current: usize,
}

impl CredentialPool {
    pub(crate) fn new(credentials: Vec<Credentials>) -> Self {
        Self {
            credentials,
            current: 0,
        }
    }

    pub(crate) fn current(&self) -> Option<&Credentials> {
        self.credentials.get(self.current)
    }

    /// Advances to the next pair. Returns `false` if there is nothing to
    /// rotate to.
    pub(crate) fn rotate(&mut self) -> bool {
        if self.credentials.len() < 2 {
            return false;
        }
        self.current = (self.current + 1) % self.credentials.len();
        true
    }
}

/// Waits between attempts.
pub(crate) trait Sleeper {
    fn sleep(&self, duration: Duration);
}

pub(crate) struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_jitter() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 4,
            base_delay_ms: 100,
            max_delay_ms: 1_000,
            jitter: 0.0,
        }
    }

    #[test]
    fn delay_doubles_per_retry() {
        let policy = no_jitter();

        assert_eq!(policy.delay_for(1, None), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2, None), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3, None), Duration::from_millis(400));
    }

    #[test]
    fn delay_is_capped() {
        let policy = no_jitter();

        assert_eq!(policy.delay_for(10, None), Duration::from_millis(1_000));
        assert_eq!(policy.delay_for(u32::MAX, None), Duration::from_millis(1_000));
    }

    #[test]
    fn retry_after_extends_delay_up_to_cap() {
        let policy = no_jitter();

        assert_eq!(
            policy.delay_for(1, Some(Duration::from_millis(700))),
            Duration::from_millis(700)
        );
        assert_eq!(
            policy.delay_for(1, Some(Duration::from_secs(30))),
            Duration::from_millis(1_000)
        );
    }

    #[test]
    fn jitter_stays_within_fraction() {
        let policy = RetryPolicy {
            jitter: 0.5,
            ..no_jitter()
        };

        for _ in 0..50 {
            let delay = policy.delay_for(1, None);
            assert!(delay >= Duration::from_millis(100));
            assert!(delay <= Duration::from_millis(150));
        }
    }

    #[test]
    fn pool_rotates_round_robin() {
        let mut pool =
            CredentialPool::new(vec![Credentials::new("a", "1"), Credentials::new("b", "2")]);

        assert_eq!(pool.current().map(|c| c.client_id.as_str()), Some("a"));
        assert!(pool.rotate());
        assert_eq!(pool.current().map(|c| c.client_id.as_str()), Some("b"));
        assert!(pool.rotate());
        assert_eq!(pool.current().map(|c| c.client_id.as_str()), Some("a"));
    }

    #[test]
    fn single_pair_does_not_rotate() {
        let mut pool = CredentialPool::new(vec![Credentials::new("a", "1")]);

        assert!(!pool.rotate());
        assert_eq!(pool.current().map(|c| c.client_id.as_str()), Some("a"));
    }
}
