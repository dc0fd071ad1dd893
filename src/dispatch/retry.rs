// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounded retry policy for feedback polling.

use std::time::Duration;

/// How often and how patiently command feedback is polled.
///
/// # Examples
///
/// ```
/// use intex_spa::dispatch::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts(), 5);
/// assert_eq!(policy.delay(), Duration::from_secs(2));
///
/// let fast = RetryPolicy::immediate(3);
/// assert_eq!(fast.delay(), Duration::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Default number of poll attempts.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
    /// Default delay between poll attempts.
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

    /// Creates a policy. At least one attempt is always made.
    #[must_use]
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Creates a policy without delay between attempts.
    #[must_use]
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }

    /// Returns the maximum number of poll attempts.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the delay between poll attempts.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_attempts_become_one() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts(), 1);
    }

    #[test]
    fn custom_policy() {
        let policy = RetryPolicy::new(3, Duration::from_millis(500));
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.delay(), Duration::from_millis(500));
    }
}
