// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bearer token cache.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    issued_at: DateTime<Utc>,
}

/// Caches the bearer token together with the time it was issued.
///
/// The cloud does not report an expiry. Like the official app, the token is
/// treated as stale once it is older than `lifetime`.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use intex_spa::protocol::TokenCache;
///
/// let cache = TokenCache::new(Duration::hours(1));
/// let now = Utc::now();
/// cache.store("abc".to_string(), now);
///
/// assert_eq!(cache.valid_token(now + Duration::minutes(30)), Some("abc".to_string()));
/// assert_eq!(cache.valid_token(now + Duration::minutes(61)), None);
/// ```
#[derive(Debug)]
pub struct TokenCache {
    lifetime: Duration,
    current: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            current: Mutex::new(None),
        }
    }

    /// Returns the cached token if it is not older than the lifetime at `now`.
    #[must_use]
    pub fn valid_token(&self, now: DateTime<Utc>) -> Option<String> {
        let current = self.current.lock();
        current
            .as_ref()
            .filter(|cached| now - cached.issued_at <= self.lifetime)
            .map(|cached| cached.token.clone())
    }

    /// Stores a freshly issued token.
    pub fn store(&self, token: String, issued_at: DateTime<Utc>) {
        *self.current.lock() = Some(CachedToken { token, issued_at });
    }

    /// Drops the cached token so the next call authenticates again.
    pub fn invalidate(&self) {
        *self.current.lock() = None;
    }
}
