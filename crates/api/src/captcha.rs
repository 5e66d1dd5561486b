// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Login CAPTCHA challenges.
//!
//! The [`CaptchaStore`] keeps issued challenges in a bounded queue, oldest
//! first. A challenge is answered at most once: verification removes it
//! whether or not the answer matched. Entries expire after a fixed lifetime
//! and the oldest entries are evicted once the store is full.
//!
//! Challenges fetched through [`CaptchaStore::issue_for`] are tagged with the
//! requesting client's address. A single client holds at most
//! [`DEFAULT_PER_CLIENT_LIMIT`] outstanding challenges and past that point
//! replaces its own oldest one, so it cannot push other clients' challenges
//! out of the queue. Many distinct addresses can still fill the store; the
//! global eviction then applies.

use serde::Serialize;
use std::collections::VecDeque;
use std::net::IpAddr;
use std::time::{Duration, Instant};

/// Characters a challenge is drawn from. Look-alikes such as `0/O` and `1/I`
/// are left out.
const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Number of characters in a challenge.
pub const CAPTCHA_LENGTH: usize = 6;

/// How long an issued challenge stays answerable.
pub const CAPTCHA_TTL: Duration = Duration::from_secs(5 * 60);

/// Default number of outstanding challenges kept.
pub const DEFAULT_CAPTCHA_CAPACITY: usize = 1024;

/// Default number of outstanding challenges a single client may hold.
pub const DEFAULT_PER_CLIENT_LIMIT: usize = 8;

/// A challenge as handed to the login form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptchaChallenge {
    pub captcha_id: String,
    pub challenge: String,
}

struct PendingCaptcha {
    id: String,
    answer: String,
    issued_at: Instant,
    client: Option<IpAddr>,
}

/// Bounded store of outstanding CAPTCHA challenges.
pub struct CaptchaStore {
    pending: VecDeque<PendingCaptcha>,
    capacity: usize,
    per_client: usize,
    ttl: Duration,
}

impl Default for CaptchaStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPTCHA_CAPACITY, CAPTCHA_TTL)
    }
}

impl CaptchaStore {
    /// Creates an empty store. A capacity of zero is treated as one.
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            pending: VecDeque::new(),
            capacity: capacity.max(1),
            per_client: DEFAULT_PER_CLIENT_LIMIT,
            ttl,
        }
    }

    /// Sets how many outstanding challenges one client may hold. Zero is
    /// treated as one.
    #[must_use]
    pub fn with_per_client_limit(mut self, limit: usize) -> Self {
        self.per_client = limit.max(1);
        self
    }

    /// Issues a fresh challenge not tied to any client.
    pub fn issue(&mut self) -> CaptchaChallenge {
        self.purge_expired();
        self.push_challenge(None)
    }

    /// Issues a fresh challenge on behalf of `client`, first dropping that
    /// client's oldest challenges if it is at its limit.
    pub fn issue_for(&mut self, client: IpAddr) -> CaptchaChallenge {
        self.purge_expired();
        loop {
            let mut owned = self
                .pending
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.client == Some(client));
            let Some((oldest, _)) = owned.next() else {
                break;
            };
            if owned.count() + 1 < self.per_client {
                break;
            }
            self.pending.remove(oldest);
        }
        self.push_challenge(Some(client))
    }

    fn push_challenge(&mut self, client: Option<IpAddr>) -> CaptchaChallenge {
        while self.pending.len() >= self.capacity {
            self.pending.pop_front();
        }

        let challenge: String = (0..CAPTCHA_LENGTH)
            .map(|_| char::from(ALPHABET[rand::random_range(0..ALPHABET.len())]))
            .collect();
        let id: String = format!("captcha_{:016x}", rand::random::<u64>());

        self.pending.push_back(PendingCaptcha {
            id: id.clone(),
            answer: challenge.clone(),
            issued_at: Instant::now(),
            client,
        });

        CaptchaChallenge {
            captcha_id: id,
            challenge,
        }
    }

    /// Checks an answer and consumes the challenge.
    ///
    /// Returns `false` for unknown or expired ids and for wrong answers. The
    /// comparison is exact.
    pub fn verify(&mut self, captcha_id: &str, answer: &str) -> bool {
        self.purge_expired();
        let Some(position) = self.pending.iter().position(|entry| entry.id == captcha_id) else {
            return false;
        };
        self.pending
            .remove(position)
            .is_some_and(|entry| entry.answer == answer)
    }

    /// Number of outstanding challenges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn purge_expired(&mut self) {
        let ttl: Duration = self.ttl;
        self.pending.retain(|entry| entry.issued_at.elapsed() < ttl);
    }
}
