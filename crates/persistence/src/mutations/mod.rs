// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! ## Module Organization
//!
//! - `officers`: Officer row writes and password hashing
//! - `sessions`: Session lifecycle
//! - `returns`: Monthly return writes
//! - `audit`: Audit event persistence
//! - `transitions`: Transactional orchestration (`persist_transition`,
//!   `persist_return`, `persist_password_change`)

pub mod audit;
pub mod officers;
pub mod returns;
pub mod sessions;
pub mod transitions;

use time::OffsetDateTime;
use time::format_description::well_known::Iso8601;

use crate::error::PersistenceError;

/// The current UTC time as a fixed-width ISO 8601 string.
///
/// Stored timestamps share this format, so they order lexicographically.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn now_iso8601() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&Iso8601::DEFAULT)
        .map_err(|e| PersistenceError::Other(format!("Failed to format timestamp: {e}")))
}

/// Hashes a plain-text password with bcrypt.
///
/// # Errors
///
/// Returns an error if hashing fails.
pub fn hash_password(password: &str) -> Result<String, PersistenceError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))
}
