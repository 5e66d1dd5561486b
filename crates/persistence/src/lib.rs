// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for labourdesk.
//!
//! Stores officers, sessions, monthly returns and audit events in `SQLite`
//! through Diesel. Migrations are embedded and applied on open.
//!
//! ## Storage Model
//!
//! - `officers`: the directory. The reporting line is a self-referencing
//!   foreign key with `ON DELETE RESTRICT`.
//! - `sessions`: bearer sessions, cascaded away with their officer
//! - `monthly_returns`: one row per officer and month, sections as JSON
//! - `audit_events`: append-only trail with copied actor identity
//!
//! ## Testing
//!
//! `Persistence::new_in_memory` gives every caller its own shared-cache
//! in-memory database, so tests are isolated without touching disk.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use labourdesk::{Directory, ReturnTransition, TransitionResult};
use labourdesk_audit::AuditEvent;
use labourdesk_domain::{MonthlyReturn, Officer, OfficerId, ReportingPeriod, Username};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{OfficerData, SessionData};
pub use error::PersistenceError;
pub use mutations::now_iso8601;

/// Type alias kept for callers that name the backend explicitly.
pub type SqlitePersistence = Persistence;

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Persists an officer transition and its audit event atomically.
    ///
    /// # Arguments
    ///
    /// * `result` - The transition result to persist
    /// * `initial_password` - Required when the transition creates an officer
    ///
    /// # Returns
    ///
    /// The event ID of the persisted audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails. Nothing is written on error.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
        initial_password: Option<&str>,
    ) -> Result<i64, PersistenceError> {
        mutations::transitions::persist_transition(&mut self.conn, result, initial_password)
    }

    /// Persists a return write and its audit event atomically.
    ///
    /// # Returns
    ///
    /// `(return_id, event_id)`.
    ///
    /// # Errors
    ///
    /// Returns `ReturnLocked` if the stored return is sealed, or an error if
    /// persistence fails.
    pub fn persist_return(
        &mut self,
        transition: &ReturnTransition,
    ) -> Result<(i64, i64), PersistenceError> {
        mutations::transitions::persist_return(&mut self.conn, transition)
    }

    /// Replaces a password, ends the officer's sessions, and records the
    /// event atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the officer does not exist or persistence fails.
    pub fn persist_password_change(
        &mut self,
        officer_id: &OfficerId,
        new_password: &str,
        must_change_password: bool,
        event: &AuditEvent,
    ) -> Result<i64, PersistenceError> {
        mutations::transitions::persist_password_change(
            &mut self.conn,
            officer_id,
            new_password,
            must_change_password,
            event,
        )
    }

    /// Persists a standalone audit event (login, logout).
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::audit::persist_audit_event(&mut self.conn, event)
    }

    // ========================================================================
    // Audit Event Queries
    // ========================================================================

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found or cannot be deserialized.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// Lists the most recent audit events, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_audit_events(&mut self, limit: i64) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::list_audit_events(&mut self.conn, limit)
    }

    /// Lists the events recorded against one subject, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_audit_events_for_subject(
        &mut self,
        subject: &str,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::list_audit_events_for_subject(&mut self.conn, subject)
    }

    // ========================================================================
    // Officers
    // ========================================================================

    /// Loads the whole directory as the explicit state store, including which
    /// officers have sealed returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn load_directory(&mut self) -> Result<Directory, PersistenceError> {
        let officers: Vec<Officer> = queries::officers::list_officers(&mut self.conn)?
            .into_iter()
            .map(|data| data.officer)
            .collect();
        let sealed_filers: BTreeSet<OfficerId> =
            queries::returns::list_sealed_filers(&mut self.conn)?;
        Ok(Directory::from_officers(officers).with_sealed_filers(sealed_filers))
    }

    /// Lists all officers with their bookkeeping columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_officers(&mut self) -> Result<Vec<OfficerData>, PersistenceError> {
        queries::officers::list_officers(&mut self.conn)
    }

    /// Retrieves an officer by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_officer_by_id(
        &mut self,
        officer_id: &OfficerId,
    ) -> Result<Option<OfficerData>, PersistenceError> {
        queries::officers::get_officer_by_id(&mut self.conn, officer_id)
    }

    /// Retrieves an officer by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_officer_by_username(
        &mut self,
        username: &Username,
    ) -> Result<Option<OfficerData>, PersistenceError> {
        queries::officers::get_officer_by_username(&mut self.conn, username)
    }

    /// Counts all officers.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_officers(&mut self) -> Result<i64, PersistenceError> {
        queries::officers::count_officers(&mut self.conn)
    }

    /// Checks a password against an officer's stored hash.
    ///
    /// Returns `Ok(false)` for an unknown officer, after the same bcrypt work
    /// a known one costs.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored hash is malformed.
    pub fn verify_officer_password(
        &mut self,
        officer_id: &OfficerId,
        password: &str,
    ) -> Result<bool, PersistenceError> {
        match queries::officers::get_password_hash(&mut self.conn, officer_id)? {
            Some(hash) => queries::officers::verify_password(password, &hash),
            None => queries::officers::verify_without_account(password),
        }
    }

    /// Runs a password check that can never succeed, for login attempts
    /// naming no known officer.
    ///
    /// # Errors
    ///
    /// Returns an error if the placeholder hash cannot be built.
    pub fn verify_password_without_account(password: &str) -> Result<bool, PersistenceError> {
        queries::officers::verify_without_account(password)
    }

    /// Records a successful login.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_last_login(&mut self, officer_id: &OfficerId) -> Result<(), PersistenceError> {
        mutations::officers::update_last_login(&mut self.conn, officer_id)
    }

    // ========================================================================
    // Session Management
    // ========================================================================

    /// Creates a new session for an officer.
    ///
    /// # Arguments
    ///
    /// * `session_token` - The unique session token
    /// * `officer_id` - The officer ID
    /// * `expires_at` - The expiration timestamp (ISO 8601 format)
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        officer_id: &OfficerId,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::sessions::create_session(
            &mut self.conn,
            session_token,
            officer_id.value(),
            expires_at,
        )
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::sessions::get_session_by_token(&mut self.conn, session_token)
    }

    /// Counts the sessions an officer holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_sessions_for_officer(
        &mut self,
        officer_id: &OfficerId,
    ) -> Result<i64, PersistenceError> {
        queries::sessions::count_sessions_for_officer(&mut self.conn, officer_id.value())
    }

    /// Updates the last activity timestamp for a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::sessions::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<usize, PersistenceError> {
        mutations::sessions::delete_session(&mut self.conn, session_token)
    }

    /// Deletes every session that expired before `now` (ISO 8601).
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        mutations::sessions::delete_expired_sessions(&mut self.conn, now)
    }

    // ========================================================================
    // Monthly Returns
    // ========================================================================

    /// Retrieves one officer's return for a period.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded.
    pub fn get_return(
        &mut self,
        officer_id: &OfficerId,
        period: ReportingPeriod,
    ) -> Result<Option<MonthlyReturn>, PersistenceError> {
        queries::returns::get_return(&mut self.conn, officer_id, period)
    }

    /// Lists every return for a period.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_returns_for_period(
        &mut self,
        period: ReportingPeriod,
    ) -> Result<Vec<MonthlyReturn>, PersistenceError> {
        queries::returns::list_returns_for_period(&mut self.conn, period)
    }

    /// Lists every return whose period lies in `from..=to`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_returns_between(
        &mut self,
        from: ReportingPeriod,
        to: ReportingPeriod,
    ) -> Result<Vec<MonthlyReturn>, PersistenceError> {
        queries::returns::list_returns_between(&mut self.conn, from, to)
    }

    /// Lists all of one officer's returns, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_returns_for_officer(
        &mut self,
        officer_id: &OfficerId,
    ) -> Result<Vec<MonthlyReturn>, PersistenceError> {
        queries::returns::list_returns_for_officer(&mut self.conn, officer_id)
    }
}
