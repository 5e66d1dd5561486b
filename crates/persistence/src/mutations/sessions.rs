// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::sessions;
use crate::error::PersistenceError;
use crate::mutations::now_iso8601;

/// Creates a new session for an officer.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The unique session token
/// * `officer_id` - The officer ID
/// * `expires_at` - The expiration timestamp (ISO 8601 format)
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    officer_id: &str,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    debug!(
        "Creating session for officer {} with expiration: {}",
        officer_id, expires_at
    );

    let now: String = now_iso8601()?;
    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::officer_id.eq(officer_id),
            sessions::created_at.eq(&now),
            sessions::last_activity_at.eq(&now),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let session_id: i64 = get_last_insert_rowid(conn)?;
    debug!(session_id, officer_id, "Session created");
    Ok(session_id)
}

/// Updates the last activity timestamp for a session.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_session_activity(
    conn: &mut SqliteConnection,
    session_id: i64,
) -> Result<(), PersistenceError> {
    let now: String = now_iso8601()?;
    diesel::update(sessions::table)
        .filter(sessions::session_id.eq(session_id))
        .set(sessions::last_activity_at.eq(&now))
        .execute(conn)?;
    Ok(())
}

/// Deletes a session by token. Used for logout.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<usize, PersistenceError> {
    debug!("Deleting session by token");

    Ok(diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?)
}

/// Deletes all sessions whose expiry is before `now`.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(
    conn: &mut SqliteConnection,
    now: &str,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(sessions::expires_at.lt(now))
        .execute(conn)?;

    if rows_affected > 0 {
        info!("Deleted {} expired sessions", rows_affected);
    }
    Ok(rows_affected)
}

/// Deletes every session held by an officer.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_sessions_for_officer(
    conn: &mut SqliteConnection,
    officer_id: &str,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(sessions::officer_id.eq(officer_id))
        .execute(conn)?;

    info!(
        "Deleted {} sessions for officer {}",
        rows_affected, officer_id
    );
    Ok(rows_affected)
}
