// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::SessionData;
use crate::diesel_schema::sessions;
use crate::error::PersistenceError;

/// Diesel Queryable struct for session rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = sessions)]
struct SessionRow {
    session_id: i64,
    session_token: String,
    officer_id: String,
    created_at: String,
    last_activity_at: String,
    expires_at: String,
}

/// Retrieves a session by token.
///
/// Expiry is not checked here; callers compare `expires_at` themselves.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the session is not found.
pub fn get_session_by_token(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    debug!("Looking up session by token");

    let result: Result<SessionRow, diesel::result::Error> = sessions::table
        .filter(sessions::session_token.eq(session_token))
        .select(SessionRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(SessionData {
            session_id: row.session_id,
            session_token: row.session_token,
            officer_id: row.officer_id,
            created_at: row.created_at,
            last_activity_at: row.last_activity_at,
            expires_at: row.expires_at,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Counts the sessions held by an officer.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_sessions_for_officer(
    conn: &mut SqliteConnection,
    officer_id: &str,
) -> Result<i64, PersistenceError> {
    Ok(sessions::table
        .filter(sessions::officer_id.eq(officer_id))
        .count()
        .get_result(conn)?)
}
