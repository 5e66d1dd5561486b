// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Officer queries.

use std::sync::OnceLock;

use diesel::SqliteConnection;
use diesel::prelude::*;
use labourdesk_domain::{Jurisdiction, Officer, OfficerId, OfficerStatus, Role, Username};
use tracing::debug;

use crate::data_models::OfficerData;
use crate::diesel_schema::officers;
use crate::error::PersistenceError;
use crate::mutations::hash_password;

/// Diesel Queryable struct for officer rows, minus the password hash.
#[derive(Queryable, Selectable)]
#[diesel(table_name = officers)]
struct OfficerRow {
    officer_id: String,
    username: String,
    name: String,
    role: String,
    mobile: String,
    email: String,
    district: String,
    division: Option<String>,
    circle: Option<String>,
    location: Option<String>,
    superior_id: Option<String>,
    status: String,
    must_change_password: i32,
    created_at: String,
    last_login_at: Option<String>,
}

impl OfficerRow {
    fn into_data(self) -> Result<OfficerData, PersistenceError> {
        let role: Role = self.role.parse().map_err(|e| {
            PersistenceError::ReconstructionError(format!(
                "Officer {} has an invalid role: {e}",
                self.officer_id
            ))
        })?;
        let status: OfficerStatus = self.status.parse().map_err(|e| {
            PersistenceError::ReconstructionError(format!(
                "Officer {} has an invalid status: {e}",
                self.officer_id
            ))
        })?;

        Ok(OfficerData {
            officer: Officer {
                id: OfficerId::new(self.officer_id),
                username: Username::new(&self.username),
                name: self.name,
                role,
                mobile: self.mobile,
                email: self.email,
                jurisdiction: Jurisdiction {
                    district: self.district,
                    division: self.division,
                    circle: self.circle,
                    location: self.location,
                },
                superior_id: self.superior_id.map(OfficerId::new),
                status,
                must_change_password: self.must_change_password != 0,
            },
            created_at: self.created_at,
            last_login_at: self.last_login_at,
        })
    }
}

/// Retrieves an officer by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the row cannot be
/// reconstructed. Returns `Ok(None)` if the officer is not found.
pub fn get_officer_by_id(
    conn: &mut SqliteConnection,
    officer_id: &OfficerId,
) -> Result<Option<OfficerData>, PersistenceError> {
    debug!("Looking up officer by ID: {}", officer_id);

    let result: Result<OfficerRow, diesel::result::Error> = officers::table
        .filter(officers::officer_id.eq(officer_id.value()))
        .select(OfficerRow::as_select())
        .first(conn);

    match result {
        Ok(row) => row.into_data().map(Some),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves an officer by username.
///
/// Usernames are stored lowercase, so the normalized `Username` matches
/// directly.
///
/// # Errors
///
/// Returns an error if the database query fails or the row cannot be
/// reconstructed. Returns `Ok(None)` if the officer is not found.
pub fn get_officer_by_username(
    conn: &mut SqliteConnection,
    username: &Username,
) -> Result<Option<OfficerData>, PersistenceError> {
    debug!("Looking up officer by username: {}", username);

    let result: Result<OfficerRow, diesel::result::Error> = officers::table
        .filter(officers::username.eq(username.value()))
        .select(OfficerRow::as_select())
        .first(conn);

    match result {
        Ok(row) => row.into_data().map(Some),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists all officers, ordered by username.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be
/// reconstructed.
pub fn list_officers(conn: &mut SqliteConnection) -> Result<Vec<OfficerData>, PersistenceError> {
    debug!("Listing all officers");

    let rows: Vec<OfficerRow> = officers::table
        .select(OfficerRow::as_select())
        .order(officers::username.asc())
        .load(conn)?;

    rows.into_iter().map(OfficerRow::into_data).collect()
}

/// Counts all officers.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_officers(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(officers::table.count().get_result(conn)?)
}

/// Retrieves the stored bcrypt hash for an officer.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the officer is not found.
pub fn get_password_hash(
    conn: &mut SqliteConnection,
    officer_id: &OfficerId,
) -> Result<Option<String>, PersistenceError> {
    let result: Result<String, diesel::result::Error> = officers::table
        .filter(officers::officer_id.eq(officer_id.value()))
        .select(officers::password_hash)
        .first(conn);

    match result {
        Ok(hash) => Ok(Some(hash)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Verifies a password against a bcrypt hash.
///
/// # Errors
///
/// Returns an error if the hash is malformed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| PersistenceError::Other(format!("Failed to verify password: {e}")))
}

/// Spends one bcrypt verification on a password with no account behind it.
///
/// Keeps a refusal for an unknown username as slow as one for a wrong
/// password. Always returns `Ok(false)`. The hash is built on first use.
///
/// # Errors
///
/// Returns an error if the placeholder hash cannot be built.
pub fn verify_without_account(password: &str) -> Result<bool, PersistenceError> {
    static PLACEHOLDER_HASH: OnceLock<Option<String>> = OnceLock::new();

    let hash: &str = PLACEHOLDER_HASH
        .get_or_init(|| hash_password("labourdesk-no-such-officer").ok())
        .as_deref()
        .ok_or_else(|| {
            PersistenceError::Other(String::from("Failed to build placeholder hash"))
        })?;
    verify_password(password, hash)?;
    Ok(false)
}
