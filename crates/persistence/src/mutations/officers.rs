// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Officer row mutations.
//!
//! These write exactly what they are given. Hierarchy and uniqueness rules
//! have already been checked by the core transitions.

use diesel::SqliteConnection;
use diesel::prelude::*;
use labourdesk_domain::{Officer, OfficerId, ReturnStatus};
use tracing::{debug, info};

use crate::diesel_schema::{monthly_returns, officers};
use crate::error::PersistenceError;
use crate::mutations::{hash_password, now_iso8601};

/// Inserts a new officer with a freshly hashed password.
///
/// # Errors
///
/// Returns an error if hashing fails or the insert violates a constraint
/// (duplicate id or username, dangling superior).
pub fn insert_officer(
    conn: &mut SqliteConnection,
    officer: &Officer,
    password: &str,
) -> Result<(), PersistenceError> {
    info!(
        "Creating officer {} ({}) as {}",
        officer.id, officer.username, officer.role
    );

    let password_hash: String = hash_password(password)?;
    let created_at: String = now_iso8601()?;

    diesel::insert_into(officers::table)
        .values((
            officers::officer_id.eq(officer.id.value()),
            officers::username.eq(officer.username.value()),
            officers::password_hash.eq(&password_hash),
            officers::name.eq(&officer.name),
            officers::role.eq(officer.role.as_str()),
            officers::mobile.eq(&officer.mobile),
            officers::email.eq(&officer.email),
            officers::district.eq(&officer.jurisdiction.district),
            officers::division.eq(officer.jurisdiction.division.as_deref()),
            officers::circle.eq(officer.jurisdiction.circle.as_deref()),
            officers::location.eq(officer.jurisdiction.location.as_deref()),
            officers::superior_id.eq(officer.superior_id.as_ref().map(OfficerId::value)),
            officers::status.eq(officer.status.as_str()),
            officers::must_change_password.eq(i32::from(officer.must_change_password)),
            officers::created_at.eq(&created_at),
        ))
        .execute(conn)?;

    Ok(())
}

/// Overwrites an officer's profile, status and password flag.
///
/// # Errors
///
/// Returns `OfficerNotFound` if no row matched, or an error if the update
/// fails.
pub fn update_officer(
    conn: &mut SqliteConnection,
    officer: &Officer,
) -> Result<(), PersistenceError> {
    debug!("Updating officer {}", officer.id);

    let rows_affected: usize = diesel::update(officers::table)
        .filter(officers::officer_id.eq(officer.id.value()))
        .set((
            officers::username.eq(officer.username.value()),
            officers::name.eq(&officer.name),
            officers::role.eq(officer.role.as_str()),
            officers::mobile.eq(&officer.mobile),
            officers::email.eq(&officer.email),
            officers::district.eq(&officer.jurisdiction.district),
            officers::division.eq(officer.jurisdiction.division.as_deref()),
            officers::circle.eq(officer.jurisdiction.circle.as_deref()),
            officers::location.eq(officer.jurisdiction.location.as_deref()),
            officers::superior_id.eq(officer.superior_id.as_ref().map(OfficerId::value)),
            officers::status.eq(officer.status.as_str()),
            officers::must_change_password.eq(i32::from(officer.must_change_password)),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::OfficerNotFound(officer.id.to_string()));
    }
    Ok(())
}

/// Deletes an officer along with their draft returns. Sessions cascade.
///
/// # Errors
///
/// Returns `OfficerNotFound` if no row matched, or an error if the delete
/// fails (for example because officers still report to this one, or a
/// sealed return still references it).
pub fn delete_officer(
    conn: &mut SqliteConnection,
    officer_id: &OfficerId,
) -> Result<(), PersistenceError> {
    info!("Deleting officer {}", officer_id);

    let drafts: usize = diesel::delete(monthly_returns::table)
        .filter(monthly_returns::officer_id.eq(officer_id.value()))
        .filter(monthly_returns::status.eq(ReturnStatus::Draft.as_str()))
        .execute(conn)?;
    debug!(drafts, "Removed draft returns of deleted officer");

    let rows_affected: usize = diesel::delete(officers::table)
        .filter(officers::officer_id.eq(officer_id.value()))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::OfficerNotFound(officer_id.to_string()));
    }
    Ok(())
}

/// Replaces an officer's password hash and sets the change-required flag.
///
/// # Errors
///
/// Returns `OfficerNotFound` if no row matched, or an error if hashing or
/// the update fails.
pub fn set_password(
    conn: &mut SqliteConnection,
    officer_id: &OfficerId,
    new_password: &str,
    must_change_password: bool,
) -> Result<(), PersistenceError> {
    info!("Updating password for officer {}", officer_id);

    let password_hash: String = hash_password(new_password)?;

    let rows_affected: usize = diesel::update(officers::table)
        .filter(officers::officer_id.eq(officer_id.value()))
        .set((
            officers::password_hash.eq(&password_hash),
            officers::must_change_password.eq(i32::from(must_change_password)),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::OfficerNotFound(officer_id.to_string()));
    }
    Ok(())
}

/// Records a successful login.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_last_login(
    conn: &mut SqliteConnection,
    officer_id: &OfficerId,
) -> Result<(), PersistenceError> {
    debug!("Updating last_login_at for officer {}", officer_id);

    let now: String = now_iso8601()?;
    diesel::update(officers::table)
        .filter(officers::officer_id.eq(officer_id.value()))
        .set(officers::last_login_at.eq(Some(now)))
        .execute(conn)?;

    Ok(())
}
