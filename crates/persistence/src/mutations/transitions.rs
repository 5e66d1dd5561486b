// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transactional persistence of transition results.
//!
//! Each function writes the record change and its audit event in one
//! transaction. Either both land or neither does.

use diesel::SqliteConnection;
use diesel::prelude::*;
use labourdesk::{OfficerChange, ReturnTransition, TransitionResult};
use labourdesk_audit::AuditEvent;
use labourdesk_domain::OfficerId;
use tracing::{debug, info};

use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::mutations::officers::{delete_officer, insert_officer, set_password, update_officer};
use crate::mutations::returns::upsert_return;
use crate::mutations::sessions::delete_sessions_for_officer;

/// Persists an officer transition and its audit event.
///
/// Creating an officer requires `initial_password`. An update that leaves
/// the officer inactive also ends their sessions.
///
/// # Returns
///
/// The event ID of the persisted audit event.
///
/// # Errors
///
/// Returns `MissingInitialPassword` for a create without a password, or any
/// error from the underlying writes. Nothing is written on error.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
    initial_password: Option<&str>,
) -> Result<i64, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        match &result.change {
            OfficerChange::Created(officer) => {
                let password: &str = initial_password.ok_or_else(|| {
                    PersistenceError::MissingInitialPassword(officer.id.to_string())
                })?;
                insert_officer(conn, officer, password)?;
            }
            OfficerChange::Updated { before, after } => {
                update_officer(conn, after)?;
                if before.is_active() && !after.is_active() {
                    delete_sessions_for_officer(conn, after.id.value())?;
                }
            }
            OfficerChange::Deleted(officer) => {
                delete_officer(conn, &officer.id)?;
            }
        }

        let event_id: i64 = persist_audit_event(conn, &result.audit_event)?;
        info!(
            event_id,
            officer_id = %result.change.officer().id,
            action = %result.audit_event.action.name,
            "Persisted officer transition"
        );
        Ok(event_id)
    })
}

/// Persists a return transition and its audit event.
///
/// # Returns
///
/// `(return_id, event_id)`.
///
/// # Errors
///
/// Returns `ReturnLocked` if the stored return was sealed in the meantime,
/// or any error from the underlying writes.
pub fn persist_return(
    conn: &mut SqliteConnection,
    transition: &ReturnTransition,
) -> Result<(i64, i64), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let return_id: i64 = upsert_return(conn, &transition.record)?;
        let event_id: i64 = persist_audit_event(conn, &transition.audit_event)?;
        debug!(return_id, event_id, "Persisted return transition");
        Ok((return_id, event_id))
    })
}

/// Replaces an officer's password, ends all of their sessions, and records
/// the audit event.
///
/// Used both for a self-service change (`must_change_password = false`) and
/// for an administrator reset (`true`).
///
/// # Returns
///
/// The event ID of the persisted audit event.
///
/// # Errors
///
/// Returns `OfficerNotFound` if the officer does not exist, or any error
/// from the underlying writes.
pub fn persist_password_change(
    conn: &mut SqliteConnection,
    officer_id: &OfficerId,
    new_password: &str,
    must_change_password: bool,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        set_password(conn, officer_id, new_password, must_change_password)?;
        let ended: usize = delete_sessions_for_officer(conn, officer_id.value())?;
        let event_id: i64 = persist_audit_event(conn, event)?;
        info!(
            event_id,
            sessions_ended = ended,
            "Password changed for officer {}", officer_id
        );
        Ok(event_id)
    })
}
