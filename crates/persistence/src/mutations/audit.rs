// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event persistence.

use diesel::SqliteConnection;
use diesel::prelude::*;
use labourdesk_audit::AuditEvent;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;
use crate::mutations::now_iso8601;

/// Persists an audit event.
///
/// The actor's officer identity is copied into plain columns, so the row
/// stays readable after that officer is deleted.
///
/// # Returns
///
/// The event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let actor_json: String = serde_json::to_string(&ActorData {
        id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
    })?;
    let cause_json: String = serde_json::to_string(&CauseData {
        id: event.cause.id.clone(),
        description: event.cause.description.clone(),
    })?;
    let action_json: String = serde_json::to_string(&ActionData {
        name: event.action.name.clone(),
        details: event.action.details.clone(),
    })?;
    let before_json: String = serde_json::to_string(&StateSnapshotData {
        data: event.before.data.clone(),
    })?;
    let after_json: String = serde_json::to_string(&StateSnapshotData {
        data: event.after.data.clone(),
    })?;
    let created_at: String = now_iso8601()?;

    diesel::insert_into(audit_events::table)
        .values((
            audit_events::actor_officer_id.eq(event.actor.officer_id.as_deref()),
            audit_events::actor_username.eq(event.actor.username.as_deref()),
            audit_events::actor_name.eq(event.actor.name.as_deref()),
            audit_events::actor_json.eq(&actor_json),
            audit_events::cause_json.eq(&cause_json),
            audit_events::action_json.eq(&action_json),
            audit_events::before_snapshot_json.eq(&before_json),
            audit_events::after_snapshot_json.eq(&after_json),
            audit_events::subject.eq(event.subject.as_deref()),
            audit_events::created_at.eq(&created_at),
        ))
        .execute(conn)?;

    let event_id: i64 = get_last_insert_rowid(conn)?;
    debug!(event_id, action = %event.action.name, "Persisted audit event");
    Ok(event_id)
}
