// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use labourdesk_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Diesel Queryable struct for full audit event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventRow {
    event_id: i64,
    actor_officer_id: Option<String>,
    actor_username: Option<String>,
    actor_name: Option<String>,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
    subject: Option<String>,
}

impl AuditEventRow {
    fn into_event(self) -> Result<AuditEvent, PersistenceError> {
        let actor_data: ActorData = serde_json::from_str(&self.actor_json)?;
        let cause_data: CauseData = serde_json::from_str(&self.cause_json)?;
        let action_data: ActionData = serde_json::from_str(&self.action_json)?;
        let before_data: StateSnapshotData = serde_json::from_str(&self.before_snapshot_json)?;
        let after_data: StateSnapshotData = serde_json::from_str(&self.after_snapshot_json)?;

        let mut actor: Actor = Actor::new(actor_data.id, actor_data.actor_type);
        actor.officer_id = self.actor_officer_id;
        actor.username = self.actor_username;
        actor.name = self.actor_name;

        Ok(AuditEvent::new(
            actor,
            Cause::new(cause_data.id, cause_data.description),
            Action::new(action_data.name, action_data.details),
            StateSnapshot::new(before_data.data),
            StateSnapshot::new(after_data.data),
            self.subject,
        )
        .with_id(self.event_id))
    }
}

/// Retrieves an audit event by ID.
///
/// # Errors
///
/// Returns `EventNotFound` if no such event exists, or an error if the row
/// cannot be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let result: Result<AuditEventRow, diesel::result::Error> = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventRow::as_select())
        .first(conn);

    match result {
        Ok(row) => row.into_event(),
        Err(diesel::result::Error::NotFound) => Err(PersistenceError::EventNotFound(event_id)),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists the most recent audit events, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be deserialized.
pub fn list_audit_events(
    conn: &mut SqliteConnection,
    limit: i64,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .select(AuditEventRow::as_select())
        .order(audit_events::event_id.desc())
        .limit(limit)
        .load(conn)?;

    rows.into_iter().map(AuditEventRow::into_event).collect()
}

/// Lists all events recorded against one subject, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be deserialized.
pub fn list_audit_events_for_subject(
    conn: &mut SqliteConnection,
    subject: &str,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::subject.eq(subject))
        .select(AuditEventRow::as_select())
        .order(audit_events::event_id.asc())
        .load(conn)?;

    rows.into_iter().map(AuditEventRow::into_event).collect()
}
