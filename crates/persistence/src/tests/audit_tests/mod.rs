// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit trail persistence tests.

use crate::{PersistenceError, SqlitePersistence};
use labourdesk::Command;
use labourdesk_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use labourdesk_domain::OfficerId;

use super::{apply_and_persist, seeded_persistence};

#[test]
fn test_every_officer_transition_is_recorded() {
    let mut persistence: SqlitePersistence = seeded_persistence();

    let events: Vec<AuditEvent> = persistence.list_audit_events(10).unwrap();

    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e.action.name == "CreateOfficer"));
    // Newest first.
    assert_eq!(events[0].subject.as_deref(), Some("dcl1"));
    assert_eq!(events[2].subject.as_deref(), Some("comm"));
}

#[test]
fn test_event_round_trips() {
    let mut persistence: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();
    let event: AuditEvent = AuditEvent::new(
        Actor::system(),
        Cause::new(String::from("boot"), String::from("Startup")),
        Action::new(String::from("Login"), Some(String::from("details"))),
        StateSnapshot::new(String::from("before")),
        StateSnapshot::new(String::from("after")),
        Some(String::from("subject-1")),
    );

    let event_id: i64 = persistence.persist_audit_event(&event).unwrap();
    let stored: AuditEvent = persistence.get_audit_event(event_id).unwrap();

    assert_eq!(stored, event.with_id(event_id));
}

#[test]
fn test_missing_event_is_reported() {
    let mut persistence: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();
    let err: PersistenceError = persistence.get_audit_event(42).unwrap_err();
    assert_eq!(err, PersistenceError::EventNotFound(42));
}

#[test]
fn test_trail_survives_subject_deletion() {
    let mut persistence: SqlitePersistence = seeded_persistence();

    apply_and_persist(
        &mut persistence,
        Command::DeleteOfficer {
            officer_id: OfficerId::new("dcl1"),
        },
        None,
    );

    let history: Vec<AuditEvent> = persistence.list_audit_events_for_subject("dcl1").unwrap();
    let names: Vec<&str> = history.iter().map(|e| e.action.name.as_str()).collect();
    assert_eq!(names, vec!["CreateOfficer", "DeleteOfficer"]);
    assert_eq!(history[1].actor.username.as_deref(), Some("comm"));
    assert!(history[1].after.is_empty());
}
