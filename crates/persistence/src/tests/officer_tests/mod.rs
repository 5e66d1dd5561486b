// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for officer persistence through transitions.

use crate::{OfficerData, PersistenceError, SqlitePersistence};
use labourdesk::{Command, Directory, TransitionResult, apply};
use labourdesk_audit::{Action, AuditEvent, StateSnapshot};
use labourdesk_domain::{Officer, OfficerId, OfficerStatus, Role, Username};

use super::{
    TEST_PASSWORD, apply_and_persist, create_test_actor, create_test_cause, create_test_officer,
    seeded_persistence,
};

#[test]
fn test_created_officer_round_trips() {
    let mut persistence: SqlitePersistence = seeded_persistence();

    let stored: OfficerData = persistence
        .get_officer_by_id(&OfficerId::new("dcl1"))
        .unwrap()
        .unwrap();

    assert_eq!(stored.officer, create_test_officer("dcl1", Role::Dcl, Some("jcl1")));
    assert!(!stored.created_at.is_empty());
    assert!(stored.last_login_at.is_none());
}

#[test]
fn test_lookup_by_username_is_case_insensitive() {
    let mut persistence: SqlitePersistence = seeded_persistence();

    let stored: Option<OfficerData> = persistence
        .get_officer_by_username(&Username::new("  JCL1 "))
        .unwrap();

    assert_eq!(stored.unwrap().officer.id, OfficerId::new("jcl1"));
}

#[test]
fn test_load_directory_returns_every_officer() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let directory: Directory = persistence.load_directory().unwrap();
    assert_eq!(directory.officers.len(), 3);
    assert!(directory.find(&OfficerId::new("comm")).is_some());
}

#[test]
fn test_password_is_hashed_and_verifiable() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let id: OfficerId = OfficerId::new("jcl1");

    assert!(persistence.verify_officer_password(&id, TEST_PASSWORD).unwrap());
    assert!(!persistence.verify_officer_password(&id, "wrong").unwrap());
    assert!(
        !persistence
            .verify_officer_password(&OfficerId::new("ghost"), TEST_PASSWORD)
            .unwrap()
    );
}

#[test]
fn test_create_without_password_is_rejected() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let directory: Directory = persistence.load_directory().unwrap();

    let result: TransitionResult = apply(
        &directory,
        Command::CreateOfficer {
            officer: create_test_officer("jcl2", Role::Jcl, Some("comm")),
        },
        &OfficerId::new("comm"),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let err: PersistenceError = persistence.persist_transition(&result, None).unwrap_err();
    assert_eq!(err, PersistenceError::MissingInitialPassword(String::from("jcl2")));
    assert_eq!(persistence.count_officers().unwrap(), 3);
}

#[test]
fn test_toggle_to_inactive_ends_sessions() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let id: OfficerId = OfficerId::new("dcl1");
    persistence
        .create_session("session_a", &id, "2999-01-01T00:00:00.000000000Z")
        .unwrap();

    apply_and_persist(
        &mut persistence,
        Command::ToggleOfficerStatus {
            officer_id: id.clone(),
        },
        None,
    );

    let stored: Officer = persistence.get_officer_by_id(&id).unwrap().unwrap().officer;
    assert_eq!(stored.status, OfficerStatus::Inactive);
    assert!(persistence.get_session_by_token("session_a").unwrap().is_none());
}

#[test]
fn test_delete_cascades_sessions() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let id: OfficerId = OfficerId::new("dcl1");
    persistence
        .create_session("session_b", &id, "2999-01-01T00:00:00.000000000Z")
        .unwrap();

    apply_and_persist(
        &mut persistence,
        Command::DeleteOfficer {
            officer_id: id.clone(),
        },
        None,
    );

    assert!(persistence.get_officer_by_id(&id).unwrap().is_none());
    assert_eq!(persistence.count_sessions_for_officer(&id).unwrap(), 0);
}

#[test]
fn test_storage_refuses_to_orphan_subordinates() {
    let mut persistence: SqlitePersistence = seeded_persistence();

    // A directory view that has lost sight of dcl1 lets the core allow the
    // delete; the foreign key still refuses it.
    let partial: Directory = Directory::from_officers(vec![
        create_test_officer("comm", Role::Commissioner, None),
        create_test_officer("jcl1", Role::Jcl, Some("comm")),
    ]);
    let result: TransitionResult = apply(
        &partial,
        Command::DeleteOfficer {
            officer_id: OfficerId::new("jcl1"),
        },
        &OfficerId::new("comm"),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert!(persistence.persist_transition(&result, None).is_err());
    assert_eq!(persistence.count_officers().unwrap(), 3);
    assert_eq!(
        persistence.list_audit_events(100).unwrap().len(),
        3,
        "the audit event must roll back with the failed delete"
    );
}

#[test]
fn test_password_reset_sets_flag_and_ends_sessions() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let id: OfficerId = OfficerId::new("jcl1");
    persistence
        .create_session("session_c", &id, "2999-01-01T00:00:00.000000000Z")
        .unwrap();

    let event: AuditEvent = AuditEvent::new(
        create_test_actor(),
        create_test_cause(),
        Action::new(String::from("ResetPassword"), None),
        StateSnapshot::empty(),
        StateSnapshot::empty(),
        Some(String::from("jcl1")),
    );
    persistence
        .persist_password_change(&id, "Brand#NewPass9", true, &event)
        .unwrap();

    assert!(persistence.verify_officer_password(&id, "Brand#NewPass9").unwrap());
    assert!(!persistence.verify_officer_password(&id, TEST_PASSWORD).unwrap());
    assert_eq!(persistence.count_sessions_for_officer(&id).unwrap(), 0);
    let stored: Officer = persistence.get_officer_by_id(&id).unwrap().unwrap().officer;
    assert!(stored.must_change_password);
}

#[test]
fn test_password_change_for_unknown_officer_fails() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let event: AuditEvent = AuditEvent::new(
        create_test_actor(),
        create_test_cause(),
        Action::new(String::from("ResetPassword"), None),
        StateSnapshot::empty(),
        StateSnapshot::empty(),
        None,
    );

    let err: PersistenceError = persistence
        .persist_password_change(&OfficerId::new("ghost"), "Brand#NewPass9", true, &event)
        .unwrap_err();
    assert_eq!(err, PersistenceError::OfficerNotFound(String::from("ghost")));
}

#[test]
fn test_password_check_without_account_never_succeeds() {
    for password in ["", TEST_PASSWORD, "labourdesk-no-such-officer"] {
        assert!(!SqlitePersistence::verify_password_without_account(password).unwrap());
    }
}

#[test]
fn test_unknown_officer_password_is_refused() {
    let mut persistence: SqlitePersistence = seeded_persistence();

    assert!(
        !persistence
            .verify_officer_password(&OfficerId::new("ghost"), TEST_PASSWORD)
            .unwrap()
    );
    assert!(
        persistence
            .verify_officer_password(&OfficerId::new("jcl1"), TEST_PASSWORD)
            .unwrap()
    );
}
