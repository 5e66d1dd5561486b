// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monthly return persistence tests.

use std::collections::BTreeSet;

use crate::{PersistenceError, SqlitePersistence};
use labourdesk::{
    Command, Directory, ReturnCommand, ReturnTransition, TransitionResult, apply, apply_return,
};
use labourdesk_domain::{
    ActCaseRow, MonthlyReturn, OfficerId, ReportingPeriod, ReturnStatus, Role, StatuteAct,
};

use super::{
    apply_and_persist, create_test_actor, create_test_cause, create_test_return,
    seeded_persistence,
};

fn write(
    persistence: &mut SqlitePersistence,
    record: MonthlyReturn,
    seal: bool,
) -> Result<(i64, i64), PersistenceError> {
    let existing: Option<MonthlyReturn> = persistence
        .get_return(&record.officer_id, record.period)
        .unwrap();
    let command: ReturnCommand = if seal {
        ReturnCommand::Seal { draft: record }
    } else {
        ReturnCommand::SaveDraft { draft: record }
    };
    let transition: ReturnTransition = apply_return(
        existing.as_ref(),
        command,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    persistence.persist_return(&transition)
}

#[test]
fn test_draft_round_trips_with_sections() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let mut record: MonthlyReturn = create_test_return("dcl1", Role::Dcl, 2026, 9);
    let mut row: ActCaseRow = ActCaseRow::empty(StatuteAct::ShopsEstablishments48_3);
    row.filed = 4;
    row.disposed = 2;
    record.sections.act_judicial_work.push(row);
    record.sections.grievances.received = 7;
    record.remarks = String::from("Two hearings adjourned");

    let (return_id, _) = write(&mut persistence, record, false).unwrap();

    let stored: MonthlyReturn = persistence
        .get_return(&OfficerId::new("dcl1"), ReportingPeriod::new(2026, 9).unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(stored.return_id, Some(return_id));
    assert_eq!(stored.status, ReturnStatus::Draft);
    assert_eq!(stored.sections.act_judicial_work, vec![row]);
    assert_eq!(stored.sections.grievances.received, 7);
    assert_eq!(stored.remarks, "Two hearings adjourned");
    assert!(stored.submitted_at.is_some());
}

#[test]
fn test_second_draft_overwrites_first() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let mut first: MonthlyReturn = create_test_return("jcl1", Role::Jcl, 2026, 9);
    first.sections.grievances.received = 1;
    let mut second: MonthlyReturn = create_test_return("jcl1", Role::Jcl, 2026, 9);
    second.sections.grievances.received = 2;

    let (first_id, _) = write(&mut persistence, first, false).unwrap();
    let (second_id, _) = write(&mut persistence, second, false).unwrap();

    assert_eq!(first_id, second_id);
    let period: ReportingPeriod = ReportingPeriod::new(2026, 9).unwrap();
    let all: Vec<MonthlyReturn> = persistence.list_returns_for_period(period).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].sections.grievances.received, 2);
}

#[test]
fn test_sealed_return_cannot_be_overwritten() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    write(
        &mut persistence,
        create_test_return("jcl1", Role::Jcl, 2026, 9),
        true,
    )
    .unwrap();

    // Bypass the core check by handing storage a stale view.
    let stale: ReturnTransition = apply_return(
        None,
        ReturnCommand::SaveDraft {
            draft: create_test_return("jcl1", Role::Jcl, 2026, 9),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let err: PersistenceError = persistence.persist_return(&stale).unwrap_err();
    assert!(matches!(err, PersistenceError::ReturnLocked { .. }));

    let stored: MonthlyReturn = persistence
        .get_return(&OfficerId::new("jcl1"), ReportingPeriod::new(2026, 9).unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, ReturnStatus::Locked);
}

#[test]
fn test_list_returns_between_filters_by_period() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    for (year, month) in [(2025, 11), (2026, 1), (2026, 3), (2026, 5)] {
        write(
            &mut persistence,
            create_test_return("jcl1", Role::Jcl, year, month),
            true,
        )
        .unwrap();
    }

    let returns: Vec<MonthlyReturn> = persistence
        .list_returns_between(
            ReportingPeriod::new(2025, 12).unwrap(),
            ReportingPeriod::new(2026, 3).unwrap(),
        )
        .unwrap();

    let periods: Vec<String> = returns.iter().map(|r| r.period.to_string()).collect();
    assert_eq!(periods, vec!["2026-01", "2026-03"]);
}

#[test]
fn test_list_returns_for_officer_is_newest_first() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    for month in [3, 9, 6] {
        write(
            &mut persistence,
            create_test_return("dcl1", Role::Dcl, 2026, month),
            false,
        )
        .unwrap();
    }

    let months: Vec<u8> = persistence
        .list_returns_for_officer(&OfficerId::new("dcl1"))
        .unwrap()
        .iter()
        .map(|r| r.period.month())
        .collect();
    assert_eq!(months, vec![9, 6, 3]);
}

#[test]
fn test_directory_knows_sealed_filers() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    write(
        &mut persistence,
        create_test_return("dcl1", Role::Dcl, 2026, 8),
        true,
    )
    .unwrap();
    write(
        &mut persistence,
        create_test_return("jcl1", Role::Jcl, 2026, 8),
        false,
    )
    .unwrap();

    let directory: Directory = persistence.load_directory().unwrap();

    let expected: BTreeSet<OfficerId> = [OfficerId::new("dcl1")].into_iter().collect();
    assert_eq!(directory.sealed_filers, expected);
}

#[test]
fn test_deleting_officer_clears_their_drafts() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let id: OfficerId = OfficerId::new("dcl1");
    write(
        &mut persistence,
        create_test_return("dcl1", Role::Dcl, 2026, 8),
        false,
    )
    .unwrap();

    apply_and_persist(
        &mut persistence,
        Command::DeleteOfficer {
            officer_id: id.clone(),
        },
        None,
    );

    assert!(persistence.get_officer_by_id(&id).unwrap().is_none());
    assert!(persistence.list_returns_for_officer(&id).unwrap().is_empty());
}

#[test]
fn test_storage_keeps_sealed_returns_of_deleted_officer() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let id: OfficerId = OfficerId::new("dcl1");
    write(
        &mut persistence,
        create_test_return("dcl1", Role::Dcl, 2026, 7),
        true,
    )
    .unwrap();
    write(
        &mut persistence,
        create_test_return("dcl1", Role::Dcl, 2026, 8),
        false,
    )
    .unwrap();

    // Without the sealed-filer set the core allows the delete; the foreign
    // key still refuses it and the whole transaction rolls back.
    let unaware: Directory =
        Directory::from_officers(persistence.load_directory().unwrap().officers);
    let result: TransitionResult = apply(
        &unaware,
        Command::DeleteOfficer {
            officer_id: id.clone(),
        },
        &OfficerId::new("comm"),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert!(persistence.persist_transition(&result, None).is_err());
    assert!(persistence.get_officer_by_id(&id).unwrap().is_some());
    assert_eq!(persistence.list_returns_for_officer(&id).unwrap().len(), 2);
}
