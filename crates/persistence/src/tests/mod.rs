// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod audit_tests;
mod initialization_tests;
mod officer_tests;
mod return_tests;
mod session_tests;

use crate::SqlitePersistence;
use labourdesk::{Command, Directory, TransitionResult, apply};
use labourdesk_audit::{Actor, Cause};
use labourdesk_domain::{
    Jurisdiction, MonthlyReturn, Officer, OfficerId, OfficerProfile, ReportingPeriod,
    ReturnSections, ReturnStatus, Role, Username,
};

pub const TEST_PASSWORD: &str = "Initial#Pass1";

pub fn create_test_actor() -> Actor {
    Actor::officer(
        String::from("comm"),
        String::from("comm"),
        String::from("Officer comm"),
    )
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn create_test_officer(id: &str, role: Role, superior: Option<&str>) -> Officer {
    Officer::from_profile(
        OfficerId::new(id),
        OfficerProfile {
            username: Username::new(id),
            name: format!("Officer {id}"),
            role,
            mobile: String::from("9876543210"),
            email: format!("{id}@labour.gov.in"),
            jurisdiction: Jurisdiction::district("Hyderabad"),
            superior_id: superior.map(OfficerId::new),
        },
        false,
    )
}

/// Applies `command` against the stored directory and persists the result.
pub fn apply_and_persist(
    persistence: &mut SqlitePersistence,
    command: Command,
    password: Option<&str>,
) -> TransitionResult {
    let directory: Directory = persistence.load_directory().unwrap();
    let result: TransitionResult = apply(
        &directory,
        command,
        &OfficerId::new("comm"),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    persistence.persist_transition(&result, password).unwrap();
    result
}

/// A commissioner, a JCL under them, and a DCL under the JCL.
pub fn seeded_persistence() -> SqlitePersistence {
    let mut persistence: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();
    for officer in [
        create_test_officer("comm", Role::Commissioner, None),
        create_test_officer("jcl1", Role::Jcl, Some("comm")),
        create_test_officer("dcl1", Role::Dcl, Some("jcl1")),
    ] {
        apply_and_persist(
            &mut persistence,
            Command::CreateOfficer { officer },
            Some(TEST_PASSWORD),
        );
    }
    persistence
}

pub fn create_test_return(officer_id: &str, role: Role, year: u16, month: u8) -> MonthlyReturn {
    MonthlyReturn {
        return_id: None,
        officer_id: OfficerId::new(officer_id),
        role,
        period: ReportingPeriod::new(year, month).unwrap(),
        status: ReturnStatus::Draft,
        remarks: String::new(),
        sections: ReturnSections::default(),
        submitted_at: None,
    }
}
