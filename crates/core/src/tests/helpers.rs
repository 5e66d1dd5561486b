// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, Directory, OfficerUpdate, TransitionResult, apply};
use labourdesk_audit::{Actor, Cause};
use labourdesk_domain::{
    Jurisdiction, MonthlyReturn, Officer, OfficerId, OfficerProfile, ReportingPeriod,
    ReturnSections, ReturnStatus, Role, Username,
};

pub fn create_test_actor() -> Actor {
    Actor::officer(
        String::from("admin"),
        String::from("admin"),
        String::from("System Admin"),
    )
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Admin request"))
}

pub fn admin_id() -> OfficerId {
    OfficerId::new("admin")
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
            jurisdiction: Jurisdiction::district("Rangareddy"),
            superior_id: superior.map(OfficerId::new),
        },
        true,
    )
}

pub fn update_from(officer: &Officer) -> OfficerUpdate {
    OfficerUpdate {
        name: officer.name.clone(),
        role: officer.role,
        mobile: officer.mobile.clone(),
        email: officer.email.clone(),
        jurisdiction: officer.jurisdiction.clone(),
        superior_id: officer.superior_id.clone(),
    }
}

/// Builds a directory through `apply`, so every officer passed validation.
pub fn create_test_directory() -> Directory {
    let officers: [Officer; 6] = [
        create_test_officer("admin", Role::Admin, None),
        create_test_officer("comm", Role::Commissioner, None),
        create_test_officer("jcl1", Role::Jcl, Some("comm")),
        create_test_officer("dcl1", Role::Dcl, Some("jcl1")),
        create_test_officer("acl1", Role::Acl, Some("dcl1")),
        create_test_officer("alo1", Role::Alo, Some("acl1")),
    ];

    let mut directory: Directory = Directory::new();
    for officer in officers {
        let result: TransitionResult = apply(
            &directory,
            Command::CreateOfficer { officer },
            &admin_id(),
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();
        directory = result.new_state;
    }
    directory
}

pub fn create_test_return(officer_id: &str, role: Role) -> MonthlyReturn {
    MonthlyReturn {
        return_id: None,
        officer_id: OfficerId::new(officer_id),
        role,
        period: ReportingPeriod::new(2026, 9).unwrap(),
        status: ReturnStatus::Draft,
        remarks: String::new(),
        sections: ReturnSections::default(),
        submitted_at: None,
    }
}
