// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Grievances, Jurisdiction, MonthlyReturn, Officer, OfficerId, OfficerProfile, ReportingPeriod,
    ReturnSections, ReturnStatus, Role, Username,
};

pub fn officer(id: &str, role: Role, superior: Option<&str>, district: &str) -> Officer {
    Officer::from_profile(
        OfficerId::new(id),
        OfficerProfile {
            username: Username::new(id),
            name: format!("Officer {id}"),
            role,
            mobile: String::from("9876543210"),
            email: format!("{id}@labour.gov.in"),
            jurisdiction: Jurisdiction::district(district),
            superior_id: superior.map(OfficerId::new),
        },
        false,
    )
}

/// A small department: one officer per rank in a single chain, plus an
/// admin and a second ALO under the same ACL.
pub fn roster() -> Vec<Officer> {
    vec![
        officer("comm", Role::Commissioner, None, "Statewide"),
        officer("admin", Role::Admin, None, "Statewide"),
        officer("jcl1", Role::Jcl, Some("comm"), "Hyderabad"),
        officer("dcl1", Role::Dcl, Some("jcl1"), "Hyderabad"),
        officer("acl1", Role::Acl, Some("dcl1"), "Hyderabad"),
        officer("alo1", Role::Alo, Some("acl1"), "Hyderabad"),
        officer("alo2", Role::Alo, Some("acl1"), "Warangal"),
    ]
}

pub fn period(year: u16, month: u8) -> ReportingPeriod {
    ReportingPeriod::new(year, month).unwrap()
}

pub fn sealed_return(
    officer: &Officer,
    period: ReportingPeriod,
    sections: ReturnSections,
) -> MonthlyReturn {
    MonthlyReturn {
        return_id: None,
        officer_id: officer.id.clone(),
        role: officer.role,
        period,
        status: ReturnStatus::Locked,
        remarks: String::new(),
        sections,
        submitted_at: None,
    }
}

pub fn grievances(pending_start: u32, received: u32, disposed: u32, pending_end: u32) -> Grievances {
    Grievances {
        pending_start,
        received,
        disposed,
        pending_end,
    }
}
