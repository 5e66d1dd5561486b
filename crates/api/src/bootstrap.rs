// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Demo roster seeding.
//!
//! Loads one officer per rank along the Rangareddy chain plus a second JCL,
//! so every dashboard and the hierarchy pickers have data on a fresh
//! database.

use labourdesk::{Command, Directory, TransitionResult, apply};
use labourdesk_audit::{Actor, Cause};
use labourdesk_domain::{
    Jurisdiction, Officer, OfficerId, OfficerProfile, Role, STATEWIDE, Username,
};
use labourdesk_persistence::SqlitePersistence;
use tracing::info;

use crate::error::{ApiError, translate_core_error, translate_persistence_error};

/// Password shared by every demo officer.
pub const DEMO_PASSWORD: &str = "password123";

struct DemoOfficer {
    username: &'static str,
    name: &'static str,
    role: Role,
    mobile: &'static str,
    email: &'static str,
    district: &'static str,
    superior: Option<&'static str>,
}

/// Superiors are listed before their subordinates.
const DEMO_ROSTER: [DemoOfficer; 6] = [
    DemoOfficer {
        username: "comm_labour",
        name: "Dr. Srinivas Rao",
        role: Role::Commissioner,
        mobile: "9876543210",
        email: "comm-labour@telangana.gov.in",
        district: STATEWIDE,
        superior: None,
    },
    DemoOfficer {
        username: "jcl_hyd",
        name: "M. Venkat Ramana",
        role: Role::Jcl,
        mobile: "9876543211",
        email: "jcl.hyd@telangana.gov.in",
        district: "Hyderabad",
        superior: Some("comm_labour"),
    },
    DemoOfficer {
        username: "jcl_rr",
        name: "Shyamsunder Reddy.D",
        role: Role::Jcl,
        mobile: "9492555315",
        email: "jcl.rangareddy@gmail.com",
        district: "Rangareddy",
        superior: Some("comm_labour"),
    },
    DemoOfficer {
        username: "dcl_rr",
        name: "Shyamsunder Jaju",
        role: Role::Dcl,
        mobile: "9492555345",
        email: "dcl.rangareddy@telangana.gov.in",
        district: "Rangareddy",
        superior: Some("jcl_rr"),
    },
    DemoOfficer {
        username: "acl_rr",
        name: "Satyanarayana Reddy",
        role: Role::Acl,
        mobile: "9492555253",
        email: "acl.rangareddy@gmail.com",
        district: "Rangareddy",
        superior: Some("dcl_rr"),
    },
    DemoOfficer {
        username: "alo_rr",
        name: "K. Mahesh Kumar",
        role: Role::Alo,
        mobile: "9492555111",
        email: "alo.rangareddy@telangana.gov.in",
        district: "Rangareddy",
        superior: Some("acl_rr"),
    },
];

/// The stable id a demo officer is stored under.
#[must_use]
pub fn demo_officer_id(username: &str) -> OfficerId {
    OfficerId::new(format!("demo_{username}"))
}

/// Seeds the demo roster into an empty directory.
///
/// Every officer goes through the regular create transition, so the
/// hierarchy rules apply. Returns the number of officers created; zero if
/// the directory already had officers.
///
/// # Errors
///
/// Returns an error if a transition is rejected or storage fails.
pub fn seed_demo_roster(persistence: &mut SqlitePersistence) -> Result<usize, ApiError> {
    let existing: i64 = persistence
        .count_officers()
        .map_err(translate_persistence_error)?;
    if existing > 0 {
        info!(existing, "Directory is not empty; skipping demo seed");
        return Ok(0);
    }

    let requested_by: OfficerId = OfficerId::new("system");
    for demo in &DEMO_ROSTER {
        let officer: Officer = Officer::from_profile(
            demo_officer_id(demo.username),
            OfficerProfile {
                username: Username::new(demo.username),
                name: demo.name.to_string(),
                role: demo.role,
                mobile: demo.mobile.to_string(),
                email: demo.email.to_string(),
                jurisdiction: Jurisdiction::district(demo.district),
                superior_id: demo.superior.map(demo_officer_id),
            },
            false,
        );

        let directory: Directory = persistence
            .load_directory()
            .map_err(translate_persistence_error)?;
        let result: TransitionResult = apply(
            &directory,
            Command::CreateOfficer { officer },
            &requested_by,
            Actor::system(),
            Cause::new(String::from("seed-demo"), String::from("Demo roster seed")),
        )
        .map_err(translate_core_error)?;
        persistence
            .persist_transition(&result, Some(DEMO_PASSWORD))
            .map_err(translate_persistence_error)?;
    }

    info!(count = DEMO_ROSTER.len(), "Seeded demo roster");
    Ok(DEMO_ROSTER.len())
}
