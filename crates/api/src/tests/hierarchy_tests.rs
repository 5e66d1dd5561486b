// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use labourdesk_persistence::SqlitePersistence;

use crate::tests::helpers::{seeded_persistence, session_for};
use crate::{
    ApiError, AuthenticatedOfficer, SubordinatesResponse, SuperiorsResponse, list_subordinates,
    list_superiors,
};

fn usernames(response: &SuperiorsResponse) -> Vec<&str> {
    response
        .superiors
        .iter()
        .map(|o| o.username.as_str())
        .collect()
}

#[test]
fn test_alo_reports_to_acls() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let actor: AuthenticatedOfficer = session_for(&mut persistence, "comm_labour");

    let response: SuperiorsResponse = list_superiors(&mut persistence, "ALO", &actor).unwrap();

    assert_eq!(response.superior_role.as_deref(), Some("ACL"));
    assert_eq!(usernames(&response), vec!["acl_rr"]);
    assert!(response.message.is_none());
}

#[test]
fn test_jcl_candidates_are_commissioners() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let actor: AuthenticatedOfficer = session_for(&mut persistence, "comm_labour");

    let response: SuperiorsResponse = list_superiors(&mut persistence, "jcl", &actor).unwrap();

    assert_eq!(response.role, "JCL");
    assert_eq!(usernames(&response), vec!["comm_labour"]);
}

#[test]
fn test_commissioner_has_no_superiors() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let actor: AuthenticatedOfficer = session_for(&mut persistence, "comm_labour");

    let response: SuperiorsResponse =
        list_superiors(&mut persistence, "COMMISSIONER", &actor).unwrap();

    assert!(response.superiors.is_empty());
    assert!(response.superior_role.is_none());
    assert_eq!(response.message.as_deref(), Some("No superiors found"));
}

#[test]
fn test_unknown_role_code_is_invalid_input() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let actor: AuthenticatedOfficer = session_for(&mut persistence, "comm_labour");

    let err: ApiError = list_superiors(&mut persistence, "CLERK", &actor).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "role"));
}

#[test]
fn test_subordinates_cover_the_whole_subtree() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let actor: AuthenticatedOfficer = session_for(&mut persistence, "jcl_rr");

    let response: SubordinatesResponse = list_subordinates(&mut persistence, &actor).unwrap();

    let mut names: Vec<&str> = response
        .officers
        .iter()
        .map(|o| o.username.as_str())
        .collect();
    names.sort_unstable();
    assert_eq!(names, vec!["acl_rr", "alo_rr", "dcl_rr"]);
}

#[test]
fn test_leaf_officer_has_no_subordinates() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let actor: AuthenticatedOfficer = session_for(&mut persistence, "alo_rr");

    let response: SubordinatesResponse = list_subordinates(&mut persistence, &actor).unwrap();

    assert!(response.officers.is_empty());
}
