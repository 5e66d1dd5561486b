// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{officer, roster};
use crate::{
    DomainError, Officer, OfficerId, Role, chain_of_command, direct_subordinates, is_in_scope,
    scope_of, subtree, superior_candidates, validate_superior,
};

fn ids(officers: &[&Officer]) -> Vec<String> {
    officers.iter().map(|o| o.id.value().to_string()).collect()
}

fn find<'a>(officers: &'a [Officer], id: &str) -> &'a Officer {
    officers.iter().find(|o| o.id.value() == id).unwrap()
}

#[test]
fn test_superior_candidates_are_one_rank_up() {
    let officers: Vec<Officer> = roster();
    assert_eq!(ids(&superior_candidates(Role::Alo, &officers)), vec!["acl1"]);
    assert_eq!(ids(&superior_candidates(Role::Acl, &officers)), vec!["dcl1"]);
    assert_eq!(ids(&superior_candidates(Role::Dcl, &officers)), vec!["jcl1"]);
    assert_eq!(ids(&superior_candidates(Role::Jcl, &officers)), vec!["comm"]);
}

#[test]
fn test_superior_candidates_empty_for_top_and_admin() {
    let officers: Vec<Officer> = roster();
    assert!(superior_candidates(Role::Commissioner, &officers).is_empty());
    assert!(superior_candidates(Role::Admin, &officers).is_empty());
}

#[test]
fn test_validate_superior_accepts_roster() {
    let officers: Vec<Officer> = roster();
    for o in &officers {
        assert!(validate_superior(o, &officers).is_ok(), "{} rejected", o.id);
    }
}

#[test]
fn test_validate_superior_rejects_skipped_rank() {
    let officers: Vec<Officer> = roster();
    let o: Officer = officer("alo9", Role::Alo, Some("dcl1"), "Hyderabad");
    assert_eq!(
        validate_superior(&o, &officers),
        Err(DomainError::SuperiorRankMismatch {
            role: Role::Alo,
            expected: Role::Acl,
            actual: Role::Dcl,
        })
    );
}

#[test]
fn test_validate_superior_requires_superior_below_commissioner() {
    let officers: Vec<Officer> = roster();
    let o: Officer = officer("acl9", Role::Acl, None, "Hyderabad");
    assert_eq!(
        validate_superior(&o, &officers),
        Err(DomainError::SuperiorRequired(Role::Acl))
    );
}

#[test]
fn test_validate_superior_forbids_superior_for_admin() {
    let officers: Vec<Officer> = roster();
    let o: Officer = officer("admin2", Role::Admin, Some("comm"), "Statewide");
    assert_eq!(
        validate_superior(&o, &officers),
        Err(DomainError::SuperiorNotAllowed(Role::Admin))
    );
}

#[test]
fn test_validate_superior_rejects_missing_and_self() {
    let officers: Vec<Officer> = roster();
    let missing: Officer = officer("alo9", Role::Alo, Some("ghost"), "Hyderabad");
    assert!(matches!(
        validate_superior(&missing, &officers),
        Err(DomainError::SuperiorNotFound { .. })
    ));

    let own: Officer = officer("alo9", Role::Alo, Some("alo9"), "Hyderabad");
    assert_eq!(
        validate_superior(&own, &officers),
        Err(DomainError::SelfSuperior(OfficerId::new("alo9")))
    );
}

#[test]
fn test_direct_subordinates_and_subtree() {
    let officers: Vec<Officer> = roster();
    let acl: OfficerId = OfficerId::new("acl1");
    assert_eq!(ids(&direct_subordinates(&acl, &officers)), vec!["alo1", "alo2"]);

    let jcl: OfficerId = OfficerId::new("jcl1");
    assert_eq!(
        ids(&subtree(&jcl, &officers)),
        vec!["dcl1", "acl1", "alo1", "alo2"]
    );
}

#[test]
fn test_subtree_terminates_on_cycle() {
    let officers: Vec<Officer> = vec![
        officer("a", Role::Alo, Some("b"), "Hyderabad"),
        officer("b", Role::Acl, Some("a"), "Hyderabad"),
    ];
    assert_eq!(ids(&subtree(&OfficerId::new("a"), &officers)), vec!["b"]);
    assert_eq!(
        ids(&chain_of_command(&OfficerId::new("a"), &officers)),
        vec!["b"]
    );
}

#[test]
fn test_chain_of_command_nearest_first() {
    let officers: Vec<Officer> = roster();
    assert_eq!(
        ids(&chain_of_command(&OfficerId::new("alo1"), &officers)),
        vec!["acl1", "dcl1", "jcl1", "comm"]
    );
}

#[test]
fn test_scope_for_field_and_supervisory_roles() {
    let officers: Vec<Officer> = roster();

    let acl: &Officer = find(&officers, "acl1");
    assert_eq!(ids(&scope_of(acl, &officers)), vec!["acl1", "alo1", "alo2"]);

    let alo: &Officer = find(&officers, "alo1");
    assert_eq!(ids(&scope_of(alo, &officers)), vec!["alo1"]);

    let admin: &Officer = find(&officers, "admin");
    assert_eq!(scope_of(admin, &officers).len(), officers.len());
}

#[test]
fn test_is_in_scope() {
    let officers: Vec<Officer> = roster();
    let dcl: &Officer = find(&officers, "dcl1");
    assert!(is_in_scope(dcl, &OfficerId::new("alo2"), &officers));
    assert!(is_in_scope(dcl, &OfficerId::new("dcl1"), &officers));
    assert!(!is_in_scope(dcl, &OfficerId::new("jcl1"), &officers));

    let comm: &Officer = find(&officers, "comm");
    assert!(is_in_scope(comm, &OfficerId::new("alo2"), &officers));
}
