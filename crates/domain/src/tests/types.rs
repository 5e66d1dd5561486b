// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use super::helpers::{officer, period};
use crate::{
    DomainError, HIERARCHY, OfficerStatus, ReportingPeriod, ReturnStatus, Role, StatuteAct,
    Username,
};

#[test]
fn test_username_is_normalized() {
    assert_eq!(Username::new("  Alo.Ravi ").value(), "alo.ravi");
}

#[test]
fn test_role_parses_case_insensitively() {
    assert_eq!(Role::from_str("dcl").unwrap(), Role::Dcl);
    assert_eq!(Role::from_str("Commissioner").unwrap(), Role::Commissioner);
    assert!(matches!(
        Role::from_str("clerk"),
        Err(DomainError::InvalidRole(_))
    ));
}

#[test]
fn test_role_serializes_as_upper_case_code() {
    assert_eq!(serde_json::to_string(&Role::Jcl).unwrap(), "\"JCL\"");
}

#[test]
fn test_hierarchy_ranks() {
    assert_eq!(Role::Alo.superior_role(), Some(Role::Acl));
    assert_eq!(Role::Acl.superior_role(), Some(Role::Dcl));
    assert_eq!(Role::Dcl.superior_role(), Some(Role::Jcl));
    assert_eq!(Role::Jcl.superior_role(), Some(Role::Commissioner));
    assert_eq!(Role::Commissioner.superior_role(), None);
    assert_eq!(Role::Admin.superior_role(), None);

    assert_eq!(Role::Acl.subordinate_role(), Some(Role::Alo));
    assert_eq!(Role::Alo.subordinate_role(), None);
    assert_eq!(HIERARCHY.len(), 5);
}

#[test]
fn test_outranks_ignores_admin() {
    assert!(Role::Commissioner.outranks(Role::Alo));
    assert!(!Role::Alo.outranks(Role::Acl));
    assert!(!Role::Admin.outranks(Role::Alo));
    assert!(!Role::Alo.outranks(Role::Admin));
}

#[test]
fn test_only_ranked_field_roles_file_returns() {
    let filing: Vec<Role> = Role::ALL
        .into_iter()
        .filter(Role::files_returns)
        .collect();
    assert_eq!(filing, vec![Role::Jcl, Role::Dcl, Role::Acl, Role::Alo]);
}

#[test]
fn test_status_toggles() {
    assert_eq!(OfficerStatus::Active.toggled(), OfficerStatus::Inactive);
    assert_eq!(OfficerStatus::Inactive.toggled(), OfficerStatus::Active);
    assert_eq!(
        OfficerStatus::from_str("Inactive").unwrap(),
        OfficerStatus::Inactive
    );
}

#[test]
fn test_return_status_round_trips_through_text() {
    for status in [ReturnStatus::Draft, ReturnStatus::Locked] {
        assert_eq!(ReturnStatus::from_str(status.as_str()).unwrap(), status);
    }
}

#[test]
fn test_with_profile_preserves_status_and_flag() {
    let mut original = officer("alo1", Role::Alo, Some("acl1"), "Hyderabad");
    original.status = OfficerStatus::Inactive;
    original.must_change_password = true;

    let mut profile = original.profile();
    profile.name = String::from("Renamed");
    let updated = original.with_profile(profile);

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.status, OfficerStatus::Inactive);
    assert!(updated.must_change_password);
    assert_eq!(updated.id, original.id);
}

#[test]
fn test_period_rejects_bad_month() {
    assert!(ReportingPeriod::new(2026, 0).is_err());
    assert!(ReportingPeriod::new(2026, 13).is_err());
    assert!(ReportingPeriod::new(1999, 5).is_err());
}

#[test]
fn test_period_previous_wraps_year() {
    assert_eq!(period(2026, 1).previous(), period(2025, 12));
    assert_eq!(period(2026, 7).previous(), period(2026, 6));
}

#[test]
fn test_period_trailing_is_oldest_first() {
    let months: Vec<ReportingPeriod> = period(2026, 2).trailing(4);
    assert_eq!(
        months,
        vec![period(2025, 11), period(2025, 12), period(2026, 1), period(2026, 2)]
    );
}

#[test]
fn test_period_display() {
    assert_eq!(period(2026, 3).to_string(), "2026-03");
}

#[test]
fn test_period_containing_date() {
    let date = time::macros::date!(2026 - 10 - 16);
    assert_eq!(ReportingPeriod::containing(date), period(2026, 10));
}

#[test]
fn test_acts_per_role() {
    assert_eq!(StatuteAct::for_role(Role::Acl).len(), 5);
    assert_eq!(
        StatuteAct::for_role(Role::Dcl),
        &[StatuteAct::ShopsEstablishments48_3]
    );
    assert!(StatuteAct::for_role(Role::Alo).is_empty());
}
