// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use super::helpers::grievances;
use crate::{
    FieldKind, FormSection, ReturnSections, Role, StatuteAct, check_remarks_requirement,
    form_layout, parse_return_form, validate_flag_field, validate_numeric_field,
};

fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn test_numeric_field_accepts_counts() {
    assert_eq!(validate_numeric_field(""), Ok(0));
    assert_eq!(validate_numeric_field("0"), Ok(0));
    assert_eq!(validate_numeric_field("123"), Ok(123));
    assert_eq!(validate_numeric_field(" 42 "), Ok(42));
}

#[test]
fn test_numeric_field_rejects_non_counts() {
    for raw in ["-1", "1.5", "abc", "1e3", "+4"] {
        assert!(validate_numeric_field(raw).is_err(), "{raw} should be rejected");
    }
}

#[test]
fn test_numeric_field_rejects_overflow() {
    assert_eq!(
        validate_numeric_field("99999999999"),
        Err(String::from("Value is too large"))
    );
}

#[test]
fn test_flag_field() {
    assert_eq!(validate_flag_field(""), Ok(false));
    assert_eq!(validate_flag_field("Yes"), Ok(true));
    assert_eq!(validate_flag_field("false"), Ok(false));
    assert!(validate_flag_field("maybe").is_err());
}

#[test]
fn test_layout_is_empty_for_supervisory_roles() {
    assert!(form_layout(Role::Commissioner).is_empty());
    assert!(form_layout(Role::Admin).is_empty());
}

#[test]
fn test_every_filing_role_reports_grievances() {
    for role in [Role::Alo, Role::Acl, Role::Dcl, Role::Jcl] {
        let layout: Vec<FormSection> = form_layout(role);
        let last: &FormSection = layout.last().unwrap();
        assert!(last.fields.iter().any(|f| f.key == "grievances.pending_end"));
    }
}

#[test]
fn test_dcl_layout_has_flags() {
    let layout: Vec<FormSection> = form_layout(Role::Dcl);
    let flags: Vec<&str> = layout
        .iter()
        .flat_map(|s| &s.fields)
        .filter(|f| f.kind == FieldKind::Flag)
        .map(|f| f.key.as_str())
        .collect();
    assert_eq!(
        flags,
        vec![
            "supervisory.all_alo_reports_received",
            "supervisory.all_acl_reports_received"
        ]
    );
}

#[test]
fn test_layout_keys_are_unique() {
    for role in [Role::Alo, Role::Acl, Role::Dcl, Role::Jcl] {
        let mut keys: Vec<String> = form_layout(role)
            .into_iter()
            .flat_map(|s| s.fields)
            .map(|f| f.key)
            .collect();
        let total: usize = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total, "duplicate key in {role} layout");
    }
}

#[test]
fn test_parse_alo_form() {
    let sections: ReturnSections = parse_return_form(
        Role::Alo,
        &fields(&[
            ("child_labour.rescued_haz", "3"),
            ("child_labour.rescued_non_haz", "2"),
            ("enforcement.conducted", "14"),
            ("bonded_labour.persons_released", ""),
            ("grievances.received", "7"),
        ]),
    )
    .unwrap();

    assert_eq!(sections.child_labour.unwrap().rescued(), 5);
    assert_eq!(sections.enforcement.unwrap().conducted, 14);
    assert_eq!(sections.bonded_labour.unwrap().persons_released, 0);
    assert_eq!(sections.grievances.received, 7);
    assert!(sections.act_judicial_work.is_empty());
    assert!(sections.industrial_disputes.is_none());
}

#[test]
fn test_parse_acl_form_builds_act_rows() {
    let sections: ReturnSections = parse_return_form(
        Role::Acl,
        &fields(&[("act_judicial_work.minimum_wages.filed", "6")]),
    )
    .unwrap();

    assert_eq!(sections.act_judicial_work.len(), 5);
    let minimum_wages = sections
        .act_judicial_work
        .iter()
        .find(|row| row.act == StatuteAct::MinimumWages)
        .unwrap();
    assert_eq!(minimum_wages.filed, 6);
}

#[test]
fn test_parse_dcl_form_reads_flags() {
    let sections: ReturnSections = parse_return_form(
        Role::Dcl,
        &fields(&[("supervisory.all_alo_reports_received", "yes")]),
    )
    .unwrap();
    let supervisory = sections.supervisory.unwrap();
    assert!(supervisory.all_alo_reports_received);
    assert!(!supervisory.all_acl_reports_received);
    assert_eq!(sections.act_judicial_work.len(), 1);
}

#[test]
fn test_parse_collects_every_error() {
    let errors = parse_return_form(
        Role::Jcl,
        &fields(&[
            ("industrial_disputes.union_received", "-2"),
            ("industrial_disputes.indiv_settled", "x"),
            ("child_labour.rescued_haz", "1"),
        ]),
    )
    .unwrap_err();

    assert_eq!(errors.len(), 3);
    assert!(errors.contains_key("industrial_disputes.union_received"));
    assert!(errors.contains_key("industrial_disputes.indiv_settled"));
    assert_eq!(
        errors.get("child_labour.rescued_haz").map(String::as_str),
        Some("Unknown field for this return")
    );
}

#[test]
fn test_remarks_required_when_pendency_rises() {
    let previous = ReturnSections {
        grievances: grievances(0, 0, 0, 4),
        ..ReturnSections::default()
    };
    let current = ReturnSections {
        grievances: grievances(4, 3, 1, 6),
        ..ReturnSections::default()
    };

    let errors = check_remarks_requirement(&current, "  ", Some(&previous)).unwrap_err();
    assert!(errors.contains_key("remarks"));
    assert!(check_remarks_requirement(&current, "Staff on leave", Some(&previous)).is_ok());
}

#[test]
fn test_remarks_optional_without_rise_or_history() {
    let previous = ReturnSections {
        grievances: grievances(0, 0, 0, 6),
        ..ReturnSections::default()
    };
    let current = ReturnSections {
        grievances: grievances(6, 0, 0, 6),
        ..ReturnSections::default()
    };
    assert!(check_remarks_requirement(&current, "", Some(&previous)).is_ok());
    assert!(check_remarks_requirement(&current, "", None).is_ok());
}
