// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monthly return filing, listing and dashboard tests.

use labourdesk_domain::{
    Compliance, DashboardView, FormSection, ReportingPeriod, ReturnStatus, Role,
};
use labourdesk_persistence::SqlitePersistence;

use crate::tests::helpers::{
    create_test_cause, return_request, seeded_persistence, session_for, test_period,
};
use crate::{
    ApiError, AuthenticatedOfficer, DashboardResponse, ListReturnsResponse, MyReturnResponse,
    PeriodQuery, ReturnFormResponse, ReturnInfo, SubmitReturnRequest, SubmitReturnResponse,
    dashboard, list_returns, my_return, return_form, submit_return,
};

fn submit(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedOfficer,
    request: SubmitReturnRequest,
) -> Result<SubmitReturnResponse, ApiError> {
    submit_return(
        persistence,
        request,
        actor,
        create_test_cause(),
        test_period(),
    )
}

fn for_month(request: SubmitReturnRequest, period: ReportingPeriod) -> SubmitReturnRequest {
    SubmitReturnRequest {
        year: period.year(),
        month: period.month(),
        ..request
    }
}

#[test]
fn test_alo_form_layout() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let actor: AuthenticatedOfficer = session_for(&mut persistence, "alo_rr");

    let response: ReturnFormResponse = return_form(&actor).unwrap();

    let titles: Vec<&str> = response
        .sections
        .iter()
        .map(|section: &FormSection| section.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec![
            "A. Child Labour",
            "B. Inspections & Prosecutions",
            "C. Bonded Labour",
            "G. Public Grievances",
        ]
    );
    assert!(
        response.sections[0]
            .fields
            .iter()
            .any(|field| field.key == "child_labour.rescued_haz")
    );
}

#[test]
fn test_commissioner_does_not_file() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let actor: AuthenticatedOfficer = session_for(&mut persistence, "comm_labour");

    assert!(matches!(
        return_form(&actor),
        Err(ApiError::Unauthorized { .. })
    ));
    let err: ApiError =
        submit(&mut persistence, &actor, return_request(&[], "", false)).unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}

#[test]
fn test_draft_is_overwritten_then_sealed() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let actor: AuthenticatedOfficer = session_for(&mut persistence, "alo_rr");

    let first: SubmitReturnResponse = submit(
        &mut persistence,
        &actor,
        return_request(&[("child_labour.rescued_haz", "2")], "", false),
    )
    .unwrap();
    assert_eq!(first.return_info.status, ReturnStatus::Draft);
    assert!(first.message.starts_with("Draft return for 2026-03"));

    let second: SubmitReturnResponse = submit(
        &mut persistence,
        &actor,
        return_request(&[("child_labour.rescued_haz", "5")], "", false),
    )
    .unwrap();
    assert_eq!(second.return_info.return_id, first.return_info.return_id);

    let sealed: SubmitReturnResponse = submit(
        &mut persistence,
        &actor,
        return_request(
            &[("child_labour.rescued_haz", "7"), ("enforcement.conducted", "4")],
            "",
            true,
        ),
    )
    .unwrap();
    assert_eq!(sealed.return_info.status, ReturnStatus::Locked);
    assert!(sealed.return_info.submitted_at.is_some());
    assert_eq!(sealed.message, "Return for 2026-03 submitted and locked");

    let mine: MyReturnResponse = my_return(
        &mut persistence,
        PeriodQuery::default(),
        &actor,
        test_period(),
    )
    .unwrap();
    let stored: ReturnInfo = mine.return_info.unwrap();
    assert_eq!(
        stored.sections.child_labour.map(|cl| cl.rescued_haz),
        Some(7)
    );
}

#[test]
fn test_locked_return_refuses_writes() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let actor: AuthenticatedOfficer = session_for(&mut persistence, "alo_rr");
    submit(&mut persistence, &actor, return_request(&[], "", true)).unwrap();

    let err: ApiError = submit(
        &mut persistence,
        &actor,
        return_request(&[("child_labour.rescued_haz", "1")], "", false),
    )
    .unwrap_err();

    match err {
        ApiError::DomainRuleViolation { rule, .. } => assert_eq!(rule, "return_locked"),
        other => panic!("expected return_locked, got {other:?}"),
    }
}

#[test]
fn test_invalid_fields_are_reported_together_and_nothing_is_stored() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let actor: AuthenticatedOfficer = session_for(&mut persistence, "alo_rr");

    let err: ApiError = submit(
        &mut persistence,
        &actor,
        return_request(
            &[
                ("child_labour.rescued_haz", "abc"),
                ("enforcement.conducted", "-1"),
                ("child_labour.bogus", "1"),
            ],
            "",
            false,
        ),
    )
    .unwrap_err();

    let ApiError::FormValidation { errors } = err else {
        panic!("expected FormValidation");
    };
    assert_eq!(errors.len(), 3);
    assert!(errors.contains_key("child_labour.rescued_haz"));
    assert!(errors.contains_key("enforcement.conducted"));
    assert!(errors.contains_key("child_labour.bogus"));

    assert!(
        persistence
            .get_return(actor.id(), test_period())
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_fields_of_another_role_are_rejected() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let actor: AuthenticatedOfficer = session_for(&mut persistence, "jcl_rr");

    let err: ApiError = submit(
        &mut persistence,
        &actor,
        return_request(&[("child_labour.rescued_haz", "1")], "", false),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::FormValidation { .. }));
}

#[test]
fn test_rising_pendency_needs_remarks() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let actor: AuthenticatedOfficer = session_for(&mut persistence, "alo_rr");
    let february: ReportingPeriod = test_period().previous();

    submit(
        &mut persistence,
        &actor,
        for_month(
            return_request(&[("grievances.pending_end", "3")], "", true),
            february,
        ),
    )
    .unwrap();

    let err: ApiError = submit(
        &mut persistence,
        &actor,
        return_request(&[("grievances.pending_end", "5")], "   ", false),
    )
    .unwrap_err();
    let ApiError::FormValidation { errors } = err else {
        panic!("expected FormValidation");
    };
    assert!(errors.contains_key("remarks"));

    let accepted: SubmitReturnResponse = submit(
        &mut persistence,
        &actor,
        return_request(
            &[("grievances.pending_end", "5")],
            "Two complaints await site visits",
            false,
        ),
    )
    .unwrap();
    assert_eq!(
        accepted.return_info.remarks,
        "Two complaints await site visits"
    );
}

#[test]
fn test_future_period_is_rejected() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let actor: AuthenticatedOfficer = session_for(&mut persistence, "alo_rr");
    let april: ReportingPeriod = ReportingPeriod::new(2026, 4).unwrap();

    let err: ApiError = submit(
        &mut persistence,
        &actor,
        for_month(return_request(&[], "", false), april),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "period"));
}

#[test]
fn test_invalid_month_is_rejected() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let actor: AuthenticatedOfficer = session_for(&mut persistence, "alo_rr");
    let request: SubmitReturnRequest = SubmitReturnRequest {
        month: 13,
        ..return_request(&[], "", false)
    };

    let err: ApiError = submit(&mut persistence, &actor, request).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { .. }));
}

#[test]
fn test_list_returns_is_scoped_to_subtree() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let alo: AuthenticatedOfficer = session_for(&mut persistence, "alo_rr");
    submit(&mut persistence, &alo, return_request(&[], "", true)).unwrap();

    let query: PeriodQuery = PeriodQuery {
        year: Some(2026),
        month: Some(3),
    };

    let other_region: AuthenticatedOfficer = session_for(&mut persistence, "jcl_hyd");
    let hidden: ListReturnsResponse =
        list_returns(&mut persistence, query, &other_region, test_period()).unwrap();
    assert!(hidden.returns.is_empty());

    let own_region: AuthenticatedOfficer = session_for(&mut persistence, "jcl_rr");
    let visible: ListReturnsResponse =
        list_returns(&mut persistence, query, &own_region, test_period()).unwrap();
    assert_eq!(visible.period, "2026-03");
    assert_eq!(visible.returns.len(), 1);
    assert_eq!(visible.returns[0].role, Role::Alo);

    let commissioner: AuthenticatedOfficer = session_for(&mut persistence, "comm_labour");
    let statewide: ListReturnsResponse =
        list_returns(&mut persistence, query, &commissioner, test_period()).unwrap();
    assert_eq!(statewide.returns.len(), 1);
}

#[test]
fn test_divisional_dashboard_counts_sealed_alo_return() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let dcl: AuthenticatedOfficer = session_for(&mut persistence, "dcl_rr");

    let compliance_for = |response: &DashboardResponse, role: Role| -> Compliance {
        let DashboardView::Divisional(summary) = &response.view else {
            panic!("expected a divisional dashboard");
        };
        summary
            .compliance
            .iter()
            .find(|c| c.role == role)
            .copied()
            .unwrap()
    };

    let before: DashboardResponse =
        dashboard(&mut persistence, PeriodQuery::default(), &dcl, test_period()).unwrap();
    assert_eq!(before.title, "Divisional Oversight Dashboard");
    let alo_before: Compliance = compliance_for(&before, Role::Alo);
    assert_eq!((alo_before.expected, alo_before.received), (1, 0));

    let alo: AuthenticatedOfficer = session_for(&mut persistence, "alo_rr");
    submit(&mut persistence, &alo, return_request(&[], "", false)).unwrap();
    let draft_only: DashboardResponse =
        dashboard(&mut persistence, PeriodQuery::default(), &dcl, test_period()).unwrap();
    assert_eq!(compliance_for(&draft_only, Role::Alo).received, 0);

    submit(&mut persistence, &alo, return_request(&[], "", true)).unwrap();
    let after: DashboardResponse =
        dashboard(&mut persistence, PeriodQuery::default(), &dcl, test_period()).unwrap();
    let alo_after: Compliance = compliance_for(&after, Role::Alo);
    assert_eq!((alo_after.expected, alo_after.received), (1, 1));
    assert_eq!(alo_after.percent, 100);

    let acl_after: Compliance = compliance_for(&after, Role::Acl);
    assert_eq!((acl_after.expected, acl_after.received), (1, 0));
}

#[test]
fn test_operational_dashboard_sums_own_sealed_return() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let alo: AuthenticatedOfficer = session_for(&mut persistence, "alo_rr");
    submit(
        &mut persistence,
        &alo,
        return_request(
            &[
                ("child_labour.rescued_haz", "2"),
                ("child_labour.rescued_non_haz", "3"),
                ("enforcement.conducted", "4"),
            ],
            "",
            true,
        ),
    )
    .unwrap();

    let response: DashboardResponse =
        dashboard(&mut persistence, PeriodQuery::default(), &alo, test_period()).unwrap();

    let DashboardView::Operational(summary) = response.view else {
        panic!("expected an operational dashboard");
    };
    assert_eq!(summary.return_status, Some(ReturnStatus::Locked));
    assert_eq!(summary.children_rescued, 5);
    assert_eq!(summary.inspections_conducted, 4);
}
