// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role-specific dashboard summaries.
//!
//! Dashboards are computed from sealed returns only. A draft is an officer's
//! working copy and does not count toward any figure except the owner's own
//! filing status.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::hierarchy::scope_of;
use crate::returns::{ActCaseRow, Grievances, MonthlyReturn, ReturnStatus, StatuteAct};
use crate::role::Role;
use crate::types::{Officer, OfficerId, ReportingPeriod};

/// Number of months shown in the statewide pendency trend.
pub const TREND_MONTHS: usize = 6;

/// Aggregate case counts across act rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct ActTotals {
    pub pending: u32,
    pub filed: u32,
    pub disposed: u32,
    pub reserved: u32,
    pub workers_benefitted: u32,
    /// Disposed as a share of the month's workload (opening plus filed).
    pub disposal_rate_pct: u32,
}

/// Filing compliance of one subordinate rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Compliance {
    pub role: Role,
    /// Active officers of this rank expected to file.
    pub expected: u32,
    /// Of those, how many have sealed a return.
    pub received: u32,
    pub percent: u32,
}

/// Active case load of one district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistrictLoad {
    pub district: String,
    pub active_cases: u32,
}

/// One month of the statewide trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub period: ReportingPeriod,
    pub pending: u32,
    pub disposed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationalSummary {
    /// Status of the viewer's own return for the month, if one exists.
    pub return_status: Option<ReturnStatus>,
    pub children_rescued: u32,
    pub compensation_paid: u32,
    pub inspections_allotted: u32,
    pub inspections_conducted: u32,
    pub prosecutions_pending: u32,
    pub bonded_persons_released: u32,
    pub grievances: Grievances,
    pub grievance_resolution_pct: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuasiJudicialSummary {
    pub acts: Vec<ActCaseRow>,
    pub totals: ActTotals,
    pub grievances_received: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DivisionalSummary {
    pub acts: Vec<ActCaseRow>,
    pub compliance: Vec<Compliance>,
    pub grievances: Grievances,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionalSummary {
    pub union_pending: u32,
    pub individual_pending: u32,
    pub failures_referred: u32,
    pub settled: u32,
    pub referred: u32,
    pub grievances: Grievances,
    pub districts: Vec<DistrictLoad>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatewideSummary {
    pub children_rescued: u32,
    pub inspections_conducted: u32,
    pub disputes_pending: u32,
    pub grievances_pending: u32,
    pub act_totals: ActTotals,
    pub compliance: Vec<Compliance>,
    pub trend: Vec<TrendPoint>,
}

/// The body of a dashboard, shaped by the viewer's role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DashboardView {
    Operational(OperationalSummary),
    QuasiJudicial(QuasiJudicialSummary),
    Divisional(DivisionalSummary),
    Regional(RegionalSummary),
    Statewide(StatewideSummary),
}

/// A dashboard for one viewer and one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub role: Role,
    pub period: ReportingPeriod,
    pub view: DashboardView,
}

/// Integer percentage of `part` over `whole`; zero when `whole` is zero.
#[must_use]
pub fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    u32::try_from(u64::from(part) * 100 / u64::from(whole)).unwrap_or(u32::MAX)
}

/// Builds the dashboard `viewer` sees for `period`.
///
/// `directory` is the full officer list and `returns` any set of returns
/// covering at least the trend window. Returns outside the viewer's scope
/// are ignored.
#[must_use]
pub fn build_dashboard(
    viewer: &Officer,
    period: ReportingPeriod,
    directory: &[Officer],
    returns: &[MonthlyReturn],
) -> Dashboard {
    let scope: Vec<&Officer> = scope_of(viewer, directory);
    let scope_ids: HashSet<&OfficerId> = scope.iter().map(|o| &o.id).collect();

    let sealed: Vec<&MonthlyReturn> = returns
        .iter()
        .filter(|r| r.status.is_locked() && scope_ids.contains(&r.officer_id))
        .collect();
    let this_month: Vec<&MonthlyReturn> = sealed
        .iter()
        .copied()
        .filter(|r| r.period == period)
        .collect();

    let view: DashboardView = match viewer.role {
        Role::Alo => {
            let own_status: Option<ReturnStatus> = returns
                .iter()
                .find(|r| r.officer_id == viewer.id && r.period == period)
                .map(|r| r.status);
            DashboardView::Operational(operational(own_status, &this_month))
        }
        Role::Acl => DashboardView::QuasiJudicial(quasi_judicial(&this_month)),
        Role::Dcl => DashboardView::Divisional(DivisionalSummary {
            acts: aggregate_acts(&this_month),
            compliance: vec![
                compliance(Role::Acl, viewer, &scope, &this_month),
                compliance(Role::Alo, viewer, &scope, &this_month),
            ],
            grievances: aggregate_grievances(&this_month),
        }),
        Role::Jcl => DashboardView::Regional(regional(&scope, &this_month)),
        Role::Commissioner | Role::Admin => {
            DashboardView::Statewide(statewide(viewer, period, &scope, &sealed, &this_month))
        }
    };

    Dashboard {
        title: viewer.role.dashboard_title().to_string(),
        role: viewer.role,
        period,
        view,
    }
}

fn operational(
    return_status: Option<ReturnStatus>,
    returns: &[&MonthlyReturn],
) -> OperationalSummary {
    let mut summary: OperationalSummary = OperationalSummary {
        return_status,
        children_rescued: 0,
        compensation_paid: 0,
        inspections_allotted: 0,
        inspections_conducted: 0,
        prosecutions_pending: 0,
        bonded_persons_released: 0,
        grievances: aggregate_grievances(returns),
        grievance_resolution_pct: 0,
    };

    for r in returns {
        if let Some(cl) = &r.sections.child_labour {
            summary.children_rescued = summary.children_rescued.saturating_add(cl.rescued());
            summary.compensation_paid = summary.compensation_paid.saturating_add(cl.comp_paid);
        }
        if let Some(en) = &r.sections.enforcement {
            summary.inspections_allotted = summary.inspections_allotted.saturating_add(en.allotted);
            summary.inspections_conducted =
                summary.inspections_conducted.saturating_add(en.conducted);
            summary.prosecutions_pending =
                summary.prosecutions_pending.saturating_add(en.pros_pending_end);
        }
        if let Some(bl) = &r.sections.bonded_labour {
            summary.bonded_persons_released = summary
                .bonded_persons_released
                .saturating_add(bl.persons_released);
        }
    }

    let workload: u32 = summary
        .grievances
        .pending_start
        .saturating_add(summary.grievances.received);
    summary.grievance_resolution_pct = percent(summary.grievances.disposed, workload);
    summary
}

fn quasi_judicial(returns: &[&MonthlyReturn]) -> QuasiJudicialSummary {
    let acts: Vec<ActCaseRow> = aggregate_acts(returns);
    QuasiJudicialSummary {
        totals: act_totals(&acts),
        acts,
        grievances_received: aggregate_grievances(returns).received,
    }
}

fn regional(scope: &[&Officer], returns: &[&MonthlyReturn]) -> RegionalSummary {
    let mut summary: RegionalSummary = RegionalSummary {
        union_pending: 0,
        individual_pending: 0,
        failures_referred: 0,
        settled: 0,
        referred: 0,
        grievances: aggregate_grievances(returns),
        districts: Vec::new(),
    };

    let mut by_district: BTreeMap<String, u32> = BTreeMap::new();
    for r in returns {
        if let Some(disputes) = &r.sections.industrial_disputes {
            summary.union_pending = summary
                .union_pending
                .saturating_add(disputes.union_pending_end);
            summary.individual_pending = summary
                .individual_pending
                .saturating_add(disputes.indiv_pending_end);
            summary.failures_referred = summary
                .failures_referred
                .saturating_add(disputes.indiv_failures_referred);
            summary.settled = summary.settled.saturating_add(disputes.settled());
            summary.referred = summary.referred.saturating_add(disputes.referred());
        }

        let district: String = scope
            .iter()
            .find(|o| o.id == r.officer_id)
            .map_or_else(String::new, |o| o.jurisdiction.district.clone());
        let entry: &mut u32 = by_district.entry(district).or_insert(0);
        *entry = entry.saturating_add(active_cases(r));
    }

    summary.districts = by_district
        .into_iter()
        .map(|(district, active_cases)| DistrictLoad {
            district,
            active_cases,
        })
        .collect();
    summary
}

fn statewide(
    viewer: &Officer,
    period: ReportingPeriod,
    scope: &[&Officer],
    sealed: &[&MonthlyReturn],
    this_month: &[&MonthlyReturn],
) -> StatewideSummary {
    let mut summary: StatewideSummary = StatewideSummary {
        children_rescued: 0,
        inspections_conducted: 0,
        disputes_pending: 0,
        grievances_pending: aggregate_grievances(this_month).pending_end,
        act_totals: act_totals(&aggregate_acts(this_month)),
        compliance: [Role::Jcl, Role::Dcl, Role::Acl, Role::Alo]
            .into_iter()
            .map(|role| compliance(role, viewer, scope, this_month))
            .collect(),
        trend: Vec::new(),
    };

    for r in this_month {
        if let Some(cl) = &r.sections.child_labour {
            summary.children_rescued = summary.children_rescued.saturating_add(cl.rescued());
        }
        if let Some(en) = &r.sections.enforcement {
            summary.inspections_conducted =
                summary.inspections_conducted.saturating_add(en.conducted);
        }
        if let Some(disputes) = &r.sections.industrial_disputes {
            summary.disputes_pending = summary.disputes_pending.saturating_add(disputes.pending());
        }
    }

    summary.trend = period
        .trailing(TREND_MONTHS)
        .into_iter()
        .map(|month| {
            let (pending, disposed) = sealed
                .iter()
                .filter(|r| r.period == month)
                .fold((0_u32, 0_u32), |(pending, disposed), r| {
                    (
                        pending.saturating_add(active_cases(r)),
                        disposed.saturating_add(disposals(r)),
                    )
                });
            TrendPoint {
                period: month,
                pending,
                disposed,
            }
        })
        .collect();

    summary
}

fn compliance(
    role: Role,
    viewer: &Officer,
    scope: &[&Officer],
    returns: &[&MonthlyReturn],
) -> Compliance {
    let expected: Vec<&&Officer> = scope
        .iter()
        .filter(|o| o.role == role && o.is_active() && o.id != viewer.id)
        .collect();
    let received: usize = expected
        .iter()
        .filter(|o| returns.iter().any(|r| r.officer_id == o.id))
        .count();

    let expected: u32 = u32::try_from(expected.len()).unwrap_or(u32::MAX);
    let received: u32 = u32::try_from(received).unwrap_or(u32::MAX);
    Compliance {
        role,
        expected,
        received,
        percent: percent(received, expected),
    }
}

/// Sums act rows by act, in statute order.
fn aggregate_acts(returns: &[&MonthlyReturn]) -> Vec<ActCaseRow> {
    let mut by_act: BTreeMap<StatuteAct, ActCaseRow> = BTreeMap::new();
    for r in returns {
        for row in &r.sections.act_judicial_work {
            by_act
                .entry(row.act)
                .or_insert_with(|| ActCaseRow::empty(row.act))
                .accumulate(row);
        }
    }
    by_act.into_values().collect()
}

fn act_totals(acts: &[ActCaseRow]) -> ActTotals {
    let mut total: ActCaseRow = ActCaseRow::empty(StatuteAct::ShopsEstablishments48_1);
    for row in acts {
        total.accumulate(row);
    }
    ActTotals {
        pending: total.pending_end,
        filed: total.filed,
        disposed: total.disposed,
        reserved: total.cases_reserved,
        workers_benefitted: total.workers_benefitted,
        disposal_rate_pct: percent(
            total.disposed,
            total.pending_beginning.saturating_add(total.filed),
        ),
    }
}

fn aggregate_grievances(returns: &[&MonthlyReturn]) -> Grievances {
    let mut total: Grievances = Grievances::default();
    for r in returns {
        total.accumulate(&r.sections.grievances);
    }
    total
}

/// Everything still open at month end in one return.
fn active_cases(r: &MonthlyReturn) -> u32 {
    let acts: u32 = r
        .sections
        .act_judicial_work
        .iter()
        .fold(0_u32, |acc, row| acc.saturating_add(row.pending_end));
    let disputes: u32 = r
        .sections
        .industrial_disputes
        .as_ref()
        .map_or(0, |d| d.pending());
    acts.saturating_add(disputes)
        .saturating_add(r.sections.grievances.pending_end)
}

/// Everything closed during the month in one return.
fn disposals(r: &MonthlyReturn) -> u32 {
    let acts: u32 = r
        .sections
        .act_judicial_work
        .iter()
        .fold(0_u32, |acc, row| acc.saturating_add(row.disposed));
    let disputes: u32 = r
        .sections
        .industrial_disputes
        .as_ref()
        .map_or(0, |d| d.settled());
    acts.saturating_add(disputes)
        .saturating_add(r.sections.grievances.disposed)
}
