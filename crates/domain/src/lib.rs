// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod dashboard;
mod error;
mod form;
mod hierarchy;
mod returns;
mod role;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use dashboard::{
    ActTotals, Compliance, Dashboard, DashboardView, DistrictLoad, DivisionalSummary,
    OperationalSummary, QuasiJudicialSummary, RegionalSummary, StatewideSummary, TREND_MONTHS,
    TrendPoint, build_dashboard, percent,
};
pub use error::DomainError;
pub use form::{
    FieldErrors, FieldKind, FormField, FormSection, check_remarks_requirement, form_layout,
    parse_return_form, validate_flag_field, validate_numeric_field,
};
pub use hierarchy::{
    chain_of_command, direct_subordinates, is_in_scope, scope_of, subtree, superior_candidates,
    validate_superior,
};
pub use returns::{
    ActCaseRow, BondedLabour, ChildLabour, Enforcement, Grievances, IndustrialDisputes,
    MonthlyReturn, ReturnSections, ReturnStatus, StatuteAct, SupervisoryConfirmation,
};
pub use role::{HIERARCHY, Role};
pub use types::{
    DISTRICTS, Jurisdiction, Officer, OfficerId, OfficerProfile, OfficerStatus, ReportingPeriod,
    STATEWIDE, Username,
};
pub use validation::{
    validate_filing_period, validate_officer_fields, validate_username, validate_username_unique,
};
