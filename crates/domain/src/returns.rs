// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monthly return model.
//!
//! A return is filed once per officer per calendar month. Which sections it
//! carries depends on the filing officer's role:
//!
//! | Role | Sections |
//! |------|----------|
//! | ALO  | child labour, inspections and prosecutions, bonded labour, grievances |
//! | ACL  | act-wise judicial work (five acts), grievances |
//! | DCL  | act-wise judicial work (S&E 48(3)/53), supervisory confirmation, grievances |
//! | JCL  | union and individual industrial disputes, grievances |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DomainError;
use crate::role::Role;
use crate::types::{OfficerId, ReportingPeriod};

/// Lifecycle of a monthly return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReturnStatus {
    /// Saved but still editable.
    #[default]
    Draft,
    /// Sealed on submission. Immutable.
    Locked,
}

impl ReturnStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Locked => "Locked",
        }
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        matches!(self, Self::Locked)
    }
}

impl std::fmt::Display for ReturnStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReturnStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(Self::Draft),
            "Locked" => Ok(Self::Locked),
            _ => Err(DomainError::InvalidReturnStatus(s.to_string())),
        }
    }
}

/// Section A of the ALO return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ChildLabour {
    pub identified_haz: u32,
    pub identified_non_haz: u32,
    pub rescued_haz: u32,
    pub rescued_non_haz: u32,
    /// Cases where the Rs. 20,000 compensation was settled.
    pub comp_settled_20k: u32,
    pub comp_paid: u32,
    pub comp_pending: u32,
    pub prosecutions_filed: u32,
    pub pending_end_of_month: u32,
}

impl ChildLabour {
    #[must_use]
    pub const fn rescued(&self) -> u32 {
        self.rescued_haz.saturating_add(self.rescued_non_haz)
    }
}

/// Section B of the ALO return: inspections and prosecutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Enforcement {
    pub allotted: u32,
    pub conducted: u32,
    pub not_conducted: u32,
    pub pros_pending_start: u32,
    pub pros_filed: u32,
    pub pros_disposed: u32,
    pub pros_pending_end: u32,
}

/// Section C of the ALO return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BondedLabour {
    pub cases_identified: u32,
    pub persons_released: u32,
    pub rehabilitation_initiated: u32,
}

/// The labour statutes tracked in the act-wise judicial tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatuteAct {
    /// Shops & Establishments Act, sections 48(1)/50.
    ShopsEstablishments48_1,
    /// Shops & Establishments Act, sections 48(3)/53.
    ShopsEstablishments48_3,
    PaymentOfGratuity,
    EmployeesCompensation,
    MinimumWages,
    PaymentOfWages,
}

const ACL_ACTS: [StatuteAct; 5] = [
    StatuteAct::ShopsEstablishments48_1,
    StatuteAct::PaymentOfGratuity,
    StatuteAct::EmployeesCompensation,
    StatuteAct::MinimumWages,
    StatuteAct::PaymentOfWages,
];

const DCL_ACTS: [StatuteAct; 1] = [StatuteAct::ShopsEstablishments48_3];

impl StatuteAct {
    /// The key used in form field names, e.g. `minimum_wages`.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::ShopsEstablishments48_1 => "shops_establishments_48_1",
            Self::ShopsEstablishments48_3 => "shops_establishments_48_3",
            Self::PaymentOfGratuity => "payment_of_gratuity",
            Self::EmployeesCompensation => "employees_compensation",
            Self::MinimumWages => "minimum_wages",
            Self::PaymentOfWages => "payment_of_wages",
        }
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::ShopsEstablishments48_1 => "S&E Act 48(1)/50",
            Self::ShopsEstablishments48_3 => "S&E Act 48(3)/53",
            Self::PaymentOfGratuity => "Payment of Gratuity Act",
            Self::EmployeesCompensation => "Employees' Compensation Act",
            Self::MinimumWages => "Minimum Wages Act",
            Self::PaymentOfWages => "Payment of Wages Act",
        }
    }

    /// The acts whose case rows a role reports.
    #[must_use]
    pub const fn for_role(role: Role) -> &'static [Self] {
        match role {
            Role::Acl => &ACL_ACTS,
            Role::Dcl => &DCL_ACTS,
            _ => &[],
        }
    }
}

/// One act's row in the act-wise judicial work table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActCaseRow {
    pub act: StatuteAct,
    pub pending_beginning: u32,
    pub filed: u32,
    pub disposed: u32,
    pub pending_end: u32,
    pub workers_benefitted: u32,
    pub cases_reserved: u32,
}

impl ActCaseRow {
    /// An all-zero row for `act`.
    #[must_use]
    pub const fn empty(act: StatuteAct) -> Self {
        Self {
            act,
            pending_beginning: 0,
            filed: 0,
            disposed: 0,
            pending_end: 0,
            workers_benefitted: 0,
            cases_reserved: 0,
        }
    }

    /// Adds another row's counts into this one.
    pub const fn accumulate(&mut self, other: &Self) {
        self.pending_beginning = self.pending_beginning.saturating_add(other.pending_beginning);
        self.filed = self.filed.saturating_add(other.filed);
        self.disposed = self.disposed.saturating_add(other.disposed);
        self.pending_end = self.pending_end.saturating_add(other.pending_end);
        self.workers_benefitted = self
            .workers_benefitted
            .saturating_add(other.workers_benefitted);
        self.cases_reserved = self.cases_reserved.saturating_add(other.cases_reserved);
    }
}

/// JCL return: union (collective) and individual industrial disputes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IndustrialDisputes {
    pub union_pending_start: u32,
    pub union_received: u32,
    pub union_settled_joint: u32,
    /// Settled in conciliation under section 12(3).
    pub union_settled_12_3: u32,
    /// Failure reports under section 12(4).
    pub union_failures_12_4: u32,
    pub union_pending_end: u32,
    pub indiv_pending_start: u32,
    pub indiv_received: u32,
    pub indiv_settled: u32,
    pub indiv_failures_referred: u32,
    pub indiv_pending_end: u32,
}

impl IndustrialDisputes {
    #[must_use]
    pub const fn settled(&self) -> u32 {
        self.union_settled_joint
            .saturating_add(self.union_settled_12_3)
            .saturating_add(self.indiv_settled)
    }

    #[must_use]
    pub const fn referred(&self) -> u32 {
        self.union_failures_12_4
            .saturating_add(self.indiv_failures_referred)
    }

    #[must_use]
    pub const fn pending(&self) -> u32 {
        self.union_pending_end.saturating_add(self.indiv_pending_end)
    }
}

/// DCL confirmation that subordinate returns have come in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SupervisoryConfirmation {
    pub all_alo_reports_received: bool,
    pub all_acl_reports_received: bool,
}

/// Public grievance movement. Every filing role reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Grievances {
    pub pending_start: u32,
    pub received: u32,
    pub disposed: u32,
    pub pending_end: u32,
}

impl Grievances {
    pub const fn accumulate(&mut self, other: &Self) {
        self.pending_start = self.pending_start.saturating_add(other.pending_start);
        self.received = self.received.saturating_add(other.received);
        self.disposed = self.disposed.saturating_add(other.disposed);
        self.pending_end = self.pending_end.saturating_add(other.pending_end);
    }
}

/// The role-specific body of a return.
///
/// Sections that do not apply to the filing role are `None` (or empty for
/// the act table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReturnSections {
    pub child_labour: Option<ChildLabour>,
    pub enforcement: Option<Enforcement>,
    pub bonded_labour: Option<BondedLabour>,
    pub act_judicial_work: Vec<ActCaseRow>,
    pub industrial_disputes: Option<IndustrialDisputes>,
    pub supervisory: Option<SupervisoryConfirmation>,
    pub grievances: Grievances,
}

/// A monthly statistical return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReturn {
    /// Storage identifier. `None` until persisted.
    pub return_id: Option<i64>,
    pub officer_id: OfficerId,
    /// The filing officer's role at the time of filing.
    pub role: Role,
    pub period: ReportingPeriod,
    pub status: ReturnStatus,
    pub remarks: String,
    pub sections: ReturnSections,
    /// ISO 8601 timestamp of the last save.
    pub submitted_at: Option<String>,
}
