// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

use labourdesk_audit::{AuditEvent, StateSnapshot};
use labourdesk_domain::{MonthlyReturn, Officer, OfficerId, Username};

/// The officer directory: every officer account and its reporting line.
///
/// `sealed_filers` records which officers have at least one Locked return.
/// Those officers cannot be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Directory {
    pub officers: Vec<Officer>,
    pub sealed_filers: BTreeSet<OfficerId>,
}

impl Directory {
    /// Creates an empty directory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            officers: Vec::new(),
            sealed_filers: BTreeSet::new(),
        }
    }

    #[must_use]
    pub const fn from_officers(officers: Vec<Officer>) -> Self {
        Self {
            officers,
            sealed_filers: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_sealed_filers(mut self, sealed_filers: BTreeSet<OfficerId>) -> Self {
        self.sealed_filers = sealed_filers;
        self
    }

    /// The same directory with a different officer list.
    #[must_use]
    pub fn with_officers(&self, officers: Vec<Officer>) -> Self {
        Self {
            officers,
            sealed_filers: self.sealed_filers.clone(),
        }
    }

    #[must_use]
    pub fn has_sealed_returns(&self, id: &OfficerId) -> bool {
        self.sealed_filers.contains(id)
    }

    #[must_use]
    pub fn find(&self, id: &OfficerId) -> Option<&Officer> {
        self.officers.iter().find(|officer| &officer.id == id)
    }

    #[must_use]
    pub fn find_by_username(&self, username: &Username) -> Option<&Officer> {
        self.officers
            .iter()
            .find(|officer| &officer.username == username)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.officers.is_empty()
    }

    /// Converts the directory to a summary snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        let active: usize = self.officers.iter().filter(|o| o.is_active()).count();
        StateSnapshot::new(format!(
            "officers_count={},active_count={active}",
            self.officers.len()
        ))
    }
}

/// Snapshot of a single officer record.
#[must_use]
pub fn officer_snapshot(officer: &Officer) -> StateSnapshot {
    StateSnapshot::new(format!(
        "id={},username={},role={},district={},superior={},status={}",
        officer.id,
        officer.username,
        officer.role,
        officer.jurisdiction.district,
        officer
            .superior_id
            .as_ref()
            .map_or("none", OfficerId::value),
        officer.status
    ))
}

/// Snapshot of a single monthly return.
#[must_use]
pub fn return_snapshot(record: &MonthlyReturn) -> StateSnapshot {
    StateSnapshot::new(format!(
        "officer={},period={},status={},grievances_pending={}",
        record.officer_id, record.period, record.status, record.sections.grievances.pending_end
    ))
}

/// The single-officer effect of a directory transition.
///
/// Storage applies exactly this change rather than diffing directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfficerChange {
    Created(Officer),
    Updated { before: Officer, after: Officer },
    Deleted(Officer),
}

impl OfficerChange {
    /// The officer the change is about, in its resulting form (or as it was,
    /// for a delete).
    #[must_use]
    pub const fn officer(&self) -> &Officer {
        match self {
            Self::Created(officer) | Self::Deleted(officer) => officer,
            Self::Updated { after, .. } => after,
        }
    }
}

/// The result of a successful directory transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The directory after the transition.
    pub new_state: Directory,
    /// What happened to which officer.
    pub change: OfficerChange,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of a successful return transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnTransition {
    /// The record to store.
    pub record: MonthlyReturn,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
