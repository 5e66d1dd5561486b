// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use labourdesk_domain::{Jurisdiction, MonthlyReturn, Officer, OfficerId, Role};

/// The editable fields of an existing officer.
///
/// The username is fixed at creation. Status and credentials have their own
/// commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficerUpdate {
    pub name: String,
    pub role: Role,
    pub mobile: String,
    pub email: String,
    pub jurisdiction: Jurisdiction,
    pub superior_id: Option<OfficerId>,
}

/// A command represents intent to change the officer directory, as data only.
///
/// Commands are the only way to request directory changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a new officer. The caller assigns the id.
    CreateOfficer {
        /// The complete officer record.
        officer: Officer,
    },
    /// Replace the editable profile fields of an officer.
    UpdateOfficer {
        officer_id: OfficerId,
        update: OfficerUpdate,
    },
    /// Flip an officer between Active and Inactive.
    ToggleOfficerStatus { officer_id: OfficerId },
    /// Remove an officer.
    DeleteOfficer { officer_id: OfficerId },
}

/// A command against a single monthly return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnCommand {
    /// Store the return as an editable draft.
    SaveDraft { draft: MonthlyReturn },
    /// Store the return and lock it.
    Seal { draft: MonthlyReturn },
}
