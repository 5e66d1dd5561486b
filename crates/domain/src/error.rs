// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::role::Role;
use crate::types::{OfficerId, ReportingPeriod, Username};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Username is empty or contains disallowed characters.
    InvalidUsername(String),
    /// Another officer already uses this username.
    DuplicateUsername(Username),
    /// Display name is empty or invalid.
    InvalidName(String),
    /// Mobile number is not ten digits.
    InvalidMobile(String),
    /// Email address is malformed.
    InvalidEmail(String),
    /// District is not a known district.
    InvalidDistrict(String),
    /// Role code is not recognized.
    InvalidRole(String),
    /// Account status is not recognized.
    InvalidStatus(String),
    /// Return status is not recognized.
    InvalidReturnStatus(String),
    /// Reporting period is out of range.
    InvalidPeriod(String),
    /// Reporting period lies in the future.
    FuturePeriod(ReportingPeriod),
    /// Officer does not exist.
    OfficerNotFound(OfficerId),
    /// An officer with this ID already exists.
    DuplicateOfficerId(OfficerId),
    /// The referenced superior does not exist.
    SuperiorNotFound {
        /// The officer being validated.
        officer: Username,
        /// The missing superior.
        superior_id: OfficerId,
    },
    /// The referenced superior does not hold the next rank up.
    SuperiorRankMismatch {
        /// The subordinate's role.
        role: Role,
        /// The role the subordinate must report to.
        expected: Role,
        /// The role the referenced superior actually holds.
        actual: Role,
    },
    /// A role outside the chain of command was given a superior.
    SuperiorNotAllowed(Role),
    /// A ranked role below the Commissioner has no superior.
    SuperiorRequired(Role),
    /// An officer may not report to themselves.
    SelfSuperior(OfficerId),
    /// An officer may not delete their own profile.
    CannotDeleteSelf,
    /// An officer may not deactivate their own account.
    CannotDeactivateSelf,
    /// Officer still has direct reports and cannot be removed.
    HasSubordinates {
        /// The officer being removed.
        officer_id: OfficerId,
        /// Number of direct reports.
        count: usize,
    },
    /// Officer has sealed monthly returns, which must outlive the account.
    HasSealedReturns(OfficerId),
    /// Officer's role cannot change while officers still report to them.
    RoleChangeStrandsSubordinates {
        /// The officer being edited.
        officer_id: OfficerId,
        /// Number of direct reports.
        count: usize,
    },
    /// The role does not file monthly returns.
    RoleDoesNotFileReturns(Role),
    /// The return for this officer and month is sealed.
    ReturnLocked {
        /// The filing officer.
        officer_id: OfficerId,
        /// The reporting period.
        period: ReportingPeriod,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUsername(msg) => write!(f, "Invalid username: {msg}"),
            Self::DuplicateUsername(username) => {
                write!(f, "Username '{username}' is already in use")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidMobile(msg) => write!(f, "Invalid mobile number: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidDistrict(district) => write!(f, "Unknown district: '{district}'"),
            Self::InvalidRole(role) => write!(f, "Unknown role: '{role}'"),
            Self::InvalidStatus(status) => write!(f, "Unknown account status: '{status}'"),
            Self::InvalidReturnStatus(status) => write!(f, "Unknown return status: '{status}'"),
            Self::InvalidPeriod(msg) => write!(f, "Invalid reporting period: {msg}"),
            Self::FuturePeriod(period) => {
                write!(f, "Cannot file a return for future period {period}")
            }
            Self::OfficerNotFound(id) => write!(f, "Officer '{id}' not found"),
            Self::DuplicateOfficerId(id) => write!(f, "Officer ID '{id}' already exists"),
            Self::SuperiorNotFound {
                officer,
                superior_id,
            } => {
                write!(
                    f,
                    "Superior '{superior_id}' assigned to '{officer}' does not exist"
                )
            }
            Self::SuperiorRankMismatch {
                role,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{role} officers must report to a {expected}, not a {actual}"
                )
            }
            Self::SuperiorNotAllowed(role) => {
                write!(f, "{role} officers do not report to a superior")
            }
            Self::SuperiorRequired(role) => {
                write!(f, "{role} officers must have a reporting superior")
            }
            Self::SelfSuperior(id) => write!(f, "Officer '{id}' cannot report to themselves"),
            Self::CannotDeleteSelf => write!(f, "You cannot delete your own profile"),
            Self::CannotDeactivateSelf => write!(f, "You cannot deactivate your own account"),
            Self::HasSubordinates { officer_id, count } => {
                write!(
                    f,
                    "Officer '{officer_id}' has {count} direct report(s); reassign them first"
                )
            }
            Self::HasSealedReturns(officer_id) => {
                write!(
                    f,
                    "Officer '{officer_id}' has sealed monthly returns; deactivate the account instead"
                )
            }
            Self::RoleChangeStrandsSubordinates { officer_id, count } => {
                write!(
                    f,
                    "Cannot change the role of '{officer_id}' while {count} officer(s) report to them"
                )
            }
            Self::RoleDoesNotFileReturns(role) => {
                write!(f, "{role} officers do not file monthly returns")
            }
            Self::ReturnLocked { officer_id, period } => {
                write!(
                    f,
                    "The {period} return of '{officer_id}' is locked and cannot be changed"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
