// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The fixed rank order of the labour department, lowest first.
///
/// `Admin` is absent: it sits outside the chain of command.
pub const HIERARCHY: [Role; 5] = [
    Role::Alo,
    Role::Acl,
    Role::Dcl,
    Role::Jcl,
    Role::Commissioner,
];

/// An officer's role within the department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Commissioner of Labour. Head of the department.
    Commissioner,
    /// Joint Commissioner of Labour.
    Jcl,
    /// Deputy Commissioner of Labour.
    Dcl,
    /// Assistant Commissioner of Labour.
    Acl,
    /// Assistant Labour Officer.
    Alo,
    /// System administrator. Has no rank.
    Admin,
}

impl Role {
    /// All roles, in display order.
    pub const ALL: [Self; 6] = [
        Self::Commissioner,
        Self::Jcl,
        Self::Dcl,
        Self::Acl,
        Self::Alo,
        Self::Admin,
    ];

    /// The wire code for this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Commissioner => "COMMISSIONER",
            Self::Jcl => "JCL",
            Self::Dcl => "DCL",
            Self::Acl => "ACL",
            Self::Alo => "ALO",
            Self::Admin => "ADMIN",
        }
    }

    /// The human-readable designation.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Commissioner => "Commissioner of Labour",
            Self::Jcl => "Joint Commissioner of Labour (JCL)",
            Self::Dcl => "Deputy Commissioner of Labour (DCL)",
            Self::Acl => "Assistant Commissioner of Labour (ACL)",
            Self::Alo => "Assistant Labour Officer (ALO)",
            Self::Admin => "System Admin",
        }
    }

    /// The heading shown on this role's dashboard.
    #[must_use]
    pub const fn dashboard_title(&self) -> &'static str {
        match self {
            Self::Alo => "Operational Enforcement Dashboard",
            Self::Acl => "Quasi-Judicial Performance Dashboard",
            Self::Dcl => "Divisional Oversight Dashboard",
            Self::Jcl => "Industrial Relations & Regional Dashboard",
            Self::Commissioner | Self::Admin => "Integrated State-wide Performance Dashboard",
        }
    }

    /// Position of this role in [`HIERARCHY`], or `None` for `Admin`.
    #[must_use]
    pub fn rank(&self) -> Option<usize> {
        HIERARCHY.iter().position(|r| r == self)
    }

    /// The role an officer of this role reports to.
    ///
    /// Returns `None` for the Commissioner (top of the chain) and for `Admin`
    /// (outside the chain).
    #[must_use]
    pub fn superior_role(&self) -> Option<Self> {
        self.rank().and_then(|idx| HIERARCHY.get(idx + 1).copied())
    }

    /// The role that reports directly to this role.
    #[must_use]
    pub fn subordinate_role(&self) -> Option<Self> {
        self.rank()
            .and_then(|idx| idx.checked_sub(1))
            .and_then(|idx| HIERARCHY.get(idx).copied())
    }

    /// Whether `self` outranks `other` in the chain of command.
    ///
    /// `Admin` neither outranks nor is outranked by anyone.
    #[must_use]
    pub fn outranks(&self, other: Self) -> bool {
        match (self.rank(), other.rank()) {
            (Some(a), Some(b)) => a > b,
            _ => false,
        }
    }

    /// Supervisory roles see everything read-only and file no returns.
    #[must_use]
    pub const fn is_supervisory(&self) -> bool {
        matches!(self, Self::Commissioner | Self::Admin)
    }

    /// Whether this role may create, edit and remove officer profiles.
    #[must_use]
    pub const fn can_manage_officers(&self) -> bool {
        matches!(self, Self::Commissioner | Self::Admin)
    }

    /// Whether officers of this role file monthly returns.
    #[must_use]
    pub const fn files_returns(&self) -> bool {
        matches!(self, Self::Alo | Self::Acl | Self::Dcl | Self::Jcl)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "COMMISSIONER" => Ok(Self::Commissioner),
            "JCL" => Ok(Self::Jcl),
            "DCL" => Ok(Self::Dcl),
            "ACL" => Ok(Self::Acl),
            "ALO" => Ok(Self::Alo),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}
