// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The districts an officer may be posted to, plus the statewide pseudo-district.
pub const DISTRICTS: [&str; 33] = [
    "Adilabad",
    "Bhadradri Kothagudem",
    "Hanumakonda",
    "Hyderabad",
    "Jagtial",
    "Jangaon",
    "Jayashankar Bhupalpally",
    "Jogulamba Gadwal",
    "Kamareddy",
    "Karimnagar",
    "Khammam",
    "Kumuram Bheem Asifabad",
    "Mahabubabad",
    "Mahabubnagar",
    "Mancherial",
    "Medak",
    "Medchal-Malkajgiri",
    "Mulugu",
    "Nagarkurnool",
    "Nalgonda",
    "Narayanpet",
    "Nirmal",
    "Nizamabad",
    "Peddapalli",
    "Rajanna Sircilla",
    "Rangareddy",
    "Sangareddy",
    "Siddipet",
    "Suryapet",
    "Vikarabad",
    "Wanaparthy",
    "Warangal",
    "Yadadri Bhuvanagiri",
];

/// District value used by headquarters officers.
pub const STATEWIDE: &str = "Statewide";

/// Opaque identifier of an officer profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfficerId(String);

impl OfficerId {
    /// Wraps an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OfficerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A login name.
///
/// Usernames are case-insensitive. They are normalized to lowercase on
/// construction so that equality and storage agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Creates a username, trimming whitespace and lowercasing.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_lowercase())
    }

    /// Returns the normalized username.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether an officer account may log in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OfficerStatus {
    #[default]
    Active,
    Inactive,
}

impl OfficerStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// The status a toggle moves this status to.
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

impl std::fmt::Display for OfficerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OfficerStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

/// Where an officer is posted.
///
/// Only the district is mandatory; division, circle and location are free text
/// used by field officers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Jurisdiction {
    pub district: String,
    pub division: Option<String>,
    pub circle: Option<String>,
    pub location: Option<String>,
}

impl Jurisdiction {
    /// Creates a jurisdiction covering a whole district.
    #[must_use]
    pub fn district(district: &str) -> Self {
        Self {
            district: district.to_string(),
            division: None,
            circle: None,
            location: None,
        }
    }
}

/// The editable part of an officer profile.
///
/// Everything an administrator can set on the create and edit screens,
/// excluding identity, status and credential state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficerProfile {
    pub username: Username,
    pub name: String,
    pub role: Role,
    pub mobile: String,
    pub email: String,
    pub jurisdiction: Jurisdiction,
    /// The officer this officer reports to.
    pub superior_id: Option<OfficerId>,
}

/// An officer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Officer {
    pub id: OfficerId,
    pub username: Username,
    pub name: String,
    pub role: Role,
    pub mobile: String,
    pub email: String,
    pub jurisdiction: Jurisdiction,
    pub superior_id: Option<OfficerId>,
    pub status: OfficerStatus,
    pub must_change_password: bool,
}

impl Officer {
    /// Builds a new active officer from a profile.
    #[must_use]
    pub fn from_profile(id: OfficerId, profile: OfficerProfile, must_change_password: bool) -> Self {
        Self {
            id,
            username: profile.username,
            name: profile.name,
            role: profile.role,
            mobile: profile.mobile,
            email: profile.email,
            jurisdiction: profile.jurisdiction,
            superior_id: profile.superior_id,
            status: OfficerStatus::Active,
            must_change_password,
        }
    }

    /// Returns a copy with the profile fields replaced. Identity, status and
    /// the password flag are preserved.
    #[must_use]
    pub fn with_profile(&self, profile: OfficerProfile) -> Self {
        let mut updated: Self =
            Self::from_profile(self.id.clone(), profile, self.must_change_password);
        updated.status = self.status;
        updated
    }

    /// Extracts the editable profile.
    #[must_use]
    pub fn profile(&self) -> OfficerProfile {
        OfficerProfile {
            username: self.username.clone(),
            name: self.name.clone(),
            role: self.role,
            mobile: self.mobile.clone(),
            email: self.email.clone(),
            jurisdiction: self.jurisdiction.clone(),
            superior_id: self.superior_id.clone(),
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// A calendar month that a return covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReportingPeriod {
    year: u16,
    month: u8,
}

impl ReportingPeriod {
    /// Creates a reporting period.
    ///
    /// # Errors
    ///
    /// Returns an error if the month is not 1-12 or the year is outside 2000-2200.
    pub fn new(year: u16, month: u8) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidPeriod(format!(
                "Month must be between 1 and 12, got {month}"
            )));
        }
        if !(2000..=2200).contains(&year) {
            return Err(DomainError::InvalidPeriod(format!(
                "Year must be between 2000 and 2200, got {year}"
            )));
        }
        Ok(Self { year, month })
    }

    /// The period containing the given date.
    #[must_use]
    pub fn containing(date: time::Date) -> Self {
        Self {
            year: u16::try_from(date.year()).unwrap_or(2000),
            month: u8::from(date.month()),
        }
    }

    #[must_use]
    pub const fn year(&self) -> u16 {
        self.year
    }

    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// The calendar month before this one.
    #[must_use]
    pub const fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The `count` periods ending at (and including) this one, oldest first.
    #[must_use]
    pub fn trailing(&self, count: usize) -> Vec<Self> {
        let mut periods: Vec<Self> = Vec::with_capacity(count);
        let mut current: Self = *self;
        for _ in 0..count {
            periods.push(current);
            current = current.previous();
        }
        periods.reverse();
        periods
    }
}

impl std::fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
