// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{DISTRICTS, Officer, OfficerId, ReportingPeriod, STATEWIDE, Username};

/// Validates the format of a username.
///
/// Usernames are 3 to 32 characters drawn from lowercase letters, digits,
/// underscore, dot and hyphen.
///
/// # Errors
///
/// Returns an error if the username is too short, too long, or contains a
/// disallowed character.
pub fn validate_username(username: &Username) -> Result<(), DomainError> {
    let value: &str = username.value();
    let len: usize = value.chars().count();

    if !(3..=32).contains(&len) {
        return Err(DomainError::InvalidUsername(String::from(
            "Username must be between 3 and 32 characters",
        )));
    }

    if let Some(bad) = value
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-')))
    {
        return Err(DomainError::InvalidUsername(format!(
            "Username may not contain '{bad}'"
        )));
    }

    Ok(())
}

/// Validates an officer's field constraints.
///
/// This does NOT check username uniqueness or the superior reference; both
/// need the rest of the directory.
///
/// # Errors
///
/// Returns an error if:
/// - the username format is invalid
/// - the name is empty
/// - the mobile number is not exactly ten digits
/// - the email address is malformed
/// - the district is not a known district
pub fn validate_officer_fields(officer: &Officer) -> Result<(), DomainError> {
    validate_username(&officer.username)?;

    if officer.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    let mobile: &str = officer.mobile.trim();
    if mobile.len() != 10 || !mobile.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::InvalidMobile(String::from(
            "Mobile number must be exactly 10 digits",
        )));
    }

    validate_email(&officer.email)?;

    let district: &str = officer.jurisdiction.district.trim();
    if district != STATEWIDE && !DISTRICTS.contains(&district) {
        return Err(DomainError::InvalidDistrict(district.to_string()));
    }

    Ok(())
}

fn validate_email(email: &str) -> Result<(), DomainError> {
    let email: &str = email.trim();
    let mut parts = email.split('@');
    let (Some(local), Some(host), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(DomainError::InvalidEmail(String::from(
            "Email must contain exactly one '@'",
        )));
    };
    if local.is_empty() || host.is_empty() || email.contains(char::is_whitespace) {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' is not a valid address"
        )));
    }
    Ok(())
}

/// Validates that a username is not used by another officer.
///
/// `exclude` names the officer being edited, whose current username does
/// not count as a conflict.
///
/// # Errors
///
/// Returns an error if another officer already holds the username.
pub fn validate_username_unique(
    username: &Username,
    officers: &[Officer],
    exclude: Option<&OfficerId>,
) -> Result<(), DomainError> {
    let taken: bool = officers
        .iter()
        .filter(|officer| Some(&officer.id) != exclude)
        .any(|officer| &officer.username == username);

    if taken {
        return Err(DomainError::DuplicateUsername(username.clone()));
    }
    Ok(())
}

/// Validates that a return may be filed for `period` as of `current`.
///
/// # Errors
///
/// Returns an error if the period is later than the current month.
pub fn validate_filing_period(
    period: ReportingPeriod,
    current: ReportingPeriod,
) -> Result<(), DomainError> {
    if period > current {
        return Err(DomainError::FuturePeriod(period));
    }
    Ok(())
}
