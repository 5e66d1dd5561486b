// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use std::collections::BTreeMap;

use labourdesk_audit::AuditEvent;
use labourdesk_domain::{
    Dashboard, FormSection, MonthlyReturn, Officer, ReturnSections, ReturnStatus, Role,
};

use crate::captcha::CaptchaChallenge;

// ========================================================================
// Authentication
// ========================================================================

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// Id of the challenge shown on the form.
    pub captcha_id: String,
    /// What the officer typed for the challenge.
    pub captcha_answer: String,
}

/// API response for successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LoginResponse {
    /// The session token (opaque). Sent back as `Authorization: Bearer`.
    pub session_token: String,
    /// Session expiration timestamp (ISO 8601).
    pub expires_at: String,
    pub officer: OfficerInfo,
    /// The officer must set a new password before doing anything else.
    pub must_change_password: bool,
    pub dashboard_title: String,
    pub capabilities: GlobalCapabilities,
}

/// API response for the "who am I" endpoint.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct WhoAmIResponse {
    pub officer: OfficerInfo,
    pub dashboard_title: String,
    pub capabilities: GlobalCapabilities,
}

/// API response carrying a new CAPTCHA challenge.
pub type CaptchaResponse = CaptchaChallenge;

/// API request to change the caller's own password.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub new_password_confirmation: String,
}

/// API response for a message-only success.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ========================================================================
// Officers
// ========================================================================

/// An officer as presented to clients. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OfficerInfo {
    pub id: String,
    pub username: String,
    pub name: String,
    /// Role code, e.g. `DCL`.
    pub role: String,
    /// Full role title, e.g. `Deputy Commissioner of Labour (DCL)`.
    pub role_title: String,
    pub mobile: String,
    pub email: String,
    pub district: String,
    pub division: Option<String>,
    pub circle: Option<String>,
    pub location: Option<String>,
    pub superior_id: Option<String>,
    pub status: String,
    pub must_change_password: bool,
    /// Last successful login (ISO 8601), when known.
    pub last_login_at: Option<String>,
}

impl OfficerInfo {
    /// Builds the client view of an officer.
    #[must_use]
    pub fn from_officer(officer: &Officer, last_login_at: Option<String>) -> Self {
        Self {
            id: officer.id.value().to_string(),
            username: officer.username.value().to_string(),
            name: officer.name.clone(),
            role: officer.role.as_str().to_string(),
            role_title: officer.role.title().to_string(),
            mobile: officer.mobile.clone(),
            email: officer.email.clone(),
            district: officer.jurisdiction.district.clone(),
            division: officer.jurisdiction.division.clone(),
            circle: officer.jurisdiction.circle.clone(),
            location: officer.jurisdiction.location.clone(),
            superior_id: officer
                .superior_id
                .as_ref()
                .map(|id| id.value().to_string()),
            status: officer.status.to_string(),
            must_change_password: officer.must_change_password,
            last_login_at,
        }
    }
}

/// A short officer reference used in pickers and hierarchy lists.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OfficerSummary {
    pub id: String,
    pub username: String,
    pub name: String,
    pub role: String,
    pub district: String,
    pub status: String,
}

impl From<&Officer> for OfficerSummary {
    fn from(officer: &Officer) -> Self {
        Self {
            id: officer.id.value().to_string(),
            username: officer.username.value().to_string(),
            name: officer.name.clone(),
            role: officer.role.as_str().to_string(),
            district: officer.jurisdiction.district.clone(),
            status: officer.status.to_string(),
        }
    }
}

/// API request to create an officer. The id and password are generated.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct CreateOfficerRequest {
    pub username: String,
    pub name: String,
    /// Role code, case-insensitive.
    pub role: String,
    pub mobile: String,
    pub email: String,
    pub district: String,
    #[serde(default)]
    pub division: Option<String>,
    #[serde(default)]
    pub circle: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub superior_id: Option<String>,
}

/// API response for a created officer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CreateOfficerResponse {
    pub officer: OfficerInfo,
    /// Shown once. The officer must change it at first login.
    pub temporary_password: String,
    pub message: String,
}

/// API request to edit an officer's profile.
///
/// Omitted fields keep their stored value. For the optional jurisdiction
/// fields and `superior_id`, an empty string clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct UpdateOfficerRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub district: Option<String>,
    pub division: Option<String>,
    pub circle: Option<String>,
    pub location: Option<String>,
    pub superior_id: Option<String>,
}

/// API response for an edit, status toggle or other single-officer change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OfficerActionResponse {
    pub officer: OfficerInfo,
    pub message: String,
}

/// API response for a deleted officer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DeleteOfficerResponse {
    pub officer_id: String,
    pub message: String,
}

/// API response for a password reset.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ResetPasswordResponse {
    pub officer_id: String,
    pub temporary_password: String,
    pub message: String,
}

/// One row of the officer directory.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OfficerListEntry {
    #[serde(flatten)]
    pub officer: OfficerInfo,
    pub capabilities: OfficerCapabilities,
}

/// API response for the officer directory.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ListOfficersResponse {
    pub officers: Vec<OfficerListEntry>,
}

/// API response listing the officers a new officer of `role` may report to.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SuperiorsResponse {
    pub role: String,
    /// The role candidates must hold, if the role reports to anyone.
    pub superior_role: Option<String>,
    pub superiors: Vec<OfficerSummary>,
    /// Explanation shown instead of an empty picker.
    pub message: Option<String>,
}

/// API response listing the caller's subtree.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SubordinatesResponse {
    pub officers: Vec<OfficerSummary>,
}

// ========================================================================
// Returns
// ========================================================================

/// Query selecting a reporting month. Both default to the current month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
pub struct PeriodQuery {
    pub year: Option<u16>,
    pub month: Option<u8>,
}

/// API response describing the return form for the caller's role.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ReturnFormResponse {
    pub role: String,
    pub sections: Vec<FormSection>,
}

/// API request to save or seal a monthly return.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct SubmitReturnRequest {
    pub year: u16,
    pub month: u8,
    /// Field key to the raw value typed into the form.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    #[serde(default)]
    pub remarks: String,
    /// Seal and lock the return instead of saving a draft.
    #[serde(default)]
    pub seal: bool,
}

/// A stored return as presented to clients.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ReturnInfo {
    pub return_id: Option<i64>,
    pub officer_id: String,
    pub role: Role,
    /// `YYYY-MM`.
    pub period: String,
    pub status: ReturnStatus,
    pub remarks: String,
    pub sections: ReturnSections,
    pub submitted_at: Option<String>,
}

impl From<&MonthlyReturn> for ReturnInfo {
    fn from(record: &MonthlyReturn) -> Self {
        Self {
            return_id: record.return_id,
            officer_id: record.officer_id.value().to_string(),
            role: record.role,
            period: record.period.to_string(),
            status: record.status,
            remarks: record.remarks.clone(),
            sections: record.sections.clone(),
            submitted_at: record.submitted_at.clone(),
        }
    }
}

/// API response for the caller's own return.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MyReturnResponse {
    pub period: String,
    /// `None` if nothing has been saved for the period yet.
    pub return_info: Option<ReturnInfo>,
}

/// API response for a saved or sealed return.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SubmitReturnResponse {
    pub return_info: ReturnInfo,
    pub event_id: i64,
    pub message: String,
}

/// API response listing the returns the caller may see.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ListReturnsResponse {
    pub period: String,
    pub returns: Vec<ReturnInfo>,
}

/// API response for the dashboard.
pub type DashboardResponse = Dashboard;

// ========================================================================
// Audit
// ========================================================================

/// Query for the audit trail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
pub struct AuditQuery {
    pub limit: Option<i64>,
}

/// One audit event as presented to clients.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AuditEventInfo {
    pub event_id: Option<i64>,
    pub actor_id: String,
    pub actor_type: String,
    pub actor_username: Option<String>,
    pub actor_name: Option<String>,
    pub cause: String,
    pub action: String,
    pub details: Option<String>,
    pub subject: Option<String>,
    pub before: String,
    pub after: String,
}

impl From<AuditEvent> for AuditEventInfo {
    fn from(event: AuditEvent) -> Self {
        Self {
            event_id: event.event_id,
            actor_id: event.actor.id,
            actor_type: event.actor.actor_type,
            actor_username: event.actor.username,
            actor_name: event.actor.name,
            cause: event.cause.description,
            action: event.action.name,
            details: event.action.details,
            subject: event.subject,
            before: event.before.data,
            after: event.after.data,
        }
    }
}

/// API response for the audit trail, newest first.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ListAuditEventsResponse {
    pub events: Vec<AuditEventInfo>,
}

// ========================================================================
// Capability Model
// ========================================================================

/// Represents whether a specific action is permitted.
///
/// Serializes to JSON as true/false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Allowed,
    Denied,
}

impl Capability {
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl serde::Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

/// What the officer may do across the application. Advisory for the UI;
/// handlers authorize independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct GlobalCapabilities {
    pub can_manage_officers: Capability,
    pub can_file_returns: Capability,
    pub can_view_statewide: Capability,
    pub can_view_audit: Capability,
}

/// What the caller may do to one listed officer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct OfficerCapabilities {
    pub can_edit: Capability,
    pub can_toggle_status: Capability,
    pub can_delete: Capability,
    pub can_reset_password: Capability,
}
