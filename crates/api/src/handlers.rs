// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request handlers.
//!
//! Every handler takes the persistence layer, the request, the
//! authenticated officer and the cause, authorizes first, and then runs the
//! pure transition before anything is written.

use std::collections::HashSet;
use std::net::IpAddr;
use std::str::FromStr;

use time::OffsetDateTime;
use tracing::{debug, info};

use labourdesk::{
    Command, Directory, OfficerUpdate, ReturnCommand, ReturnTransition, TransitionResult, apply,
    apply_return,
};
use labourdesk_audit::{Action, AuditEvent, Cause, StateSnapshot};
use labourdesk_domain::{
    Dashboard, Jurisdiction, MonthlyReturn, Officer, OfficerId, OfficerProfile, ReportingPeriod,
    ReturnSections, ReturnStatus, Role, TREND_MONTHS, Username, build_dashboard,
    check_remarks_requirement, form_layout, parse_return_form, scope_of, subtree,
    superior_candidates, validate_filing_period,
};
use labourdesk_persistence::{OfficerData, SqlitePersistence};

use crate::auth::{
    AuthenticatedOfficer, AuthenticationService, AuthorizationService, EstablishedSession,
    LoginAttempt,
};
use crate::capabilities::{compute_global_capabilities, compute_officer_capabilities};
use crate::captcha::CaptchaStore;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::password_policy::{PasswordCandidate, PasswordPolicy, generate_temporary_password};
use crate::request_response::{
    AuditEventInfo, AuditQuery, CaptchaResponse, ChangePasswordRequest, CreateOfficerRequest,
    CreateOfficerResponse, DashboardResponse, DeleteOfficerResponse, ListAuditEventsResponse,
    ListOfficersResponse, ListReturnsResponse, LoginRequest, LoginResponse, MessageResponse,
    MyReturnResponse, OfficerActionResponse, OfficerInfo, OfficerListEntry, OfficerSummary,
    PeriodQuery, ResetPasswordResponse, ReturnFormResponse, ReturnInfo, SubmitReturnRequest,
    SubmitReturnResponse, SubordinatesResponse, SuperiorsResponse, UpdateOfficerRequest,
    WhoAmIResponse,
};

/// Default number of audit events returned.
pub const DEFAULT_AUDIT_LIMIT: i64 = 100;

/// Most audit events returned in one request.
pub const MAX_AUDIT_LIMIT: i64 = 1000;

/// The reporting period containing today (UTC).
#[must_use]
pub fn current_period() -> ReportingPeriod {
    ReportingPeriod::containing(OffsetDateTime::now_utc().date())
}

// ========================================================================
// Authentication
// ========================================================================

/// Issues a CAPTCHA challenge for the login form, counted against the
/// requesting client's share of the store.
pub fn issue_captcha(captchas: &mut CaptchaStore, client: IpAddr) -> CaptchaResponse {
    captchas.issue_for(client)
}

/// Logs an officer in.
///
/// # Errors
///
/// Returns `ApiError::LoginFailed`, carrying a fresh challenge, if the
/// CAPTCHA, the credentials or the account status check fails.
pub fn login(
    persistence: &mut SqlitePersistence,
    captchas: &mut CaptchaStore,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let session: EstablishedSession = AuthenticationService::login(
        persistence,
        captchas,
        &LoginAttempt {
            username: &request.username,
            password: &request.password,
            captcha_id: &request.captcha_id,
            captcha_answer: &request.captcha_answer,
        },
    )?;

    let stored: OfficerData = load_officer(persistence, &session.officer.id)?;

    Ok(LoginResponse {
        session_token: session.session_token,
        expires_at: session.expires_at,
        must_change_password: session.officer.must_change_password,
        dashboard_title: session.officer.role.dashboard_title().to_string(),
        capabilities: compute_global_capabilities(&session.officer),
        officer: OfficerInfo::from_officer(&stored.officer, stored.last_login_at),
    })
}

/// Logs out by deleting the session.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn logout(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedOfficer,
    session_token: &str,
) -> Result<MessageResponse, ApiError> {
    AuthenticationService::logout(persistence, actor, session_token)?;
    Ok(MessageResponse {
        message: String::from("Logged out"),
    })
}

/// Returns the current officer's profile with global capabilities.
///
/// # Errors
///
/// Returns an error if the officer can no longer be loaded.
pub fn whoami(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedOfficer,
) -> Result<WhoAmIResponse, ApiError> {
    let stored: OfficerData = load_officer(persistence, actor.id())?;

    Ok(WhoAmIResponse {
        dashboard_title: stored.officer.role.dashboard_title().to_string(),
        capabilities: compute_global_capabilities(&stored.officer),
        officer: OfficerInfo::from_officer(&stored.officer, stored.last_login_at),
    })
}

/// Changes the caller's own password.
///
/// Clears the must-change flag and ends every session of the officer,
/// including the one making this request.
///
/// # Errors
///
/// Returns an error if:
/// - the current password is wrong
/// - the new password breaks the policy
/// - storage fails
pub fn change_password(
    persistence: &mut SqlitePersistence,
    request: &ChangePasswordRequest,
    actor: &AuthenticatedOfficer,
    cause: Cause,
) -> Result<MessageResponse, ApiError> {
    let current_ok: bool = persistence
        .verify_officer_password(actor.id(), &request.current_password)
        .map_err(translate_persistence_error)?;
    if !current_ok {
        return Err(ApiError::AuthenticationFailed {
            reason: String::from("Current password is incorrect"),
        });
    }

    PasswordPolicy::default().validate(&PasswordCandidate {
        password: &request.new_password,
        confirmation: &request.new_password_confirmation,
        username: actor.officer.username.value(),
        name: &actor.officer.name,
        current_password: Some(&request.current_password),
    })?;

    let event: AuditEvent = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        Action::new(
            String::from("ChangePassword"),
            Some(format!("'{}' changed their own password", actor.officer.username)),
        ),
        StateSnapshot::new(format!("officer_id={}", actor.id())),
        StateSnapshot::new(format!("officer_id={},password_changed", actor.id())),
        Some(actor.id().value().to_string()),
    );
    persistence
        .persist_password_change(actor.id(), &request.new_password, false, &event)
        .map_err(translate_persistence_error)?;

    info!(officer_id = %actor.id(), "Password changed");

    Ok(MessageResponse {
        message: String::from("Password changed successfully. Please log in again."),
    })
}

// ========================================================================
// Officer Management
// ========================================================================

/// Lists every officer with what the caller may do to each.
///
/// # Errors
///
/// Returns an error if the caller does not manage officers or storage fails.
pub fn list_officers(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedOfficer,
) -> Result<ListOfficersResponse, ApiError> {
    AuthorizationService::authorize_manage_officers(actor)?;

    let stored: Vec<OfficerData> = persistence
        .list_officers()
        .map_err(translate_persistence_error)?;
    let directory: Vec<Officer> = stored.iter().map(|data| data.officer.clone()).collect();

    let officers: Vec<OfficerListEntry> = stored
        .into_iter()
        .map(|data| OfficerListEntry {
            capabilities: compute_officer_capabilities(actor, &data.officer, &directory),
            officer: OfficerInfo::from_officer(&data.officer, data.last_login_at),
        })
        .collect();

    Ok(ListOfficersResponse { officers })
}

/// Returns one officer's profile.
///
/// # Errors
///
/// Returns an error if the caller may not view the officer or it does not
/// exist.
pub fn get_officer(
    persistence: &mut SqlitePersistence,
    officer_id: &str,
    actor: &AuthenticatedOfficer,
) -> Result<OfficerInfo, ApiError> {
    let id: OfficerId = OfficerId::new(officer_id);
    AuthorizationService::authorize_view_officer(actor, &id)?;

    let stored: OfficerData = load_officer(persistence, &id)?;
    Ok(OfficerInfo::from_officer(&stored.officer, stored.last_login_at))
}

/// Creates an officer with a generated id and temporary password.
///
/// # Errors
///
/// Returns an error if:
/// - the caller does not manage officers
/// - the role code is unknown
/// - the officer fails validation or breaks the hierarchy
/// - storage fails
pub fn create_officer(
    persistence: &mut SqlitePersistence,
    request: CreateOfficerRequest,
    actor: &AuthenticatedOfficer,
    cause: Cause,
) -> Result<CreateOfficerResponse, ApiError> {
    AuthorizationService::authorize_manage_officers(actor)?;

    let role: Role = Role::from_str(&request.role).map_err(translate_domain_error)?;
    let profile: OfficerProfile = OfficerProfile {
        username: Username::new(&request.username),
        name: request.name.trim().to_string(),
        role,
        mobile: request.mobile.trim().to_string(),
        email: request.email.trim().to_string(),
        jurisdiction: Jurisdiction {
            district: request.district.trim().to_string(),
            division: non_blank(request.division),
            circle: non_blank(request.circle),
            location: non_blank(request.location),
        },
        superior_id: non_blank(request.superior_id).map(OfficerId::new),
    };
    let officer: Officer = Officer::from_profile(generate_officer_id(), profile, true);
    let temporary_password: String = generate_temporary_password();

    let result: TransitionResult = run_command(
        persistence,
        Command::CreateOfficer { officer },
        actor,
        cause,
        Some(&temporary_password),
    )?;
    let created: &Officer = result.change.officer();

    info!(
        officer_id = %created.id,
        username = %created.username,
        role = %created.role,
        "Officer created"
    );

    Ok(CreateOfficerResponse {
        officer: OfficerInfo::from_officer(created, None),
        temporary_password,
        message: format!(
            "Officer '{}' created. Share the temporary password; it must be changed at first login.",
            created.username
        ),
    })
}

/// Edits an officer's profile. Omitted fields keep their stored values.
///
/// # Errors
///
/// Returns an error if:
/// - the caller does not manage officers
/// - the officer does not exist
/// - the edited profile fails validation or breaks the hierarchy
/// - storage fails
pub fn update_officer(
    persistence: &mut SqlitePersistence,
    officer_id: &str,
    request: UpdateOfficerRequest,
    actor: &AuthenticatedOfficer,
    cause: Cause,
) -> Result<OfficerActionResponse, ApiError> {
    AuthorizationService::authorize_manage_officers(actor)?;

    let id: OfficerId = OfficerId::new(officer_id);
    let stored: OfficerData = load_officer(persistence, &id)?;
    let existing: Officer = stored.officer;

    let role: Role = match request.role {
        Some(code) => Role::from_str(&code).map_err(translate_domain_error)?,
        None => existing.role,
    };
    let update: OfficerUpdate = OfficerUpdate {
        name: request
            .name
            .map_or(existing.name, |name| name.trim().to_string()),
        role,
        mobile: request
            .mobile
            .map_or(existing.mobile, |mobile| mobile.trim().to_string()),
        email: request
            .email
            .map_or(existing.email, |email| email.trim().to_string()),
        jurisdiction: Jurisdiction {
            district: request
                .district
                .map_or(existing.jurisdiction.district, |d| d.trim().to_string()),
            division: merge_optional(request.division, existing.jurisdiction.division),
            circle: merge_optional(request.circle, existing.jurisdiction.circle),
            location: merge_optional(request.location, existing.jurisdiction.location),
        },
        superior_id: merge_optional(
            request.superior_id,
            existing.superior_id.map(|s| s.value().to_string()),
        )
        .map(OfficerId::new),
    };

    let result: TransitionResult = run_command(
        persistence,
        Command::UpdateOfficer {
            officer_id: id,
            update,
        },
        actor,
        cause,
        None,
    )?;
    let updated: &Officer = result.change.officer();

    info!(officer_id = %updated.id, "Officer updated");

    Ok(OfficerActionResponse {
        officer: OfficerInfo::from_officer(updated, stored.last_login_at),
        message: format!("Profile of '{}' updated", updated.username),
    })
}

/// Switches an officer between Active and Inactive.
///
/// Deactivation ends the officer's sessions.
///
/// # Errors
///
/// Returns an error if:
/// - the caller does not manage officers
/// - the officer does not exist
/// - the caller would deactivate themselves
/// - storage fails
pub fn toggle_officer_status(
    persistence: &mut SqlitePersistence,
    officer_id: &str,
    actor: &AuthenticatedOfficer,
    cause: Cause,
) -> Result<OfficerActionResponse, ApiError> {
    AuthorizationService::authorize_manage_officers(actor)?;

    let id: OfficerId = OfficerId::new(officer_id);
    let stored: OfficerData = load_officer(persistence, &id)?;

    let result: TransitionResult = run_command(
        persistence,
        Command::ToggleOfficerStatus { officer_id: id },
        actor,
        cause,
        None,
    )?;
    let toggled: &Officer = result.change.officer();

    info!(officer_id = %toggled.id, status = %toggled.status, "Officer status changed");

    Ok(OfficerActionResponse {
        officer: OfficerInfo::from_officer(toggled, stored.last_login_at),
        message: format!("'{}' is now {}", toggled.username, toggled.status),
    })
}

/// Deletes an officer.
///
/// # Errors
///
/// Returns an error if:
/// - the caller does not manage officers
/// - the caller targets their own profile
/// - the officer does not exist or still has direct reports
/// - storage fails
pub fn delete_officer(
    persistence: &mut SqlitePersistence,
    officer_id: &str,
    actor: &AuthenticatedOfficer,
    cause: Cause,
) -> Result<DeleteOfficerResponse, ApiError> {
    AuthorizationService::authorize_manage_officers(actor)?;

    let result: TransitionResult = run_command(
        persistence,
        Command::DeleteOfficer {
            officer_id: OfficerId::new(officer_id),
        },
        actor,
        cause,
        None,
    )?;
    let deleted: &Officer = result.change.officer();

    info!(officer_id = %deleted.id, username = %deleted.username, "Officer deleted");

    Ok(DeleteOfficerResponse {
        officer_id: deleted.id.value().to_string(),
        message: format!("Officer '{}' deleted", deleted.username),
    })
}

/// Issues a new temporary password for an officer.
///
/// The officer must change it at next login. Their sessions end.
///
/// # Errors
///
/// Returns an error if the caller does not manage officers, the officer does
/// not exist, or storage fails.
pub fn reset_password(
    persistence: &mut SqlitePersistence,
    officer_id: &str,
    actor: &AuthenticatedOfficer,
    cause: Cause,
) -> Result<ResetPasswordResponse, ApiError> {
    AuthorizationService::authorize_manage_officers(actor)?;

    let id: OfficerId = OfficerId::new(officer_id);
    let target: Officer = load_officer(persistence, &id)?.officer;
    let temporary_password: String = generate_temporary_password();

    let event: AuditEvent = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        Action::new(
            String::from("ResetPassword"),
            Some(format!(
                "'{}' reset the password of '{}'",
                actor.officer.username, target.username
            )),
        ),
        StateSnapshot::new(format!("officer_id={id},username={}", target.username)),
        StateSnapshot::new(format!(
            "officer_id={id},username={},password_reset",
            target.username
        )),
        Some(id.value().to_string()),
    );
    persistence
        .persist_password_change(&id, &temporary_password, true, &event)
        .map_err(translate_persistence_error)?;

    info!(officer_id = %id, "Password reset");

    Ok(ResetPasswordResponse {
        officer_id: id.value().to_string(),
        temporary_password,
        message: format!(
            "Password of '{}' reset. All of their sessions have been ended.",
            target.username
        ),
    })
}

// ========================================================================
// Hierarchy
// ========================================================================

/// Lists the officers that an officer of `role` may report to.
///
/// # Errors
///
/// Returns an error if the role code is unknown or storage fails.
pub fn list_superiors(
    persistence: &mut SqlitePersistence,
    role: &str,
    _actor: &AuthenticatedOfficer,
) -> Result<SuperiorsResponse, ApiError> {
    let role: Role = Role::from_str(role).map_err(translate_domain_error)?;
    let directory: Directory = load_directory(persistence)?;

    let superiors: Vec<OfficerSummary> = superior_candidates(role, &directory.officers)
        .into_iter()
        .map(OfficerSummary::from)
        .collect();
    let message: Option<String> = superiors
        .is_empty()
        .then(|| String::from("No superiors found"));

    Ok(SuperiorsResponse {
        role: role.as_str().to_string(),
        superior_role: role.superior_role().map(|r| r.as_str().to_string()),
        superiors,
        message,
    })
}

/// Lists everyone reporting to the caller, directly or transitively.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn list_subordinates(
    persistence: &mut SqlitePersistence,
    actor: &AuthenticatedOfficer,
) -> Result<SubordinatesResponse, ApiError> {
    let directory: Directory = load_directory(persistence)?;
    let officers: Vec<OfficerSummary> = subtree(actor.id(), &directory.officers)
        .into_iter()
        .map(OfficerSummary::from)
        .collect();
    Ok(SubordinatesResponse { officers })
}

// ========================================================================
// Monthly Returns
// ========================================================================

/// Describes the return form the caller fills in.
///
/// # Errors
///
/// Returns an error if the caller's role does not file returns.
pub fn return_form(actor: &AuthenticatedOfficer) -> Result<ReturnFormResponse, ApiError> {
    AuthorizationService::authorize_file_returns(actor)?;
    Ok(ReturnFormResponse {
        role: actor.role().as_str().to_string(),
        sections: form_layout(actor.role()),
    })
}

/// Returns the caller's own return for a period, if one is stored.
///
/// # Errors
///
/// Returns an error if the caller does not file returns, the period is
/// invalid, or storage fails.
pub fn my_return(
    persistence: &mut SqlitePersistence,
    query: PeriodQuery,
    actor: &AuthenticatedOfficer,
    current: ReportingPeriod,
) -> Result<MyReturnResponse, ApiError> {
    AuthorizationService::authorize_file_returns(actor)?;
    let period: ReportingPeriod = resolve_period(query, current)?;

    let stored: Option<MonthlyReturn> = persistence
        .get_return(actor.id(), period)
        .map_err(translate_persistence_error)?;

    Ok(MyReturnResponse {
        period: period.to_string(),
        return_info: stored.as_ref().map(ReturnInfo::from),
    })
}

/// Saves or seals the caller's return for a month.
///
/// The whole form is validated first. Nothing is written unless every field
/// is valid, remarks are present when grievance pendency rose, and the
/// stored return for the month is not locked.
///
/// # Errors
///
/// Returns an error if:
/// - the caller does not file returns
/// - the period is invalid or in the future
/// - any field is invalid (`FormValidation`)
/// - the return is already locked
/// - storage fails
pub fn submit_return(
    persistence: &mut SqlitePersistence,
    request: SubmitReturnRequest,
    actor: &AuthenticatedOfficer,
    cause: Cause,
    current: ReportingPeriod,
) -> Result<SubmitReturnResponse, ApiError> {
    AuthorizationService::authorize_file_returns(actor)?;

    let period: ReportingPeriod =
        ReportingPeriod::new(request.year, request.month).map_err(translate_domain_error)?;
    validate_filing_period(period, current).map_err(translate_domain_error)?;

    let sections: ReturnSections = parse_return_form(actor.role(), &request.fields)
        .map_err(|errors| ApiError::FormValidation { errors })?;

    let previous: Option<MonthlyReturn> = persistence
        .get_return(actor.id(), period.previous())
        .map_err(translate_persistence_error)?;
    check_remarks_requirement(
        &sections,
        &request.remarks,
        previous.as_ref().map(|r| &r.sections),
    )
    .map_err(|errors| ApiError::FormValidation { errors })?;

    let existing: Option<MonthlyReturn> = persistence
        .get_return(actor.id(), period)
        .map_err(translate_persistence_error)?;

    let draft: MonthlyReturn = MonthlyReturn {
        return_id: None,
        officer_id: actor.id().clone(),
        role: actor.role(),
        period,
        status: ReturnStatus::Draft,
        remarks: request.remarks.trim().to_string(),
        sections,
        submitted_at: None,
    };
    let command: ReturnCommand = if request.seal {
        ReturnCommand::Seal { draft }
    } else {
        ReturnCommand::SaveDraft { draft }
    };

    let transition: ReturnTransition = apply_return(
        existing.as_ref(),
        command,
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;
    let (return_id, event_id): (i64, i64) = persistence
        .persist_return(&transition)
        .map_err(translate_persistence_error)?;

    let stored: MonthlyReturn = persistence
        .get_return(actor.id(), period)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::Internal {
            message: format!("Return {return_id} not found after write"),
        })?;

    let sealed: bool = stored.status.is_locked();
    info!(
        officer_id = %actor.id(),
        period = %period,
        status = %stored.status,
        "Return written"
    );

    Ok(SubmitReturnResponse {
        return_info: ReturnInfo::from(&stored),
        event_id,
        message: if sealed {
            format!("Return for {period} submitted and locked")
        } else {
            format!("Draft return for {period} saved")
        },
    })
}

/// Lists the returns for a period that the caller may see: their own and
/// their subtree's, or everyone's for supervisory roles.
///
/// # Errors
///
/// Returns an error if the period is invalid or storage fails.
pub fn list_returns(
    persistence: &mut SqlitePersistence,
    query: PeriodQuery,
    actor: &AuthenticatedOfficer,
    current: ReportingPeriod,
) -> Result<ListReturnsResponse, ApiError> {
    let period: ReportingPeriod = resolve_period(query, current)?;
    let directory: Directory = load_directory(persistence)?;
    let scope: HashSet<&OfficerId> = scope_of(&actor.officer, &directory.officers)
        .into_iter()
        .map(|officer| &officer.id)
        .collect();

    let returns: Vec<ReturnInfo> = persistence
        .list_returns_for_period(period)
        .map_err(translate_persistence_error)?
        .iter()
        .filter(|record| scope.contains(&record.officer_id))
        .map(ReturnInfo::from)
        .collect();

    debug!(officer_id = %actor.id(), count = returns.len(), "Listed returns");

    Ok(ListReturnsResponse {
        period: period.to_string(),
        returns,
    })
}

/// Builds the caller's role-specific dashboard for a period.
///
/// # Errors
///
/// Returns an error if the period is invalid or storage fails.
pub fn dashboard(
    persistence: &mut SqlitePersistence,
    query: PeriodQuery,
    actor: &AuthenticatedOfficer,
    current: ReportingPeriod,
) -> Result<DashboardResponse, ApiError> {
    let period: ReportingPeriod = resolve_period(query, current)?;
    let directory: Directory = load_directory(persistence)?;

    let window: Vec<ReportingPeriod> = period.trailing(TREND_MONTHS);
    let from: ReportingPeriod = window.first().copied().unwrap_or(period);
    let returns: Vec<MonthlyReturn> = persistence
        .list_returns_between(from, period)
        .map_err(translate_persistence_error)?;

    let dashboard: Dashboard =
        build_dashboard(&actor.officer, period, &directory.officers, &returns);
    Ok(dashboard)
}

// ========================================================================
// Audit
// ========================================================================

/// Lists the most recent audit events, newest first.
///
/// # Errors
///
/// Returns an error if the caller may not view the trail or storage fails.
pub fn list_audit_events(
    persistence: &mut SqlitePersistence,
    query: AuditQuery,
    actor: &AuthenticatedOfficer,
) -> Result<ListAuditEventsResponse, ApiError> {
    AuthorizationService::authorize_view_audit(actor)?;

    let limit: i64 = query
        .limit
        .unwrap_or(DEFAULT_AUDIT_LIMIT)
        .clamp(1, MAX_AUDIT_LIMIT);
    let events: Vec<AuditEventInfo> = persistence
        .list_audit_events(limit)
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(AuditEventInfo::from)
        .collect();

    Ok(ListAuditEventsResponse { events })
}

// ========================================================================
// Helpers
// ========================================================================

fn run_command(
    persistence: &mut SqlitePersistence,
    command: Command,
    actor: &AuthenticatedOfficer,
    cause: Cause,
    initial_password: Option<&str>,
) -> Result<TransitionResult, ApiError> {
    let directory: Directory = load_directory(persistence)?;
    let result: TransitionResult = apply(
        &directory,
        command,
        actor.id(),
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;
    persistence
        .persist_transition(&result, initial_password)
        .map_err(translate_persistence_error)?;
    Ok(result)
}

fn load_directory(persistence: &mut SqlitePersistence) -> Result<Directory, ApiError> {
    persistence
        .load_directory()
        .map_err(translate_persistence_error)
}

fn load_officer(
    persistence: &mut SqlitePersistence,
    id: &OfficerId,
) -> Result<OfficerData, ApiError> {
    persistence
        .get_officer_by_id(id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Officer"),
            message: format!("Officer '{id}' does not exist"),
        })
}

fn resolve_period(
    query: PeriodQuery,
    current: ReportingPeriod,
) -> Result<ReportingPeriod, ApiError> {
    ReportingPeriod::new(
        query.year.unwrap_or(current.year()),
        query.month.unwrap_or(current.month()),
    )
    .map_err(translate_domain_error)
}

fn generate_officer_id() -> OfficerId {
    OfficerId::new(format!("off_{:016x}", rand::random::<u64>()))
}

/// Trims an optional text field, treating blank as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Applies an optional edit: absent keeps `current`, blank clears it.
fn merge_optional(edit: Option<String>, current: Option<String>) -> Option<String> {
    match edit {
        None => current,
        Some(value) => non_blank(Some(value)),
    }
}
