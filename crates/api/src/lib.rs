// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for labourdesk.
//!
//! This crate sits between the HTTP server and the core. It owns:
//! - session authentication with a CAPTCHA-guarded login
//! - role-based authorization and UI capabilities
//! - the password policy and temporary password generation
//! - request/response DTOs
//! - translation of domain, core and storage errors into [`ApiError`]
//!
//! Handlers are plain functions over [`SqlitePersistence`]; the server
//! decides how they are scheduled.
//!
//! [`SqlitePersistence`]: labourdesk_persistence::SqlitePersistence

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod bootstrap;
mod capabilities;
mod captcha;
mod error;
mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{
    AuthenticatedOfficer, AuthenticationService, AuthorizationService, DEACTIVATED_MESSAGE,
    EstablishedSession, LoginAttempt, format_timestamp,
};
pub use bootstrap::{DEMO_PASSWORD, demo_officer_id, seed_demo_roster};
pub use capabilities::{compute_global_capabilities, compute_officer_capabilities};
pub use captcha::{
    CAPTCHA_LENGTH, CAPTCHA_TTL, CaptchaChallenge, CaptchaStore, DEFAULT_CAPTCHA_CAPACITY,
    DEFAULT_PER_CLIENT_LIMIT,
};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    DEFAULT_AUDIT_LIMIT, MAX_AUDIT_LIMIT, change_password, create_officer, current_period,
    dashboard, delete_officer, get_officer, issue_captcha, list_audit_events, list_officers,
    list_returns, list_subordinates, list_superiors, login, logout, my_return, reset_password,
    return_form, submit_return, toggle_officer_status, update_officer, whoami,
};
pub use password_policy::{
    PasswordCandidate, PasswordPolicy, PasswordPolicyError, TEMPORARY_PASSWORD_LENGTH,
    generate_temporary_password,
};
pub use request_response::{
    AuditEventInfo, AuditQuery, Capability, CaptchaResponse, ChangePasswordRequest,
    CreateOfficerRequest, CreateOfficerResponse, DashboardResponse, DeleteOfficerResponse,
    GlobalCapabilities, ListAuditEventsResponse, ListOfficersResponse, ListReturnsResponse,
    LoginRequest, LoginResponse, MessageResponse, MyReturnResponse, OfficerActionResponse,
    OfficerCapabilities, OfficerInfo, OfficerListEntry, OfficerSummary, PeriodQuery,
    ResetPasswordResponse, ReturnFormResponse, ReturnInfo, SubmitReturnRequest,
    SubmitReturnResponse, SubordinatesResponse, SuperiorsResponse, UpdateOfficerRequest,
    WhoAmIResponse,
};
