// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use time::format_description::well_known::Iso8601;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use labourdesk_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use labourdesk_domain::{Officer, OfficerId, Role, Username};
use labourdesk_persistence::{OfficerData, PersistenceError, SessionData, SqlitePersistence};

use crate::captcha::CaptchaStore;
use crate::error::{ApiError, AuthError, translate_persistence_error};

/// Message shown to an officer whose account is switched off.
pub const DEACTIVATED_MESSAGE: &str =
    "This account has been deactivated. Please contact the administrator.";

const BAD_CREDENTIALS_MESSAGE: &str = "Invalid username or password";
const BAD_CAPTCHA_MESSAGE: &str = "Incorrect CAPTCHA. Please try again.";

/// An officer with a valid session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedOfficer {
    /// Storage id of the session that authenticated this request.
    pub session_id: i64,
    /// The officer as currently stored.
    pub officer: Officer,
}

impl AuthenticatedOfficer {
    #[must_use]
    pub const fn new(session_id: i64, officer: Officer) -> Self {
        Self {
            session_id,
            officer,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &OfficerId {
        &self.officer.id
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.officer.role
    }

    /// Converts this officer into an audit actor, capturing the username and
    /// name as they are now.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        officer_actor(&self.officer)
    }
}

fn officer_actor(officer: &Officer) -> Actor {
    Actor::officer(
        officer.id.value().to_string(),
        officer.username.value().to_string(),
        officer.name.clone(),
    )
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that the officer may create, edit, delete, toggle and reset
    /// other officers.
    ///
    /// # Errors
    ///
    /// Returns an error unless the officer is a Commissioner or Admin.
    pub fn authorize_manage_officers(actor: &AuthenticatedOfficer) -> Result<(), AuthError> {
        if actor.role().can_manage_officers() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("manage_officers"),
                required_role: String::from("COMMISSIONER or ADMIN"),
            })
        }
    }

    /// Checks that the officer may view the profile of `target`.
    ///
    /// Officers may always view themselves.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is someone else and the officer does
    /// not manage officers.
    pub fn authorize_view_officer(
        actor: &AuthenticatedOfficer,
        target: &OfficerId,
    ) -> Result<(), AuthError> {
        if actor.id() == target {
            return Ok(());
        }
        Self::authorize_manage_officers(actor).map_err(|_| AuthError::Unauthorized {
            action: String::from("view_officer"),
            required_role: String::from("COMMISSIONER or ADMIN"),
        })
    }

    /// Checks that the officer files monthly returns.
    ///
    /// # Errors
    ///
    /// Returns an error for roles outside the filing hierarchy.
    pub fn authorize_file_returns(actor: &AuthenticatedOfficer) -> Result<(), AuthError> {
        if actor.role().files_returns() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("file_return"),
                required_role: String::from("ALO, ACL, DCL or JCL"),
            })
        }
    }

    /// Checks that the officer may read the audit trail.
    ///
    /// # Errors
    ///
    /// Returns an error unless the officer is a Commissioner or Admin.
    pub fn authorize_view_audit(actor: &AuthenticatedOfficer) -> Result<(), AuthError> {
        if actor.role().is_supervisory() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("view_audit"),
                required_role: String::from("COMMISSIONER or ADMIN"),
            })
        }
    }
}

/// The credentials and challenge answer submitted by the login form.
#[derive(Debug, Clone, Copy)]
pub struct LoginAttempt<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub captcha_id: &'a str,
    pub captcha_answer: &'a str,
}

/// A session created by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstablishedSession {
    pub session_token: String,
    pub expires_at: String,
    pub officer: Officer,
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Sessions last one working day.
    const SESSION_LIFETIME: Duration = Duration::hours(12);

    /// Authenticates an officer and creates a session.
    ///
    /// Checks run in order: CAPTCHA, officer exists, password, account
    /// active. Every refusal consumes the submitted challenge and carries a
    /// fresh one. Expired sessions are purged before the new one is created.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::LoginFailed` if any check fails, or an internal
    /// error if storage fails.
    pub fn login(
        persistence: &mut SqlitePersistence,
        captchas: &mut CaptchaStore,
        attempt: &LoginAttempt<'_>,
    ) -> Result<EstablishedSession, ApiError> {
        let refuse = |captchas: &mut CaptchaStore, reason: &str| ApiError::LoginFailed {
            reason: String::from(reason),
            captcha: captchas.issue(),
        };

        if !captchas.verify(attempt.captcha_id, attempt.captcha_answer) {
            debug!(username = attempt.username, "Login refused: CAPTCHA mismatch");
            return Err(refuse(captchas, BAD_CAPTCHA_MESSAGE));
        }

        let Some(stored) = persistence
            .get_officer_by_username(&Username::new(attempt.username))
            .map_err(translate_persistence_error)?
        else {
            SqlitePersistence::verify_password_without_account(attempt.password)
                .map_err(translate_persistence_error)?;
            warn!(username = attempt.username, "Login refused: unknown username");
            return Err(refuse(captchas, BAD_CREDENTIALS_MESSAGE));
        };
        let officer: Officer = stored.officer;

        if !persistence
            .verify_officer_password(&officer.id, attempt.password)
            .map_err(translate_persistence_error)?
        {
            warn!(officer_id = %officer.id, "Login refused: wrong password");
            return Err(refuse(captchas, BAD_CREDENTIALS_MESSAGE));
        }

        if !officer.is_active() {
            warn!(officer_id = %officer.id, "Login refused: account deactivated");
            return Err(refuse(captchas, DEACTIVATED_MESSAGE));
        }

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let purged: usize = persistence
            .delete_expired_sessions(&format_timestamp(now)?)
            .map_err(translate_persistence_error)?;
        if purged > 0 {
            debug!(purged, "Purged expired sessions");
        }

        let session_token: String = Self::generate_session_token(now);
        let expires_at: String = format_timestamp(now + Self::SESSION_LIFETIME)?;
        persistence
            .create_session(&session_token, &officer.id, &expires_at)
            .map_err(translate_persistence_error)?;
        persistence
            .update_last_login(&officer.id)
            .map_err(translate_persistence_error)?;

        Self::record(
            persistence,
            &officer,
            "Login",
            format!("'{}' signed in", officer.username),
        )?;
        info!(officer_id = %officer.id, role = %officer.role, "Officer logged in");

        Ok(EstablishedSession {
            session_token,
            expires_at,
            officer,
        })
    }

    /// Validates a session token and returns the authenticated officer.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or expired, or if its
    /// officer no longer exists or has been deactivated.
    pub fn validate_session(
        persistence: &mut SqlitePersistence,
        session_token: &str,
    ) -> Result<AuthenticatedOfficer, AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(&session.expires_at, &Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to parse session expiration: {e}"),
            })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let stored: OfficerData = persistence
            .get_officer_by_id(&OfficerId::new(session.officer_id.as_str()))
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Officer not found"),
            })?;

        if !stored.officer.is_active() {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from(DEACTIVATED_MESSAGE),
            });
        }

        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        Ok(AuthenticatedOfficer::new(session.session_id, stored.officer))
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
    ) -> Result<(), ApiError> {
        persistence
            .delete_session(session_token)
            .map_err(translate_persistence_error)?;

        Self::record(
            persistence,
            &actor.officer,
            "Logout",
            format!("'{}' signed out", actor.officer.username),
        )?;
        info!(officer_id = %actor.id(), "Officer logged out");

        Ok(())
    }

    fn record(
        persistence: &mut SqlitePersistence,
        officer: &Officer,
        action: &str,
        details: String,
    ) -> Result<(), ApiError> {
        let event: AuditEvent = AuditEvent::new(
            officer_actor(officer),
            Cause::new(
                format!("auth-{}", action.to_lowercase()),
                format!("{action} request"),
            ),
            Action::new(String::from(action), Some(details)),
            StateSnapshot::empty(),
            StateSnapshot::empty(),
            Some(officer.id.value().to_string()),
        );
        persistence
            .persist_audit_event(&event)
            .map_err(translate_persistence_error)?;
        Ok(())
    }

    fn generate_session_token(now: OffsetDateTime) -> String {
        format!(
            "session_{}_{:016x}{:016x}",
            now.unix_timestamp_nanos(),
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }

    fn map_persistence_error(err: PersistenceError) -> AuthError {
        AuthError::AuthenticationFailed {
            reason: format!("Database error: {err}"),
        }
    }
}

/// Formats a timestamp the way sessions store them.
///
/// # Errors
///
/// Returns an internal error if the timestamp cannot be formatted.
pub fn format_timestamp(at: OffsetDateTime) -> Result<String, ApiError> {
    at.format(&Iso8601::DEFAULT).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}
