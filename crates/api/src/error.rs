// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::captcha::CaptchaChallenge;
use crate::password_policy::PasswordPolicyError;
use labourdesk::CoreError;
use labourdesk_domain::{DomainError, FieldErrors};
use labourdesk_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The session is missing, expired or no longer valid.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// A login attempt was refused. The failed challenge is gone, so a new
    /// one is handed back with the error.
    LoginFailed {
        /// User-visible reason.
        reason: String,
        /// Fresh challenge for the next attempt.
        captcha: CaptchaChallenge,
    },
    /// Authorization failed - the officer does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of the error.
        message: String,
    },
    /// A return form had one or more invalid fields.
    FormValidation {
        /// Field key to message.
        errors: FieldErrors,
    },
    /// The requested resource was not found.
    ResourceNotFound {
        /// The type of resource.
        resource_type: String,
        /// A description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the error.
        message: String,
    },
    /// Password does not meet policy requirements.
    PasswordPolicyViolation {
        /// A description of the violation.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } | Self::LoginFailed { reason, .. } => {
                write!(f, "{reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
            Self::DomainRuleViolation { message, .. } => write!(f, "{message}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::FormValidation { errors } => {
                write!(
                    f,
                    "The return has {} invalid field(s). Correct them and resubmit",
                    errors.len()
                )
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Translates a persistence error into an API error.
///
/// Storage-level rule violations keep their meaning; anything else is
/// internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::OfficerNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Officer"),
            message: format!("Officer '{id}' does not exist"),
        },
        PersistenceError::ReturnLocked { officer_id, period } => ApiError::DomainRuleViolation {
            rule: String::from("return_locked"),
            message: format!("The {period} return of '{officer_id}' is locked and cannot be changed"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidUsername(_) => invalid("username", message),
        DomainError::InvalidName(_) => invalid("name", message),
        DomainError::InvalidMobile(_) => invalid("mobile", message),
        DomainError::InvalidEmail(_) => invalid("email", message),
        DomainError::InvalidDistrict(_) => invalid("district", message),
        DomainError::InvalidRole(_) => invalid("role", message),
        DomainError::InvalidStatus(_) | DomainError::InvalidReturnStatus(_) => {
            invalid("status", message)
        }
        DomainError::InvalidPeriod(_) | DomainError::FuturePeriod(_) => invalid("period", message),
        DomainError::SuperiorNotFound { .. } => invalid("superior_id", message),
        DomainError::OfficerNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Officer"),
            message,
        },
        DomainError::DuplicateUsername(_) => rule("unique_username", message),
        DomainError::DuplicateOfficerId(_) => rule("unique_officer_id", message),
        DomainError::SuperiorRankMismatch { .. } => rule("superior_rank", message),
        DomainError::SuperiorNotAllowed(_) => rule("no_superior_for_role", message),
        DomainError::SuperiorRequired(_) => rule("superior_required", message),
        DomainError::SelfSuperior(_) => rule("no_self_superior", message),
        DomainError::CannotDeleteSelf => rule("no_self_delete", message),
        DomainError::CannotDeactivateSelf => rule("no_self_deactivate", message),
        DomainError::HasSubordinates { .. } => rule("no_orphaned_subordinates", message),
        DomainError::HasSealedReturns(_) => rule("has_sealed_returns", message),
        DomainError::RoleChangeStrandsSubordinates { .. } => {
            rule("no_stranded_subordinates", message)
        }
        DomainError::RoleDoesNotFileReturns(_) => rule("filing_role", message),
        DomainError::ReturnLocked { .. } => rule("return_locked", message),
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

fn invalid(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: String::from(field),
        message,
    }
}

fn rule(rule: &str, message: String) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: String::from(rule),
        message,
    }
}
