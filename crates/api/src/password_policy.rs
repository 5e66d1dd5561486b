// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Officer password rules and temporary password generation.

use thiserror::Error;

const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijkmnpqrstuvwxyz";
const DIGITS: &[u8] = b"23456789";
const SYMBOLS: &[u8] = b"#@%+=!";

/// Length of generated temporary passwords.
pub const TEMPORARY_PASSWORD_LENGTH: usize = 12;

/// Password policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min_length} characters long")]
    TooShort { min_length: usize },

    #[error(
        "Password must contain at least {required} of the following: uppercase letter, lowercase letter, digit, symbol (found {found})"
    )]
    InsufficientComplexity { required: usize, found: usize },

    /// Password equals the username, display name or current password.
    #[error("Password must not match your {field}")]
    MatchesForbiddenField { field: String },

    #[error("New password and confirmation do not match")]
    ConfirmationMismatch,
}

/// The values a new password is checked against.
#[derive(Debug, Clone, Copy)]
pub struct PasswordCandidate<'a> {
    pub password: &'a str,
    pub confirmation: &'a str,
    pub username: &'a str,
    pub name: &'a str,
    /// The password being replaced, when the officer is changing their own.
    pub current_password: Option<&'a str>,
}

/// Password policy configuration.
pub struct PasswordPolicy {
    pub min_length: usize,
    /// Character classes required, out of 4.
    pub min_complexity: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 10,
            min_complexity: 3,
        }
    }
}

impl PasswordPolicy {
    /// Validates a candidate password.
    ///
    /// Checks run in order: confirmation, length, complexity, then the
    /// forbidden values (compared case-insensitively).
    ///
    /// # Errors
    ///
    /// Returns the first rule the password breaks.
    pub fn validate(&self, candidate: &PasswordCandidate<'_>) -> Result<(), PasswordPolicyError> {
        if candidate.password != candidate.confirmation {
            return Err(PasswordPolicyError::ConfirmationMismatch);
        }

        if candidate.password.chars().count() < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min_length: self.min_length,
            });
        }

        let complexity: usize = Self::calculate_complexity(candidate.password);
        if complexity < self.min_complexity {
            return Err(PasswordPolicyError::InsufficientComplexity {
                required: self.min_complexity,
                found: complexity,
            });
        }

        let lowered: String = candidate.password.to_lowercase();
        let forbidden: [(&str, Option<&str>); 3] = [
            ("username", Some(candidate.username)),
            ("name", Some(candidate.name)),
            ("current password", candidate.current_password),
        ];
        for (field, value) in forbidden {
            if value.is_some_and(|value| value.trim().to_lowercase() == lowered) {
                return Err(PasswordPolicyError::MatchesForbiddenField {
                    field: String::from(field),
                });
            }
        }

        Ok(())
    }

    /// Number of character classes present: uppercase, lowercase, digit,
    /// symbol.
    fn calculate_complexity(password: &str) -> usize {
        let classes: [bool; 4] = [
            password.chars().any(|c| c.is_ascii_uppercase()),
            password.chars().any(|c| c.is_ascii_lowercase()),
            password.chars().any(|c| c.is_ascii_digit()),
            password
                .chars()
                .any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
        ];
        classes.iter().filter(|present| **present).count()
    }
}

/// Generates a random temporary password that satisfies the default policy.
///
/// Every character class appears at least once. Characters that are easy to
/// misread (`0`, `O`, `1`, `l`, `I`) are excluded.
#[must_use]
pub fn generate_temporary_password() -> String {
    let pools: [&[u8]; 4] = [UPPER, LOWER, DIGITS, SYMBOLS];

    let mut chars: Vec<u8> = pools.iter().map(|pool| pick(pool)).collect();
    while chars.len() < TEMPORARY_PASSWORD_LENGTH {
        let pool: &[u8] = pools[rand::random_range(0..pools.len())];
        chars.push(pick(pool));
    }

    for i in (1..chars.len()).rev() {
        let j: usize = rand::random_range(0..=i);
        chars.swap(i, j);
    }

    chars.into_iter().map(char::from).collect()
}

fn pick(pool: &[u8]) -> u8 {
    pool[rand::random_range(0..pool.len())]
}
