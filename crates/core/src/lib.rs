// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

use labourdesk_domain::{DomainError, Officer, OfficerId};

pub use apply::{apply, apply_return};
pub use command::{Command, OfficerUpdate, ReturnCommand};
pub use error::CoreError;
pub use state::{
    Directory, OfficerChange, ReturnTransition, TransitionResult, officer_snapshot,
    return_snapshot,
};

/// Looks up an officer, failing with a domain error when absent.
///
/// This is a read-only check that does not create audit events.
///
/// # Errors
///
/// Returns `DomainError::OfficerNotFound` if no officer has the id.
pub fn require_officer<'a>(
    directory: &'a Directory,
    officer_id: &OfficerId,
) -> Result<&'a Officer, DomainError> {
    directory
        .find(officer_id)
        .ok_or_else(|| DomainError::OfficerNotFound(officer_id.clone()))
}

