// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, OfficerUpdate, ReturnCommand};
use crate::error::CoreError;
use crate::state::{
    Directory, OfficerChange, ReturnTransition, TransitionResult, officer_snapshot,
    return_snapshot,
};
use labourdesk_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use labourdesk_domain::{
    DomainError, MonthlyReturn, Officer, OfficerId, OfficerProfile, ReturnStatus,
    direct_subordinates, validate_officer_fields, validate_superior, validate_username_unique,
};

/// Applies a command to the officer directory, producing a new directory and
/// audit event.
///
/// # Arguments
///
/// * `directory` - The current directory (immutable)
/// * `command` - The command to apply
/// * `requested_by` - The officer on whose behalf the command runs
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - the target officer does not exist
/// - officer fields fail validation
/// - the username or id is already taken
/// - the superior reference breaks the hierarchy
/// - the officer would delete or deactivate themselves
/// - the officer still has direct reports and is being deleted or re-ranked
/// - the officer being deleted has sealed monthly returns
pub fn apply(
    directory: &Directory,
    command: Command,
    requested_by: &OfficerId,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::CreateOfficer { officer } => create_officer(directory, officer, actor, cause),
        Command::UpdateOfficer { officer_id, update } => {
            update_officer(directory, &officer_id, update, actor, cause)
        }
        Command::ToggleOfficerStatus { officer_id } => {
            let existing: &Officer = find_officer(directory, &officer_id)?;

            if existing.is_active() && &officer_id == requested_by {
                return Err(DomainError::CannotDeactivateSelf.into());
            }

            let mut toggled: Officer = existing.clone();
            toggled.status = existing.status.toggled();

            let action: Action = Action::new(
                String::from(if toggled.is_active() {
                    "ActivateOfficer"
                } else {
                    "DeactivateOfficer"
                }),
                Some(format!(
                    "Status of '{}' changed from {} to {}",
                    existing.username, existing.status, toggled.status
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                officer_snapshot(existing),
                officer_snapshot(&toggled),
                Some(officer_id.value().to_string()),
            );

            Ok(TransitionResult {
                new_state: replace_officer(directory, toggled.clone()),
                change: OfficerChange::Updated {
                    before: existing.clone(),
                    after: toggled,
                },
                audit_event,
            })
        }
        Command::DeleteOfficer { officer_id } => {
            if &officer_id == requested_by {
                return Err(DomainError::CannotDeleteSelf.into());
            }

            let existing: &Officer = find_officer(directory, &officer_id)?;

            let reports: usize = direct_subordinates(&officer_id, &directory.officers).len();
            if reports > 0 {
                return Err(DomainError::HasSubordinates {
                    officer_id,
                    count: reports,
                }
                .into());
            }

            if directory.has_sealed_returns(&officer_id) {
                return Err(DomainError::HasSealedReturns(officer_id).into());
            }

            let new_state: Directory = directory.with_officers(
                directory
                    .officers
                    .iter()
                    .filter(|o| o.id != officer_id)
                    .cloned()
                    .collect(),
            );

            let action: Action = Action::new(
                String::from("DeleteOfficer"),
                Some(format!(
                    "Deleted {} officer '{}'",
                    existing.role, existing.username
                )),
            );
            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                officer_snapshot(existing),
                StateSnapshot::empty(),
                Some(officer_id.value().to_string()),
            );

            Ok(TransitionResult {
                new_state,
                change: OfficerChange::Deleted(existing.clone()),
                audit_event,
            })
        }
    }
}

fn create_officer(
    directory: &Directory,
    officer: Officer,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    if directory.find(&officer.id).is_some() {
        return Err(DomainError::DuplicateOfficerId(officer.id).into());
    }

    validate_officer_fields(&officer)?;
    validate_username_unique(&officer.username, &directory.officers, None)?;
    validate_superior(&officer, &directory.officers)?;

    let mut officers: Vec<Officer> = directory.officers.clone();
    officers.push(officer.clone());
    let new_state: Directory = directory.with_officers(officers);

    let action: Action = Action::new(
        String::from("CreateOfficer"),
        Some(format!(
            "Created {} officer '{}' ({})",
            officer.role, officer.username, officer.jurisdiction.district
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        StateSnapshot::empty(),
        officer_snapshot(&officer),
        Some(officer.id.value().to_string()),
    );

    Ok(TransitionResult {
        new_state,
        change: OfficerChange::Created(officer),
        audit_event,
    })
}

fn update_officer(
    directory: &Directory,
    officer_id: &OfficerId,
    update: OfficerUpdate,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let existing: &Officer = find_officer(directory, officer_id)?;

    let updated: Officer = existing.with_profile(OfficerProfile {
        username: existing.username.clone(),
        name: update.name,
        role: update.role,
        mobile: update.mobile,
        email: update.email,
        jurisdiction: update.jurisdiction,
        superior_id: update.superior_id,
    });

    validate_officer_fields(&updated)?;
    validate_username_unique(&updated.username, &directory.officers, Some(officer_id))?;
    validate_superior(&updated, &directory.officers)?;

    if updated.role != existing.role {
        let reports: usize = direct_subordinates(officer_id, &directory.officers).len();
        if reports > 0 {
            return Err(DomainError::RoleChangeStrandsSubordinates {
                officer_id: officer_id.clone(),
                count: reports,
            }
            .into());
        }
    }

    let action: Action = Action::new(
        String::from("UpdateOfficer"),
        Some(format!("Updated profile of '{}'", existing.username)),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        officer_snapshot(existing),
        officer_snapshot(&updated),
        Some(officer_id.value().to_string()),
    );

    Ok(TransitionResult {
        new_state: replace_officer(directory, updated.clone()),
        change: OfficerChange::Updated {
            before: existing.clone(),
            after: updated,
        },
        audit_event,
    })
}

fn find_officer<'a>(directory: &'a Directory, id: &OfficerId) -> Result<&'a Officer, CoreError> {
    directory
        .find(id)
        .ok_or_else(|| DomainError::OfficerNotFound(id.clone()).into())
}

fn replace_officer(directory: &Directory, officer: Officer) -> Directory {
    directory.with_officers(
        directory
            .officers
            .iter()
            .map(|o| {
                if o.id == officer.id {
                    officer.clone()
                } else {
                    o.clone()
                }
            })
            .collect(),
    )
}

/// Applies a save or seal to a monthly return.
///
/// `existing` is the stored return for the same officer and period, if any.
/// Its storage id carries over so the write overwrites it.
///
/// # Errors
///
/// Returns an error if:
/// - the filing role does not file returns
/// - the existing return is already locked
pub fn apply_return(
    existing: Option<&MonthlyReturn>,
    command: ReturnCommand,
    actor: Actor,
    cause: Cause,
) -> Result<ReturnTransition, CoreError> {
    let (mut record, status, action_name): (MonthlyReturn, ReturnStatus, &str) = match command {
        ReturnCommand::SaveDraft { draft } => (draft, ReturnStatus::Draft, "SaveReturnDraft"),
        ReturnCommand::Seal { draft } => (draft, ReturnStatus::Locked, "SealReturn"),
    };

    if !record.role.files_returns() {
        return Err(DomainError::RoleDoesNotFileReturns(record.role).into());
    }

    if let Some(previous) = existing
        && previous.status.is_locked()
    {
        return Err(DomainError::ReturnLocked {
            officer_id: previous.officer_id.clone(),
            period: previous.period,
        }
        .into());
    }

    record.status = status;
    record.return_id = existing.and_then(|previous| previous.return_id);

    let before: StateSnapshot = existing.map_or_else(StateSnapshot::empty, return_snapshot);
    let after: StateSnapshot = return_snapshot(&record);

    let action: Action = Action::new(
        String::from(action_name),
        Some(format!(
            "{} return for {} {}",
            if status.is_locked() {
                "Sealed"
            } else {
                "Saved draft"
            },
            record.officer_id,
            record.period
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        before,
        after,
        Some(format!("{}/{}", record.officer_id, record.period)),
    );

    Ok(ReturnTransition {
        record,
        audit_event,
    })
}
