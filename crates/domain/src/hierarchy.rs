// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reporting-line resolution over the officer directory.
//!
//! Every function here is pure and total over the slice it is given.
//! Walks that follow `superior_id` links keep a visited set, so a corrupt
//! directory containing a cycle terminates instead of looping.

use std::collections::{HashSet, VecDeque};

use crate::error::DomainError;
use crate::role::Role;
use crate::types::{Officer, OfficerId};

/// Returns every officer who may act as the superior of an officer with `role`.
///
/// Candidates are all officers whose role is exactly one rank above `role`.
/// The result is empty for the Commissioner and for roles outside the
/// hierarchy.
#[must_use]
pub fn superior_candidates(role: Role, officers: &[Officer]) -> Vec<&Officer> {
    let Some(superior_role) = role.superior_role() else {
        return Vec::new();
    };
    officers
        .iter()
        .filter(|officer| officer.role == superior_role)
        .collect()
}

/// Checks that an officer's superior reference is consistent with the
/// hierarchy.
///
/// `officers` is the directory the officer will live in. It may or may not
/// already contain the officer.
///
/// # Errors
///
/// Returns an error if:
/// - the role sits outside the chain or at its top and a superior is set
/// - a ranked role below the Commissioner has no superior
/// - the superior is the officer itself
/// - the superior does not exist
/// - the superior's role is not the next rank up
pub fn validate_superior(officer: &Officer, officers: &[Officer]) -> Result<(), DomainError> {
    let expected: Option<Role> = officer.role.superior_role();

    let (expected, superior_id) = match (expected, &officer.superior_id) {
        (None, None) => return Ok(()),
        (None, Some(_)) => return Err(DomainError::SuperiorNotAllowed(officer.role)),
        (Some(_), None) => return Err(DomainError::SuperiorRequired(officer.role)),
        (Some(expected), Some(superior_id)) => (expected, superior_id),
    };

    if superior_id == &officer.id {
        return Err(DomainError::SelfSuperior(officer.id.clone()));
    }

    let superior: &Officer = officers
        .iter()
        .find(|candidate| &candidate.id == superior_id)
        .ok_or_else(|| DomainError::SuperiorNotFound {
            officer: officer.username.clone(),
            superior_id: superior_id.clone(),
        })?;

    if superior.role != expected {
        return Err(DomainError::SuperiorRankMismatch {
            role: officer.role,
            expected,
            actual: superior.role,
        });
    }

    Ok(())
}

/// Officers whose `superior_id` is `id`.
#[must_use]
pub fn direct_subordinates<'a>(id: &OfficerId, officers: &'a [Officer]) -> Vec<&'a Officer> {
    officers
        .iter()
        .filter(|officer| officer.superior_id.as_ref() == Some(id))
        .collect()
}

/// All officers reporting to `id`, directly or transitively.
///
/// The officer itself is not included. Order is breadth-first.
#[must_use]
pub fn subtree<'a>(id: &OfficerId, officers: &'a [Officer]) -> Vec<&'a Officer> {
    let mut visited: HashSet<&OfficerId> = HashSet::new();
    visited.insert(id);

    let mut queue: VecDeque<&OfficerId> = VecDeque::new();
    queue.push_back(id);

    let mut result: Vec<&Officer> = Vec::new();
    while let Some(current) = queue.pop_front() {
        for officer in direct_subordinates(current, officers) {
            if visited.insert(&officer.id) {
                result.push(officer);
                queue.push_back(&officer.id);
            }
        }
    }
    result
}

/// The superiors of `id`, nearest first.
#[must_use]
pub fn chain_of_command<'a>(id: &OfficerId, officers: &'a [Officer]) -> Vec<&'a Officer> {
    let mut visited: HashSet<&OfficerId> = HashSet::new();
    visited.insert(id);

    let mut chain: Vec<&Officer> = Vec::new();
    let mut current: Option<&Officer> = officers.iter().find(|o| &o.id == id);

    while let Some(officer) = current {
        let Some(superior_id) = officer.superior_id.as_ref() else {
            break;
        };
        if !visited.insert(superior_id) {
            break;
        }
        current = officers.iter().find(|o| &o.id == superior_id);
        if let Some(superior) = current {
            chain.push(superior);
        }
    }
    chain
}

/// The officers whose data `viewer` may see: the viewer and their subtree,
/// or the whole directory for supervisory roles.
#[must_use]
pub fn scope_of<'a>(viewer: &Officer, officers: &'a [Officer]) -> Vec<&'a Officer> {
    if viewer.role.is_supervisory() {
        return officers.iter().collect();
    }
    let mut scope: Vec<&Officer> = officers.iter().filter(|o| o.id == viewer.id).collect();
    scope.extend(subtree(&viewer.id, officers));
    scope
}

/// Whether `target` falls inside `viewer`'s scope.
#[must_use]
pub fn is_in_scope(viewer: &Officer, target: &OfficerId, officers: &[Officer]) -> bool {
    viewer.role.is_supervisory()
        || &viewer.id == target
        || subtree(&viewer.id, officers)
            .iter()
            .any(|officer| &officer.id == target)
}
