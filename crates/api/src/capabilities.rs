// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities tell the client which buttons to show. They are advisory
//! only and do not replace the checks in the handlers.

use labourdesk_domain::{Officer, direct_subordinates};

use crate::auth::AuthenticatedOfficer;
use crate::request_response::{Capability, GlobalCapabilities, OfficerCapabilities};

/// Computes what an officer may do across the application.
#[must_use]
pub const fn compute_global_capabilities(officer: &Officer) -> GlobalCapabilities {
    if !officer.is_active() {
        return GlobalCapabilities {
            can_manage_officers: Capability::Denied,
            can_file_returns: Capability::Denied,
            can_view_statewide: Capability::Denied,
            can_view_audit: Capability::Denied,
        };
    }

    GlobalCapabilities {
        can_manage_officers: Capability::from_bool(officer.role.can_manage_officers()),
        can_file_returns: Capability::from_bool(officer.role.files_returns()),
        can_view_statewide: Capability::from_bool(officer.role.is_supervisory()),
        can_view_audit: Capability::from_bool(officer.role.is_supervisory()),
    }
}

/// Computes what `actor` may do to `target`.
///
/// Mirrors the transition rules: nobody deactivates or deletes themselves,
/// and an officer with direct reports cannot be deleted.
#[must_use]
pub fn compute_officer_capabilities(
    actor: &AuthenticatedOfficer,
    target: &Officer,
    directory: &[Officer],
) -> OfficerCapabilities {
    if !actor.role().can_manage_officers() {
        return OfficerCapabilities {
            can_edit: Capability::Denied,
            can_toggle_status: Capability::Denied,
            can_delete: Capability::Denied,
            can_reset_password: Capability::Denied,
        };
    }

    let is_self: bool = actor.id() == &target.id;
    let has_reports: bool = !direct_subordinates(&target.id, directory).is_empty();

    OfficerCapabilities {
        can_edit: Capability::Allowed,
        can_toggle_status: Capability::from_bool(!(is_self && target.is_active())),
        can_delete: Capability::from_bool(!is_self && !has_reports),
        can_reset_password: Capability::Allowed,
    }
}
