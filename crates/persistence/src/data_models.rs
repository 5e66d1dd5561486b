// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use labourdesk_domain::Officer;
use serde::{Deserialize, Serialize};

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// A stored officer together with its bookkeeping columns.
///
/// The password hash is not carried here. Read it with
/// `get_password_hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficerData {
    pub officer: Officer,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

/// Session data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub officer_id: String,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}
