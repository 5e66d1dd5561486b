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
    clippy::all
)]

//! Audit trail types.
//!
//! Every successful mutation of the officer directory or of a monthly return
//! yields exactly one [`AuditEvent`]. Authentication events (login, logout,
//! password changes) are recorded the same way. Events are append-only.

/// Actor type for a logged-in officer.
pub const ACTOR_OFFICER: &str = "officer";
/// Actor type for the application itself, e.g. the demo seeder.
pub const ACTOR_SYSTEM: &str = "system";

/// Represents the entity performing an action.
///
/// For officers, the login identity is captured alongside the opaque id so
/// that the trail stays readable after the officer is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor, e.g. [`ACTOR_OFFICER`] or [`ACTOR_SYSTEM`].
    pub actor_type: String,
    /// Officer id, when the actor is an officer.
    pub officer_id: Option<String>,
    /// Username at the time of the action.
    pub username: Option<String>,
    /// Display name at the time of the action.
    pub name: Option<String>,
}

impl Actor {
    /// Creates an actor with no officer identity attached.
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self {
            id,
            actor_type,
            officer_id: None,
            username: None,
            name: None,
        }
    }

    /// Creates an actor for a logged-in officer.
    #[must_use]
    pub fn officer(officer_id: String, username: String, name: String) -> Self {
        Self {
            id: officer_id.clone(),
            actor_type: String::from(ACTOR_OFFICER),
            officer_id: Some(officer_id),
            username: Some(username),
            name: Some(name),
        }
    }

    /// The application acting on its own behalf.
    #[must_use]
    pub fn system() -> Self {
        Self::new(String::from(ACTOR_SYSTEM), String::from(ACTOR_SYSTEM))
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`CreateOfficer`", "`SealReturn`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A serialized view of the affected record.
///
/// Snapshots are opaque to this crate. Producers typically store JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub data: String,
}

impl StateSnapshot {
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// The snapshot of a record that does not exist (before a create or
    /// after a delete).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            data: String::new(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// An immutable audit event representing a state transition.
///
/// Captures:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The state before and after the transition
/// - Which record was affected (subject), if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Storage identifier. `None` until persisted.
    pub event_id: Option<i64>,
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
    /// Identifier of the affected record, e.g. an officer id or
    /// `officer_id/YYYY-MM` for a return.
    pub subject: Option<String>,
}

impl AuditEvent {
    /// Creates a new, unpersisted `AuditEvent`.
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        subject: Option<String>,
    ) -> Self {
        Self {
            event_id: None,
            actor,
            cause,
            action,
            before,
            after,
            subject,
        }
    }

    /// Returns the event carrying its storage identifier.
    #[must_use]
    pub fn with_id(self, event_id: i64) -> Self {
        Self {
            event_id: Some(event_id),
            ..self
        }
    }
}
