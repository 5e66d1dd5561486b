// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session lifecycle tests.

use crate::{PersistenceError, SessionData, SqlitePersistence};
use labourdesk_domain::OfficerId;

use super::seeded_persistence;

const FAR_FUTURE: &str = "2999-01-01T00:00:00.000000000Z";
const LONG_AGO: &str = "2001-01-01T00:00:00.000000000Z";

#[test]
fn test_create_and_lookup_session() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let id: OfficerId = OfficerId::new("comm");

    let session_id: i64 = persistence.create_session("tok_1", &id, FAR_FUTURE).unwrap();

    let session: SessionData = persistence.get_session_by_token("tok_1").unwrap().unwrap();
    assert_eq!(session.session_id, session_id);
    assert_eq!(session.officer_id, "comm");
    assert_eq!(session.expires_at, FAR_FUTURE);
    assert_eq!(session.created_at, session.last_activity_at);
}

#[test]
fn test_unknown_token_is_none() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    assert!(persistence.get_session_by_token("nope").unwrap().is_none());
}

#[test]
fn test_logout_deletes_only_that_session() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let id: OfficerId = OfficerId::new("comm");
    persistence.create_session("tok_a", &id, FAR_FUTURE).unwrap();
    persistence.create_session("tok_b", &id, FAR_FUTURE).unwrap();

    assert_eq!(persistence.delete_session("tok_a").unwrap(), 1);

    assert!(persistence.get_session_by_token("tok_a").unwrap().is_none());
    assert!(persistence.get_session_by_token("tok_b").unwrap().is_some());
}

#[test]
fn test_expired_sessions_are_purged() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let id: OfficerId = OfficerId::new("jcl1");
    persistence.create_session("old", &id, LONG_AGO).unwrap();
    persistence.create_session("fresh", &id, FAR_FUTURE).unwrap();

    let now: String = crate::now_iso8601().unwrap();
    assert_eq!(persistence.delete_expired_sessions(&now).unwrap(), 1);

    assert!(persistence.get_session_by_token("old").unwrap().is_none());
    assert!(persistence.get_session_by_token("fresh").unwrap().is_some());
}

#[test]
fn test_session_for_unknown_officer_is_rejected() {
    let mut persistence: SqlitePersistence = seeded_persistence();
    let result: Result<i64, PersistenceError> = persistence.create_session("tok", &OfficerId::new("ghost"), FAR_FUTURE);
    assert!(result.is_err());
}
