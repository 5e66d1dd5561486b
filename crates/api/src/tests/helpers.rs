// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::collections::BTreeMap;

use labourdesk_audit::Cause;
use labourdesk_domain::ReportingPeriod;
use labourdesk_persistence::SqlitePersistence;

use crate::{
    AuthenticatedOfficer, AuthenticationService, CaptchaChallenge, CaptchaStore, DEMO_PASSWORD,
    LoginRequest, LoginResponse, SubmitReturnRequest, login, seed_demo_roster,
};

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-1"), String::from("API request"))
}

/// The month tests treat as "now".
pub fn test_period() -> ReportingPeriod {
    ReportingPeriod::new(2026, 3).unwrap()
}

/// An in-memory database holding the demo roster.
pub fn seeded_persistence() -> SqlitePersistence {
    let mut persistence: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();
    seed_demo_roster(&mut persistence).unwrap();
    persistence
}

/// A login request that answers `challenge` correctly.
pub fn login_request(username: &str, password: &str, challenge: &CaptchaChallenge) -> LoginRequest {
    LoginRequest {
        username: String::from(username),
        password: String::from(password),
        captcha_id: challenge.captcha_id.clone(),
        captcha_answer: challenge.challenge.clone(),
    }
}

/// Logs in with `password` and returns the session token.
pub fn login_with(persistence: &mut SqlitePersistence, username: &str, password: &str) -> String {
    let mut captchas: CaptchaStore = CaptchaStore::default();
    let challenge: CaptchaChallenge = captchas.issue();
    let response: LoginResponse = login(
        persistence,
        &mut captchas,
        &login_request(username, password, &challenge),
    )
    .unwrap();
    response.session_token
}

/// Logs a demo officer in and resolves their session.
pub fn session_for(persistence: &mut SqlitePersistence, username: &str) -> AuthenticatedOfficer {
    let token: String = login_with(persistence, username, DEMO_PASSWORD);
    AuthenticationService::validate_session(persistence, &token).unwrap()
}

/// A return request with the given form fields.
pub fn return_request(fields: &[(&str, &str)], remarks: &str, seal: bool) -> SubmitReturnRequest {
    let period: ReportingPeriod = test_period();
    SubmitReturnRequest {
        year: period.year(),
        month: period.month(),
        fields: fields
            .iter()
            .map(|(key, value)| (String::from(*key), String::from(*value)))
            .collect::<BTreeMap<String, String>>(),
        remarks: String::from(remarks),
        seal,
    }
}
