//! Entities and sessions shared by the unit tests.

use std::collections::BTreeSet;
use std::sync::Arc;

use aroma_shared::{
    Application, AuthenticationToken, Message, Organization, ProgrammingLanguage, Role, Tier,
    TokenStatus, TokenType, Urgency, User,
};

use crate::clock::ManualClock;
use crate::database::Database;
use crate::session::Session;

pub const APP_ID: &str = "11111111-1111-1111-1111-111111111111";
pub const OWNER_ID: &str = "22222222-2222-2222-2222-222222222222";
pub const MISSING_ID: &str = "33333333-3333-3333-3333-333333333333";
pub const ORG_ID: &str = "44444444-4444-4444-4444-444444444444";
pub const USER_ID: &str = "55555555-5555-5555-5555-555555555555";
pub const MESSAGE_ID: &str = "66666666-6666-6666-6666-666666666666";
pub const TOKEN_ID: &str = "77777777-7777-7777-7777-777777777777";

/// 2024-01-01T00:00:00Z
pub const START: i64 = 1_704_067_200_000;

pub fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(START))
}

pub fn database(clock: &Arc<ManualClock>) -> Arc<dyn Session> {
    Arc::new(Database::open_in_memory(clock.clone()).expect("in-memory database"))
}

pub fn application() -> Application {
    Application {
        application_id: APP_ID.into(),
        name: "Canary".into(),
        application_description: Some("Build notifications".into()),
        owners: BTreeSet::from([OWNER_ID.to_string()]),
        time_of_provisioning: Some(START),
        tier: Some(Tier::Free),
        programming_language: Some(ProgrammingLanguage::Rust),
        ..Default::default()
    }
}

pub fn user(user_id: &str) -> User {
    User {
        email: Some(format!("{}@example.com", &user_id[..8])),
        first_name: Some("Ada".into()),
        last_name: Some("Lovelace".into()),
        roles: BTreeSet::from([Role::Developer]),
        time_user_joined: Some(START),
        ..User::with_id(user_id)
    }
}

pub fn organization() -> Organization {
    Organization {
        organization_id: ORG_ID.into(),
        organization_name: "Acme Corp".into(),
        owners: BTreeSet::from([OWNER_ID.to_string()]),
        tier: Some(Tier::Paid),
        ..Default::default()
    }
}

pub fn message(message_id: &str) -> Message {
    Message {
        message_id: message_id.into(),
        application_id: APP_ID.into(),
        application_name: Some("Canary".into()),
        title: "Deploy finished".into(),
        body: Some("v1.2.3 is live".into()),
        urgency: Some(Urgency::Low),
        hostname: Some("web-1".into()),
        time_of_creation: Some(START),
        ..Default::default()
    }
}

pub fn token() -> AuthenticationToken {
    AuthenticationToken {
        token_id: TOKEN_ID.into(),
        owner_id: OWNER_ID.into(),
        owner_name: Some("Canary".into()),
        token_type: Some(TokenType::Application),
        status: Some(TokenStatus::Active),
        time_of_creation: Some(START),
        ..Default::default()
    }
}
