//! Shared fixtures for the integration suites.
//!
//! Every suite runs the same assertions against both repository sets: the
//! SQLite-backed store and the in-memory twins.  Each set gets its own
//! `ManualClock` so TTL checks never sleep.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Arc;

use aroma_shared::{
    Application, AuthenticationToken, Message, Organization, Role, Tier, TokenType, Urgency, User,
};
use aroma_store::{ManualClock, Repositories, StoreConfig};
use tracing_subscriber::EnvFilter;

pub const APP_ID: &str = "11111111-1111-1111-1111-111111111111";
pub const OWNER_ID: &str = "22222222-2222-2222-2222-222222222222";
pub const MISSING_ID: &str = "33333333-3333-3333-3333-333333333333";
pub const ORG_ID: &str = "44444444-4444-4444-4444-444444444444";
pub const USER_ID: &str = "55555555-5555-5555-5555-555555555555";
pub const MESSAGE_ID: &str = "66666666-6666-6666-6666-666666666666";
pub const TOKEN_ID: &str = "77777777-7777-7777-7777-777777777777";

/// 2024-01-01T00:00:00Z
pub const START: i64 = 1_704_067_200_000;

pub struct Variant {
    pub name: &'static str,
    pub repos: Repositories,
    pub clock: Arc<ManualClock>,
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A fresh store-backed set and a fresh in-memory set.
pub fn variants() -> Vec<Variant> {
    init_tracing();

    let store_clock = Arc::new(ManualClock::new(START));
    let store = Repositories::store_with_clock(&StoreConfig::default(), store_clock.clone())
        .expect("open in-memory database");

    let memory_clock = Arc::new(ManualClock::new(START));
    let memory = Repositories::in_memory(memory_clock.clone());

    vec![
        Variant {
            name: "store",
            repos: store,
            clock: store_clock,
        },
        Variant {
            name: "memory",
            repos: memory,
            clock: memory_clock,
        },
    ]
}

pub fn application() -> Application {
    Application {
        application_id: APP_ID.into(),
        name: "Canary".into(),
        owners: BTreeSet::from([OWNER_ID.to_string()]),
        ..Default::default()
    }
}

pub fn full_application() -> Application {
    Application {
        application_description: Some("Build notifications".into()),
        organization_id: Some(ORG_ID.into()),
        followers: BTreeSet::from([USER_ID.to_string()]),
        time_of_provisioning: Some(START),
        tier: Some(Tier::Paid),
        ..application()
    }
}

pub fn user(user_id: &str) -> User {
    User {
        email: Some(format!("{}@example.com", &user_id[..8])),
        first_name: Some("Grace".into()),
        last_name: Some("Hopper".into()),
        roles: BTreeSet::from([Role::Developer, Role::Ops]),
        github_profile: Some(format!("gh-{}", &user_id[..8])),
        time_user_joined: Some(START),
        ..User::with_id(user_id)
    }
}

pub fn organization() -> Organization {
    Organization {
        organization_id: ORG_ID.into(),
        organization_name: "Acme Corp".into(),
        owners: BTreeSet::from([OWNER_ID.to_string()]),
        website: Some("https://acme.example".into()),
        ..Default::default()
    }
}

pub fn message(message_id: &str) -> Message {
    Message {
        message_id: message_id.into(),
        application_id: APP_ID.into(),
        title: "Disk almost full".into(),
        body: Some("/var is at 91%".into()),
        urgency: Some(Urgency::High),
        hostname: Some("db-1".into()),
        time_of_creation: Some(START),
        ..Default::default()
    }
}

pub fn token() -> AuthenticationToken {
    AuthenticationToken {
        token_id: TOKEN_ID.into(),
        owner_id: APP_ID.into(),
        owner_name: Some("Canary".into()),
        token_type: Some(TokenType::Application),
        time_of_creation: Some(START),
        time_of_expiration: Some(START + 3_600_000),
        ..Default::default()
    }
}
