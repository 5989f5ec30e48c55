//! Wiring of every repository behind its trait.

use std::sync::Arc;

use crate::activity::{ActivityRepository, StoreActivityRepository};
use crate::applications::{ApplicationRepository, StoreApplicationRepository};
use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::credentials::{CredentialRepository, StoreCredentialRepository};
use crate::database::Database;
use crate::error::Result;
use crate::followers::{FollowerRepository, StoreFollowerRepository};
use crate::inbox::{InboxRepository, StoreInboxRepository};
use crate::media::{MediaRepository, StoreMediaRepository};
use crate::memory::{
    MemoryActivityRepository, MemoryApplicationRepository, MemoryCredentialRepository,
    MemoryFollowerRepository, MemoryInboxRepository, MemoryMediaRepository,
    MemoryMessageRepository, MemoryOrganizationRepository, MemoryPreferencesRepository,
    MemoryReactionRepository, MemoryTokenRepository, MemoryUserRepository,
};
use crate::messages::{MessageRepository, StoreMessageRepository};
use crate::organizations::{OrganizationRepository, StoreOrganizationRepository};
use crate::preferences::{PreferencesRepository, StorePreferencesRepository};
use crate::reactions::{ReactionRepository, StoreReactionRepository};
use crate::session::Session;
use crate::tokens::{StoreTokenRepository, TokenRepository};
use crate::users::{StoreUserRepository, UserRepository};

/// One handle per repository, all sharing the same session and clock.
#[derive(Clone)]
pub struct Repositories {
    pub applications: Arc<dyn ApplicationRepository>,
    pub users: Arc<dyn UserRepository>,
    pub organizations: Arc<dyn OrganizationRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub inbox: Arc<dyn InboxRepository>,
    pub followers: Arc<dyn FollowerRepository>,
    pub tokens: Arc<dyn TokenRepository>,
    pub activity: Arc<dyn ActivityRepository>,
    pub media: Arc<dyn MediaRepository>,
    pub reactions: Arc<dyn ReactionRepository>,
    pub credentials: Arc<dyn CredentialRepository>,
    pub preferences: Arc<dyn PreferencesRepository>,
}

impl Repositories {
    /// Open the configured database on the system clock.
    pub fn store(config: &StoreConfig) -> Result<Self> {
        Self::store_with_clock(config, Arc::new(SystemClock))
    }

    pub fn store_with_clock(config: &StoreConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let database = Database::open(config, clock.clone())?;
        Ok(Self::with_session(Arc::new(database), clock, config))
    }

    /// Repositories over an already open session.
    pub fn with_session(
        session: Arc<dyn Session>,
        clock: Arc<dyn Clock>,
        config: &StoreConfig,
    ) -> Self {
        Self {
            applications: Arc::new(StoreApplicationRepository::new(
                session.clone(),
                config.recent_limit,
                config.search_scan_limit,
            )),
            users: Arc::new(StoreUserRepository::new(session.clone(), config.recent_limit)),
            organizations: Arc::new(StoreOrganizationRepository::new(
                session.clone(),
                config.search_scan_limit,
            )),
            messages: Arc::new(StoreMessageRepository::new(session.clone())),
            inbox: Arc::new(StoreInboxRepository::new(session.clone())),
            followers: Arc::new(StoreFollowerRepository::new(session.clone())),
            tokens: Arc::new(StoreTokenRepository::new(session.clone(), clock.clone())),
            activity: Arc::new(StoreActivityRepository::new(session.clone())),
            media: Arc::new(StoreMediaRepository::new(session.clone(), config.max_media_bytes)),
            reactions: Arc::new(StoreReactionRepository::new(session.clone())),
            credentials: Arc::new(StoreCredentialRepository::new(session.clone(), clock)),
            preferences: Arc::new(StorePreferencesRepository::new(session)),
        }
    }

    /// In-memory twins with default limits.
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        Self::in_memory_with(clock, &StoreConfig::default())
    }

    pub fn in_memory_with(clock: Arc<dyn Clock>, config: &StoreConfig) -> Self {
        Self {
            applications: Arc::new(MemoryApplicationRepository::new(
                config.recent_limit,
                config.search_scan_limit,
            )),
            users: Arc::new(MemoryUserRepository::new(config.recent_limit)),
            organizations: Arc::new(MemoryOrganizationRepository::new(config.search_scan_limit)),
            messages: Arc::new(MemoryMessageRepository::new(clock.clone())),
            inbox: Arc::new(MemoryInboxRepository::new(clock.clone())),
            followers: Arc::new(MemoryFollowerRepository::new()),
            tokens: Arc::new(MemoryTokenRepository::new(clock.clone())),
            activity: Arc::new(MemoryActivityRepository::new(clock)),
            media: Arc::new(MemoryMediaRepository::new(config.max_media_bytes)),
            reactions: Arc::new(MemoryReactionRepository::new()),
            credentials: Arc::new(MemoryCredentialRepository::new()),
            preferences: Arc::new(MemoryPreferencesRepository::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[test]
    fn test_default_config_opens_in_memory_store() {
        let repos = Repositories::store(&StoreConfig::default()).unwrap();
        assert!(repos.applications.get_recently_created().unwrap().is_empty());
    }

    #[test]
    fn test_both_variants_share_the_contract() {
        let clock = Arc::new(ManualClock::new(0));
        let store = Repositories::store_with_clock(&StoreConfig::default(), clock.clone()).unwrap();
        let memory = Repositories::in_memory(clock);

        for repos in [store, memory] {
            assert!(!repos.users.contains_user(crate::fixtures::USER_ID).unwrap());
            assert!(repos.users.get_user_by_email("").is_err());
        }
    }
}
