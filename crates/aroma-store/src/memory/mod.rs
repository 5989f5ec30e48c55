//! In-memory repositories backed by concurrent maps.
//!
//! Each type mirrors its store-backed sibling: the same validation runs
//! first and the same errors come back.  TTL is modeled by stamping an
//! expiry instant on write and skipping expired entries on read; nothing
//! is evicted.  Ids are canonicalized on the way in, the same way the
//! store encodes them, so both variants hand back identical entities.

mod activity;
mod applications;
mod credentials;
mod followers;
mod inbox;
mod media;
mod messages;
mod organizations;
mod preferences;
mod reactions;
mod tokens;
mod users;

pub use activity::MemoryActivityRepository;
pub use applications::MemoryApplicationRepository;
pub use credentials::MemoryCredentialRepository;
pub use followers::MemoryFollowerRepository;
pub use inbox::MemoryInboxRepository;
pub use media::MemoryMediaRepository;
pub use messages::MemoryMessageRepository;
pub use organizations::MemoryOrganizationRepository;
pub use preferences::MemoryPreferencesRepository;
pub use reactions::MemoryReactionRepository;
pub use tokens::MemoryTokenRepository;
pub use users::MemoryUserRepository;

use std::collections::BTreeSet;

use aroma_shared::{Application, AuthenticationToken, Event, Message, Organization, User};

use crate::codec::canonical_id;
use crate::statements::Ttl;

/// A value with an optional expiry instant in epoch millis.
#[derive(Debug, Clone)]
pub(crate) struct Expiring<T> {
    pub value: T,
    expires_at: Option<i64>,
}

impl<T> Expiring<T> {
    pub fn forever(value: T) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    pub fn until(value: T, now_millis: i64, ttl: Ttl) -> Self {
        Self {
            value,
            expires_at: Some(now_millis.saturating_add(ttl.millis())),
        }
    }

    pub fn is_live(&self, now_millis: i64) -> bool {
        self.expires_at.map_or(true, |expires_at| expires_at > now_millis)
    }

    /// The value, if it has not expired.
    pub fn live(&self, now_millis: i64) -> Option<&T> {
        self.is_live(now_millis).then_some(&self.value)
    }
}

fn canonical_set(ids: &BTreeSet<String>) -> BTreeSet<String> {
    ids.iter().map(|id| canonical_id(id)).collect()
}

fn canonical_option(id: &Option<String>) -> Option<String> {
    id.as_deref().map(canonical_id)
}

pub(crate) fn canonical_application(app: &Application) -> Application {
    Application {
        application_id: canonical_id(&app.application_id),
        organization_id: canonical_option(&app.organization_id),
        application_icon_media_id: canonical_option(&app.application_icon_media_id),
        owners: canonical_set(&app.owners),
        followers: canonical_set(&app.followers),
        ..app.clone()
    }
}

pub(crate) fn canonical_user(user: &User) -> User {
    User {
        user_id: canonical_id(&user.user_id),
        ..user.clone()
    }
}

pub(crate) fn canonical_organization(org: &Organization) -> Organization {
    Organization {
        organization_id: canonical_id(&org.organization_id),
        owners: canonical_set(&org.owners),
        ..org.clone()
    }
}

pub(crate) fn canonical_message(message: &Message) -> Message {
    Message {
        message_id: canonical_id(&message.message_id),
        application_id: canonical_id(&message.application_id),
        ..message.clone()
    }
}

pub(crate) fn canonical_token(token: &AuthenticationToken) -> AuthenticationToken {
    AuthenticationToken {
        token_id: canonical_id(&token.token_id),
        owner_id: canonical_id(&token.owner_id),
        organization_id: canonical_option(&token.organization_id),
        ..token.clone()
    }
}

pub(crate) fn canonical_event(event: &Event) -> Event {
    Event {
        event_id: canonical_id(&event.event_id),
        user_id: canonical_id(&event.user_id),
        application_id: canonical_option(&event.application_id),
        actor_id: canonical_option(&event.actor_id),
        ..event.clone()
    }
}

/// Newest first by `key`; entries without a time sort last.
pub(crate) fn newest_first<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> Option<i64>,
{
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}
