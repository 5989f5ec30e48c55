//! # aroma-store
//!
//! Data access layer for the Aroma notification platform.
//!
//! Every entity is reached through a repository trait.  Two implementations
//! exist for each trait: one backed by a [`Session`] over the wide-column
//! layout (emulated on an embedded SQLite database, see [`Database`]), and an
//! in-memory twin under [`memory`] that honors the same contract.  Writes to a
//! primary table and its projections go out as one batch; rows written with a
//! TTL disappear from every read once their lifetime passes.
//!
//! [`Repositories`] wires a full set from a [`StoreConfig`].

pub mod activity;
pub mod applications;
pub mod assertions;
pub mod clock;
pub mod codec;
pub mod config;
pub mod credentials;
pub mod database;
pub mod followers;
pub mod inbox;
pub mod mappers;
pub mod media;
pub mod memory;
pub mod messages;
pub mod migrations;
pub mod organizations;
pub mod preferences;
pub mod reactions;
pub mod repositories;
pub mod session;
pub mod statements;
pub mod tables;
pub mod tokens;
pub mod users;

mod error;

#[cfg(test)]
mod fixtures;

pub use activity::ActivityRepository;
pub use applications::ApplicationRepository;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::StoreConfig;
pub use credentials::CredentialRepository;
pub use database::Database;
pub use error::{Result, StoreError};
pub use followers::FollowerRepository;
pub use inbox::InboxRepository;
pub use media::MediaRepository;
pub use messages::MessageRepository;
pub use organizations::OrganizationRepository;
pub use preferences::PreferencesRepository;
pub use reactions::ReactionRepository;
pub use repositories::Repositories;
pub use session::{ResultSet, Row, Session};
pub use tokens::TokenRepository;
pub use users::UserRepository;
