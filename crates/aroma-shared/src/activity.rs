use serde::{Deserialize, Serialize};

/// A single entry in a user's activity feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: String,
    /// The user whose feed this event belongs to.
    pub user_id: String,
    pub application_id: Option<String>,
    /// The user who caused the event, if any.
    pub actor_id: Option<String>,
    pub timestamp: Option<i64>,
    pub event_type: Option<EventType>,
}

/// What happened, with a payload specific to each kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventType {
    ApplicationCreated { application_name: Option<String> },
    ApplicationDeleted { message: Option<String> },
    ApplicationFollowed,
    ApplicationUnfollowed,
    OwnerAdded { owner_id: String },
    OwnerRemoved { owner_id: String },
    HealthCheckFailed { hostname: Option<String> },
    HealthCheckBackToNormal { hostname: Option<String> },
    GeneralEvent { message: String },
}

impl EventType {
    /// Short name of the event kind, as stored alongside the payload.
    pub fn kind(&self) -> &'static str {
        match self {
            EventType::ApplicationCreated { .. } => "application_created",
            EventType::ApplicationDeleted { .. } => "application_deleted",
            EventType::ApplicationFollowed => "application_followed",
            EventType::ApplicationUnfollowed => "application_unfollowed",
            EventType::OwnerAdded { .. } => "owner_added",
            EventType::OwnerRemoved { .. } => "owner_removed",
            EventType::HealthCheckFailed { .. } => "health_check_failed",
            EventType::HealthCheckBackToNormal { .. } => "health_check_back_to_normal",
            EventType::GeneralEvent { .. } => "general_event",
        }
    }
}
