//! Reaction rules: a reaction fires its actions when all of its matchers
//! accept an incoming message.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::Urgency;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub name: Option<String>,
    pub matchers: Vec<Matcher>,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Matcher {
    All,
    ApplicationIs { application_id: String },
    TitleIs { expected_title: String },
    TitleContains { substring: String },
    BodyContains { substring: String },
    UrgencyIs { urgencies: BTreeSet<Urgency> },
    HostnameIs { expected_hostname: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    ForwardToSlackChannel { webhook_url: String, channel: String },
    ForwardToGitter { webhook_url: String },
    ForwardToUsers { user_ids: Vec<String> },
    SendPushNotification,
    RespondWithMessage { message_text: String },
    SkipInbox,
    DontStoreMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_json_is_tagged() {
        let reaction = Reaction {
            name: Some("page on-call".to_string()),
            matchers: vec![Matcher::UrgencyIs {
                urgencies: [Urgency::High].into_iter().collect(),
            }],
            actions: vec![Action::SendPushNotification],
        };

        let json = serde_json::to_value(&reaction).unwrap();
        assert_eq!(json["matchers"][0]["type"], "urgency_is");
        assert_eq!(json["matchers"][0]["urgencies"][0], "HIGH");
        assert_eq!(json["actions"][0]["type"], "send_push_notification");
    }
}
