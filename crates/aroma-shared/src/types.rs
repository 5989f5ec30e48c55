use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

named_enum! {
    pub enum Role {
        Developer => "DEVELOPER",
        Ops => "OPS",
        Qa => "QA",
        ProductManager => "PRODUCT_MANAGER",
        Manager => "MANAGER",
        Tester => "TESTER",
        Owner => "OWNER",
    }
}

named_enum! {
    pub enum Tier {
        Free => "FREE",
        Paid => "PAID",
    }
}

named_enum! {
    pub enum ProgrammingLanguage {
        Java => "JAVA",
        Cpp => "CPP",
        CSharp => "C_SHARP",
        C => "C",
        ObjectiveC => "OBJECTIVE_C",
        Swift => "SWIFT",
        Python => "PYTHON",
        Ruby => "RUBY",
        Groovy => "GROOVY",
        Go => "GO",
        Dart => "DART",
        JavaScript => "JAVASCRIPT",
        Php => "PHP",
        Scala => "SCALA",
        Kotlin => "KOTLIN",
        Rust => "RUST",
        Other => "OTHER",
    }
}

named_enum! {
    pub enum Industry {
        Tech => "TECH",
        Banking => "BANKING",
        CloudServices => "CLOUD_SERVICES",
        Entertainment => "ENTERTAINMENT",
        Retail => "RETAIL",
        Research => "RESEARCH",
        Other => "OTHER",
    }
}

named_enum! {
    pub enum Urgency {
        Low => "LOW",
        Medium => "MEDIUM",
        High => "HIGH",
    }
}

named_enum! {
    pub enum TokenType {
        User => "USER",
        Application => "APPLICATION",
    }
}

named_enum! {
    /// Tokens move from `Active` to `Expired` implicitly at their TTL; there
    /// is no transition back.
    pub enum TokenStatus {
        Active => "ACTIVE",
        Expired => "EXPIRED",
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    /// Unique across users; also a lookup key.
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub roles: BTreeSet<Role>,
    pub profile_image_link: Option<String>,
    /// Unique across users; also a lookup key.
    pub github_profile: Option<String>,
    /// Date of birth, epoch millis at midnight UTC.
    pub birthday: Option<i64>,
    pub time_user_joined: Option<i64>,
}

impl User {
    pub fn with_id(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub application_id: String,
    pub name: String,
    pub application_description: Option<String>,
    pub organization_id: Option<String>,
    pub application_icon_media_id: Option<String>,
    /// User ids; never empty for a stored application.
    pub owners: BTreeSet<String>,
    /// User ids, maintained through the follower repository.
    pub followers: BTreeSet<String>,
    pub time_of_provisioning: Option<i64>,
    pub time_of_token_expiration: Option<i64>,
    pub tier: Option<Tier>,
    pub programming_language: Option<ProgrammingLanguage>,
}

// ---------------------------------------------------------------------------
// Organization
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub organization_id: String,
    pub organization_name: String,
    pub owners: BTreeSet<String>,
    pub logo_link: Option<String>,
    pub industry: Option<Industry>,
    pub organization_email: Option<String>,
    pub github_profile: Option<String>,
    pub stock_market_symbol: Option<String>,
    pub tier: Option<Tier>,
    pub organization_description: Option<String>,
    pub website: Option<String>,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: String,
    pub application_id: String,
    pub application_name: Option<String>,
    pub title: String,
    pub body: Option<String>,
    pub urgency: Option<Urgency>,
    pub hostname: Option<String>,
    pub mac_address: Option<String>,
    pub device_name: Option<String>,
    pub time_of_creation: Option<i64>,
    pub time_message_received: Option<i64>,
}

// ---------------------------------------------------------------------------
// Authentication token
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationToken {
    pub token_id: String,
    pub owner_id: String,
    pub organization_id: Option<String>,
    pub owner_name: Option<String>,
    pub token_type: Option<TokenType>,
    pub status: Option<TokenStatus>,
    pub time_of_creation: Option<i64>,
    pub time_of_expiration: Option<i64>,
}

/// Generate a fresh random identifier in canonical string form.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
