//! Physical schema: table and column names.
//!
//! Projection tables repeat the columns of the entity they denormalize, so a
//! single row mapper reads the primary table and every projection of it.

/// Stamped on every row written with a TTL; rows past it are invisible.
pub const EXPIRES_AT: &str = "expires_at";

/// Alias of the `COUNT(*)` column.
pub const COUNT: &str = "count";

/// Partition key of the singleton "recently created" partitions.
pub const RECENT_BUCKET: &str = "recent";

pub mod applications {
    pub const TABLE: &str = "Applications";
    pub const BY_OWNER: &str = "Applications_By_Owner";
    pub const BY_ORG: &str = "Applications_By_Org";
    pub const RECENTLY_CREATED: &str = "Applications_Recently_Created";

    pub const APP_ID: &str = "app_id";
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "app_description";
    pub const ORG_ID: &str = "org_id";
    pub const ICON_MEDIA_ID: &str = "icon_media_id";
    pub const OWNERS: &str = "owners";
    pub const FOLLOWERS: &str = "followers";
    pub const TIER: &str = "tier";
    pub const PROGRAMMING_LANGUAGE: &str = "programming_language";
    pub const TIME_PROVISIONED: &str = "time_provisioned";
    pub const TIME_OF_TOKEN_EXPIRATION: &str = "time_of_token_expiration";

    /// Partition key of [`BY_OWNER`].
    pub const OWNER_ID: &str = "owner_id";
    /// Partition key of [`RECENTLY_CREATED`].
    pub const BUCKET: &str = "bucket";
}

pub mod users {
    pub const TABLE: &str = "Users";
    pub const BY_EMAIL: &str = "Users_By_Email";
    pub const BY_GITHUB_PROFILE: &str = "Users_By_Github_Profile";
    pub const RECENT: &str = "Users_Recent";

    pub const USER_ID: &str = "user_id";
    pub const EMAIL: &str = "email";
    pub const FIRST_NAME: &str = "first_name";
    pub const MIDDLE_NAME: &str = "middle_name";
    pub const LAST_NAME: &str = "last_name";
    pub const ROLES: &str = "roles";
    pub const PROFILE_IMAGE_LINK: &str = "profile_image_link";
    pub const GITHUB_PROFILE: &str = "github_profile";
    pub const BIRTHDAY: &str = "birthday";
    pub const TIME_JOINED: &str = "time_joined";

    pub const BUCKET: &str = "bucket";
}

pub mod organizations {
    pub const TABLE: &str = "Organizations";
    /// Partitioned by [`ORG_ID`], clustered by user id; carries the member's
    /// name, email and roles.
    pub const MEMBERS: &str = "Organization_Members";

    pub const ORG_ID: &str = "org_id";
    pub const ORG_NAME: &str = "org_name";
    pub const OWNERS: &str = "owners";
    pub const LOGO_LINK: &str = "logo_link";
    pub const INDUSTRY: &str = "industry";
    pub const EMAIL: &str = "org_email";
    pub const GITHUB_PROFILE: &str = "github_profile";
    pub const STOCK_SYMBOL: &str = "stock_name";
    pub const TIER: &str = "tier";
    pub const DESCRIPTION: &str = "org_description";
    pub const WEBSITE: &str = "website";
}

pub mod messages {
    pub const TABLE: &str = "Messages";
    pub const BY_APP: &str = "Messages_By_App";
    pub const BY_HOSTNAME: &str = "Messages_By_Hostname";

    pub const MESSAGE_ID: &str = "message_id";
    pub const APP_ID: &str = "app_id";
    pub const APP_NAME: &str = "app_name";
    pub const TITLE: &str = "title";
    pub const BODY: &str = "body";
    pub const URGENCY: &str = "urgency";
    pub const HOSTNAME: &str = "hostname";
    pub const MAC_ADDRESS: &str = "mac_address";
    pub const DEVICE_NAME: &str = "device_name";
    pub const TIME_CREATED: &str = "time_created";
    pub const TIME_RECEIVED: &str = "time_received";
}

pub mod inbox {
    /// Partitioned by [`USER_ID`], clustered by message id; carries every
    /// message column.
    pub const TABLE: &str = "Inbox";

    pub const USER_ID: &str = "user_id";
}

pub mod followers {
    /// Partitioned by user id; carries every application column.
    pub const APPS_FOLLOWED_BY_USER: &str = "Apps_Followed_By_User";
    /// Partitioned by application id; carries every user column.
    pub const FOLLOWERS_OF_APP: &str = "Followers_Of_App";
}

pub mod tokens {
    pub const TABLE: &str = "Tokens";
    pub const BY_OWNER: &str = "Tokens_By_Owner";

    pub const TOKEN_ID: &str = "token_id";
    pub const OWNER_ID: &str = "owner_id";
    pub const ORG_ID: &str = "org_id";
    pub const OWNER_NAME: &str = "owner_name";
    pub const TOKEN_TYPE: &str = "token_type";
    pub const STATUS: &str = "token_status";
    pub const TIME_CREATED: &str = "time_created";
    pub const TIME_EXPIRES: &str = "time_expires";
}

pub mod activity {
    pub const TABLE: &str = "Activity";

    pub const USER_ID: &str = "user_id";
    pub const EVENT_ID: &str = "event_id";
    pub const APP_ID: &str = "app_id";
    pub const ACTOR_ID: &str = "actor_id";
    pub const TIME_CREATED: &str = "time_created";
    pub const EVENT_KIND: &str = "event_kind";
    pub const SERIALIZED_EVENT: &str = "serialized_event";
}

pub mod media {
    pub const TABLE: &str = "Media";
    pub const THUMBNAILS: &str = "Media_Thumbnails";

    pub const MEDIA_ID: &str = "media_id";
    pub const MEDIA_TYPE: &str = "media_type";
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
    pub const DATA: &str = "data";
    /// Clustering key of [`THUMBNAILS`], e.g. `"64x64"`.
    pub const DIMENSION: &str = "dimension";
}

pub mod reactions {
    pub const TABLE: &str = "Reactions";

    pub const OWNER_ID: &str = "owner_id";
    pub const SERIALIZED_REACTIONS: &str = "serialized_reactions";
}

pub mod credentials {
    pub const TABLE: &str = "Credentials";

    pub const USER_ID: &str = "user_id";
    pub const ENCRYPTED_PASSWORD: &str = "encrypted_password";
    pub const TIME_CREATED: &str = "time_created";
}

pub mod preferences {
    pub const TABLE: &str = "User_Devices";

    pub const USER_ID: &str = "user_id";
    pub const DEVICES: &str = "devices";
}

/// Every table in the schema.
pub fn all_tables() -> Vec<&'static str> {
    vec![
        applications::TABLE,
        applications::BY_OWNER,
        applications::BY_ORG,
        applications::RECENTLY_CREATED,
        users::TABLE,
        users::BY_EMAIL,
        users::BY_GITHUB_PROFILE,
        users::RECENT,
        organizations::TABLE,
        organizations::MEMBERS,
        messages::TABLE,
        messages::BY_APP,
        messages::BY_HOSTNAME,
        inbox::TABLE,
        followers::APPS_FOLLOWED_BY_USER,
        followers::FOLLOWERS_OF_APP,
        tokens::TABLE,
        tokens::BY_OWNER,
        activity::TABLE,
        media::TABLE,
        media::THUMBNAILS,
        reactions::TABLE,
        credentials::TABLE,
        preferences::TABLE,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_duplicate_tables() {
        let tables = all_tables();
        let mut unique = std::collections::HashSet::new();

        for table in &tables {
            assert!(unique.insert(table.to_ascii_lowercase()), "Duplicate table: {}", table);
        }
    }
}
