//! v001 -- Initial schema creation.
//!
//! Every primary table and its projections.  Projection tables repeat the
//! columns of the entity they denormalize.  Every table carries `expires_at`
//! (epoch millis, NULL for rows written without a TTL).

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Applications
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS Applications (
    app_id                   TEXT PRIMARY KEY NOT NULL,   -- UUID
    name                     TEXT,
    app_description          TEXT,
    org_id                   TEXT,
    icon_media_id            TEXT,
    owners                   TEXT,                        -- JSON array of UUIDs
    followers                TEXT,                        -- JSON array of UUIDs
    tier                     TEXT,
    programming_language     TEXT,
    time_provisioned         INTEGER,                     -- epoch millis
    time_of_token_expiration INTEGER,
    expires_at               INTEGER
);

CREATE TABLE IF NOT EXISTS Applications_By_Owner (
    owner_id                 TEXT NOT NULL,
    app_id                   TEXT NOT NULL,
    name                     TEXT,
    app_description          TEXT,
    org_id                   TEXT,
    icon_media_id            TEXT,
    owners                   TEXT,
    followers                TEXT,
    tier                     TEXT,
    programming_language     TEXT,
    time_provisioned         INTEGER,
    time_of_token_expiration INTEGER,
    expires_at               INTEGER,
    PRIMARY KEY (owner_id, app_id)
);

CREATE TABLE IF NOT EXISTS Applications_By_Org (
    org_id                   TEXT NOT NULL,
    app_id                   TEXT NOT NULL,
    name                     TEXT,
    app_description          TEXT,
    icon_media_id            TEXT,
    owners                   TEXT,
    followers                TEXT,
    tier                     TEXT,
    programming_language     TEXT,
    time_provisioned         INTEGER,
    time_of_token_expiration INTEGER,
    expires_at               INTEGER,
    PRIMARY KEY (org_id, app_id)
);

CREATE TABLE IF NOT EXISTS Applications_Recently_Created (
    bucket                   TEXT NOT NULL,
    app_id                   TEXT NOT NULL,
    name                     TEXT,
    app_description          TEXT,
    org_id                   TEXT,
    icon_media_id            TEXT,
    owners                   TEXT,
    followers                TEXT,
    tier                     TEXT,
    programming_language     TEXT,
    time_provisioned         INTEGER,
    time_of_token_expiration INTEGER,
    expires_at               INTEGER,
    PRIMARY KEY (bucket, app_id)
);

CREATE INDEX IF NOT EXISTS idx_apps_recent_time
    ON Applications_Recently_Created(bucket, time_provisioned DESC);

-- ----------------------------------------------------------------
-- Users
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS Users (
    user_id            TEXT PRIMARY KEY NOT NULL,
    email              TEXT,
    first_name         TEXT,
    middle_name        TEXT,
    last_name          TEXT,
    roles              TEXT,                              -- JSON array of role names
    profile_image_link TEXT,
    github_profile     TEXT,
    birthday           INTEGER,
    time_joined        INTEGER,
    expires_at         INTEGER
);

CREATE TABLE IF NOT EXISTS Users_By_Email (
    email              TEXT PRIMARY KEY NOT NULL,
    user_id            TEXT NOT NULL,
    first_name         TEXT,
    middle_name        TEXT,
    last_name          TEXT,
    roles              TEXT,
    profile_image_link TEXT,
    github_profile     TEXT,
    birthday           INTEGER,
    time_joined        INTEGER,
    expires_at         INTEGER
);

CREATE TABLE IF NOT EXISTS Users_By_Github_Profile (
    github_profile     TEXT PRIMARY KEY NOT NULL,
    user_id            TEXT NOT NULL,
    email              TEXT,
    first_name         TEXT,
    middle_name        TEXT,
    last_name          TEXT,
    roles              TEXT,
    profile_image_link TEXT,
    birthday           INTEGER,
    time_joined        INTEGER,
    expires_at         INTEGER
);

CREATE TABLE IF NOT EXISTS Users_Recent (
    bucket             TEXT NOT NULL,
    user_id            TEXT NOT NULL,
    email              TEXT,
    first_name         TEXT,
    middle_name        TEXT,
    last_name          TEXT,
    roles              TEXT,
    profile_image_link TEXT,
    github_profile     TEXT,
    birthday           INTEGER,
    time_joined        INTEGER,
    expires_at         INTEGER,
    PRIMARY KEY (bucket, user_id)
);

CREATE INDEX IF NOT EXISTS idx_users_recent_time
    ON Users_Recent(bucket, time_joined DESC);

-- ----------------------------------------------------------------
-- Organizations
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS Organizations (
    org_id          TEXT PRIMARY KEY NOT NULL,
    org_name        TEXT,
    owners          TEXT,
    logo_link       TEXT,
    industry        TEXT,
    org_email       TEXT,
    github_profile  TEXT,
    stock_name      TEXT,
    tier            TEXT,
    org_description TEXT,
    website         TEXT,
    expires_at      INTEGER
);

CREATE TABLE IF NOT EXISTS Organization_Members (
    org_id          TEXT NOT NULL,
    user_id         TEXT NOT NULL,
    first_name      TEXT,
    middle_name     TEXT,
    last_name       TEXT,
    roles           TEXT,
    email           TEXT,
    expires_at      INTEGER,
    PRIMARY KEY (org_id, user_id)
);

-- ----------------------------------------------------------------
-- Messages and inbox
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS Messages (
    app_id        TEXT NOT NULL,
    message_id    TEXT NOT NULL,
    app_name      TEXT,
    title         TEXT,
    body          TEXT,
    urgency       TEXT,
    hostname      TEXT,
    mac_address   TEXT,
    device_name   TEXT,
    time_created  INTEGER,
    time_received INTEGER,
    expires_at    INTEGER,
    PRIMARY KEY (app_id, message_id)
);

CREATE TABLE IF NOT EXISTS Messages_By_App (
    app_id        TEXT NOT NULL,
    message_id    TEXT NOT NULL,
    app_name      TEXT,
    title         TEXT,
    body          TEXT,
    urgency       TEXT,
    hostname      TEXT,
    mac_address   TEXT,
    device_name   TEXT,
    time_created  INTEGER,
    time_received INTEGER,
    expires_at    INTEGER,
    PRIMARY KEY (app_id, message_id)
);

CREATE INDEX IF NOT EXISTS idx_messages_by_app_time
    ON Messages_By_App(app_id, time_created DESC);

CREATE TABLE IF NOT EXISTS Messages_By_Hostname (
    hostname      TEXT NOT NULL,
    message_id    TEXT NOT NULL,
    app_id        TEXT NOT NULL,
    app_name      TEXT,
    title         TEXT,
    body          TEXT,
    urgency       TEXT,
    mac_address   TEXT,
    device_name   TEXT,
    time_created  INTEGER,
    time_received INTEGER,
    expires_at    INTEGER,
    PRIMARY KEY (hostname, app_id, message_id)
);

CREATE TABLE IF NOT EXISTS Inbox (
    user_id       TEXT NOT NULL,
    message_id    TEXT NOT NULL,
    app_id        TEXT NOT NULL,
    app_name      TEXT,
    title         TEXT,
    body          TEXT,
    urgency       TEXT,
    hostname      TEXT,
    mac_address   TEXT,
    device_name   TEXT,
    time_created  INTEGER,
    time_received INTEGER,
    expires_at    INTEGER,
    PRIMARY KEY (user_id, message_id)
);

-- ----------------------------------------------------------------
-- Followers
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS Apps_Followed_By_User (
    user_id                  TEXT NOT NULL,
    app_id                   TEXT NOT NULL,
    name                     TEXT,
    app_description          TEXT,
    org_id                   TEXT,
    icon_media_id            TEXT,
    owners                   TEXT,
    followers                TEXT,
    tier                     TEXT,
    programming_language     TEXT,
    time_provisioned         INTEGER,
    time_of_token_expiration INTEGER,
    expires_at               INTEGER,
    PRIMARY KEY (user_id, app_id)
);

CREATE TABLE IF NOT EXISTS Followers_Of_App (
    app_id             TEXT NOT NULL,
    user_id            TEXT NOT NULL,
    email              TEXT,
    first_name         TEXT,
    middle_name        TEXT,
    last_name          TEXT,
    roles              TEXT,
    profile_image_link TEXT,
    github_profile     TEXT,
    birthday           INTEGER,
    time_joined        INTEGER,
    expires_at         INTEGER,
    PRIMARY KEY (app_id, user_id)
);

-- ----------------------------------------------------------------
-- Tokens
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS Tokens (
    token_id     TEXT PRIMARY KEY NOT NULL,
    owner_id     TEXT NOT NULL,
    org_id       TEXT,
    owner_name   TEXT,
    token_type   TEXT,
    token_status TEXT,
    time_created INTEGER,
    time_expires INTEGER,
    expires_at   INTEGER
);

CREATE TABLE IF NOT EXISTS Tokens_By_Owner (
    owner_id     TEXT NOT NULL,
    token_id     TEXT NOT NULL,
    org_id       TEXT,
    owner_name   TEXT,
    token_type   TEXT,
    token_status TEXT,
    time_created INTEGER,
    time_expires INTEGER,
    expires_at   INTEGER,
    PRIMARY KEY (owner_id, token_id)
);

-- ----------------------------------------------------------------
-- Activity
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS Activity (
    user_id          TEXT NOT NULL,
    event_id         TEXT NOT NULL,
    app_id           TEXT,
    actor_id         TEXT,
    time_created     INTEGER,
    event_kind       TEXT,
    serialized_event TEXT,                                -- JSON EventType
    expires_at       INTEGER,
    PRIMARY KEY (user_id, event_id)
);

CREATE INDEX IF NOT EXISTS idx_activity_time
    ON Activity(user_id, time_created DESC);

-- ----------------------------------------------------------------
-- Media
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS Media (
    media_id   TEXT PRIMARY KEY NOT NULL,
    media_type TEXT,
    width      INTEGER,
    height     INTEGER,
    data       BLOB NOT NULL,
    expires_at INTEGER
);

CREATE TABLE IF NOT EXISTS Media_Thumbnails (
    media_id   TEXT NOT NULL,
    dimension  TEXT NOT NULL,                             -- "{width}x{height}"
    media_type TEXT,
    width      INTEGER,
    height     INTEGER,
    data       BLOB NOT NULL,
    expires_at INTEGER,
    PRIMARY KEY (media_id, dimension)
);

-- ----------------------------------------------------------------
-- Per-owner documents
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS Reactions (
    owner_id             TEXT PRIMARY KEY NOT NULL,
    serialized_reactions TEXT,                            -- JSON array
    expires_at           INTEGER
);

CREATE TABLE IF NOT EXISTS Credentials (
    user_id            TEXT PRIMARY KEY NOT NULL,
    encrypted_password TEXT NOT NULL,
    time_created       INTEGER,
    expires_at         INTEGER
);

CREATE TABLE IF NOT EXISTS User_Devices (
    user_id    TEXT PRIMARY KEY NOT NULL,
    devices    TEXT,                                      -- JSON array of JSON MobileDevice
    expires_at INTEGER
);
"#;

/// Apply the migration.
pub fn up(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(UP_SQL)
}
