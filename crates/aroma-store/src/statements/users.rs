use aroma_shared::User;
use rusqlite::types::Value;

use super::{Batch, Delete, Insert, Select, Statement};
use crate::assertions::is_null_or_empty;
use crate::codec;
use crate::tables::users::*;
use crate::tables::RECENT_BUCKET;

/// Every column of a user row.
pub fn columns(user: &User) -> Vec<(&'static str, Value)> {
    vec![
        (USER_ID, codec::uuid(&user.user_id)),
        (EMAIL, codec::optional_text(user.email.as_deref())),
        (FIRST_NAME, codec::optional_text(user.first_name.as_deref())),
        (MIDDLE_NAME, codec::optional_text(user.middle_name.as_deref())),
        (LAST_NAME, codec::optional_text(user.last_name.as_deref())),
        (ROLES, codec::enum_set(&user.roles)),
        (PROFILE_IMAGE_LINK, codec::optional_text(user.profile_image_link.as_deref())),
        (GITHUB_PROFILE, codec::optional_text(user.github_profile.as_deref())),
        (BIRTHDAY, codec::timestamp(user.birthday)),
        (TIME_JOINED, codec::timestamp(user.time_user_joined)),
    ]
}

/// The value, unless it is absent or blank.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    let value = value.as_deref();
    if is_null_or_empty(value) {
        None
    } else {
        value
    }
}

/// Upsert the primary row plus the email, GitHub and recent projections.
/// Lookup rows for an email or profile the user no longer has are removed.
pub fn save(user: &User, previous: Option<&User>) -> Statement {
    let columns = columns(user);
    let mut batch = Batch::new();

    if let Some(previous) = previous {
        if let Some(email) = present(&previous.email) {
            if present(&user.email) != Some(email) {
                batch.push(delete_email_row(email, &previous.user_id));
            }
        }
        if let Some(profile) = present(&previous.github_profile) {
            if present(&user.github_profile) != Some(profile) {
                batch.push(delete_github_row(profile, &previous.user_id));
            }
        }
    }

    batch.push(Insert::into_table(TABLE).values(columns.clone()));

    if present(&user.email).is_some() {
        batch.push(Insert::into_table(BY_EMAIL).values(columns.clone()));
    }
    if present(&user.github_profile).is_some() {
        batch.push(Insert::into_table(BY_GITHUB_PROFILE).values(columns.clone()));
    }

    batch.push(
        Insert::into_table(RECENT)
            .value(BUCKET, codec::text(RECENT_BUCKET))
            .values(columns),
    );

    batch.into()
}

pub fn delete(user: &User) -> Statement {
    let user_id = &user.user_id;
    let mut batch =
        Batch::new().add(Delete::from_table(TABLE).where_eq(USER_ID, codec::uuid(user_id)));

    if let Some(email) = present(&user.email) {
        batch.push(delete_email_row(email, user_id));
    }
    if let Some(profile) = present(&user.github_profile) {
        batch.push(delete_github_row(profile, user_id));
    }
    batch.push(
        Delete::from_table(RECENT)
            .where_eq(BUCKET, codec::text(RECENT_BUCKET))
            .where_eq(USER_ID, codec::uuid(user_id)),
    );

    batch.into()
}

// Keyed on the user id too, so a lookup row since claimed by another user
// survives.
fn delete_email_row(email: &str, user_id: &str) -> Delete {
    Delete::from_table(BY_EMAIL)
        .where_eq(EMAIL, codec::text(email))
        .where_eq(USER_ID, codec::uuid(user_id))
}

fn delete_github_row(profile: &str, user_id: &str) -> Delete {
    Delete::from_table(BY_GITHUB_PROFILE)
        .where_eq(GITHUB_PROFILE, codec::text(profile))
        .where_eq(USER_ID, codec::uuid(user_id))
}

pub fn select_by_id(user_id: &str) -> Statement {
    Select::all(TABLE)
        .where_eq(USER_ID, codec::uuid(user_id))
        .into()
}

pub fn count_by_id(user_id: &str) -> Statement {
    Select::count(TABLE)
        .where_eq(USER_ID, codec::uuid(user_id))
        .into()
}

pub fn select_by_email(email: &str) -> Statement {
    Select::all(BY_EMAIL)
        .where_eq(EMAIL, codec::text(email))
        .into()
}

pub fn select_by_github_profile(profile: &str) -> Statement {
    Select::all(BY_GITHUB_PROFILE)
        .where_eq(GITHUB_PROFILE, codec::text(profile))
        .into()
}

/// Newest first.
pub fn select_recent(limit: usize) -> Statement {
    Select::all(RECENT)
        .where_eq(BUCKET, codec::text(RECENT_BUCKET))
        .order_by_desc(TIME_JOINED)
        .limit(limit)
        .into()
}
