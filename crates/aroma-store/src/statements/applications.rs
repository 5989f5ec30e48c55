use aroma_shared::Application;
use rusqlite::types::Value;

use super::{Batch, Delete, Insert, Select, Statement};
use crate::codec;
use crate::tables::applications::*;
use crate::tables::RECENT_BUCKET;

/// Every column of an application row, shared by the primary table and all
/// of its projections.
pub fn columns(app: &Application) -> Vec<(&'static str, Value)> {
    vec![
        (APP_ID, codec::uuid(&app.application_id)),
        (NAME, codec::text(&app.name)),
        (DESCRIPTION, codec::optional_text(app.application_description.as_deref())),
        (ORG_ID, codec::optional_uuid(app.organization_id.as_deref())),
        (ICON_MEDIA_ID, codec::optional_uuid(app.application_icon_media_id.as_deref())),
        (OWNERS, codec::uuid_set(&app.owners)),
        (FOLLOWERS, codec::uuid_set(&app.followers)),
        (TIER, codec::enum_name(app.tier.as_ref())),
        (PROGRAMMING_LANGUAGE, codec::enum_name(app.programming_language.as_ref())),
        (TIME_PROVISIONED, codec::timestamp(app.time_of_provisioning)),
        (TIME_OF_TOKEN_EXPIRATION, codec::timestamp(app.time_of_token_expiration)),
    ]
}

/// Upsert the primary row and every projection.  Owner and organization rows
/// left behind by `previous` are removed in the same batch.
pub fn save(app: &Application, previous: Option<&Application>) -> Statement {
    let columns = columns(app);
    let mut batch = Batch::new();

    if let Some(previous) = previous {
        for owner in previous.owners.difference(&app.owners) {
            batch.push(delete_owner_row(owner, &previous.application_id));
        }
        if let Some(org_id) = previous.organization_id.as_deref() {
            if previous.organization_id != app.organization_id {
                batch.push(delete_org_row(org_id, &previous.application_id));
            }
        }
    }

    batch.push(Insert::into_table(TABLE).values(columns.clone()));

    for owner in &app.owners {
        batch.push(
            Insert::into_table(BY_OWNER)
                .value(OWNER_ID, codec::uuid(owner))
                .values(columns.clone()),
        );
    }

    // The org id is part of the shared column list.
    if app.organization_id.is_some() {
        batch.push(Insert::into_table(BY_ORG).values(columns.clone()));
    }

    batch.push(
        Insert::into_table(RECENTLY_CREATED)
            .value(BUCKET, codec::text(RECENT_BUCKET))
            .values(columns),
    );

    batch.into()
}

/// Remove the primary row and every projection of `app`.
pub fn delete(app: &Application) -> Statement {
    let app_id = &app.application_id;
    let mut batch =
        Batch::new().add(Delete::from_table(TABLE).where_eq(APP_ID, codec::uuid(app_id)));

    for owner in &app.owners {
        batch.push(delete_owner_row(owner, app_id));
    }
    if let Some(org_id) = app.organization_id.as_deref() {
        batch.push(delete_org_row(org_id, app_id));
    }
    batch.push(
        Delete::from_table(RECENTLY_CREATED)
            .where_eq(BUCKET, codec::text(RECENT_BUCKET))
            .where_eq(APP_ID, codec::uuid(app_id)),
    );

    batch.into()
}

fn delete_owner_row(owner_id: &str, app_id: &str) -> Delete {
    Delete::from_table(BY_OWNER)
        .where_eq(OWNER_ID, codec::uuid(owner_id))
        .where_eq(APP_ID, codec::uuid(app_id))
}

fn delete_org_row(org_id: &str, app_id: &str) -> Delete {
    Delete::from_table(BY_ORG)
        .where_eq(ORG_ID, codec::uuid(org_id))
        .where_eq(APP_ID, codec::uuid(app_id))
}

pub fn select_by_id(app_id: &str) -> Statement {
    Select::all(TABLE)
        .where_eq(APP_ID, codec::uuid(app_id))
        .into()
}

pub fn count_by_id(app_id: &str) -> Statement {
    Select::count(TABLE)
        .where_eq(APP_ID, codec::uuid(app_id))
        .into()
}

pub fn select_by_owner(owner_id: &str) -> Statement {
    Select::all(BY_OWNER)
        .where_eq(OWNER_ID, codec::uuid(owner_id))
        .into()
}

pub fn select_by_org(org_id: &str) -> Statement {
    Select::all(BY_ORG)
        .where_eq(ORG_ID, codec::uuid(org_id))
        .into()
}

/// Newest first.
pub fn select_recent(limit: usize) -> Statement {
    Select::all(RECENTLY_CREATED)
        .where_eq(BUCKET, codec::text(RECENT_BUCKET))
        .order_by_desc(TIME_PROVISIONED)
        .limit(limit)
        .into()
}
