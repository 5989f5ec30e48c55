use aroma_shared::Event;

use super::{Delete, Insert, Select, Statement, Ttl};
use crate::codec;
use crate::error::Result;
use crate::tables::activity::*;

pub fn save(event: &Event, ttl: Ttl) -> Result<Statement> {
    let payload = match &event.event_type {
        Some(event_type) => codec::json(event_type)?,
        None => rusqlite::types::Value::Null,
    };
    let kind = event.event_type.as_ref().map(|e| e.kind());

    Ok(Insert::into_table(TABLE)
        .value(USER_ID, codec::uuid(&event.user_id))
        .value(EVENT_ID, codec::uuid(&event.event_id))
        .value(APP_ID, codec::optional_uuid(event.application_id.as_deref()))
        .value(ACTOR_ID, codec::optional_uuid(event.actor_id.as_deref()))
        .value(TIME_CREATED, codec::timestamp(event.timestamp))
        .value(EVENT_KIND, codec::optional_text(kind))
        .value(SERIALIZED_EVENT, payload)
        .using_ttl(ttl)
        .into())
}

pub fn select_by_id(user_id: &str, event_id: &str) -> Statement {
    Select::all(TABLE)
        .where_eq(USER_ID, codec::uuid(user_id))
        .where_eq(EVENT_ID, codec::uuid(event_id))
        .into()
}

pub fn count_by_id(user_id: &str, event_id: &str) -> Statement {
    Select::count(TABLE)
        .where_eq(USER_ID, codec::uuid(user_id))
        .where_eq(EVENT_ID, codec::uuid(event_id))
        .into()
}

/// Newest first.
pub fn select_all_for(user_id: &str) -> Statement {
    Select::all(TABLE)
        .where_eq(USER_ID, codec::uuid(user_id))
        .order_by_desc(TIME_CREATED)
        .into()
}

pub fn delete(user_id: &str, event_id: &str) -> Statement {
    Delete::from_table(TABLE)
        .where_eq(USER_ID, codec::uuid(user_id))
        .where_eq(EVENT_ID, codec::uuid(event_id))
        .into()
}

pub fn delete_all_for(user_id: &str) -> Statement {
    Delete::from_table(TABLE)
        .where_eq(USER_ID, codec::uuid(user_id))
        .into()
}
