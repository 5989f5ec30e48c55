use aroma_shared::Message;

use super::{messages, Delete, Insert, Select, Statement, Ttl};
use crate::codec;
use crate::tables::inbox::{TABLE, USER_ID};
use crate::tables::messages::{MESSAGE_ID, TIME_CREATED};

pub fn save(user_id: &str, message: &Message, ttl: Ttl) -> Statement {
    Insert::into_table(TABLE)
        .value(USER_ID, codec::uuid(user_id))
        .values(messages::columns(message))
        .using_ttl(ttl)
        .into()
}

/// Newest first.
pub fn select_for_user(user_id: &str) -> Statement {
    Select::all(TABLE)
        .where_eq(USER_ID, codec::uuid(user_id))
        .order_by_desc(TIME_CREATED)
        .into()
}

pub fn count_for_user(user_id: &str) -> Statement {
    Select::count(TABLE)
        .where_eq(USER_ID, codec::uuid(user_id))
        .into()
}

pub fn count_message(user_id: &str, message_id: &str) -> Statement {
    Select::count(TABLE)
        .where_eq(USER_ID, codec::uuid(user_id))
        .where_eq(MESSAGE_ID, codec::uuid(message_id))
        .into()
}

pub fn delete_message(user_id: &str, message_id: &str) -> Statement {
    Delete::from_table(TABLE)
        .where_eq(USER_ID, codec::uuid(user_id))
        .where_eq(MESSAGE_ID, codec::uuid(message_id))
        .into()
}

pub fn delete_all(user_id: &str) -> Statement {
    Delete::from_table(TABLE)
        .where_eq(USER_ID, codec::uuid(user_id))
        .into()
}
