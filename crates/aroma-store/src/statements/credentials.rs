use super::{Delete, Insert, Select, Statement};
use crate::codec;
use crate::tables::credentials::*;

pub fn save(user_id: &str, encrypted_password: &str, now: i64) -> Statement {
    Insert::into_table(TABLE)
        .value(USER_ID, codec::uuid(user_id))
        .value(ENCRYPTED_PASSWORD, codec::text(encrypted_password))
        .value(TIME_CREATED, codec::timestamp(Some(now)))
        .into()
}

pub fn select(user_id: &str) -> Statement {
    Select::all(TABLE)
        .where_eq(USER_ID, codec::uuid(user_id))
        .into()
}

pub fn count(user_id: &str) -> Statement {
    Select::count(TABLE)
        .where_eq(USER_ID, codec::uuid(user_id))
        .into()
}

pub fn delete(user_id: &str) -> Statement {
    Delete::from_table(TABLE)
        .where_eq(USER_ID, codec::uuid(user_id))
        .into()
}
