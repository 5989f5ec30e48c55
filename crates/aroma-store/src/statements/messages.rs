use aroma_shared::Message;
use rusqlite::types::Value;

use super::{Batch, Delete, Insert, Select, Statement, Ttl};
use crate::assertions::is_null_or_empty;
use crate::codec;
use crate::tables::messages::*;

/// Every column of a message row, shared by the messages tables and the inbox.
pub fn columns(message: &Message) -> Vec<(&'static str, Value)> {
    vec![
        (MESSAGE_ID, codec::uuid(&message.message_id)),
        (APP_ID, codec::uuid(&message.application_id)),
        (APP_NAME, codec::optional_text(message.application_name.as_deref())),
        (TITLE, codec::text(&message.title)),
        (BODY, codec::optional_text(message.body.as_deref())),
        (URGENCY, codec::enum_name(message.urgency.as_ref())),
        (HOSTNAME, codec::optional_text(message.hostname.as_deref())),
        (MAC_ADDRESS, codec::optional_text(message.mac_address.as_deref())),
        (DEVICE_NAME, codec::optional_text(message.device_name.as_deref())),
        (TIME_CREATED, codec::timestamp(message.time_of_creation)),
        (TIME_RECEIVED, codec::timestamp(message.time_message_received)),
    ]
}

fn hostname(message: &Message) -> Option<&str> {
    let hostname = message.hostname.as_deref();
    if is_null_or_empty(hostname) {
        None
    } else {
        hostname
    }
}

/// Primary row, per-app row and, when the message names a host, per-host
/// row; all with the same TTL.  A host row left behind by `previous` is
/// removed in the same batch.
pub fn save(message: &Message, previous: Option<&Message>, ttl: Ttl) -> Statement {
    let columns = columns(message);
    let mut batch = Batch::new();

    if let Some(stale) = previous.and_then(hostname) {
        if hostname(message) != Some(stale) {
            batch.push(delete_hostname_row(stale, row_key(message)));
        }
    }

    batch.push(Insert::into_table(TABLE).values(columns.clone()).using_ttl(ttl));
    batch.push(Insert::into_table(BY_APP).values(columns.clone()).using_ttl(ttl));

    if hostname(message).is_some() {
        batch.push(Insert::into_table(BY_HOSTNAME).values(columns).using_ttl(ttl));
    }

    batch.into()
}

/// `(app_id, message_id)`, the key shared by every messages table.
fn row_key(message: &Message) -> (Value, Value) {
    (
        codec::uuid(&message.application_id),
        codec::uuid(&message.message_id),
    )
}

fn delete_hostname_row(hostname: &str, (app_id, message_id): (Value, Value)) -> Delete {
    Delete::from_table(BY_HOSTNAME)
        .where_eq(HOSTNAME, codec::text(hostname))
        .where_eq(APP_ID, app_id)
        .where_eq(MESSAGE_ID, message_id)
}

pub fn delete(message: &Message) -> Statement {
    let (app_id, message_id) = row_key(message);

    let mut batch = Batch::new()
        .add(
            Delete::from_table(TABLE)
                .where_eq(APP_ID, app_id.clone())
                .where_eq(MESSAGE_ID, message_id.clone()),
        )
        .add(
            Delete::from_table(BY_APP)
                .where_eq(APP_ID, app_id.clone())
                .where_eq(MESSAGE_ID, message_id.clone()),
        );

    if let Some(hostname) = hostname(message) {
        batch.push(delete_hostname_row(hostname, (app_id, message_id)));
    }

    batch.into()
}

pub fn select_by_id(app_id: &str, message_id: &str) -> Statement {
    Select::all(TABLE)
        .where_eq(APP_ID, codec::uuid(app_id))
        .where_eq(MESSAGE_ID, codec::uuid(message_id))
        .into()
}

pub fn count_by_id(app_id: &str, message_id: &str) -> Statement {
    Select::count(TABLE)
        .where_eq(APP_ID, codec::uuid(app_id))
        .where_eq(MESSAGE_ID, codec::uuid(message_id))
        .into()
}

pub fn select_by_hostname(hostname: &str) -> Statement {
    Select::all(BY_HOSTNAME)
        .where_eq(HOSTNAME, codec::text(hostname))
        .order_by_desc(TIME_CREATED)
        .into()
}

/// Newest first, optionally bounded.
pub fn select_by_app(app_id: &str, limit: Option<usize>) -> Statement {
    let select = Select::all(BY_APP)
        .where_eq(APP_ID, codec::uuid(app_id))
        .order_by_desc(TIME_CREATED);

    match limit {
        Some(limit) => select.limit(limit).into(),
        None => select.into(),
    }
}

pub fn select_by_title(app_id: &str, title: &str) -> Statement {
    Select::all(BY_APP)
        .where_eq(APP_ID, codec::uuid(app_id))
        .where_eq(TITLE, codec::text(title))
        .order_by_desc(TIME_CREATED)
        .into()
}

pub fn count_by_app(app_id: &str) -> Statement {
    Select::count(BY_APP)
        .where_eq(APP_ID, codec::uuid(app_id))
        .into()
}

/// Range delete of the per-app partition.
pub fn delete_app_partition(app_id: &str) -> Statement {
    Delete::from_table(BY_APP)
        .where_eq(APP_ID, codec::uuid(app_id))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(hostname: Option<&str>) -> Message {
        Message {
            message_id: "66666666-6666-6666-6666-666666666666".into(),
            application_id: "11111111-1111-1111-1111-111111111111".into(),
            title: "Disk full".into(),
            hostname: hostname.map(str::to_string),
            ..Default::default()
        }
    }

    fn tables_of(statement: &Statement) -> Vec<&'static str> {
        match statement {
            Statement::Batch(batch) => {
                batch.statements.iter().filter_map(Statement::table).collect()
            }
            other => other.table().into_iter().collect(),
        }
    }

    fn inserts(statement: Statement) -> Vec<Insert> {
        match statement {
            Statement::Batch(batch) => batch
                .statements
                .into_iter()
                .filter_map(|s| match s {
                    Statement::Insert(insert) => Some(insert),
                    _ => None,
                })
                .collect(),
            other => panic!("expected a batch, got {other:?}"),
        }
    }

    #[test]
    fn test_every_row_carries_the_ttl() {
        let ttl = Ttl::from_seconds(60).unwrap();
        let rows = inserts(save(&message(Some("web-1")), None, ttl));

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|insert| insert.ttl == Some(ttl)));
    }

    #[test]
    fn test_hostname_row_is_optional() {
        let ttl = Ttl::from_seconds(60).unwrap();
        let tables: Vec<_> = inserts(save(&message(None), None, ttl))
            .iter()
            .map(|insert| insert.table)
            .collect();
        assert_eq!(tables, vec![TABLE, BY_APP]);
    }

    #[test]
    fn test_host_change_drops_the_old_host_row() {
        let ttl = Ttl::from_seconds(60).unwrap();
        let previous = message(Some("db-1"));
        let statement = save(&message(Some("db-2")), Some(&previous), ttl);
        assert_eq!(tables_of(&statement), vec![BY_HOSTNAME, TABLE, BY_APP, BY_HOSTNAME]);

        match statement {
            Statement::Batch(batch) => match &batch.statements[0] {
                Statement::Delete(delete) => {
                    assert_eq!(delete.conditions[0].value, codec::text("db-1"));
                    assert_eq!(delete.conditions.len(), 3);
                }
                other => panic!("expected a delete, got {other:?}"),
            },
            other => panic!("expected a batch, got {other:?}"),
        }
    }

    #[test]
    fn test_same_host_resave_deletes_nothing() {
        let ttl = Ttl::from_seconds(60).unwrap();
        let previous = message(Some("web-1"));
        let statement = save(&message(Some("web-1")), Some(&previous), ttl);
        assert_eq!(tables_of(&statement), vec![TABLE, BY_APP, BY_HOSTNAME]);
    }

    #[test]
    fn test_delete_is_keyed_by_app_and_message() {
        match delete(&message(Some("web-1"))) {
            Statement::Batch(batch) => {
                for statement in &batch.statements {
                    match statement {
                        Statement::Delete(delete) => assert!(delete
                            .conditions
                            .iter()
                            .any(|condition| condition.column == APP_ID)),
                        other => panic!("expected a delete, got {other:?}"),
                    }
                }
            }
            other => panic!("expected a batch, got {other:?}"),
        }
    }

    #[test]
    fn test_list_is_newest_first() {
        match select_by_app("11111111-1111-1111-1111-111111111111", Some(5)) {
            Statement::Select(select) => {
                assert_eq!(select.order_by_desc, Some(TIME_CREATED));
                assert_eq!(select.limit, Some(5));
            }
            other => panic!("unexpected statement {other:?}"),
        }
    }
}
