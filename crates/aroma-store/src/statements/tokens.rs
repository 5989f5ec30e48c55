use aroma_shared::AuthenticationToken;
use rusqlite::types::Value;

use super::{Batch, Delete, Insert, Select, Statement, Ttl};
use crate::codec;
use crate::tables::tokens::*;

pub fn columns(token: &AuthenticationToken) -> Vec<(&'static str, Value)> {
    vec![
        (TOKEN_ID, codec::uuid(&token.token_id)),
        (OWNER_ID, codec::uuid(&token.owner_id)),
        (ORG_ID, codec::optional_uuid(token.organization_id.as_deref())),
        (OWNER_NAME, codec::optional_text(token.owner_name.as_deref())),
        (TOKEN_TYPE, codec::enum_name(token.token_type.as_ref())),
        (STATUS, codec::enum_name(token.status.as_ref())),
        (TIME_CREATED, codec::timestamp(token.time_of_creation)),
        (TIME_EXPIRES, codec::timestamp(token.time_of_expiration)),
    ]
}

/// Upsert the primary row and the owner row.  When `previous` belonged to a
/// different owner, that owner's row is removed in the same batch.
pub fn save(
    token: &AuthenticationToken,
    previous: Option<&AuthenticationToken>,
    ttl: Ttl,
) -> Statement {
    let columns = columns(token);
    let mut batch = Batch::new();

    if let Some(previous) = previous {
        if codec::canonical_id(&previous.owner_id) != codec::canonical_id(&token.owner_id) {
            batch.push(delete_owner_row(&previous.owner_id, &previous.token_id));
        }
    }

    batch
        .add(Insert::into_table(TABLE).values(columns.clone()).using_ttl(ttl))
        .add(Insert::into_table(BY_OWNER).values(columns).using_ttl(ttl))
        .into()
}

fn delete_owner_row(owner_id: &str, token_id: &str) -> Delete {
    Delete::from_table(BY_OWNER)
        .where_eq(OWNER_ID, codec::uuid(owner_id))
        .where_eq(TOKEN_ID, codec::uuid(token_id))
}

pub fn delete(token: &AuthenticationToken) -> Statement {
    Batch::new()
        .add(Delete::from_table(TABLE).where_eq(TOKEN_ID, codec::uuid(&token.token_id)))
        .add(delete_owner_row(&token.owner_id, &token.token_id))
        .into()
}

/// Range delete of the owner's partition followed by a targeted delete of
/// each primary row.
pub fn delete_all_for_owner<'a, I>(owner_id: &str, token_ids: I) -> Statement
where
    I: IntoIterator<Item = &'a str>,
{
    let mut batch =
        Batch::new().add(Delete::from_table(BY_OWNER).where_eq(OWNER_ID, codec::uuid(owner_id)));
    for token_id in token_ids {
        batch.push(Delete::from_table(TABLE).where_eq(TOKEN_ID, codec::uuid(token_id)));
    }
    batch.into()
}

pub fn select_by_id(token_id: &str) -> Statement {
    Select::all(TABLE)
        .where_eq(TOKEN_ID, codec::uuid(token_id))
        .into()
}

pub fn count_by_id(token_id: &str) -> Statement {
    Select::count(TABLE)
        .where_eq(TOKEN_ID, codec::uuid(token_id))
        .into()
}

pub fn select_by_owner(owner_id: &str) -> Statement {
    Select::all(BY_OWNER)
        .where_eq(OWNER_ID, codec::uuid(owner_id))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "77777777-7777-7777-7777-777777777777";
    const APP_OWNER: &str = "11111111-1111-1111-1111-111111111111";
    const USER_OWNER: &str = "22222222-2222-2222-2222-222222222222";

    fn token(owner_id: &str) -> AuthenticationToken {
        AuthenticationToken {
            token_id: TOKEN.into(),
            owner_id: owner_id.into(),
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

    #[test]
    fn test_owner_change_drops_the_old_owner_row() {
        let ttl = Ttl::from_seconds(60).unwrap();
        let statement = save(&token(USER_OWNER), Some(&token(APP_OWNER)), ttl);
        assert_eq!(tables_of(&statement), vec![BY_OWNER, TABLE, BY_OWNER]);

        match statement {
            Statement::Batch(batch) => match &batch.statements[0] {
                Statement::Delete(delete) => {
                    assert_eq!(delete.conditions[0].value, codec::uuid(APP_OWNER));
                }
                other => panic!("expected a delete, got {other:?}"),
            },
            other => panic!("expected a batch, got {other:?}"),
        }
    }

    #[test]
    fn test_same_owner_resave_deletes_nothing() {
        let ttl = Ttl::from_seconds(60).unwrap();
        let previous = token(&APP_OWNER.to_uppercase());
        let statement = save(&token(APP_OWNER), Some(&previous), ttl);
        assert_eq!(tables_of(&statement), vec![TABLE, BY_OWNER]);
    }

    #[test]
    fn test_delete_all_starts_with_range_delete() {
        let owner = "22222222-2222-2222-2222-222222222222";
        let ids = [
            "77777777-7777-7777-7777-777777777777",
            "88888888-8888-8888-8888-888888888888",
        ];

        match delete_all_for_owner(owner, ids) {
            Statement::Batch(batch) => {
                let tables: Vec<_> = batch.statements.iter().filter_map(Statement::table).collect();
                assert_eq!(tables, vec![BY_OWNER, TABLE, TABLE]);
            }
            other => panic!("expected a batch, got {other:?}"),
        }
    }
}
