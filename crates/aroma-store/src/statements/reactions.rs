use aroma_shared::Reaction;

use super::{Delete, Insert, Select, Statement};
use crate::codec;
use crate::error::Result;
use crate::tables::reactions::*;

/// The whole list replaces what was stored; an empty list removes the row.
pub fn save(owner_id: &str, reactions: &[Reaction]) -> Result<Statement> {
    if reactions.is_empty() {
        return Ok(delete(owner_id));
    }

    Ok(Insert::into_table(TABLE)
        .value(OWNER_ID, codec::uuid(owner_id))
        .value(SERIALIZED_REACTIONS, codec::json(reactions)?)
        .into())
}

pub fn select(owner_id: &str) -> Statement {
    Select::all(TABLE)
        .where_eq(OWNER_ID, codec::uuid(owner_id))
        .into()
}

pub fn delete(owner_id: &str) -> Statement {
    Delete::from_table(TABLE)
        .where_eq(OWNER_ID, codec::uuid(owner_id))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_deletes() {
        let statement = save("22222222-2222-2222-2222-222222222222", &[]).unwrap();
        assert!(matches!(statement, Statement::Delete(_)));
    }
}
