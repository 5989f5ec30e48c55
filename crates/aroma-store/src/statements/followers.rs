use aroma_shared::{Application, User};

use super::{applications, users, Batch, Delete, Insert, Select, Statement};
use crate::codec;
use crate::tables::applications::APP_ID;
use crate::tables::followers::{APPS_FOLLOWED_BY_USER, FOLLOWERS_OF_APP};
use crate::tables::users::USER_ID;

/// Both sides of the relation in one batch.
pub fn save(user: &User, app: &Application) -> Statement {
    Batch::new()
        .add(
            Insert::into_table(APPS_FOLLOWED_BY_USER)
                .value(USER_ID, codec::uuid(&user.user_id))
                .values(applications::columns(app)),
        )
        .add(
            Insert::into_table(FOLLOWERS_OF_APP)
                .value(APP_ID, codec::uuid(&app.application_id))
                .values(users::columns(user)),
        )
        .into()
}

pub fn delete(user_id: &str, app_id: &str) -> Statement {
    Batch::new()
        .add(
            Delete::from_table(APPS_FOLLOWED_BY_USER)
                .where_eq(USER_ID, codec::uuid(user_id))
                .where_eq(APP_ID, codec::uuid(app_id)),
        )
        .add(
            Delete::from_table(FOLLOWERS_OF_APP)
                .where_eq(APP_ID, codec::uuid(app_id))
                .where_eq(USER_ID, codec::uuid(user_id)),
        )
        .into()
}

pub fn count_following(user_id: &str, app_id: &str) -> Statement {
    Select::count(APPS_FOLLOWED_BY_USER)
        .where_eq(USER_ID, codec::uuid(user_id))
        .where_eq(APP_ID, codec::uuid(app_id))
        .into()
}

pub fn select_apps_followed_by(user_id: &str) -> Statement {
    Select::all(APPS_FOLLOWED_BY_USER)
        .where_eq(USER_ID, codec::uuid(user_id))
        .into()
}

pub fn select_followers_of(app_id: &str) -> Statement {
    Select::all(FOLLOWERS_OF_APP)
        .where_eq(APP_ID, codec::uuid(app_id))
        .into()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn test_save_writes_both_sides() {
        let user = User::with_id("55555555-5555-5555-5555-555555555555");
        let app = Application {
            application_id: "11111111-1111-1111-1111-111111111111".into(),
            name: "Canary".into(),
            owners: BTreeSet::from(["22222222-2222-2222-2222-222222222222".to_string()]),
            ..Default::default()
        };

        match save(&user, &app) {
            Statement::Batch(batch) => {
                let tables: Vec<_> = batch.statements.iter().filter_map(Statement::table).collect();
                assert_eq!(tables, vec![APPS_FOLLOWED_BY_USER, FOLLOWERS_OF_APP]);
            }
            other => panic!("expected a batch, got {other:?}"),
        }
    }
}
