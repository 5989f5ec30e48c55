//! Reaction rules owned by users and applications.
//!
//! Each owner has a single row holding its whole list.  Saving replaces the
//! list; saving an empty list removes the row.

use std::sync::Arc;

use aroma_shared::Reaction;

use crate::assertions;
use crate::error::Result;
use crate::mappers::reactions_from_row;
use crate::session::{self, Session};
use crate::statements::reactions as statements;

pub trait ReactionRepository: Send + Sync {
    fn save_reactions_for_user(&self, user_id: &str, reactions: &[Reaction]) -> Result<()>;

    /// The stored list, or an empty list.
    fn get_reactions_for_user(&self, user_id: &str) -> Result<Vec<Reaction>>;

    fn delete_reactions_for_user(&self, user_id: &str) -> Result<()>;

    fn save_reactions_for_application(&self, app_id: &str, reactions: &[Reaction]) -> Result<()>;

    fn get_reactions_for_application(&self, app_id: &str) -> Result<Vec<Reaction>>;

    fn delete_reactions_for_application(&self, app_id: &str) -> Result<()>;
}

pub struct StoreReactionRepository {
    session: Arc<dyn Session>,
}

impl StoreReactionRepository {
    pub fn new(session: Arc<dyn Session>) -> Self {
        Self { session }
    }

    fn save(&self, owner_id: &str, reactions: &[Reaction]) -> Result<()> {
        let statement = statements::save(owner_id, reactions)?;
        session::execute(self.session.as_ref(), &statement, || {
            format!("save {} reactions of {owner_id}", reactions.len())
        })?;
        Ok(())
    }

    fn get(&self, owner_id: &str) -> Result<Vec<Reaction>> {
        let rows = session::execute(
            self.session.as_ref(),
            &statements::select(owner_id),
            || format!("load reactions of {owner_id}"),
        )?;
        let reactions = rows.one().map(reactions_from_row).unwrap_or_default();
        tracing::debug!(owner_id, count = reactions.len(), "loaded reactions");
        Ok(reactions)
    }

    fn delete(&self, owner_id: &str) -> Result<()> {
        session::execute(
            self.session.as_ref(),
            &statements::delete(owner_id),
            || format!("delete reactions of {owner_id}"),
        )?;
        Ok(())
    }
}

impl ReactionRepository for StoreReactionRepository {
    fn save_reactions_for_user(&self, user_id: &str, reactions: &[Reaction]) -> Result<()> {
        assertions::valid_user_id(user_id)?;
        self.save(user_id, reactions)
    }

    fn get_reactions_for_user(&self, user_id: &str) -> Result<Vec<Reaction>> {
        assertions::valid_user_id(user_id)?;
        self.get(user_id)
    }

    fn delete_reactions_for_user(&self, user_id: &str) -> Result<()> {
        assertions::valid_user_id(user_id)?;
        self.delete(user_id)
    }

    fn save_reactions_for_application(&self, app_id: &str, reactions: &[Reaction]) -> Result<()> {
        assertions::valid_app_id(app_id)?;
        self.save(app_id, reactions)
    }

    fn get_reactions_for_application(&self, app_id: &str) -> Result<Vec<Reaction>> {
        assertions::valid_app_id(app_id)?;
        self.get(app_id)
    }

    fn delete_reactions_for_application(&self, app_id: &str) -> Result<()> {
        assertions::valid_app_id(app_id)?;
        self.delete(app_id)
    }
}

#[cfg(test)]
mod tests {
    use aroma_shared::{Action, Matcher};

    use super::*;
    use crate::fixtures::{self, APP_ID, USER_ID};
    use crate::session::{MockSession, ResultSet, Row};
    use crate::tables;

    fn reaction() -> Reaction {
        Reaction {
            name: Some("skip noisy hosts".into()),
            matchers: vec![Matcher::HostnameIs {
                expected_hostname: "ci-runner".into(),
            }],
            actions: vec![Action::SkipInbox],
        }
    }

    fn repository() -> StoreReactionRepository {
        StoreReactionRepository::new(fixtures::database(&fixtures::clock()))
    }

    #[test]
    fn test_save_replaces_the_list() {
        let repo = repository();
        repo.save_reactions_for_application(APP_ID, &[reaction(), reaction()])
            .unwrap();
        repo.save_reactions_for_application(APP_ID, &[reaction()]).unwrap();

        assert_eq!(repo.get_reactions_for_application(APP_ID).unwrap(), vec![reaction()]);
        assert!(repo.get_reactions_for_user(USER_ID).unwrap().is_empty());
    }

    #[test]
    fn test_empty_list_removes_reactions() {
        let repo = repository();
        repo.save_reactions_for_user(USER_ID, &[reaction()]).unwrap();
        repo.save_reactions_for_user(USER_ID, &[]).unwrap();
        assert!(repo.get_reactions_for_user(USER_ID).unwrap().is_empty());

        repo.save_reactions_for_user(USER_ID, &[reaction()]).unwrap();
        repo.delete_reactions_for_user(USER_ID).unwrap();
        assert!(repo.get_reactions_for_user(USER_ID).unwrap().is_empty());
    }

    #[test]
    fn test_undecodable_reaction_is_skipped() {
        let mut session = MockSession::new();
        session.expect_execute().times(1).returning(|_| {
            let json = r#"[{"name":null,"matchers":[{"type":"all"}],"actions":[]},{"bogus":1}]"#;
            Ok(ResultSet::new(vec![Row::new().with(
                tables::reactions::SERIALIZED_REACTIONS,
                rusqlite::types::Value::Text(json.into()),
            )]))
        });
        let repo = StoreReactionRepository::new(Arc::new(session));

        let reactions = repo.get_reactions_for_user(USER_ID).unwrap();
        assert_eq!(reactions.len(), 1);
        assert_eq!(reactions[0].matchers, vec![Matcher::All]);
    }
}
