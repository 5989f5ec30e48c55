//! Message repository.
//!
//! Every message row is written with a TTL; reads never return a message
//! whose lifetime has passed.

use std::sync::Arc;

use aroma_shared::constants::DEFAULT_MESSAGE_LIFETIME;
use aroma_shared::{LengthOfTime, Message};

use crate::assertions;
use crate::error::{Result, StoreError};
use crate::mappers::message_from_row;
use crate::session::{self, Session};
use crate::statements::{messages as statements, Statement, Ttl};
use crate::users::required_lookup;

pub trait MessageRepository: Send + Sync {
    /// Store a message for `lifetime`, or the default message lifetime.
    fn save_message(&self, message: &Message, lifetime: Option<&LengthOfTime>) -> Result<()>;

    fn get_message(&self, app_id: &str, message_id: &str) -> Result<Message>;

    fn delete_message(&self, app_id: &str, message_id: &str) -> Result<()>;

    fn contains_message(&self, app_id: &str, message_id: &str) -> Result<bool>;

    fn get_by_hostname(&self, hostname: &str) -> Result<Vec<Message>>;

    /// Newest first.  May return fewer than `limit` as messages expire.
    fn get_by_application(&self, app_id: &str, limit: Option<usize>) -> Result<Vec<Message>>;

    fn get_by_title(&self, app_id: &str, title: &str) -> Result<Vec<Message>>;

    fn get_count_by_application(&self, app_id: &str) -> Result<i64>;

    /// Deletes message by message, then the application's partition.  Not
    /// atomic; a partial failure is safe to retry.
    fn delete_all_messages(&self, app_id: &str) -> Result<()>;
}

pub(crate) fn lifetime_or(lifetime: Option<&LengthOfTime>, default: LengthOfTime) -> Result<Ttl> {
    Ttl::from_lifetime(lifetime.unwrap_or(&default))
}

pub struct StoreMessageRepository {
    session: Arc<dyn Session>,
}

impl StoreMessageRepository {
    pub fn new(session: Arc<dyn Session>) -> Self {
        Self { session }
    }

    fn find(&self, app_id: &str, message_id: &str) -> Result<Option<Message>> {
        let rows = session::execute(
            self.session.as_ref(),
            &statements::select_by_id(app_id, message_id),
            || format!("load message {message_id}"),
        )?;
        Ok(rows.one().map(message_from_row))
    }

    fn list(&self, statement: Statement, describe: String) -> Result<Vec<Message>> {
        let rows = session::execute(self.session.as_ref(), &statement, || describe.clone())?;
        let messages: Vec<Message> = rows.rows().iter().map(message_from_row).collect();
        tracing::debug!(action = %describe, count = messages.len(), "listed messages");
        Ok(messages)
    }
}

impl MessageRepository for StoreMessageRepository {
    fn save_message(&self, message: &Message, lifetime: Option<&LengthOfTime>) -> Result<()> {
        assertions::valid_message(message)?;
        let ttl = lifetime_or(lifetime, DEFAULT_MESSAGE_LIFETIME)?;

        let previous = self.find(&message.application_id, &message.message_id)?;
        session::execute(
            self.session.as_ref(),
            &statements::save(message, previous.as_ref(), ttl),
            || format!("save message {}", message.message_id),
        )?;
        Ok(())
    }

    fn get_message(&self, app_id: &str, message_id: &str) -> Result<Message> {
        assertions::valid_app_id(app_id)?;
        assertions::valid_message_id(message_id)?;

        self.find(app_id, message_id)?
            .ok_or_else(|| StoreError::MessageDoesNotExist(message_id.to_string()))
    }

    fn delete_message(&self, app_id: &str, message_id: &str) -> Result<()> {
        let message = self.get_message(app_id, message_id)?;

        session::execute(self.session.as_ref(), &statements::delete(&message), || {
            format!("delete message {message_id}")
        })?;
        Ok(())
    }

    fn contains_message(&self, app_id: &str, message_id: &str) -> Result<bool> {
        assertions::valid_app_id(app_id)?;
        assertions::valid_message_id(message_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::count_by_id(app_id, message_id),
            || format!("check message {message_id}"),
        )?;
        Ok(rows.count() > 0)
    }

    fn get_by_hostname(&self, hostname: &str) -> Result<Vec<Message>> {
        required_lookup("hostname", hostname)?;
        self.list(
            statements::select_by_hostname(hostname),
            format!("list messages from host {hostname}"),
        )
    }

    fn get_by_application(&self, app_id: &str, limit: Option<usize>) -> Result<Vec<Message>> {
        assertions::valid_app_id(app_id)?;
        if limit == Some(0) {
            return Err(StoreError::InvalidArgument("limit must be positive".into()));
        }
        self.list(
            statements::select_by_app(app_id, limit),
            format!("list messages of application {app_id}"),
        )
    }

    fn get_by_title(&self, app_id: &str, title: &str) -> Result<Vec<Message>> {
        assertions::valid_app_id(app_id)?;
        required_lookup("title", title)?;
        self.list(
            statements::select_by_title(app_id, title),
            format!("list messages of application {app_id} titled '{title}'"),
        )
    }

    fn get_count_by_application(&self, app_id: &str) -> Result<i64> {
        assertions::valid_app_id(app_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::count_by_app(app_id),
            || format!("count messages of application {app_id}"),
        )?;
        let count = rows.count();
        tracing::debug!(app_id, count, "counted messages");
        Ok(count)
    }

    fn delete_all_messages(&self, app_id: &str) -> Result<()> {
        let messages = self.get_by_application(app_id, None)?;

        for message in &messages {
            session::execute(self.session.as_ref(), &statements::delete(message), || {
                format!("delete message {} of application {app_id}", message.message_id)
            })?;
        }

        session::execute(
            self.session.as_ref(),
            &statements::delete_app_partition(app_id),
            || format!("clear messages of application {app_id}"),
        )?;

        tracing::info!(app_id, deleted = messages.len(), "deleted all messages of application");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, APP_ID, MESSAGE_ID, MISSING_ID, START, TOKEN_ID};
    use crate::session::MockSession;

    fn repository() -> (StoreMessageRepository, Arc<crate::clock::ManualClock>) {
        let clock = fixtures::clock();
        (StoreMessageRepository::new(fixtures::database(&clock)), clock)
    }

    #[test]
    fn test_save_then_get() {
        let (repo, _) = repository();
        let message = fixtures::message(MESSAGE_ID);
        repo.save_message(&message, None).unwrap();

        assert!(repo.contains_message(APP_ID, MESSAGE_ID).unwrap());
        assert_eq!(repo.get_message(APP_ID, MESSAGE_ID).unwrap(), message);
        assert_eq!(repo.get_by_hostname("web-1").unwrap(), vec![message]);
        assert_eq!(repo.get_count_by_application(APP_ID).unwrap(), 1);
    }

    #[test]
    fn test_message_belongs_to_its_application() {
        let (repo, _) = repository();
        repo.save_message(&fixtures::message(MESSAGE_ID), None).unwrap();

        assert!(!repo.contains_message(MISSING_ID, MESSAGE_ID).unwrap());
        assert!(matches!(
            repo.get_message(MISSING_ID, MESSAGE_ID),
            Err(StoreError::MessageDoesNotExist(_))
        ));
    }

    #[test]
    fn test_messages_expire() {
        let (repo, clock) = repository();
        repo.save_message(&fixtures::message(MESSAGE_ID), Some(&LengthOfTime::minutes(1)))
            .unwrap();

        clock.advance_secs(59);
        assert!(repo.contains_message(APP_ID, MESSAGE_ID).unwrap());

        clock.advance_secs(2);
        assert!(!repo.contains_message(APP_ID, MESSAGE_ID).unwrap());
        assert!(repo.get_by_application(APP_ID, None).unwrap().is_empty());
        assert!(repo.get_by_hostname("web-1").unwrap().is_empty());
        assert_eq!(repo.get_count_by_application(APP_ID).unwrap(), 0);
    }

    #[test]
    fn test_default_lifetime_is_three_days() {
        let (repo, clock) = repository();
        repo.save_message(&fixtures::message(MESSAGE_ID), None).unwrap();

        clock.advance_secs(3 * 86_400 - 1);
        assert!(repo.contains_message(APP_ID, MESSAGE_ID).unwrap());
        clock.advance_secs(2);
        assert!(!repo.contains_message(APP_ID, MESSAGE_ID).unwrap());
    }

    #[test]
    fn test_non_positive_lifetime_is_rejected() {
        let (repo, _) = repository();
        assert!(matches!(
            repo.save_message(&fixtures::message(MESSAGE_ID), Some(&LengthOfTime::seconds(0))),
            Err(StoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_list_is_newest_first_and_bounded() {
        let (repo, _) = repository();
        for (offset, id) in [(0, MESSAGE_ID), (10, MISSING_ID), (5, TOKEN_ID)] {
            let mut message = fixtures::message(id);
            message.time_of_creation = Some(START + offset);
            repo.save_message(&message, None).unwrap();
        }

        let ids: Vec<_> = repo
            .get_by_application(APP_ID, Some(2))
            .unwrap()
            .into_iter()
            .map(|m| m.message_id)
            .collect();
        assert_eq!(ids, vec![MISSING_ID, TOKEN_ID]);
    }

    #[test]
    fn test_host_change_leaves_no_stale_host_row() {
        let (repo, _) = repository();
        let mut message = fixtures::message(MESSAGE_ID);
        repo.save_message(&message, None).unwrap();

        message.hostname = Some("web-2".into());
        repo.save_message(&message, None).unwrap();

        assert!(repo.get_by_hostname("web-1").unwrap().is_empty());
        assert_eq!(repo.get_by_hostname("web-2").unwrap(), vec![message]);

        repo.delete_message(APP_ID, MESSAGE_ID).unwrap();
        assert!(repo.get_by_hostname("web-2").unwrap().is_empty());
    }

    #[test]
    fn test_same_id_under_two_applications() {
        let (repo, _) = repository();
        let first = fixtures::message(MESSAGE_ID);
        let second = Message {
            application_id: MISSING_ID.into(),
            ..fixtures::message(MESSAGE_ID)
        };
        repo.save_message(&first, None).unwrap();
        repo.save_message(&second, None).unwrap();

        assert!(repo.contains_message(APP_ID, MESSAGE_ID).unwrap());
        assert!(repo.contains_message(MISSING_ID, MESSAGE_ID).unwrap());
        assert_eq!(repo.get_count_by_application(APP_ID).unwrap(), 1);
        assert_eq!(repo.get_by_hostname("web-1").unwrap().len(), 2);

        repo.delete_message(APP_ID, MESSAGE_ID).unwrap();
        assert_eq!(repo.get_count_by_application(APP_ID).unwrap(), 0);
        assert_eq!(repo.get_message(MISSING_ID, MESSAGE_ID).unwrap(), second);
        assert_eq!(repo.get_by_hostname("web-1").unwrap(), vec![second]);
    }

    #[test]
    fn test_get_by_title() {
        let (repo, _) = repository();
        repo.save_message(&fixtures::message(MESSAGE_ID), None).unwrap();

        assert_eq!(repo.get_by_title(APP_ID, "Deploy finished").unwrap().len(), 1);
        assert!(repo.get_by_title(APP_ID, "Deploy failed").unwrap().is_empty());
    }

    #[test]
    fn test_delete_message() {
        let (repo, _) = repository();
        repo.save_message(&fixtures::message(MESSAGE_ID), None).unwrap();

        repo.delete_message(APP_ID, MESSAGE_ID).unwrap();
        assert!(!repo.contains_message(APP_ID, MESSAGE_ID).unwrap());
        assert!(repo.get_by_hostname("web-1").unwrap().is_empty());
        assert!(matches!(
            repo.delete_message(APP_ID, MESSAGE_ID),
            Err(StoreError::MessageDoesNotExist(_))
        ));
    }

    #[test]
    fn test_delete_all_messages() {
        let (repo, _) = repository();
        repo.save_message(&fixtures::message(MESSAGE_ID), None).unwrap();
        repo.save_message(&fixtures::message(TOKEN_ID), None).unwrap();

        repo.delete_all_messages(APP_ID).unwrap();

        assert_eq!(repo.get_count_by_application(APP_ID).unwrap(), 0);
        assert!(!repo.contains_message(APP_ID, TOKEN_ID).unwrap());
        assert!(repo.get_by_hostname("web-1").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_message_never_reaches_the_store() {
        let mut session = MockSession::new();
        session.expect_execute().times(0);
        let repo = StoreMessageRepository::new(Arc::new(session));

        let mut message = fixtures::message(MESSAGE_ID);
        message.title = String::new();
        assert!(matches!(
            repo.save_message(&message, None),
            Err(StoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            repo.get_by_application("app", None),
            Err(StoreError::InvalidArgument(_))
        ));
    }
}
