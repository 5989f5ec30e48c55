//! Per-user inbox of recent messages.

use std::sync::Arc;

use aroma_shared::constants::DEFAULT_INBOX_LIFETIME;
use aroma_shared::{LengthOfTime, Message, User};

use crate::assertions;
use crate::codec::canonical_id;
use crate::error::Result;
use crate::mappers::message_from_row;
use crate::session::{self, Session};
use crate::statements::{inbox as statements, Ttl};

pub trait InboxRepository: Send + Sync {
    fn save_message_for_user(
        &self,
        user: &User,
        message: &Message,
        lifetime: &LengthOfTime,
    ) -> Result<()>;

    fn save_message_for_user_with_default_lifetime(
        &self,
        user: &User,
        message: &Message,
    ) -> Result<()> {
        self.save_message_for_user(user, message, &DEFAULT_INBOX_LIFETIME)
    }

    /// Newest first; expired entries are never returned.
    fn get_messages_for_user(&self, user_id: &str) -> Result<Vec<Message>>;

    fn get_messages_for_user_and_app(&self, user_id: &str, app_id: &str) -> Result<Vec<Message>> {
        assertions::valid_app_id(app_id)?;
        let app_id = canonical_id(app_id);

        Ok(self
            .get_messages_for_user(user_id)?
            .into_iter()
            .filter(|message| canonical_id(&message.application_id) == app_id)
            .collect())
    }

    fn contains_message_in_inbox(&self, user_id: &str, message: &Message) -> Result<bool>;

    fn delete_message_for_user(&self, user_id: &str, message_id: &str) -> Result<()>;

    fn delete_all_messages_for_user(&self, user_id: &str) -> Result<()>;

    fn count_inbox_for_user(&self, user_id: &str) -> Result<i64>;
}

pub struct StoreInboxRepository {
    session: Arc<dyn Session>,
}

impl StoreInboxRepository {
    pub fn new(session: Arc<dyn Session>) -> Self {
        Self { session }
    }
}

impl InboxRepository for StoreInboxRepository {
    fn save_message_for_user(
        &self,
        user: &User,
        message: &Message,
        lifetime: &LengthOfTime,
    ) -> Result<()> {
        assertions::valid_user(user)?;
        assertions::valid_message(message)?;
        let ttl = Ttl::from_lifetime(lifetime)?;

        session::execute(
            self.session.as_ref(),
            &statements::save(&user.user_id, message, ttl),
            || format!("save message {} to inbox of {}", message.message_id, user.user_id),
        )?;
        Ok(())
    }

    fn get_messages_for_user(&self, user_id: &str) -> Result<Vec<Message>> {
        assertions::valid_user_id(user_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::select_for_user(user_id),
            || format!("load inbox of {user_id}"),
        )?;
        let messages: Vec<Message> = rows.rows().iter().map(message_from_row).collect();
        tracing::debug!(user_id, count = messages.len(), "loaded inbox");
        Ok(messages)
    }

    fn contains_message_in_inbox(&self, user_id: &str, message: &Message) -> Result<bool> {
        assertions::valid_user_id(user_id)?;
        assertions::valid_message_id(&message.message_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::count_message(user_id, &message.message_id),
            || format!("check inbox of {user_id} for {}", message.message_id),
        )?;
        Ok(rows.count() > 0)
    }

    fn delete_message_for_user(&self, user_id: &str, message_id: &str) -> Result<()> {
        assertions::valid_user_id(user_id)?;
        assertions::valid_message_id(message_id)?;

        session::execute(
            self.session.as_ref(),
            &statements::delete_message(user_id, message_id),
            || format!("delete message {message_id} from inbox of {user_id}"),
        )?;
        Ok(())
    }

    fn delete_all_messages_for_user(&self, user_id: &str) -> Result<()> {
        assertions::valid_user_id(user_id)?;

        session::execute(
            self.session.as_ref(),
            &statements::delete_all(user_id),
            || format!("clear inbox of {user_id}"),
        )?;
        Ok(())
    }

    fn count_inbox_for_user(&self, user_id: &str) -> Result<i64> {
        assertions::valid_user_id(user_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::count_for_user(user_id),
            || format!("count inbox of {user_id}"),
        )?;
        Ok(rows.count())
    }
}
