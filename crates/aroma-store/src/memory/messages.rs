use std::sync::Arc;

use aroma_shared::constants::DEFAULT_MESSAGE_LIFETIME;
use aroma_shared::{LengthOfTime, Message};
use dashmap::DashMap;

use super::{canonical_message, newest_first, Expiring};
use crate::assertions;
use crate::clock::Clock;
use crate::codec::canonical_id;
use crate::error::{Result, StoreError};
use crate::messages::{lifetime_or, MessageRepository};
use crate::users::required_lookup;

type MessageKey = (String, String);

pub struct MemoryMessageRepository {
    messages: DashMap<MessageKey, Expiring<Message>>,
    clock: Arc<dyn Clock>,
}

fn key(app_id: &str, message_id: &str) -> MessageKey {
    (canonical_id(app_id), canonical_id(message_id))
}

impl MemoryMessageRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            messages: DashMap::new(),
            clock,
        }
    }

    fn find(&self, app_id: &str, message_id: &str) -> Option<Message> {
        let now = self.clock.now_millis();
        self.messages
            .get(&key(app_id, message_id))
            .and_then(|entry| entry.live(now).cloned())
    }

    fn live<F>(&self, predicate: F) -> Vec<Message>
    where
        F: Fn(&Message) -> bool,
    {
        let now = self.clock.now_millis();
        let mut messages: Vec<Message> = self
            .messages
            .iter()
            .filter_map(|entry| entry.live(now).filter(|message| predicate(*message)).cloned())
            .collect();
        newest_first(&mut messages, |message| message.time_of_creation);
        messages
    }
}

impl MessageRepository for MemoryMessageRepository {
    fn save_message(&self, message: &Message, lifetime: Option<&LengthOfTime>) -> Result<()> {
        assertions::valid_message(message)?;
        let ttl = lifetime_or(lifetime, DEFAULT_MESSAGE_LIFETIME)?;

        let message = canonical_message(message);
        self.messages.insert(
            (message.application_id.clone(), message.message_id.clone()),
            Expiring::until(message, self.clock.now_millis(), ttl),
        );
        Ok(())
    }

    fn get_message(&self, app_id: &str, message_id: &str) -> Result<Message> {
        assertions::valid_app_id(app_id)?;
        assertions::valid_message_id(message_id)?;

        self.find(app_id, message_id)
            .ok_or_else(|| StoreError::MessageDoesNotExist(message_id.to_string()))
    }

    fn delete_message(&self, app_id: &str, message_id: &str) -> Result<()> {
        self.get_message(app_id, message_id)?;
        self.messages.remove(&key(app_id, message_id));
        Ok(())
    }

    fn contains_message(&self, app_id: &str, message_id: &str) -> Result<bool> {
        assertions::valid_app_id(app_id)?;
        assertions::valid_message_id(message_id)?;
        Ok(self.find(app_id, message_id).is_some())
    }

    fn get_by_hostname(&self, hostname: &str) -> Result<Vec<Message>> {
        required_lookup("hostname", hostname)?;
        Ok(self.live(|message| message.hostname.as_deref() == Some(hostname)))
    }

    fn get_by_application(&self, app_id: &str, limit: Option<usize>) -> Result<Vec<Message>> {
        assertions::valid_app_id(app_id)?;
        if limit == Some(0) {
            return Err(StoreError::InvalidArgument("limit must be positive".into()));
        }

        let app_id = canonical_id(app_id);
        let mut messages = self.live(|message| message.application_id == app_id);
        if let Some(limit) = limit {
            messages.truncate(limit);
        }
        Ok(messages)
    }

    fn get_by_title(&self, app_id: &str, title: &str) -> Result<Vec<Message>> {
        assertions::valid_app_id(app_id)?;
        required_lookup("title", title)?;

        let app_id = canonical_id(app_id);
        Ok(self.live(|message| message.application_id == app_id && message.title == title))
    }

    fn get_count_by_application(&self, app_id: &str) -> Result<i64> {
        Ok(self.get_by_application(app_id, None)?.len() as i64)
    }

    fn delete_all_messages(&self, app_id: &str) -> Result<()> {
        assertions::valid_app_id(app_id)?;

        let app_id = canonical_id(app_id);
        self.messages.retain(|(app, _), _| *app != app_id);
        Ok(())
    }
}
