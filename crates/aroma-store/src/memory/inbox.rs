use std::collections::BTreeMap;
use std::sync::Arc;

use aroma_shared::{LengthOfTime, Message, User};
use dashmap::DashMap;

use super::{canonical_message, newest_first, Expiring};
use crate::assertions;
use crate::clock::Clock;
use crate::codec::canonical_id;
use crate::error::Result;
use crate::inbox::InboxRepository;
use crate::statements::Ttl;

pub struct MemoryInboxRepository {
    inboxes: DashMap<String, BTreeMap<String, Expiring<Message>>>,
    clock: Arc<dyn Clock>,
}

impl MemoryInboxRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            inboxes: DashMap::new(),
            clock,
        }
    }
}

impl InboxRepository for MemoryInboxRepository {
    fn save_message_for_user(
        &self,
        user: &User,
        message: &Message,
        lifetime: &LengthOfTime,
    ) -> Result<()> {
        assertions::valid_user(user)?;
        assertions::valid_message(message)?;
        let ttl = Ttl::from_lifetime(lifetime)?;

        let message = canonical_message(message);
        let entry = Expiring::until(message, self.clock.now_millis(), ttl);
        self.inboxes
            .entry(canonical_id(&user.user_id))
            .or_default()
            .insert(entry.value.message_id.clone(), entry);
        Ok(())
    }

    fn get_messages_for_user(&self, user_id: &str) -> Result<Vec<Message>> {
        assertions::valid_user_id(user_id)?;

        let now = self.clock.now_millis();
        let mut messages: Vec<Message> = self
            .inboxes
            .get(&canonical_id(user_id))
            .map(|inbox| {
                inbox
                    .values()
                    .filter_map(|entry| entry.live(now).cloned())
                    .collect()
            })
            .unwrap_or_default();
        newest_first(&mut messages, |message| message.time_of_creation);
        Ok(messages)
    }

    fn contains_message_in_inbox(&self, user_id: &str, message: &Message) -> Result<bool> {
        assertions::valid_user_id(user_id)?;
        assertions::valid_message_id(&message.message_id)?;

        let now = self.clock.now_millis();
        Ok(self.inboxes.get(&canonical_id(user_id)).is_some_and(|inbox| {
            inbox
                .get(&canonical_id(&message.message_id))
                .is_some_and(|entry| entry.is_live(now))
        }))
    }

    fn delete_message_for_user(&self, user_id: &str, message_id: &str) -> Result<()> {
        assertions::valid_user_id(user_id)?;
        assertions::valid_message_id(message_id)?;

        if let Some(mut inbox) = self.inboxes.get_mut(&canonical_id(user_id)) {
            inbox.remove(&canonical_id(message_id));
        }
        Ok(())
    }

    fn delete_all_messages_for_user(&self, user_id: &str) -> Result<()> {
        assertions::valid_user_id(user_id)?;

        self.inboxes.remove(&canonical_id(user_id));
        Ok(())
    }

    fn count_inbox_for_user(&self, user_id: &str) -> Result<i64> {
        Ok(self.get_messages_for_user(user_id)?.len() as i64)
    }
}
