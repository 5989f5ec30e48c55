use std::collections::BTreeMap;
use std::sync::Arc;

use aroma_shared::constants::DEFAULT_ACTIVITY_LIFETIME;
use aroma_shared::{Event, LengthOfTime};
use dashmap::DashMap;

use super::{canonical_event, newest_first, Expiring};
use crate::activity::ActivityRepository;
use crate::assertions;
use crate::clock::Clock;
use crate::codec::canonical_id;
use crate::error::{Result, StoreError};
use crate::messages::lifetime_or;

pub struct MemoryActivityRepository {
    feeds: DashMap<String, BTreeMap<String, Expiring<Event>>>,
    clock: Arc<dyn Clock>,
}

impl MemoryActivityRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            feeds: DashMap::new(),
            clock,
        }
    }

    fn find(&self, user_id: &str, event_id: &str) -> Option<Event> {
        let now = self.clock.now_millis();
        self.feeds.get(&canonical_id(user_id)).and_then(|feed| {
            feed.get(&canonical_id(event_id))
                .and_then(|entry| entry.live(now).cloned())
        })
    }
}

impl ActivityRepository for MemoryActivityRepository {
    fn save_event(&self, event: &Event, lifetime: Option<&LengthOfTime>) -> Result<()> {
        assertions::valid_event(event)?;
        let ttl = lifetime_or(lifetime, DEFAULT_ACTIVITY_LIFETIME)?;

        let event = canonical_event(event);
        let entry = Expiring::until(event, self.clock.now_millis(), ttl);
        self.feeds
            .entry(entry.value.user_id.clone())
            .or_default()
            .insert(entry.value.event_id.clone(), entry);
        Ok(())
    }

    fn contains_event(&self, user_id: &str, event_id: &str) -> Result<bool> {
        assertions::valid_user_id(user_id)?;
        assertions::valid_event_id(event_id)?;
        Ok(self.find(user_id, event_id).is_some())
    }

    fn get_event(&self, user_id: &str, event_id: &str) -> Result<Event> {
        assertions::valid_user_id(user_id)?;
        assertions::valid_event_id(event_id)?;

        self.find(user_id, event_id)
            .ok_or_else(|| StoreError::DoesNotExist(format!("event {event_id}")))
    }

    fn get_all_events_for(&self, user_id: &str) -> Result<Vec<Event>> {
        assertions::valid_user_id(user_id)?;

        let now = self.clock.now_millis();
        let mut events: Vec<Event> = self
            .feeds
            .get(&canonical_id(user_id))
            .map(|feed| {
                feed.values()
                    .filter_map(|entry| entry.live(now).cloned())
                    .collect()
            })
            .unwrap_or_default();
        newest_first(&mut events, |event| event.timestamp);
        Ok(events)
    }

    fn delete_event(&self, user_id: &str, event_id: &str) -> Result<()> {
        assertions::valid_user_id(user_id)?;
        assertions::valid_event_id(event_id)?;

        if let Some(mut feed) = self.feeds.get_mut(&canonical_id(user_id)) {
            feed.remove(&canonical_id(event_id));
        }
        Ok(())
    }

    fn delete_all_events_for(&self, user_id: &str) -> Result<()> {
        assertions::valid_user_id(user_id)?;

        self.feeds.remove(&canonical_id(user_id));
        Ok(())
    }
}
