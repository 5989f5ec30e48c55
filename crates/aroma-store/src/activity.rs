//! Per-user activity feed.

use std::sync::Arc;

use aroma_shared::constants::DEFAULT_ACTIVITY_LIFETIME;
use aroma_shared::{Event, LengthOfTime};

use crate::assertions;
use crate::error::{Result, StoreError};
use crate::mappers::event_from_row;
use crate::messages::lifetime_or;
use crate::session::{self, Session};
use crate::statements::activity as statements;

pub trait ActivityRepository: Send + Sync {
    /// Append an event to its user's feed for `lifetime`, or the default
    /// activity lifetime.
    fn save_event(&self, event: &Event, lifetime: Option<&LengthOfTime>) -> Result<()>;

    fn contains_event(&self, user_id: &str, event_id: &str) -> Result<bool>;

    fn get_event(&self, user_id: &str, event_id: &str) -> Result<Event>;

    /// Newest first.
    fn get_all_events_for(&self, user_id: &str) -> Result<Vec<Event>>;

    fn delete_event(&self, user_id: &str, event_id: &str) -> Result<()>;

    fn delete_all_events_for(&self, user_id: &str) -> Result<()>;
}

pub struct StoreActivityRepository {
    session: Arc<dyn Session>,
}

impl StoreActivityRepository {
    pub fn new(session: Arc<dyn Session>) -> Self {
        Self { session }
    }
}

impl ActivityRepository for StoreActivityRepository {
    fn save_event(&self, event: &Event, lifetime: Option<&LengthOfTime>) -> Result<()> {
        assertions::valid_event(event)?;
        let ttl = lifetime_or(lifetime, DEFAULT_ACTIVITY_LIFETIME)?;
        let statement = statements::save(event, ttl)?;

        session::execute(self.session.as_ref(), &statement, || {
            format!("save event {} for {}", event.event_id, event.user_id)
        })?;
        Ok(())
    }

    fn contains_event(&self, user_id: &str, event_id: &str) -> Result<bool> {
        assertions::valid_user_id(user_id)?;
        assertions::valid_event_id(event_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::count_by_id(user_id, event_id),
            || format!("check event {event_id} of {user_id}"),
        )?;
        Ok(rows.count() > 0)
    }

    fn get_event(&self, user_id: &str, event_id: &str) -> Result<Event> {
        assertions::valid_user_id(user_id)?;
        assertions::valid_event_id(event_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::select_by_id(user_id, event_id),
            || format!("load event {event_id} of {user_id}"),
        )?;
        rows.one()
            .map(event_from_row)
            .ok_or_else(|| StoreError::DoesNotExist(format!("event {event_id}")))
    }

    fn get_all_events_for(&self, user_id: &str) -> Result<Vec<Event>> {
        assertions::valid_user_id(user_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::select_all_for(user_id),
            || format!("list events of {user_id}"),
        )?;
        let events: Vec<Event> = rows.rows().iter().map(event_from_row).collect();
        tracing::debug!(user_id, count = events.len(), "listed events");
        Ok(events)
    }

    fn delete_event(&self, user_id: &str, event_id: &str) -> Result<()> {
        assertions::valid_user_id(user_id)?;
        assertions::valid_event_id(event_id)?;

        session::execute(
            self.session.as_ref(),
            &statements::delete(user_id, event_id),
            || format!("delete event {event_id} of {user_id}"),
        )?;
        Ok(())
    }

    fn delete_all_events_for(&self, user_id: &str) -> Result<()> {
        assertions::valid_user_id(user_id)?;

        session::execute(
            self.session.as_ref(),
            &statements::delete_all_for(user_id),
            || format!("delete events of {user_id}"),
        )?;
        Ok(())
    }
}
