use std::collections::BTreeMap;

use aroma_shared::{Application, User};
use dashmap::DashMap;

use super::{canonical_application, canonical_user};
use crate::assertions;
use crate::codec::canonical_id;
use crate::error::Result;
use crate::followers::FollowerRepository;

/// Both sides of the relation, each a map of partition to followed entity.
pub struct MemoryFollowerRepository {
    apps_followed_by_user: DashMap<String, BTreeMap<String, Application>>,
    followers_of_app: DashMap<String, BTreeMap<String, User>>,
}

impl MemoryFollowerRepository {
    pub fn new() -> Self {
        Self {
            apps_followed_by_user: DashMap::new(),
            followers_of_app: DashMap::new(),
        }
    }
}

impl Default for MemoryFollowerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl FollowerRepository for MemoryFollowerRepository {
    fn save_following(&self, user: &User, app: &Application) -> Result<()> {
        assertions::valid_user(user)?;
        assertions::valid_application(app)?;

        let user = canonical_user(user);
        let app = canonical_application(app);

        self.followers_of_app
            .entry(app.application_id.clone())
            .or_default()
            .insert(user.user_id.clone(), user.clone());
        self.apps_followed_by_user
            .entry(user.user_id)
            .or_default()
            .insert(app.application_id.clone(), app);
        Ok(())
    }

    fn delete_following(&self, user_id: &str, app_id: &str) -> Result<()> {
        assertions::valid_user_id(user_id)?;
        assertions::valid_app_id(app_id)?;

        let (user_id, app_id) = (canonical_id(user_id), canonical_id(app_id));
        if let Some(mut apps) = self.apps_followed_by_user.get_mut(&user_id) {
            apps.remove(&app_id);
        }
        if let Some(mut followers) = self.followers_of_app.get_mut(&app_id) {
            followers.remove(&user_id);
        }
        Ok(())
    }

    fn following_exists(&self, user_id: &str, app_id: &str) -> Result<bool> {
        assertions::valid_user_id(user_id)?;
        assertions::valid_app_id(app_id)?;

        Ok(self
            .apps_followed_by_user
            .get(&canonical_id(user_id))
            .is_some_and(|apps| apps.contains_key(&canonical_id(app_id))))
    }

    fn get_applications_followed_by(&self, user_id: &str) -> Result<Vec<Application>> {
        assertions::valid_user_id(user_id)?;

        Ok(self
            .apps_followed_by_user
            .get(&canonical_id(user_id))
            .map(|apps| apps.values().cloned().collect())
            .unwrap_or_default())
    }

    fn get_application_followers(&self, app_id: &str) -> Result<Vec<User>> {
        assertions::valid_app_id(app_id)?;

        Ok(self
            .followers_of_app
            .get(&canonical_id(app_id))
            .map(|followers| followers.values().cloned().collect())
            .unwrap_or_default())
    }
}
