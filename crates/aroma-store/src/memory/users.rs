use aroma_shared::User;
use dashmap::DashMap;

use super::{canonical_user, newest_first};
use crate::assertions;
use crate::codec::canonical_id;
use crate::error::{Result, StoreError};
use crate::statements::users::present;
use crate::users::{required_lookup, UserRepository};

/// Users plus email and GitHub lookup indexes.  An index entry belongs to
/// whichever user last saved that key.
pub struct MemoryUserRepository {
    users: DashMap<String, User>,
    emails: DashMap<String, String>,
    github_profiles: DashMap<String, String>,
    recent_limit: usize,
}

/// Drop `key` from `index` only while it still points at `user_id`.
fn release(index: &DashMap<String, String>, key: Option<&str>, user_id: &str) {
    if let Some(key) = key {
        index.remove_if(key, |_, owner| owner == user_id);
    }
}

impl MemoryUserRepository {
    pub fn new(recent_limit: usize) -> Self {
        Self {
            users: DashMap::new(),
            emails: DashMap::new(),
            github_profiles: DashMap::new(),
            recent_limit,
        }
    }

    fn find_by(&self, index: &DashMap<String, String>, key: &str) -> Result<User> {
        let user_id = index.get(key).map(|entry| entry.value().clone());

        user_id
            .and_then(|user_id| self.users.get(&user_id).map(|entry| entry.value().clone()))
            .ok_or_else(|| StoreError::UserDoesNotExist(key.to_string()))
    }
}

impl UserRepository for MemoryUserRepository {
    fn save_user(&self, user: &User) -> Result<()> {
        assertions::valid_user(user)?;

        let user = canonical_user(user);
        let user_id = user.user_id.clone();

        if let Some(previous) = self.users.insert(user_id.clone(), user.clone()) {
            if present(&previous.email) != present(&user.email) {
                release(&self.emails, present(&previous.email), &user_id);
            }
            if present(&previous.github_profile) != present(&user.github_profile) {
                release(&self.github_profiles, present(&previous.github_profile), &user_id);
            }
        }

        if let Some(email) = present(&user.email) {
            self.emails.insert(email.to_string(), user_id.clone());
        }
        if let Some(profile) = present(&user.github_profile) {
            self.github_profiles.insert(profile.to_string(), user_id);
        }
        Ok(())
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        assertions::valid_user_id(user_id)?;

        self.users
            .get(&canonical_id(user_id))
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::UserDoesNotExist(user_id.to_string()))
    }

    fn get_user_by_email(&self, email: &str) -> Result<User> {
        required_lookup("email", email)?;
        self.find_by(&self.emails, email)
    }

    fn find_by_github_profile(&self, github_profile: &str) -> Result<User> {
        required_lookup("github profile", github_profile)?;
        self.find_by(&self.github_profiles, github_profile)
    }

    fn contains_user(&self, user_id: &str) -> Result<bool> {
        assertions::valid_user_id(user_id)?;
        Ok(self.users.contains_key(&canonical_id(user_id)))
    }

    fn delete_user(&self, user_id: &str) -> Result<()> {
        assertions::valid_user_id(user_id)?;

        let (user_id, user) = self
            .users
            .remove(&canonical_id(user_id))
            .ok_or_else(|| StoreError::UserDoesNotExist(user_id.to_string()))?;

        release(&self.emails, present(&user.email), &user_id);
        release(&self.github_profiles, present(&user.github_profile), &user_id);
        Ok(())
    }

    fn get_recently_created_users(&self) -> Result<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|entry| entry.value().clone()).collect();
        newest_first(&mut users, |user| user.time_user_joined);
        users.truncate(self.recent_limit);
        Ok(users)
    }
}
