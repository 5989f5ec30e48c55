//! User repository.

use std::sync::Arc;

use aroma_shared::User;

use crate::assertions;
use crate::error::{Result, StoreError};
use crate::mappers::user_from_row;
use crate::session::{self, Session};
use crate::statements::users as statements;

pub trait UserRepository: Send + Sync {
    /// Upsert; last writer wins on every column.
    fn save_user(&self, user: &User) -> Result<()>;

    fn get_user(&self, user_id: &str) -> Result<User>;

    fn get_user_by_email(&self, email: &str) -> Result<User>;

    fn find_by_github_profile(&self, github_profile: &str) -> Result<User>;

    fn contains_user(&self, user_id: &str) -> Result<bool>;

    fn delete_user(&self, user_id: &str) -> Result<()>;

    /// Newest first, bounded.
    fn get_recently_created_users(&self) -> Result<Vec<User>>;
}

pub(crate) fn required_lookup(field: &str, value: &str) -> Result<()> {
    if assertions::is_null_or_empty(Some(value)) {
        return Err(StoreError::InvalidArgument(format!("missing {field}")));
    }
    Ok(())
}

pub struct StoreUserRepository {
    session: Arc<dyn Session>,
    recent_limit: usize,
}

impl StoreUserRepository {
    pub fn new(session: Arc<dyn Session>, recent_limit: usize) -> Self {
        Self {
            session,
            recent_limit,
        }
    }

    fn find(&self, user_id: &str) -> Result<Option<User>> {
        let rows = session::execute(
            self.session.as_ref(),
            &statements::select_by_id(user_id),
            || format!("load user {user_id}"),
        )?;
        Ok(rows.one().map(user_from_row))
    }

    fn find_one(&self, statement: crate::statements::Statement, key: &str) -> Result<User> {
        let rows = session::execute(self.session.as_ref(), &statement, || {
            format!("look up user by {key}")
        })?;
        rows.one()
            .map(user_from_row)
            .ok_or_else(|| StoreError::UserDoesNotExist(key.to_string()))
    }
}

impl UserRepository for StoreUserRepository {
    fn save_user(&self, user: &User) -> Result<()> {
        assertions::valid_user(user)?;

        let previous = self.find(&user.user_id)?;
        session::execute(
            self.session.as_ref(),
            &statements::save(user, previous.as_ref()),
            || format!("save user {}", user.user_id),
        )?;
        Ok(())
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        assertions::valid_user_id(user_id)?;

        self.find(user_id)?
            .ok_or_else(|| StoreError::UserDoesNotExist(user_id.to_string()))
    }

    fn get_user_by_email(&self, email: &str) -> Result<User> {
        required_lookup("email", email)?;
        self.find_one(statements::select_by_email(email), email)
    }

    fn find_by_github_profile(&self, github_profile: &str) -> Result<User> {
        required_lookup("github profile", github_profile)?;
        self.find_one(
            statements::select_by_github_profile(github_profile),
            github_profile,
        )
    }

    fn contains_user(&self, user_id: &str) -> Result<bool> {
        assertions::valid_user_id(user_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::count_by_id(user_id),
            || format!("check user {user_id}"),
        )?;
        Ok(rows.count() > 0)
    }

    fn delete_user(&self, user_id: &str) -> Result<()> {
        assertions::valid_user_id(user_id)?;

        let user = self
            .find(user_id)?
            .ok_or_else(|| StoreError::UserDoesNotExist(user_id.to_string()))?;

        session::execute(self.session.as_ref(), &statements::delete(&user), || {
            format!("delete user {user_id}")
        })?;
        Ok(())
    }

    fn get_recently_created_users(&self) -> Result<Vec<User>> {
        let rows = session::execute(
            self.session.as_ref(),
            &statements::select_recent(self.recent_limit),
            || "list recently created users".to_string(),
        )?;
        let users: Vec<User> = rows.rows().iter().map(user_from_row).collect();
        tracing::debug!(count = users.len(), "listed recent users");
        Ok(users)
    }
}
