//! Follower relation between users and applications, stored from both sides.

use std::sync::Arc;

use aroma_shared::{Application, User};

use crate::assertions;
use crate::error::Result;
use crate::mappers::{application_from_row, user_from_row};
use crate::session::{self, Session};
use crate::statements::followers as statements;

pub trait FollowerRepository: Send + Sync {
    fn save_following(&self, user: &User, app: &Application) -> Result<()>;

    fn delete_following(&self, user_id: &str, app_id: &str) -> Result<()>;

    fn following_exists(&self, user_id: &str, app_id: &str) -> Result<bool>;

    fn get_applications_followed_by(&self, user_id: &str) -> Result<Vec<Application>>;

    fn get_application_followers(&self, app_id: &str) -> Result<Vec<User>>;
}

pub struct StoreFollowerRepository {
    session: Arc<dyn Session>,
}

impl StoreFollowerRepository {
    pub fn new(session: Arc<dyn Session>) -> Self {
        Self { session }
    }
}

impl FollowerRepository for StoreFollowerRepository {
    fn save_following(&self, user: &User, app: &Application) -> Result<()> {
        assertions::valid_user(user)?;
        assertions::valid_application(app)?;

        session::execute(self.session.as_ref(), &statements::save(user, app), || {
            format!("save {} following {}", user.user_id, app.application_id)
        })?;
        Ok(())
    }

    fn delete_following(&self, user_id: &str, app_id: &str) -> Result<()> {
        assertions::valid_user_id(user_id)?;
        assertions::valid_app_id(app_id)?;

        session::execute(
            self.session.as_ref(),
            &statements::delete(user_id, app_id),
            || format!("delete {user_id} following {app_id}"),
        )?;
        Ok(())
    }

    fn following_exists(&self, user_id: &str, app_id: &str) -> Result<bool> {
        assertions::valid_user_id(user_id)?;
        assertions::valid_app_id(app_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::count_following(user_id, app_id),
            || format!("check {user_id} following {app_id}"),
        )?;
        Ok(rows.count() > 0)
    }

    fn get_applications_followed_by(&self, user_id: &str) -> Result<Vec<Application>> {
        assertions::valid_user_id(user_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::select_apps_followed_by(user_id),
            || format!("list applications followed by {user_id}"),
        )?;
        let apps: Vec<Application> = rows.rows().iter().map(application_from_row).collect();
        tracing::debug!(user_id, count = apps.len(), "listed followed applications");
        Ok(apps)
    }

    fn get_application_followers(&self, app_id: &str) -> Result<Vec<User>> {
        assertions::valid_app_id(app_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::select_followers_of(app_id),
            || format!("list followers of {app_id}"),
        )?;
        let followers: Vec<User> = rows.rows().iter().map(user_from_row).collect();
        tracing::debug!(app_id, count = followers.len(), "listed application followers");
        Ok(followers)
    }
}
