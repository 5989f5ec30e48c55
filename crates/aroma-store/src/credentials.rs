//! Encrypted password storage.  Hashing happens before the password reaches
//! this layer; the value is stored as an opaque string.

use std::sync::Arc;

use crate::assertions;
use crate::clock::Clock;
use crate::error::{Result, StoreError};
use crate::session::{self, Session};
use crate::statements::credentials as statements;
use crate::tables::credentials::ENCRYPTED_PASSWORD;

pub trait CredentialRepository: Send + Sync {
    fn save_encrypted_password(&self, user_id: &str, encrypted_password: &str) -> Result<()>;

    fn contains_encrypted_password(&self, user_id: &str) -> Result<bool>;

    fn get_encrypted_password(&self, user_id: &str) -> Result<String>;

    fn delete_encrypted_password(&self, user_id: &str) -> Result<()>;
}

pub(crate) fn valid_password(encrypted_password: &str) -> Result<()> {
    if assertions::is_null_or_empty(Some(encrypted_password)) {
        return Err(StoreError::InvalidArgument("missing encrypted password".into()));
    }
    Ok(())
}

pub struct StoreCredentialRepository {
    session: Arc<dyn Session>,
    clock: Arc<dyn Clock>,
}

impl StoreCredentialRepository {
    pub fn new(session: Arc<dyn Session>, clock: Arc<dyn Clock>) -> Self {
        Self { session, clock }
    }
}

impl CredentialRepository for StoreCredentialRepository {
    fn save_encrypted_password(&self, user_id: &str, encrypted_password: &str) -> Result<()> {
        assertions::valid_user_id(user_id)?;
        valid_password(encrypted_password)?;

        let statement = statements::save(user_id, encrypted_password, self.clock.now_millis());
        session::execute(self.session.as_ref(), &statement, || {
            format!("save credentials of {user_id}")
        })?;
        Ok(())
    }

    fn contains_encrypted_password(&self, user_id: &str) -> Result<bool> {
        assertions::valid_user_id(user_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::count(user_id),
            || format!("check credentials of {user_id}"),
        )?;
        Ok(rows.count() > 0)
    }

    fn get_encrypted_password(&self, user_id: &str) -> Result<String> {
        assertions::valid_user_id(user_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::select(user_id),
            || format!("load credentials of {user_id}"),
        )?;
        rows.one()
            .and_then(|row| row.text(ENCRYPTED_PASSWORD))
            .ok_or_else(|| StoreError::DoesNotExist(format!("credentials of {user_id}")))
    }

    fn delete_encrypted_password(&self, user_id: &str) -> Result<()> {
        assertions::valid_user_id(user_id)?;

        session::execute(
            self.session.as_ref(),
            &statements::delete(user_id),
            || format!("delete credentials of {user_id}"),
        )?;
        Ok(())
    }
}
