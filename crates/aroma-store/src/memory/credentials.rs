use dashmap::DashMap;

use crate::assertions;
use crate::codec::canonical_id;
use crate::credentials::{valid_password, CredentialRepository};
use crate::error::{Result, StoreError};

#[derive(Default)]
pub struct MemoryCredentialRepository {
    passwords: DashMap<String, String>,
}

impl MemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialRepository for MemoryCredentialRepository {
    fn save_encrypted_password(&self, user_id: &str, encrypted_password: &str) -> Result<()> {
        assertions::valid_user_id(user_id)?;
        valid_password(encrypted_password)?;

        self.passwords
            .insert(canonical_id(user_id), encrypted_password.to_string());
        Ok(())
    }

    fn contains_encrypted_password(&self, user_id: &str) -> Result<bool> {
        assertions::valid_user_id(user_id)?;
        Ok(self.passwords.contains_key(&canonical_id(user_id)))
    }

    fn get_encrypted_password(&self, user_id: &str) -> Result<String> {
        assertions::valid_user_id(user_id)?;

        self.passwords
            .get(&canonical_id(user_id))
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::DoesNotExist(format!("credentials of {user_id}")))
    }

    fn delete_encrypted_password(&self, user_id: &str) -> Result<()> {
        assertions::valid_user_id(user_id)?;

        self.passwords.remove(&canonical_id(user_id));
        Ok(())
    }
}
