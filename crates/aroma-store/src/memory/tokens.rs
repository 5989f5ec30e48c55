use std::sync::Arc;

use aroma_shared::AuthenticationToken;
use dashmap::DashMap;

use super::{canonical_token, Expiring};
use crate::assertions;
use crate::clock::Clock;
use crate::codec::canonical_id;
use crate::error::{Result, StoreError};
use crate::tokens::{token_ttl, valid_token, TokenRepository};

pub struct MemoryTokenRepository {
    tokens: DashMap<String, Expiring<AuthenticationToken>>,
    clock: Arc<dyn Clock>,
}

impl MemoryTokenRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tokens: DashMap::new(),
            clock,
        }
    }

    fn find(&self, token_id: &str) -> Option<AuthenticationToken> {
        let now = self.clock.now_millis();
        self.tokens
            .get(&canonical_id(token_id))
            .and_then(|entry| entry.live(now).cloned())
    }
}

impl TokenRepository for MemoryTokenRepository {
    fn save_token(&self, token: &AuthenticationToken) -> Result<()> {
        valid_token(token)?;
        let now = self.clock.now_millis();
        let ttl = token_ttl(token, now)?;

        let token = canonical_token(token);
        self.tokens
            .insert(token.token_id.clone(), Expiring::until(token, now, ttl));
        Ok(())
    }

    fn get_token(&self, token_id: &str) -> Result<AuthenticationToken> {
        assertions::valid_token_id(token_id)?;

        self.find(token_id)
            .ok_or_else(|| StoreError::InvalidCredentials(format!("no such token {token_id}")))
    }

    fn contains_token(&self, token_id: &str) -> Result<bool> {
        assertions::valid_token_id(token_id)?;
        Ok(self.find(token_id).is_some())
    }

    fn delete_token(&self, token_id: &str) -> Result<()> {
        self.get_token(token_id)?;
        self.tokens.remove(&canonical_id(token_id));
        Ok(())
    }

    fn get_tokens_belonging_to(&self, owner_id: &str) -> Result<Vec<AuthenticationToken>> {
        assertions::valid_owner_id(owner_id)?;

        let owner_id = canonical_id(owner_id);
        let now = self.clock.now_millis();
        let mut tokens: Vec<AuthenticationToken> = self
            .tokens
            .iter()
            .filter_map(|entry| entry.live(now).filter(|t| t.owner_id == owner_id).cloned())
            .collect();
        tokens.sort_by(|a, b| a.token_id.cmp(&b.token_id));
        Ok(tokens)
    }

    fn delete_tokens(&self, owner_id: &str) -> Result<()> {
        assertions::valid_owner_id(owner_id)?;

        let owner_id = canonical_id(owner_id);
        self.tokens.retain(|_, entry| entry.value.owner_id != owner_id);
        Ok(())
    }
}
