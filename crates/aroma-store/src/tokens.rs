//! Authentication token repository.
//!
//! A token row lives until its expiration time.  Tokens never transition
//! back to active; once the store drops a token, reading it reports
//! `InvalidCredentials`.

use std::sync::Arc;

use aroma_shared::constants::DEFAULT_TOKEN_LIFETIME;
use aroma_shared::AuthenticationToken;

use crate::assertions;
use crate::clock::Clock;
use crate::codec;
use crate::error::{Result, StoreError};
use crate::mappers::token_from_row;
use crate::session::{self, Session};
use crate::statements::{tokens as statements, Ttl};

pub trait TokenRepository: Send + Sync {
    fn save_token(&self, token: &AuthenticationToken) -> Result<()>;

    fn get_token(&self, token_id: &str) -> Result<AuthenticationToken>;

    fn contains_token(&self, token_id: &str) -> Result<bool>;

    fn delete_token(&self, token_id: &str) -> Result<()>;

    fn get_tokens_belonging_to(&self, owner_id: &str) -> Result<Vec<AuthenticationToken>>;

    fn delete_tokens(&self, owner_id: &str) -> Result<()>;
}

/// TTL of a token: the time left until its expiration, rounded up to whole
/// seconds, or the default token lifetime when it has none.
pub(crate) fn token_ttl(token: &AuthenticationToken, now_millis: i64) -> Result<Ttl> {
    match token.time_of_expiration {
        Some(expiration) => {
            let seconds = codec::millis_to_seconds_ceil(expiration.saturating_sub(now_millis));
            Ttl::from_seconds(seconds).map_err(|_| {
                StoreError::InvalidArgument(format!(
                    "token {} expired at {expiration}",
                    token.token_id
                ))
            })
        }
        None => Ttl::from_lifetime(&DEFAULT_TOKEN_LIFETIME),
    }
}

pub(crate) fn valid_token(token: &AuthenticationToken) -> Result<()> {
    assertions::valid_token_id(&token.token_id)?;
    assertions::token_containing_owner_id(token)?;
    if let Some(org_id) = token.organization_id.as_deref() {
        assertions::valid_org_id(org_id)?;
    }
    Ok(())
}

pub struct StoreTokenRepository {
    session: Arc<dyn Session>,
    clock: Arc<dyn Clock>,
}

impl StoreTokenRepository {
    pub fn new(session: Arc<dyn Session>, clock: Arc<dyn Clock>) -> Self {
        Self { session, clock }
    }

    fn find(&self, token_id: &str) -> Result<Option<AuthenticationToken>> {
        let rows = session::execute(
            self.session.as_ref(),
            &statements::select_by_id(token_id),
            || format!("load token {token_id}"),
        )?;
        Ok(rows.one().map(token_from_row))
    }
}

impl TokenRepository for StoreTokenRepository {
    fn save_token(&self, token: &AuthenticationToken) -> Result<()> {
        valid_token(token)?;
        let ttl = token_ttl(token, self.clock.now_millis())?;

        let previous = self.find(&token.token_id)?;
        session::execute(
            self.session.as_ref(),
            &statements::save(token, previous.as_ref(), ttl),
            || format!("save token {}", token.token_id),
        )?;
        Ok(())
    }

    fn get_token(&self, token_id: &str) -> Result<AuthenticationToken> {
        assertions::valid_token_id(token_id)?;

        self.find(token_id)?
            .ok_or_else(|| StoreError::InvalidCredentials(format!("no such token {token_id}")))
    }

    fn contains_token(&self, token_id: &str) -> Result<bool> {
        assertions::valid_token_id(token_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::count_by_id(token_id),
            || format!("check token {token_id}"),
        )?;
        Ok(rows.count() > 0)
    }

    fn delete_token(&self, token_id: &str) -> Result<()> {
        let token = self.get_token(token_id)?;

        session::execute(self.session.as_ref(), &statements::delete(&token), || {
            format!("delete token {token_id}")
        })?;
        Ok(())
    }

    fn get_tokens_belonging_to(&self, owner_id: &str) -> Result<Vec<AuthenticationToken>> {
        assertions::valid_owner_id(owner_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::select_by_owner(owner_id),
            || format!("list tokens of {owner_id}"),
        )?;
        let tokens: Vec<AuthenticationToken> = rows.rows().iter().map(token_from_row).collect();
        tracing::debug!(owner_id, count = tokens.len(), "listed tokens");
        Ok(tokens)
    }

    fn delete_tokens(&self, owner_id: &str) -> Result<()> {
        let tokens = self.get_tokens_belonging_to(owner_id)?;
        let ids = tokens.iter().map(|token| token.token_id.as_str());

        session::execute(
            self.session.as_ref(),
            &statements::delete_all_for_owner(owner_id, ids),
            || format!("delete tokens of {owner_id}"),
        )?;
        tracing::info!(owner_id, deleted = tokens.len(), "deleted tokens");
        Ok(())
    }
}
