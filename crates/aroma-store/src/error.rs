use thiserror::Error;

/// Failures surfaced by every repository operation.
///
/// `InvalidArgument` is raised before any store interaction.  The
/// `*DoesNotExist` family (and `InvalidCredentials` for tokens) is raised only
/// by `get`/`delete` style operations; `contains` style operations answer
/// `false` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The caller supplied a missing, empty or malformed argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("User does not exist: {0}")]
    UserDoesNotExist(String),

    #[error("Application does not exist: {0}")]
    ApplicationDoesNotExist(String),

    #[error("Organization does not exist: {0}")]
    OrganizationDoesNotExist(String),

    #[error("Message does not exist: {0}")]
    MessageDoesNotExist(String),

    /// A token was looked up that is absent or has expired.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// A record without a dedicated error kind (media, events, passwords).
    #[error("Does not exist: {0}")]
    DoesNotExist(String),

    /// The backing store failed (timeout, unavailable, schema mismatch).
    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl StoreError {
    /// `true` for every "record is missing" variant.
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            StoreError::UserDoesNotExist(_)
                | StoreError::ApplicationDoesNotExist(_)
                | StoreError::OrganizationDoesNotExist(_)
                | StoreError::MessageDoesNotExist(_)
                | StoreError::InvalidCredentials(_)
                | StoreError::DoesNotExist(_)
        )
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::OperationFailed(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::OperationFailed(format!("serialization: {err}"))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
