use crate::time::LengthOfTime;

/// Lifetime of a stored message when the caller does not supply one.
pub const DEFAULT_MESSAGE_LIFETIME: LengthOfTime = LengthOfTime::days(3);

/// Lifetime of an inbox entry when the caller does not supply one.
pub const DEFAULT_INBOX_LIFETIME: LengthOfTime = LengthOfTime::days(3);

/// Lifetime of a token that carries no expiration time.
pub const DEFAULT_TOKEN_LIFETIME: LengthOfTime = LengthOfTime::days(60);

/// Lifetime of an activity event when the caller does not supply one.
pub const DEFAULT_ACTIVITY_LIFETIME: LengthOfTime = LengthOfTime::days(5);

/// Largest media blob accepted by default (5 MiB).
pub const DEFAULT_MAX_MEDIA_BYTES: usize = 5 * 1024 * 1024;

/// Number of entries returned by "recently created" listings by default.
pub const DEFAULT_RECENT_LIMIT: usize = 200;
