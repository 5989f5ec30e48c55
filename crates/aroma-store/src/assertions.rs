//! Request assertions.
//!
//! Flat predicate checks run before any statement is built.  Each returns
//! `InvalidArgument` naming the offending field.

use aroma_shared::{
    Application, AuthenticationToken, Event, Image, LengthOfTime, Message, MobileDevice,
    Organization, User,
};
use uuid::Uuid;

use crate::error::{Result, StoreError};

/// `true` when the string is absent or contains only whitespace.
pub fn is_null_or_empty(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}

fn invalid(message: impl Into<String>) -> StoreError {
    StoreError::InvalidArgument(message.into())
}

fn valid_uuid(field: &str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(invalid(format!("missing {field}")));
    }
    Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| invalid(format!("invalid {field}: {id}")))
}

fn non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(format!("missing {field}")));
    }
    Ok(())
}

pub fn valid_user_id(user_id: &str) -> Result<()> {
    valid_uuid("userId", user_id)
}

pub fn valid_app_id(app_id: &str) -> Result<()> {
    valid_uuid("applicationId", app_id)
}

pub fn valid_org_id(org_id: &str) -> Result<()> {
    valid_uuid("organizationId", org_id)
}

pub fn valid_message_id(message_id: &str) -> Result<()> {
    valid_uuid("messageId", message_id)
}

pub fn valid_token_id(token_id: &str) -> Result<()> {
    valid_uuid("tokenId", token_id)
}

/// Ids of media blobs and activity events share the UUID rule.
pub fn valid_media_id(media_id: &str) -> Result<()> {
    valid_uuid("mediaId", media_id)
}

pub fn valid_event_id(event_id: &str) -> Result<()> {
    valid_uuid("eventId", event_id)
}

pub fn valid_user(user: &User) -> Result<()> {
    valid_user_id(&user.user_id)
}

pub fn valid_application(app: &Application) -> Result<()> {
    valid_app_id(&app.application_id)?;
    non_empty("application name", &app.name)?;

    if app.owners.is_empty() {
        return Err(invalid("application must have at least one owner"));
    }
    for owner in &app.owners {
        valid_uuid("owner id", owner)?;
    }

    if let Some(org_id) = app.organization_id.as_deref() {
        valid_org_id(org_id)?;
    }
    if let Some(icon) = app.application_icon_media_id.as_deref() {
        valid_uuid("applicationIconMediaId", icon)?;
    }
    Ok(())
}

pub fn valid_message(message: &Message) -> Result<()> {
    valid_message_id(&message.message_id)?;
    valid_app_id(&message.application_id)?;
    non_empty("message title", &message.title)
}

pub fn valid_organization(org: &Organization) -> Result<()> {
    valid_org_id(&org.organization_id)?;
    non_empty("organization name", &org.organization_name)?;

    for owner in &org.owners {
        valid_uuid("owner id", owner)?;
    }
    Ok(())
}

/// Token owners are either users or applications.
pub fn valid_owner_id(owner_id: &str) -> Result<()> {
    valid_uuid("ownerId", owner_id)
}

pub fn token_containing_owner_id(token: &AuthenticationToken) -> Result<()> {
    valid_owner_id(&token.owner_id)
}

/// A lifetime must convert to a positive number of seconds without overflow.
pub fn valid_lifetime(lifetime: &LengthOfTime) -> Result<i64> {
    let seconds = lifetime
        .to_seconds()
        .map_err(|e| invalid(format!("lifetime: {e}")))?;

    if seconds <= 0 {
        return Err(invalid(format!("lifetime must be positive: {lifetime}")));
    }
    Ok(seconds)
}

pub fn valid_mobile_device(device: &MobileDevice) -> Result<()> {
    non_empty("mobile device address", device.address())
}

pub fn valid_event(event: &Event) -> Result<()> {
    valid_event_id(&event.event_id)?;
    valid_user_id(&event.user_id)?;
    if let Some(app_id) = event.application_id.as_deref() {
        valid_app_id(app_id)?;
    }
    Ok(())
}

/// Media must be non-empty and no larger than `max_bytes`.
pub fn valid_image(image: &Image, max_bytes: usize) -> Result<()> {
    if image.data.is_empty() {
        return Err(invalid("media data is empty"));
    }
    if image.data.len() > max_bytes {
        return Err(invalid(format!(
            "media is {} bytes, limit is {max_bytes}",
            image.data.len()
        )));
    }
    Ok(())
}
