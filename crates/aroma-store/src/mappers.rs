//! Row mappers: one function per entity from a store row to a populated
//! struct.  A missing column leaves the field unset; nothing here fails.

use std::collections::BTreeSet;

use aroma_shared::{
    Application, AuthenticationToken, Dimension, Event, EventType, Image, Message, MobileDevice,
    Organization, Reaction, User,
};
use serde::de::DeserializeOwned;

use crate::session::Row;
use crate::tables::{activity, applications, media, messages, organizations, tokens, users};

pub fn application_from_row(row: &Row) -> Application {
    Application {
        application_id: row.text(applications::APP_ID).unwrap_or_default(),
        name: row.text(applications::NAME).unwrap_or_default(),
        application_description: row.text(applications::DESCRIPTION),
        organization_id: row.text(applications::ORG_ID),
        application_icon_media_id: row.text(applications::ICON_MEDIA_ID),
        owners: row.text_set(applications::OWNERS),
        followers: row.text_set(applications::FOLLOWERS),
        time_of_provisioning: row.timestamp(applications::TIME_PROVISIONED),
        time_of_token_expiration: row.timestamp(applications::TIME_OF_TOKEN_EXPIRATION),
        tier: row.enum_value(applications::TIER),
        programming_language: row.enum_value(applications::PROGRAMMING_LANGUAGE),
    }
}

pub fn user_from_row(row: &Row) -> User {
    User {
        user_id: row.text(users::USER_ID).unwrap_or_default(),
        email: row.text(users::EMAIL),
        first_name: row.text(users::FIRST_NAME),
        middle_name: row.text(users::MIDDLE_NAME),
        last_name: row.text(users::LAST_NAME),
        roles: row.enum_set(users::ROLES),
        profile_image_link: row.text(users::PROFILE_IMAGE_LINK),
        github_profile: row.text(users::GITHUB_PROFILE),
        birthday: row.timestamp(users::BIRTHDAY),
        time_user_joined: row.timestamp(users::TIME_JOINED),
    }
}

pub fn organization_from_row(row: &Row) -> Organization {
    Organization {
        organization_id: row.text(organizations::ORG_ID).unwrap_or_default(),
        organization_name: row.text(organizations::ORG_NAME).unwrap_or_default(),
        owners: row.text_set(organizations::OWNERS),
        logo_link: row.text(organizations::LOGO_LINK),
        industry: row.enum_value(organizations::INDUSTRY),
        organization_email: row.text(organizations::EMAIL),
        github_profile: row.text(organizations::GITHUB_PROFILE),
        stock_market_symbol: row.text(organizations::STOCK_SYMBOL),
        tier: row.enum_value(organizations::TIER),
        organization_description: row.text(organizations::DESCRIPTION),
        website: row.text(organizations::WEBSITE),
    }
}

pub fn message_from_row(row: &Row) -> Message {
    Message {
        message_id: row.text(messages::MESSAGE_ID).unwrap_or_default(),
        application_id: row.text(messages::APP_ID).unwrap_or_default(),
        application_name: row.text(messages::APP_NAME),
        title: row.text(messages::TITLE).unwrap_or_default(),
        body: row.text(messages::BODY),
        urgency: row.enum_value(messages::URGENCY),
        hostname: row.text(messages::HOSTNAME),
        mac_address: row.text(messages::MAC_ADDRESS),
        device_name: row.text(messages::DEVICE_NAME),
        time_of_creation: row.timestamp(messages::TIME_CREATED),
        time_message_received: row.timestamp(messages::TIME_RECEIVED),
    }
}

pub fn token_from_row(row: &Row) -> AuthenticationToken {
    AuthenticationToken {
        token_id: row.text(tokens::TOKEN_ID).unwrap_or_default(),
        owner_id: row.text(tokens::OWNER_ID).unwrap_or_default(),
        organization_id: row.text(tokens::ORG_ID),
        owner_name: row.text(tokens::OWNER_NAME),
        token_type: row.enum_value(tokens::TOKEN_TYPE),
        status: row.enum_value(tokens::STATUS),
        time_of_creation: row.timestamp(tokens::TIME_CREATED),
        time_of_expiration: row.timestamp(tokens::TIME_EXPIRES),
    }
}

/// An undecodable payload leaves `event_type` unset.
pub fn event_from_row(row: &Row) -> Event {
    let event_id = row.text(activity::EVENT_ID).unwrap_or_default();

    let event_type = match row.json::<EventType>(activity::SERIALIZED_EVENT) {
        Some(Ok(event_type)) => Some(event_type),
        Some(Err(e)) => {
            tracing::warn!(event_id = %event_id, error = %e, "Undecodable event payload");
            None
        }
        None => None,
    };

    Event {
        event_id,
        user_id: row.text(activity::USER_ID).unwrap_or_default(),
        application_id: row.text(activity::APP_ID),
        actor_id: row.text(activity::ACTOR_ID),
        timestamp: row.timestamp(activity::TIME_CREATED),
        event_type,
    }
}

/// Serves both the media table and the thumbnail table.
pub fn image_from_row(row: &Row) -> Image {
    let dimension = match (row.integer(media::WIDTH), row.integer(media::HEIGHT)) {
        (Some(width), Some(height)) => u32::try_from(width)
            .ok()
            .zip(u32::try_from(height).ok())
            .map(|(w, h)| Dimension::new(w, h)),
        _ => None,
    };

    Image {
        image_type: row.enum_value(media::MEDIA_TYPE),
        data: row.blob(media::DATA).unwrap_or_default(),
        dimension,
    }
}

/// Decode a JSON array element by element, skipping elements that do not
/// decode.
pub fn json_list<T: DeserializeOwned>(row: &Row, column: &str) -> Vec<T> {
    let elements = match row.json::<Vec<serde_json::Value>>(column) {
        Some(Ok(elements)) => elements,
        Some(Err(e)) => {
            tracing::warn!(column, error = %e, "Undecodable JSON list");
            return Vec::new();
        }
        None => return Vec::new(),
    };

    elements
        .into_iter()
        .filter_map(|element| match serde_json::from_value(element) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(column, error = %e, "Skipping undecodable element");
                None
            }
        })
        .collect()
}

pub fn reactions_from_row(row: &Row) -> Vec<Reaction> {
    json_list(row, crate::tables::reactions::SERIALIZED_REACTIONS)
}

pub fn devices_from_row(row: &Row) -> BTreeSet<MobileDevice> {
    json_list(row, crate::tables::preferences::DEVICES)
        .into_iter()
        .collect()
}
