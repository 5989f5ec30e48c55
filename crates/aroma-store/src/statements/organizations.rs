use aroma_shared::{Organization, User};
use rusqlite::types::Value;

use super::{Delete, Insert, Select, Statement};
use crate::codec;
use crate::tables::organizations::*;
use crate::tables::users;

pub fn columns(org: &Organization) -> Vec<(&'static str, Value)> {
    vec![
        (ORG_ID, codec::uuid(&org.organization_id)),
        (ORG_NAME, codec::text(&org.organization_name)),
        (OWNERS, codec::uuid_set(&org.owners)),
        (LOGO_LINK, codec::optional_text(org.logo_link.as_deref())),
        (INDUSTRY, codec::enum_name(org.industry.as_ref())),
        (EMAIL, codec::optional_text(org.organization_email.as_deref())),
        (GITHUB_PROFILE, codec::optional_text(org.github_profile.as_deref())),
        (STOCK_SYMBOL, codec::optional_text(org.stock_market_symbol.as_deref())),
        (TIER, codec::enum_name(org.tier.as_ref())),
        (DESCRIPTION, codec::optional_text(org.organization_description.as_deref())),
        (WEBSITE, codec::optional_text(org.website.as_deref())),
    ]
}

pub fn save(org: &Organization) -> Statement {
    Insert::into_table(TABLE).values(columns(org)).into()
}

pub fn delete(org_id: &str) -> Statement {
    Delete::from_table(TABLE)
        .where_eq(ORG_ID, codec::uuid(org_id))
        .into()
}

pub fn select_by_id(org_id: &str) -> Statement {
    Select::all(TABLE)
        .where_eq(ORG_ID, codec::uuid(org_id))
        .into()
}

pub fn count_by_id(org_id: &str) -> Statement {
    Select::count(TABLE)
        .where_eq(ORG_ID, codec::uuid(org_id))
        .into()
}

/// A bounded scan of the primary table, used by name search.
pub fn scan(limit: usize) -> Statement {
    Select::all(TABLE).limit(limit).into()
}

/// Member rows denormalize the user's names, email and roles.
pub fn save_member(org_id: &str, user: &User) -> Statement {
    Insert::into_table(MEMBERS)
        .value(ORG_ID, codec::uuid(org_id))
        .value(users::USER_ID, codec::uuid(&user.user_id))
        .value(users::FIRST_NAME, codec::optional_text(user.first_name.as_deref()))
        .value(users::MIDDLE_NAME, codec::optional_text(user.middle_name.as_deref()))
        .value(users::LAST_NAME, codec::optional_text(user.last_name.as_deref()))
        .value(users::ROLES, codec::enum_set(&user.roles))
        .value(users::EMAIL, codec::optional_text(user.email.as_deref()))
        .into()
}

pub fn count_member(org_id: &str, user_id: &str) -> Statement {
    Select::count(MEMBERS)
        .where_eq(ORG_ID, codec::uuid(org_id))
        .where_eq(users::USER_ID, codec::uuid(user_id))
        .into()
}

pub fn select_members(org_id: &str) -> Statement {
    Select::all(MEMBERS)
        .where_eq(ORG_ID, codec::uuid(org_id))
        .into()
}

pub fn delete_member(org_id: &str, user_id: &str) -> Statement {
    Delete::from_table(MEMBERS)
        .where_eq(ORG_ID, codec::uuid(org_id))
        .where_eq(users::USER_ID, codec::uuid(user_id))
        .into()
}

/// Range delete of the whole member partition.
pub fn delete_all_members(org_id: &str) -> Statement {
    Delete::from_table(MEMBERS)
        .where_eq(ORG_ID, codec::uuid(org_id))
        .into()
}
