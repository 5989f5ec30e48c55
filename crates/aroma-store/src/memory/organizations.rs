use std::collections::{BTreeMap, BTreeSet};

use aroma_shared::{Organization, User};
use dashmap::DashMap;

use super::canonical_organization;
use crate::applications::{name_matches, valid_search_term};
use crate::assertions;
use crate::codec::canonical_id;
use crate::error::{Result, StoreError};
use crate::organizations::OrganizationRepository;

pub struct MemoryOrganizationRepository {
    organizations: DashMap<String, Organization>,
    members: DashMap<String, BTreeMap<String, User>>,
    search_scan_limit: usize,
}

/// The fields a member row carries.
fn member(user: &User) -> User {
    User {
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        middle_name: user.middle_name.clone(),
        last_name: user.last_name.clone(),
        roles: user.roles.clone(),
        ..User::with_id(canonical_id(&user.user_id))
    }
}

impl MemoryOrganizationRepository {
    pub fn new(search_scan_limit: usize) -> Self {
        Self {
            organizations: DashMap::new(),
            members: DashMap::new(),
            search_scan_limit,
        }
    }

    fn require(&self, org_id: &str) -> Result<Organization> {
        self.organizations
            .get(&canonical_id(org_id))
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::OrganizationDoesNotExist(org_id.to_string()))
    }
}

impl OrganizationRepository for MemoryOrganizationRepository {
    fn save_organization(&self, org: &Organization) -> Result<()> {
        assertions::valid_organization(org)?;

        let org = canonical_organization(org);
        self.organizations.insert(org.organization_id.clone(), org);
        Ok(())
    }

    fn get_organization(&self, org_id: &str) -> Result<Organization> {
        assertions::valid_org_id(org_id)?;
        self.require(org_id)
    }

    fn contains_organization(&self, org_id: &str) -> Result<bool> {
        assertions::valid_org_id(org_id)?;
        Ok(self.organizations.contains_key(&canonical_id(org_id)))
    }

    fn delete_organization(&self, org_id: &str) -> Result<()> {
        assertions::valid_org_id(org_id)?;
        self.require(org_id)?;

        self.delete_all_members(org_id)?;
        self.organizations.remove(&canonical_id(org_id));
        Ok(())
    }

    fn search_by_name(&self, term: &str) -> Result<Vec<Organization>> {
        valid_search_term(term)?;

        let mut matches: Vec<Organization> = self
            .organizations
            .iter()
            .take(self.search_scan_limit)
            .filter(|entry| name_matches(&entry.value().organization_name, term))
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by(|a, b| a.organization_id.cmp(&b.organization_id));
        Ok(matches)
    }

    fn get_organization_owners(&self, org_id: &str) -> Result<BTreeSet<String>> {
        assertions::valid_org_id(org_id)?;
        Ok(self.require(org_id)?.owners)
    }

    fn save_member_in_organization(&self, org_id: &str, user: &User) -> Result<()> {
        assertions::valid_org_id(org_id)?;
        assertions::valid_user(user)?;

        let member = member(user);
        self.members
            .entry(canonical_id(org_id))
            .or_default()
            .insert(member.user_id.clone(), member);
        Ok(())
    }

    fn is_member_in_organization(&self, org_id: &str, user_id: &str) -> Result<bool> {
        assertions::valid_org_id(org_id)?;
        assertions::valid_user_id(user_id)?;

        Ok(self
            .members
            .get(&canonical_id(org_id))
            .is_some_and(|members| members.contains_key(&canonical_id(user_id))))
    }

    fn get_organization_members(&self, org_id: &str) -> Result<Vec<User>> {
        assertions::valid_org_id(org_id)?;

        Ok(self
            .members
            .get(&canonical_id(org_id))
            .map(|members| members.values().cloned().collect())
            .unwrap_or_default())
    }

    fn delete_member(&self, org_id: &str, user_id: &str) -> Result<()> {
        assertions::valid_org_id(org_id)?;
        assertions::valid_user_id(user_id)?;

        if let Some(mut members) = self.members.get_mut(&canonical_id(org_id)) {
            members.remove(&canonical_id(user_id));
        }
        Ok(())
    }

    fn delete_all_members(&self, org_id: &str) -> Result<()> {
        assertions::valid_org_id(org_id)?;

        self.members.remove(&canonical_id(org_id));
        Ok(())
    }
}
