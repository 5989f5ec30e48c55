//! Organization repository, including organization membership.

use std::collections::BTreeSet;
use std::sync::Arc;

use aroma_shared::{Organization, User};

use crate::applications::{name_matches, valid_search_term};
use crate::assertions;
use crate::error::{Result, StoreError};
use crate::mappers::{organization_from_row, user_from_row};
use crate::session::{self, Session};
use crate::statements::organizations as statements;

pub trait OrganizationRepository: Send + Sync {
    fn save_organization(&self, org: &Organization) -> Result<()>;

    fn get_organization(&self, org_id: &str) -> Result<Organization>;

    fn contains_organization(&self, org_id: &str) -> Result<bool>;

    /// Deletes every member first, then the organization itself.  The two
    /// steps are not atomic; a failure between them is safe to retry.
    fn delete_organization(&self, org_id: &str) -> Result<()>;

    /// Case-insensitive substring match over organization names.
    fn search_by_name(&self, term: &str) -> Result<Vec<Organization>>;

    /// Owners as recorded on the organization itself.
    fn get_organization_owners(&self, org_id: &str) -> Result<BTreeSet<String>>;

    fn save_member_in_organization(&self, org_id: &str, user: &User) -> Result<()>;

    fn is_member_in_organization(&self, org_id: &str, user_id: &str) -> Result<bool>;

    /// Members carry only the denormalized id, names, email and roles.
    fn get_organization_members(&self, org_id: &str) -> Result<Vec<User>>;

    fn delete_member(&self, org_id: &str, user_id: &str) -> Result<()>;

    fn delete_all_members(&self, org_id: &str) -> Result<()>;
}

pub struct StoreOrganizationRepository {
    session: Arc<dyn Session>,
    search_scan_limit: usize,
}

impl StoreOrganizationRepository {
    pub fn new(session: Arc<dyn Session>, search_scan_limit: usize) -> Self {
        Self {
            session,
            search_scan_limit,
        }
    }

    fn find(&self, org_id: &str) -> Result<Option<Organization>> {
        let rows = session::execute(
            self.session.as_ref(),
            &statements::select_by_id(org_id),
            || format!("load organization {org_id}"),
        )?;
        Ok(rows.one().map(organization_from_row))
    }

    fn require(&self, org_id: &str) -> Result<Organization> {
        self.find(org_id)?
            .ok_or_else(|| StoreError::OrganizationDoesNotExist(org_id.to_string()))
    }
}

impl OrganizationRepository for StoreOrganizationRepository {
    fn save_organization(&self, org: &Organization) -> Result<()> {
        assertions::valid_organization(org)?;

        session::execute(self.session.as_ref(), &statements::save(org), || {
            format!("save organization {}", org.organization_id)
        })?;
        Ok(())
    }

    fn get_organization(&self, org_id: &str) -> Result<Organization> {
        assertions::valid_org_id(org_id)?;
        self.require(org_id)
    }

    fn contains_organization(&self, org_id: &str) -> Result<bool> {
        assertions::valid_org_id(org_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::count_by_id(org_id),
            || format!("check organization {org_id}"),
        )?;
        Ok(rows.count() > 0)
    }

    fn delete_organization(&self, org_id: &str) -> Result<()> {
        assertions::valid_org_id(org_id)?;
        self.require(org_id)?;

        self.delete_all_members(org_id)?;
        session::execute(self.session.as_ref(), &statements::delete(org_id), || {
            format!("delete organization {org_id}")
        })?;
        Ok(())
    }

    fn search_by_name(&self, term: &str) -> Result<Vec<Organization>> {
        valid_search_term(term)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::scan(self.search_scan_limit),
            || format!("search organizations for '{term}'"),
        )?;
        let matches: Vec<Organization> = rows
            .rows()
            .iter()
            .map(organization_from_row)
            .filter(|org| name_matches(&org.organization_name, term))
            .collect();

        if rows.len() >= self.search_scan_limit {
            tracing::warn!(
                term,
                scanned = rows.len(),
                "organization search hit the scan limit; results may be incomplete"
            );
        }
        tracing::debug!(term, count = matches.len(), "searched organizations");
        Ok(matches)
    }

    fn get_organization_owners(&self, org_id: &str) -> Result<BTreeSet<String>> {
        assertions::valid_org_id(org_id)?;
        Ok(self.require(org_id)?.owners)
    }

    fn save_member_in_organization(&self, org_id: &str, user: &User) -> Result<()> {
        assertions::valid_org_id(org_id)?;
        assertions::valid_user(user)?;

        session::execute(
            self.session.as_ref(),
            &statements::save_member(org_id, user),
            || format!("add member {} to organization {org_id}", user.user_id),
        )?;
        Ok(())
    }

    fn is_member_in_organization(&self, org_id: &str, user_id: &str) -> Result<bool> {
        assertions::valid_org_id(org_id)?;
        assertions::valid_user_id(user_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::count_member(org_id, user_id),
            || format!("check member {user_id} of organization {org_id}"),
        )?;
        Ok(rows.count() > 0)
    }

    fn get_organization_members(&self, org_id: &str) -> Result<Vec<User>> {
        assertions::valid_org_id(org_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::select_members(org_id),
            || format!("list members of organization {org_id}"),
        )?;
        let members: Vec<User> = rows.rows().iter().map(user_from_row).collect();
        tracing::debug!(org_id, count = members.len(), "listed organization members");
        Ok(members)
    }

    fn delete_member(&self, org_id: &str, user_id: &str) -> Result<()> {
        assertions::valid_org_id(org_id)?;
        assertions::valid_user_id(user_id)?;

        session::execute(
            self.session.as_ref(),
            &statements::delete_member(org_id, user_id),
            || format!("remove member {user_id} from organization {org_id}"),
        )?;
        Ok(())
    }

    fn delete_all_members(&self, org_id: &str) -> Result<()> {
        assertions::valid_org_id(org_id)?;

        session::execute(
            self.session.as_ref(),
            &statements::delete_all_members(org_id),
            || format!("remove all members of organization {org_id}"),
        )?;
        Ok(())
    }
}
