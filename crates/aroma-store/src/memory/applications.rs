use aroma_shared::Application;
use dashmap::DashMap;

use super::{canonical_application, newest_first};
use crate::applications::{name_matches, valid_search_term, ApplicationRepository};
use crate::assertions;
use crate::codec::canonical_id;
use crate::error::{Result, StoreError};

pub struct MemoryApplicationRepository {
    applications: DashMap<String, Application>,
    recent_limit: usize,
    search_scan_limit: usize,
}

impl MemoryApplicationRepository {
    pub fn new(recent_limit: usize, search_scan_limit: usize) -> Self {
        Self {
            applications: DashMap::new(),
            recent_limit,
            search_scan_limit,
        }
    }

    fn filtered<F>(&self, predicate: F) -> Vec<Application>
    where
        F: Fn(&Application) -> bool,
    {
        let mut apps: Vec<Application> = self
            .applications
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        apps.sort_by(|a, b| a.application_id.cmp(&b.application_id));
        apps
    }

    fn recent(&self, limit: usize) -> Vec<Application> {
        let mut apps = self.filtered(|_| true);
        newest_first(&mut apps, |app| app.time_of_provisioning);
        apps.truncate(limit);
        apps
    }
}

impl ApplicationRepository for MemoryApplicationRepository {
    fn save_application(&self, app: &Application) -> Result<()> {
        assertions::valid_application(app)?;

        let app = canonical_application(app);
        self.applications.insert(app.application_id.clone(), app);
        Ok(())
    }

    fn delete_application(&self, app_id: &str) -> Result<()> {
        assertions::valid_app_id(app_id)?;

        self.applications
            .remove(&canonical_id(app_id))
            .map(|_| ())
            .ok_or_else(|| StoreError::ApplicationDoesNotExist(app_id.to_string()))
    }

    fn get_by_id(&self, app_id: &str) -> Result<Application> {
        assertions::valid_app_id(app_id)?;

        self.applications
            .get(&canonical_id(app_id))
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::ApplicationDoesNotExist(app_id.to_string()))
    }

    fn contains_application(&self, app_id: &str) -> Result<bool> {
        assertions::valid_app_id(app_id)?;
        Ok(self.applications.contains_key(&canonical_id(app_id)))
    }

    fn get_applications_owned_by(&self, user_id: &str) -> Result<Vec<Application>> {
        assertions::valid_user_id(user_id)?;

        let user_id = canonical_id(user_id);
        Ok(self.filtered(|app| app.owners.contains(&user_id)))
    }

    fn get_applications_by_org(&self, org_id: &str) -> Result<Vec<Application>> {
        assertions::valid_org_id(org_id)?;

        let org_id = canonical_id(org_id);
        Ok(self.filtered(|app| app.organization_id.as_deref() == Some(org_id.as_str())))
    }

    fn search_by_name(&self, term: &str) -> Result<Vec<Application>> {
        valid_search_term(term)?;

        Ok(self
            .recent(self.search_scan_limit)
            .into_iter()
            .filter(|app| name_matches(&app.name, term))
            .collect())
    }

    fn get_recently_created(&self) -> Result<Vec<Application>> {
        Ok(self.recent(self.recent_limit))
    }
}
