//! Application repository.

use std::sync::Arc;

use aroma_shared::Application;

use crate::assertions;
use crate::error::{Result, StoreError};
use crate::mappers::application_from_row;
use crate::session::{self, Session};
use crate::statements::applications as statements;
use crate::statements::Statement;

pub trait ApplicationRepository: Send + Sync {
    /// Upsert the application and every projection of it.
    fn save_application(&self, app: &Application) -> Result<()>;

    fn delete_application(&self, app_id: &str) -> Result<()>;

    fn get_by_id(&self, app_id: &str) -> Result<Application>;

    fn contains_application(&self, app_id: &str) -> Result<bool>;

    fn get_applications_owned_by(&self, user_id: &str) -> Result<Vec<Application>>;

    fn get_applications_by_org(&self, org_id: &str) -> Result<Vec<Application>>;

    /// Case-insensitive substring match over recently created applications.
    fn search_by_name(&self, term: &str) -> Result<Vec<Application>>;

    /// Newest first, bounded.
    fn get_recently_created(&self) -> Result<Vec<Application>>;
}

/// Case-insensitive substring filter shared by both implementations.
pub(crate) fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

pub(crate) fn valid_search_term(term: &str) -> Result<()> {
    if term.trim().is_empty() {
        return Err(StoreError::InvalidArgument("missing search term".into()));
    }
    Ok(())
}

pub struct StoreApplicationRepository {
    session: Arc<dyn Session>,
    recent_limit: usize,
    search_scan_limit: usize,
}

impl StoreApplicationRepository {
    pub fn new(session: Arc<dyn Session>, recent_limit: usize, search_scan_limit: usize) -> Self {
        Self {
            session,
            recent_limit,
            search_scan_limit,
        }
    }

    fn find(&self, app_id: &str) -> Result<Option<Application>> {
        let rows = session::execute(
            self.session.as_ref(),
            &statements::select_by_id(app_id),
            || format!("load application {app_id}"),
        )?;
        Ok(rows.one().map(application_from_row))
    }

    fn list(&self, statement: Statement, describe: String) -> Result<Vec<Application>> {
        let rows = session::execute(self.session.as_ref(), &statement, || describe.clone())?;
        let apps: Vec<Application> = rows.rows().iter().map(application_from_row).collect();
        tracing::debug!(action = %describe, count = apps.len(), "listed applications");
        Ok(apps)
    }
}

impl ApplicationRepository for StoreApplicationRepository {
    fn save_application(&self, app: &Application) -> Result<()> {
        assertions::valid_application(app)?;

        let previous = self.find(&app.application_id)?;
        session::execute(
            self.session.as_ref(),
            &statements::save(app, previous.as_ref()),
            || format!("save application {}", app.application_id),
        )?;
        Ok(())
    }

    fn delete_application(&self, app_id: &str) -> Result<()> {
        assertions::valid_app_id(app_id)?;

        let app = self
            .find(app_id)?
            .ok_or_else(|| StoreError::ApplicationDoesNotExist(app_id.to_string()))?;

        session::execute(self.session.as_ref(), &statements::delete(&app), || {
            format!("delete application {app_id}")
        })?;
        Ok(())
    }

    fn get_by_id(&self, app_id: &str) -> Result<Application> {
        assertions::valid_app_id(app_id)?;

        self.find(app_id)?
            .ok_or_else(|| StoreError::ApplicationDoesNotExist(app_id.to_string()))
    }

    fn contains_application(&self, app_id: &str) -> Result<bool> {
        assertions::valid_app_id(app_id)?;

        let rows = session::execute(
            self.session.as_ref(),
            &statements::count_by_id(app_id),
            || format!("check application {app_id}"),
        )?;
        Ok(rows.count() > 0)
    }

    fn get_applications_owned_by(&self, user_id: &str) -> Result<Vec<Application>> {
        assertions::valid_user_id(user_id)?;
        self.list(
            statements::select_by_owner(user_id),
            format!("list applications owned by {user_id}"),
        )
    }

    fn get_applications_by_org(&self, org_id: &str) -> Result<Vec<Application>> {
        assertions::valid_org_id(org_id)?;
        self.list(
            statements::select_by_org(org_id),
            format!("list applications of organization {org_id}"),
        )
    }

    fn search_by_name(&self, term: &str) -> Result<Vec<Application>> {
        valid_search_term(term)?;

        let candidates = self.list(
            statements::select_recent(self.search_scan_limit),
            format!("search applications for '{term}'"),
        )?;
        Ok(candidates
            .into_iter()
            .filter(|app| name_matches(&app.name, term))
            .collect())
    }

    fn get_recently_created(&self) -> Result<Vec<Application>> {
        self.list(
            statements::select_recent(self.recent_limit),
            "list recently created applications".to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::fixtures::{self, APP_ID, MISSING_ID, ORG_ID, OWNER_ID, START, USER_ID};
    use crate::session::{MockSession, ResultSet};

    fn repository() -> StoreApplicationRepository {
        let clock = fixtures::clock();
        StoreApplicationRepository::new(fixtures::database(&clock), 200, 1_000)
    }

    fn ids(apps: &[Application]) -> BTreeSet<String> {
        apps.iter().map(|app| app.application_id.clone()).collect()
    }

    #[test]
    fn test_save_then_get() {
        let repo = repository();
        let app = fixtures::application();
        repo.save_application(&app).unwrap();

        assert!(repo.contains_application(APP_ID).unwrap());
        assert_eq!(repo.get_by_id(APP_ID).unwrap(), app);
    }

    #[test]
    fn test_save_is_idempotent() {
        let repo = repository();
        let app = fixtures::application();
        repo.save_application(&app).unwrap();
        repo.save_application(&app).unwrap();

        assert_eq!(repo.get_applications_owned_by(OWNER_ID).unwrap().len(), 1);
        assert_eq!(repo.get_recently_created().unwrap().len(), 1);
    }

    #[test]
    fn test_projections_follow_owners_and_org() {
        let repo = repository();
        let mut app = fixtures::application();
        app.owners.insert(USER_ID.to_string());
        app.organization_id = Some(ORG_ID.to_string());
        repo.save_application(&app).unwrap();

        assert_eq!(
            ids(&repo.get_applications_owned_by(OWNER_ID).unwrap()),
            BTreeSet::from([APP_ID.to_string()])
        );
        assert_eq!(repo.get_applications_owned_by(USER_ID).unwrap().len(), 1);
        assert_eq!(repo.get_applications_by_org(ORG_ID).unwrap().len(), 1);
    }

    #[test]
    fn test_resave_drops_stale_owner_and_org() {
        let repo = repository();
        let mut app = fixtures::application();
        app.owners.insert(USER_ID.to_string());
        app.organization_id = Some(ORG_ID.to_string());
        repo.save_application(&app).unwrap();

        app.owners.remove(USER_ID);
        app.organization_id = None;
        repo.save_application(&app).unwrap();

        assert!(repo.get_applications_owned_by(USER_ID).unwrap().is_empty());
        assert!(repo.get_applications_by_org(ORG_ID).unwrap().is_empty());
        assert_eq!(repo.get_applications_owned_by(OWNER_ID).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_cascades() {
        let repo = repository();
        let mut app = fixtures::application();
        app.organization_id = Some(ORG_ID.to_string());
        repo.save_application(&app).unwrap();

        repo.delete_application(APP_ID).unwrap();

        assert!(!repo.contains_application(APP_ID).unwrap());
        assert!(repo.get_applications_owned_by(OWNER_ID).unwrap().is_empty());
        assert!(repo.get_applications_by_org(ORG_ID).unwrap().is_empty());
        assert!(repo.get_recently_created().unwrap().is_empty());
    }

    #[test]
    fn test_missing_application() {
        let repo = repository();
        assert!(!repo.contains_application(MISSING_ID).unwrap());
        assert!(matches!(
            repo.get_by_id(MISSING_ID),
            Err(StoreError::ApplicationDoesNotExist(_))
        ));
        assert!(matches!(
            repo.delete_application(MISSING_ID),
            Err(StoreError::ApplicationDoesNotExist(_))
        ));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let repo = repository();
        repo.save_application(&fixtures::application()).unwrap();

        assert_eq!(repo.search_by_name("cAnA").unwrap().len(), 1);
        assert!(repo.search_by_name("zebra").unwrap().is_empty());
        assert!(matches!(
            repo.search_by_name(" "),
            Err(StoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_recently_created_is_newest_first() {
        let clock = fixtures::clock();
        let repo = StoreApplicationRepository::new(fixtures::database(&clock), 2, 1_000);
        for (i, id) in [APP_ID, MISSING_ID, ORG_ID].iter().enumerate() {
            let app = Application {
                application_id: id.to_string(),
                time_of_provisioning: Some(START + i as i64),
                ..fixtures::application()
            };
            repo.save_application(&app).unwrap();
        }

        let recent: Vec<_> = repo
            .get_recently_created()
            .unwrap()
            .into_iter()
            .map(|app| app.application_id)
            .collect();
        assert_eq!(recent, vec![ORG_ID.to_string(), MISSING_ID.to_string()]);
    }

    #[test]
    fn test_invalid_application_never_reaches_the_store() {
        let mut session = MockSession::new();
        session.expect_execute().times(0);
        let repo = StoreApplicationRepository::new(Arc::new(session), 200, 1_000);

        let mut app = fixtures::application();
        app.owners = BTreeSet::new();
        assert!(matches!(
            repo.save_application(&app),
            Err(StoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            repo.get_by_id("not-a-uuid"),
            Err(StoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            repo.get_applications_owned_by(""),
            Err(StoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_store_failure_is_operation_failed() {
        let mut session = MockSession::new();
        session
            .expect_execute()
            .returning(|_| Err(StoreError::OperationFailed("timed out".into())));
        let repo = StoreApplicationRepository::new(Arc::new(session), 200, 1_000);

        assert!(matches!(
            repo.contains_application(APP_ID),
            Err(StoreError::OperationFailed(_))
        ));
    }

    #[test]
    fn test_get_maps_the_row() {
        let mut session = MockSession::new();
        session.expect_execute().times(1).returning(|_| {
            let statement = statements::columns(&fixtures::application());
            let mut row = crate::session::Row::new();
            for (column, value) in statement {
                row.insert(column, value);
            }
            Ok(ResultSet::new(vec![row]))
        });
        let repo = StoreApplicationRepository::new(Arc::new(session), 200, 1_000);

        assert_eq!(repo.get_by_id(APP_ID).unwrap().name, "Canary");
    }
}
