//! Per-user preferences: the mobile devices registered for push
//! notifications.
//!
//! Adding or removing a single device reads the stored set, changes it and
//! writes it back.  Two concurrent changes for the same user can lose one
//! of them.

use std::collections::BTreeSet;
use std::sync::Arc;

use aroma_shared::MobileDevice;

use crate::assertions;
use crate::error::Result;
use crate::mappers::devices_from_row;
use crate::session::{self, Session};
use crate::statements::preferences as statements;

pub trait PreferencesRepository: Send + Sync {
    fn save_mobile_device(&self, user_id: &str, device: &MobileDevice) -> Result<()>;

    /// Replaces the whole set.
    fn save_mobile_devices(&self, user_id: &str, devices: &BTreeSet<MobileDevice>) -> Result<()>;

    fn contains_mobile_device(&self, user_id: &str, device: &MobileDevice) -> Result<bool>;

    /// Empty when the user has registered nothing.
    fn get_mobile_devices(&self, user_id: &str) -> Result<BTreeSet<MobileDevice>>;

    fn delete_mobile_device(&self, user_id: &str, device: &MobileDevice) -> Result<()>;

    fn delete_all_mobile_devices(&self, user_id: &str) -> Result<()>;
}

pub struct StorePreferencesRepository {
    session: Arc<dyn Session>,
}

impl StorePreferencesRepository {
    pub fn new(session: Arc<dyn Session>) -> Self {
        Self { session }
    }

    fn load(&self, user_id: &str) -> Result<BTreeSet<MobileDevice>> {
        let rows = session::execute(
            self.session.as_ref(),
            &statements::select(user_id),
            || format!("load devices of {user_id}"),
        )?;
        Ok(rows.one().map(devices_from_row).unwrap_or_default())
    }

    fn store(&self, user_id: &str, devices: &BTreeSet<MobileDevice>) -> Result<()> {
        let statement = statements::save(user_id, devices)?;
        session::execute(self.session.as_ref(), &statement, || {
            format!("save {} devices of {user_id}", devices.len())
        })?;
        Ok(())
    }
}

impl PreferencesRepository for StorePreferencesRepository {
    fn save_mobile_device(&self, user_id: &str, device: &MobileDevice) -> Result<()> {
        assertions::valid_user_id(user_id)?;
        assertions::valid_mobile_device(device)?;

        let mut devices = self.load(user_id)?;
        if devices.insert(device.clone()) {
            self.store(user_id, &devices)?;
        }
        Ok(())
    }

    fn save_mobile_devices(&self, user_id: &str, devices: &BTreeSet<MobileDevice>) -> Result<()> {
        assertions::valid_user_id(user_id)?;
        for device in devices {
            assertions::valid_mobile_device(device)?;
        }
        self.store(user_id, devices)
    }

    fn contains_mobile_device(&self, user_id: &str, device: &MobileDevice) -> Result<bool> {
        assertions::valid_user_id(user_id)?;
        assertions::valid_mobile_device(device)?;

        Ok(self.load(user_id)?.contains(device))
    }

    fn get_mobile_devices(&self, user_id: &str) -> Result<BTreeSet<MobileDevice>> {
        assertions::valid_user_id(user_id)?;

        let devices = self.load(user_id)?;
        tracing::debug!(user_id, count = devices.len(), "loaded mobile devices");
        Ok(devices)
    }

    fn delete_mobile_device(&self, user_id: &str, device: &MobileDevice) -> Result<()> {
        assertions::valid_user_id(user_id)?;
        assertions::valid_mobile_device(device)?;

        let mut devices = self.load(user_id)?;
        if devices.remove(device) {
            self.store(user_id, &devices)?;
        }
        Ok(())
    }

    fn delete_all_mobile_devices(&self, user_id: &str) -> Result<()> {
        assertions::valid_user_id(user_id)?;

        session::execute(
            self.session.as_ref(),
            &statements::delete(user_id),
            || format!("delete devices of {user_id}"),
        )?;
        Ok(())
    }
}
