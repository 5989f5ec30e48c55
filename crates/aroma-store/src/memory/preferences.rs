use std::collections::BTreeSet;

use aroma_shared::MobileDevice;
use dashmap::DashMap;

use crate::assertions;
use crate::codec::canonical_id;
use crate::error::Result;
use crate::preferences::PreferencesRepository;

#[derive(Default)]
pub struct MemoryPreferencesRepository {
    devices: DashMap<String, BTreeSet<MobileDevice>>,
}

impl MemoryPreferencesRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferencesRepository for MemoryPreferencesRepository {
    fn save_mobile_device(&self, user_id: &str, device: &MobileDevice) -> Result<()> {
        assertions::valid_user_id(user_id)?;
        assertions::valid_mobile_device(device)?;

        self.devices
            .entry(canonical_id(user_id))
            .or_default()
            .insert(device.clone());
        Ok(())
    }

    fn save_mobile_devices(&self, user_id: &str, devices: &BTreeSet<MobileDevice>) -> Result<()> {
        assertions::valid_user_id(user_id)?;
        for device in devices {
            assertions::valid_mobile_device(device)?;
        }

        let user_id = canonical_id(user_id);
        if devices.is_empty() {
            self.devices.remove(&user_id);
        } else {
            self.devices.insert(user_id, devices.clone());
        }
        Ok(())
    }

    fn contains_mobile_device(&self, user_id: &str, device: &MobileDevice) -> Result<bool> {
        assertions::valid_user_id(user_id)?;
        assertions::valid_mobile_device(device)?;

        Ok(self
            .devices
            .get(&canonical_id(user_id))
            .is_some_and(|devices| devices.contains(device)))
    }

    fn get_mobile_devices(&self, user_id: &str) -> Result<BTreeSet<MobileDevice>> {
        assertions::valid_user_id(user_id)?;

        Ok(self
            .devices
            .get(&canonical_id(user_id))
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    fn delete_mobile_device(&self, user_id: &str, device: &MobileDevice) -> Result<()> {
        assertions::valid_user_id(user_id)?;
        assertions::valid_mobile_device(device)?;

        let user_id = canonical_id(user_id);
        if let Some(mut devices) = self.devices.get_mut(&user_id) {
            devices.remove(device);
        }
        self.devices.remove_if(&user_id, |_, devices| devices.is_empty());
        Ok(())
    }

    fn delete_all_mobile_devices(&self, user_id: &str) -> Result<()> {
        assertions::valid_user_id(user_id)?;

        self.devices.remove(&canonical_id(user_id));
        Ok(())
    }
}
