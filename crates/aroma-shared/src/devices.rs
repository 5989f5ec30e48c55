use serde::{Deserialize, Serialize};

/// A device registered to receive push notifications.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "snake_case")]
pub enum MobileDevice {
    Android { registration_id: String },
    Ios { device_token: String },
}

impl MobileDevice {
    /// The push-service address of the device.
    pub fn address(&self) -> &str {
        match self {
            MobileDevice::Android { registration_id } => registration_id,
            MobileDevice::Ios { device_token } => device_token,
        }
    }
}
