use crate::decode::datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A virtual security device producing one-time passwords.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceListResult {
    #[serde(default)]
    pub items: Vec<Device>,
}

/// Options for creating a device.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCreateOptions {
    /// Name used to identify the device.
    pub name: String,
    /// Base32-encoded shared secret.
    pub shared_secret: String,
}

impl DeviceCreateOptions {
    pub fn new(name: impl Into<String>, shared_secret: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shared_secret: shared_secret.into(),
        }
    }
}

/// The current one-time password and when it stops being valid.
#[derive(Debug, Clone, Deserialize)]
pub struct OtpResult {
    pub code: String,
    #[serde(with = "datetime")]
    pub expires: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OtpSharedOptions<'a> {
    pub shared_secret: &'a str,
}
