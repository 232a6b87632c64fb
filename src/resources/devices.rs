use crate::models::{Device, DeviceCreateOptions, DeviceListResult, OtpResult, OtpSharedOptions};
use crate::{Client, Result};
use reqwest::Method;

/// Virtual security devices. Obtain with [`Client::devices`].
#[derive(Debug, Clone, Copy)]
pub struct Devices<'a> {
    client: &'a Client,
}

impl<'a> Devices<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<DeviceListResult> {
        self.client.get_json("api/devices", &[]).await
    }

    pub async fn create(&self, options: &DeviceCreateOptions) -> Result<Device> {
        self.client
            .send_json(Method::POST, "api/devices", &[], options)
            .await
    }

    /// Current one-time password for a saved device or a shared secret.
    ///
    /// A `query` containing `-` is treated as a device id; anything else as a
    /// base32-encoded shared secret.
    pub async fn otp(&self, query: &str) -> Result<OtpResult> {
        if query.contains('-') {
            return self
                .client
                .get_json(&format!("api/devices/{query}/otp"), &[])
                .await;
        }
        let options = OtpSharedOptions {
            shared_secret: query,
        };
        self.client
            .send_json(Method::POST, "api/devices/otp", &[], &options)
            .await
    }

    /// Permanently delete a device.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .send_empty(Method::DELETE, &format!("api/devices/{id}"), &[])
            .await
    }
}
