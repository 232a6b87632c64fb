use serde::{Deserialize, Serialize};

/// A rendered (or rendering) screenshot of an email in one client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    /// Identifier used to download the screenshot.
    pub id: String,
    /// Email client the preview was generated with.
    pub email_client: String,
    /// Whether images were disabled. Not always reported.
    #[serde(default)]
    pub disable_images: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewListResult {
    #[serde(default)]
    pub items: Vec<Preview>,
}

/// Email clients to render a message in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequestOptions {
    pub email_clients: Vec<String>,
}

impl PreviewRequestOptions {
    pub fn new<I, S>(email_clients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            email_clients: email_clients.into_iter().map(Into::into).collect(),
        }
    }
}

/// An email client that previews can be generated for.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailClient {
    pub id: String,
    /// Display name.
    pub name: String,
    /// Desktop, mobile or web.
    pub platform_group: String,
    pub platform_type: String,
    pub platform_version: String,
    /// Whether images can be disabled for this client.
    pub can_disable_images: bool,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientListResult {
    #[serde(default)]
    pub items: Vec<EmailClient>,
}
