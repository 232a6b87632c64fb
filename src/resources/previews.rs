use crate::models::EmailClientListResult;
use crate::{Client, Result};

/// Email preview support. Obtain with [`Client::previews`].
#[derive(Debug, Clone, Copy)]
pub struct Previews<'a> {
    client: &'a Client,
}

impl<'a> Previews<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Email clients that previews can be generated for.
    pub async fn list_email_clients(&self) -> Result<EmailClientListResult> {
        self.client.get_json("api/screenshots/clients", &[]).await
    }
}
