use crate::models::{Server, ServerCreateOptions, ServerListResult};
use crate::{Client, Result};
use reqwest::Method;

/// Server (virtual inbox) operations. Obtain with [`Client::servers`].
#[derive(Debug, Clone, Copy)]
pub struct Servers<'a> {
    client: &'a Client,
}

impl<'a> Servers<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List servers, sorted alphabetically.
    pub async fn list(&self) -> Result<ServerListResult> {
        self.client.get_json("api/servers", &[]).await
    }

    /// Create a new server.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailosaur_client::{Client, ServerCreateOptions};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailosaur_client::Error> {
    /// let client = Client::new("your-api-key")?;
    /// let server = client.servers().create(&ServerCreateOptions::new("Signup tests")).await?;
    /// println!("{}", server.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(&self, options: &ServerCreateOptions) -> Result<Server> {
        self.client
            .send_json(Method::POST, "api/servers", &[], options)
            .await
    }

    /// Retrieve a single server.
    pub async fn get(&self, id: &str) -> Result<Server> {
        self.client.get_json(&format!("api/servers/{id}"), &[]).await
    }

    /// Replace the attributes of a server.
    pub async fn update(&self, id: &str, server: &Server) -> Result<Server> {
        self.client
            .send_json(Method::PUT, &format!("api/servers/{id}"), &[], server)
            .await
    }

    /// Permanently delete a server and every message in it.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .send_empty(Method::DELETE, &format!("api/servers/{id}"), &[])
            .await
    }

    /// Build a random address that delivers into `server_id`.
    ///
    /// Purely local: `{uuid}@{server_id}.{smtp_host}`.
    pub fn generate_email_address(&self, server_id: &str) -> String {
        let local = uuid::Uuid::new_v4();
        format!("{local}@{server_id}.{}", self.client.smtp_host())
    }
}
