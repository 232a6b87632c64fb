use serde::{Deserialize, Serialize};

/// A virtual inbox that receives test email and SMS messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    /// Unique identifier, also the SMTP/POP3 username.
    pub id: String,
    /// Name used to identify the server.
    pub name: String,
    /// Users (excluding administrators) with access to the server.
    #[serde(default)]
    pub users: Vec<String>,
    /// Number of messages currently held.
    #[serde(default)]
    pub messages: u64,
}

/// Servers sorted by creation date, most recent first.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerListResult {
    #[serde(default)]
    pub items: Vec<Server>,
}

/// Options for creating a server.
#[derive(Debug, Clone, Serialize)]
pub struct ServerCreateOptions {
    /// Name used to identify the server.
    pub name: String,
}

impl ServerCreateOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
