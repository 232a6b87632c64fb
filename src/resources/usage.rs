use crate::models::{UsageAccountLimits, UsageTransactionListResult};
use crate::{Client, Result};

/// Account usage. Both calls need an account-level API key.
#[derive(Debug, Clone, Copy)]
pub struct Usage<'a> {
    client: &'a Client,
}

impl<'a> Usage<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn limits(&self) -> Result<UsageAccountLimits> {
        self.client.get_json("api/usage/limits", &[]).await
    }

    /// Transactions over the last 31 days.
    pub async fn transactions(&self) -> Result<UsageTransactionListResult> {
        self.client.get_json("api/usage/transactions", &[]).await
    }
}
