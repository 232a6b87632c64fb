use crate::models::{DeliverabilityReport, SpamAnalysisResult};
use crate::{Client, Result};

/// Spam and deliverability checks. Obtain with [`Client::analysis`].
#[derive(Debug, Clone, Copy)]
pub struct Analysis<'a> {
    client: &'a Client,
}

impl<'a> Analysis<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Run SpamAssassin against a received email.
    pub async fn spam(&self, email_id: &str) -> Result<SpamAnalysisResult> {
        self.client
            .get_json(&format!("api/analysis/spam/{email_id}"), &[])
            .await
    }

    /// Build a deliverability report (SPF, DKIM, DMARC, block lists, content).
    pub async fn deliverability(&self, email_id: &str) -> Result<DeliverabilityReport> {
        self.client
            .get_json(&format!("api/analysis/deliverability/{email_id}"), &[])
            .await
    }
}
