use serde::Deserialize;
use std::collections::HashMap;

/// A single SpamAssassin rule that fired.
#[derive(Debug, Clone, Deserialize)]
pub struct SpamAssassinRule {
    pub score: Option<f64>,
    pub rule: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpamFilterResults {
    #[serde(default)]
    pub spam_assassin: Vec<SpamAssassinRule>,
}

/// Result of a spam analysis.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpamAnalysisResult {
    pub spam_filter_results: SpamFilterResults,
    /// Overall SpamAssassin score.
    pub score: Option<f64>,
}

/// Verdict of a single deliverability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AnalysisOutcome {
    Pass,
    Warning,
    Fail,
    Timeout,
}

/// Deliverability report for an email.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverabilityReport {
    pub spf: Option<EmailAuthenticationResult>,
    #[serde(default)]
    pub dkim: Vec<EmailAuthenticationResult>,
    pub dmarc: Option<EmailAuthenticationResult>,
    #[serde(default)]
    pub block_lists: Vec<BlockListResult>,
    pub content: ContentSummary,
    pub dns_records: DnsRecords,
    pub spam_assassin: SpamAssassinResult,
}

/// SPF, DKIM or DMARC check.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAuthenticationResult {
    pub result: AnalysisOutcome,
    pub description: Option<String>,
    pub raw_value: Option<String>,
    pub tags: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockListResult {
    pub id: String,
    pub name: String,
    pub result: AnalysisOutcome,
}

/// Content checks on the message body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummary {
    pub embed: bool,
    pub iframe: bool,
    pub object: bool,
    pub script: bool,
    pub short_urls: bool,
    pub text_size: u64,
    pub total_size: u64,
    pub missing_alt: bool,
    pub missing_list_unsubscribe: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DnsRecords {
    pub a: Option<Vec<String>>,
    pub mx: Option<Vec<String>>,
    pub ptr: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpamAssassinResult {
    pub score: Option<f64>,
    pub result: AnalysisOutcome,
    #[serde(default)]
    pub rules: Vec<SpamAssassinRule>,
}
