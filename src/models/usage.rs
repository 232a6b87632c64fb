use crate::decode::datetime;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A single account limit and current consumption against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct UsageAccountLimit {
    pub limit: i64,
    pub current: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsageAccountLimits {
    pub servers: UsageAccountLimit,
    pub users: UsageAccountLimit,
    pub email: UsageAccountLimit,
    pub sms: UsageAccountLimit,
}

/// Email and SMS volume for one period.
#[derive(Debug, Clone, Deserialize)]
pub struct UsageTransaction {
    #[serde(with = "datetime")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub email: i64,
    #[serde(default)]
    pub sms: i64,
}

/// The last 31 days of transactions.
#[derive(Debug, Clone, Deserialize)]
pub struct UsageTransactionListResult {
    #[serde(default)]
    pub items: Vec<UsageTransaction>,
}
