//! Response decoding: JSON bodies, date-times and the search delay header.

use crate::client::RawResponse;
use crate::poll::DelaySchedule;
use crate::{Error, Result};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

/// Response header carrying the server's poll delay schedule.
pub(crate) const DELAY_HEADER: &str = "x-ms-delay";

/// A decoded body together with the delay schedule sent alongside it.
#[derive(Debug)]
pub(crate) struct WithDelay<T> {
    pub value: T,
    pub delays: DelaySchedule,
}

/// Decode a JSON body into `T`.
pub(crate) fn json<T: DeserializeOwned>(response: &RawResponse) -> Result<T> {
    if response.body.is_empty() {
        return Err(Error::InvalidResponse(format!(
            "expected a JSON body, got an empty response ({})",
            response.status
        )));
    }
    Ok(serde_json::from_slice(&response.body)?)
}

/// Decode a JSON body and pick up the `x-ms-delay` schedule from the headers.
pub(crate) fn json_with_delay<T: DeserializeOwned>(response: &RawResponse) -> Result<WithDelay<T>> {
    let value = json(response)?;
    Ok(WithDelay {
        value,
        delays: delay_schedule(&response.headers),
    })
}

/// Read the delay schedule from response headers, falling back to the default.
pub(crate) fn delay_schedule(headers: &HeaderMap) -> DelaySchedule {
    let header = headers.get(DELAY_HEADER).and_then(|v| v.to_str().ok());
    DelaySchedule::parse(header)
}

/// Serde adapter for API date-times.
///
/// Accepts RFC 3339 values with or without fractional seconds, and values that
/// omit the offset (read as UTC). Serializes with as many fractional digits as
/// the value needs.
pub mod datetime {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];

    /// Parse an API date-time string.
    pub fn parse(value: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
            return Some(parsed.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .map(|naive| naive.and_utc())
    }

    /// Render a date-time the way request bodies carry it.
    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("cannot decode date string {raw}"))
        })
    }
}
