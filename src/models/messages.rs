use crate::decode::datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A received email or SMS with its parsed content.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    /// `Email` or `SMS`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub from: Vec<MessageAddress>,
    #[serde(default)]
    pub to: Vec<MessageAddress>,
    #[serde(default)]
    pub cc: Vec<MessageAddress>,
    #[serde(default)]
    pub bcc: Vec<MessageAddress>,
    /// When the message was received.
    #[serde(with = "datetime")]
    pub received: DateTime<Utc>,
    #[serde(default)]
    pub subject: String,
    /// Content sent as HTML.
    #[serde(default)]
    pub html: MessageContent,
    /// Content sent as plain text.
    #[serde(default)]
    pub text: MessageContent,
    #[serde(default)]
    pub attachments: Vec<MessageAttachment>,
    #[serde(default)]
    pub metadata: MessageMetadata,
    /// Server the message is held in.
    pub server: String,
}

/// Sender or recipient. Email messages carry `email`, SMS messages `phone`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageAddress {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// One body part with the links, codes and images found in it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MessageContent {
    #[serde(default)]
    pub links: Vec<MessageLink>,
    #[serde(default)]
    pub codes: Vec<MessageCode>,
    #[serde(default)]
    pub images: Option<Vec<MessageImage>>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageLink {
    pub href: String,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageImage {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

/// A verification code extracted from the body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageCode {
    pub value: String,
}

/// Metadata of an attached file; download it with `Files::get_attachment`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageAttachment {
    pub id: String,
    pub content_type: String,
    pub file_name: String,
    pub content_id: Option<String>,
    /// Size in bytes.
    pub length: Option<u64>,
    pub url: String,
}

/// An attachment to include when creating or replying to a message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentOptions {
    pub content_type: String,
    pub file_name: String,
    /// Base64-encoded file content.
    pub content: String,
}

/// SMTP envelope and headers.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageMetadata {
    #[serde(default)]
    pub headers: Vec<MessageHeader>,
    pub ehlo: Option<String>,
    pub mail_from: Option<String>,
    #[serde(default)]
    pub rcpt_to: Vec<MessageAddress>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageHeader {
    pub field: String,
    pub value: String,
}

/// Message summaries, most recently received first.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MessageListResult {
    #[serde(default)]
    pub items: Vec<MessageSummary>,
}

/// Lightweight view of a message used by list and search.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub from: Vec<MessageAddress>,
    #[serde(default)]
    pub to: Vec<MessageAddress>,
    #[serde(default)]
    pub cc: Vec<MessageAddress>,
    #[serde(default)]
    pub bcc: Vec<MessageAddress>,
    #[serde(with = "datetime")]
    pub received: DateTime<Utc>,
    #[serde(default)]
    pub subject: String,
    /// Snippet taken from the body.
    #[serde(default)]
    pub summary: String,
    pub server: String,
    /// Number of attachments.
    pub attachments: Option<u32>,
}

/// How multiple search filters combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SearchMatchOperator {
    /// Every supplied filter must match.
    #[default]
    #[serde(rename = "ALL")]
    All,
    /// At least one supplied filter must match.
    #[serde(rename = "ANY")]
    Any,
}

/// Filters for finding messages.
///
/// Unset filters are left out of the request. The server rejects a search
/// with no filters at all.
///
/// # Examples
/// ```
/// use mailosaur_client::{SearchCriteria, SearchMatchOperator};
///
/// let criteria = SearchCriteria::new()
///     .sent_to("someone@abcd1234.mailosaur.net")
///     .subject("Reset your password")
///     .match_operator(SearchMatchOperator::All);
/// assert_eq!(criteria.subject.as_deref(), Some("Reset your password"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    /// Full address the message was sent from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_from: Option<String>,
    /// Full address the message was sent to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_to: Option<String>,
    /// Text to find in the subject line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Text to find in the HTML or text body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(rename = "match")]
    pub match_operator: SearchMatchOperator,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_from(mut self, address: impl Into<String>) -> Self {
        self.sent_from = Some(address.into());
        self
    }

    pub fn sent_to(mut self, address: impl Into<String>) -> Self {
        self.sent_to = Some(address.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn match_operator(mut self, match_operator: SearchMatchOperator) -> Self {
        self.match_operator = match_operator;
        self
    }
}

impl fmt::Display for SearchCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filters = [
            ("sentFrom", &self.sent_from),
            ("sentTo", &self.sent_to),
            ("subject", &self.subject),
            ("body", &self.body),
        ];
        for (name, value) in filters {
            if let Some(value) = value {
                write!(f, "{name}: {value:?}, ")?;
            }
        }
        let operator = match self.match_operator {
            SearchMatchOperator::All => "ALL",
            SearchMatchOperator::Any => "ANY",
        };
        write!(f, "match: {operator}")
    }
}

/// Options for creating (and optionally sending) a new message.
///
/// Supply either `text` or `html`, not both.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageCreateOptions {
    /// Recipient; must be a verified address when `send` is true.
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    /// Send the message upon creation.
    pub send: bool,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<AttachmentOptions>>,
}

/// Options for forwarding a message. Supply either `text` or `html`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageForwardOptions {
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

/// Options for replying to a message. Supply either `text` or `html`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageReplyOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<AttachmentOptions>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn criteria_omit_unset_filters() {
        let criteria = SearchCriteria::new()
            .subject("abc")
            .match_operator(SearchMatchOperator::Any);
        assert_eq!(
            serde_json::to_value(&criteria).unwrap(),
            json!({ "subject": "abc", "match": "ANY" })
        );
        assert_eq!(
            serde_json::to_value(SearchCriteria::new()).unwrap(),
            json!({ "match": "ALL" })
        );
    }

    #[test]
    fn criteria_display_lists_set_filters() {
        let criteria = SearchCriteria::new().sent_to("a@b.test");
        assert_eq!(criteria.to_string(), r#"sentTo: "a@b.test", match: ALL"#);
    }

    #[test]
    fn sms_summary_decodes_with_missing_optional_fields() {
        let summary: MessageSummary = serde_json::from_value(json!({
            "id": "m1",
            "type": "SMS",
            "from": [{ "phone": "+15550001111" }],
            "to": [{ "phone": "+15550002222" }],
            "received": "2024-05-01T10:20:30Z",
            "summary": "Your code is 123456",
            "server": "abcd1234"
        }))
        .unwrap();
        assert_eq!(summary.kind, "SMS");
        assert_eq!(summary.from[0].phone.as_deref(), Some("+15550001111"));
        assert!(summary.cc.is_empty());
        assert_eq!(summary.attachments, None);
    }

    #[test]
    fn saved_summary_keeps_wire_names_and_received_time() {
        let summary: MessageSummary = serde_json::from_value(json!({
            "id": "m1",
            "type": "Email",
            "received": "2024-05-01T10:20:30.456Z",
            "subject": "Hi",
            "server": "abcd1234"
        }))
        .unwrap();

        let saved = serde_json::to_value(&summary).unwrap();
        assert_eq!(saved["type"], "Email");
        assert_eq!(saved["received"], "2024-05-01T10:20:30.456Z");

        let reloaded: MessageSummary = serde_json::from_value(saved).unwrap();
        assert_eq!(reloaded.received, summary.received);
    }
}
