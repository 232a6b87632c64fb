use crate::client::RequestKind;
use crate::decode::{self, WithDelay};
use crate::models::{
    Message, MessageCreateOptions, MessageForwardOptions, MessageListResult, MessageReplyOptions,
    PreviewListResult, PreviewRequestOptions, SearchCriteria,
};
use crate::poll::{Attempt, PollPolicy, poll_until_ready};
use crate::{Client, Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Method;
use std::time::Duration;
use tracing::{debug, instrument};

/// Server ids are always eight characters long.
const SERVER_ID_LEN: usize = 8;

/// Timeout used by [`Messages::get`] unless overridden.
const DEFAULT_GET_TIMEOUT_MS: u64 = 10_000;

/// Paging and filtering for [`Messages::list`].
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub page: Option<u32>,
    pub items_per_page: Option<u32>,
    /// Only include messages received after this instant.
    pub received_after: Option<DateTime<Utc>>,
    /// Sort direction, `asc` or `desc`.
    pub dir: Option<String>,
}

impl ListOptions {
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn items_per_page(mut self, items_per_page: u32) -> Self {
        self.items_per_page = Some(items_per_page);
        self
    }

    pub fn received_after(mut self, received_after: DateTime<Utc>) -> Self {
        self.received_after = Some(received_after);
        self
    }

    pub fn dir(mut self, dir: impl Into<String>) -> Self {
        self.dir = Some(dir.into());
        self
    }
}

/// Paging, filtering and polling for [`Messages::search`].
///
/// # Examples
/// ```
/// use mailosaur_client::SearchOptions;
///
/// // Wait up to ten seconds, then return whatever was found.
/// let options = SearchOptions::default().timeout(10_000).error_on_timeout(false);
/// assert_eq!(options.timeout_ms, 10_000);
/// ```
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub page: Option<u32>,
    pub items_per_page: Option<u32>,
    /// How long to wait for a match, in milliseconds. `0` searches once.
    pub timeout_ms: u64,
    pub received_after: Option<DateTime<Utc>>,
    /// Fail when nothing is found in time (default). When `false`, an empty
    /// result is returned instead.
    pub error_on_timeout: bool,
    pub dir: Option<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            page: None,
            items_per_page: None,
            timeout_ms: 0,
            received_after: None,
            error_on_timeout: true,
            dir: None,
        }
    }
}

impl SearchOptions {
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn items_per_page(mut self, items_per_page: u32) -> Self {
        self.items_per_page = Some(items_per_page);
        self
    }

    pub fn timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn received_after(mut self, received_after: DateTime<Utc>) -> Self {
        self.received_after = Some(received_after);
        self
    }

    pub fn error_on_timeout(mut self, error_on_timeout: bool) -> Self {
        self.error_on_timeout = error_on_timeout;
        self
    }

    pub fn dir(mut self, dir: impl Into<String>) -> Self {
        self.dir = Some(dir.into());
        self
    }
}

/// Options for [`Messages::get`].
///
/// The timeout defaults to ten seconds. A one second budget would only allow a
/// single search before the first one second wait runs past it, so a message
/// still being indexed would never be found.
#[derive(Debug, Clone)]
pub struct GetOptions {
    /// How long to wait for a match, in milliseconds.
    pub timeout_ms: u64,
    /// Defaults to one hour before the call.
    pub received_after: Option<DateTime<Utc>>,
}

impl Default for GetOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_GET_TIMEOUT_MS,
            received_after: None,
        }
    }
}

impl GetOptions {
    pub fn timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn received_after(mut self, received_after: DateTime<Utc>) -> Self {
        self.received_after = Some(received_after);
        self
    }
}

/// Message operations. Obtain with [`Client::messages`].
#[derive(Debug, Clone, Copy)]
pub struct Messages<'a> {
    client: &'a Client,
}

impl<'a> Messages<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Wait for a message matching `criteria` and return it in full.
    ///
    /// Searches for a single match (polling for up to `options.timeout_ms`),
    /// then fetches that message by id.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailosaur_client::{Client, GetOptions, SearchCriteria};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailosaur_client::Error> {
    /// let client = Client::new("your-api-key")?;
    /// let criteria = SearchCriteria::new().sent_to("signup@abcd1234.mailosaur.net");
    /// let message = client.messages().get("abcd1234", &criteria, GetOptions::default()).await?;
    /// for code in &message.html.codes {
    ///     println!("code: {}", code.value);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get(
        &self,
        server: &str,
        criteria: &SearchCriteria,
        options: GetOptions,
    ) -> Result<Message> {
        if server.chars().count() != SERVER_ID_LEN {
            return Err(Error::Generic("Must provide a valid Server ID.".into()));
        }

        let received_after = options
            .received_after
            .unwrap_or_else(|| Utc::now() - chrono::Duration::hours(1));
        let search = SearchOptions::default()
            .page(0)
            .items_per_page(1)
            .timeout(options.timeout_ms)
            .received_after(received_after);

        let result = self.search(server, criteria, search).await?;
        let summary = result.items.first().ok_or_else(|| {
            Error::Generic(format!("No message matching [{criteria}] was found."))
        })?;
        self.get_by_id(&summary.id).await
    }

    /// Retrieve a single message by id.
    pub async fn get_by_id(&self, id: &str) -> Result<Message> {
        self.client.get_json(&format!("api/messages/{id}"), &[]).await
    }

    /// Permanently delete a message and its attachments.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .send_empty(Method::DELETE, &format!("api/messages/{id}"), &[])
            .await
    }

    /// List message summaries in a server, most recent first.
    pub async fn list(&self, server: &str, options: ListOptions) -> Result<MessageListResult> {
        let query = list_query(
            server,
            options.page,
            options.items_per_page,
            options.received_after,
            options.dir.as_deref(),
        );
        self.client.get_json("api/messages", &query).await
    }

    /// Permanently delete every message in a server.
    pub async fn delete_all(&self, server: &str) -> Result<()> {
        self.client
            .send_empty(Method::DELETE, "api/messages", &[("server", server.to_string())])
            .await
    }

    /// Search a server for messages matching `criteria`.
    ///
    /// With a non-zero `options.timeout_ms` the search is repeated, following
    /// the server's delay schedule, until at least one message matches. Running
    /// out of time is an [`Error::Generic`] unless `error_on_timeout` is off, in
    /// which case the empty result is returned.
    #[instrument(skip(self, criteria, options))]
    pub async fn search(
        &self,
        server: &str,
        criteria: &SearchCriteria,
        options: SearchOptions,
    ) -> Result<MessageListResult> {
        let query = list_query(
            server,
            options.page,
            options.items_per_page,
            options.received_after,
            options.dir.as_deref(),
        );
        let policy = PollPolicy {
            timeout: Duration::from_millis(options.timeout_ms),
            error_on_timeout: options.error_on_timeout,
        };

        let client = self.client;
        let query = query.as_slice();
        let attempt = move || async move {
            let response = client
                .execute(
                    Method::POST,
                    "api/messages/search",
                    RequestKind::Json,
                    query,
                    Some(criteria),
                )
                .await?;
            let WithDelay { value, delays } =
                decode::json_with_delay::<MessageListResult>(&response)?;

            if value.items.is_empty() {
                Ok(Attempt::Pending {
                    partial: value,
                    delays,
                })
            } else {
                debug!(matches = value.items.len(), "search matched");
                Ok(Attempt::Ready(value))
            }
        };

        poll_until_ready(policy, attempt, || {
            Error::Generic(format!(
                "No matching messages found in time. By default, only messages received in the \
                 last hour are checked (use receivedAfter to override this). The search criteria \
                 used for this query was [{criteria}] which timed out after {}ms",
                options.timeout_ms
            ))
        })
        .await
    }

    /// Create a message, optionally sending it to a verified address.
    pub async fn create(&self, server: &str, options: &MessageCreateOptions) -> Result<Message> {
        self.client
            .send_json(
                Method::POST,
                "api/messages",
                &[("server", server.to_string())],
                options,
            )
            .await
    }

    /// Forward a message to a verified address.
    pub async fn forward(&self, id: &str, options: &MessageForwardOptions) -> Result<Message> {
        self.client
            .send_json(Method::POST, &format!("api/messages/{id}/forward"), &[], options)
            .await
    }

    /// Reply to a message, as if the recipient had answered it.
    pub async fn reply(&self, id: &str, options: &MessageReplyOptions) -> Result<Message> {
        self.client
            .send_json(Method::POST, &format!("api/messages/{id}/reply"), &[], options)
            .await
    }

    /// Start rendering previews of a message in the given email clients.
    ///
    /// Download each one with [`Files::get_preview`](crate::Files::get_preview).
    pub async fn generate_previews(
        &self,
        id: &str,
        options: &PreviewRequestOptions,
    ) -> Result<PreviewListResult> {
        self.client
            .send_json(
                Method::POST,
                &format!("api/messages/{id}/screenshots"),
                &[],
                options,
            )
            .await
    }
}

fn list_query(
    server: &str,
    page: Option<u32>,
    items_per_page: Option<u32>,
    received_after: Option<DateTime<Utc>>,
    dir: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut query = vec![("server", server.to_string())];
    if let Some(page) = page {
        query.push(("page", page.to_string()));
    }
    if let Some(items_per_page) = items_per_page {
        query.push(("itemsPerPage", items_per_page.to_string()));
    }
    if let Some(received_after) = received_after {
        query.push((
            "receivedAfter",
            received_after.to_rfc3339_opts(SecondsFormat::Secs, true),
        ));
    }
    if let Some(dir) = dir {
        query.push(("dir", dir.to_string()));
    }
    query
}
