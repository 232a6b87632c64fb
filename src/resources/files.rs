use crate::client::RequestKind;
use crate::decode;
use crate::poll::{Attempt, PollPolicy, poll_until_ready};
use crate::{Client, Error, Result};
use reqwest::{Method, StatusCode};

/// How long [`Files::get_preview`] waits for a preview to render.
pub const PREVIEW_TIMEOUT_MS: u64 = 120_000;

/// File downloads. Obtain with [`Client::files`].
#[derive(Debug, Clone, Copy)]
pub struct Files<'a> {
    client: &'a Client,
}

impl<'a> Files<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Download an attachment.
    pub async fn get_attachment(&self, id: &str) -> Result<Vec<u8>> {
        self.client
            .get_bytes(&format!("api/files/attachments/{id}"))
            .await
    }

    /// Download the raw EML (MIME) source of an email.
    pub async fn get_email(&self, id: &str) -> Result<Vec<u8>> {
        self.client.get_bytes(&format!("api/files/email/{id}")).await
    }

    /// Download a preview screenshot, waiting for it to finish rendering.
    ///
    /// The server answers `202 Accepted` while rendering; the download is
    /// retried on its delay schedule for up to [`PREVIEW_TIMEOUT_MS`]. Any status
    /// other than `200` or `202` aborts immediately.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailosaur_client::{Client, PreviewRequestOptions};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailosaur_client::Error> {
    /// let client = Client::new("your-api-key")?;
    /// let options = PreviewRequestOptions::new(["iphone-16plus-applemail-lightmode-portrait"]);
    /// let previews = client.messages().generate_previews("message-id", &options).await?;
    /// let png = client.files().get_preview(&previews.items[0].id).await?;
    /// std::fs::write("preview.png", png).ok();
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_preview(&self, id: &str) -> Result<Vec<u8>> {
        let path = format!("api/files/screenshots/{id}");
        let client = self.client;
        let path = path.as_str();

        let attempt = move || async move {
            let response = client
                .send(Method::GET, path, RequestKind::Binary, &[])
                .await?;
            match response.status {
                StatusCode::OK if response.body.is_empty() => Err(Error::InvalidResponse(
                    "preview download returned no data".into(),
                )),
                StatusCode::OK => Ok(Attempt::Ready(response.body)),
                StatusCode::ACCEPTED => Ok(Attempt::Pending {
                    partial: Vec::new(),
                    delays: decode::delay_schedule(&response.headers),
                }),
                status => Err(Error::Server(format!(
                    "Unexpected status code: {}",
                    status.as_u16()
                ))),
            }
        };

        poll_until_ready(PollPolicy::from_millis(PREVIEW_TIMEOUT_MS), attempt, || {
            Error::Generic(format!(
                "An email preview was not generated in time. The email client may not be \
                 available, or the preview ID [{id}] may be incorrect."
            ))
        })
        .await
    }
}
