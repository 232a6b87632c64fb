//! # Mailosaur Client
//! Asynchronous wrapper around the Mailosaur email and SMS testing API: manage virtual inboxes ("servers"), find and inspect received messages, download attachments and raw MIME, run spam and deliverability analysis, and render previews of an email in real email clients, using [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust developers writing end-to-end tests that need to assert on email or SMS a system sends: configure with [`ClientBuilder`], trigger your product's email, wait for it with [`Messages::get`], then check its content, links and codes.
//!
//! ## Waiting for asynchronous results
//! Search and preview downloads poll the API until the result is ready, following the delay schedule the server sends in the `x-ms-delay` header. The loop lives in [`poll`] and can be reused for other waits. Polling sleeps with Tokio timers, so dropping a pending call cancels it cleanly.
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`. Logging goes through `tracing`; install a subscriber in your application to see request and polling events.
//!
//! ## Errors
//! API error statuses surface as [`Error::Server`] with a readable message, transport failures as [`Error::Request`], and body shape problems as [`Error::Json`] or [`Error::InvalidResponse`]. Polling timeouts are [`Error::Generic`]. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Example
//! ```no_run
//! use mailosaur_client::{Client, GetOptions, SearchCriteria};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mailosaur_client::Error> {
//!     let client = Client::from_env()?;
//!     let server = "abcd1234";
//!     let address = client.servers().generate_email_address(server);
//!     println!("Send your test email to {address}");
//!
//!     let criteria = SearchCriteria::new().sent_to(&address);
//!     let message = client.messages().get(server, &criteria, GetOptions::default()).await?;
//!     println!("Subject: {}", message.subject);
//!
//!     client.messages().delete(&message.id).await?;
//!     Ok(())
//! }
//! ```

mod client;
mod decode;
mod error;
mod models;
pub mod poll;
mod resources;

pub use client::{Client, ClientBuilder};
pub use error::Error;
pub use models::*;
pub use resources::{
    Analysis, Devices, Files, GetOptions, ListOptions, Messages, PREVIEW_TIMEOUT_MS, Previews,
    SearchOptions, Servers, Usage,
};

/// Result type alias for Mailosaur operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
