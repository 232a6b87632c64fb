//! Lists servers and waits for a message in one of them.
//!
//! Reads `MAILOSAUR_API_KEY`, `MAILOSAUR_SERVER` and optionally
//! `MAILOSAUR_BASE_URL` / `MAILOSAUR_SMTP_HOST`. Run with
//! `RUST_LOG=mailosaur_client=debug` to watch the polling.

use mailosaur_client::{Client, SearchCriteria, SearchOptions};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = Client::from_env()?;
    let server = std::env::var("MAILOSAUR_SERVER")?;

    for item in client.servers().list().await?.items {
        println!("{} ({}): {} messages", item.name, item.id, item.messages);
    }

    let address = client.servers().generate_email_address(&server);
    println!("Waiting 30s for a message to {address}");

    let criteria = SearchCriteria::new().sent_to(&address);
    let options = SearchOptions::default()
        .timeout(30_000)
        .error_on_timeout(false);
    let result = client.messages().search(&server, &criteria, options).await?;

    match result.items.first() {
        Some(summary) => {
            let message = client.messages().get_by_id(&summary.id).await?;
            println!("Subject: {}", message.subject);
            for link in &message.html.links {
                println!("Link: {}", link.href);
            }
        }
        None => println!("Nothing arrived"),
    }

    Ok(())
}
