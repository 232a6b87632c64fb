mod common;

use chrono::{TimeZone, Utc};
use common::{SERVER_ID, client, message, summary};
use httpmock::prelude::*;
use mailosaur_client::{
    AttachmentOptions, Error, GetOptions, ListOptions, MessageCreateOptions,
    MessageForwardOptions, MessageReplyOptions, PreviewRequestOptions, SearchCriteria,
    SearchMatchOperator, SearchOptions,
};
use serde_json::json;
use std::time::{Duration, Instant};

#[tokio::test]
async fn list_passes_paging_and_date_filters() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/messages")
                .query_param("server", SERVER_ID)
                .query_param("page", "2")
                .query_param("itemsPerPage", "10")
                .query_param("receivedAfter", "2024-05-01T10:00:00Z")
                .query_param("dir", "asc");
            then.status(200)
                .json_body(json!({ "items": [summary("m1", "Hello"), summary("m2", "World")] }));
        })
        .await;

    let options = ListOptions::default()
        .page(2)
        .items_per_page(10)
        .received_after(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap())
        .dir("asc");
    let result = client(&server)
        .messages()
        .list(SERVER_ID, options)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(result.items.len(), 2);
    assert_eq!(result.items[0].subject, "Hello");
    assert_eq!(result.items[0].attachments, Some(2));
    assert_eq!(
        result.items[0].received,
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 20, 30).unwrap() + chrono::Duration::milliseconds(456)
    );
}

#[tokio::test]
async fn get_by_id_decodes_full_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/messages/m1");
            then.status(200).json_body(message("m1", "Hello"));
        })
        .await;

    let email = client(&server).messages().get_by_id("m1").await.unwrap();

    assert_eq!(email.kind, "Email");
    assert_eq!(email.html.links.len(), 2);
    assert_eq!(email.html.links[1].text, None);
    assert_eq!(email.html.codes[0].value, "123456");
    assert_eq!(email.text.codes[0].value, "654321");
    assert!(email.text.images.is_none());
    assert_eq!(email.attachments[0].length, Some(82138));
    assert_eq!(email.metadata.ehlo.as_deref(), Some("[127.0.0.1]"));
    assert_eq!(email.metadata.rcpt_to.len(), 1);
}

#[tokio::test]
async fn delete_and_delete_all() {
    let server = MockServer::start_async().await;
    let one = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/messages/m1");
            then.status(204);
        })
        .await;
    let all = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/api/messages")
                .query_param("server", SERVER_ID);
            then.status(204);
        })
        .await;

    let client = client(&server);
    client.messages().delete("m1").await.unwrap();
    client.messages().delete_all(SERVER_ID).await.unwrap();

    one.assert_async().await;
    all.assert_async().await;
}

#[tokio::test]
async fn search_without_timeout_makes_one_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/messages/search")
                .query_param("server", SERVER_ID)
                .json_body(json!({ "sentFrom": "neverfound@example.test", "match": "ALL" }));
            then.status(200)
                .header("x-ms-delay", "100")
                .json_body(json!({ "items": [] }));
        })
        .await;

    let criteria = SearchCriteria::new().sent_from("neverfound@example.test");
    let result = client(&server)
        .messages()
        .search(SERVER_ID, &criteria, SearchOptions::default())
        .await
        .unwrap();

    assert!(result.items.is_empty());
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn search_returns_first_match_immediately() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/messages/search")
                .json_body(json!({ "subject": "abc", "body": "link", "match": "ANY" }));
            then.status(200)
                .json_body(json!({ "items": [summary("m1", "abc")] }));
        })
        .await;

    let criteria = SearchCriteria::new()
        .subject("abc")
        .body("link")
        .match_operator(SearchMatchOperator::Any);
    let result = client(&server)
        .messages()
        .search(SERVER_ID, &criteria, SearchOptions::default().timeout(10_000))
        .await
        .unwrap();

    assert_eq!(result.items.len(), 1);
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn search_times_out_with_descriptive_error() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/messages/search");
            then.status(200)
                .header("x-ms-delay", "500")
                .json_body(json!({ "items": [] }));
        })
        .await;

    let criteria = SearchCriteria::new().subject("never");
    let started = Instant::now();
    let err = client(&server)
        .messages()
        .search(SERVER_ID, &criteria, SearchOptions::default().timeout(1200))
        .await
        .unwrap_err();

    let message = match err {
        Error::Generic(message) => message,
        other => panic!("expected a timeout error, got {other:?}"),
    };
    assert!(message.starts_with("No matching messages found in time."));
    assert!(message.contains(r#"subject: "never""#));
    assert!(message.contains("1200ms"));
    // attempts at ~0ms, ~500ms and ~1000ms; the next wait would pass 1200ms
    mock.assert_hits_async(3).await;
    assert!(started.elapsed() < Duration::from_millis(1700));
}

#[tokio::test]
async fn search_timeout_can_return_empty_result() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/messages/search");
            then.status(200)
                .header("x-ms-delay", "200")
                .json_body(json!({ "items": [] }));
        })
        .await;

    let options = SearchOptions::default().timeout(500).error_on_timeout(false);
    let result = client(&server)
        .messages()
        .search(SERVER_ID, &SearchCriteria::new().subject("x"), options)
        .await
        .unwrap();

    assert!(result.items.is_empty());
}

#[tokio::test]
async fn search_keeps_polling_until_message_arrives() {
    let server = MockServer::start_async().await;
    let empty = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/messages/search");
            then.status(200)
                .header("x-ms-delay", "50,1000")
                .json_body(json!({ "items": [] }));
        })
        .await;

    let client = client(&server);
    let criteria = SearchCriteria::new().subject("abc");
    let messages = client.messages();
    let search = messages.search(SERVER_ID, &criteria, SearchOptions::default().timeout(10_000));

    // Swap the empty answer for a match while the client waits on the 1000ms entry.
    let arrive = async {
        while empty.hits_async().await < 2 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        empty.delete_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/messages/search");
                then.status(200)
                    .json_body(json!({ "items": [summary("m9", "abc")] }));
            })
            .await
    };

    let (result, found) = tokio::join!(search, arrive);

    let result = result.unwrap();
    assert_eq!(result.items[0].id, "m9");
    found.assert_hits_async(1).await;
}

#[tokio::test]
async fn search_follows_the_latest_delay_header() {
    let server = MockServer::start_async().await;
    let first = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/messages/search");
            then.status(200)
                .header("x-ms-delay", "300")
                .json_body(json!({ "items": [] }));
        })
        .await;

    let client = client(&server);
    let criteria = SearchCriteria::new().subject("abc");
    let messages = client.messages();
    let started = Instant::now();
    let search = messages.search(SERVER_ID, &criteria, SearchOptions::default().timeout(2000));

    // After the first attempt the server asks for a much longer second wait.
    let slow_down = async {
        while first.hits_async().await < 1 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        first.delete_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/messages/search");
                then.status(200)
                    .header("x-ms-delay", "300,5000")
                    .json_body(json!({ "items": [] }));
            })
            .await
    };

    let (result, second) = tokio::join!(search, slow_down);

    assert!(matches!(result, Err(Error::Generic(_))));
    // The 5000ms entry from the second answer ends polling right away.
    second.assert_hits_async(1).await;
    assert!(started.elapsed() < Duration::from_millis(1500));
}

#[tokio::test]
async fn search_rejection_is_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/messages/search");
            then.status(400).json_body(json!({
                "status": 400,
                "errors": [{
                    "field": "criteria",
                    "detail": [{ "description": "Please provide at least one search criteria", "code": "required" }]
                }]
            }));
        })
        .await;

    let err = client(&server)
        .messages()
        .search(SERVER_ID, &SearchCriteria::new(), SearchOptions::default().timeout(5000))
        .await
        .unwrap_err();

    assert!(err.server_message().unwrap().starts_with("(criteria)"));
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn get_searches_one_item_then_fetches_it() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/messages/search")
                .query_param("server", SERVER_ID)
                .query_param("page", "0")
                .query_param("itemsPerPage", "1")
                .query_param_exists("receivedAfter");
            then.status(200)
                .json_body(json!({ "items": [summary("m1", "Welcome")] }));
        })
        .await;
    let fetch = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/messages/m1");
            then.status(200).json_body(message("m1", "Welcome"));
        })
        .await;

    let criteria = SearchCriteria::new().sent_to(format!("welcome@{SERVER_ID}.mailosaur.net"));
    let email = client(&server)
        .messages()
        .get(SERVER_ID, &criteria, GetOptions::default())
        .await
        .unwrap();

    assert_eq!(email.subject, "Welcome");
    search.assert_async().await;
    fetch.assert_async().await;
}

#[tokio::test]
async fn get_with_zero_timeout_and_no_match_is_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/messages/search");
            then.status(200).json_body(json!({ "items": [] }));
        })
        .await;

    let err = client(&server)
        .messages()
        .get(
            SERVER_ID,
            &SearchCriteria::new().subject("x"),
            GetOptions::default().timeout(0),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Generic(_)));
}

#[tokio::test]
async fn create_forward_and_reply_send_only_set_fields() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/messages")
                .query_param("server", SERVER_ID)
                .json_body(json!({
                    "to": "anything@verified.test",
                    "send": true,
                    "subject": "New message",
                    "text": "This is a new email",
                    "attachments": [{
                        "contentType": "image/png",
                        "fileName": "cat.png",
                        "content": "aGVsbG8="
                    }]
                }));
            then.status(200).json_body(message("new-1", "New message"));
        })
        .await;
    let forward = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/messages/m1/forward")
                .json_body(json!({ "to": "fwd@verified.test", "cc": "cc@verified.test", "html": "<p>Fwd</p>" }));
            then.status(200).json_body(message("fwd-1", "Fwd: Hello"));
        })
        .await;
    let reply = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/messages/m1/reply")
                .json_body(json!({ "text": "Reply message" }));
            then.status(200).json_body(message("re-1", "Re: Hello"));
        })
        .await;

    let client = client(&server);
    let messages = client.messages();

    let created = messages
        .create(
            SERVER_ID,
            &MessageCreateOptions {
                to: "anything@verified.test".into(),
                send: true,
                subject: "New message".into(),
                text: Some("This is a new email".into()),
                attachments: Some(vec![AttachmentOptions {
                    content_type: "image/png".into(),
                    file_name: "cat.png".into(),
                    content: "aGVsbG8=".into(),
                }]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(created.id, "new-1");

    let forwarded = messages
        .forward(
            "m1",
            &MessageForwardOptions {
                to: "fwd@verified.test".into(),
                cc: Some("cc@verified.test".into()),
                html: Some("<p>Fwd</p>".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(forwarded.subject, "Fwd: Hello");

    let replied = messages
        .reply(
            "m1",
            &MessageReplyOptions {
                text: Some("Reply message".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(replied.subject, "Re: Hello");

    create.assert_async().await;
    forward.assert_async().await;
    reply.assert_async().await;
}

#[tokio::test]
async fn generate_previews_posts_email_clients() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/messages/m1/screenshots")
                .json_body(json!({ "emailClients": ["iphone-16plus-applemail-lightmode-portrait"] }));
            then.status(200).json_body(json!({
                "items": [{ "id": "p1", "emailClient": "iphone-16plus-applemail-lightmode-portrait" }]
            }));
        })
        .await;

    let options = PreviewRequestOptions::new(["iphone-16plus-applemail-lightmode-portrait"]);
    let result = client(&server)
        .messages()
        .generate_previews("m1", &options)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(result.items[0].id, "p1");
    assert_eq!(result.items[0].disable_images, None);
}
