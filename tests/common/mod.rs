#![allow(dead_code)]

use httpmock::MockServer;
use mailosaur_client::Client;
use serde_json::{Value, json};

pub const API_KEY: &str = "test-key";
/// `Basic base64("test-key:")`
pub const AUTHORIZATION: &str = "Basic dGVzdC1rZXk6";
pub const SERVER_ID: &str = "abcd1234";

pub fn client(server: &MockServer) -> Client {
    Client::builder()
        .api_key(API_KEY)
        .base_url(server.base_url())
        .build()
        .expect("client builds")
}

pub fn summary(id: &str, subject: &str) -> Value {
    json!({
        "id": id,
        "type": "Email",
        "from": [{ "name": "Sender", "email": "sender@example.test" }],
        "to": [{ "name": "Receiver", "email": format!("receiver@{SERVER_ID}.mailosaur.net") }],
        "cc": [],
        "bcc": [],
        "received": "2024-05-01T10:20:30.456Z",
        "subject": subject,
        "summary": "this is a test",
        "server": SERVER_ID,
        "attachments": 2
    })
}

pub fn message(id: &str, subject: &str) -> Value {
    json!({
        "id": id,
        "type": "Email",
        "from": [{ "name": "Sender", "email": "sender@example.test" }],
        "to": [{ "name": "Receiver", "email": format!("receiver@{SERVER_ID}.mailosaur.net") }],
        "cc": [],
        "bcc": [],
        "received": "2024-05-01T10:20:30Z",
        "subject": subject,
        "html": {
            "links": [
                { "href": "https://mailosaur.com/", "text": "mailosaur" },
                { "href": "http://invalid/", "text": null }
            ],
            "codes": [{ "value": "123456" }],
            "images": [{ "src": "cid:ii_1435fadb31d523f6", "alt": "Inline image 1" }],
            "body": "<div dir=\"ltr\">this is a test</div>"
        },
        "text": {
            "links": [{ "href": "https://mailosaur.com/", "text": "https://mailosaur.com/" }],
            "codes": [{ "value": "654321" }],
            "body": "this is a test"
        },
        "attachments": [{
            "id": "att-1",
            "contentType": "image/png",
            "fileName": "cat.png",
            "contentId": "ii_1435fadb31d523f6",
            "length": 82138,
            "url": "https://mailosaur.com/api/files/attachments/att-1"
        }],
        "metadata": {
            "headers": [{ "field": "Subject", "value": subject }],
            "ehlo": "[127.0.0.1]",
            "mailFrom": "sender@example.test",
            "rcptTo": [{ "email": format!("receiver@{SERVER_ID}.mailosaur.net") }]
        },
        "server": SERVER_ID
    })
}
