// Fetch failure classification against a mock HTTP server.
use async_trait::async_trait;
use mockito::Server;
use rappel::client::{FetchError, Probe, ReminderClient};
use rappel::config::Config;
use rappel::model::ReminderEntry;
use std::sync::Arc;
use tokio::sync::watch;

/// A probe that always reports the network as reachable.
struct AlwaysOnline;

#[async_trait]
impl Probe for AlwaysOnline {
    async fn probe(&self) -> bool {
        true
    }
}

fn client_for(url: String) -> ReminderClient {
    let config = Config {
        url,
        ..Config::default()
    };
    let (_tx, rx) = watch::channel(false);
    ReminderClient::with_probe(&config, Arc::new(AlwaysOnline), rx).unwrap()
}

#[tokio::test]
async fn fetch_decodes_complete_document() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/reminders.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"day": 10, "message": "Pay rent"}, {"day": 15}]"#)
        .create_async()
        .await;

    let client = client_for(format!("{}/reminders.json", server.url()));
    let entries = client.fetch().await.unwrap();

    assert_eq!(
        entries,
        vec![
            ReminderEntry {
                day: Some(10),
                message: "Pay rent".to_string()
            },
            ReminderEntry {
                day: Some(15),
                message: String::new()
            },
        ]
    );
}

#[tokio::test]
async fn non_success_status_is_a_status_error() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/reminders.json")
        .with_status(404)
        .create_async()
        .await;

    let client = client_for(format!("{}/reminders.json", server.url()));
    let err = client.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Status(404)), "got {:?}", err);
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/reminders.json")
        .with_status(200)
        .with_body("certainly not json")
        .create_async()
        .await;

    let client = client_for(format!("{}/reminders.json", server.url()));
    let err = client.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn non_array_document_is_a_decode_error() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/reminders.json")
        .with_status(200)
        .with_body(r#"{"day": 10, "message": "not a list"}"#)
        .create_async()
        .await;

    let client = client_for(format!("{}/reminders.json", server.url()));
    let err = client.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn unreachable_server_is_a_connection_error() {
    // Bind a server to learn a free port, then shut it down again.
    let server = Server::new_async().await;
    let url = format!("{}/reminders.json", server.url());
    drop(server);

    let client = client_for(url);
    let err = client.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Connection(_)), "got {:?}", err);
}

#[tokio::test]
async fn empty_array_is_valid_data() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/reminders.json")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = client_for(format!("{}/reminders.json", server.url()));
    assert!(client.fetch().await.unwrap().is_empty());
}
