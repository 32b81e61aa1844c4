//! Tests for top command

use httpmock::prelude::*;
use serde_json::json;

use youtube_tally::commands::top::run_with_client;
use youtube_tally::crawl::CancelToken;
use youtube_tally::Error;

use crate::{test_client, test_config, thread_item};

#[tokio::test]
async fn test_top_completes_against_mock_server() {
    let server = MockServer::start_async().await;

    let mock = server.mock(|when, then| {
        when.method(GET).path("/commentThreads");
        then.status(200).json_body(json!({
            "items": [
                thread_item("t1", "Alice"),
                thread_item("t2", "Bob"),
                thread_item("t3", "Alice")
            ]
        }));
    });

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("unused.json");
    let config = test_config("UCabc", output.clone());

    run_with_client(
        &test_client(&server),
        &config,
        None,
        5,
        None,
        &CancelToken::new(),
    )
    .await
    .unwrap();

    mock.assert_calls(1);
    // The top command never writes the report file.
    assert!(!output.exists());
}

#[tokio::test]
async fn test_top_channel_override() {
    let server = MockServer::start_async().await;

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/commentThreads")
            .query_param("allThreadsRelatedToChannelId", "UCother");
        then.status(200).json_body(json!({ "items": [] }));
    });

    let dir = tempfile::tempdir().unwrap();
    let config = test_config("UCconfig", dir.path().join("unused.json"));

    run_with_client(
        &test_client(&server),
        &config,
        Some("UCother"),
        10,
        None,
        &CancelToken::new(),
    )
    .await
    .unwrap();

    mock.assert_calls(1);
}

#[tokio::test]
async fn test_top_missing_channel_is_config_error() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config("", dir.path().join("unused.json"));

    let err = run_with_client(
        &test_client(&server),
        &config,
        None,
        10,
        None,
        &CancelToken::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::ConfigError(_)));
}
