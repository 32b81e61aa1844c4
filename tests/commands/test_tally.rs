//! Tests for tally command

use httpmock::prelude::*;
use serde_json::json;

use youtube_tally::commands::tally::{run_with_client, TallyOptions};
use youtube_tally::crawl::CancelToken;
use youtube_tally::{Error, YouTubeClient};

use crate::{test_client, test_config, thread_item};

#[tokio::test]
async fn test_tally_writes_sorted_report() {
    let server = MockServer::start_async().await;

    server.mock(|when, then| {
        when.method(GET)
            .path("/commentThreads")
            .query_param_missing("pageToken");
        then.status(200).json_body(json!({
            "items": [
                thread_item("t1", "Alice"),
                thread_item("t2", "Bob"),
                thread_item("t3", "Bob")
            ],
            "nextPageToken": "P2"
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/commentThreads")
            .query_param("pageToken", "P2");
        then.status(200).json_body(json!({
            "items": [thread_item("t4", "日本語")]
        }));
    });

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("subs.json");
    let config = test_config("UCabc", output.clone());

    let summary = run_with_client(
        &test_client(&server),
        &config,
        TallyOptions::default(),
        &CancelToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(summary.pages, 2);
    assert_eq!(summary.processed, 4);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.unique_authors, 3);
    assert!(!summary.truncated);
    assert_eq!(summary.output_path, output);

    let written = std::fs::read_to_string(&output).unwrap();
    // Bob leads with 2; Alice and 日本語 tie on 1 in first-seen order.
    let expected = "{\n    \"Bob\": 2,\n    \"Alice\": 1,\n    \"日本語\": 1\n}";
    assert_eq!(written, expected);
}

#[tokio::test]
async fn test_tally_output_override_wins() {
    let server = MockServer::start_async().await;

    server.mock(|when, then| {
        when.method(GET).path("/commentThreads");
        then.status(200)
            .json_body(json!({ "items": [thread_item("t1", "Alice")] }));
    });

    let dir = tempfile::tempdir().unwrap();
    let config_output = dir.path().join("from_config.json");
    let override_output = dir.path().join("from_flag.json");
    let config = test_config("UCabc", config_output.clone());

    let options = TallyOptions {
        output: Some(override_output.clone()),
        ..Default::default()
    };
    let summary = run_with_client(
        &test_client(&server),
        &config,
        options,
        &CancelToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(summary.output_path, override_output);
    assert!(override_output.exists());
    assert!(!config_output.exists());
}

#[tokio::test]
async fn test_tally_cancelled_run_still_writes_partial_report() {
    let server = MockServer::start_async().await;

    let mock = server.mock(|when, then| {
        when.method(GET).path("/commentThreads");
        then.status(200).json_body(json!({ "items": [] }));
    });

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("partial.json");
    let config = test_config("UCabc", output.clone());

    let cancel = CancelToken::new();
    cancel.cancel();

    let summary = run_with_client(&test_client(&server), &config, TallyOptions::default(), &cancel)
        .await
        .unwrap();

    mock.assert_calls(0);
    assert!(summary.truncated);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "{}");
}

#[tokio::test]
async fn test_tally_max_pages_from_options() {
    let server = MockServer::start_async().await;

    let mock = server.mock(|when, then| {
        when.method(GET).path("/commentThreads");
        then.status(200).json_body(json!({
            "items": [thread_item("t1", "Alice")],
            "nextPageToken": "MORE"
        }));
    });

    let dir = tempfile::tempdir().unwrap();
    let config = test_config("UCabc", dir.path().join("out.json"));

    let options = TallyOptions {
        max_pages: Some(1),
        ..Default::default()
    };
    let summary = run_with_client(
        &test_client(&server),
        &config,
        options,
        &CancelToken::new(),
    )
    .await
    .unwrap();

    mock.assert_calls(1);
    assert_eq!(summary.pages, 1);
    assert!(summary.truncated);
}

#[tokio::test]
async fn test_tally_missing_channel_is_config_error() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config("", dir.path().join("out.json"));

    let err = run_with_client(
        &test_client(&server),
        &config,
        TallyOptions::default(),
        &CancelToken::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::ConfigError(_)));
}

#[tokio::test]
async fn test_tally_api_error_leaves_no_output() {
    let server = MockServer::start_async().await;

    server.mock(|when, then| {
        when.method(GET).path("/commentThreads");
        then.status(403)
            .json_body(json!({"error": {"code": 403, "message": "quotaExceeded"}}));
    });

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("never.json");
    let config = test_config("UCabc", output.clone());

    let err = run_with_client(
        &test_client(&server),
        &config,
        TallyOptions::default(),
        &CancelToken::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::ApiError(_)));
    assert!(!output.exists());
}

#[test]
fn test_run_requires_api_key() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config("UCabc", dir.path().join("out.json"));
    config.api_key = String::new();

    let err = YouTubeClient::new(&config.api_key).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert!(config.require_api_key().is_err());
}
