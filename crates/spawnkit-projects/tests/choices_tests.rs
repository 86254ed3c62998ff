//! Integration tests for choice loading
//!
//! Tests cover:
//! - Remote sources served by wiremock (success, HTTP errors, bad payloads)
//! - Local files resolved against the loader's base directory
//! - Aggregated validation errors

mod common;

use common::*;
use serde_json::json;
use spawnkit_projects::{ChoiceLoader, ChoiceSource, Error};
use std::fs;
use tempfile::TempDir;
use wiremock::MockServer;

fn loader(tmp: &TempDir) -> ChoiceLoader {
    ChoiceLoader::new(utf8_dir(tmp)).unwrap()
}

#[tokio::test]
async fn test_remote_choices_keep_order_and_normalize_after() {
    let server = MockServer::start().await;
    mock_choices(
        &server,
        json!([
            { "title": "A", "preset": "a", "repo": "https://github.com/x/y", "after": "npm run dev" },
            { "title": "B", "preset": "b", "repo": "https://github.com/x/z", "after": [1, "make", null] },
            { "title": "C", "preset": "c", "repo": "https://github.com/x/w" }
        ]),
    )
    .await;

    let tmp = TempDir::new().unwrap();
    let choices = loader(&tmp)
        .load(ChoiceSource::parse(choices_url(&server)))
        .await
        .unwrap();

    let presets: Vec<&str> = choices.iter().map(|c| c.preset()).collect();
    assert_eq!(presets, vec!["a", "b", "c"]);
    assert_eq!(choices[0].after(), ["npm run dev".to_string()]);
    assert_eq!(choices[1].after(), ["make".to_string()]);
    assert!(choices[2].after().is_empty());
}

#[tokio::test]
async fn test_remote_404_names_the_status() {
    let server = MockServer::start().await;
    mock_choices_status(&server, 404).await;

    let tmp = TempDir::new().unwrap();
    let err = loader(&tmp)
        .load(ChoiceSource::parse(choices_url(&server)))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ChoicesHttpStatus { status: 404 }));
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_remote_non_array_payload_fails_to_parse() {
    let server = MockServer::start().await;
    mock_choices(&server, json!({ "kits": [] })).await;

    let tmp = TempDir::new().unwrap();
    let err = loader(&tmp)
        .load(ChoiceSource::parse(choices_url(&server)))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::JsonParse(_)));
}

#[tokio::test]
async fn test_missing_repo_is_reported_by_index() {
    let tmp = TempDir::new().unwrap();
    let source = ChoiceSource::Records(vec![json!({ "title": "A", "preset": "a" })]);

    let err = loader(&tmp).load(source).await.unwrap_err();
    let message = err.to_string();

    assert!(message.starts_with("Choices validation failed:"));
    assert!(message.contains("Entry #0 invalid"));
    assert!(message.contains("repo"));
}

#[tokio::test]
async fn test_every_invalid_entry_is_listed() {
    let tmp = TempDir::new().unwrap();
    let source = ChoiceSource::Records(vec![
        json!({ "title": "", "preset": "a", "repo": "https://github.com/x/y" }),
        json!({ "title": "B", "preset": "b", "repo": "https://github.com/x/y" }),
        json!({ "title": "C", "preset": "c", "repo": "https://gitlab.com/x/y", "extra": true }),
    ]);

    let Error::ChoicesValidation { errors } = loader(&tmp).load(source).await.unwrap_err() else {
        panic!("expected a validation error");
    };

    assert_eq!(errors.len(), 2);
    assert!(errors[0].starts_with("Entry #0 invalid"));
    assert!(errors[1].starts_with("Entry #2 invalid"));
    assert!(errors[1].contains("extra"));
}

#[tokio::test]
async fn test_local_file_is_resolved_against_base_dir() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("config")).unwrap();
    fs::write(
        tmp.path().join("config/kits.json"),
        r#"[{ "title": "Local", "preset": "local", "repo": "https://github.com/me/local" }]"#,
    )
    .unwrap();

    let choices = loader(&tmp)
        .load(ChoiceSource::parse("config/kits.json"))
        .await
        .unwrap();

    assert_eq!(choices.len(), 1);
    assert_eq!(choices[0].title(), "Local");
}

#[tokio::test]
async fn test_missing_local_file_names_resolved_path() {
    let tmp = TempDir::new().unwrap();

    let err = loader(&tmp)
        .load(ChoiceSource::parse("nope.json"))
        .await
        .unwrap_err();

    let expected = utf8_dir(&tmp).join("nope.json");
    assert!(matches!(err, Error::ChoicesFileNotFound { .. }));
    assert!(err.to_string().contains(expected.as_str()));
}

#[tokio::test]
async fn test_local_file_with_bad_json_fails_to_parse() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("kits.json"), "[{ not json").unwrap();

    let err = loader(&tmp)
        .load(ChoiceSource::parse("kits.json"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::JsonParse(_)));
}
