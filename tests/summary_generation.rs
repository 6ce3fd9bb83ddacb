//! Integration tests for applicant summary generation

use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wfh_apply::config::{SubmissionConfig, SummaryConfig};
use wfh_apply::wizard::session::SUMMARY_FAILED_ALERT;
use wfh_apply::{
    AlertCenter, Field, GenerativeClient, Phase, Progress, Session, Step, SummaryError,
    WebhookClient,
};

const GENERATE_PATH: &str = "/models/gemini-test:generateContent";

fn session_for(server: &MockServer) -> Session {
    let webhook = WebhookClient::new(&SubmissionConfig {
        webhook_url: server.url("/hook"),
        timeout_secs: 5,
    })
    .unwrap();
    let generator = GenerativeClient::new(SummaryConfig {
        api_base: server.base_url(),
        api_key: "test-key".to_string(),
        model: "gemini-test".to_string(),
        timeout_secs: 5,
    })
    .unwrap();
    Session::new(Arc::new(webhook), AlertCenter::new(Duration::from_secs(3)))
        .with_summary_gateway(Arc::new(generator))
}

async fn fill(session: &Session, answers: &[(Field, &str)]) {
    session.advance().await.unwrap();
    for (field, value) in answers {
        session.edit(*field, *value).unwrap();
        if *field != Field::Qualification {
            session.advance().await.unwrap();
        }
    }
}

const COMPLETE: [(Field, &str); 7] = [
    (Field::Name, "Kofi Boateng"),
    (Field::Email, "kofi@example.com"),
    (Field::Phone, "0244123456"),
    (Field::Gender, "male"),
    (Field::Country, "ghana"),
    (Field::City, "Tamale"),
    (Field::Qualification, "phd"),
];

#[tokio::test]
async fn test_summary_not_offered_before_required_fields() {
    let server = MockServer::start_async().await;
    let session = session_for(&server);
    fill(&session, &COMPLETE[..2]).await;

    assert!(!session.summary_ready());
    assert!(matches!(
        session.generate_summary().await,
        Err(SummaryError::NotReady)
    ));
}

#[tokio::test]
async fn test_summary_uses_first_candidate() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(GENERATE_PATH)
                .body_contains("Kofi Boateng")
                .body_contains("Ph.D. or Doctorate")
                .body_contains("150 words");
            then.status(200).json_body(json!({
                "candidates": [
                    {"content": {"parts": [{"text": "Kofi holds a doctorate."}]}},
                    {"content": {"parts": [{"text": "Ignored."}]}}
                ]
            }));
        })
        .await;

    let session = session_for(&server);
    fill(&session, &COMPLETE).await;
    let before = session.wizard();

    let text = session.generate_summary().await.unwrap();
    assert_eq!(text, "Kofi holds a doctorate.");
    mock.assert_async().await;

    let after = session.wizard();
    assert_eq!(after.step(), before.step());
    assert_eq!(after.answers(), before.answers());
}

#[tokio::test]
async fn test_malformed_summary_raises_alert() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(GENERATE_PATH);
            then.status(200).json_body(json!({"promptFeedback": {}}));
        })
        .await;

    let session = session_for(&server);
    fill(&session, &COMPLETE).await;

    assert!(matches!(
        session.generate_summary().await,
        Err(SummaryError::Gateway(_))
    ));
    assert_eq!(session.alerts().active()[0].message, SUMMARY_FAILED_ALERT);
    assert_eq!(session.wizard().step(), Some(Step::Qualification));

    // Not stuck busy after a failure
    assert!(session.summary_ready());
}

#[tokio::test]
async fn test_summary_and_submission_overlap() {
    let server = MockServer::start_async().await;
    let hook = server
        .mock_async(|when, then| {
            when.method(POST).path("/hook");
            then.status(200).delay(Duration::from_millis(50));
        })
        .await;
    let generate = server
        .mock_async(|when, then| {
            when.method(POST).path(GENERATE_PATH);
            then.status(200)
                .delay(Duration::from_millis(50))
                .json_body(json!({
                    "candidates": [{"content": {"parts": [{"text": "Summary."}]}}]
                }));
        })
        .await;

    let session = session_for(&server);
    fill(&session, &COMPLETE).await;

    let (submitted, summary) = tokio::join!(session.advance(), session.generate_summary());

    assert!(matches!(submitted.unwrap(), Progress::Submitted));
    assert_eq!(summary.unwrap(), "Summary.");
    assert_eq!(session.wizard().phase(), Phase::Done);
    hook.assert_async().await;
    generate.assert_async().await;
}
