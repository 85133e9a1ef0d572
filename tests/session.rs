//! End-to-end tests for the interactive session.
//!
//! Drives the menus from an in-memory input buffer and checks the transcript
//! written to the output buffer.

use std::io::Cursor;

use serde_json::json;
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use infer_cli::{Config, Dispatcher, ProviderId, Session};

fn dispatcher_for(server: &MockServer) -> Dispatcher {
    let mut config = Config::default();
    for provider in ProviderId::MENU_ORDER {
        config.providers.get_mut(provider).base_url = Some(server.uri());
    }
    Dispatcher::with_client(config, reqwest::Client::new()).with_env_lookup(|name| match name {
        "GROQ_API_KEY" => Some("gsk_test".to_string()),
        _ => None,
    })
}

async fn run_session(input: &str, dispatcher: Dispatcher) -> String {
    let mut session = Session::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), dispatcher);
    session.run().await.expect("session should finish cleanly");
    let (_, output) = session.into_inner();
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn groq_query_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_json(json!({
            "model": "llama-3.3-70b-versatile",
            "messages": [{ "role": "user", "content": "ping" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": "pong" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    // provider 1 (groq), model 1, query, back to main menu, exit
    let out = run_session("1\n1\nping\n2\n5\n", dispatcher_for(&server)).await;

    assert!(out.contains("Using model: llama-3.3-70b-versatile\n"), "{}", out);
    assert!(out.contains("Enter search criteria: \nSearch Results:\n- pong\n"), "{}", out);
    assert!(out.contains("1. Enter another search for the same router/model\n"));
    assert_eq!(out.matches("Choose an AI Router:").count(), 2);
}

#[tokio::test]
async fn repeated_queries_reuse_provider_and_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": "ok" } }]
        })))
        .expect(3)
        .mount(&server)
        .await;

    let out = run_session(
        "1\n2\nfirst\n1\nsecond\n1\nthird\n2\n5\n",
        dispatcher_for(&server),
    )
    .await;

    assert_eq!(out.matches("- ok\n").count(), 3);
    assert_eq!(out.matches("Choose a model:").count(), 1);

    let requests = server.received_requests().await.unwrap();
    for request in &requests {
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["model"], "llama3-70b-8192");
    }
}

#[tokio::test]
async fn invalid_model_choice_defaults_to_first() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_json(json!({
            "model": "llama-3.3-70b-versatile",
            "messages": [{ "role": "user", "content": "hi" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": "hello" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let out = run_session("1\n42\nhi\n2\n5\n", dispatcher_for(&server)).await;

    assert!(out.contains("Invalid choice. Defaulting to 1.\n"));
    assert!(out.contains("- hello\n"));
}

#[tokio::test]
async fn dispatch_error_does_not_end_session() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    // Hugging Face without HF_API_KEY, asked twice, then exit
    let out = run_session("2\n1\nhello\n1\nagain\n2\n5\n", dispatcher_for(&server)).await;

    assert_eq!(
        out.matches("Error: Configuration error: Please set the HF_API_KEY environment variable.\n")
            .count(),
        2,
        "{}",
        out
    );
    assert!(!out.contains("Search Results:"));
    assert_eq!(out.matches("Choose an AI Router:").count(), 2);
}

#[tokio::test]
async fn invalid_main_menu_choice_reprompts() {
    let server = MockServer::start().await;
    let out = run_session("7\n5\n", dispatcher_for(&server)).await;

    assert!(out.contains("Invalid choice. Please try again.\n"));
    assert_eq!(out.matches("Choose an AI Router:").count(), 2);
}

#[tokio::test]
async fn end_of_input_ends_session_cleanly() {
    let server = MockServer::start().await;

    for input in ["", "1\n", "1\n1\n", "3\n1\n"] {
        let out = run_session(input, dispatcher_for(&server)).await;
        assert!(out.starts_with("Choose an AI Router:\n"), "{:?}: {}", input, out);
        assert!(!out.contains("Search Results:"));
    }
}
