//! Registration API integration tests.
//!
//! These spawn the real server binary with a config pointing at an
//! unreachable auction service, so they exercise the portal surface
//! (health, config redaction, metrics, registration lookup/teardown and
//! upstream error mapping) without external infrastructure.

use std::io::Write;
use std::net::TcpListener;
use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use tokio::time::sleep;

/// Find an available port
fn get_available_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

/// Create a config pointing at an unreachable auction service
fn test_config(port: u16, service_port: u16) -> String {
    format!(
        r#"
[auction_service]
url = "http://127.0.0.1:{}"
api_key = "test-api-key"
timeout_secs = 1

[server]
host = "127.0.0.1"
port = {}

[poller]
interval_ms = 100
max_attempts = 3
"#,
        service_port, port
    )
}

/// Spawn the server and return a handle
async fn spawn_server(config_path: &std::path::Path) -> tokio::process::Child {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_gavel"))
        .env("GAVEL_CONFIG", config_path)
        .env("RUST_LOG", "error") // Quiet logs during tests
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn server")
}

/// Wait for server to be ready
async fn wait_for_server(port: u16, max_attempts: u32) -> bool {
    let client = Client::new();
    for _ in 0..max_attempts {
        if client
            .get(format!("http://127.0.0.1:{}/api/v1/health", port))
            .send()
            .await
            .is_ok()
        {
            return true;
        }
        sleep(Duration::from_millis(50)).await;
    }
    false
}

/// Helper to start a server for testing
async fn start_test_server() -> (u16, tokio::process::Child, NamedTempFile) {
    let port = get_available_port();
    let service_port = get_available_port();

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(test_config(port, service_port).as_bytes())
        .unwrap();
    temp_file.flush().unwrap();

    let server = spawn_server(temp_file.path()).await;

    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    (port, server, temp_file)
}

#[tokio::test]
async fn test_health() {
    let (port, mut server, _config) = start_test_server().await;

    let client = Client::new();
    let response = client
        .get(format!("http://127.0.0.1:{}/api/v1/health", port))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let json: Value = response.json().await.unwrap();
    assert_eq!(json["status"], "ok");

    server.kill().await.ok();
}

#[tokio::test]
async fn test_config_redacts_api_key() {
    let (port, mut server, _config) = start_test_server().await;

    let client = Client::new();
    let response = client
        .get(format!("http://127.0.0.1:{}/api/v1/config", port))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(!body.contains("test-api-key"), "API key leaked: {}", body);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["auction_service"]["api_key_configured"], true);
    assert_eq!(json["poller"]["interval_ms"], 100);
    assert_eq!(json["poller"]["max_attempts"], 3);

    server.kill().await.ok();
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let (port, mut server, _config) = start_test_server().await;

    let client = Client::new();
    let response = client
        .get(format!("http://127.0.0.1:{}/api/v1/metrics", port))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("gavel_registrations_active"));
    assert!(body.contains("gavel_pollers_active"));

    server.kill().await.ok();
}

#[tokio::test]
async fn test_get_unknown_registration_returns_404() {
    let (port, mut server, _config) = start_test_server().await;

    let client = Client::new();
    let response = client
        .get(format!(
            "http://127.0.0.1:{}/api/v1/registrations/nonexistent",
            port
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
    let json: Value = response.json().await.unwrap();
    assert!(json["error"].as_str().unwrap().contains("nonexistent"));

    server.kill().await.ok();
}

#[tokio::test]
async fn test_delete_unknown_registration_returns_404() {
    let (port, mut server, _config) = start_test_server().await;

    let client = Client::new();
    let response = client
        .delete(format!(
            "http://127.0.0.1:{}/api/v1/registrations/nonexistent",
            port
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    server.kill().await.ok();
}

#[tokio::test]
async fn test_receipt_for_unknown_registration_returns_404() {
    let (port, mut server, _config) = start_test_server().await;

    let client = Client::new();
    let response = client
        .post(format!(
            "http://127.0.0.1:{}/api/v1/registrations/nonexistent/receipt",
            port
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    server.kill().await.ok();
}

#[tokio::test]
async fn test_create_registration_with_unreachable_service_returns_502() {
    let (port, mut server, _config) = start_test_server().await;

    let client = Client::new();
    let response = client
        .post(format!("http://127.0.0.1:{}/api/v1/registrations", port))
        .json(&json!({
            "registrant_name": "Ada Lovelace",
            "registrant_email": "ada@example.com",
            "auction_id": "auction-1",
            "payee_account": "12345678",
            "payee_bank": "First National",
            "payee_branch": "Main St"
        }))
        .send()
        .await
        .expect("Failed to send request");

    // Ticket issuance fails upstream, so no registration is created
    assert_eq!(response.status(), 502);
    let json: Value = response.json().await.unwrap();
    assert!(json["error"].is_string());

    server.kill().await.ok();
}

#[tokio::test]
async fn test_list_auctions_with_unreachable_service_returns_502() {
    let (port, mut server, _config) = start_test_server().await;

    let client = Client::new();
    let response = client
        .get(format!("http://127.0.0.1:{}/api/v1/auctions", port))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 502);

    server.kill().await.ok();
}
