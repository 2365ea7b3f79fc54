//! Tests for the HTTP API router.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use steward_core::{CategoryHandle, GuildId};
use steward_provision::{
    InMemoryConnector, InMemoryGuild, InMemoryStore, OfflineConnector, Orchestrator,
    PlatformConnector,
};
use steward_server::{ApiState, create_router};
use tower::ServiceExt;

fn router_with(platform: Arc<dyn PlatformConnector>) -> (Router, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let state = ApiState::new(store.clone(), platform, Orchestrator::new(store.clone()));
    (create_router(state), store)
}

fn offline_router() -> (Router, Arc<InMemoryStore>) {
    router_with(Arc::new(OfflineConnector::new("No bot token configured")))
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn gaming_draft() -> Value {
    json!({
        "name": "gaming",
        "description": "Gaming community",
        "roles": [{"name": "Admin", "color": "#ff0000", "permissions": 8}],
        "channels": [
            {"name": "Lobby", "type": "category", "position": 0},
            {"name": "general", "type": "text", "category": "Lobby", "position": 1}
        ]
    })
}

#[tokio::test]
async fn test_health_and_root() {
    let (router, _) = offline_router();

    let (status, body) = send(&router, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = send(&router, "GET", "/api", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bot_status"]["running"], json!(false));
    assert_eq!(body["bot_status"]["last_error"], json!("No bot token configured"));
}

#[tokio::test]
async fn test_configuration_crud() {
    let (router, _) = offline_router();

    let (status, created) = send(&router, "POST", "/api/configs", Some(gaming_draft())).await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["name"], json!("gaming"));
    assert_eq!(created["roles"][0]["color"], json!("#ff0000"));

    let (status, listed) = send(&router, "GET", "/api/configs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let mut draft = gaming_draft();
    draft["description"] = json!("Updated");
    let (status, updated) = send(&router, "PUT", &format!("/api/configs/{}", id), Some(draft)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], json!(id));
    assert_eq!(updated["description"], json!("Updated"));
    assert_eq!(updated["created_at"], created["created_at"]);

    let (status, fetched) = send(&router, "GET", &format!("/api/configs/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["description"], json!("Updated"));

    let (status, deleted) = send(&router, "DELETE", &format!("/api/configs/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], json!("Configuration deleted successfully"));

    let (status, body) = send(&router, "GET", &format!("/api/configs/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_configuration_errors() {
    let (router, _) = offline_router();

    let (status, _) = send(&router, "POST", "/api/configs", Some(gaming_draft())).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&router, "POST", "/api/configs", Some(gaming_draft())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["detail"].is_string());

    let (status, body) = send(&router, "POST", "/api/configs", Some(json!({"name": "  "}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());

    let (status, body) =
        send(&router, "POST", "/api/configs", Some(json!({"roles": "not a list"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());

    let (status, _) = send(&router, "PUT", "/api/configs/missing", Some(gaming_draft())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&router, "DELETE", "/api/configs/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_setup_unknown_configuration_creates_no_status() {
    let connector = Arc::new(InMemoryConnector::connected());
    connector.add_guild(InMemoryGuild::new(GuildId(7)));
    let (router, store) = router_with(connector);

    let request = json!({"guild_id": "7", "config_id": "missing"});
    let (status, body) = send(&router, "POST", "/api/setup", Some(request)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].is_string());
    assert_eq!(store.status_count().await, 0);
}

#[tokio::test]
async fn test_setup_requires_connection() {
    let (router, store) = offline_router();
    let (_, created) = send(&router, "POST", "/api/configs", Some(gaming_draft())).await;

    let request = json!({"guild_id": "7", "config_id": created["id"]});
    let (status, body) = send(&router, "POST", "/api/setup", Some(request)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["detail"], json!("Not connected: No bot token configured"));
    assert_eq!(store.status_count().await, 0);
}

#[tokio::test]
async fn test_setup_runs_in_background() {
    let connector = Arc::new(InMemoryConnector::connected());
    let guild = connector.add_guild(InMemoryGuild::new(GuildId(7)));
    let (router, _) = router_with(connector);
    let (_, created) = send(&router, "POST", "/api/configs", Some(gaming_draft())).await;

    let request = json!({"guild_id": 7, "config_id": created["id"]});
    let (status, accepted) = send(&router, "POST", "/api/setup", Some(request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(accepted["message"], json!("Server setup queued"));
    let status_uri = format!("/api/setup/status/{}", accepted["status_id"].as_str().unwrap());

    let mut final_status = Value::Null;
    for _ in 0..100 {
        let (status, body) = send(&router, "GET", &status_uri, None).await;
        assert_eq!(status, StatusCode::OK);
        if body["status"] == json!("completed") {
            final_status = body;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(final_status["progress"], json!(100));
    assert_eq!(final_status["guild_id"], json!("7"));
    assert_eq!(guild.roles().len(), 1);
    let general = guild.channel_named("general").unwrap();
    assert_eq!(general.parent, guild.channel_named("Lobby").map(|c| CategoryHandle(c.id)));

    let mut runs_completed = Value::Null;
    for _ in 0..100 {
        let (_, metrics) = send(&router, "GET", "/api/metrics", None).await;
        runs_completed = metrics["runs_completed"].clone();
        if runs_completed == json!(1) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(runs_completed, json!(1));
}

#[tokio::test]
async fn test_unknown_status() {
    let (router, _) = offline_router();
    let (status, body) = send(&router, "GET", "/api/setup/status/never-created", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_bot_start() {
    let (router, _) = router_with(Arc::new(InMemoryConnector::new()));

    let (status, body) = send(&router, "POST", "/api/bot/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Bot is starting..."));

    let (status, body) = send(&router, "POST", "/api/bot/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Bot is already running"));

    let (_, snapshot) = send(&router, "GET", "/api/bot/status", None).await;
    assert_eq!(snapshot["connected"], json!(true));
}

#[tokio::test]
async fn test_bot_start_offline() {
    let (router, _) = offline_router();
    let (status, _) = send(&router, "POST", "/api/bot/start", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
