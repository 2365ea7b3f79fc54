//! Tests for command parsing and document commands.

use clap::Parser;
use serde_json::json;
use std::io::Write;
use steward::cli::{Cli, Commands, handle_provision, load_configuration, validate_file};
use steward::{App, Settings, StorageBackend};
use steward_core::GuildId;
use tempfile::NamedTempFile;

fn document(value: serde_json::Value) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(value.to_string().as_bytes()).unwrap();
    file
}

fn community() -> serde_json::Value {
    json!({
        "name": "community",
        "description": "Community layout",
        "roles": [{"name": "Admin"}, {"name": "Member"}],
        "channels": [
            {"name": "Lobby", "type": "category", "position": 0},
            {"name": "general", "type": "text", "category": "Lobby", "position": 1},
            {"name": "voice", "type": "voice", "category": "Lobby", "position": 2}
        ]
    })
}

async fn memory_app() -> (Settings, App) {
    let mut settings = Settings::bundled().unwrap();
    settings.storage.backend = StorageBackend::Memory;
    let app = App::open(&settings).await.unwrap();
    (settings, app)
}

#[test]
fn test_parse_provision() {
    let cli = Cli::try_parse_from([
        "steward",
        "provision",
        "--guild",
        "42",
        "--config-name",
        "community",
        "--dry-run",
    ])
    .unwrap();

    match cli.command {
        Commands::Provision(args) => {
            assert_eq!(args.guild, GuildId(42));
            assert_eq!(args.source.config_name.as_deref(), Some("community"));
            assert!(args.dry_run);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_provision_requires_one_source() {
    assert!(Cli::try_parse_from(["steward", "provision", "--guild", "42"]).is_err());
    assert!(
        Cli::try_parse_from([
            "steward",
            "provision",
            "--guild",
            "42",
            "--config-id",
            "a",
            "--config-name",
            "b",
        ])
        .is_err()
    );
    assert!(
        Cli::try_parse_from(["steward", "provision", "--guild", "x", "--config-id", "a"]).is_err()
    );
}

#[test]
fn test_global_flags() {
    let cli = Cli::try_parse_from(["steward", "configs", "-v", "--settings", "local.toml"]).unwrap();
    assert!(cli.verbose);
    assert_eq!(cli.settings.unwrap().to_str(), Some("local.toml"));
}

#[test]
fn test_validate_document() {
    let file = document(community());
    validate_file(file.path()).unwrap();

    let config = load_configuration(file.path()).unwrap();
    assert_eq!(config.roles.len(), 2);
    assert_eq!(config.channels.len(), 3);
}

#[test]
fn test_validate_rejects_duplicate_roles() {
    let file = document(json!({
        "name": "broken",
        "roles": [{"name": "Admin"}, {"name": "Admin"}]
    }));
    let err = validate_file(file.path()).unwrap_err();
    assert!(err.reason().contains("Duplicate role name"));
}

#[test]
fn test_validate_rejects_malformed_json() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(b"{ not json").unwrap();
    assert!(validate_file(file.path()).is_err());
}

#[tokio::test]
async fn test_dry_run_from_file() {
    let (settings, app) = memory_app().await;
    let file = document(community());
    let path = file.path().to_str().unwrap();

    let cli = Cli::try_parse_from([
        "steward", "provision", "--guild", "7", "--file", path, "--dry-run",
    ])
    .unwrap();
    let Commands::Provision(args) = cli.command else {
        panic!("expected provision");
    };

    handle_provision(&settings, &app, &args).await.unwrap();
    let metrics = app.orchestrator.metrics().snapshot();
    assert_eq!(metrics.runs_completed, 1);
    assert_eq!(metrics.entities_created, 5);
}

#[tokio::test]
async fn test_provision_unknown_name() {
    let (settings, app) = memory_app().await;
    let cli = Cli::try_parse_from([
        "steward",
        "provision",
        "--guild",
        "7",
        "--config-name",
        "missing",
        "--dry-run",
    ])
    .unwrap();
    let Commands::Provision(args) = cli.command else {
        panic!("expected provision");
    };

    let err = handle_provision(&settings, &app, &args).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(app.orchestrator.metrics().snapshot().runs_started, 0);
}
