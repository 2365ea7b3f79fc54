//! Tests for platform connectors.

use steward_core::GuildId;
use steward_error::PlatformErrorKind;
use steward_provision::{
    GuildCapability, InMemoryConnector, InMemoryGuild, OfflineConnector, PlatformConnector,
};

#[tokio::test]
async fn test_in_memory_connector_lifecycle() {
    let connector = InMemoryConnector::new();
    connector.add_guild(InMemoryGuild::new(GuildId(1)));

    let err = connector.guild(GuildId(1)).await.err().unwrap();
    assert!(matches!(err.kind(), PlatformErrorKind::NotConnected(_)));
    assert!(!connector.snapshot().running);

    connector.connect().await.unwrap();
    let snapshot = connector.snapshot();
    assert!(snapshot.running && snapshot.connected);

    let guild = connector.guild(GuildId(1)).await.unwrap();
    assert_eq!(guild.guild_id(), GuildId(1));

    let err = connector.connect().await.unwrap_err();
    assert_eq!(err.kind(), &PlatformErrorKind::AlreadyRunning);
}

#[tokio::test]
async fn test_unknown_guild() {
    let connector = InMemoryConnector::connected();
    let err = connector.guild(GuildId(404)).await.err().unwrap();
    assert_eq!(err.kind(), &PlatformErrorKind::GuildNotFound(404));
}

#[tokio::test]
async fn test_offline_connector_reports_reason() {
    let connector = OfflineConnector::new("DISCORD_BOT_TOKEN not set");

    let snapshot = connector.snapshot();
    assert!(!snapshot.running);
    assert_eq!(snapshot.last_error.as_deref(), Some("DISCORD_BOT_TOKEN not set"));

    assert!(connector.guild(GuildId(1)).await.is_err());
    assert!(connector.connect().await.is_err());
}
