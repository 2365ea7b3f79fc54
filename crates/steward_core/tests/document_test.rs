//! Tests for loading complete configuration documents.

use steward_core::{
    ChannelKind, Color, Configuration, ConfigurationDraft, GuildId, SetupPhase, SetupStatus,
};

const GAMING_COMMUNITY: &str = r##"{
    "name": "Gaming Community",
    "description": "Roles and channels for a gaming server",
    "roles": [
        {"name": "Admin", "color": "#ff0000", "permissions": 8, "hoist": true},
        {"name": "Moderator", "color": 3447003, "mentionable": true},
        {"name": "Member"}
    ],
    "channels": [
        {"name": "Information", "type": "category", "position": 0},
        {"name": "rules", "type": "text", "category": "Information", "position": 1},
        {"name": "Voice", "type": "category", "position": 2},
        {"name": "Lounge", "type": "voice", "category": "Voice", "position": 3},
        {"name": "news", "type": "announcement", "position": 4}
    ],
    "welcome_settings": {"enabled": true, "channel": "rules"},
    "auto_role_settings": {"enabled": true, "roles": ["Member"]},
    "moderation_settings": {"enabled": false, "auto_mod_level": "medium"}
}"##;

#[test]
fn test_full_document_loads() {
    let draft: ConfigurationDraft = serde_json::from_str(GAMING_COMMUNITY).unwrap();
    let config = Configuration::from_draft(draft).unwrap();

    assert_eq!(config.roles.len(), 3);
    assert_eq!(config.roles[0].color(), &"#ff0000".parse::<Color>().unwrap());
    assert_eq!(*config.roles[0].permissions(), 8);
    assert!(config.roles[0].hoist());
    assert_eq!(config.roles[1].color().value(), 3447003);
    assert!(config.roles[1].mentionable());

    assert_eq!(config.channels.len(), 5);
    assert_eq!(config.channels[3].kind(), &ChannelKind::Voice);
    assert_eq!(
        config.channels[4].kind(),
        &ChannelKind::Other("announcement".into())
    );

    let welcome = config.welcome_settings.as_ref().unwrap();
    assert_eq!(welcome.channel, "rules");
    assert_eq!(welcome.message, "Welcome {user} to {server}! 🎉");
    assert_eq!(
        config.auto_role_settings.as_ref().unwrap().roles_to_assign(),
        ["Member".to_string()]
    );
    assert!(config.authoring_warnings().is_empty());
}

#[test]
fn test_stored_document_round_trips() {
    let draft: ConfigurationDraft = serde_json::from_str(GAMING_COMMUNITY).unwrap();
    let mut config = Configuration::from_draft(draft).unwrap();
    config.guild_id = Some(GuildId(987654321987654321));

    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"987654321987654321\""));
    let back: Configuration = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_guild_id_accepts_number_or_string() {
    let a: GuildId = serde_json::from_str("42").unwrap();
    let b: GuildId = serde_json::from_str("\"42\"").unwrap();
    assert_eq!(a, b);
    assert!(serde_json::from_str::<GuildId>("\"forty-two\"").is_err());
}

#[test]
fn test_status_serializes_for_polling() {
    let mut status =
        SetupStatus::new(GuildId(3), "config-1".into(), SetupPhase::Pending, "queued").unwrap();
    status.apply(SetupPhase::Running, 10, "Creating roles").unwrap();

    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["status"], "running");
    assert_eq!(json["progress"], 10);
    assert_eq!(json["config_id"], "config-1");

    let back: SetupStatus = serde_json::from_str(&json.to_string()).unwrap();
    assert_eq!(back, status);
}
