//! Tests for configuration changes made from slash commands.

use steward_core::{Configuration, ConfigurationDraft, GuildId, WelcomeSettings};
use steward_discord::guild_settings::{
    LIST_LIMIT, bind_configuration, configuration_lines, configure_auto_roles,
    configure_welcome, enabled_features, enabled_welcome,
};
use steward_provision::{ConfigurationStore, InMemoryStore};

const GUILD: GuildId = GuildId(42);

fn configuration(name: &str) -> Configuration {
    Configuration::from_draft(ConfigurationDraft {
        name: name.to_string(),
        description: format!("{} layout", name),
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_bind_configuration_sets_guild() {
    let store = InMemoryStore::new();
    store.insert(configuration("gaming")).await.unwrap();

    let bound = bind_configuration(&store, "gaming", GUILD)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bound.guild_id, Some(GUILD));

    let found = store.find_by_guild(GUILD).await.unwrap().unwrap();
    assert_eq!(found.id, bound.id);
}

#[tokio::test]
async fn test_bind_unknown_configuration() {
    let store = InMemoryStore::new();
    let bound = bind_configuration(&store, "missing", GUILD).await.unwrap();
    assert!(bound.is_none());
    assert!(store.find_by_guild(GUILD).await.unwrap().is_none());
}

#[tokio::test]
async fn test_rebinding_survives_edit_of_previous_configuration() {
    let store = InMemoryStore::new();
    store.insert(configuration("A")).await.unwrap();
    store.insert(configuration("B")).await.unwrap();

    let first = bind_configuration(&store, "A", GUILD).await.unwrap().unwrap();
    bind_configuration(&store, "B", GUILD).await.unwrap().unwrap();
    assert_eq!(store.get(&first.id).await.unwrap().guild_id, None);

    let mut edited = store.get(&first.id).await.unwrap();
    edited
        .apply_draft(ConfigurationDraft {
            name: "A".to_string(),
            description: "edited later".to_string(),
            ..Default::default()
        })
        .unwrap();
    store.replace(edited).await.unwrap();

    let found = store.find_by_guild(GUILD).await.unwrap().unwrap();
    assert_eq!(found.name, "B");
}

#[tokio::test]
async fn test_binding_keeps_other_servers() {
    let store = InMemoryStore::new();
    store.insert(configuration("A")).await.unwrap();
    store.insert(configuration("B")).await.unwrap();

    bind_configuration(&store, "A", GuildId(7)).await.unwrap();
    bind_configuration(&store, "B", GUILD).await.unwrap();

    let other = store.find_by_guild(GuildId(7)).await.unwrap().unwrap();
    assert_eq!(other.name, "A");
}

#[tokio::test]
async fn test_configure_welcome_creates_configuration() {
    let store = InMemoryStore::new();

    let settings = configure_welcome(&store, GUILD, Some("lobby"), None, "Test Server")
        .await
        .unwrap();
    assert!(settings.enabled);
    assert_eq!(settings.channel, "lobby");
    assert_eq!(settings.message, WelcomeSettings::default().message);
    assert!(settings.thumbnail);
    assert_eq!(settings.footer.as_deref(), Some("Welcome to Test Server"));

    let config = store.find_by_guild(GUILD).await.unwrap().unwrap();
    assert_eq!(config.name, "guild-42");
    assert_eq!(config.welcome_settings, Some(settings));
}

#[tokio::test]
async fn test_configure_welcome_updates_bound_configuration() {
    let store = InMemoryStore::new();
    let mut config = configuration("community");
    config.guild_id = Some(GUILD);
    config.welcome_settings = Some(WelcomeSettings {
        goodbye_enabled: true,
        goodbye_message: "Bye {username}".to_string(),
        ..Default::default()
    });
    store.insert(config.clone()).await.unwrap();

    configure_welcome(&store, GUILD, None, Some("Hi {user}"), "Test Server")
        .await
        .unwrap();

    let configs = store.list().await.unwrap();
    assert_eq!(configs.len(), 1);
    let settings = configs[0].welcome_settings.clone().unwrap();
    assert_eq!(configs[0].id, config.id);
    assert_eq!(settings.message, "Hi {user}");
    assert!(settings.goodbye_enabled);
    assert_eq!(settings.goodbye_message, "Bye {username}");
}

#[tokio::test]
async fn test_configure_auto_roles_keeps_existing_roles() {
    let store = InMemoryStore::new();
    let available = vec!["Member".to_string(), "Gamer".to_string()];

    let roles = configure_auto_roles(&store, GUILD, "Member, Ghost ,Gamer", &available)
        .await
        .unwrap();
    assert_eq!(roles, Some(vec!["Member".to_string(), "Gamer".to_string()]));

    let config = store.find_by_guild(GUILD).await.unwrap().unwrap();
    let settings = config.auto_role_settings.unwrap();
    assert!(settings.enabled);
    assert_eq!(settings.roles, ["Member", "Gamer"]);
}

#[tokio::test]
async fn test_configure_auto_roles_none_valid() {
    let store = InMemoryStore::new();
    let available = vec!["Member".to_string()];

    let roles = configure_auto_roles(&store, GUILD, "Ghost", &available)
        .await
        .unwrap();
    assert!(roles.is_none());
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_enabled_welcome_requires_enabled_settings() {
    let store = InMemoryStore::new();
    assert!(enabled_welcome(&store, GUILD).await.unwrap().is_none());

    let mut config = configuration("quiet");
    config.guild_id = Some(GUILD);
    config.welcome_settings = Some(WelcomeSettings::default());
    store.insert(config).await.unwrap();
    assert!(enabled_welcome(&store, GUILD).await.unwrap().is_none());

    configure_welcome(&store, GUILD, None, None, "Test Server")
        .await
        .unwrap();
    assert!(enabled_welcome(&store, GUILD).await.unwrap().is_some());
}

#[tokio::test]
async fn test_configuration_lines_are_limited() {
    let store = InMemoryStore::new();
    for i in 0..12 {
        store
            .insert(configuration(&format!("config-{:02}", i)))
            .await
            .unwrap();
    }

    let lines = configuration_lines(&store).await.unwrap();
    assert_eq!(lines.len(), LIST_LIMIT);
    assert_eq!(lines[0], "• **config-00**: config-00 layout");
}

#[test]
fn test_enabled_features() {
    let mut config = configuration("features");
    assert!(enabled_features(&config).is_empty());

    config.welcome_settings = Some(WelcomeSettings {
        enabled: true,
        ..Default::default()
    });
    assert_eq!(enabled_features(&config), ["🎉 Welcome messages enabled"]);
}
