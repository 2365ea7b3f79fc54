//! End-to-end tests for provisioning runs.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::num::NonZeroU32;
use std::sync::Arc;
use steward_core::{
    ChannelSpec, Configuration, ConfigurationDraft, GuildId, RoleSpec, SetupPhase, SetupStatus,
    StatusId,
};
use steward_error::{PlatformErrorKind, StorageResult};
use steward_provision::{
    DuplicateChannelPolicy, GuildCapability, InMemoryGuild, InMemoryStore, Orchestrator,
    StatusStore, ThrottledGuild, creation_limiter,
};

/// Status store that remembers every phase/progress pair it was asked to store.
#[derive(Default)]
struct RecordingStore {
    inner: InMemoryStore,
    seen: Mutex<Vec<(SetupPhase, u8)>>,
}

impl RecordingStore {
    fn seen(&self) -> Vec<(SetupPhase, u8)> {
        self.seen.lock().clone()
    }
}

#[async_trait]
impl StatusStore for RecordingStore {
    async fn insert_status(&self, status: SetupStatus) -> StorageResult<()> {
        self.seen.lock().push((status.phase(), status.progress()));
        self.inner.insert_status(status).await
    }

    async fn replace_status(&self, status: SetupStatus) -> StorageResult<()> {
        self.seen.lock().push((status.phase(), status.progress()));
        self.inner.replace_status(status).await
    }

    async fn get_status(&self, id: &StatusId) -> StorageResult<SetupStatus> {
        self.inner.get_status(id).await
    }
}

fn starter_config() -> Configuration {
    Configuration::from_draft(ConfigurationDraft {
        name: "Starter".into(),
        roles: vec![RoleSpec::named("Admin")],
        channels: vec![
            ChannelSpec::category_named("Lobby", 0),
            ChannelSpec::text("general", Some("Lobby"), 1),
        ],
        ..Default::default()
    })
    .expect("valid configuration")
}

#[tokio::test]
async fn test_starter_configuration_against_empty_server() {
    let store = Arc::new(RecordingStore::default());
    let orchestrator = Orchestrator::new(store.clone());
    let guild = InMemoryGuild::new(GuildId(10));

    let (status_id, report) = orchestrator
        .provision(&guild, &starter_config())
        .await
        .expect("run should complete");

    assert_eq!(guild.roles().len(), 1);
    assert_eq!(guild.roles()[0].name, "Admin");
    let lobby = guild.channel_named("Lobby").unwrap();
    let general = guild.channel_named("general").unwrap();
    assert_eq!(general.parent.map(|p| p.0), Some(lobby.id));
    assert_eq!(report.created(), 3);

    let status = orchestrator.tracker().get(&status_id).await.unwrap();
    assert_eq!(status.phase(), SetupPhase::Completed);
    assert_eq!(status.progress(), 100);
    assert!(status.completed_at().is_some());
    assert!(status.message().contains("3 created"));

    assert_eq!(
        store.seen(),
        vec![
            (SetupPhase::Running, 0),
            (SetupPhase::Running, 10),
            (SetupPhase::Running, 50),
            (SetupPhase::Completed, 100),
        ]
    );
}

#[tokio::test]
async fn test_partial_failure_still_completes() {
    let store = Arc::new(InMemoryStore::new());
    let orchestrator = Orchestrator::new(store);
    let guild = InMemoryGuild::new(GuildId(11)).fail_create(
        "Moderator",
        PlatformErrorKind::NameConflict("Moderator".into()),
    );
    let mut config = starter_config();
    config.roles = vec![
        RoleSpec::named("Admin"),
        RoleSpec::named("Moderator"),
        RoleSpec::named("Member"),
    ];

    let (status_id, report) = orchestrator.provision(&guild, &config).await.unwrap();

    assert_eq!(report.skipped().len(), 1);
    assert_eq!(report.skipped()[0].name, "Moderator");
    assert!(guild.channel_named("general").is_some());
    let status = orchestrator.tracker().get(&status_id).await.unwrap();
    assert_eq!(status.phase(), SetupPhase::Completed);
}

#[tokio::test]
async fn test_phase_failure_recorded_once() {
    let store = Arc::new(RecordingStore::default());
    let orchestrator = Orchestrator::new(store.clone());
    let guild = InMemoryGuild::new(GuildId(12)).fail_listing(PlatformErrorKind::GuildNotFound(12));
    let config = starter_config();

    let status_id = orchestrator
        .begin(GuildId(12), &config, SetupPhase::Pending, "queued")
        .await
        .unwrap();
    let err = orchestrator
        .run(&guild, &config, &status_id)
        .await
        .unwrap_err();
    assert!(err.reason().contains("roles phase failed"));

    let status = orchestrator.tracker().get(&status_id).await.unwrap();
    assert_eq!(status.phase(), SetupPhase::Failed);
    assert_eq!(status.progress(), 0);
    assert!(status.message().starts_with("Setup failed:"));
    assert!(status.message().contains("Guild not found: 12"));
    assert!(status.completed_at().is_some());

    assert_eq!(
        store.seen(),
        vec![
            (SetupPhase::Pending, 0),
            (SetupPhase::Running, 10),
            (SetupPhase::Failed, 0),
        ]
    );
    assert_eq!(guild.create_calls(), 0);

    let metrics = orchestrator.metrics().snapshot();
    assert_eq!(metrics.runs_failed, 1);
    assert_eq!(metrics.runs_completed, 0);
}

#[tokio::test]
async fn test_fatal_channel_failure_keeps_roles() {
    let orchestrator = Orchestrator::new(Arc::new(InMemoryStore::new()));
    let guild = InMemoryGuild::new(GuildId(13)).fail_create("Lobby", PlatformErrorKind::Unauthorized);

    let err = orchestrator
        .provision(&guild, &starter_config())
        .await
        .unwrap_err();

    assert!(err.reason().contains("channels phase failed"));
    assert_eq!(guild.roles().len(), 1, "no rollback of created roles");
}

#[tokio::test]
async fn test_finished_status_cannot_be_rerun() {
    let orchestrator = Orchestrator::new(Arc::new(InMemoryStore::new()));
    let guild = InMemoryGuild::new(GuildId(14));
    let config = starter_config();

    let (status_id, _) = orchestrator.provision(&guild, &config).await.unwrap();
    let calls = guild.create_calls();

    assert!(orchestrator.run(&guild, &config, &status_id).await.is_err());
    assert_eq!(guild.create_calls(), calls);
    let status = orchestrator.tracker().get(&status_id).await.unwrap();
    assert_eq!(status.phase(), SetupPhase::Completed);
}

#[tokio::test]
async fn test_spawned_run_reports_through_status() {
    let orchestrator = Orchestrator::new(Arc::new(InMemoryStore::new()));
    let guild: Arc<dyn GuildCapability> = Arc::new(InMemoryGuild::new(GuildId(15)));

    let (status_id, handle) = orchestrator
        .spawn(guild, starter_config())
        .await
        .unwrap();
    let report = handle.await.expect("task joins").expect("run succeeds");
    assert_eq!(report.created(), 3);

    let status = orchestrator.tracker().get(&status_id).await.unwrap();
    assert_eq!(status.phase(), SetupPhase::Completed);
    assert_eq!(orchestrator.metrics().snapshot().entities_created, 3);
}

#[tokio::test]
async fn test_unknown_status_id_not_found() {
    let orchestrator = Orchestrator::new(Arc::new(InMemoryStore::new()));
    let err = orchestrator
        .tracker()
        .get(&StatusId::from("never-created"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_reuse_policy_rerun_is_idempotent() {
    let orchestrator = Orchestrator::new(Arc::new(InMemoryStore::new()))
        .with_policy(DuplicateChannelPolicy::Reuse);
    let guild = InMemoryGuild::new(GuildId(16));
    let config = starter_config();

    orchestrator.provision(&guild, &config).await.unwrap();
    let after_first = guild.create_calls();
    let (_, report) = orchestrator.provision(&guild, &config).await.unwrap();

    assert_eq!(guild.create_calls(), after_first);
    assert_eq!(report.created(), 0);
    assert_eq!(report.reused(), 3);
}

#[tokio::test]
async fn test_throttled_guild_provisions() {
    let orchestrator = Orchestrator::new(Arc::new(InMemoryStore::new()));
    let guild = ThrottledGuild::new(
        InMemoryGuild::new(GuildId(17)),
        NonZeroU32::new(1000).unwrap(),
    );

    let (_, report) = orchestrator
        .provision(&guild, &starter_config())
        .await
        .unwrap();

    assert_eq!(report.created(), 3);
    assert_eq!(guild.inner().create_calls(), 3);
}

#[tokio::test]
async fn test_throttled_guilds_share_one_budget() {
    let limiter = creation_limiter(NonZeroU32::new(1).unwrap());
    let first = ThrottledGuild::with_limiter(InMemoryGuild::new(GuildId(18)), Arc::clone(&limiter));
    let second = ThrottledGuild::with_limiter(InMemoryGuild::new(GuildId(19)), Arc::clone(&limiter));

    first.create_role(&RoleSpec::named("Admin")).await.unwrap();

    assert!(Arc::ptr_eq(first.limiter(), second.limiter()));
    assert!(second.limiter().check().is_err(), "budget spent by the other server");
    assert_eq!(first.inner().create_calls(), 1);
    assert_eq!(second.inner().create_calls(), 0);
}
