//! Client-side pacing of create calls.

use crate::{ExistingChannel, ExistingRole, GuildCapability};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use steward_core::{CategoryHandle, ChannelHandle, GuildId, RoleHandle, RoleSpec};
use steward_error::PlatformResult;

/// Unkeyed GCRA limiter pacing create calls.
pub type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// A limiter allowing `requests_per_second` create calls per second.
///
/// Hand the same limiter to every [`ThrottledGuild`] that should share one
/// budget.
pub fn creation_limiter(requests_per_second: NonZeroU32) -> Arc<DirectRateLimiter> {
    Arc::new(RateLimiter::direct(Quota::per_second(requests_per_second)))
}

/// Wraps a [`GuildCapability`] so create calls are paced by a GCRA quota.
///
/// Listing calls pass straight through. Clones share one limiter.
#[derive(Clone)]
pub struct ThrottledGuild<G> {
    inner: G,
    limiter: Arc<DirectRateLimiter>,
}

impl<G> ThrottledGuild<G> {
    /// Allow at most `requests_per_second` create calls per second.
    pub fn new(inner: G, requests_per_second: NonZeroU32) -> Self {
        Self::with_limiter(inner, creation_limiter(requests_per_second))
    }

    /// Pace create calls with an existing, possibly shared, limiter.
    pub fn with_limiter(inner: G, limiter: Arc<DirectRateLimiter>) -> Self {
        Self { inner, limiter }
    }

    /// The limiter pacing this capability.
    pub fn limiter(&self) -> &Arc<DirectRateLimiter> {
        &self.limiter
    }

    /// The wrapped capability.
    pub fn inner(&self) -> &G {
        &self.inner
    }
}

#[async_trait]
impl<G> GuildCapability for ThrottledGuild<G>
where
    G: GuildCapability,
{
    fn guild_id(&self) -> GuildId {
        self.inner.guild_id()
    }

    async fn list_roles(&self) -> PlatformResult<Vec<ExistingRole>> {
        self.inner.list_roles().await
    }

    async fn create_role(&self, spec: &RoleSpec) -> PlatformResult<RoleHandle> {
        self.limiter.until_ready().await;
        self.inner.create_role(spec).await
    }

    async fn list_channels(&self) -> PlatformResult<Vec<ExistingChannel>> {
        self.inner.list_channels().await
    }

    async fn create_category(&self, name: &str, position: i32) -> PlatformResult<CategoryHandle> {
        self.limiter.until_ready().await;
        self.inner.create_category(name, position).await
    }

    async fn create_text_channel(
        &self,
        name: &str,
        parent: Option<CategoryHandle>,
        position: i32,
    ) -> PlatformResult<ChannelHandle> {
        self.limiter.until_ready().await;
        self.inner.create_text_channel(name, parent, position).await
    }

    async fn create_voice_channel(
        &self,
        name: &str,
        parent: Option<CategoryHandle>,
        position: i32,
    ) -> PlatformResult<ChannelHandle> {
        self.limiter.until_ready().await;
        self.inner.create_voice_channel(name, parent, position).await
    }
}
