//! Tracing subscriber setup.

use crate::LoggingSettings;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directives: `RUST_LOG` wins, then `-v`, then the configured level.
pub fn env_filter(settings: &LoggingSettings, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new(&settings.level)
        }
    })
}

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a subscriber is already installed.
pub fn init_tracing(
    settings: &LoggingSettings,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = tracing_subscriber::registry().with(env_filter(settings, verbose));

    if settings.json {
        registry.with(fmt::layer().json()).try_init()?;
    } else {
        registry.with(fmt::layer().with_target(false)).try_init()?;
    }
    Ok(())
}
