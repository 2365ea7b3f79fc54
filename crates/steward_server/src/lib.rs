//! HTTP API for Steward.
//!
//! All routes live under `/api` and exchange JSON. Failures are returned as
//! `{"detail": "<text>"}` with a status code matching the error kind.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use steward_provision::{InMemoryStore, OfflineConnector, Orchestrator};
//! use steward_server::{ApiState, serve};
//!
//! # async fn example() -> std::io::Result<()> {
//! let store = Arc::new(InMemoryStore::new());
//! let state = ApiState::new(
//!     store.clone(),
//!     Arc::new(OfflineConnector::new("No bot token configured")),
//!     Orchestrator::new(store),
//! );
//! serve("127.0.0.1:8001", state, std::future::pending()).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod error;
mod state;

pub use api::{create_router, serve};
pub use error::ApiError;
pub use state::ApiState;
