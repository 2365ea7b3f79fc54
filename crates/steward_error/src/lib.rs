//! Error types for the Steward workspace.
//!
//! This crate provides the foundation error types used throughout Steward.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use steward_error::{StewardResult, ConfigError};
//!
//! fn load_settings() -> StewardResult<String> {
//!     Err(ConfigError::new("Missing [server] section"))?
//! }
//!
//! match load_settings() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod platform;
mod provision;
mod storage;
mod validation;

pub use config::ConfigError;
pub use error::{StewardError, StewardErrorKind, StewardResult};
pub use platform::{PlatformError, PlatformErrorKind, PlatformResult};
pub use provision::{ProvisionError, ProvisionErrorKind, ProvisionResult};
pub use storage::{StorageError, StorageErrorKind, StorageResult};
pub use validation::ValidationError;
