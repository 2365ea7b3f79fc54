//! Opaque references to entities created on the target server.

use serde::{Deserialize, Serialize};

/// Handle to a role on the target server.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{}", _0)]
pub struct RoleHandle(pub u64);

/// Handle to a channel category on the target server.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{}", _0)]
pub struct CategoryHandle(pub u64);

/// Handle to a text or voice channel on the target server.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{}", _0)]
pub struct ChannelHandle(pub u64);
