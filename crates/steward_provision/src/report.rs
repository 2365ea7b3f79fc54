//! Per-declaration outcomes of a provisioning run.

use serde::{Deserialize, Serialize};

/// What happened to one declared role or channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum SpecOutcome {
    /// A new entity was created.
    Created,
    /// An existing entity with the same name was used.
    Reused,
    /// Nothing was created.
    Skipped {
        /// Why the declaration was skipped.
        reason: String,
    },
}

/// Outcome for one declaration, in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecReport {
    /// Declared name.
    pub name: String,
    /// Declared kind (`role`, `category`, `text`, `voice`, ...).
    pub kind: String,
    /// Result.
    #[serde(flatten)]
    pub outcome: SpecOutcome,
}

impl SpecReport {
    pub(crate) fn new(name: impl Into<String>, kind: impl Into<String>, outcome: SpecOutcome) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            outcome,
        }
    }

    pub(crate) fn skipped(
        name: impl Into<String>,
        kind: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            kind,
            SpecOutcome::Skipped {
                reason: reason.into(),
            },
        )
    }
}

/// Everything a completed run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Role outcomes in declaration order.
    pub roles: Vec<SpecReport>,
    /// Category and channel outcomes in processing order.
    pub channels: Vec<SpecReport>,
}

impl RunReport {
    fn all(&self) -> impl Iterator<Item = &SpecReport> {
        self.roles.iter().chain(self.channels.iter())
    }

    /// Number of entities created.
    pub fn created(&self) -> usize {
        self.all().filter(|r| r.outcome == SpecOutcome::Created).count()
    }

    /// Number of entities reused.
    pub fn reused(&self) -> usize {
        self.all().filter(|r| r.outcome == SpecOutcome::Reused).count()
    }

    /// Skipped declarations.
    pub fn skipped(&self) -> Vec<&SpecReport> {
        self.all()
            .filter(|r| matches!(r.outcome, SpecOutcome::Skipped { .. }))
            .collect()
    }

    /// One-line summary for status messages.
    pub fn summary(&self) -> String {
        format!(
            "{} created, {} reused, {} skipped",
            self.created(),
            self.reused(),
            self.skipped().len()
        )
    }
}
