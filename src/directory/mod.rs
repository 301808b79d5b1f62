use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::{DirectoryError, Result};
use crate::models::Practitioner;

pub mod source;

pub use source::{source_for, DirectorySource, FileSource, HttpSource, StaticSource};

/// Decodes a directory document. Elements that are not objects are skipped; everything
/// else decodes leniently.
pub fn parse_directory(body: &[u8]) -> Result<Vec<Practitioner>> {
    let document: Value = serde_json::from_slice(body)?;
    let Value::Array(items) = document else {
        return Err(DirectoryError::NotAnArray);
    };

    let total = items.len();
    let practitioners: Vec<Practitioner> = items
        .into_iter()
        .enumerate()
        .filter_map(|(position, item)| {
            if !item.is_object() {
                tracing::warn!(position, "Skipping directory entry that is not an object");
                return None;
            }
            match serde_json::from_value(item) {
                Ok(practitioner) => Some(practitioner),
                Err(e) => {
                    tracing::warn!(position, error = %e, "Skipping malformed directory entry");
                    None
                }
            }
        })
        .collect();

    if practitioners.len() != total {
        tracing::info!(
            kept = practitioners.len(),
            skipped = total - practitioners.len(),
            "Directory decoded with skipped entries"
        );
    }

    Ok(practitioners)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LoadOutcome {
    Loaded { source: String },
    /// The fetch failed; the session runs with an empty directory.
    Degraded { source: String, reason: String },
}

/// The session's directory: fetched once, immutable afterwards.
#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    pub practitioners: Vec<Practitioner>,
    pub loaded_at: DateTime<Utc>,
    pub outcome: LoadOutcome,
}

impl DirectorySnapshot {
    pub fn loaded(source: impl Into<String>, practitioners: Vec<Practitioner>) -> Self {
        Self {
            practitioners,
            loaded_at: Utc::now(),
            outcome: LoadOutcome::Loaded {
                source: source.into(),
            },
        }
    }

    pub fn degraded(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            practitioners: Vec::new(),
            loaded_at: Utc::now(),
            outcome: LoadOutcome::Degraded {
                source: source.into(),
                reason: reason.into(),
            },
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.outcome, LoadOutcome::Degraded { .. })
    }
}

/// Fetches the directory. Never fails: errors are logged and yield an empty snapshot.
pub async fn load(source: &dyn DirectorySource) -> DirectorySnapshot {
    let origin = source.describe();
    match source.fetch().await {
        Ok(practitioners) => {
            tracing::info!(
                source = %origin,
                count = practitioners.len(),
                "Practitioner directory loaded"
            );
            DirectorySnapshot::loaded(origin, practitioners)
        }
        Err(e) => {
            tracing::error!(source = %origin, error = %e, "Error fetching practitioner directory");
            DirectorySnapshot::degraded(origin, e.to_string())
        }
    }
}
