use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::format::{ExportFormat, Fidelity};

/// Payload of a generated artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactContent {
    Text(String),
    Binary(Vec<u8>),
}

impl ArtifactContent {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ArtifactContent::Text(s) => s.as_bytes(),
            ArtifactContent::Binary(b) => b,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ArtifactContent::Text(s) => Some(s),
            ArtifactContent::Binary(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A finished artifact, ready for a file sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub format: ExportFormat,
    pub filename: String,
    pub mime_type: &'static str,
    pub fidelity: Fidelity,
    pub content: ArtifactContent,
}

/// Inputs shared by every serializer that are not part of the box itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportContext {
    /// Timestamp written into headers. Fixed per export so output is reproducible.
    pub generated_at: DateTime<Utc>,
    /// Filename stem. Derived from the box size when `None`.
    pub base_name: Option<String>,
}

impl ExportContext {
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            base_name: None,
        }
    }

    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    /// RFC 3339 timestamp, second precision.
    pub fn timestamp(&self) -> String {
        self.generated_at
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    }
}
