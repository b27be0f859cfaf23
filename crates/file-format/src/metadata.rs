use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publisher name stamped into every saved document.
pub const COMPANY: &str = "Custom Packaging Co.";

/// Bookkeeping fields written alongside the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    /// When the document was saved.
    pub exported_at: DateTime<Utc>,
    /// Schema version of the engine that saved it.
    pub export_version: String,
    pub company: String,
}

impl ExportEnvelope {
    /// Envelope for a document saved now by this engine.
    pub fn new(exported_at: DateTime<Utc>) -> Self {
        Self {
            exported_at,
            export_version: crate::save::CURRENT_VERSION.to_string(),
            company: COMPANY.to_string(),
        }
    }
}
