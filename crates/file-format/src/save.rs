use box_types::{BoxConfiguration, SchemaVersion};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use crate::metadata::ExportEnvelope;

/// Schema version written by this engine.
pub const CURRENT_VERSION: &str = SchemaVersion::CURRENT.as_str();

/// The document as written: configuration fields with the envelope beside them.
#[derive(Debug, Clone, Serialize)]
struct SavedDocument<'a> {
    #[serde(flatten)]
    configuration: &'a BoxConfiguration,
    #[serde(flatten)]
    envelope: ExportEnvelope,
}

/// Serialize a configuration to a pretty-printed JSON document.
#[instrument(skip_all)]
pub fn save_configuration(config: &BoxConfiguration, exported_at: DateTime<Utc>) -> String {
    let document = SavedDocument {
        configuration: config,
        envelope: ExportEnvelope::new(exported_at),
    };
    let json = serde_json::to_string_pretty(&document)
        .expect("BoxConfiguration serialization should never fail");
    info!(bytes = json.len(), "saved configuration");
    json
}
