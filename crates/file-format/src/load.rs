use box_types::{BoxConfiguration, SchemaVersion};
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::errors::LoadError;
use crate::metadata::ExportEnvelope;
use crate::migrate::migrate;

/// A loaded document after migration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    /// The configuration, upgraded to the current schema.
    pub configuration: BoxConfiguration,
    /// Envelope fields, when the document carried a complete set.
    pub envelope: Option<ExportEnvelope>,
    /// Schema version the document declared.
    pub source_version: SchemaVersion,
}

/// Deserialize a configuration from a JSON document.
pub fn load_configuration(json: &str) -> Result<BoxConfiguration, LoadError> {
    load_document(json).map(|doc| doc.configuration)
}

/// Deserialize a document, keeping its envelope and declared version.
///
/// The declared version is `exportVersion` when present, otherwise
/// `version`. Both must be compatible when present. Older documents are
/// migrated and come back stamped with the current version.
#[instrument(skip_all)]
pub fn load_document(json: &str) -> Result<LoadedDocument, LoadError> {
    let raw: Value = serde_json::from_str(json).map_err(|e| LoadError::InvalidFile(e.to_string()))?;
    let Value::Object(root) = &raw else {
        return Err(LoadError::InvalidFile(
            "expected a JSON object".to_string(),
        ));
    };

    let config_version = declared_version(root, "version")?;
    let export_version = declared_version(root, "exportVersion")?;
    let source_version = match export_version.or(config_version) {
        Some(v) => v,
        None => {
            return Err(LoadError::IncompatibleVersion {
                found: "missing".to_string(),
            })
        }
    };

    let envelope = serde_json::from_value::<ExportEnvelope>(raw.clone()).ok();

    let migrated = migrate(raw, source_version, SchemaVersion::CURRENT)?;
    let mut configuration: BoxConfiguration =
        serde_json::from_value(migrated).map_err(|e| LoadError::InvalidFile(e.to_string()))?;
    configuration.version = SchemaVersion::CURRENT.as_str().to_string();

    info!(from = %source_version, material = %configuration.material, "loaded configuration");
    Ok(LoadedDocument {
        configuration,
        envelope,
        source_version,
    })
}

/// Read a version key. Absent is `None`; present but unknown is an error.
fn declared_version(
    root: &Map<String, Value>,
    key: &str,
) -> Result<Option<SchemaVersion>, LoadError> {
    match root.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => SchemaVersion::parse(s)
            .map(Some)
            .ok_or_else(|| LoadError::IncompatibleVersion { found: s.clone() }),
        Some(other) => Err(LoadError::IncompatibleVersion {
            found: other.to_string(),
        }),
    }
}
