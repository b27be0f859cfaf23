use box_types::{Material, Ply, SchemaVersion};
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::LoadError;

/// Upgrade a raw document from `from` to `to`, one schema step at a time.
///
/// Each step only fills in keys that are absent; values already present are
/// never rewritten.
pub fn migrate(
    mut document: Value,
    from: SchemaVersion,
    to: SchemaVersion,
) -> Result<Value, LoadError> {
    let mut current = from;
    while current < to {
        let Some(next) = current.next() else {
            return Err(failed(current, to, "no migration path"));
        };
        document = match current {
            SchemaVersion::V3_0 => migrate_v3_0_to_v3_1(document)?,
            SchemaVersion::V3_1 => return Err(failed(current, next, "no migration defined")),
        };
        debug!(from = %current, to = %next, "migrated document");
        current = next;
    }
    Ok(document)
}

/// 3.1 introduced the ply selection and an explicit printing type.
fn migrate_v3_0_to_v3_1(mut document: Value) -> Result<Value, LoadError> {
    let (from, to) = (SchemaVersion::V3_0, SchemaVersion::V3_1);
    let root = document
        .as_object_mut()
        .ok_or_else(|| failed(from, to, "document is not an object"))?;

    if !root.contains_key("ply") {
        let corrugated = root
            .get("material")
            .and_then(Value::as_str)
            .map_or(false, |m| Material::from(m).is_corrugated());
        let ply = if corrugated { Ply::ThreePly } else { Ply::None };
        root.insert("ply".to_string(), Value::from(ply.as_str()));
    }

    match root.get_mut("printing") {
        None => {
            root.insert("printing".to_string(), Value::Object(default_printing()));
        }
        Some(Value::Object(printing)) => {
            printing
                .entry("type")
                .or_insert_with(|| Value::from("none"));
        }
        Some(_) => return Err(failed(from, to, "printing is not an object")),
    }

    Ok(document)
}

fn default_printing() -> Map<String, Value> {
    let mut printing = Map::new();
    printing.insert("enabled".to_string(), Value::from(false));
    printing.insert("type".to_string(), Value::from("none"));
    printing.insert("colors".to_string(), Value::from(0));
    printing.insert("coverage".to_string(), Value::from("none"));
    printing
}

fn failed(from: SchemaVersion, to: SchemaVersion, reason: &str) -> LoadError {
    LoadError::MigrationFailed {
        from: from.to_string(),
        to: to.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fills_ply_for_corrugated() {
        let doc = json!({ "material": "corrugated", "printing": { "enabled": false } });
        let out = migrate(doc, SchemaVersion::V3_0, SchemaVersion::V3_1).unwrap();
        assert_eq!(out["ply"], "3-ply");
        assert_eq!(out["printing"]["type"], "none");
    }

    #[test]
    fn flat_stock_gets_no_ply() {
        let doc = json!({ "material": "kraft" });
        let out = migrate(doc, SchemaVersion::V3_0, SchemaVersion::V3_1).unwrap();
        assert_eq!(out["ply"], "none");
        assert_eq!(out["printing"]["coverage"], "none");
    }

    #[test]
    fn present_values_survive() {
        let doc = json!({
            "material": "corrugated",
            "ply": "7-ply",
            "printing": { "type": "offset" }
        });
        let out = migrate(doc, SchemaVersion::V3_0, SchemaVersion::V3_1).unwrap();
        assert_eq!(out["ply"], "7-ply");
        assert_eq!(out["printing"]["type"], "offset");
    }

    #[test]
    fn same_version_is_untouched() {
        let doc = json!({ "material": "corrugated" });
        let out = migrate(doc.clone(), SchemaVersion::V3_1, SchemaVersion::V3_1).unwrap();
        assert_eq!(out, doc);
    }

    #[test]
    fn malformed_printing_fails() {
        let doc = json!({ "material": "art", "printing": "none" });
        let err = migrate(doc, SchemaVersion::V3_0, SchemaVersion::V3_1).unwrap_err();
        assert!(matches!(err, LoadError::MigrationFailed { ref from, .. } if from == "3.0"));
    }
}
