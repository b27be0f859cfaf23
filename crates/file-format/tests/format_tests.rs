use box_types::{BoxConfiguration, Coverage, Material, Ply, PrintingType, SchemaVersion};
use chrono::{TimeZone, Utc};
use file_format::*;
use proptest::prelude::*;
use serde_json::{json, Value};

// ── Helper Functions ─────────────────────────────────────────────────────

fn exported_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
}

fn printed_config() -> BoxConfiguration {
    let mut config = BoxConfiguration {
        length: 42.5,
        width: 31.0,
        height: 12.25,
        thickness: 4.0,
        material: Material::Corrugated,
        ply: Ply::FivePly,
        flute: "BC".to_string(),
        custom_requirements: "Fragile\nKeep dry".to_string(),
        urgent_delivery: true,
        ..BoxConfiguration::default()
    };
    config.printing.enabled = true;
    config.printing.printing_type = PrintingType::Offset;
    config.printing.colors = 4;
    config.printing.coverage = Coverage::Full;
    config.printing.custom_text = "ACME".to_string();
    config.finishing.lamination = true;
    config.finishing.foil_stamping = true;
    config
}

fn legacy_document(material: &str) -> String {
    json!({
        "length": 30.0,
        "width": 20.0,
        "height": 15.0,
        "thickness": 3.0,
        "material": material,
        "flute": "B",
        "gsm": 150,
        "color": "#8B4513",
        "printing": { "enabled": false, "colors": 0, "coverage": "none" },
        "finishing": {
            "lamination": false,
            "uvCoating": false,
            "embossing": false,
            "foilStamping": false
        },
        "quantity": 1000,
        "moq": 500,
        "customRequirements": "",
        "urgentDelivery": false,
        "version": "3.0"
    })
    .to_string()
}

// ── Save ─────────────────────────────────────────────────────────────────

#[test]
fn saved_document_carries_envelope() {
    let json = save_configuration(&printed_config(), exported_at());
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["exportVersion"], CURRENT_VERSION);
    assert_eq!(value["company"], COMPANY);
    assert_eq!(value["exportedAt"], "2024-06-01T08:00:00Z");
    assert_eq!(value["ply"], "5-ply");
    assert_eq!(value["printing"]["type"], "offset");
    assert_eq!(value["finishing"]["foilStamping"], true);
}

// ── Round trip ───────────────────────────────────────────────────────────

#[test]
fn round_trip_preserves_configuration() {
    let config = printed_config();
    let loaded = load_configuration(&save_configuration(&config, exported_at())).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn load_document_exposes_envelope() {
    let doc = load_document(&save_configuration(&printed_config(), exported_at())).unwrap();
    let envelope = doc.envelope.unwrap();
    assert_eq!(envelope.exported_at, exported_at());
    assert_eq!(envelope.company, COMPANY);
    assert_eq!(doc.source_version, SchemaVersion::CURRENT);
}

#[test]
fn bare_configuration_loads_without_envelope() {
    let json = serde_json::to_string(&BoxConfiguration::default()).unwrap();
    let doc = load_document(&json).unwrap();
    assert!(doc.envelope.is_none());
    assert_eq!(doc.configuration, BoxConfiguration::default());
}

// ── Migration ────────────────────────────────────────────────────────────

#[test]
fn legacy_corrugated_gets_three_ply() {
    let doc = load_document(&legacy_document("corrugated")).unwrap();
    assert_eq!(doc.source_version, SchemaVersion::V3_0);
    assert_eq!(doc.configuration.ply, Ply::ThreePly);
    assert_eq!(doc.configuration.printing.printing_type, PrintingType::None);
    assert_eq!(doc.configuration.version, "3.1");
}

#[test]
fn legacy_flat_stock_gets_no_ply() {
    let config = load_configuration(&legacy_document("duplex")).unwrap();
    assert_eq!(config.material, Material::Duplex);
    assert_eq!(config.ply, Ply::None);
}

#[test]
fn export_version_takes_precedence() {
    let mut value: Value = serde_json::from_str(&legacy_document("corrugated")).unwrap();
    value["version"] = json!("3.1");
    value["exportVersion"] = json!("3.0");
    let doc = load_document(&value.to_string()).unwrap();
    assert_eq!(doc.source_version, SchemaVersion::V3_0);
    assert_eq!(doc.configuration.ply, Ply::ThreePly);
}

// ── Failures ─────────────────────────────────────────────────────────────

#[test]
fn malformed_json_is_invalid_file() {
    let err = load_configuration("{ not json").unwrap_err();
    assert!(matches!(err, LoadError::InvalidFile(_)));
    assert!(err.to_string().starts_with("invalid configuration file"));
}

#[test]
fn non_object_is_invalid_file() {
    assert!(matches!(
        load_configuration("[1, 2, 3]"),
        Err(LoadError::InvalidFile(_))
    ));
}

#[test]
fn unknown_version_is_incompatible() {
    let mut value: Value = serde_json::from_str(&legacy_document("kraft")).unwrap();
    value["version"] = json!("4.0");
    let err = load_configuration(&value.to_string()).unwrap_err();
    assert_eq!(
        err,
        LoadError::IncompatibleVersion {
            found: "4.0".to_string()
        }
    );
    assert_eq!(err.to_string(), "incompatible configuration version: 4.0");
}

#[test]
fn unknown_export_version_is_incompatible_even_with_known_version() {
    let mut value: Value = serde_json::from_str(&legacy_document("kraft")).unwrap();
    value["exportVersion"] = json!("2.9");
    assert!(matches!(
        load_configuration(&value.to_string()),
        Err(LoadError::IncompatibleVersion { .. })
    ));
}

#[test]
fn missing_version_is_incompatible() {
    let mut value: Value = serde_json::from_str(&legacy_document("kraft")).unwrap();
    value.as_object_mut().unwrap().remove("version");
    assert!(matches!(
        load_configuration(&value.to_string()),
        Err(LoadError::IncompatibleVersion { ref found }) if found == "missing"
    ));
}

#[test]
fn missing_required_field_is_invalid_file() {
    let mut value: Value = serde_json::from_str(&legacy_document("kraft")).unwrap();
    value.as_object_mut().unwrap().remove("length");
    assert!(matches!(
        load_configuration(&value.to_string()),
        Err(LoadError::InvalidFile(_))
    ));
}

// ── Properties ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn round_trip_any_dimensions(
        length in 0.5f64..500.0,
        width in 0.5f64..500.0,
        height in 0.5f64..500.0,
        thickness in 0.1f64..20.0,
        quantity in 1u32..1_000_000,
        notes in "[a-zA-Z0-9 ]{0,40}",
    ) {
        let config = BoxConfiguration {
            length,
            width,
            height,
            thickness,
            quantity,
            custom_requirements: notes,
            ..BoxConfiguration::default()
        };
        let loaded = load_configuration(&save_configuration(&config, exported_at())).unwrap();
        prop_assert_eq!(loaded, config);
    }

    #[test]
    fn unknown_versions_never_load(version in "[0-9]\\.[0-9]{1,2}") {
        prop_assume!(SchemaVersion::parse(&version).is_none());
        let mut value: Value = serde_json::from_str(&legacy_document("art")).unwrap();
        value["version"] = json!(version);
        let is_incompatible = matches!(
            load_configuration(&value.to_string()),
            Err(LoadError::IncompatibleVersion { .. })
        );
        prop_assert!(is_incompatible);
    }
}
