use serde::{Deserialize, Serialize};

use crate::material::{Finishing, Material, Ply};
use crate::printing::Printing;
use crate::version::SchemaVersion;

/// A complete box specification as produced by the configurator UI.
///
/// Treated as an immutable value: every edit in the UI produces a new
/// configuration which is fed wholesale to geometry, material and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxConfiguration {
    /// External length in centimeters.
    pub length: f64,
    /// External width in centimeters.
    pub width: f64,
    /// External height in centimeters.
    pub height: f64,
    /// Nominal wall thickness in millimeters.
    pub thickness: f64,
    pub material: Material,
    /// Ignored unless `material` is corrugated.
    pub ply: Ply,
    /// Flute code ("A", "B", "C", "E", "BC"). Ignored unless corrugated.
    pub flute: String,
    /// Paper weight in grams per square meter.
    pub gsm: u32,
    /// Base surface tint as a hex string.
    pub color: String,
    pub printing: Printing,
    pub finishing: Finishing,
    pub quantity: u32,
    pub moq: u32,
    pub custom_requirements: String,
    pub urgent_delivery: bool,
    /// Schema version this value conforms to.
    pub version: String,
}

impl Default for BoxConfiguration {
    fn default() -> Self {
        Self {
            length: 30.0,
            width: 20.0,
            height: 15.0,
            thickness: 3.0,
            material: Material::Corrugated,
            ply: Ply::ThreePly,
            flute: "B".to_string(),
            gsm: 150,
            color: "#8B4513".to_string(),
            printing: Printing::default(),
            finishing: Finishing::default(),
            quantity: 1000,
            moq: 500,
            custom_requirements: String::new(),
            urgent_delivery: false,
            version: SchemaVersion::CURRENT.as_str().to_string(),
        }
    }
}

impl BoxConfiguration {
    /// The ply selection, if it has any effect for this material.
    pub fn active_ply(&self) -> Option<Ply> {
        self.material.is_corrugated().then_some(self.ply)
    }

    /// The flute code, if it has any effect for this material.
    pub fn active_flute(&self) -> Option<&str> {
        self.material
            .is_corrugated()
            .then_some(self.flute.as_str())
    }

    pub fn schema_version(&self) -> Option<SchemaVersion> {
        SchemaVersion::parse(&self.version)
    }

    /// Base tint as RGB bytes, if `color` is a `#RRGGBB` or `#RGB` string.
    pub fn color_rgb(&self) -> Option<[u8; 3]> {
        parse_hex_color(&self.color)
    }
}

/// Parse `#RRGGBB` or `#RGB` (leading `#` optional).
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some([r, g, b])
        }
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                out[i] = v * 17;
            }
            Some(out)
        }
        _ => None,
    }
}
