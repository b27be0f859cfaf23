use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Board stock the box is made from.
///
/// Unrecognised names are kept verbatim in `Other` so that a document
/// written by a newer configurator still round-trips. Validation rejects them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Material {
    Corrugated,
    Kraft,
    Duplex,
    Art,
    Other(String),
}

impl Material {
    pub fn as_str(&self) -> &str {
        match self {
            Material::Corrugated => "corrugated",
            Material::Kraft => "kraft",
            Material::Duplex => "duplex",
            Material::Art => "art",
            Material::Other(name) => name,
        }
    }

    pub fn is_corrugated(&self) -> bool {
        matches!(self, Material::Corrugated)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Material::Other(_))
    }
}

impl From<&str> for Material {
    fn from(name: &str) -> Self {
        match name {
            "corrugated" => Material::Corrugated,
            "kraft" => Material::Kraft,
            "duplex" => Material::Duplex,
            "art" => Material::Art,
            other => Material::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Plain string on the wire, see the type docs for unknown names.
impl Serialize for Material {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Material {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(|s| Material::from(s.as_str()))
    }
}

/// Number of corrugated layers. Only meaningful for corrugated board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ply {
    #[serde(rename = "3-ply")]
    ThreePly,
    #[serde(rename = "5-ply")]
    FivePly,
    #[serde(rename = "7-ply")]
    SevenPly,
    #[serde(rename = "none")]
    None,
}

impl Ply {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ply::ThreePly => "3-ply",
            Ply::FivePly => "5-ply",
            Ply::SevenPly => "7-ply",
            Ply::None => "none",
        }
    }

    /// Wall thickness multiplier relative to the nominal thickness.
    pub fn thickness_factor(&self) -> f64 {
        match self {
            Ply::FivePly => 1.5,
            Ply::SevenPly => 2.0,
            Ply::ThreePly | Ply::None => 1.0,
        }
    }
}

impl fmt::Display for Ply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scale applied to the corrugation ripple for a flute code.
///
/// E flute is fine (half amplitude and frequency), BC double-wall is coarse.
/// Every other code ripples at the base rate.
pub fn flute_factor(flute: &str) -> f64 {
    match flute.trim().to_ascii_uppercase().as_str() {
        "E" => 0.5,
        "BC" => 1.5,
        _ => 1.0,
    }
}

/// Surface finishing treatments. All four are independent and composable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finishing {
    pub lamination: bool,
    pub uv_coating: bool,
    pub embossing: bool,
    pub foil_stamping: bool,
}

impl Finishing {
    /// Human-readable names of the enabled treatments, in application order.
    pub fn enabled_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.lamination {
            names.push("Lamination");
        }
        if self.uv_coating {
            names.push("UV Coating");
        }
        if self.embossing {
            names.push("Embossing");
        }
        if self.foil_stamping {
            names.push("Foil Stamping");
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_material_survives_as_other() {
        let m: Material = "bamboo".into();
        assert_eq!(m, Material::Other("bamboo".to_string()));
        assert_eq!(m.as_str(), "bamboo");
        assert!(!m.is_known());
    }

    #[test]
    fn ply_factors_are_monotonic() {
        assert!(Ply::ThreePly.thickness_factor() < Ply::FivePly.thickness_factor());
        assert!(Ply::FivePly.thickness_factor() < Ply::SevenPly.thickness_factor());
        assert_eq!(Ply::None.thickness_factor(), 1.0);
    }

    #[test]
    fn flute_codes() {
        assert_eq!(flute_factor("E"), 0.5);
        assert_eq!(flute_factor("bc"), 1.5);
        assert_eq!(flute_factor("B"), 1.0);
        assert_eq!(flute_factor(""), 1.0);
    }

    #[test]
    fn finishing_names_follow_application_order() {
        let f = Finishing {
            lamination: true,
            uv_coating: false,
            embossing: true,
            foil_stamping: true,
        };
        assert_eq!(f.enabled_names(), vec!["Lamination", "Embossing", "Foil Stamping"]);
    }
}
