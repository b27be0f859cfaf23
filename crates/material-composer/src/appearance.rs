use box_types::Material;
use serde::{Deserialize, Serialize};

/// sRGB-encoded 0..1 RGB color, as parsed from `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn from_bytes([r, g, b]: [u8; 3]) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse a `#RRGGBB` / `#RGB` string, falling back to white.
    pub fn from_hex_or_white(hex: &str) -> Self {
        box_types::parse_hex_color(hex)
            .map(Self::from_bytes)
            .unwrap_or(Self::WHITE)
    }

    pub fn grey(level: f32) -> Self {
        Self {
            r: level,
            g: level,
            b: level,
        }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Decode the sRGB transfer curve. glTF material factors are linear.
    pub fn to_linear(&self) -> Rgb {
        fn decode(c: f32) -> f32 {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        Rgb {
            r: decode(self.r),
            g: decode(self.g),
            b: decode(self.b),
        }
    }
}

/// Physically-based surface parameters handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceAppearance {
    pub roughness: f32,
    pub metalness: f32,
    pub base_color: Rgb,
}

/// Untreated (roughness, metalness) of each board stock.
///
/// Unknown stock is rendered like corrugated board.
pub fn base_properties(material: &Material) -> (f32, f32) {
    match material {
        Material::Corrugated => (0.8, 0.1),
        Material::Kraft => (0.9, 0.05),
        Material::Duplex => (0.4, 0.2),
        Material::Art => (0.2, 0.3),
        Material::Other(_) => (0.8, 0.1),
    }
}
