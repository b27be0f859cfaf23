use serde::{Deserialize, Serialize};
use shell_geometry::Vec3;

use crate::appearance::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayKind {
    Lamination,
    UvCoating,
}

/// A translucent copy of the outer shell, inflated about its center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayDescriptor {
    pub kind: OverlayKind,
    /// Uniform scale applied to the outer shell.
    pub scale: f32,
    pub color: Rgb,
    pub opacity: f32,
    pub roughness: f32,
    pub metalness: f32,
}

impl OverlayDescriptor {
    pub fn lamination() -> Self {
        Self {
            kind: OverlayKind::Lamination,
            scale: 1.002,
            color: Rgb::WHITE,
            opacity: 0.1,
            roughness: 0.1,
            metalness: 0.0,
        }
    }

    pub fn uv_coating() -> Self {
        Self {
            kind: OverlayKind::UvCoating,
            scale: 1.003,
            color: Rgb::WHITE,
            opacity: 0.15,
            roughness: 0.02,
            metalness: 0.1,
        }
    }
}

/// Wireframe drawn over the outer shell edges to suggest wall build-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineDescriptor {
    /// Line segments in shell coordinates (meters).
    pub segments: Vec<[Vec3; 2]>,
    pub color: Rgb,
    pub line_width: f32,
}
