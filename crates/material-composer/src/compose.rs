use box_types::{BoxConfiguration, Ply};
use serde::{Deserialize, Serialize};
use shell_geometry::ShellMesh;
use tracing::{debug, instrument};

use crate::appearance::{base_properties, Rgb, SurfaceAppearance};
use crate::overlay::{OutlineDescriptor, OverlayDescriptor};

/// Finishes that only mark the design. Nothing is displaced for them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishMarkers {
    pub embossing: bool,
    pub foil_stamping: bool,
}

/// Everything the renderer needs to shade one box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialComposition {
    pub appearance: SurfaceAppearance,
    pub overlays: Vec<OverlayDescriptor>,
    pub outlines: Vec<OutlineDescriptor>,
    pub markers: FinishMarkers,
}

/// Compose the surface of a box from its material, finishes and ply.
///
/// Lamination then UV coating are applied to the base properties in that
/// order; each also contributes a translucent overlay shell. Corrugated 5-ply
/// and 7-ply board get a dark outline over the outer shell edges.
#[instrument(skip_all, fields(material = %config.material))]
pub fn compose_material(config: &BoxConfiguration, outer: &ShellMesh) -> MaterialComposition {
    let (mut roughness, mut metalness) = base_properties(&config.material);
    let mut overlays = Vec::new();

    if config.finishing.lamination {
        roughness *= 0.3;
        metalness += 0.1;
        overlays.push(OverlayDescriptor::lamination());
    }
    if config.finishing.uv_coating {
        roughness *= 0.1;
        metalness += 0.2;
        overlays.push(OverlayDescriptor::uv_coating());
    }

    let appearance = SurfaceAppearance {
        roughness: roughness.clamp(0.0, 1.0),
        metalness: metalness.clamp(0.0, 1.0),
        base_color: Rgb::from_hex_or_white(&config.color),
    };

    let outlines = match config.active_ply() {
        Some(Ply::FivePly) => vec![ply_outline(outer, Rgb::grey(0.2), 1.5)],
        Some(Ply::SevenPly) => vec![ply_outline(outer, Rgb::grey(0.13), 2.5)],
        _ => Vec::new(),
    };

    debug!(
        roughness = appearance.roughness,
        metalness = appearance.metalness,
        overlays = overlays.len(),
        outlines = outlines.len(),
        "composed material"
    );

    MaterialComposition {
        appearance,
        overlays,
        outlines,
        markers: FinishMarkers {
            embossing: config.finishing.embossing,
            foil_stamping: config.finishing.foil_stamping,
        },
    }
}

fn ply_outline(outer: &ShellMesh, color: Rgb, line_width: f32) -> OutlineDescriptor {
    let segments = outer
        .edges()
        .into_iter()
        .map(|[a, b]| [outer.vertices[a as usize], outer.vertices[b as usize]])
        .collect();
    OutlineDescriptor {
        segments,
        color,
        line_width,
    }
}
