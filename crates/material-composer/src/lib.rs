//! Surface appearance for a box configuration.
//!
//! Maps board material and finishing treatments to PBR-style parameters,
//! plus the extra overlay shells and edge outlines a renderer should draw.

pub mod appearance;
pub mod compose;
pub mod overlay;

pub use appearance::{base_properties, Rgb, SurfaceAppearance};
pub use compose::{compose_material, FinishMarkers, MaterialComposition};
pub use overlay::{OutlineDescriptor, OverlayDescriptor, OverlayKind};
