use box_types::BoxConfiguration;
use material_composer::{compose_material, MaterialComposition};
use shell_geometry::{build_shells, BoxShells, GeometryConfig, GeometryError};

/// Everything derived from one configuration that the serializers read.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSource {
    pub config: BoxConfiguration,
    pub shells: BoxShells,
    pub material: MaterialComposition,
}

impl ExportSource {
    /// Build the shells and compose the material in one go.
    pub fn derive(
        config: &BoxConfiguration,
        geometry: &GeometryConfig,
    ) -> Result<Self, GeometryError> {
        let shells = build_shells(config, geometry)?;
        let material = compose_material(config, &shells.outer);
        Ok(Self::from_parts(config.clone(), shells, material))
    }

    pub fn from_parts(
        config: BoxConfiguration,
        shells: BoxShells,
        material: MaterialComposition,
    ) -> Self {
        Self {
            config,
            shells,
            material,
        }
    }

    /// Default filename stem, e.g. `box-30x20x15cm`.
    pub fn default_base_name(&self) -> String {
        format!(
            "box-{}x{}x{}cm",
            self.config.length, self.config.width, self.config.height
        )
    }

    /// Ply label as shown in headers: the ply, or "n/a" for flat stock.
    pub fn ply_label(&self) -> &'static str {
        self.config.active_ply().map_or("n/a", |p| p.as_str())
    }
}
