use box_types::BoxConfiguration;
use export_pipeline::{CancellationToken, ExportError};
use file_format::LoadError;
use material_composer::{
    compose_material, FinishMarkers, OutlineDescriptor, OverlayDescriptor, SurfaceAppearance,
};
use serde::{Deserialize, Serialize};
use shell_geometry::{build_shells, BoxDimensions, GeometryConfig, GeometryError, ShellMesh};
use tracing::{debug, instrument};

/// Immutable description of one box, ready for a renderer to reconcile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub outer: ShellMesh,
    pub inner: ShellMesh,
    pub dimensions: BoxDimensions,
    pub appearance: SurfaceAppearance,
    pub overlays: Vec<OverlayDescriptor>,
    pub outlines: Vec<OutlineDescriptor>,
    pub markers: FinishMarkers,
}

impl SceneDescription {
    /// Derive the full scene for a configuration.
    pub fn describe(
        config: &BoxConfiguration,
        geometry: &GeometryConfig,
    ) -> Result<Self, GeometryError> {
        let shells = build_shells(config, geometry)?;
        let material = compose_material(config, &shells.outer);
        Ok(Self {
            outer: shells.outer,
            inner: shells.inner,
            dimensions: shells.dimensions,
            appearance: material.appearance,
            overlays: material.overlays,
            outlines: material.outlines,
            markers: material.markers,
        })
    }
}

/// Whatever draws the box. Receives a fresh description after every change
/// and owns any retained objects it builds from it.
pub trait RenderAdapter {
    fn apply_scene(&mut self, scene: &SceneDescription);
}

/// Bridge-wide settings.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Geometry settings for the live preview.
    pub preview: GeometryConfig,
    /// Geometry settings for exported artifacts.
    pub export: GeometryConfig,
    /// Filename stem for exports. Derived from the box size when `None`.
    pub base_name: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            preview: GeometryConfig::default(),
            export: GeometryConfig::strict(),
            base_name: None,
        }
    }
}

/// The engine state behind the bridge: the current configuration and the
/// scene derived from it.
pub struct EngineState {
    pub config: EngineConfig,
    configuration: BoxConfiguration,
    scene: SceneDescription,
    cancel: CancellationToken,
}

impl EngineState {
    /// Start from the default box.
    pub fn new(config: EngineConfig) -> Result<Self, BridgeError> {
        let configuration = BoxConfiguration::default();
        let scene = SceneDescription::describe(&configuration, &config.preview)?;
        Ok(Self {
            config,
            configuration,
            scene,
            cancel: CancellationToken::new(),
        })
    }

    pub fn configuration(&self) -> &BoxConfiguration {
        &self.configuration
    }

    pub fn scene(&self) -> &SceneDescription {
        &self.scene
    }

    /// Replace the configuration and rebuild the scene.
    ///
    /// On failure the previous configuration and scene are kept.
    #[instrument(skip_all)]
    pub fn update_configuration(
        &mut self,
        configuration: BoxConfiguration,
    ) -> Result<&SceneDescription, BridgeError> {
        let scene = SceneDescription::describe(&configuration, &self.config.preview)?;
        debug!(clamped = scene.dimensions.is_clamped(), "scene rebuilt");
        self.configuration = configuration;
        self.scene = scene;
        Ok(&self.scene)
    }

    /// Hand the current scene to a renderer.
    pub fn present(&self, adapter: &mut dyn RenderAdapter) {
        adapter.apply_scene(&self.scene);
    }

    /// Token honored by the next export dispatched on this state.
    ///
    /// `dispatch` runs an export to completion, so a cancel only lands when the
    /// token is cancelled from another thread while that export is running.
    /// A cancel issued while no export is running is discarded.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Token for an export that is about to start.
    pub(crate) fn begin_export(&mut self) -> CancellationToken {
        if self.cancel.is_cancelled() {
            debug!("discarding cancel issued while idle");
            self.cancel = CancellationToken::new();
        }
        self.cancel.clone()
    }

    /// Arm a fresh token once an export has ended, whatever its result.
    pub(crate) fn finish_export(&mut self) {
        self.cancel = CancellationToken::new();
    }
}

/// Errors from the bridge layer.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("export failed: {0}")]
    Export(#[from] ExportError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("malformed message: {reason}")]
    Message { reason: String },
}
