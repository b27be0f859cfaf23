use box_types::BoxConfiguration;
use export_pipeline::{ExportOutcome, ExportProgress, Fidelity};
use serde::{Deserialize, Serialize};

use crate::engine_state::SceneDescription;

/// Messages from the UI to the engine.
/// Serialized as JSON for postMessage transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiToEngine {
    /// The user edited the box; replaces the whole configuration.
    UpdateConfiguration { configuration: BoxConfiguration },
    /// Resend the current scene.
    RequestScene,
    /// Export the current configuration in the named formats.
    ExportArtifacts {
        formats: Vec<String>,
        #[serde(default)]
        base_name: Option<String>,
    },
    /// Serialize the current configuration as an interchange document.
    SaveConfiguration,
    /// Replace the configuration with one read from a document.
    LoadConfiguration { data: String },
}

/// How artifact data is carried in a JSON message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactEncoding {
    Text,
    Base64,
}

/// Messages from the engine to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineToUi {
    /// A new scene for the renderer.
    SceneUpdated { scene: SceneDescription },

    /// An export checkpoint was reached.
    ExportProgress { progress: ExportProgress },

    /// One exported file, for the host to download or store.
    ArtifactReady {
        filename: String,
        mime_type: String,
        fidelity: Fidelity,
        encoding: ArtifactEncoding,
        data: String,
    },

    /// Every requested artifact was delivered.
    ExportFinished { outcome: ExportOutcome },

    /// Save document is ready.
    SaveReady { json_data: String },

    /// A document was loaded and is now the current configuration.
    ConfigurationLoaded { configuration: BoxConfiguration },

    /// An error occurred in the engine.
    Error { message: String },
}
