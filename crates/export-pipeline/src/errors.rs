use shell_geometry::GeometryError;

use crate::format::ExportFormat;
use crate::progress::ExportPhase;

/// Errors from artifact generation and export orchestration.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unsupported format: {format}")]
    UnsupportedFormat { format: String },

    #[error("no export formats requested")]
    NothingRequested,

    #[error("geometry failed: {0}")]
    Geometry(#[from] GeometryError),

    #[error("{format} serialization failed: {reason}")]
    Serialization { format: ExportFormat, reason: String },

    #[error("export cancelled while {phase} ({delivered} files already delivered)")]
    Cancelled { phase: ExportPhase, delivered: usize },

    #[error("file sink rejected {filename}: {source}")]
    Sink {
        filename: String,
        #[source]
        source: std::io::Error,
    },
}
