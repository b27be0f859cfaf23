//! Artifact generation for the packaging configurator.
//!
//! Each format is a pure function of the derived box (`ExportSource`) and a
//! fixed `ExportContext`, so the same configuration always produces the same
//! bytes. `run_export` wraps them with progress reporting, cancellation and
//! delivery to a `FileSink`.

pub mod artifact;
pub mod dieline;
pub mod errors;
pub mod format;
pub mod glb;
pub mod obj;
pub mod pdf;
pub mod pipeline;
pub mod progress;
pub mod sink;
pub mod source;
pub mod spec_sheet;
pub mod stl;

pub use artifact::{Artifact, ArtifactContent, ExportContext};
pub use errors::ExportError;
pub use format::{ExportFormat, Fidelity};
pub use pipeline::{
    export_artifact, render_artifact, run_export, ArtifactSummary, ExportConfig, ExportOutcome,
};
pub use progress::{
    CancellationToken, ExportPhase, ExportProgress, IgnoreProgress, ProgressObserver,
};
pub use sink::{DeliveredFile, DirectorySink, FileSink, MemorySink};
pub use source::ExportSource;
pub use spec_sheet::{SheetSection, SpecSheet};
