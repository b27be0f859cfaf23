use box_types::BoxConfiguration;
use material_composer::compose_material;
use serde::{Deserialize, Serialize};
use shell_geometry::{build_shells, GeometryConfig};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::artifact::{Artifact, ArtifactContent, ExportContext};
use crate::dieline::{write_ai, write_dxf};
use crate::errors::ExportError;
use crate::format::{ExportFormat, Fidelity};
use crate::glb::write_glb;
use crate::obj::write_obj;
use crate::pdf::write_pdf;
use crate::progress::{CancellationToken, ExportPhase, ExportProgress, ProgressObserver};
use crate::sink::FileSink;
use crate::source::ExportSource;
use crate::spec_sheet::write_spec_text;
use crate::stl::write_ascii_stl;

/// Settings for one export run.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub geometry: GeometryConfig,
    pub context: ExportContext,
}

impl ExportConfig {
    /// Strict geometry, timestamped now.
    pub fn new() -> Self {
        Self {
            geometry: GeometryConfig::strict(),
            context: ExportContext::now(),
        }
    }

    pub fn with_context(context: ExportContext) -> Self {
        Self {
            geometry: GeometryConfig::strict(),
            context,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// What an artifact looked like when it was delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactSummary {
    pub format: ExportFormat,
    pub filename: String,
    pub mime_type: String,
    pub fidelity: Fidelity,
    pub bytes: usize,
}

impl From<&Artifact> for ArtifactSummary {
    fn from(artifact: &Artifact) -> Self {
        Self {
            format: artifact.format,
            filename: artifact.filename.clone(),
            mime_type: artifact.mime_type.to_string(),
            fidelity: artifact.fidelity,
            bytes: artifact.content.len(),
        }
    }
}

/// Result of a completed export run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutcome {
    pub job_id: Uuid,
    pub delivered: Vec<ArtifactSummary>,
}

/// Serialize an already-derived source into one format.
pub fn render_artifact(
    source: &ExportSource,
    format: ExportFormat,
    ctx: &ExportContext,
) -> Result<Artifact, ExportError> {
    let content = match format {
        ExportFormat::Obj => ArtifactContent::Text(write_obj(source, ctx)),
        ExportFormat::Stl => ArtifactContent::Text(write_ascii_stl(source)),
        ExportFormat::Glb => ArtifactContent::Binary(write_glb(source)?),
        ExportFormat::Pdf => ArtifactContent::Binary(write_pdf(source, ctx)),
        ExportFormat::Txt => ArtifactContent::Text(write_spec_text(source, ctx)),
        ExportFormat::Ai => ArtifactContent::Text(write_ai(source, ctx)),
        ExportFormat::Dxf => ArtifactContent::Text(write_dxf(source)),
    };
    let stem = ctx
        .base_name
        .clone()
        .unwrap_or_else(|| source.default_base_name());
    Ok(Artifact {
        format,
        filename: format!("{}.{}", stem, format.extension()),
        mime_type: format.mime_type(),
        fidelity: format.fidelity(),
        content,
    })
}

/// Produce one artifact for a format named by the caller.
///
/// The format name is checked before any geometry work, so an unknown
/// name fails the same way for every configuration.
pub fn export_artifact(
    config: &BoxConfiguration,
    format_name: &str,
    export: &ExportConfig,
) -> Result<Artifact, ExportError> {
    let format = ExportFormat::parse(format_name)?;
    let source = ExportSource::derive(config, &export.geometry)?;
    render_artifact(&source, format, &export.context)
}

/// Tracks work units and reports each finished one.
struct Checkpoints<'a> {
    completed: usize,
    delivered: usize,
    total: usize,
    observer: &'a mut dyn ProgressObserver,
    cancel: &'a CancellationToken,
}

impl Checkpoints<'_> {
    fn percent(&self) -> u8 {
        ExportProgress::at(self.completed, self.total, None).percent
    }

    /// Fail if cancellation was requested since the last checkpoint.
    fn ensure_live(&self) -> Result<(), ExportError> {
        if self.cancel.is_cancelled() {
            let phase = ExportPhase::for_percent(self.percent());
            warn!(
                %phase,
                completed = self.completed,
                delivered = self.delivered,
                "export cancelled"
            );
            return Err(ExportError::Cancelled {
                phase,
                delivered: self.delivered,
            });
        }
        Ok(())
    }

    fn advance(&mut self, detail: &str) {
        self.completed += 1;
        let progress = ExportProgress::at(self.completed, self.total, Some(detail));
        debug!(percent = progress.percent, phase = %progress.phase, detail, "checkpoint");
        self.observer.on_progress(&progress);
    }
}

/// Run a full export: derive geometry, compose the material, serialize
/// every requested format, then hand each artifact to the sink.
///
/// Nothing reaches the sink unless every format serialized. Cancellation
/// is honored between work units, hand-offs included; files handed off
/// before the cancel stay delivered and are counted in the error.
/// A format named more than once is produced once.
#[instrument(skip_all, fields(formats = ?formats))]
pub fn run_export(
    config: &BoxConfiguration,
    formats: &[String],
    export: &ExportConfig,
    observer: &mut dyn ProgressObserver,
    cancel: &CancellationToken,
    sink: &mut dyn FileSink,
) -> Result<ExportOutcome, ExportError> {
    if formats.is_empty() {
        return Err(ExportError::NothingRequested);
    }
    let mut parsed: Vec<ExportFormat> = Vec::with_capacity(formats.len());
    for name in formats {
        let format = ExportFormat::parse(name)?;
        if parsed.contains(&format) {
            debug!(%format, name = name.as_str(), "duplicate format ignored");
        } else {
            parsed.push(format);
        }
    }

    let job_id = Uuid::new_v4();
    info!(%job_id, count = parsed.len(), "starting export");

    let mut steps = Checkpoints {
        completed: 0,
        delivered: 0,
        total: 2 + 2 * parsed.len(),
        observer,
        cancel,
    };

    steps.ensure_live()?;
    let shells = build_shells(config, &export.geometry)?;
    steps.advance("geometry");

    steps.ensure_live()?;
    let material = compose_material(config, &shells.outer);
    steps.advance("materials");

    let source = ExportSource::from_parts(config.clone(), shells, material);

    let mut artifacts = Vec::with_capacity(parsed.len());
    for format in parsed {
        steps.ensure_live()?;
        let artifact = render_artifact(&source, format, &export.context)?;
        debug!(%format, bytes = artifact.content.len(), "serialized");
        artifacts.push(artifact);
        steps.advance(format.extension());
    }

    let mut delivered = Vec::with_capacity(artifacts.len());
    for artifact in &artifacts {
        steps.ensure_live()?;
        sink.write(
            artifact.content.as_bytes(),
            &artifact.filename,
            artifact.mime_type,
        )
        .map_err(|source| ExportError::Sink {
            filename: artifact.filename.clone(),
            source,
        })?;
        delivered.push(ArtifactSummary::from(artifact));
        steps.delivered += 1;
        steps.advance(&artifact.filename);
    }

    info!(%job_id, delivered = delivered.len(), "export finished");
    Ok(ExportOutcome { job_id, delivered })
}
