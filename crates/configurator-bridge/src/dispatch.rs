use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::Utc;
use export_pipeline::{
    run_export, ArtifactSummary, DeliveredFile, ExportConfig, ExportContext, ExportProgress,
    MemorySink,
};
use file_format::{load_configuration, save_configuration};
use tracing::{info, warn};

use crate::engine_state::{BridgeError, EngineState};
use crate::messages::{ArtifactEncoding, EngineToUi, UiToEngine};

/// Dispatch a UI message to the engine and return the replies, in order.
///
/// Failures become a trailing `EngineToUi::Error`. Progress messages sent
/// before a failed export are kept so the UI can show how far it got.
pub fn dispatch(state: &mut EngineState, msg: UiToEngine) -> Vec<EngineToUi> {
    let mut replies = Vec::new();
    if let Err(e) = handle_message(state, msg, &mut replies) {
        warn!(error = %e, "message failed");
        replies.push(EngineToUi::Error {
            message: e.to_string(),
        });
    }
    replies
}

/// Parse a JSON `UiToEngine` message and dispatch it.
///
/// A message that does not parse yields a single `EngineToUi::Error`.
pub fn dispatch_json(state: &mut EngineState, json: &str) -> Vec<EngineToUi> {
    match serde_json::from_str::<UiToEngine>(json) {
        Ok(msg) => dispatch(state, msg),
        Err(e) => {
            let error = BridgeError::Message {
                reason: e.to_string(),
            };
            warn!(error = %error, "message rejected");
            vec![EngineToUi::Error {
                message: error.to_string(),
            }]
        }
    }
}

fn handle_message(
    state: &mut EngineState,
    msg: UiToEngine,
    replies: &mut Vec<EngineToUi>,
) -> Result<(), BridgeError> {
    match msg {
        UiToEngine::UpdateConfiguration { configuration } => {
            let scene = state.update_configuration(configuration)?.clone();
            replies.push(EngineToUi::SceneUpdated { scene });
        }

        UiToEngine::RequestScene => {
            replies.push(EngineToUi::SceneUpdated {
                scene: state.scene().clone(),
            });
        }

        UiToEngine::ExportArtifacts { formats, base_name } => {
            export_artifacts(state, &formats, base_name, replies)?;
        }

        UiToEngine::SaveConfiguration => {
            let json_data = save_configuration(state.configuration(), Utc::now());
            replies.push(EngineToUi::SaveReady { json_data });
        }

        UiToEngine::LoadConfiguration { data } => {
            let configuration = load_configuration(&data)?;
            let scene = state.update_configuration(configuration)?.clone();
            replies.push(EngineToUi::ConfigurationLoaded {
                configuration: state.configuration().clone(),
            });
            replies.push(EngineToUi::SceneUpdated { scene });
        }
    }
    Ok(())
}

fn export_artifacts(
    state: &mut EngineState,
    formats: &[String],
    base_name: Option<String>,
    replies: &mut Vec<EngineToUi>,
) -> Result<(), BridgeError> {
    let cancel = state.begin_export();
    let mut context = ExportContext::now();
    context.base_name = base_name.or_else(|| state.config.base_name.clone());
    let export = ExportConfig {
        geometry: state.config.export,
        context,
    };

    let mut sink = MemorySink::new();
    let mut observer = |progress: &ExportProgress| {
        replies.push(EngineToUi::ExportProgress {
            progress: progress.clone(),
        })
    };
    let result = run_export(
        state.configuration(),
        formats,
        &export,
        &mut observer,
        &cancel,
        &mut sink,
    );
    state.finish_export();
    let outcome = result?;

    for (file, summary) in sink.files.into_iter().zip(&outcome.delivered) {
        replies.push(artifact_message(file, summary));
    }
    info!(job_id = %outcome.job_id, "export delivered to the UI");
    replies.push(EngineToUi::ExportFinished { outcome });
    Ok(())
}

/// Text formats travel as-is; binary ones as base64.
fn artifact_message(file: DeliveredFile, summary: &ArtifactSummary) -> EngineToUi {
    let (encoding, data) = if summary.format.is_binary() {
        (ArtifactEncoding::Base64, STANDARD.encode(&file.content))
    } else {
        match String::from_utf8(file.content) {
            Ok(text) => (ArtifactEncoding::Text, text),
            Err(e) => (ArtifactEncoding::Base64, STANDARD.encode(e.into_bytes())),
        }
    };
    EngineToUi::ArtifactReady {
        filename: file.filename,
        mime_type: file.mime_type,
        fidelity: summary.fidelity,
        encoding,
        data,
    }
}
