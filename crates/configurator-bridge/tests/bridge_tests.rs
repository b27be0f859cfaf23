use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use box_types::{BoxConfiguration, Material, Ply};
use configurator_bridge::*;
use export_pipeline::{ExportPhase, Fidelity};

// ── Helper functions ─────────────────────────────────────────────────────

fn engine() -> EngineState {
    EngineState::new(EngineConfig::default()).unwrap()
}

fn seven_ply() -> BoxConfiguration {
    BoxConfiguration {
        material: Material::Corrugated,
        ply: Ply::SevenPly,
        ..BoxConfiguration::default()
    }
}

#[derive(Default)]
struct RecordingRenderer {
    scenes: Vec<SceneDescription>,
}

impl RenderAdapter for RecordingRenderer {
    fn apply_scene(&mut self, scene: &SceneDescription) {
        self.scenes.push(scene.clone());
    }
}

fn error_message(replies: &[EngineToUi]) -> Option<&str> {
    replies.iter().find_map(|r| match r {
        EngineToUi::Error { message } => Some(message.as_str()),
        _ => None,
    })
}

// ── Scene updates ────────────────────────────────────────────────────────

#[test]
fn update_rebuilds_the_scene() {
    let mut state = engine();
    let replies = dispatch(
        &mut state,
        UiToEngine::UpdateConfiguration {
            configuration: seven_ply(),
        },
    );
    assert_eq!(replies.len(), 1);
    match &replies[0] {
        EngineToUi::SceneUpdated { scene } => {
            assert_eq!(scene.outlines.len(), 1);
            approx::assert_relative_eq!(scene.dimensions.wall, 0.006, epsilon = 1e-12);
        }
        other => panic!("unexpected reply: {:?}", other),
    }
    assert_eq!(state.configuration().ply, Ply::SevenPly);
}

#[test]
fn invalid_update_keeps_previous_state() {
    let mut state = engine();
    let before = state.scene().clone();
    let replies = dispatch(
        &mut state,
        UiToEngine::UpdateConfiguration {
            configuration: BoxConfiguration {
                length: -3.0,
                ..BoxConfiguration::default()
            },
        },
    );
    assert!(error_message(&replies).is_some());
    assert_eq!(state.scene(), &before);
    assert_eq!(state.configuration(), &BoxConfiguration::default());
}

#[test]
fn renderer_receives_the_current_scene() {
    let mut state = engine();
    let mut renderer = RecordingRenderer::default();
    state.present(&mut renderer);
    state.update_configuration(seven_ply()).unwrap();
    state.present(&mut renderer);
    assert_eq!(renderer.scenes.len(), 2);
    assert!(renderer.scenes[0].outlines.is_empty());
    assert_eq!(&renderer.scenes[1], state.scene());
}

#[test]
fn request_scene_echoes_state() {
    let mut state = engine();
    let replies = dispatch(&mut state, UiToEngine::RequestScene);
    assert!(matches!(&replies[..], [EngineToUi::SceneUpdated { scene }] if scene == state.scene()));
}

// ── Export ───────────────────────────────────────────────────────────────

#[test]
fn export_streams_progress_then_artifacts() {
    let mut state = engine();
    let replies = dispatch(
        &mut state,
        UiToEngine::ExportArtifacts {
            formats: vec!["obj".to_string(), "glb".to_string(), "dxf".to_string()],
            base_name: Some("quote-7".to_string()),
        },
    );
    assert!(error_message(&replies).is_none());

    let progress: Vec<_> = replies
        .iter()
        .filter_map(|r| match r {
            EngineToUi::ExportProgress { progress } => Some(progress),
            _ => None,
        })
        .collect();
    assert_eq!(progress.len(), 8);
    assert_eq!(progress.last().unwrap().phase, ExportPhase::Finalizing);

    let artifacts: Vec<_> = replies
        .iter()
        .filter_map(|r| match r {
            EngineToUi::ArtifactReady {
                filename,
                encoding,
                data,
                fidelity,
                ..
            } => Some((filename.as_str(), *encoding, data.as_str(), *fidelity)),
            _ => None,
        })
        .collect();
    assert_eq!(artifacts.len(), 3);

    let (name, encoding, data, _) = artifacts[0];
    assert_eq!(name, "quote-7.obj");
    assert_eq!(encoding, ArtifactEncoding::Text);
    assert!(data.contains("o packaging_box"));

    let (name, encoding, data, _) = artifacts[1];
    assert_eq!(name, "quote-7.glb");
    assert_eq!(encoding, ArtifactEncoding::Base64);
    let bytes = STANDARD.decode(data).unwrap();
    assert_eq!(&bytes[..4], b"glTF");

    assert_eq!(artifacts[2].3, Fidelity::FootprintOnly);

    match replies.last().unwrap() {
        EngineToUi::ExportFinished { outcome } => assert_eq!(outcome.delivered.len(), 3),
        other => panic!("unexpected reply: {:?}", other),
    }
}

#[test]
fn export_of_unknown_format_is_an_error() {
    let mut state = engine();
    let replies = dispatch(
        &mut state,
        UiToEngine::ExportArtifacts {
            formats: vec!["zzz".to_string()],
            base_name: None,
        },
    );
    assert_eq!(replies.len(), 1);
    assert_eq!(
        error_message(&replies),
        Some("export failed: unsupported format: zzz")
    );
}

fn export_stl(state: &mut EngineState) -> Vec<EngineToUi> {
    dispatch(
        state,
        UiToEngine::ExportArtifacts {
            formats: vec!["stl".to_string()],
            base_name: None,
        },
    )
}

#[test]
fn stale_cancel_does_not_affect_next_export() {
    let mut state = engine();
    state.cancellation().cancel();
    let replies = export_stl(&mut state);
    assert!(error_message(&replies).is_none());
    assert!(replies
        .iter()
        .any(|r| matches!(r, EngineToUi::ArtifactReady { .. })));

    // A token held past the end of an export no longer reaches later ones.
    let held = state.cancellation();
    assert!(error_message(&export_stl(&mut state)).is_none());
    held.cancel();
    assert!(!state.cancellation().is_cancelled());
    assert!(error_message(&export_stl(&mut state)).is_none());
}

// ── Persistence ──────────────────────────────────────────────────────────

#[test]
fn save_then_load_restores_configuration() {
    let mut state = engine();
    state.update_configuration(seven_ply()).unwrap();
    let json_data = match dispatch(&mut state, UiToEngine::SaveConfiguration).pop() {
        Some(EngineToUi::SaveReady { json_data }) => json_data,
        other => panic!("unexpected reply: {:?}", other),
    };

    let mut fresh = engine();
    let replies = dispatch(&mut fresh, UiToEngine::LoadConfiguration { data: json_data });
    assert!(matches!(replies[0], EngineToUi::ConfigurationLoaded { .. }));
    assert!(matches!(replies[1], EngineToUi::SceneUpdated { .. }));
    assert_eq!(fresh.configuration(), &seven_ply());
}

#[test]
fn load_of_unknown_version_reports_it() {
    let mut state = engine();
    let replies = dispatch(
        &mut state,
        UiToEngine::LoadConfiguration {
            data: r#"{"version":"9.9"}"#.to_string(),
        },
    );
    assert_eq!(
        error_message(&replies),
        Some("incompatible configuration version: 9.9")
    );
}

// ── Wire format ──────────────────────────────────────────────────────────

#[test]
fn malformed_json_is_reported() {
    let mut state = engine();
    let replies = dispatch_json(&mut state, r#"{"type":"Explode"}"#);
    assert_eq!(replies.len(), 1);
    assert!(error_message(&replies)
        .unwrap()
        .starts_with("malformed message:"));

    let replies = dispatch_json(&mut state, r#"{"type":"RequestScene"}"#);
    assert!(matches!(replies[..], [EngineToUi::SceneUpdated { .. }]));
}

#[test]
fn messages_use_type_tags() {
    let msg: UiToEngine = serde_json::from_str(r#"{"type":"ExportArtifacts","formats":["OBJ"]}"#).unwrap();
    assert!(matches!(msg, UiToEngine::ExportArtifacts { ref formats, base_name: None } if formats == &["OBJ"]));

    let reply = serde_json::to_value(EngineToUi::Error {
        message: "boom".to_string(),
    })
    .unwrap();
    assert_eq!(reply["type"], "Error");
}
