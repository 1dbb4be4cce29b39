//! `teachclone create` against the real router served on a local port.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use teachclone_core::{ChatTemplate, Result, TeacherProfile};
use teachclone_llm::TextGenerator;
use teachclone_server::create::{self, CreateOptions};
use teachclone_server::{build_router, AppState};
use teachclone_transcript::{CaptionItem, CaptionSource};

/// Answers persona prompts with a profile and everything else with an analysis.
struct StagedGenerator;

#[async_trait]
impl TextGenerator for StagedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if prompt.contains("\"useAnalogies\"") {
            return Ok(format!(
                "```json\n{}\n```",
                json!({
                    "name": "Professor Pace",
                    "style": "Worked examples",
                    "tone": "Encouraging",
                    "strengths": ["Pacing"],
                    "specializations": ["Statistics"],
                    "useAnalogies": false,
                    "stepByStep": true
                })
            ));
        }
        Ok("1. Teaching Style Analysis: steady and example-led.".into())
    }

    fn model_name(&self) -> &str {
        "staged"
    }
}

struct OneVideo;

#[async_trait]
impl CaptionSource for OneVideo {
    async fn fetch(&self, video_id: &str, _lang: Option<&str>) -> Result<Vec<CaptionItem>> {
        if video_id != "dQw4w9WgXcQ" {
            return Ok(Vec::new());
        }
        Ok(vec![CaptionItem {
            text: "Let's compute the mean.".into(),
            offset_secs: 0.0,
            duration_secs: 3.0,
        }])
    }
}

async fn spawn_server() -> String {
    let state = AppState::new(Arc::new(StagedGenerator), Arc::new(OneVideo), ChatTemplate::Elaborate);
    let app = build_router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}/api", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    base
}

#[tokio::test]
async fn test_create_writes_profile_file() {
    let server = spawn_server().await;
    let dir = tempfile::TempDir::new().unwrap();
    let output = dir.path().join("teacher.json");

    let created = create::run(CreateOptions {
        url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".into(),
        server,
        save: false,
        output: Some(output.clone()),
    })
    .await
    .unwrap();

    assert_eq!(created.transcript, "Let's compute the mean.");
    assert!(created.analysis.starts_with("1. Teaching Style Analysis"));

    let written: TeacherProfile =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written, created.profile);
    assert_eq!(written.name, "Professor Pace");
}

#[tokio::test]
async fn test_create_reports_missing_captions() {
    let server = spawn_server().await;

    let err = create::run(CreateOptions {
        url: "https://youtu.be/AAAAAAAAAAA".into(),
        server,
        save: false,
        output: Some(PathBuf::from("never-written.json")),
    })
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "No captions found for this video");
    assert!(!PathBuf::from("never-written.json").exists());
}
