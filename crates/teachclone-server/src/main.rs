//! TeachClone: learn from a YouTube teacher's clone.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use teachclone_core::TeachCloneConfig;
use teachclone_server::create::{self, CreateOptions};
use teachclone_server::tutor::{self, TutorOptions};
use teachclone_server::{build_router, AppState};

fn print_usage() {
    println!("TeachClone - chat with a clone of a YouTube teacher");
    println!();
    println!("Usage: teachclone [command]");
    println!();
    println!("Commands:");
    println!("  (none) | serve                              Start the HTTP server");
    println!("  create <youtube-url> [--server URL] [--save] [-o file]  Build a teacher from a video");
    println!("  tutor [profile.json] [--server URL] [--mute]  Chat with a teacher in the terminal");
    println!("  help                                        Show this help message");
}

async fn serve() -> anyhow::Result<()> {
    let config = TeachCloneConfig::from_env()?;
    let port = config.port;

    let state = Arc::new(AppState::from_config(&config)?);
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("TeachClone server listening on {}", addr);
    info!("Endpoints: POST /api/transcript, /api/analyze, /api/create-teacher, /api/chat");

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        None | Some("serve") => serve().await,
        Some("create") => create::run(CreateOptions::parse(&args[2..])?).await.map(|_| ()),
        Some("tutor") => tutor::run(TutorOptions::parse(&args[2..])?).await,
        Some("--help" | "-h" | "help") => {
            print_usage();
            Ok(())
        }
        Some(other) => {
            eprintln!("Unknown command: {}. Use 'teachclone help' for usage.", other);
            std::process::exit(1);
        }
    }
}
