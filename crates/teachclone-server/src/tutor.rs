//! Interactive terminal chat with a persona, against a running server.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use teachclone_client::{
    ApiClient, ChatSession, ClientIdentity, CommandSpeaker, NullSpeaker, Speaker, DEFAULT_API_URL,
};
use teachclone_core::{Role, TeacherProfile};

const DEFAULT_ID_FILE: &str = ".teachclone/client-id";

/// Parsed `teachclone tutor` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorOptions {
    /// Profile JSON to chat with. Without it the profile saved on the server is used.
    pub profile_path: Option<PathBuf>,
    pub server: String,
    pub mute: bool,
}

impl TutorOptions {
    pub fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut options = TutorOptions {
            profile_path: None,
            server: DEFAULT_API_URL.to_string(),
            mute: false,
        };

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--server" => {
                    options.server = iter
                        .next()
                        .ok_or_else(|| anyhow!("--server needs a URL"))?
                        .clone();
                }
                "--mute" => options.mute = true,
                flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
                path if options.profile_path.is_none() => options.profile_path = Some(PathBuf::from(path)),
                extra => bail!("Unexpected argument: {}", extra),
            }
        }
        Ok(options)
    }
}

/// Read a profile file: either the profile itself or a `{teacherProfile}` response body.
pub fn read_profile(path: &std::path::Path) -> anyhow::Result<TeacherProfile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut value: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    if let Some(inner) = value.get_mut("teacherProfile") {
        value = inner.take();
    }
    serde_json::from_value(value).with_context(|| format!("{} is not a teacher profile", path.display()))
}

pub(crate) fn identity() -> ClientIdentity {
    let path = std::env::var("TEACHCLONE_CLIENT_ID_FILE").unwrap_or_else(|_| DEFAULT_ID_FILE.into());
    ClientIdentity::new(path)
}

fn speaker(mute: bool) -> Arc<dyn Speaker> {
    if mute {
        return Arc::new(NullSpeaker);
    }
    let speaker = CommandSpeaker::platform_default();
    let voices = speaker.available_voices();
    Arc::new(speaker.with_voices(&voices))
}

fn print_help() {
    println!("Commands:");
    println!("  /mute            Toggle speech");
    println!("  /name <name>     Rename your teacher");
    println!("  /save            Save this teacher on the server");
    println!("  /forget          Remove the saved teacher and client id");
    println!("  /help            Show this list");
    println!("  /quit            Leave the session");
}

/// Run the chat loop until `/quit` or end of input.
pub async fn run(options: TutorOptions) -> anyhow::Result<()> {
    let api = ApiClient::new(&options.server);
    let identity = identity();

    let profile = match &options.profile_path {
        Some(path) => read_profile(path)?,
        None => {
            let user_id = identity.load_or_create()?;
            api.load_profile(&user_id)
                .await?
                .ok_or_else(|| anyhow!("No saved teacher for this client; pass a profile JSON file"))?
        }
    };

    info!("Starting tutor session with '{}' via {}", profile.name, options.server);
    println!("You are now learning with {}. Type /help for commands.", profile.name);

    let mut session = ChatSession::new(api.clone(), profile, speaker(options.mute));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line.split_once(' ').map_or((line, ""), |(cmd, rest)| (cmd, rest.trim())) {
            ("/quit" | "/exit", _) => break,
            ("/help", _) => print_help(),
            ("/mute", _) => {
                let muted = session.toggle_mute();
                println!("Speech {}", if muted { "off" } else { "on" });
            }
            ("/name", name) => match session.rename_teacher(name) {
                Ok(()) => println!("Your teacher is now {}", session.profile().name),
                Err(e) => println!("{}", e),
            },
            ("/save", _) => {
                let user_id = identity.load_or_create()?;
                match api.save_profile(&user_id, session.profile()).await {
                    Ok(()) => println!("Saved {}", session.profile().name),
                    Err(e) => println!("{}", e),
                }
            }
            ("/forget", _) => {
                let user_id = identity.load_or_create()?;
                match api.clear_profile(&user_id).await {
                    Ok(()) => {
                        identity.clear()?;
                        println!("Saved teacher removed");
                    }
                    Err(e) => println!("{}", e),
                }
            }
            _ => {
                let name = session.profile().name.clone();
                if let Some(reply) = session.send(line).await {
                    if reply.role == Role::Assistant {
                        println!("{}: {}", name, reply.content);
                    }
                }
            }
        }
    }
    Ok(())
}
