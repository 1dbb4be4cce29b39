//! `teachclone create`: video URL to saved teacher profile.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use tracing::info;

use teachclone_client::{ApiClient, TeacherCreation, DEFAULT_API_URL};

use crate::tutor;

/// Parsed `teachclone create` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOptions {
    pub url: String,
    pub server: String,
    /// Store the profile on the server under this client's id.
    pub save: bool,
    /// Write the profile JSON here.
    pub output: Option<PathBuf>,
}

impl CreateOptions {
    pub fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut url = None;
        let mut server = DEFAULT_API_URL.to_string();
        let mut save = false;
        let mut output = None;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--server" => {
                    server = iter
                        .next()
                        .ok_or_else(|| anyhow!("--server needs a URL"))?
                        .clone();
                }
                "--save" => save = true,
                "-o" | "--output" => {
                    output = Some(PathBuf::from(
                        iter.next().ok_or_else(|| anyhow!("{} needs a file path", arg))?,
                    ));
                }
                flag if flag.starts_with('-') => bail!("Unknown option: {}", flag),
                value if url.is_none() => url = Some(value.to_string()),
                extra => bail!("Unexpected argument: {}", extra),
            }
        }

        Ok(CreateOptions {
            url: url.ok_or_else(|| anyhow!("Usage: teachclone create <youtube-url> [--server URL] [--save] [-o file]"))?,
            server,
            save,
            output,
        })
    }
}

/// Build a teacher from the video, print the analysis and store the profile.
///
/// Without `--save` or `-o` the profile JSON goes to stdout.
pub async fn run(options: CreateOptions) -> anyhow::Result<TeacherCreation> {
    let api = ApiClient::new(&options.server);

    info!("Creating teacher from {}", options.url);
    let created = api.build_teacher(&options.url).await?;
    println!("{}", created.analysis);
    println!();

    let json = serde_json::to_string_pretty(&created.profile)?;
    if let Some(path) = &options.output {
        std::fs::write(path, &json).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Saved {} to {}", created.profile.name, path.display());
    }
    if options.save {
        let user_id = tutor::identity().load_or_create()?;
        api.save_profile(&user_id, &created.profile).await?;
        println!("Saved {} on the server; run `teachclone tutor` to start", created.profile.name);
    }
    if options.output.is_none() && !options.save {
        println!("{}", json);
    }
    Ok(created)
}
