//! Text-to-speech as an injectable, fire-and-forget capability.

use std::process::{Child, Command, Stdio};

use parking_lot::Mutex;
use tracing::{debug, warn};

/// Something that can read text aloud.
///
/// `speak` returns immediately; nothing waits for the utterance to finish.
pub trait Speaker: Send + Sync {
    fn speak(&self, text: &str);

    /// Stop whatever is currently being spoken.
    fn cancel(&self);
}

/// Speaker with no audio backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSpeaker;

impl Speaker for NullSpeaker {
    fn speak(&self, _text: &str) {}

    fn cancel(&self) {}
}

/// Pick a voice whose name suggests a female voice, if any.
///
/// `None` means "use the platform default".
pub fn select_voice(voices: &[String]) -> Option<&str> {
    voices
        .iter()
        .find(|name| name.contains("female") || name.contains("Female") || name.contains("Samantha"))
        .map(String::as_str)
}

/// Parse `say -v ?` output (name, then two or more spaces) or the
/// `espeak --voices` table (name in the fourth column, header first).
fn parse_voice_list(output: &str, say_format: bool) -> Vec<String> {
    if say_format {
        output
            .lines()
            .filter_map(|line| line.split("  ").next())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect()
    } else {
        output
            .lines()
            .skip(1)
            .filter_map(|line| line.split_whitespace().nth(3))
            .map(String::from)
            .collect()
    }
}

/// Speaks by running a TTS program (`say` on macOS, `espeak` elsewhere).
///
/// At most one utterance runs at a time: starting a new one kills the
/// previous process.
pub struct CommandSpeaker {
    program: String,
    voice: Option<String>,
    current: Mutex<Option<Child>>,
}

impl CommandSpeaker {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            voice: None,
            current: Mutex::new(None),
        }
    }

    /// The platform's usual TTS program.
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("say")
        } else {
            Self::new("espeak")
        }
    }

    /// Choose a voice from the names the TTS program offers.
    pub fn with_voices(mut self, voices: &[String]) -> Self {
        self.voice = select_voice(voices).map(String::from);
        self
    }

    pub fn voice(&self) -> Option<&str> {
        self.voice.as_deref()
    }

    /// Voice names the TTS program reports; empty if it can't be asked.
    pub fn available_voices(&self) -> Vec<String> {
        let say = self.program == "say";
        let args: &[&str] = if say { &["-v", "?"] } else { &["--voices"] };
        match Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
        {
            Ok(output) if output.status.success() => {
                parse_voice_list(&String::from_utf8_lossy(&output.stdout), say)
            }
            _ => Vec::new(),
        }
    }

    fn command(&self, text: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        if let Some(voice) = &self.voice {
            cmd.arg("-v").arg(voice);
        }
        // Replies may start with `-`.
        cmd.arg("--")
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&self, text: &str) {
        let mut current = self.current.lock();
        if let Some(mut previous) = current.take() {
            let _ = previous.kill();
            let _ = previous.wait();
        }
        if text.trim().is_empty() {
            return;
        }
        match self.command(text).spawn() {
            Ok(child) => {
                debug!("Speaking {} chars via {}", text.len(), self.program);
                *current = Some(child);
            }
            Err(e) => warn!("Speech via {} failed: {}", self.program, e),
        }
    }

    fn cancel(&self) {
        if let Some(mut child) = self.current.lock().take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        self.cancel();
    }
}
