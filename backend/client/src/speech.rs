//! # Read Aloud
//!
//! Speech is an optional capability. [`detect`] picks a synthesizer once at startup and falls back to
//! [`NoSpeech`] when nothing is installed, so callers never check for it themselves.
//!
//! ## Voices
//! - Prefer the regional voice (`hi-IN`, `en-IN`)
//! - Then anything for the language (`hi`, `en`)
//! - Then the synthesizer default
use std::{
    io::{self, Write},
    process::{Child, Command, Stdio},
};

use kitchen::recipe::Language;
use tracing::{debug, info, warn};

const ESPEAK: &str = "espeak-ng";

pub trait Speech {
    fn is_available(&self) -> bool;

    fn voices(&self) -> Vec<String>;

    fn speak(&mut self, text: &str, voice: Option<&str>) -> io::Result<()>;

    fn cancel(&mut self);

    fn is_speaking(&mut self) -> bool;
}

/// Fallback when no synthesizer is installed. Every call is a no-op.
#[derive(Debug, Default)]
pub struct NoSpeech;

impl Speech for NoSpeech {
    fn is_available(&self) -> bool {
        false
    }

    fn voices(&self) -> Vec<String> {
        Vec::new()
    }

    fn speak(&mut self, _text: &str, _voice: Option<&str>) -> io::Result<()> {
        Ok(())
    }

    fn cancel(&mut self) {}

    fn is_speaking(&mut self) -> bool {
        false
    }
}

/// Drives the `espeak-ng` binary, one child process per utterance.
#[derive(Debug)]
pub struct Espeak {
    voices: Vec<String>,
    child: Option<Child>,
}

impl Espeak {
    pub fn probe() -> Option<Self> {
        let output = Command::new(ESPEAK).arg("--voices").output().ok()?;

        if !output.status.success() {
            return None;
        }

        let voices = parse_voice_list(&String::from_utf8_lossy(&output.stdout));
        debug!("{ESPEAK} reports {} voices", voices.len());

        Some(Self {
            voices,
            child: None,
        })
    }
}

/// The text goes in over stdin, never argv, so a recipe starting with `-` can't be read as a flag.
fn speak_command(voice: Option<&str>) -> Command {
    let mut command = Command::new(ESPEAK);
    if let Some(voice) = voice {
        command.arg("-v").arg(voice);
    }

    command
        .arg("--stdin")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    command
}

/// Second column of `espeak-ng --voices` is the language tag.
fn parse_voice_list(listing: &str) -> Vec<String> {
    listing
        .lines()
        .skip(1)
        .filter_map(|line| line.split_whitespace().nth(1))
        .map(str::to_string)
        .collect()
}

impl Speech for Espeak {
    fn is_available(&self) -> bool {
        true
    }

    fn voices(&self) -> Vec<String> {
        self.voices.clone()
    }

    fn speak(&mut self, text: &str, voice: Option<&str>) -> io::Result<()> {
        self.cancel();

        let mut child = speak_command(voice).spawn()?;
        let stdin = child.stdin.take();
        self.child = Some(child);

        // Closing stdin is what lets espeak-ng start talking.
        if let Some(mut stdin) = stdin {
            if let Err(e) = stdin.write_all(text.as_bytes()) {
                self.cancel();
                return Err(e);
            }
        }

        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                debug!("Speech already finished: {e}");
            }
            if let Err(e) = child.wait() {
                debug!("Could not reap {ESPEAK}: {e}");
            }
        }
    }

    fn is_speaking(&mut self) -> bool {
        match self.child.as_mut().map(Child::try_wait) {
            Some(Ok(None)) => true,
            Some(_) => {
                self.child = None;
                false
            }
            None => false,
        }
    }
}

impl Drop for Espeak {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub fn detect() -> Box<dyn Speech> {
    match Espeak::probe() {
        Some(espeak) => {
            info!("Using {ESPEAK} for read aloud");
            Box::new(espeak)
        }
        None => {
            info!("No speech synthesizer found, read aloud disabled");
            Box::new(NoSpeech)
        }
    }
}

pub fn pick_voice(voices: &[String], language: Language) -> Option<String> {
    let regional = language.regional_voice().to_lowercase();
    let code = language.code();

    voices
        .iter()
        .find(|voice| voice.to_lowercase().replace('_', "-") == regional)
        .or_else(|| {
            voices.iter().find(|voice| {
                let voice = voice.to_lowercase();
                voice == code || voice.starts_with(&format!("{code}-"))
            })
        })
        .cloned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadAloud {
    Started,
    Stopped,
    Unavailable,
}

/// Starts reading `text`, or stops if already reading.
pub fn toggle(speech: &mut dyn Speech, text: &str, language: Language) -> io::Result<ReadAloud> {
    if !speech.is_available() {
        return Ok(ReadAloud::Unavailable);
    }

    if speech.is_speaking() {
        speech.cancel();
        return Ok(ReadAloud::Stopped);
    }

    let voice = pick_voice(&speech.voices(), language);
    if voice.is_none() {
        warn!("No {} voice installed, using the default voice", language.code());
    }

    speech.speak(text, voice.as_deref())?;
    Ok(ReadAloud::Started)
}
