use std::path::Path;
use anyhow::{Result, Context, anyhow};
use serde::Deserialize;
use log::{info, debug};

use crate::app_config::TranscriptionConfig;
use crate::media;
use crate::subtitle::{SubtitleCue, SubtitleTrack};

// @module: Whisper transcription collaborator

// @const: Whisper timeout (large models on CPU are slow)
const WHISPER_TIMEOUT_SECS: u64 = 3600;

/// A transcribed segment as whisper reports it
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptSegment {
    /// Segment start in seconds
    pub start: f64,

    /// Segment end in seconds
    pub end: f64,

    /// Transcribed text
    pub text: String,
}

/// A whole transcription result
#[derive(Debug, Clone, Deserialize)]
pub struct Transcript {
    /// Full transcribed text
    #[serde(default)]
    pub text: String,

    /// Timestamped segments
    #[serde(default)]
    pub segments: Vec<TranscriptSegment>,

    /// Detected language
    #[serde(default)]
    pub language: Option<String>,
}

impl Transcript {
    /// Convert the transcript segments into a subtitle track
    pub fn to_subtitle_track(&self) -> SubtitleTrack {
        let cues = self
            .segments
            .iter()
            .map(|segment| SubtitleCue::new(segment.start, segment.end, segment.text.trim()))
            .collect();
        SubtitleTrack::new(cues)
    }
}

/// Runs the whisper CLI over extracted audio
pub struct Transcriber {
    // @field: Whisper model name
    model: String,

    // @field: Spoken language hint; None lets whisper auto-detect
    language: Option<String>,
}

impl Transcriber {
    /// Create a transcriber from the transcription configuration
    pub fn from_config(config: &TranscriptionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Transcriber {
            model: config.model.clone(),
            language: config.language.clone(),
        })
    }

    /// Transcribe a video file.
    ///
    /// The audio track is extracted to a temporary WAV first; whisper then
    /// writes its JSON output next to it.
    pub async fn transcribe<P: AsRef<Path>>(&self, video_path: P) -> Result<Transcript> {
        let video_path = video_path.as_ref();
        if !video_path.exists() {
            return Err(anyhow!("Input file does not exist: {:?}", video_path));
        }

        let work_dir = tempfile::Builder::new()
            .prefix("clipsift_whisper_")
            .tempdir()
            .context("Failed to create whisper working directory")?;

        let audio_path = work_dir.path().join("audio.wav");
        info!("Extracting audio from {:?}", video_path.file_name().unwrap_or_default());
        media::extract_audio(video_path, audio_path.as_path()).await?;

        info!("Transcribing with whisper model {}", self.model);
        let mut args: Vec<&str> = vec![
            audio_path.to_str().unwrap_or_default(),
            "--model", &self.model,
            "--output_format", "json",
            "--output_dir", work_dir.path().to_str().unwrap_or_default(),
        ];
        if let Some(language) = &self.language {
            args.push("--language");
            args.push(language);
        }

        media::run_tool("whisper", &args, WHISPER_TIMEOUT_SECS).await?;

        // Whisper names its output after the audio file stem
        let json_path = work_dir.path().join("audio.json");
        let content = std::fs::read_to_string(&json_path)
            .with_context(|| format!("Whisper produced no JSON output at {:?}", json_path))?;
        let transcript: Transcript = serde_json::from_str(&content)
            .context("Failed to parse whisper JSON output")?;

        debug!(
            "Transcription produced {} segment(s), language={:?}",
            transcript.segments.len(),
            transcript.language
        );
        if transcript.segments.is_empty() {
            return Err(anyhow!("Whisper produced no transcription segments"));
        }

        Ok(transcript)
    }
}
