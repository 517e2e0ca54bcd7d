use anyhow::{Result, anyhow};
use log::{info, warn};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::app_config::Config;
use crate::extraction::SceneExtractor;
use crate::file_utils::FileManager;
use crate::intervals::{self, TrimRange};
use crate::media;
use crate::subtitle::{format_cue_text, SubtitleTrack};
use crate::transcribe::Transcriber;
use crate::translation::SegmentTranslator;

// @module: Application controller for the clip pipeline

/// What a clip run produced
#[derive(Debug, Clone)]
pub struct ClipOutcome {
    /// Path of the trimmed clip
    pub trimmed_path: PathBuf,

    /// Path of the subtitled clip, None when there was nothing to render
    pub subtitled_path: Option<PathBuf>,

    /// The effective trim range on the source timeline
    pub trim_range: TrimRange,

    /// Number of subtitle cues burned onto the clip
    pub cue_count: usize,
}

/// Main application controller for the clip and transcription pipelines
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// The configuration this controller runs with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the clip pipeline over a single video file.
    ///
    /// Extracts the important scenes, trims the source to the span covering
    /// them, optionally translates the scene texts, and burns them back on
    /// as subtitles.
    pub async fn run_clip(&self, input_file: &Path) -> Result<ClipOutcome> {
        let start_time = std::time::Instant::now();

        if !input_file.exists() {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }
        media::check_ffmpeg().await?;
        FileManager::ensure_dir(&self.config.output_dir)?;

        let progress = Self::spinner();

        // Ask the LLM which scenes matter
        progress.set_message("Extracting important scenes...");
        let extractor = SceneExtractor::from_config(&self.config)?;
        let scenes = extractor.extract_scenes(input_file).await?;

        // Reduce the scene list to one trim span
        let trim_range = intervals::resolve_trim_range(&scenes)?;
        info!(
            "Resolved trim range {:.3}s..{:.3}s from {} scene(s)",
            trim_range.start, trim_range.end, scenes.len()
        );

        // Cut the source down to the span
        progress.set_message("Trimming video...");
        let trimmed_path = FileManager::generate_output_path(
            input_file, &self.config.output_dir, "clip", "mp4",
        );
        let effective_range = media::trim(input_file, trim_range, trimmed_path.as_path()).await?;

        // Translate scene texts when a target language is configured
        let scenes = match &self.config.target_language {
            Some(target_language) => {
                progress.set_message("Translating scene texts...");
                let translator = SegmentTranslator::from_config(&self.config)?;
                translator.translate(&scenes, target_language).await?
            }
            None => scenes,
        };

        // Re-base the scene timestamps onto the trimmed clip and render
        progress.set_message("Burning subtitles...");
        let clip_duration = media::probe_duration(&trimmed_path).await?;
        let cues = intervals::normalize_subtitle_track(&scenes, clip_duration, effective_range.start);

        let outcome = if cues.is_empty() {
            warn!("No renderable subtitle cues; keeping the trimmed clip without subtitles");
            ClipOutcome {
                trimmed_path,
                subtitled_path: None,
                trim_range: effective_range,
                cue_count: 0,
            }
        } else {
            let mut cues = cues;
            for cue in &mut cues {
                cue.text = format_cue_text(&cue.text, self.config.subtitle_style.break_char);
            }
            let track = SubtitleTrack::new(cues);
            track.validate()?;

            let subtitled_path = FileManager::generate_output_path(
                input_file, &self.config.output_dir, "subtitled", "mp4",
            );
            media::burn_subtitles(
                trimmed_path.as_path(),
                &track,
                &self.config.subtitle_style,
                subtitled_path.as_path(),
            )
            .await?;

            ClipOutcome {
                trimmed_path,
                subtitled_path: Some(subtitled_path),
                trim_range: effective_range,
                cue_count: track.len(),
            }
        };

        progress.finish_and_clear();
        info!(
            "Clip pipeline completed in {}",
            Self::format_duration(start_time.elapsed())
        );

        Ok(outcome)
    }

    /// Run the clip pipeline over every video found in a directory
    pub async fn run_clip_folder(&self, input_dir: &Path) -> Result<Vec<ClipOutcome>> {
        let videos = FileManager::find_videos(input_dir)?;
        if videos.is_empty() {
            return Err(anyhow!("No video files found in {:?}", input_dir));
        }
        info!("Processing {} video file(s) from {:?}", videos.len(), input_dir);

        let mut outcomes = Vec::with_capacity(videos.len());
        for video in videos {
            match self.run_clip(&video).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    // One bad file should not abort the whole folder
                    warn!("Skipping {:?}: {}", video, e);
                }
            }
        }

        if outcomes.is_empty() {
            return Err(anyhow!("All video files in {:?} failed to process", input_dir));
        }
        Ok(outcomes)
    }

    /// Transcribe a video with whisper and write the result as an SRT file
    pub async fn run_transcribe(&self, input_file: &Path) -> Result<PathBuf> {
        let start_time = std::time::Instant::now();

        if !input_file.exists() {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }
        media::check_ffmpeg().await?;
        FileManager::ensure_dir(&self.config.output_dir)?;

        let progress = Self::spinner();
        progress.set_message("Transcribing audio...");

        let transcriber = Transcriber::from_config(&self.config.transcription)?;
        let transcript = transcriber.transcribe(input_file).await?;
        let track = transcript.to_subtitle_track();

        let output_path = FileManager::generate_output_path(
            input_file, &self.config.output_dir, "transcript", "srt",
        );
        track.write_to_srt(&output_path)?;

        progress.finish_and_clear();
        info!(
            "Transcription completed in {} ({} cue(s) -> {:?})",
            Self::format_duration(start_time.elapsed()),
            track.len(),
            output_path
        );

        Ok(output_path)
    }

    /// Spinner-style progress bar used for long pipeline steps
    fn spinner() -> ProgressBar {
        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        progress.enable_steady_tick(Duration::from_millis(120));
        progress
    }

    /// Format a duration as a human-readable string
    fn format_duration(duration: Duration) -> String {
        let total_secs = duration.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:01}s", seconds, duration.subsec_millis() / 100)
        }
    }
}
