use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use anyhow::{Result, Context, anyhow};
use log::warn;

// @module: Subtitle cue and track handling

/// A single subtitle cue on the trimmed clip's timeline.
///
/// Times are seconds relative to the clip start. Cues produced by
/// [`crate::intervals::normalize_subtitle_track`] are guaranteed ordered,
/// non-overlapping and within the clip bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleCue {
    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,

    /// Cue text
    pub text: String,
}

impl SubtitleCue {
    /// Create a new subtitle cue
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        SubtitleCue {
            start,
            end,
            text: text.into(),
        }
    }

    /// Cue duration in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Convert start time to an SRT timestamp
    pub fn format_start(&self) -> String {
        Self::srt_timestamp(self.start)
    }

    /// Convert end time to an SRT timestamp
    pub fn format_end(&self) -> String {
        Self::srt_timestamp(self.end)
    }

    /// Format seconds as an SRT timestamp (HH:MM:SS,mmm), truncating to
    /// millisecond precision. Negative input is clamped to 0.
    pub fn srt_timestamp(seconds: f64) -> String {
        // Same epsilon as the timecode formatter; the product of exact
        // millisecond values can round just below the integer.
        let total_ms = (seconds.max(0.0) * 1000.0 + 1e-6).floor() as u64;
        let hours = total_ms / 3_600_000;
        let minutes = (total_ms % 3_600_000) / 60_000;
        let secs = (total_ms % 60_000) / 1_000;
        let millis = total_ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
    }
}

impl fmt::Display for SubtitleCue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} --> {}", self.format_start(), self.format_end())?;
        writeln!(f, "{}", self.text)
    }
}

/// Ordered collection of subtitle cues for one clip
#[derive(Debug, Clone, Default)]
pub struct SubtitleTrack {
    /// Cues in display order
    pub cues: Vec<SubtitleCue>,
}

impl SubtitleTrack {
    /// Create a track from a list of cues
    pub fn new(cues: Vec<SubtitleCue>) -> Self {
        SubtitleTrack { cues }
    }

    /// Number of cues in the track
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    /// Whether the track has no cues
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Check that cues are sorted by start time and mutually non-overlapping.
    ///
    /// The renderer relies on this; a track straight out of the normalizer
    /// always passes.
    pub fn validate(&self) -> Result<()> {
        for window in self.cues.windows(2) {
            let (current, next) = (&window[0], &window[1]);
            if current.start > next.start {
                return Err(anyhow!(
                    "Subtitle cues out of order: {:.3}s after {:.3}s",
                    next.start, current.start
                ));
            }
            if current.end > next.start {
                return Err(anyhow!(
                    "Overlapping subtitle cues: cue ending at {:.3}s overlaps cue starting at {:.3}s",
                    current.end, next.start
                ));
            }
        }
        for cue in &self.cues {
            if cue.end <= cue.start {
                return Err(anyhow!(
                    "Degenerate subtitle cue: end {:.3}s <= start {:.3}s",
                    cue.end, cue.start
                ));
            }
        }
        Ok(())
    }

    /// Render the track as SRT content
    pub fn to_srt_string(&self) -> String {
        let mut output = String::new();
        for (index, cue) in self.cues.iter().enumerate() {
            output.push_str(&format!("{}\n{}\n", index + 1, cue));
        }
        output
    }

    /// Write the track to an SRT file, creating parent directories if needed
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf> {
        let path = path.as_ref();

        if self.cues.is_empty() {
            warn!("Writing an SRT file with no cues: {}", path.display());
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;
        file.write_all(self.to_srt_string().as_bytes())
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

        Ok(path.to_path_buf())
    }
}

impl fmt::Display for SubtitleTrack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Track")?;
        writeln!(f, "Cues: {}", self.cues.len())
    }
}

/// Insert a line break after the second occurrence of `break_char`.
///
/// Long spoken sentences read better on two lines; the break goes after the
/// second sentence-break character (a full-width comma by default). Text with
/// fewer than two occurrences is returned unchanged.
pub fn format_cue_text(text: &str, break_char: char) -> String {
    let mut count = 0;
    for (idx, ch) in text.char_indices() {
        if ch == break_char {
            count += 1;
            if count == 2 {
                let split_at = idx + ch.len_utf8();
                return format!("{}\n{}", &text[..split_at], &text[split_at..]);
            }
        }
    }
    text.to_string()
}
