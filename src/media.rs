use std::path::Path;
use std::time::Duration;
use anyhow::{Result, Context};
use serde_json::Value;
use log::{info, debug, error};
use tokio::process::Command;

use crate::app_config::SubtitleStyle;
use crate::errors::MediaError;
use crate::intervals::TrimRange;
use crate::subtitle::SubtitleTrack;

// @module: ffmpeg/ffprobe collaborator for probing, trimming and burn-in

// @const: ffprobe timeout
const PROBE_TIMEOUT_SECS: u64 = 60;

// @const: ffmpeg encode timeout
const ENCODE_TIMEOUT_SECS: u64 = 1800;

/// Check that ffmpeg is installed and runnable
pub async fn check_ffmpeg() -> Result<(), MediaError> {
    run_tool("ffmpeg", &["-version"], PROBE_TIMEOUT_SECS).await?;
    Ok(())
}

/// Probe the duration of a media file in seconds
pub async fn probe_duration<P: AsRef<Path>>(path: P) -> Result<f64, MediaError> {
    let path = path.as_ref();
    let output = run_tool(
        "ffprobe",
        &[
            "-v", "quiet",
            "-print_format", "json",
            "-show_format",
            path.to_str().unwrap_or_default(),
        ],
        PROBE_TIMEOUT_SECS,
    )
    .await?;

    let json: Value = serde_json::from_slice(&output)
        .map_err(|e| MediaError::ProbeFailed(format!("ffprobe output is not JSON: {}", e)))?;

    json.get("format")
        .and_then(|format| format.get("duration"))
        .and_then(|duration| duration.as_str())
        .and_then(|duration| duration.parse::<f64>().ok())
        .ok_or_else(|| {
            MediaError::ProbeFailed(format!("No duration in ffprobe output for {:?}", path))
        })
}

/// Cut `input` down to `range`, writing the result to `output`.
///
/// The range is clamped to the probed source duration before encoding and
/// rejected when it collapses. Returns the effective range that was cut.
pub async fn trim<P: AsRef<Path>>(
    input: P,
    range: TrimRange,
    output: P,
) -> Result<TrimRange, MediaError> {
    let input = input.as_ref();
    let output = output.as_ref();

    let source_duration = probe_duration(input).await?;
    let start = range.start.max(0.0);
    let end = range.end.min(source_duration);
    if end <= start {
        return Err(MediaError::InvalidRange { start, end });
    }

    info!(
        "Trimming {:?} to {:.3}s..{:.3}s ({:.3}s of {:.3}s)",
        input.file_name().unwrap_or_default(),
        start, end, end - start, source_duration
    );

    run_tool(
        "ffmpeg",
        &[
            "-y",
            "-i", input.to_str().unwrap_or_default(),
            "-ss", &format!("{:.3}", start),
            "-to", &format!("{:.3}", end),
            "-c:v", "libx264",
            "-c:a", "aac",
            output.to_str().unwrap_or_default(),
        ],
        ENCODE_TIMEOUT_SECS,
    )
    .await?;

    Ok(TrimRange { start, end })
}

/// Burn a subtitle track onto `input`, writing the result to `output`.
///
/// The track is written to a temporary SRT file and rendered with the
/// ffmpeg subtitles filter carrying the configured style.
pub async fn burn_subtitles<P: AsRef<Path>>(
    input: P,
    track: &SubtitleTrack,
    style: &SubtitleStyle,
    output: P,
) -> Result<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    let srt_file = tempfile::Builder::new()
        .prefix("clipsift_")
        .suffix(".srt")
        .tempfile()
        .context("Failed to create temporary subtitle file")?;
    track.write_to_srt(srt_file.path())?;

    let filter = format!(
        "subtitles={}:force_style='{}'",
        escape_filter_path(srt_file.path()),
        force_style(style)
    );
    debug!("Subtitle burn-in filter: {}", filter);

    run_tool(
        "ffmpeg",
        &[
            "-y",
            "-i", input.to_str().unwrap_or_default(),
            "-vf", &filter,
            "-c:v", "libx264",
            "-c:a", "copy",
            output.to_str().unwrap_or_default(),
        ],
        ENCODE_TIMEOUT_SECS,
    )
    .await
    .with_context(|| format!("Failed to burn subtitles onto {:?}", input))?;

    info!("Wrote subtitled clip to {:?}", output);
    Ok(())
}

/// Extract the audio track of a video as 16 kHz mono WAV (whisper input)
pub async fn extract_audio<P: AsRef<Path>>(input: P, output: P) -> Result<(), MediaError> {
    let input = input.as_ref();
    let output = output.as_ref();

    run_tool(
        "ffmpeg",
        &[
            "-y",
            "-i", input.to_str().unwrap_or_default(),
            "-vn",
            "-acodec", "pcm_s16le",
            "-ar", "16000",
            "-ac", "1",
            output.to_str().unwrap_or_default(),
        ],
        ENCODE_TIMEOUT_SECS,
    )
    .await?;

    Ok(())
}

/// Render the ASS force_style clause for the configured subtitle style
fn force_style(style: &SubtitleStyle) -> String {
    format!(
        "FontSize={},PrimaryColour={},OutlineColour={},Outline={},Alignment=2",
        style.font_size,
        ass_color(&style.font_color),
        ass_color(&style.stroke_color),
        style.stroke_width
    )
}

/// Convert a CSS color name or #RRGGBB hex value into ASS &HBBGGRR& form.
///
/// Unknown colors fall back to white rather than failing the render.
pub fn ass_color(color: &str) -> String {
    let named_rgb = match color.trim().to_lowercase().as_str() {
        "white" => Some((0xff, 0xff, 0xff)),
        "black" => Some((0x00, 0x00, 0x00)),
        "yellow" => Some((0xff, 0xff, 0x00)),
        "red" => Some((0xff, 0x00, 0x00)),
        "blue" => Some((0x00, 0x00, 0xff)),
        "green" => Some((0x00, 0x80, 0x00)),
        "cyan" => Some((0x00, 0xff, 0xff)),
        "magenta" => Some((0xff, 0x00, 0xff)),
        _ => None,
    };

    let rgb = named_rgb.or_else(|| parse_hex_color(color)).unwrap_or((0xff, 0xff, 0xff));
    format!("&H{:02X}{:02X}{:02X}&", rgb.2, rgb.1, rgb.0)
}

fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let red = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let green = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let blue = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((red, green, blue))
}

/// Escape a path for use inside an ffmpeg filter argument
fn escape_filter_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "\\\\")
        .replace(':', "\\:")
        .replace('\'', "\\'")
}

/// Run an external tool with a timeout, returning its stdout.
///
/// Missing binaries, timeouts and unsuccessful exits map to the
/// corresponding [`MediaError`] variants; ffmpeg stderr is filtered down
/// to its meaningful lines first.
pub(crate) async fn run_tool(
    tool: &str,
    args: &[&str],
    timeout_secs: u64,
) -> Result<Vec<u8>, MediaError> {
    let command_future = Command::new(tool).args(args).output();

    let output = tokio::select! {
        result = command_future => {
            result.map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => MediaError::ToolNotFound(tool.to_string()),
                _ => MediaError::CommandFailed {
                    tool: tool.to_string(),
                    message: e.to_string(),
                },
            })?
        },
        _ = tokio::time::sleep(Duration::from_secs(timeout_secs)) => {
            return Err(MediaError::Timeout { tool: tool.to_string(), seconds: timeout_secs });
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let filtered = filter_tool_stderr(&stderr);
        error!("{} failed: {}", tool, filtered);
        return Err(MediaError::CommandFailed {
            tool: tool.to_string(),
            message: filtered,
        });
    }

    Ok(output.stdout)
}

/// Filter tool stderr to only show meaningful error lines, stripping the
/// version banner, build configuration, and stream metadata noise.
fn filter_tool_stderr(stderr: &str) -> String {
    let dominated_prefixes = [
        "ffmpeg version",
        "ffprobe version",
        "  built with",
        "  configuration:",
        "  lib",
        "Input #",
        "  Metadata:",
        "  Duration:",
        "  Chapter",
        "    Chapter",
        "  Stream #",
        "      Metadata:",
        "        title",
        "        BPS",
        "        DURATION",
        "        NUMBER_OF",
        "        _STATISTICS",
        "Output #",
        "Stream mapping:",
        "Press [q]",
        "frame=",
        "size=",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim_end();
            if trimmed.trim().is_empty() {
                return false;
            }
            !dominated_prefixes.iter().any(|prefix| trimmed.starts_with(prefix))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
