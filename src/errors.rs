/*!
 * Error types for the clipsift application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when parsing or formatting timecodes
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimecodeError {
    /// Error when a timecode string does not match a supported layout
    #[error("Unsupported timecode format: {0}")]
    Format(String),
}

/// Errors that can occur when resolving time intervals
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntervalError {
    /// Error when no usable intervals were supplied
    #[error("No intervals with both a start and an end time were supplied")]
    EmptyInput,

    /// Error when the computed trim range is empty or inverted
    #[error("Invalid trim range: end {end:.3}s <= start {start:.3}s")]
    InvalidRange {
        /// Computed range start in seconds
        start: f64,
        /// Computed range end in seconds
        end: f64,
    },
}

/// Errors that can occur when working with LLM provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur when driving external media tools
#[derive(Error, Debug)]
pub enum MediaError {
    /// Error when a required external tool is missing
    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    /// Error when an external command exits unsuccessfully
    #[error("{tool} failed: {message}")]
    CommandFailed {
        /// Tool name (ffmpeg, ffprobe, whisper)
        tool: String,
        /// Filtered stderr output
        message: String
    },

    /// Error when an external command exceeds its timeout
    #[error("{tool} timed out after {seconds}s")]
    Timeout {
        /// Tool name
        tool: String,
        /// Timeout in seconds
        seconds: u64
    },

    /// Error when a trim range does not fit the source clip
    #[error("Invalid trim range for source: end {end:.3}s <= start {start:.3}s")]
    InvalidRange {
        /// Range start in seconds
        start: f64,
        /// Range end in seconds
        end: f64
    },

    /// Error when probing media metadata fails
    #[error("Failed to probe media file: {0}")]
    ProbeFailed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a timecode conversion
    #[error("Timecode error: {0}")]
    Timecode(#[from] TimecodeError),

    /// Error from interval resolution
    #[error("Interval error: {0}")]
    Interval(#[from] IntervalError),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from an external media tool
    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
