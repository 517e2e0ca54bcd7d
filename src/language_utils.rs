use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// Translation targets and whisper language hints are user-supplied ISO
/// codes; this module validates them and resolves display names for
/// prompts and log messages.

/// Normalize a language code to ISO 639-1 (2-letter) format if possible,
/// falling back to ISO 639-3 when no 2-letter code exists
pub fn normalize_language_code(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    let language = match normalized_code.len() {
        2 => Language::from_639_1(&normalized_code),
        3 => Language::from_639_3(&normalized_code),
        _ => None,
    };

    let language = language.ok_or_else(|| anyhow!("Invalid language code: {}", code))?;

    match language.to_639_1() {
        Some(part1) => Ok(part1.to_string()),
        None => Ok(language.to_639_3().to_string()),
    }
}

/// Check if two language codes refer to the same language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_language_code(code1), normalize_language_code(code2)) {
        (Ok(normalized1), Ok(normalized2)) => normalized1 == normalized2,
        _ => false,
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_language_code(code)?;

    let language = match normalized.len() {
        2 => Language::from_639_1(&normalized),
        _ => Language::from_639_3(&normalized),
    };

    language
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))
}
