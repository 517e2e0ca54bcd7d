use anyhow::{Result, Context};
use serde_json::json;
use log::{info, warn};

use crate::app_config::Config;
use crate::intervals::LabeledInterval;
use crate::language_utils;
use crate::llm::client::{LlmClient, LlmInvocation};
use crate::llm::prompts;
use crate::llm::response::parse_segment_payload;

// @module: Segment text translation via the configured LLM

/// Translates scene segment texts into a target language, keeping the
/// timing fields untouched
pub struct SegmentTranslator {
    // @field: Provider-agnostic LLM client
    client: LlmClient,

    // @field: Generation temperature
    temperature: f32,
}

impl SegmentTranslator {
    /// Create a translator over an existing client
    pub fn new(client: LlmClient, temperature: f32) -> Self {
        SegmentTranslator {
            client,
            temperature,
        }
    }

    /// Create a translator from the application configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = LlmClient::from_config(&config.llm)?;
        Ok(Self::new(client, config.llm.temperature))
    }

    /// Translate the text of every segment into `target_language`.
    ///
    /// Timing fields pass through the model untouched; only `text` changes.
    pub async fn translate(
        &self,
        segments: &[LabeledInterval],
        target_language: &str,
    ) -> Result<Vec<LabeledInterval>> {
        if segments.is_empty() {
            return Ok(Vec::new());
        }

        let language_code = language_utils::normalize_language_code(target_language)?;
        let language_name = language_utils::get_language_name(&language_code)?;
        info!(
            "Translating {} segment(s) into {} ({})",
            segments.len(), language_name, language_code
        );

        let segments_json = serde_json::to_string_pretty(&json!({ "segments": segments }))
            .context("Failed to serialize segments for translation")?;

        let invocation = LlmInvocation::new(
            prompts::TRANSLATE_SEGMENTS_SYSTEM_PROMPT,
            prompts::build_translate_segments_prompt(
                &segments_json,
                &format!("{} ({})", language_name, language_code),
            ),
        )
        .temperature(self.temperature)
        .json_schema(prompts::translate_segments_schema());

        let response = self.client.invoke(invocation).await?;
        let translated = parse_segment_payload(&response)?;

        if translated.len() != segments.len() {
            warn!(
                "Translation changed the segment count: sent {}, received {}",
                segments.len(), translated.len()
            );
        }

        Ok(translated)
    }
}
