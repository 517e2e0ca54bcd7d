use std::path::Path;
use anyhow::{Result, anyhow};
use log::{info, warn, debug};

use crate::app_config::Config;
use crate::intervals::LabeledInterval;
use crate::llm::client::{LlmClient, LlmInvocation};
use crate::llm::prompts;
use crate::llm::response::{parse_scene_payload, RawSegment};

// @module: Scene extraction via the configured LLM

/// Asks the LLM which scenes of a video are worth keeping
pub struct SceneExtractor {
    // @field: Provider-agnostic LLM client
    client: LlmClient,

    // @field: Generation temperature
    temperature: f32,
}

impl SceneExtractor {
    /// Create an extractor over an existing client
    pub fn new(client: LlmClient, temperature: f32) -> Self {
        SceneExtractor {
            client,
            temperature,
        }
    }

    /// Create an extractor from the application configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = LlmClient::from_config(&config.llm)?;
        Ok(Self::new(client, config.llm.temperature))
    }

    /// Extract the important scenes of a video.
    ///
    /// When the provider accepts media, the footage itself rides along with
    /// the request; otherwise the model works from the prompt alone.
    pub async fn extract_scenes(&self, video_path: &Path) -> Result<Vec<LabeledInterval>> {
        let video_name = video_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| video_path.display().to_string());

        info!("Extracting important scenes from {}", video_name);

        let mut invocation = LlmInvocation::new(
            prompts::EXTRACT_SCENES_SYSTEM_PROMPT,
            prompts::build_extract_scenes_prompt(&video_name),
        )
        .temperature(self.temperature)
        .json_schema(prompts::extract_scenes_schema());

        if self.client.supports_media() {
            invocation = invocation.media(video_path);
        } else {
            debug!(
                "Provider {} does not accept media; extracting from the prompt alone",
                self.client.model()
            );
        }

        let response = self.client.invoke(invocation).await?;
        if response.trim().is_empty() {
            return Err(anyhow!("LLM returned an empty scene extraction response"));
        }
        debug!("Scene extraction response: {} chars", response.len());

        let payload = parse_scene_payload(&response)?;
        let scenes: Vec<LabeledInterval> = payload
            .important_scenes
            .into_iter()
            .map(RawSegment::into_interval)
            .collect();

        if scenes.is_empty() {
            warn!("LLM response contained no important scenes");
        } else {
            info!("LLM proposed {} important scene(s)", scenes.len());
        }

        Ok(scenes)
    }

    /// Test the connection to the configured provider
    pub async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await?;
        Ok(())
    }
}
