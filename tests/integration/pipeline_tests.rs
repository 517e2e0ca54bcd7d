/*!
 * Integration tests driving the extraction and translation services
 * against the mock provider, all the way through interval resolution.
 */

use std::path::Path;
use clipsift::app_config::LlmProvider;
use clipsift::app_controller::Controller;
use clipsift::extraction::SceneExtractor;
use clipsift::intervals::{normalize_subtitle_track, resolve_trim_range};
use clipsift::llm::client::LlmClient;
use clipsift::providers::mock::MockProvider;
use clipsift::subtitle::SubtitleTrack;
use clipsift::translation::SegmentTranslator;
use crate::common;

fn extractor_with(response: &str) -> SceneExtractor {
    SceneExtractor::new(LlmClient::from_mock(MockProvider::working(response)), 0.2)
}

/// Test extraction parses the scripted scene payload
#[tokio::test]
async fn test_extraction_withScriptedScenes_shouldReturnIntervals() {
    let extractor = extractor_with(&common::scene_response_json());

    let scenes = extractor.extract_scenes(Path::new("talk.mp4")).await.unwrap();
    assert_eq!(scenes.len(), 2);
    assert_eq!(scenes[0].text, "the first key moment");
}

/// Test extraction recovers a fenced payload
#[tokio::test]
async fn test_extraction_withFencedResponse_shouldRecover() {
    let fenced = format!("```json\n{}\n```", common::scene_response_json());
    let extractor = extractor_with(&fenced);

    let scenes = extractor.extract_scenes(Path::new("talk.mp4")).await.unwrap();
    assert_eq!(scenes.len(), 2);
}

/// Test extraction surfaces provider failures
#[tokio::test]
async fn test_extraction_withFailingProvider_shouldError() {
    let extractor = SceneExtractor::new(LlmClient::from_mock(MockProvider::failing()), 0.2);

    let result = extractor.extract_scenes(Path::new("talk.mp4")).await;
    assert!(result.is_err());
}

/// Test extraction rejects an empty response
#[tokio::test]
async fn test_extraction_withEmptyResponse_shouldError() {
    let extractor = SceneExtractor::new(LlmClient::from_mock(MockProvider::empty()), 0.2);

    let result = extractor.extract_scenes(Path::new("talk.mp4")).await;
    assert!(result.is_err());
}

/// Test the full path from scripted scenes to a renderable subtitle track
#[tokio::test]
async fn test_pipeline_withScriptedScenes_shouldProduceRenderableTrack() {
    let extractor = extractor_with(&common::scene_response_json());
    let scenes = extractor.extract_scenes(Path::new("talk.mp4")).await.unwrap();

    // The scripted scenes span 5..20 on the source timeline
    let range = resolve_trim_range(&scenes).unwrap();
    assert_eq!(range.start, 5.0);
    assert_eq!(range.end, 20.0);

    // After trimming, the clip runs 0..15 and the scene timestamps are
    // still on the source timeline; the trim start is the offset.
    let cues = normalize_subtitle_track(&scenes, range.duration(), range.start);
    assert_eq!(cues.len(), 2);

    let track = SubtitleTrack::new(cues);
    track.validate().unwrap();

    // Overlap resolution clamps the earlier cue down to the later start
    assert_eq!((track.cues[0].start, track.cues[0].end), (0.0, 5.0));
    assert_eq!((track.cues[1].start, track.cues[1].end), (5.0, 15.0));
}

/// Test translation keeps timing and swaps texts
#[tokio::test]
async fn test_translation_withScriptedResponse_shouldKeepTiming() {
    let translator = SegmentTranslator::new(
        LlmClient::from_mock(MockProvider::working(&common::translated_response_json())),
        0.2,
    );

    let originals = vec![
        common::interval_text("00:00:10.000", "00:00:20.000", "original first"),
        common::interval_text("00:00:05.000", "00:00:15.000", "original second"),
    ];

    let translated = translator.translate(&originals, "en").await.unwrap();
    assert_eq!(translated.len(), 2);
    assert_eq!(translated[0].text, "translated first");
    assert_eq!(
        translated[0].start_time.as_ref().unwrap().to_seconds().unwrap(),
        10.0
    );
    assert_eq!(
        translated[1].end_time.as_ref().unwrap().to_seconds().unwrap(),
        15.0
    );
}

/// Test translation of an empty segment list is a no-op
#[tokio::test]
async fn test_translation_withNoSegments_shouldReturnEmptyWithoutInvoking() {
    let translator = SegmentTranslator::new(LlmClient::from_mock(MockProvider::failing()), 0.2);

    // The failing mock proves the provider is never reached
    let translated = translator.translate(&[], "en").await.unwrap();
    assert!(translated.is_empty());
}

/// Test translation rejects an invalid target language before invoking
#[tokio::test]
async fn test_translation_withInvalidTargetLanguage_shouldError() {
    let translator = SegmentTranslator::new(LlmClient::from_mock(MockProvider::failing()), 0.2);

    let originals = vec![common::interval(0.0, 1.0, "text")];
    let result = translator.translate(&originals, "xyzzy").await;
    assert!(result.is_err());
}

/// Test the controller builds with the default configuration
#[test]
fn test_controller_withDefaultConfig_shouldExposeIt() {
    let controller = Controller::new_for_test().unwrap();
    assert_eq!(controller.config().llm.provider, LlmProvider::Gemini);
    assert!(controller.config().target_language.is_none());
}

/// Test the clip pipeline rejects a missing input file early
#[tokio::test]
async fn test_run_clip_withMissingInput_shouldError() {
    let controller = Controller::new_for_test().unwrap();
    let result = controller.run_clip(Path::new("/nonexistent/video.mp4")).await;
    assert!(result.is_err());
}
