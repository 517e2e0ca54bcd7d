/*!
 * Prompt templates and response schemas for the LLM services.
 *
 * Prompts ask for timecodes in the same `HH:MM:SS.mmm` layout the
 * timecode parser accepts, and the schemas pin the payload shapes the
 * response module knows how to recover.
 */

use serde_json::{json, Value};

/// System prompt for scene extraction
pub const EXTRACT_SCENES_SYSTEM_PROMPT: &str = "\
You are an experienced short-form video editor. You review source footage \
and identify the moments worth keeping: emotional peaks, key statements, \
punchlines, demonstrations, and anything a viewer would rewind for. You \
always answer with JSON that matches the requested schema, and you always \
express timestamps as HH:MM:SS.mmm measured from the start of the footage.";

/// User prompt template for scene extraction; `{video}` is replaced with
/// the source file name
pub const EXTRACT_SCENES_USER_PROMPT: &str = "\
Watch the attached footage ({video}) and pick the scenes that matter most. \
Return a JSON object with an `important_scenes` array. Each scene needs a \
`start_time`, an `end_time` (HH:MM:SS.mmm) and a short `text` caption of \
what is said or shown. Keep captions in the spoken language. Pick between \
one and ten scenes and never invent timestamps beyond the footage length.";

/// System prompt for segment translation
pub const TRANSLATE_SEGMENTS_SYSTEM_PROMPT: &str = "\
You are a professional subtitle translator. You translate caption text \
while keeping every timestamp exactly as given. You never merge, split, \
reorder or drop segments, and you always answer with JSON that matches \
the requested schema.";

/// User prompt template for segment translation
const TRANSLATE_SEGMENTS_USER_PROMPT: &str = "\
Translate the `text` of every segment below into the target language. \
Return a JSON object with a `segments` array carrying the same \
`start_time` and `end_time` values and the translated `text`.";

/// Build the user prompt for scene extraction
pub fn build_extract_scenes_prompt(video_name: &str) -> String {
    EXTRACT_SCENES_USER_PROMPT.replace("{video}", video_name)
}

/// Build the user prompt for segment translation.
///
/// The segments ride inside the prompt as a JSON payload, the same shape
/// the response is expected to come back in.
pub fn build_translate_segments_prompt(segments_json: &str, target_language: &str) -> String {
    format!(
        "{}\nTarget language: {}\nSegments (JSON):\n{}",
        TRANSLATE_SEGMENTS_USER_PROMPT, target_language, segments_json
    )
}

/// JSON schema for the scene extraction response
pub fn extract_scenes_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "important_scenes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "start_time": { "type": "string" },
                        "end_time": { "type": "string" },
                        "text": { "type": "string" }
                    },
                    "required": ["start_time", "end_time", "text"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["important_scenes"],
        "additionalProperties": false
    })
}

/// JSON schema for the segment translation response
pub fn translate_segments_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "segments": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "start_time": { "type": "string" },
                        "end_time": { "type": "string" },
                        "text": { "type": "string" }
                    },
                    "required": ["start_time", "end_time", "text"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["segments"],
        "additionalProperties": false
    })
}
