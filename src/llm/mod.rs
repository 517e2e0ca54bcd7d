/*!
 * LLM request/response plumbing shared by scene extraction and translation.
 *
 * This module contains the pieces between the services and the provider
 * clients. It is split into several submodules:
 *
 * - `client`: Provider-agnostic invocation facade and factory
 * - `prompts`: Embedded prompt templates and response JSON schemas
 * - `response`: Recovery and typed parsing of LLM JSON output
 */

// Re-export main types for easier usage
pub use self::client::{LlmClient, LlmInvocation};
pub use self::response::{parse_scene_payload, parse_segment_payload, ScenePayload};

// Submodules
pub mod client;
pub mod prompts;
pub mod response;
