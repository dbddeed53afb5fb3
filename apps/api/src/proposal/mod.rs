// Proposal generation: prompt, model call, and normalization of the reply into slides.
// All model calls go through llm_client::TextGenerator.

pub mod color;
pub mod fallback;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod prompts;
pub mod validation;
