//! Proposal Orchestrator: context → prompt → single model call → normalized slides.
//!
//! Only a failed model call is reported to the caller. Every problem with the
//! shape of the reply is absorbed by the normalizer.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::llm_client::{LlmError, TextGenerator};
use crate::proposal::models::{Customization, Slide};
use crate::proposal::normalizer::normalize;
use crate::proposal::prompts::build_prompt;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("AI proposal generation failed: {0}")]
    Model(#[from] LlmError),
}

/// Joins the non-blank request parts into the context handed to the prompt.
/// Returns `None` when there is nothing to work with.
pub fn compose_context(description: Option<&str>, extracted_text: Option<&str>) -> Option<String> {
    let parts: Vec<String> = [
        ("Description", description),
        ("Document Content", extracted_text),
    ]
    .into_iter()
    .filter_map(|(label, text)| {
        text.filter(|t| !t.trim().is_empty())
            .map(|t| format!("{label}: {t}"))
    })
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n\n"))
    }
}

/// Stateless proposal pipeline around an injected model backend.
#[derive(Clone)]
pub struct ProposalGenerator {
    llm: Arc<dyn TextGenerator>,
}

impl ProposalGenerator {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self { llm }
    }

    /// Generates a slide deck for `context`. Makes exactly one model call.
    ///
    /// `customization` is accepted for interface compatibility; colours are
    /// chosen by the model from the context.
    pub async fn generate(
        &self,
        context: &str,
        customization: Option<&Customization>,
    ) -> Result<Vec<Slide>, GenerationError> {
        if let Some(customization) = customization {
            debug!("Ignoring caller customization: {customization:?}");
        }

        let prompt = build_prompt(context);
        info!(
            "Requesting proposal slides for {} chars of context",
            context.chars().count()
        );

        let raw = self.llm.generate(&prompt).await?;
        let slides = normalize(&raw);

        info!("Model reply normalized into {} slides", slides.len());
        Ok(slides)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::proposal::models::SlideTemplate;

    struct ScriptedModel {
        reply: Result<String, u16>,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    impl ScriptedModel {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(status),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedModel {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "quota exceeded".to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_compose_context_joins_both_parts() {
        let context = compose_context(Some("A mobile app"), Some("Brief v2")).unwrap();
        assert_eq!(context, "Description: A mobile app\n\nDocument Content: Brief v2");
    }

    #[test]
    fn test_compose_context_skips_blank_parts() {
        assert_eq!(
            compose_context(Some("   "), Some("Only the document")).as_deref(),
            Some("Document Content: Only the document")
        );
        assert_eq!(
            compose_context(Some("Only the description"), None).as_deref(),
            Some("Description: Only the description")
        );
    }

    #[test]
    fn test_compose_context_none_when_empty() {
        assert!(compose_context(None, None).is_none());
        assert!(compose_context(Some(""), Some("\n\t")).is_none());
    }

    #[tokio::test]
    async fn test_generate_calls_model_once_and_normalizes() {
        let model = ScriptedModel::replying(r#"[{"title":"Launch"},{"title":"Plan"}]"#);
        let generator = ProposalGenerator::new(model.clone());

        let slides = generator
            .generate("Description: launch a store", None)
            .await
            .unwrap();

        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].template, SlideTemplate::Title);

        let prompt = model.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Description: launch a store"));
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_not_an_error() {
        let model = ScriptedModel::replying("I could not format this as JSON, sorry");
        let generator = ProposalGenerator::new(model);

        let slides = generator.generate("ctx", None).await.unwrap();
        assert!(slides.len() >= 2);
        assert_eq!(slides[0].title, "Business Proposal");
    }

    #[tokio::test]
    async fn test_model_failure_is_a_generation_error_without_retry() {
        let model = ScriptedModel::failing(429);
        let generator = ProposalGenerator::new(model.clone());

        let err = generator.generate("ctx", None).await.unwrap_err();

        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
        assert!(matches!(
            err,
            GenerationError::Model(LlmError::Api { status: 429, .. })
        ));
        assert!(err.to_string().starts_with("AI proposal generation failed"));
    }

    #[tokio::test]
    async fn test_customization_does_not_change_the_prompt() {
        let plain = ScriptedModel::replying("[]");
        let styled = ScriptedModel::replying("[]");
        let customization = Customization {
            background_color: Some("#000000".to_string()),
            text_color: Some("white".to_string()),
            ..Default::default()
        };

        ProposalGenerator::new(plain.clone())
            .generate("same context", None)
            .await
            .unwrap();
        ProposalGenerator::new(styled.clone())
            .generate("same context", Some(&customization))
            .await
            .unwrap();

        assert_eq!(
            *plain.last_prompt.lock().unwrap(),
            *styled.last_prompt.lock().unwrap()
        );
    }
}
