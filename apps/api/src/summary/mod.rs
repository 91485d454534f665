//! Professional-summary generation with a static fallback.
//!
//! `generate_summary` never fails: any `GenerationServiceError` is logged and
//! replaced by fallback text carrying `FALLBACK_MARKER`. The marker is shown in
//! the app and stripped from every export.
//!
//! `AppState` holds an `Arc<dyn SummaryGenerator>`, picked at startup from config.

pub mod prompts;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::{LlmClient, LlmError};
use crate::summary::prompts::{FALLBACK_SUMMARY_TEMPLATE, SUMMARY_PROMPT_TEMPLATE};

/// Prefix that labels a summary as not AI-generated.
pub const FALLBACK_MARKER: &str = "(Fallback)";

#[derive(Debug, Error)]
pub enum GenerationServiceError {
    #[error("summary generation is not configured")]
    Disabled,

    #[error(transparent)]
    Llm(#[from] LlmError),
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Text-completion backend for summaries. Swap implementations without touching
/// the handlers.
#[async_trait]
pub trait SummaryGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationServiceError>;
}

/// Backend that calls the generative-text service.
pub struct LlmSummaryGenerator(pub LlmClient);

#[async_trait]
impl SummaryGenerator for LlmSummaryGenerator {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationServiceError> {
        Ok(self.0.complete(prompt).await?)
    }
}

/// Backend used when no API key is configured. Every call takes the fallback path.
pub struct DisabledSummaryGenerator;

#[async_trait]
impl SummaryGenerator for DisabledSummaryGenerator {
    async fn complete(&self, _prompt: &str) -> Result<String, GenerationServiceError> {
        Err(GenerationServiceError::Disabled)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedSummary {
    pub text: String,
    pub is_fallback: bool,
}

pub fn build_prompt(skills: &str) -> String {
    SUMMARY_PROMPT_TEMPLATE.replace("{skills}", skills)
}

/// Fallback text, already prefixed with `FALLBACK_MARKER`.
pub fn fallback_summary(skills: &str) -> String {
    format!(
        "{FALLBACK_MARKER} {}",
        FALLBACK_SUMMARY_TEMPLATE.replace("{skills}", skills)
    )
}

pub fn is_fallback(summary: &str) -> bool {
    summary.trim_start().starts_with(FALLBACK_MARKER)
}

/// Summary text as it should appear in exported artifacts.
pub fn strip_fallback_marker(summary: &str) -> &str {
    let trimmed = summary.trim();
    trimmed
        .strip_prefix(FALLBACK_MARKER)
        .map(str::trim)
        .unwrap_or(trimmed)
}

/// Asks the generator for a summary of `skills`, substituting the fallback on any error.
pub async fn generate_summary(generator: &dyn SummaryGenerator, skills: &str) -> GeneratedSummary {
    let prompt = build_prompt(skills);

    match generator.complete(&prompt).await {
        Ok(text) if !text.trim().is_empty() => {
            info!("Generated summary ({} chars)", text.trim().len());
            GeneratedSummary {
                text: text.trim().to_string(),
                is_fallback: false,
            }
        }
        Ok(_) => {
            warn!("Summary service returned blank text; using fallback");
            GeneratedSummary {
                text: fallback_summary(skills),
                is_fallback: true,
            }
        }
        Err(e) => {
            warn!("Summary generation failed, using fallback: {e}");
            GeneratedSummary {
                text: fallback_summary(skills),
                is_fallback: true,
            }
        }
    }
}
