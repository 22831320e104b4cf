use std::{sync::Arc, time::Duration};

use crate::{
    error::{AppError, AppResult},
    models::{DialogueMemory, EnrichedResponse, Role, Turn},
    services::{
        extraction::TitleExtractor,
        metadata::MetadataResolver,
        prompt::{OPENING_MESSAGE, SYSTEM_TEMPLATE},
        providers::{CompletionRequest, LanguageModel},
    },
};

/// Per-session model parameters
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    /// Upper bound for one model invocation
    pub timeout: Duration,
}

/// Orchestrates one conversation
///
/// Owns the session's [`DialogueMemory`]. The engine does no locking of its
/// own: callers must serialize calls on a single instance, since turn order
/// is part of the conversation.
pub struct RecommendationEngine {
    memory: DialogueMemory,
    language_model: Arc<dyn LanguageModel>,
    extractor: Arc<dyn TitleExtractor>,
    resolver: Arc<MetadataResolver>,
    settings: GenerationSettings,
}

impl RecommendationEngine {
    pub fn new(
        language_model: Arc<dyn LanguageModel>,
        extractor: Arc<dyn TitleExtractor>,
        resolver: Arc<MetadataResolver>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            memory: DialogueMemory::new(),
            language_model,
            extractor,
            resolver,
            settings,
        }
    }

    /// Resets the session and seeds it with the opening message
    pub fn start_conversation(&mut self) -> AppResult<String> {
        self.memory.clear();
        self.memory.append(Role::Assistant, OPENING_MESSAGE)?;

        tracing::info!("Conversation started");
        Ok(OPENING_MESSAGE.to_string())
    }

    /// Runs one user turn through the model and enriches the reply
    ///
    /// The user turn is kept even when generation fails. The assistant turn
    /// is appended only once the model has replied, and enrichment never
    /// fails the call.
    pub async fn generate_response(&mut self, prompt: &str) -> AppResult<EnrichedResponse> {
        if prompt.trim().is_empty() {
            return Err(AppError::InvalidPrompt(
                "Prompt cannot be empty".to_string(),
            ));
        }

        self.memory.append(Role::User, prompt)?;

        let request = CompletionRequest {
            model: self.settings.model.clone(),
            temperature: self.settings.temperature,
            system: SYSTEM_TEMPLATE.to_string(),
            turns: self.memory.snapshot().to_vec(),
        };
        let raw_text = self.invoke_model(request).await?;

        self.memory
            .append(Role::Assistant, raw_text.as_str())
            .map_err(|e| AppError::GenerationFailed(e.to_string()))?;

        let titles = self.extractor.extract(&raw_text);
        let records = self.resolver.resolve_all(&titles).await;

        tracing::info!(
            model = %self.settings.model,
            turns = self.memory.len(),
            titles = titles.len(),
            enriched = records.iter().filter(|r| !r.is_placeholder()).count(),
            "Response generated"
        );

        Ok(EnrichedResponse { raw_text, records })
    }

    async fn invoke_model(&self, request: CompletionRequest) -> AppResult<String> {
        let timeout = self.settings.timeout;
        let outcome = tokio::time::timeout(timeout, self.language_model.complete(request)).await;

        let text = match outcome {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                tracing::error!(
                    error = %e,
                    provider = self.language_model.name(),
                    "Model invocation failed"
                );
                return Err(AppError::GenerationFailed(e.to_string()));
            }
            Err(_) => {
                tracing::error!(
                    timeout = ?timeout,
                    provider = self.language_model.name(),
                    "Model invocation timed out"
                );
                return Err(AppError::GenerationFailed(format!(
                    "model invocation timed out after {:?}",
                    timeout
                )));
            }
        };

        if text.trim().is_empty() {
            return Err(AppError::GenerationFailed(
                "model returned an empty reply".to_string(),
            ));
        }

        Ok(text)
    }

    /// Empties the session without adding an opening message
    pub fn clear_memory(&mut self) {
        self.memory.clear();
        tracing::debug!("Conversation memory cleared");
    }

    /// Every turn so far, in conversation order
    pub fn history(&self) -> Vec<Turn> {
        self.memory.snapshot().to_vec()
    }

    pub fn memory(&self) -> &DialogueMemory {
        &self.memory
    }

    /// Switches the model used for later generations in this session
    pub fn select_model(&mut self, model: &str) -> AppResult<()> {
        let model = model.trim();
        if model.is_empty() {
            return Err(AppError::InvalidPrompt(
                "Model identifier cannot be empty".to_string(),
            ));
        }

        self.settings.model = model.to_string();
        tracing::info!(model = %model, "Model selected");
        Ok(())
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }
}
