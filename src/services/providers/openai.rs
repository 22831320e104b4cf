/// OpenAI chat-completions provider
///
/// API Flow:
/// 1. Completion: POST /chat/completions with the system template followed by every turn
/// 2. Model listing: GET /models
use crate::{
    error::{AppError, AppResult},
    models::openai::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ModelListResponse},
    services::providers::{CompletionRequest, LanguageModel},
};
use reqwest::Client as HttpClient;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct OpenAiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, api_url: String) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_messages(request: &CompletionRequest) -> Vec<ChatMessage<'_>> {
        let mut messages = Vec::with_capacity(request.turns.len() + 1);
        messages.push(ChatMessage::system(&request.system));
        messages.extend(request.turns.iter().map(ChatMessage::from));
        messages
    }

    async fn check_status(response: reqwest::Response) -> AppResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::ExternalApi(format!(
            "OpenAI API returned status {}: {}",
            status, body
        )))
    }
}

#[async_trait::async_trait]
impl LanguageModel for OpenAiProvider {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String> {
        let url = format!("{}/chat/completions", self.api_url);
        let body = ChatCompletionRequest {
            model: &request.model,
            temperature: request.temperature,
            messages: Self::build_messages(&request),
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let completion: ChatCompletionResponse = response.json().await?;
        let text = completion.into_text().ok_or_else(|| {
            AppError::ExternalApi("OpenAI response contained no message content".to_string())
        })?;

        tracing::info!(
            model = %request.model,
            turns = request.turns.len(),
            reply_chars = text.len(),
            provider = "openai",
            "Completion received"
        );

        Ok(text)
    }

    async fn list_models(&self) -> AppResult<Vec<String>> {
        let url = format!("{}/models", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let models: ModelListResponse = response.json().await?;
        Ok(models.data.into_iter().map(|m| m.id).collect())
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
