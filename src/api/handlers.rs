use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::{EnrichedResponse, Turn};
use crate::services::model_catalog;

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    /// Kept untyped so a non-string value surfaces as `InvalidPrompt`
    #[serde(default)]
    pub message: Value,
}

impl SendMessageRequest {
    /// The prompt text; missing or non-string values are rejected
    pub fn prompt(&self) -> AppResult<&str> {
        match &self.message {
            Value::String(text) => Ok(text.as_str()),
            Value::Null => Err(AppError::InvalidPrompt(
                "Prompt cannot be empty".to_string(),
            )),
            _ => Err(AppError::InvalidPrompt(
                "Prompt must be a string".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SelectModelRequest {
    #[serde(default)]
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct StartConversationResponse {
    pub session_id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct OpeningMessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Open a new session and greet the user
pub async fn create_conversation(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<(StatusCode, Json<StartConversationResponse>)> {
    let (session_id, engine) = state.create_session().await;
    let message = engine.lock().await.start_conversation()?;

    tracing::info!(request_id = %request_id, session_id = %session_id, "Conversation opened");

    Ok((
        StatusCode::CREATED,
        Json(StartConversationResponse {
            session_id,
            message,
        }),
    ))
}

/// Restart an existing session with the opening message
pub async fn start_conversation(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<OpeningMessageResponse>> {
    let engine = state.session(session_id).await?;
    let message = engine.lock().await.start_conversation()?;
    Ok(Json(OpeningMessageResponse { message }))
}

/// Send a user message and get the enriched recommendation reply
pub async fn send_message(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> AppResult<Json<EnrichedResponse>> {
    let engine = state.session(session_id).await?;
    let prompt = request.prompt()?;

    tracing::info!(
        request_id = %request_id,
        session_id = %session_id,
        prompt_chars = prompt.len(),
        "Processing message"
    );

    let response = engine
        .lock()
        .await
        .generate_response(prompt)
        .await?;

    Ok(Json(response))
}

/// Get the session's turns in conversation order
pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<Vec<Turn>>> {
    let engine = state.session(session_id).await?;
    let history = engine.lock().await.history();
    Ok(Json(history))
}

/// Clear the session's memory
pub async fn clear_memory(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<ActionResponse>> {
    let engine = state.session(session_id).await?;
    engine.lock().await.clear_memory();

    Ok(Json(ActionResponse {
        success: true,
        message: "Memory cleared".to_string(),
    }))
}

/// Choose the model for later messages in this session
pub async fn select_model(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SelectModelRequest>,
) -> AppResult<Json<ActionResponse>> {
    let engine = state.session(session_id).await?;
    engine.lock().await.select_model(&request.model)?;

    Ok(Json(ActionResponse {
        success: true,
        message: format!("Model {} selected", request.model.trim()),
    }))
}

/// End a session
pub async fn end_conversation(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.remove_session(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List generative models offered by the provider
pub async fn available_models(State(state): State<AppState>) -> AppResult<Json<ModelsResponse>> {
    let models = model_catalog::list_available_models(state.language_model.as_ref()).await?;
    Ok(Json(ModelsResponse { models }))
}
