use crate::{
    error::{AppError, AppResult},
    services::providers::LanguageModel,
};

/// Prefix shared by the provider's chat-capable generative models
const GENERATIVE_MODEL_PREFIX: &str = "gpt";

/// Lists the generative models the provider exposes, in provider order
///
/// Independent of any conversation. Provider failures surface as
/// `CatalogUnavailable`.
pub async fn list_available_models(language_model: &dyn LanguageModel) -> AppResult<Vec<String>> {
    let models = language_model.list_models().await.map_err(|e| {
        tracing::error!(
            error = %e,
            provider = language_model.name(),
            "Failed to list available models"
        );
        AppError::CatalogUnavailable(e.to_string())
    })?;

    Ok(models
        .into_iter()
        .filter(|id| id.starts_with(GENERATIVE_MODEL_PREFIX))
        .collect())
}
