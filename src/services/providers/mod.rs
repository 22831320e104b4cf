/// External collaborator abstraction
///
/// The engine talks to two remote services: a language model that turns the
/// conversation into prose, and a media catalog that turns titles into
/// metadata. Each sits behind its own trait so providers can be swapped (or
/// faked in tests) without touching the orchestration code.
use crate::{
    error::AppResult,
    models::{CatalogEntry, Turn},
};

pub mod openai;
pub mod tmdb;

/// Everything a provider needs for a single completion
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f32,
    /// Fixed system instructions, sent ahead of the turns
    pub system: String,
    pub turns: Vec<Turn>,
}

/// Trait for generative language model providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a reply to the conversation in `request`
    ///
    /// Returns the raw text of the reply. Timeouts are enforced by the caller.
    async fn complete(&self, request: CompletionRequest) -> AppResult<String>;

    /// Every model identifier the provider exposes, unfiltered
    async fn list_models(&self) -> AppResult<Vec<String>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Trait for media metadata catalogs
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataCatalog: Send + Sync {
    /// Search by free-text title
    ///
    /// Results keep the catalog's own relevance ranking, best match first.
    async fn search(&self, query: &str) -> AppResult<Vec<CatalogEntry>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
