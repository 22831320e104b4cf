use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use what_to_watch_api::{
    api::{create_router, AppState},
    config::Config,
    services::{
        providers::{openai::OpenAiProvider, tmdb::TmdbProvider, LanguageModel, MetadataCatalog},
        GenerationSettings, MetadataResolver,
    },
};

const DEFAULT_LOG_FILTER: &str = "what_to_watch_api=info,tower_http=info";
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env()?;

    let language_model: Arc<dyn LanguageModel> = Arc::new(OpenAiProvider::new(
        config.openai_api_key.clone(),
        config.openai_api_url.clone(),
    )?);

    let catalog: Option<Arc<dyn MetadataCatalog>> = match config.catalog_api_key() {
        Some(api_key) => Some(Arc::new(TmdbProvider::new(
            api_key.to_string(),
            config.tmdb_api_url.clone(),
        )?)),
        None => {
            tracing::info!("TMDB_API_KEY not set, recommendations will not be enriched");
            None
        }
    };

    let resolver = MetadataResolver::new(
        catalog,
        config.tmdb_image_base_url.clone(),
        config.metadata_timeout(),
    );

    let settings = GenerationSettings {
        model: config.openai_model.clone(),
        temperature: config.model_temperature,
        timeout: config.model_timeout(),
    };

    // Initialize application state
    let state = AppState::new(language_model, resolver, settings)?;
    state.spawn_session_sweeper(config.session_idle_timeout(), SESSION_SWEEP_INTERVAL);

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, model = %config.openai_model, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
