use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::{
    engine::{GenerationSettings, RecommendationEngine},
    extraction::{TieredExtractor, TitleExtractor},
    metadata::MetadataResolver,
    providers::LanguageModel,
};

/// An engine shared between requests for the same session
///
/// The mutex serializes turns within a session; separate sessions never
/// contend with each other.
pub type SharedEngine = Arc<Mutex<RecommendationEngine>>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
    pub language_model: Arc<dyn LanguageModel>,
    extractor: Arc<dyn TitleExtractor>,
    resolver: Arc<MetadataResolver>,
    settings: GenerationSettings,
}

/// Inner state that can be modified
pub struct AppStateInner {
    pub sessions: HashMap<Uuid, SessionEntry>,
}

/// A registered session and when a request last touched it
pub struct SessionEntry {
    pub engine: SharedEngine,
    pub last_used: Instant,
}

impl SessionEntry {
    fn new(engine: SharedEngine) -> Self {
        Self {
            engine,
            last_used: Instant::now(),
        }
    }

    /// Idle past `max_idle` and not serving a request right now
    fn is_expired(&self, now: Instant, max_idle: Duration) -> bool {
        now.duration_since(self.last_used) > max_idle && self.engine.try_lock().is_ok()
    }
}

impl AppState {
    /// Creates state with no open sessions
    ///
    /// `settings` seeds every new session; sessions may later select another model.
    pub fn new(
        language_model: Arc<dyn LanguageModel>,
        resolver: MetadataResolver,
        settings: GenerationSettings,
    ) -> AppResult<Self> {
        let extractor = TieredExtractor::standard()
            .map_err(|e| AppError::Internal(format!("Invalid extraction pattern: {}", e)))?;

        Ok(Self {
            inner: Arc::new(RwLock::new(AppStateInner {
                sessions: HashMap::new(),
            })),
            language_model,
            extractor: Arc::new(extractor),
            resolver: Arc::new(resolver),
            settings,
        })
    }

    /// Registers a fresh engine under a new session id
    pub async fn create_session(&self) -> (Uuid, SharedEngine) {
        let engine = RecommendationEngine::new(
            self.language_model.clone(),
            self.extractor.clone(),
            self.resolver.clone(),
            self.settings.clone(),
        );
        let session_id = Uuid::new_v4();
        let engine = Arc::new(Mutex::new(engine));

        let mut inner = self.inner.write().await;
        inner
            .sessions
            .insert(session_id, SessionEntry::new(engine.clone()));

        tracing::info!(session_id = %session_id, sessions = inner.sessions.len(), "Session created");
        (session_id, engine)
    }

    /// Looks up a session and marks it as used
    pub async fn session(&self, session_id: Uuid) -> AppResult<SharedEngine> {
        let mut inner = self.inner.write().await;
        let entry = inner
            .sessions
            .get_mut(&session_id)
            .ok_or_else(|| AppError::NotFound(format!("Session {} not found", session_id)))?;

        entry.last_used = Instant::now();
        Ok(entry.engine.clone())
    }

    /// Ends a session and drops its memory
    pub async fn remove_session(&self, session_id: Uuid) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        inner
            .sessions
            .remove(&session_id)
            .map(|_| {
                tracing::info!(session_id = %session_id, "Session ended");
            })
            .ok_or_else(|| AppError::NotFound(format!("Session {} not found", session_id)))
    }

    pub async fn session_count(&self) -> usize {
        self.inner.read().await.sessions.len()
    }

    /// Drops sessions idle for longer than `max_idle`, returning how many went
    ///
    /// Sessions with a request in flight are kept regardless of age.
    pub async fn expire_idle_sessions(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let mut inner = self.inner.write().await;
        let before = inner.sessions.len();
        inner
            .sessions
            .retain(|_, entry| !entry.is_expired(now, max_idle));

        let expired = before - inner.sessions.len();
        if expired > 0 {
            tracing::info!(
                expired,
                remaining = inner.sessions.len(),
                "Expired idle sessions"
            );
        }
        expired
    }

    /// Spawns a background task that expires idle sessions every `period`
    pub fn spawn_session_sweeper(&self, max_idle: Duration, period: Duration) -> JoinHandle<()> {
        let state = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                state.expire_idle_sessions(max_idle).await;
            }
        })
    }
}
