use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::config::Config;
use crate::error::AppResult;
use crate::services::model::Model;
use crate::services::providers::RatingsSource;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    source: Box<dyn RatingsSource>,
    model: RwLock<Option<Arc<Model>>>,
    build_lock: Mutex<()>,
}

impl AppState {
    /// Creates application state with no model built yet
    pub fn new(config: Config, source: Box<dyn RatingsSource>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                source,
                model: RwLock::new(None),
                build_lock: Mutex::new(()),
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Returns the shared model, building it on first use
    ///
    /// The build mutex guarantees at most one build runs at a time; callers
    /// arriving during a build wait and then reuse its result. A failed
    /// build leaves no partial state, so the next caller retries the fetch.
    pub async fn model(&self) -> AppResult<Arc<Model>> {
        if let Some(model) = self.inner.model.read().await.as_ref() {
            return Ok(Arc::clone(model));
        }

        let _guard = self.inner.build_lock.lock().await;
        // Another caller may have finished the build while we waited.
        if let Some(model) = self.inner.model.read().await.as_ref() {
            return Ok(Arc::clone(model));
        }

        let model = self.build_model().await?;
        *self.inner.model.write().await = Some(Arc::clone(&model));
        Ok(model)
    }

    /// Discards the current model and rebuilds from a fresh fetch
    ///
    /// In-flight requests keep their `Arc` to the old model; new requests
    /// observe the replacement once the rebuild completes.
    pub async fn reload(&self) -> AppResult<Arc<Model>> {
        let _guard = self.inner.build_lock.lock().await;
        let model = self.build_model().await?;
        *self.inner.model.write().await = Some(Arc::clone(&model));
        Ok(model)
    }

    async fn build_model(&self) -> AppResult<Arc<Model>> {
        let (ratings, movies) = self.inner.source.fetch().await?;
        Ok(Arc::new(Model::build(ratings, movies, &self.inner.config)))
    }
}
