use std::sync::Arc;

use session_actor::{SessionActor, SessionClient};
use store_api::{HttpStoreApi, StoreApi, StoreApiError};
use tracing::{error, info};

use crate::config::AppConfig;
use crate::handlers::AppState;
use crate::render::{PageRenderer, PageShellRenderer};

/// The runtime orchestrator of the storefront web layer.
///
/// `StorefrontSystem` is responsible for:
/// - **Wiring**: building the [`StoreApi`] client from configuration.
/// - **Lifecycle**: spawning the session actor and awaiting it on shutdown.
/// - **State**: handing the shared [`AppState`] to the router.
///
/// # Example
///
/// ```ignore
/// let system = StorefrontSystem::new(&config)?;
/// let app = handlers::router(system.state());
/// axum::serve(listener, app).await?;
/// system.shutdown().await?;
/// ```
pub struct StorefrontSystem {
    state: AppState,

    /// Task handle of the session actor (awaited on shutdown).
    session_handle: tokio::task::JoinHandle<()>,
}

impl StorefrontSystem {
    /// Builds the production system: `reqwest` store client and the page-shell
    /// renderer.
    pub fn new(config: &AppConfig) -> Result<Self, StoreApiError> {
        let api: Arc<dyn StoreApi> = Arc::new(HttpStoreApi::new(config.store_api_config())?);
        Ok(Self::with_parts(config, api, Arc::new(PageShellRenderer)))
    }

    /// Builds the system around an existing store client and renderer.
    ///
    /// Tests use this to run the real router against a mock store.
    pub fn with_parts(
        config: &AppConfig,
        api: Arc<dyn StoreApi>,
        renderer: Arc<dyn PageRenderer>,
    ) -> Self {
        let (session_actor, sessions) = SessionActor::new(config.session_config());
        let session_handle = tokio::spawn(session_actor.run());
        info!("Session actor spawned");

        let state = AppState::new(config, api, sessions, renderer);
        Self {
            state,
            session_handle,
        }
    }

    /// Shared handler state; cheap to clone.
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Client of the running session actor.
    pub fn sessions(&self) -> SessionClient {
        self.state.sessions.clone()
    }

    /// Drops this system's session client and waits for the actor to finish.
    ///
    /// The actor only stops once *every* clone of its client is gone, so the
    /// router (which holds [`AppState`] clones) must have been dropped first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront...");
        drop(self.state);

        if let Err(e) = self.session_handle.await {
            error!("Session actor failed: {:?}", e);
            return Err(format!("Session actor failed: {:?}", e));
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
