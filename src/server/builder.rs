//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::config::AppConfig;
use crate::core::access::ResourcePolicy;
use crate::core::auth::CredentialVerifier;
use crate::core::error::ConfigError;
use crate::core::query::DEFAULT_MAX_PAGE_SIZE;
use crate::core::service::CashCardService;
use crate::core::store::CashCardStore;
use crate::storage::InMemoryCashCardStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating the cash card HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryCashCardStore::new())
///     .with_credentials(InMemoryCredentials::new().with_user("sarah1", "abc123", &[]))
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn CashCardStore>>,
    credentials: Option<Arc<dyn CredentialVerifier>>,
    resource_policy: ResourcePolicy,
    max_page_size: usize,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            credentials: None,
            resource_policy: ResourcePolicy::default(),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            custom_routes: Vec::new(),
        }
    }

    /// Build a server from configuration, backed by a seeded in-memory store
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self::new()
            .with_store(InMemoryCashCardStore::with_cards(config.seed_cards()))
            .with_credentials(config.credentials())
            .with_resource_policy(config.access.resource_policy.clone())
            .with_max_page_size(config.server.max_page_size))
    }

    /// Set the cash card store (required)
    pub fn with_store(self, store: impl CashCardStore + 'static) -> Self {
        self.with_shared_store(Arc::new(store))
    }

    /// Set a store that is also held elsewhere
    pub fn with_shared_store(mut self, store: Arc<dyn CashCardStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the credential verifier (required)
    pub fn with_credentials(mut self, credentials: impl CredentialVerifier + 'static) -> Self {
        self.credentials = Some(Arc::new(credentials));
        self
    }

    /// Enable a resource-level ban (default: unrestricted)
    pub fn with_resource_policy(mut self, policy: ResourcePolicy) -> Self {
        self.resource_policy = policy;
        self
    }

    /// Cap the `size` query parameter
    pub fn with_max_page_size(mut self, max_page_size: usize) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    /// Add custom routes to the server
    ///
    /// Custom routes are not behind the cash card authentication layer.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("CashCardStore is required. Call .with_store()"))?;

        let credentials = self.credentials.take().ok_or_else(|| {
            anyhow::anyhow!("CredentialVerifier is required. Call .with_credentials()")
        })?;

        let service = CashCardService::new(store).with_max_page_size(self.max_page_size);

        Ok(ServerHost::new(
            service,
            credentials,
            self.resource_policy.clone(),
        ))
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        Ok(RestExposure::build_router(host, custom_routes))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let policy = self.resource_policy.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(?policy, "Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
