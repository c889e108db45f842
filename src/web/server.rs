//! Web server for filegate.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::{CorsConfig, ServerConfig, StorageConfig};
use crate::storage::FolderStore;
use crate::{FilegateError, Result};

use super::handlers::AppState;
use super::router::{create_health_router, create_router, create_swagger_router};

/// Web server for the gateway API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// CORS allowed origins.
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server.
    ///
    /// Initializes the folder store under the configured storage root.
    pub fn new(server: &ServerConfig, storage: &StorageConfig, cors: &CorsConfig) -> Result<Self> {
        let addr = format!("{}:{}", server.host, server.port)
            .parse()
            .map_err(|e| FilegateError::Config(format!("invalid server address: {e}")))?;

        let store = FolderStore::new(&storage.root)?;
        tracing::info!("File storage initialized at: {}", storage.root);

        let app_state = Arc::new(AppState::new(store, storage.max_upload_size_bytes()));

        Ok(Self {
            addr,
            app_state,
            cors_origins: cors.origins.clone(),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Assemble the full router (API + health + swagger).
    fn build_router(&self) -> Router {
        create_router(self.app_state.clone(), &self.cors_origins)
            .merge(create_health_router())
            .merge(create_swagger_router())
    }

    /// Run the web server until the process is stopped.
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::result::Result<SocketAddr, std::io::Error> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_configs(temp_dir: &TempDir) -> (ServerConfig, StorageConfig, CorsConfig) {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Use random port
        };
        let storage = StorageConfig {
            root: temp_dir.path().join("uploads").to_string_lossy().into_owned(),
            max_upload_size_mb: 10,
        };
        (server, storage, CorsConfig::default())
    }

    #[tokio::test]
    async fn test_web_server_new() {
        let temp_dir = TempDir::new().unwrap();
        let (server_config, storage_config, cors_config) = create_test_configs(&temp_dir);

        let server = WebServer::new(&server_config, &storage_config, &cors_config).unwrap();
        assert_eq!(server.addr().ip().to_string(), "127.0.0.1");

        // The storage root is created eagerly
        assert!(temp_dir.path().join("uploads").is_dir());
    }

    #[tokio::test]
    async fn test_web_server_run_with_addr() {
        let temp_dir = TempDir::new().unwrap();
        let (server_config, storage_config, cors_config) = create_test_configs(&temp_dir);

        let server = WebServer::new(&server_config, &storage_config, &cors_config).unwrap();
        let addr = server.run_with_addr().await.unwrap();

        assert_ne!(addr.port(), 0);
    }

    #[test]
    fn test_invalid_address_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let server_config = ServerConfig {
            host: "not a host".to_string(),
            port: 3000,
        };
        let storage_config = StorageConfig {
            root: temp_dir.path().to_string_lossy().into_owned(),
            max_upload_size_mb: 10,
        };

        let result = WebServer::new(&server_config, &storage_config, &CorsConfig::default());
        assert!(matches!(result, Err(FilegateError::Config(_))));
    }
}
