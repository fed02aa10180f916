//! # Common Test Utilities
//!
//! `TestApp` spawns the real router on a random port so the API can be
//! exercised over HTTP. Upstream pages are served by a `wiremock` server, or
//! by a `MockFetcher` when a test needs the real site's URL shapes.

// Allow unused code because not every test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use reqwest::Client;
use std::net::SocketAddr;
use tokio::{net::TcpListener, task::JoinHandle};
use tubemeta_server::{
    config::AppConfig,
    router::create_router,
    state::{build_app_state, AppState},
};
use wiremock::MockServer;

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

/// A configuration that accepts the mock server's host, never sleeps and
/// serves thumbnails from the mock server.
pub fn test_config(mock_server: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.allowed_hosts.push("127.0.0.1".to_string());
    config.extractor = config.extractor.without_delays();
    config.extractor.thumbnail_base_url = format!("{}/vi", mock_server.uri());
    config
}

impl TestApp {
    /// Spawns the application with state built from `test_config`.
    pub async fn spawn() -> Result<Self> {
        let mock_server = MockServer::start().await;
        let app_state = build_app_state(test_config(&mock_server))?;
        Self::spawn_with_state(app_state, mock_server).await
    }

    /// Spawns the application with a pre-built state.
    pub async fn spawn_with_state(app_state: AppState, mock_server: MockServer) -> Result<Self> {
        // `try_init` is used to prevent panic if the logger is already initialized.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// The URL of a watch page on the mock server.
    pub fn watch_url(&self) -> String {
        format!("{}/watch?v=abc123", self.mock_server.uri())
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            // The receiver might already be gone if the server task panicked.
            let _ = tx.send(());
        }
    }
}

/// A desktop watch page long enough to pass the blocked-response check.
pub fn desktop_page(title: &str, description: &str) -> String {
    format!(
        r#"<html><head><title>{title} - YouTube</title></head><body>
<script>{{"videoDetails":{{"videoId":"abc123","title":"{title}","keywords":["one","two","one"],"shortDescription":"{description}"}}}}</script>
<div>{padding}</div></body></html>"#,
        padding = "content ".repeat(200),
    )
}
