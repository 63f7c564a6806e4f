//! HTTP server boundary

mod routes;
mod state;

pub use routes::router;
pub use state::ServerState;

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::application::ports::BeatAnalyzer;

/// Server startup errors
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("Server failed: {0}")]
    Serve(std::io::Error),
}

/// Bind and serve the analysis API until the process is stopped.
pub async fn run_server(addr: &str, analyzer: Arc<dyn BeatAnalyzer>) -> Result<(), ServeError> {
    let state = ServerState::new(analyzer);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: addr.to_string(),
            source,
        })?;

    info!("Listening on {}", addr);

    axum::serve(listener, app).await.map_err(ServeError::Serve)
}
