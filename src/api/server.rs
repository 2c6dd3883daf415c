//! HTTP server bootstrap.

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::application::AnalysisService;

use super::router::build_router;

/// Bind `host:port` and serve until `shutdown` resolves.
///
/// Each request runs on its own task; in-flight requests are allowed to
/// finish once shutdown starts.
pub async fn serve(
    host: &str,
    port: u16,
    service: Arc<AnalysisService>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;

    info!(addr = %listener.local_addr()?, "Audio intercept API listening");

    axum::serve(listener, build_router(service))
        .with_graceful_shutdown(shutdown)
        .await
}
