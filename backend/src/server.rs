use std::sync::Arc;

use axum::{
    body::Bytes,
    http::{Method, Uri},
    response::{IntoResponse, Response},
    Extension, Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::dispatcher::{ApiRequest, Dispatcher};

/// Builds the router: every method and path is forwarded to the dispatcher
pub fn router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .fallback(forward)
        .layer(Extension(dispatcher))
        .layer(TraceLayer::new_for_http())
}

async fn forward(
    Extension(dispatcher): Extension<Arc<Dispatcher>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let body = (!body.is_empty()).then(|| String::from_utf8_lossy(&body).into_owned());
    let request = ApiRequest::new(method, uri.path(), body);

    dispatcher.dispatch(request).await.into_http().into_response()
}

/// Starts the server with the given dispatcher
///
/// # Errors
///
/// Returns an error if the server fails to start or bind to the port
pub async fn start(dispatcher: Arc<Dispatcher>) -> anyhow::Result<()> {
    let router = router(dispatcher);

    let addr = std::net::SocketAddr::from((
        [0, 0, 0, 0],
        std::env::var("PORT").map_or(Ok(8001), |p| p.parse())?,
    ));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Property listing backend started on http://{addr}");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Received shutdown signal");
}
