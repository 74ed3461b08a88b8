use axum::{Extension, Router, routing::get};
use tokio::{net::TcpListener, sync::oneshot};

use crate::{
    Error, Result,
    api::{self, CallbackState},
};

pub fn router(state: CallbackState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

/// Serves the callback routes until `shutdown` fires or its sender is dropped.
pub async fn serve(
    listener: TcpListener,
    state: CallbackState,
    shutdown: oneshot::Receiver<()>,
) -> Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = shutdown.await;
        })
        .await
        .map_err(|e| Error::Auth(format!("callback server failed: {}", e)))
}
