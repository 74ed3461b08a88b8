use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::{Mutex, oneshot};

use crate::{
    Error, Result, spotify,
    types::{AuthSession, Credentials, Token},
    warning,
};

/// Shared with the `/callback` handler for the duration of one login.
///
/// The sender is taken on first use, so only the first redirect completes the
/// login; later hits are answered without effect.
#[derive(Clone)]
pub struct CallbackState {
    session: AuthSession,
    credentials: Credentials,
    done: Arc<Mutex<Option<oneshot::Sender<Result<Token>>>>>,
}

impl CallbackState {
    pub fn new(
        session: AuthSession,
        credentials: Credentials,
        done: oneshot::Sender<Result<Token>>,
    ) -> Self {
        Self {
            session,
            credentials,
            done: Arc::new(Mutex::new(Some(done))),
        }
    }

    async fn complete(&self, outcome: Result<Token>) -> bool {
        match self.done.lock().await.take() {
            Some(sender) => sender.send(outcome).is_ok(),
            None => false,
        }
    }
}

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<CallbackState>,
) -> Html<&'static str> {
    if let Some(reason) = params.get("error") {
        state
            .complete(Err(Error::Auth(format!("authorization denied: {}", reason))))
            .await;
        return Html("<h4>Login failed.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    if params.get("state") != Some(&state.session.state) {
        state
            .complete(Err(Error::Auth("state mismatch in callback".to_string())))
            .await;
        return Html("<h4>Login failed.</h4>");
    }

    match spotify::auth::exchange_code(&state.credentials, code, &state.session.code_verifier).await
    {
        Ok(token) => {
            if state.complete(Ok(token)).await {
                Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
            } else {
                Html("<h4>Login already completed.</h4>")
            }
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            state.complete(Err(e)).await;
            Html("<h4>Login failed.</h4>")
        }
    }
}
