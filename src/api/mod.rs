//! # API Module
//!
//! HTTP endpoints of the short-lived local server that receives the Spotify
//! OAuth redirect during first-time login.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the authorization code, exchanges it for a token
//!   and hands the outcome to the waiting login flow through [`CallbackState`].
//! - [`health`] - Returns status and version, handy to check that the server
//!   is listening on the configured address.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use spordiff::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback).layer(Extension(state)))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::CallbackState;
pub use callback::callback;
pub use health::health;
