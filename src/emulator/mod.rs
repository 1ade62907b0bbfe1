//! Clients for the local Firebase emulator suite.
//!
//! The emulators speak the same REST APIs as production, minus real
//! authentication: the `Bearer owner` token grants admin access.

pub mod auth;
pub mod firestore;
pub mod store;
pub mod value;

pub use auth::AuthEmulator;
pub use firestore::FirestoreEmulator;
pub use store::{Document, DocumentStore, IdentityStore, StoreError, UserRecord};

use log::warn;
use serde::Deserialize;

/// Admin token accepted by every emulator.
pub(crate) const OWNER_TOKEN: &str = "owner";

/// `localhost:8080` → `http://localhost:8080`. Full URLs pass through unchanged.
pub fn origin(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{host}")
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Turns a non-success response into `StoreError::Api`, preferring the
/// `{"error": {"message": ...}}` text when the body has one.
pub(crate) async fn api_error(service: &str, response: reqwest::Response) -> StoreError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    warn!("{} emulator error: {} - {}", service, status, body);
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|envelope| envelope.error.message)
        .unwrap_or(body);
    StoreError::Api { status, message }
}
