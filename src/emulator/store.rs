use std::fmt;

use async_trait::async_trait;
use serde_json::{Map, Value};

/// Errors that can occur while talking to an emulator.
#[derive(Debug)]
pub enum StoreError {
    /// Client misconfigured (bad host, bad project). Not retryable.
    Config(String),
    /// Network-level failure (connection refused is the usual one: emulator not running).
    Network(String),
    /// Emulator returned an error response.
    Api { status: u16, message: String },
    /// Failed to parse the emulator's response.
    Parse(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Config(msg) => write!(f, "config error: {msg}"),
            StoreError::Network(msg) => write!(f, "network error: {msg}"),
            StoreError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            StoreError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// A stored document: its id within the collection and its fields as plain JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

/// An account known to the identity store.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub uid: String,
    pub email: String,
}

/// Collection/document storage (Firestore in practice).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Adds a document under a generated id and returns that id.
    async fn add_document(
        &self,
        collection: &str,
        fields: &Map<String, Value>,
    ) -> Result<String, StoreError>;

    /// Creates or overwrites the document `id`.
    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: &Map<String, Value>,
    ) -> Result<(), StoreError>;

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Top-level collection ids.
    async fn list_collections(&self) -> Result<Vec<String>, StoreError>;
}

/// Email/password accounts (Firebase Auth in practice).
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Creates an account and returns its uid.
    async fn create_user(&self, email: &str, password: &str) -> Result<String, StoreError>;

    /// Looks accounts up by email. Unknown emails are simply absent from the result.
    async fn lookup_by_email(&self, emails: &[String]) -> Result<Vec<UserRecord>, StoreError>;
}
