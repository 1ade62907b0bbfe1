//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::actions::Services;
use crate::core::action::{Action, Control};
use crate::core::console::{Console, LineConsole};
use crate::emulator::{Document, DocumentStore, IdentityStore, StoreError, UserRecord};

/// A console fed from `input`, writing into a buffer.
pub fn test_console(input: &str) -> LineConsole<&[u8], Vec<u8>> {
    LineConsole::new(input.as_bytes(), Vec::new())
}

/// Writes `contents` to a file under the temp dir and returns its path.
/// Use a distinct `name` per test; tests run in parallel.
pub fn write_temp_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("emunav-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Shared log of invoked action names.
pub type CallLog = Rc<RefCell<Vec<String>>>;

/// Records its name into a call log each time it is invoked.
pub struct RecordingAction {
    name: String,
    calls: CallLog,
}

impl RecordingAction {
    pub fn new(name: &str) -> (Self, CallLog) {
        Self::shared(name, CallLog::default())
    }

    /// Like `new`, appending to an existing log so call order across actions is visible.
    pub fn shared(name: &str, calls: CallLog) -> (Self, CallLog) {
        let action = Self {
            name: name.to_string(),
            calls: calls.clone(),
        };
        (action, calls)
    }
}

impl Action for RecordingAction {
    fn invoke(&self, _console: &mut dyn Console) -> Control {
        self.calls.borrow_mut().push(self.name.clone());
        Control::Continue
    }
}

// ============================================================================
// In-memory stores
// ============================================================================

#[derive(Default)]
pub struct FakeDocumentStore {
    collections: Mutex<BTreeMap<String, Vec<Document>>>,
    next_error: Mutex<Option<String>>,
    generated: Mutex<u32>,
}

impl FakeDocumentStore {
    pub fn insert(&self, collection: &str, id: &str, fields: Map<String, Value>) {
        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection.to_string()).or_default();
        docs.retain(|doc| doc.id != id);
        docs.push(Document {
            id: id.to_string(),
            fields,
        });
    }

    pub fn documents_in(&self, collection: &str) -> Vec<Document> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn collection_names(&self) -> Vec<String> {
        self.collections.lock().unwrap().keys().cloned().collect()
    }

    /// The next call fails with `StoreError::Network(message)`.
    pub fn fail_next(&self, message: &str) {
        *self.next_error.lock().unwrap() = Some(message.to_string());
    }

    fn take_error(&self) -> Result<(), StoreError> {
        match self.next_error.lock().unwrap().take() {
            Some(message) => Err(StoreError::Network(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentStore for FakeDocumentStore {
    async fn add_document(
        &self,
        collection: &str,
        fields: &Map<String, Value>,
    ) -> Result<String, StoreError> {
        self.take_error()?;
        let id = {
            let mut generated = self.generated.lock().unwrap();
            *generated += 1;
            format!("auto-{}", *generated)
        };
        self.insert(collection, &id, fields.clone());
        Ok(id)
    }

    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: &Map<String, Value>,
    ) -> Result<(), StoreError> {
        self.take_error()?;
        self.insert(collection, id, fields.clone());
        Ok(())
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.take_error()?;
        Ok(self.documents_in(collection))
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        self.take_error()?;
        Ok(self.collection_names())
    }
}

/// Issues `uid-<email>` uids. Emails passed to `reject` fail with `EMAIL_EXISTS`.
#[derive(Default)]
pub struct FakeIdentityStore {
    users: Mutex<Vec<UserRecord>>,
    rejected: Mutex<HashSet<String>>,
}

impl FakeIdentityStore {
    pub fn reject(&self, email: &str) {
        self.rejected.lock().unwrap().insert(email.to_string());
    }

    pub fn emails(&self) -> Vec<String> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .map(|user| user.email.clone())
            .collect()
    }
}

#[async_trait]
impl IdentityStore for FakeIdentityStore {
    async fn create_user(&self, email: &str, _password: &str) -> Result<String, StoreError> {
        if self.rejected.lock().unwrap().contains(email) {
            return Err(StoreError::Api {
                status: 400,
                message: "EMAIL_EXISTS".to_string(),
            });
        }
        let uid = format!("uid-{email}");
        self.users.lock().unwrap().push(UserRecord {
            uid: uid.clone(),
            email: email.to_string(),
        });
        Ok(uid)
    }

    async fn lookup_by_email(&self, emails: &[String]) -> Result<Vec<UserRecord>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|user| emails.contains(&user.email))
            .cloned()
            .collect())
    }
}

/// Services wired to in-memory stores. Keep the runtime alive for the whole test.
pub fn test_services() -> (
    tokio::runtime::Runtime,
    Services,
    Arc<FakeDocumentStore>,
    Arc<FakeIdentityStore>,
) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let documents = Arc::new(FakeDocumentStore::default());
    let identities = Arc::new(FakeIdentityStore::default());
    let services = Services {
        documents: documents.clone(),
        identities: identities.clone(),
        runtime: runtime.handle().clone(),
        assets_dir: PathBuf::from("assets"),
        users_file: PathBuf::from("assets/users.json"),
    };
    (runtime, services, documents, identities)
}
