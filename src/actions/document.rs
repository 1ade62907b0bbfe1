//! `document.Create` and `document.List`.
//!
//! Document bodies come from JSON files in the assets directory; the file
//! must hold a single JSON object.

use log::{info, warn};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Handle;

use super::table;
use crate::core::action::{Action, Control};
use crate::core::console::{Console, prompt};
use crate::emulator::DocumentStore;

/// Collection listed when the user leaves the name blank.
pub const DEFAULT_COLLECTION: &str = "testCollection";

/// Reads `path` as a JSON object. The error is ready to show to the user.
pub fn read_document_file(path: &Path) -> Result<Map<String, Value>, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Error reading JSON file '{}': {}", path.display(), e))?;
    match serde_json::from_str::<Value>(&contents) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(format!(
            "Error parsing JSON content from '{}': expected a JSON object",
            path.display()
        )),
        Err(e) => Err(format!("Error parsing JSON content from '{}': {}", path.display(), e)),
    }
}

/// `key: value` for the first field, `N/A` for an empty document.
pub fn preview(fields: &Map<String, Value>) -> String {
    match fields.iter().next() {
        Some((key, Value::String(s))) => format!("{key}: {s}"),
        Some((key, value)) => format!("{key}: {value}"),
        None => "N/A".to_string(),
    }
}

pub struct CreateDocument {
    documents: Arc<dyn DocumentStore>,
    runtime: Handle,
    assets_dir: PathBuf,
}

impl CreateDocument {
    pub fn new(documents: Arc<dyn DocumentStore>, runtime: Handle, assets_dir: PathBuf) -> Self {
        Self {
            documents,
            runtime,
            assets_dir,
        }
    }
}

impl Action for CreateDocument {
    fn invoke(&self, console: &mut dyn Console) -> Control {
        let collection = prompt(console, "Enter collection name: ");
        let file_name = prompt(console, "Enter JSON file name (e.g., data.json): ");
        if collection.is_empty() || file_name.is_empty() {
            console.write_line("Collection name and file name cannot be empty.");
            return Control::Continue;
        }
        let mut id = prompt(console, "Enter document ID (leave blank to generate): ");
        if id.is_empty() {
            id = uuid::Uuid::new_v4().to_string();
        }

        let path = self.assets_dir.join(&file_name);
        let fields = match read_document_file(&path) {
            Ok(fields) => fields,
            Err(message) => {
                warn!("{}", message);
                console.write_line(&message);
                return Control::Continue;
            }
        };

        match self
            .runtime
            .block_on(self.documents.set_document(&collection, &id, &fields))
        {
            Ok(()) => {
                info!("Wrote {} to {}/{}", path.display(), collection, id);
                console.write_line(&format!(
                    "Successfully created document with ID: {id} in collection: {collection}"
                ));
            }
            Err(e) => {
                console.write_line(&format!(
                    "Error creating document in collection '{collection}': {e}"
                ));
            }
        }
        Control::Continue
    }
}

pub struct ListDocuments {
    documents: Arc<dyn DocumentStore>,
    runtime: Handle,
}

impl ListDocuments {
    pub fn new(documents: Arc<dyn DocumentStore>, runtime: Handle) -> Self {
        Self { documents, runtime }
    }
}

impl Action for ListDocuments {
    fn invoke(&self, console: &mut dyn Console) -> Control {
        let mut collection = prompt(console, "Enter collection name: ");
        if collection.is_empty() {
            collection = DEFAULT_COLLECTION.to_string();
        }

        console.write_line("");
        console.write_line(&format!("--- List Documents in {collection} ---"));

        let documents = match self.runtime.block_on(self.documents.list_documents(&collection)) {
            Ok(documents) => documents,
            Err(e) => {
                console.write_line(&format!("Error listing documents: {e}"));
                return Control::Continue;
            }
        };

        if documents.is_empty() {
            console.write_line("No documents found in the collection.");
            return Control::Continue;
        }

        let rows: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| vec![doc.id.clone(), preview(&doc.fields)])
            .collect();
        for line in table::render(&[("Document ID", 40), ("Content (Preview)", 30)], &rows) {
            console.write_line(&line);
        }
        Control::Continue
    }
}
