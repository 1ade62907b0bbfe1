//! `collection.Create` and `collection.List`.
//!
//! Firestore has no empty collections, so creating one means writing a
//! placeholder document into it.

use chrono::Utc;
use log::info;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::runtime::Handle;

use super::table;
use crate::core::action::{Action, Control};
use crate::core::console::{Console, prompt};
use crate::emulator::DocumentStore;

/// Fields of the document that brings a new collection into existence.
pub fn placeholder_fields() -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("placeholder".to_string(), Value::Bool(true));
    fields.insert("created_at".to_string(), Value::String(Utc::now().to_rfc3339()));
    fields
}

pub struct CreateCollection {
    documents: Arc<dyn DocumentStore>,
    runtime: Handle,
}

impl CreateCollection {
    pub fn new(documents: Arc<dyn DocumentStore>, runtime: Handle) -> Self {
        Self { documents, runtime }
    }
}

impl Action for CreateCollection {
    fn invoke(&self, console: &mut dyn Console) -> Control {
        let name = prompt(console, "Enter collection name: ");
        if name.is_empty() || name.contains(char::is_whitespace) {
            console.write_line("Invalid or empty collection name.");
            return Control::Continue;
        }

        match self
            .runtime
            .block_on(self.documents.add_document(&name, &placeholder_fields()))
        {
            Ok(id) => {
                info!("Created collection {} with placeholder {}", name, id);
                console.write_line(&format!("Successfully created collection: {name}"));
            }
            Err(e) => {
                console.write_line(&format!("Error creating collection '{name}': {e}"));
            }
        }
        Control::Continue
    }
}

pub struct ListCollections {
    documents: Arc<dyn DocumentStore>,
    runtime: Handle,
}

impl ListCollections {
    pub fn new(documents: Arc<dyn DocumentStore>, runtime: Handle) -> Self {
        Self { documents, runtime }
    }
}

impl Action for ListCollections {
    fn invoke(&self, console: &mut dyn Console) -> Control {
        console.write_line("");
        console.write_line("--- List Collections ---");

        let collections = match self.runtime.block_on(self.documents.list_collections()) {
            Ok(collections) => collections,
            Err(e) => {
                console.write_line(&format!("Error listing collections: {e}"));
                return Control::Continue;
            }
        };

        if collections.is_empty() {
            console.write_line("No collections found in the Firestore emulator.");
            return Control::Continue;
        }

        let rows: Vec<Vec<String>> = collections.into_iter().map(|name| vec![name]).collect();
        for line in table::render(&[("Collection Name", 30)], &rows) {
            console.write_line(&line);
        }
        Control::Continue
    }
}
